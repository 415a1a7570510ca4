use std::path::PathBuf;

use crate::http::model::{GeneratedSong, RenderMetadata};

use super::request::{FormSnapshot, Genre};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Everything the studio screen shows. Lives for one session only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudioState {
    pub lyrics: String,
    pub genre: Genre,
    pub voice_file: Option<PathBuf>,
    pub loading: bool,
    pub song_url: Option<String>,
    pub file_name: Option<String>,
    pub error: Option<String>,
    pub meta: Option<RenderMetadata>,
}

impl StudioState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Submitting
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.song_url.is_some() {
            Phase::Succeeded
        } else {
            Phase::Idle
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            lyrics: self.lyrics.clone(),
            genre: self.genre,
            voice_file: self.voice_file.clone(),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.loading
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StudioEvent {
    // Form input
    LyricsChanged(String),
    GenreChanged(Genre),
    VoiceFileChanged(Option<PathBuf>),

    // Submission lifecycle
    Reset,
    Dispatched,
    Resolved(GeneratedSong),
    Failed(String),
    Settled,
}

pub fn reduce(mut state: StudioState, event: StudioEvent) -> StudioState {
    match event {
        StudioEvent::LyricsChanged(lyrics) => state.lyrics = lyrics,
        StudioEvent::GenreChanged(genre) => state.genre = genre,
        StudioEvent::VoiceFileChanged(path) => state.voice_file = path,
        StudioEvent::Reset => {
            state.error = None;
            state.song_url = None;
            state.file_name = None;
            state.meta = None;
        }
        StudioEvent::Dispatched => state.loading = true,
        StudioEvent::Resolved(song) => {
            state.error = None;
            state.song_url = Some(song.song_url);
            state.file_name = song.file_name;
            state.meta = song.metadata;
        }
        StudioEvent::Failed(message) => {
            state.song_url = None;
            state.file_name = None;
            state.meta = None;
            state.error = Some(message);
        }
        StudioEvent::Settled => state.loading = false,
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn song() -> GeneratedSong {
        GeneratedSong {
            song_url: "http://localhost:8000/media/abc.mp3".into(),
            file_name: Some("abc.mp3".into()),
            metadata: Some(serde_json::from_value::<RenderMetadata>(serde_json::json!({
                "id": "abc",
                "genre": "Trap",
                "duration_seconds": 42,
                "brand": "FolseTech",
            }))
            .unwrap()),
        }
    }

    fn fold(events: Vec<StudioEvent>) -> StudioState {
        events.into_iter().fold(StudioState::default(), reduce)
    }

    #[test]
    fn starts_idle_with_defaults() {
        let state = StudioState::default();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.genre, Genre::Trap);
        assert!(state.lyrics.is_empty());
        assert!(state.voice_file.is_none());
        assert!(state.can_submit());
    }

    #[test]
    fn successful_cycle() {
        let mut state = fold(vec![StudioEvent::Reset, StudioEvent::Dispatched]);
        assert_eq!(state.phase(), Phase::Submitting);
        assert!(!state.can_submit());

        state = reduce(state, StudioEvent::Resolved(song()));
        assert!(state.loading);

        state = reduce(state, StudioEvent::Settled);
        assert_eq!(state.phase(), Phase::Succeeded);
        assert_eq!(state.meta, song().metadata);
        assert_eq!(state.file_name.as_deref(), Some("abc.mp3"));
    }

    #[test]
    fn reset_clears_previous_result_and_error() {
        let succeeded = fold(vec![
            StudioEvent::Dispatched,
            StudioEvent::Resolved(song()),
            StudioEvent::Settled,
        ]);
        let cleared = reduce(succeeded, StudioEvent::Reset);
        assert_eq!(cleared.song_url, None);
        assert_eq!(cleared.meta, None);
        assert_eq!(cleared.error, None);

        let failed = fold(vec![StudioEvent::Failed("bad genre".into())]);
        let cleared = reduce(failed, StudioEvent::Reset);
        assert_eq!(cleared.phase(), Phase::Idle);
    }

    #[test]
    fn failure_leaves_no_song() {
        let state = fold(vec![
            StudioEvent::Reset,
            StudioEvent::Dispatched,
            StudioEvent::Failed("bad genre".into()),
            StudioEvent::Settled,
        ]);
        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(state.error.as_deref(), Some("bad genre"));
        assert_eq!(state.song_url, None);
        assert!(!state.loading);
    }

    #[test]
    fn terminal_states_are_not_sticky() {
        let failed = fold(vec![StudioEvent::Failed("nope".into())]);
        let resubmitting = fold_from(failed, vec![StudioEvent::Reset, StudioEvent::Dispatched]);
        assert_eq!(resubmitting.phase(), Phase::Submitting);
        assert_eq!(resubmitting.error, None);
    }

    #[test]
    fn form_edits_do_not_touch_submission_slots() {
        let state = fold(vec![
            StudioEvent::Failed("nope".into()),
            StudioEvent::LyricsChanged("new words".into()),
            StudioEvent::GenreChanged(Genre::Country),
            StudioEvent::VoiceFileChanged(Some(PathBuf::from("me.wav"))),
        ]);
        assert_eq!(state.error.as_deref(), Some("nope"));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.lyrics, "new words");
        assert_eq!(snapshot.genre, Genre::Country);
        assert_eq!(snapshot.voice_file, Some(PathBuf::from("me.wav")));
    }

    fn fold_from(state: StudioState, events: Vec<StudioEvent>) -> StudioState {
        events.into_iter().fold(state, reduce)
    }
}
