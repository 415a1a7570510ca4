use std::{path::PathBuf, sync::Arc, time::Duration};

use flume::Receiver;
use ratatui::Frame;
use tracing::{debug, info};

use crate::{
    audio::{state::PlaybackState, system::AudioSystem},
    config::Config,
    event::events::Event,
    generation::state::{StudioEvent, reduce},
    http::{
        ApiService,
        download::{save_render, song_file_name},
    },
    util::task::TaskManager,
};

use super::{
    context::AppContext,
    message::AppMessage,
    state::{AppState, BackendStatus, Focus, Notice},
    tui::{self, TerminalEvent},
    util::handler::EventHandler,
};

pub const SUBMIT_TASK: &str = "submit";
pub const MEDIA_TASK: &str = "media";
pub const HEALTH_TASK: &str = "health";

pub struct App {
    pub event_rx: Receiver<Event>,
    pub ctx: AppContext,
    pub state: AppState,
    pub audio: AudioSystem,
    pub task_manager: TaskManager,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> color_eyre::Result<Self> {
        let config = Arc::new(config);
        let (event_tx, event_rx) = flume::unbounded();
        let api = Arc::new(ApiService::new(config.clone())?);
        let ctx = AppContext::new(config, api, event_tx);

        Ok(Self::from_parts(ctx, event_rx, AudioSystem::new()))
    }

    pub fn from_parts(ctx: AppContext, event_rx: Receiver<Event>, audio: AudioSystem) -> Self {
        Self {
            event_rx,
            ctx,
            state: AppState::default(),
            audio,
            task_manager: TaskManager::new(),
            has_focus: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?
            .tick_rate(Duration::from_millis(80))
            .paste(true);
        tui.enter()?;

        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui).await?;
        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        self.audio.stop();
        tui.exit()?;
        Ok(())
    }

    fn ui(&self, frame: &mut Frame) {
        if self.has_focus {
            frame.render_widget(self, frame.area());
        }
    }

    pub fn apply(&mut self, event: StudioEvent) {
        self.state.studio = reduce(std::mem::take(&mut self.state.studio), event);
    }

    pub fn check_health(&mut self) {
        self.state.ui.backend = BackendStatus::Checking;
        let api = self.ctx.api.clone();
        let tx = self.ctx.event_tx.clone();

        self.task_manager.spawn(
            HEALTH_TASK,
            tokio::spawn(async move {
                let event = match api.health().await {
                    Ok(status) => Event::HealthChecked(status),
                    Err(e) => Event::HealthFailed(e.to_string()),
                };
                let _ = tx.send(event);
            }),
        );
    }

    pub async fn update(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Quit => self.should_quit = true,
            AppMessage::FocusNext => self.state.ui.focus = self.state.ui.focus.next(),
            AppMessage::FocusPrevious => self.state.ui.focus = self.state.ui.focus.prev(),
            AppMessage::Input(c) => self.insert_text(&c.to_string()),
            AppMessage::Paste(text) => self.insert_text(&text),
            AppMessage::Backspace => self.backspace(),
            AppMessage::ClearField => self.clear_field(),
            AppMessage::NextGenre => {
                let genre = self.state.studio.genre.next();
                self.apply(StudioEvent::GenreChanged(genre));
            }
            AppMessage::PreviousGenre => {
                let genre = self.state.studio.genre.prev();
                self.apply(StudioEvent::GenreChanged(genre));
            }
            AppMessage::Submit => self.submit(),
            AppMessage::TogglePlayback => self.toggle_playback(),
            AppMessage::StopPlayback => {
                self.audio.stop();
                self.state.ui.notice = None;
            }
            AppMessage::Download => self.download(),
        }
    }

    fn insert_text(&mut self, text: &str) {
        match self.state.ui.focus {
            Focus::Lyrics => {
                let mut lyrics = self.state.studio.lyrics.clone();
                lyrics.push_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
                self.apply(StudioEvent::LyricsChanged(lyrics));
            }
            Focus::VoiceSample => {
                let single_line: String = text.chars().filter(|c| !c.is_control()).collect();
                self.state.ui.voice_path_input.push_str(&single_line);
                self.sync_voice_file();
            }
            Focus::Genre | Focus::Submit => {}
        }
    }

    fn backspace(&mut self) {
        match self.state.ui.focus {
            Focus::Lyrics => {
                let mut lyrics = self.state.studio.lyrics.clone();
                lyrics.pop();
                self.apply(StudioEvent::LyricsChanged(lyrics));
            }
            Focus::VoiceSample => {
                self.state.ui.voice_path_input.pop();
                self.sync_voice_file();
            }
            Focus::Genre | Focus::Submit => {}
        }
    }

    fn clear_field(&mut self) {
        match self.state.ui.focus {
            Focus::Lyrics => self.apply(StudioEvent::LyricsChanged(String::new())),
            Focus::VoiceSample => {
                self.state.ui.voice_path_input.clear();
                self.sync_voice_file();
            }
            Focus::Genre | Focus::Submit => {}
        }
    }

    fn sync_voice_file(&mut self) {
        let input = self.state.ui.voice_path_input.trim();
        let path = (!input.is_empty()).then(|| PathBuf::from(input));
        self.apply(StudioEvent::VoiceFileChanged(path));
    }

    /// The button is disabled while a submission is in flight.
    fn submit(&mut self) {
        if !self.state.studio.can_submit() || self.task_manager.is_running(SUBMIT_TASK) {
            debug!("submit ignored, a submission is already in flight");
            return;
        }

        // The previous render is going away; nothing fetched for it may play.
        self.audio.stop();
        self.cancel_media();
        self.state.ui.notice = None;

        let handler = self.ctx.submissions.clone();
        let form = self.state.studio.snapshot();
        self.task_manager.spawn(
            SUBMIT_TASK,
            tokio::spawn(async move {
                let _ = handler.submit_form(form).await;
            }),
        );
    }

    fn toggle_playback(&mut self) {
        match self.audio.state() {
            PlaybackState::Playing | PlaybackState::Paused => {
                if let Err(e) = self.audio.toggle_pause() {
                    self.state.ui.notice = Some(Notice::error(e.to_string()));
                }
            }
            PlaybackState::Stopped => {
                let Some(url) = self.state.studio.song_url.clone() else {
                    self.state.ui.notice = Some(Notice::info("Generate a song first."));
                    return;
                };
                if !self.audio.has_output() {
                    self.state.ui.notice = Some(Notice::error("No audio output available."));
                    return;
                }

                let ticket = self.begin_media();
                let api = self.ctx.api.clone();
                let tx = self.ctx.event_tx.clone();
                self.task_manager.spawn(
                    MEDIA_TASK,
                    tokio::spawn(async move {
                        let event = match api.fetch_media(&url).await {
                            Ok(bytes) => Event::SongFetched { ticket, bytes },
                            Err(e) => Event::MediaError {
                                ticket,
                                reason: e.to_string(),
                            },
                        };
                        let _ = tx.send(event);
                    }),
                );
            }
        }
    }

    fn download(&mut self) {
        let Some(url) = self.state.studio.song_url.clone() else {
            self.state.ui.notice = Some(Notice::info("Generate a song first."));
            return;
        };

        let name = song_file_name(&url, self.state.studio.file_name.as_deref());
        let dir = self.ctx.config.download_dir.clone();
        let api = self.ctx.api.clone();
        let tx = self.ctx.event_tx.clone();
        info!(%url, dir = %dir.display(), "downloading render");

        let ticket = self.begin_media();
        self.task_manager.spawn(
            MEDIA_TASK,
            tokio::spawn(async move {
                let result = match api.fetch_media(&url).await {
                    Ok(bytes) => save_render(&dir, &name, &bytes).await,
                    Err(e) => Err(e),
                };
                let event = match result {
                    Ok(path) => Event::SongDownloaded { ticket, path },
                    Err(e) => Event::MediaError {
                        ticket,
                        reason: e.to_string(),
                    },
                };
                let _ = tx.send(event);
            }),
        );
    }

    fn begin_media(&mut self) -> u64 {
        self.state.ui.media_ticket += 1;
        self.state.ui.media_busy = true;
        self.state.ui.media_ticket
    }

    fn cancel_media(&mut self) {
        self.task_manager.abort(MEDIA_TASK);
        self.state.ui.media_ticket += 1;
        self.state.ui.media_busy = false;
    }

    /// Whether a media result still belongs to the latest request. Settles the
    /// busy flag when it does.
    pub fn settle_media(&mut self, ticket: u64) -> bool {
        if ticket != self.state.ui.media_ticket {
            debug!(ticket, "dropping result of a superseded media request");
            return false;
        }
        self.state.ui.media_busy = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::SubmitError,
        generation::{SongGenerator, request::{Genre, SubmissionRequest}},
        http::model::GeneratedSong,
    };
    use async_trait::async_trait;

    struct EchoGenerator;

    #[async_trait]
    impl SongGenerator for EchoGenerator {
        async fn generate(
            &self,
            request: &SubmissionRequest,
        ) -> Result<GeneratedSong, SubmitError> {
            Ok(GeneratedSong {
                song_url: format!("http://localhost:8000/media/{}.mp3", request.genre),
                file_name: None,
                metadata: None,
            })
        }
    }

    fn app() -> App {
        let config = Arc::new(Config::default());
        let (tx, rx) = flume::unbounded();
        let api = Arc::new(ApiService::with_client(config.clone(), reqwest::Client::new()));
        let ctx = AppContext::with_generator(config, api, Arc::new(EchoGenerator), tx);
        App::from_parts(ctx, rx, AudioSystem::silent())
    }

    async fn drain(app: &mut App) {
        while let Ok(Ok(evt)) =
            tokio::time::timeout(Duration::from_millis(200), app.event_rx.recv_async()).await
        {
            EventHandler::handle_action(app, evt).await;
        }
    }

    #[tokio::test]
    async fn typing_edits_the_focused_field() {
        let mut app = app();
        for c in "hi".chars() {
            app.update(AppMessage::Input(c)).await;
        }
        app.update(AppMessage::Input('\n')).await;
        assert_eq!(app.state.studio.lyrics, "hi\n");

        app.update(AppMessage::FocusNext).await;
        app.update(AppMessage::NextGenre).await;
        assert_eq!(app.state.studio.genre, Genre::HipHop);

        app.update(AppMessage::FocusNext).await;
        app.update(AppMessage::Paste("/tmp/me.wav\n".into())).await;
        assert_eq!(app.state.studio.voice_file, Some(PathBuf::from("/tmp/me.wav")));

        app.update(AppMessage::ClearField).await;
        assert_eq!(app.state.studio.voice_file, None);
    }

    #[tokio::test]
    async fn empty_submission_shows_validation_error() {
        let mut app = app();
        app.update(AppMessage::Submit).await;
        drain(&mut app).await;

        assert_eq!(
            app.state.studio.error.as_deref(),
            Some("Please enter some lyrics.")
        );
        assert!(!app.state.studio.loading);
    }

    #[tokio::test]
    async fn submission_resolves_into_the_result_slot() {
        let mut app = app();
        app.update(AppMessage::Paste("verse".into())).await;
        app.update(AppMessage::Submit).await;
        drain(&mut app).await;

        assert_eq!(
            app.state.studio.song_url.as_deref(),
            Some("http://localhost:8000/media/Trap.mp3")
        );
        assert_eq!(app.state.studio.error, None);
        assert!(!app.state.studio.loading);
    }

    #[tokio::test]
    async fn playback_without_a_song_only_explains() {
        let mut app = app();
        app.update(AppMessage::TogglePlayback).await;
        assert_eq!(
            app.state.ui.notice,
            Some(Notice::info("Generate a song first."))
        );
        app.update(AppMessage::Download).await;
        assert!(!app.state.ui.media_busy);
    }

    #[tokio::test]
    async fn new_submission_drops_a_pending_render_fetch() {
        let mut app = app();
        app.apply(StudioEvent::Resolved(GeneratedSong {
            song_url: "http://localhost:8000/media/first.mp3".into(),
            file_name: None,
            metadata: None,
        }));

        let ticket = app.begin_media();
        app.task_manager
            .spawn(MEDIA_TASK, tokio::spawn(std::future::pending::<()>()));

        app.update(AppMessage::Paste("second verse".into())).await;
        app.update(AppMessage::Submit).await;
        assert!(!app.task_manager.is_running(MEDIA_TASK));
        assert!(!app.state.ui.media_busy);

        // Already queued before the abort; must not reach the audio system.
        EventHandler::handle_action(
            &mut app,
            Event::SongFetched {
                ticket,
                bytes: vec![0; 16],
            },
        )
        .await;
        assert_eq!(app.state.ui.notice, None);
        assert_eq!(app.audio.state(), PlaybackState::Stopped);

        drain(&mut app).await;
        assert_eq!(
            app.state.studio.song_url.as_deref(),
            Some("http://localhost:8000/media/Trap.mp3")
        );
    }

    #[tokio::test]
    async fn current_media_result_still_lands() {
        let mut app = app();
        let ticket = app.begin_media();

        EventHandler::handle_action(
            &mut app,
            Event::MediaError {
                ticket,
                reason: "Server responded with 404 Not Found".into(),
            },
        )
        .await;

        assert!(!app.state.ui.media_busy);
        assert_eq!(
            app.state.ui.notice,
            Some(Notice::error("Server responded with 404 Not Found"))
        );
    }

    #[tokio::test]
    async fn finished_playback_is_announced() {
        let mut app = app();
        EventHandler::handle_action(&mut app, Event::PlaybackEnded).await;
        assert_eq!(
            app.state.ui.notice,
            Some(Notice::info("Playback finished. Ctrl+P plays it again."))
        );
    }
}
