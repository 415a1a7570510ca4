use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::error::SubmitError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Genre {
    #[default]
    Trap,
    HipHop,
    Pop,
    RnB,
    Worship,
    Edm,
    Rock,
    Country,
    LoFi,
}

impl Genre {
    pub const ALL: [Genre; 9] = [
        Genre::Trap,
        Genre::HipHop,
        Genre::Pop,
        Genre::RnB,
        Genre::Worship,
        Genre::Edm,
        Genre::Rock,
        Genre::Country,
        Genre::LoFi,
    ];

    /// Label sent on the wire and shown in the selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Trap => "Trap",
            Genre::HipHop => "Hip-Hop",
            Genre::Pop => "Pop",
            Genre::RnB => "R&B",
            Genre::Worship => "Worship",
            Genre::Edm => "EDM",
            Genre::Rock => "Rock",
            Genre::Country => "Country",
            Genre::LoFi => "Lo-Fi",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|g| g == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An audio clip attached to a submission for voice cloning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSample {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl VoiceSample {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(Path::new(&file_name)).to_string();
        Self {
            file_name,
            bytes,
            mime,
        }
    }

    pub async fn load(path: &Path) -> Result<Self, SubmitError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SubmitError::VoiceSample {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "voice_sample".to_string());

        Ok(Self::new(file_name, bytes))
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    match ext.as_deref() {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("m4a" | "mp4" | "aac") => "audio/mp4",
        Some("ogg" | "oga" | "opus") => "audio/ogg",
        Some("flac") => "audio/flac",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub lyrics: String,
    pub genre: Genre,
    pub voice_sample: Option<VoiceSample>,
}

impl SubmissionRequest {
    pub fn new(lyrics: impl Into<String>, genre: Genre) -> Self {
        Self {
            lyrics: lyrics.into(),
            genre,
            voice_sample: None,
        }
    }

    pub fn with_voice_sample(mut self, sample: VoiceSample) -> Self {
        self.voice_sample = Some(sample);
        self
    }

    pub fn validate(&self) -> Result<(), SubmitError> {
        if self.lyrics.trim().is_empty() {
            return Err(SubmitError::Validation);
        }
        Ok(())
    }
}

/// What the form holds at the moment the user hits submit. The voice sample is
/// still a path here; it is read by the submission handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub lyrics: String,
    pub genre: Genre,
    pub voice_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_keep_their_wire_labels_in_order() {
        let labels: Vec<_> = Genre::ALL.iter().map(Genre::as_str).collect();
        assert_eq!(
            labels,
            ["Trap", "Hip-Hop", "Pop", "R&B", "Worship", "EDM", "Rock", "Country", "Lo-Fi"]
        );
        assert_eq!(Genre::default(), Genre::Trap);
    }

    #[test]
    fn genre_cycles_wrap_around() {
        assert_eq!(Genre::LoFi.next(), Genre::Trap);
        assert_eq!(Genre::Trap.prev(), Genre::LoFi);
        assert_eq!(Genre::Pop.next(), Genre::RnB);
    }

    #[test]
    fn whitespace_lyrics_fail_validation() {
        let request = SubmissionRequest::new(" \n\t ", Genre::Pop);
        assert_eq!(request.validate(), Err(SubmitError::Validation));
        assert!(SubmissionRequest::new("la la", Genre::Pop).validate().is_ok());
    }

    #[test]
    fn voice_sample_mime_follows_extension() {
        assert_eq!(VoiceSample::new("take.WAV", vec![]).mime, "audio/wav");
        assert_eq!(VoiceSample::new("take.mp3", vec![]).mime, "audio/mpeg");
        assert_eq!(VoiceSample::new("take", vec![]).mime, "application/octet-stream");
    }

    #[tokio::test]
    async fn loading_missing_sample_reports_path() {
        let err = VoiceSample::load(Path::new("/definitely/not/here.wav"))
            .await
            .unwrap_err();
        match err {
            SubmitError::VoiceSample { path, .. } => assert!(path.ends_with("here.wav")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn loading_sample_keeps_bytes_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hook.wav");
        std::fs::write(&path, [1u8, 2, 3, 4]).unwrap();

        let sample = VoiceSample::load(&path).await.unwrap();
        assert_eq!(sample.file_name, "hook.wav");
        assert_eq!(sample.bytes, vec![1, 2, 3, 4]);
        assert_eq!(sample.mime, "audio/wav");
    }
}
