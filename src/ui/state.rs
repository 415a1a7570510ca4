use crate::{generation::state::StudioState, http::model::HealthStatus};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub studio: StudioState,
    pub ui: UiState,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub focus: Focus,
    pub voice_path_input: String,
    pub backend: BackendStatus,
    pub notice: Option<Notice>,
    pub media_busy: bool,
    pub media_ticket: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Lyrics,
    Genre,
    VoiceSample,
    Submit,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Lyrics => Focus::Genre,
            Focus::Genre => Focus::VoiceSample,
            Focus::VoiceSample => Focus::Submit,
            Focus::Submit => Focus::Lyrics,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Focus::Lyrics => Focus::Submit,
            Focus::Genre => Focus::Lyrics,
            Focus::VoiceSample => Focus::Genre,
            Focus::Submit => Focus::VoiceSample,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum BackendStatus {
    #[default]
    Checking,
    Online(HealthStatus),
    Offline(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Feedback for playback and downloads. Submission errors have their own slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}
