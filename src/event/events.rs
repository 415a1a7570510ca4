use std::path::PathBuf;

use crate::{generation::state::StudioEvent, http::model::HealthStatus};

#[derive(Debug, Clone)]
pub enum Event {
    // Submission
    Studio(StudioEvent),

    // Backend
    HealthChecked(HealthStatus),
    HealthFailed(String),

    // Rendered song. `ticket` ties a result to the media request that asked
    // for it; results from superseded requests are dropped.
    SongFetched { ticket: u64, bytes: Vec<u8> },
    SongDownloaded { ticket: u64, path: PathBuf },
    MediaError { ticket: u64, reason: String },
    PlaybackEnded,
}

impl From<StudioEvent> for Event {
    fn from(event: StudioEvent) -> Self {
        Event::Studio(event)
    }
}
