pub mod handler;
pub mod request;
pub mod state;

use async_trait::async_trait;

use crate::{error::SubmitError, http::model::GeneratedSong};

use self::request::SubmissionRequest;

pub use handler::{BusyGuard, SubmissionHandler};

/// Anything that can turn a validated request into a rendered song.
#[async_trait]
pub trait SongGenerator: Send + Sync {
    async fn generate(&self, request: &SubmissionRequest) -> Result<GeneratedSong, SubmitError>;
}
