pub mod download;
pub mod form;
pub mod model;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{FetchError, SubmitError},
    generation::{SongGenerator, request::SubmissionRequest},
};

use self::{
    form::MultipartPayload,
    model::{GenerateResponse, GeneratedSong, HealthStatus},
};

pub const GENERATE_PATH: &str = "/api/generate-song";
pub const HEALTH_PATH: &str = "/health";

pub struct ApiService {
    pub client: reqwest::Client,
    config: Arc<Config>,
}

impl ApiService {
    pub fn new(config: Arc<Config>) -> color_eyre::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_client(config, builder.build()?))
    }

    pub fn with_client(config: Arc<Config>, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    pub fn api_base(&self) -> &str {
        &self.config.api_base
    }

    pub async fn generate_song(
        &self,
        request: &SubmissionRequest,
    ) -> Result<GeneratedSong, SubmitError> {
        let url = self.config.endpoint(GENERATE_PATH);
        let payload = MultipartPayload::from_request(request);
        debug!(fields = ?payload.field_names(), %url, "sending generation request");

        let response = self
            .client
            .post(&url)
            .multipart(payload.into_form()?)
            .send()
            .await?;

        // Failures arrive as JSON with a 500, so the status is only logged.
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            warn!(%status, "generation endpoint returned an error status");
        }

        let envelope: GenerateResponse = serde_json::from_slice(&body)?;
        let song = envelope.into_song(self.api_base())?;
        info!(song_url = %song.song_url, "song generated");

        Ok(song)
    }

    pub async fn health(&self) -> Result<HealthStatus, FetchError> {
        let response = self
            .client
            .get(self.config.endpoint(HEALTH_PATH))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn fetch_media(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SongGenerator for ApiService {
    async fn generate(&self, request: &SubmissionRequest) -> Result<GeneratedSong, SubmitError> {
        self.generate_song(request).await
    }
}
