use serde::Deserialize;
use serde_json::Value;

use crate::error::SubmitError;

/// Whatever the server put under `metadata`, kept as-is. Fields are read
/// only for display, so a partial or oddly typed object never fails a
/// response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RenderMetadata(Value);

impl RenderMetadata {
    /// Text form of a scalar field. Strings are used verbatim, numbers in
    /// their JSON spelling; null, empty and nested values count as absent.
    fn field(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// `Genre: … • Approx. Ns • Render ID: … • Brand: …`, skipping the parts
    /// the server left out.
    pub fn summary(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.field("genre").map(|genre| format!("Genre: {genre}")),
            self.field("duration_seconds")
                .map(|seconds| format!("Approx. {seconds}s")),
            self.field("id").map(|id| format!("Render ID: {id}")),
            self.field("brand").map(|brand| format!("Brand: {brand}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        (!parts.is_empty()).then(|| parts.join(" • "))
    }
}

/// Body of `POST /api/generate-song`, for both outcomes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub song_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub metadata: Option<RenderMetadata>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSong {
    pub song_url: String,
    pub file_name: Option<String>,
    pub metadata: Option<RenderMetadata>,
}

impl GenerateResponse {
    pub fn into_song(self, api_base: &str) -> Result<GeneratedSong, SubmitError> {
        if !self.success {
            return Err(SubmitError::generation(self.error));
        }

        let song_path = self
            .song_url
            .filter(|path| !path.is_empty())
            .ok_or_else(|| SubmitError::generation(self.error))?;

        Ok(GeneratedSong {
            song_url: resolve_song_url(api_base, &song_path),
            file_name: self.file_name,
            metadata: self.metadata,
        })
    }
}

/// Server paths are joined onto the API origin verbatim; absolute URLs are
/// used as they are.
pub fn resolve_song_url(api_base: &str, song_path: &str) -> String {
    if song_path.starts_with("http://") || song_path.starts_with("https://") {
        song_path.to_string()
    } else {
        format!("{api_base}{song_path}")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AiServices {
    #[serde(default)]
    pub suno: bool,
    #[serde(default)]
    pub elevenlabs: bool,
    #[serde(default)]
    pub openai: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub app: Option<String>,
    #[serde(default)]
    pub ai_services: AiServices,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
