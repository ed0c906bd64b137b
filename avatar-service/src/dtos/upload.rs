use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct UploadRequest {
    /// Base64 image, optionally as a data URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl UploadRequest {
    /// Parse a raw body. An empty body counts as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    /// The image payload, unless absent or empty.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    pub key: String,
}
