use crate::config::{default_upload_endpoint, default_upload_latency_ms};

use serde::{Deserialize, Serialize};

/// Simulated recording upload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Backend the recording would be posted to.
    #[serde(default = "default_upload_endpoint")]
    pub endpoint: String,
    /// Artificial delay before the upload "succeeds".
    #[serde(default = "default_upload_latency_ms")]
    pub simulated_latency_ms: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: default_upload_endpoint(),
            simulated_latency_ms: default_upload_latency_ms(),
        }
    }
}
