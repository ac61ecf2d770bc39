//! Simulated recording upload.

use crate::config::UploadConfig;

use interview_desk_core::{RecordedBlob, RecordingUploader};

use std::{future::Future, time::Duration};

use tracing::info;

/// Pretends to post recordings to the interview backend.
///
/// Always succeeds after the configured latency.
#[derive(Debug, Clone)]
pub struct SimulatedUploader {
    endpoint: String,
    latency: Duration,
}

impl SimulatedUploader {
    /// Uploader configured from the `[upload]` section.
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            latency: Duration::from_millis(config.simulated_latency_ms),
        }
    }

    /// Where a recording for `interview_id` would be posted.
    pub fn upload_url(&self, interview_id: &str) -> String {
        format!("{}/interviews/{}/recording", self.endpoint, interview_id)
    }
}

impl RecordingUploader for SimulatedUploader {
    fn upload(
        &self,
        interview_id: &str,
        blob: &RecordedBlob,
    ) -> impl Future<Output = Result<(), String>> + Send {
        let url = self.upload_url(interview_id);
        let latency = self.latency;
        let bytes = blob.len();
        let mime_type = blob.mime_type().to_string();

        async move {
            tokio::time::sleep(latency).await;
            info!(url = %url, bytes, mime_type = %mime_type, "Recording uploaded (simulated)");
            Ok(())
        }
    }
}
