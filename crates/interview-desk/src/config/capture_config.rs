use crate::config::default_true;

use interview_desk_core::MediaConstraints;
use serde::{Deserialize, Serialize};

/// Which media stack backs the capture controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MediaBackendKind {
    /// Default system microphone via CPAL.
    #[default]
    Microphone,
    /// Synthetic camera and microphone, no hardware needed.
    Simulated,
}

/// Capture device configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Media backend.
    #[serde(default)]
    pub backend: MediaBackendKind,
    /// Request an audio track.
    #[serde(default = "default_true")]
    pub audio: bool,
    /// Request a video track.
    #[serde(default = "default_true")]
    pub video: bool,
}

impl CaptureConfig {
    /// Constraints passed to the permission request.
    pub fn constraints(&self) -> MediaConstraints {
        MediaConstraints {
            audio: self.audio,
            video: self.video,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            backend: MediaBackendKind::default(),
            audio: true,
            video: true,
        }
    }
}
