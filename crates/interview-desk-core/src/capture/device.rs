//! Seams between the capture controller and the platform media stack.
//!
//! A backend implements [`MediaDevices`] (the permission prompt),
//! [`DeviceStream`] (the live camera/microphone handle) and [`MediaRecorder`]
//! (chunked encoding of a stream). The controller never touches platform types.

use crate::capture::{ChunkSink, RecordedBlob};

use std::future::Future;

use thiserror::Error;

/// Which capabilities to request from the device-permission API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    /// Request a video track.
    pub video: bool,
    /// Request an audio track.
    pub audio: bool,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            video: true,
            audio: true,
        }
    }
}

/// Failure reported by a media backend.
///
/// Backends classify on a best-effort basis; most platforms cannot reliably
/// tell a refused prompt from a missing device.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceFailure {
    /// Access was refused.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// No device, device busy, or device lost.
    #[error("device unavailable: {0}")]
    Unavailable(String),
    /// The recorder could not be built, started or stopped.
    #[error("recorder error: {0}")]
    Recorder(String),
}

/// Device-permission API: prompts for access and yields a live stream.
pub trait MediaDevices: Send + Sync {
    /// Stream handle produced on success.
    type Stream: DeviceStream + 'static;

    /// Request a stream matching `constraints`.
    ///
    /// Resolves once the platform prompt is answered.
    fn request_stream(
        &self,
        constraints: MediaConstraints,
    ) -> impl Future<Output = Result<Self::Stream, DeviceFailure>> + Send;
}

/// Live handle to camera/microphone input.
///
/// Holding one keeps the device locked. [`release`](DeviceStream::release) must
/// stop every track; it is called exactly once by [`StreamLease`](crate::capture::StreamLease).
pub trait DeviceStream: Send {
    /// Human-readable label for logs and the preview surface.
    fn label(&self) -> String;

    /// Whether the stream carries a video track.
    fn has_video(&self) -> bool {
        true
    }

    /// Build a recorder bound to this stream.
    fn create_recorder(&self) -> Result<Box<dyn MediaRecorder>, DeviceFailure>;

    /// Enable or mute the audio tracks.
    fn set_audio_enabled(&mut self, enabled: bool);

    /// Enable or blank the video tracks.
    fn set_video_enabled(&mut self, enabled: bool);

    /// Stop all tracks and give the device back.
    fn release(&mut self);
}

/// Media-recording API wrapped around a [`DeviceStream`].
pub trait MediaRecorder: Send {
    /// Begin emitting data chunks into `sink`.
    fn start(&mut self, sink: ChunkSink) -> Result<(), DeviceFailure>;

    /// Stop recording.
    ///
    /// Every chunk produced before this call must have been pushed into the
    /// sink by the time it returns.
    fn stop(&mut self) -> Result<(), DeviceFailure>;

    /// Container/codec of the emitted chunks.
    fn mime_type(&self) -> &str;
}

/// Surface the live stream is rendered to while access is held.
pub trait PreviewSurface: Send {
    /// Bind the surface to a stream.
    fn attach(&mut self, stream_label: &str);

    /// Unbind the surface.
    fn detach(&mut self);
}

/// Upload collaborator for finalized recordings.
pub trait RecordingUploader: Send + Sync {
    /// Hand `blob` to the backend for the given interview.
    fn upload(
        &self,
        interview_id: &str,
        blob: &RecordedBlob,
    ) -> impl Future<Output = Result<(), String>> + Send;
}
