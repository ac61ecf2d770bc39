use crate::capture::CapturePhase;

use error_location::ErrorLocation;
use thiserror::Error;

/// Capture and record-keeping errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The user (or platform policy) refused camera/microphone access.
    #[error("Permission denied: {reason} {location}")]
    PermissionDenied {
        /// Reason reported by the platform.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No usable capture device, or the device was lost.
    #[error("Device unavailable: {reason} {location}")]
    DeviceUnavailable {
        /// Reason reported by the platform.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recorder could not be created or started on the held stream.
    #[error("Recorder failed to start: {reason} {location}")]
    RecorderStartFailure {
        /// Description of the recorder failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recorder reported an error while finalizing.
    #[error("Recorder failed to stop: {reason} {location}")]
    RecorderStopFailure {
        /// Description of the recorder failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Submit was requested without a finalized recording.
    #[error("No recording to submit {location}")]
    NoBufferToSubmit {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An operation needing a device stream was called without one.
    #[error("No device access (phase: {phase}) {location}")]
    NoDeviceAccess {
        /// Phase the controller was in.
        phase: CapturePhase,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Start was requested while a recording is active.
    #[error("Already recording {location}")]
    AlreadyRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Stop was requested while nothing is recording.
    #[error("Not recording (phase: {phase}) {location}")]
    NotRecording {
        /// Phase the controller was in.
        phase: CapturePhase,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The upload collaborator rejected the recording.
    #[error("Upload failed: {reason} {location}")]
    UploadFailed {
        /// Description of the upload failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A required link-request field was left empty.
    #[error("Missing information: {field} {location}")]
    MissingInformation {
        /// Name of the missing field.
        field: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A selected question id is not in the question bank.
    #[error("Unknown question id: {id} {location}")]
    UnknownQuestion {
        /// The unknown question id.
        id: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An email delivery was requested without an address.
    #[error("Missing candidate email {location}")]
    MissingEmail {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No candidate with the given id.
    #[error("Candidate not found: {id} {location}")]
    CandidateNotFound {
        /// The requested candidate id.
        id: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The interview link has no id segment.
    #[error("Invalid interview link: {link} {location}")]
    InvalidInterviewLink {
        /// The rejected link.
        link: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Whether the error comes from device acquisition and can be retried.
    pub fn is_access_failure(&self) -> bool {
        matches!(
            self,
            CoreError::PermissionDenied { .. } | CoreError::DeviceUnavailable { .. }
        )
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
