mod buffer;
mod clock;
mod controller;
mod device;
mod lease;
mod state;

pub use {
    buffer::{ChunkSink, RecordedBlob},
    clock::{ElapsedClock, format_elapsed},
    controller::MediaCaptureController,
    device::{
        DeviceFailure, DeviceStream, MediaConstraints, MediaDevices, MediaRecorder,
        PreviewSurface, RecordingUploader,
    },
    lease::StreamLease,
    state::{AccessAttempt, AccessOutcome, CapturePhase, CaptureSession, PermissionState},
};
