use std::fmt;

use uuid::Uuid;

/// Externally visible phase of the capture state machine.
///
/// ```text
/// NoAccess ──request──▶ Requesting ──granted──▶ Ready ──start──▶ Recording
///     ▲                     │                    ▲ ▲                 │
///     └───────denied────────┘           submit   │ └─────start──┐    stop
///                                                │              │    ▼
///                                                └────────── Captured
/// any ──retry──▶ Requesting
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    /// No device stream held.
    NoAccess,
    /// Waiting for the permission prompt to resolve.
    Requesting,
    /// Stream held and previewing; not recording.
    Ready,
    /// Recorder running.
    Recording,
    /// Recording finalized and awaiting submit.
    Captured,
}

impl fmt::Display for CapturePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapturePhase::NoAccess => "no-access",
            CapturePhase::Requesting => "requesting",
            CapturePhase::Ready => "ready",
            CapturePhase::Recording => "recording",
            CapturePhase::Captured => "captured",
        };
        f.write_str(name)
    }
}

/// Outcome of the most recent permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// Prompt not yet answered (or never shown).
    Pending,
    /// A stream is held.
    Granted,
    /// The last request failed.
    Denied,
}

/// Ticket for one permission request.
///
/// Only the most recently issued attempt may complete; older ones are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessAttempt {
    id: Uuid,
}

impl AccessAttempt {
    pub(crate) fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    /// Unique id for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// What happened to a completed permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// Stream bound; controller is Ready.
    Granted,
    /// The attempt was stale or the view was gone; any stream was released.
    Ignored,
}

/// Point-in-time view of a capture session, for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSession {
    /// Current phase.
    pub phase: CapturePhase,
    /// Permission outcome.
    pub permission_state: PermissionState,
    /// Label of the held device stream.
    pub device_stream: Option<String>,
    /// Whether a recorder is running.
    pub is_recording: bool,
    /// Seconds elapsed in the current (or last) recording.
    pub elapsed_seconds: u64,
    /// Size of the finalized recording, if any.
    pub recorded_bytes: Option<usize>,
}
