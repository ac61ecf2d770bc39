use crate::{
    CoreError, CoreResult,
    capture::{
        AccessAttempt, AccessOutcome, CapturePhase, CaptureSession, ChunkSink, DeviceFailure,
        DeviceStream, ElapsedClock, MediaConstraints, MediaDevices, MediaRecorder,
        PermissionState, PreviewSurface, RecordedBlob, RecordingUploader, StreamLease,
    },
};

use std::{mem, panic::Location};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Internal state. Each variant owns exactly what that phase needs, so a
/// recorder cannot exist outside `Recording` and a blob cannot exist outside
/// `Captured`.
enum Phase<S: DeviceStream> {
    NoAccess,
    Requesting {
        attempt: AccessAttempt,
    },
    Ready {
        lease: StreamLease<S>,
    },
    Recording {
        lease: StreamLease<S>,
        recorder: Box<dyn MediaRecorder>,
        sink: ChunkSink,
    },
    Captured {
        lease: StreamLease<S>,
        blob: RecordedBlob,
    },
}

impl<S: DeviceStream> Phase<S> {
    fn kind(&self) -> CapturePhase {
        match self {
            Phase::NoAccess => CapturePhase::NoAccess,
            Phase::Requesting { .. } => CapturePhase::Requesting,
            Phase::Ready { .. } => CapturePhase::Ready,
            Phase::Recording { .. } => CapturePhase::Recording,
            Phase::Captured { .. } => CapturePhase::Captured,
        }
    }

    fn lease(&self) -> Option<&StreamLease<S>> {
        match self {
            Phase::Ready { lease } | Phase::Recording { lease, .. } | Phase::Captured { lease, .. } => {
                Some(lease)
            }
            Phase::NoAccess | Phase::Requesting { .. } => None,
        }
    }

    fn lease_mut(&mut self) -> Option<&mut StreamLease<S>> {
        match self {
            Phase::Ready { lease } | Phase::Recording { lease, .. } | Phase::Captured { lease, .. } => {
                Some(lease)
            }
            Phase::NoAccess | Phase::Requesting { .. } => None,
        }
    }
}

/// Mediates between a live capture device and an in-memory recording.
///
/// Owns the permission lifecycle, the preview binding, the record/stop/submit
/// state machine and the elapsed-seconds clock. One controller corresponds to
/// one mounted recording view; dropping it releases the device.
///
/// # Example
///
/// ```ignore
/// let mut controller = MediaCaptureController::new(preview, MediaConstraints::default());
/// controller.request_access(&devices).await?;
/// controller.start()?;
/// // ... tick() once per second ...
/// controller.stop()?;
/// controller.submit(&uploader, "interview-42").await?;
/// ```
pub struct MediaCaptureController<S: DeviceStream> {
    phase: Phase<S>,
    permission: PermissionState,
    preview: Box<dyn PreviewSurface>,
    clock: ElapsedClock,
    constraints: MediaConstraints,
    mounted: bool,
}

impl<S: DeviceStream> MediaCaptureController<S> {
    /// Mount a controller with no device access yet.
    pub fn new(preview: Box<dyn PreviewSurface>, constraints: MediaConstraints) -> Self {
        Self {
            phase: Phase::NoAccess,
            permission: PermissionState::Pending,
            preview,
            clock: ElapsedClock::default(),
            constraints,
            mounted: true,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> CapturePhase {
        self.phase.kind()
    }

    /// Outcome of the most recent permission request.
    pub fn permission_state(&self) -> PermissionState {
        self.permission
    }

    /// Whether a recorder is running.
    pub fn is_recording(&self) -> bool {
        matches!(self.phase, Phase::Recording { .. })
    }

    /// Seconds elapsed in the current (or last) recording.
    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs()
    }

    /// The finalized recording awaiting submit.
    pub fn recorded_blob(&self) -> Option<&RecordedBlob> {
        match &self.phase {
            Phase::Captured { blob, .. } => Some(blob),
            _ => None,
        }
    }

    /// Whether the owning view is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Snapshot for rendering.
    pub fn session(&self) -> CaptureSession {
        CaptureSession {
            phase: self.phase(),
            permission_state: self.permission,
            device_stream: self.phase.lease().map(|lease| lease.label().to_string()),
            is_recording: self.is_recording(),
            elapsed_seconds: self.clock.elapsed_secs(),
            recorded_bytes: self.recorded_blob().map(RecordedBlob::len),
        }
    }

    /// Issue a new permission request ticket.
    ///
    /// Releases any held stream first; a previous recording or unsubmitted
    /// blob is discarded. After unmount the ticket is still returned but will
    /// be ignored on completion.
    #[instrument(skip(self))]
    pub fn begin_access_request(&mut self) -> AccessAttempt {
        let attempt = AccessAttempt::new();

        if !self.mounted {
            debug!(attempt_id = %attempt.id(), "Access requested after unmount");
            return attempt;
        }

        self.teardown_phase();
        self.phase = Phase::Requesting { attempt };
        self.permission = PermissionState::Pending;

        info!(attempt_id = %attempt.id(), "Requesting device access");

        attempt
    }

    /// Resolve a permission request.
    ///
    /// A stale or post-unmount resolution is ignored and its stream, if any,
    /// is released immediately.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` or `DeviceUnavailable` when the current
    /// attempt failed; the controller is then in `NoAccess`.
    #[track_caller]
    #[instrument(skip(self, result))]
    pub fn complete_access(
        &mut self,
        attempt: AccessAttempt,
        result: Result<S, DeviceFailure>,
    ) -> CoreResult<AccessOutcome> {
        let current = self.mounted
            && matches!(self.phase, Phase::Requesting { attempt: pending } if pending == attempt);

        if !current {
            if let Ok(stream) = result {
                StreamLease::new(stream).release();
            }
            debug!(attempt_id = %attempt.id(), "Ignoring stale access resolution");
            return Ok(AccessOutcome::Ignored);
        }

        match result {
            Ok(stream) => {
                let lease = StreamLease::new(stream);
                self.preview.attach(lease.label());
                info!(
                    attempt_id = %attempt.id(),
                    stream = %lease.label(),
                    "Device access granted"
                );
                self.phase = Phase::Ready { lease };
                self.permission = PermissionState::Granted;
                Ok(AccessOutcome::Granted)
            }
            Err(failure) => {
                warn!(attempt_id = %attempt.id(), error = %failure, "Device access failed");
                self.phase = Phase::NoAccess;
                self.permission = PermissionState::Denied;
                Err(access_error(failure))
            }
        }
    }

    /// Request device access and wait for the prompt to resolve.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` or `DeviceUnavailable` on failure.
    #[instrument(skip(self, devices))]
    pub async fn request_access<D>(&mut self, devices: &D) -> CoreResult<AccessOutcome>
    where
        D: MediaDevices<Stream = S>,
    {
        let attempt = self.begin_access_request();
        let result = devices.request_stream(self.constraints).await;
        self.complete_access(attempt, result)
    }

    /// Drop the current stream and ask for access again.
    ///
    /// # Errors
    ///
    /// Same as [`request_access`](Self::request_access).
    pub async fn retry<D>(&mut self, devices: &D) -> CoreResult<AccessOutcome>
    where
        D: MediaDevices<Stream = S>,
    {
        info!("Retrying device access");
        self.request_access(devices).await
    }

    /// Start recording the held stream.
    ///
    /// Valid from `Ready`, and from `Captured` (the unsubmitted recording is
    /// discarded). Resets the clock to zero.
    ///
    /// # Errors
    ///
    /// - `AlreadyRecording` if a recorder is running (nothing changes).
    /// - `NoDeviceAccess` without a stream.
    /// - `RecorderStartFailure` if the recorder cannot start (phase unchanged).
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start(&mut self) -> CoreResult<()> {
        let (lease, previous) = match mem::replace(&mut self.phase, Phase::NoAccess) {
            Phase::Ready { lease } => (lease, None),
            Phase::Captured { lease, blob } => (lease, Some(blob)),
            other => {
                let phase = other.kind();
                self.phase = other;
                return Err(if phase == CapturePhase::Recording {
                    CoreError::AlreadyRecording {
                        location: ErrorLocation::from(Location::caller()),
                    }
                } else {
                    CoreError::NoDeviceAccess {
                        phase,
                        location: ErrorLocation::from(Location::caller()),
                    }
                });
            }
        };

        match open_recorder(&lease) {
            Ok((recorder, sink)) => {
                if let Some(blob) = previous {
                    debug!(bytes = blob.len(), "Discarding unsubmitted recording");
                }
                self.clock.restart();
                info!(
                    stream = %lease.label(),
                    mime_type = recorder.mime_type(),
                    "Recording started"
                );
                self.phase = Phase::Recording {
                    lease,
                    recorder,
                    sink,
                };
                Ok(())
            }
            Err(failure) => {
                warn!(error = %failure, "Recorder failed to start");
                self.phase = match previous {
                    Some(blob) => Phase::Captured { lease, blob },
                    None => Phase::Ready { lease },
                };
                Err(CoreError::RecorderStartFailure {
                    reason: failure.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    /// Stop recording and finalize the buffer into one blob.
    ///
    /// If the recorder reports an error while stopping, whatever was buffered
    /// is kept.
    ///
    /// # Errors
    ///
    /// - `NotRecording` outside `Recording`.
    /// - `RecorderStopFailure` if stopping failed and nothing was captured;
    ///   the controller returns to `Ready`.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CoreResult<RecordedBlob> {
        let (lease, mut recorder, sink) = match mem::replace(&mut self.phase, Phase::NoAccess) {
            Phase::Recording {
                lease,
                recorder,
                sink,
            } => (lease, recorder, sink),
            other => {
                let phase = other.kind();
                self.phase = other;
                return Err(CoreError::NotRecording {
                    phase,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let stopped = recorder.stop();
        self.clock.halt();
        let blob = sink.finish(recorder.mime_type());

        if let Err(failure) = stopped {
            warn!(error = %failure, bytes = blob.len(), "Recorder failed to stop cleanly");
            if blob.is_empty() {
                self.phase = Phase::Ready { lease };
                return Err(CoreError::RecorderStopFailure {
                    reason: failure.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        info!(
            elapsed_secs = self.clock.elapsed_secs(),
            bytes = blob.len(),
            chunk_count = blob.chunk_count(),
            "Recording stopped"
        );

        self.phase = Phase::Captured {
            lease,
            blob: blob.clone(),
        };

        Ok(blob)
    }

    /// Upload the finalized recording and clear it.
    ///
    /// On success the controller returns to `Ready` with the stream still held.
    ///
    /// # Errors
    ///
    /// - `NoBufferToSubmit` outside `Captured` (state unchanged).
    /// - `UploadFailed` if the uploader rejects it (recording kept).
    #[instrument(skip(self, uploader))]
    pub async fn submit<U>(&mut self, uploader: &U, interview_id: &str) -> CoreResult<RecordedBlob>
    where
        U: RecordingUploader,
    {
        let blob = match &self.phase {
            Phase::Captured { blob, .. } => blob.clone(),
            other => {
                warn!(phase = %other.kind(), "Submit requested without a recording");
                return Err(CoreError::NoBufferToSubmit {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        uploader
            .upload(interview_id, &blob)
            .await
            .map_err(|reason| CoreError::UploadFailed {
                reason,
                location: ErrorLocation::from(Location::caller()),
            })?;

        if let Phase::Captured { lease, .. } = mem::replace(&mut self.phase, Phase::NoAccess) {
            self.phase = Phase::Ready { lease };
        }

        info!(interview_id, bytes = blob.len(), "Recording submitted");

        Ok(blob)
    }

    /// One-second clock callback. Advances only while recording.
    ///
    /// Returns the new elapsed value, or `None` when not recording.
    pub fn tick(&mut self) -> Option<u64> {
        if self.is_recording() {
            Some(self.clock.tick())
        } else {
            None
        }
    }

    /// Enable or mute the audio tracks of the held stream.
    ///
    /// # Errors
    ///
    /// `NoDeviceAccess` without a stream.
    #[track_caller]
    pub fn set_audio_enabled(&mut self, enabled: bool) -> CoreResult<()> {
        let phase = self.phase();
        let stream = self
            .phase
            .lease_mut()
            .and_then(StreamLease::stream_mut)
            .ok_or_else(|| CoreError::NoDeviceAccess {
                phase,
                location: ErrorLocation::from(Location::caller()),
            })?;
        stream.set_audio_enabled(enabled);
        debug!(enabled, "Audio tracks toggled");
        Ok(())
    }

    /// Enable or blank the video tracks of the held stream.
    ///
    /// # Errors
    ///
    /// `NoDeviceAccess` without a stream.
    #[track_caller]
    pub fn set_video_enabled(&mut self, enabled: bool) -> CoreResult<()> {
        let phase = self.phase();
        let stream = self
            .phase
            .lease_mut()
            .and_then(StreamLease::stream_mut)
            .ok_or_else(|| CoreError::NoDeviceAccess {
                phase,
                location: ErrorLocation::from(Location::caller()),
            })?;
        stream.set_video_enabled(enabled);
        debug!(enabled, "Video tracks toggled");
        Ok(())
    }

    /// Whether a held stream carries video. `false` without a stream.
    pub fn has_video(&self) -> bool {
        self.phase
            .lease()
            .and_then(StreamLease::stream)
            .is_some_and(DeviceStream::has_video)
    }

    /// Tear down for view unmount: stop the recorder and clock, release the
    /// stream, detach the preview. Later resolutions are ignored. Idempotent.
    #[instrument(skip(self))]
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.teardown_phase();
        info!("Capture controller unmounted");
    }

    fn teardown_phase(&mut self) {
        self.clock.halt();

        match mem::replace(&mut self.phase, Phase::NoAccess) {
            Phase::Recording {
                lease,
                mut recorder,
                sink,
            } => {
                if let Err(e) = recorder.stop() {
                    warn!(error = %e, "Recorder failed to stop during teardown");
                }
                sink.close();
                self.preview.detach();
                lease.release();
            }
            Phase::Ready { lease } | Phase::Captured { lease, .. } => {
                self.preview.detach();
                lease.release();
            }
            Phase::NoAccess | Phase::Requesting { .. } => {}
        }
    }
}

impl<S: DeviceStream> Drop for MediaCaptureController<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn open_recorder<S: DeviceStream>(
    lease: &StreamLease<S>,
) -> Result<(Box<dyn MediaRecorder>, ChunkSink), DeviceFailure> {
    let stream = lease
        .stream()
        .ok_or_else(|| DeviceFailure::Unavailable("stream already released".to_string()))?;

    let mut recorder = stream.create_recorder()?;
    let sink = ChunkSink::new();
    recorder.start(sink.clone())?;

    Ok((recorder, sink))
}

#[track_caller]
fn access_error(failure: DeviceFailure) -> CoreError {
    let location = ErrorLocation::from(Location::caller());
    match failure {
        DeviceFailure::PermissionDenied(reason) => CoreError::PermissionDenied { reason, location },
        DeviceFailure::Unavailable(reason) | DeviceFailure::Recorder(reason) => {
            CoreError::DeviceUnavailable { reason, location }
        }
    }
}
