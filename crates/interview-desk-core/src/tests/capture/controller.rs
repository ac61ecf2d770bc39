use crate::{
    AccessOutcome, CapturePhase, CoreError, DeviceFailure, MediaCaptureController,
    MediaConstraints, PermissionState,
    tests::fakes::{DeviceBehaviour, FakeDevices, FakePreview, FakeStream, FakeUploader},
};

use std::sync::atomic::Ordering;

fn controller(devices: &FakeDevices) -> MediaCaptureController<FakeStream> {
    MediaCaptureController::new(
        Box::new(FakePreview {
            counters: devices.counters.clone(),
        }),
        MediaConstraints::default(),
    )
}

/// WHAT: Granted access binds the stream to the preview
/// WHY: The candidate must see themselves before recording
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_granting_devices_when_requesting_access_then_ready_with_preview() {
    // Given: A fresh controller and devices that grant access
    let devices = FakeDevices::granting();
    let mut controller = controller(&devices);
    assert_eq!(controller.permission_state(), PermissionState::Pending);

    // When: Requesting access
    let outcome = controller.request_access(&devices).await.unwrap();

    // Then: Controller is Ready, permission granted, preview attached once
    assert_eq!(outcome, AccessOutcome::Granted);
    assert_eq!(controller.phase(), CapturePhase::Ready);
    assert_eq!(controller.permission_state(), PermissionState::Granted);
    assert_eq!(devices.counters.preview_attached(), 1);
    assert_eq!(
        controller.session().device_stream.as_deref(),
        Some("fake-camera-1")
    );
}

/// WHAT: Denied access leaves the controller without a stream
/// WHY: Start must be rejected until access is actually granted
#[tokio::test]
async fn given_denying_devices_when_requesting_access_then_no_access_and_start_rejected() {
    // Given: Devices that deny the prompt
    let devices = FakeDevices::denying();
    let mut controller = controller(&devices);

    // When: Requesting access, then trying to start
    let access = controller.request_access(&devices).await;
    let start = controller.start();

    // Then: Access fails as PermissionDenied and start reports NoDeviceAccess
    assert!(matches!(access, Err(CoreError::PermissionDenied { .. })));
    assert_eq!(controller.phase(), CapturePhase::NoAccess);
    assert_eq!(controller.permission_state(), PermissionState::Denied);
    assert!(matches!(
        start,
        Err(CoreError::NoDeviceAccess {
            phase: CapturePhase::NoAccess,
            ..
        })
    ));
    assert_eq!(devices.counters.recorders_started(), 0);
}

/// WHAT: Unavailable hardware is reported as DeviceUnavailable
/// WHY: Both failure kinds must stay distinguishable for logging
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_missing_device_when_requesting_access_then_device_unavailable() {
    // Given: Devices reporting no hardware
    let devices = FakeDevices::with(DeviceBehaviour {
        access: Err(DeviceFailure::Unavailable("NotFoundError".to_string())),
        ..DeviceBehaviour::default()
    });
    let mut controller = controller(&devices);

    // When: Requesting access
    let result = controller.request_access(&devices).await;

    // Then: DeviceUnavailable, classified as an access failure
    let error = result.unwrap_err();
    assert!(matches!(error, CoreError::DeviceUnavailable { .. }));
    assert!(error.is_access_failure());
}

/// WHAT: Retry after denial reaches Ready once the user allows access
/// WHY: Retry is the only recovery path from a denied prompt
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_denied_access_when_retrying_after_grant_then_ready_and_start_allowed() {
    // Given: A controller whose first request was denied
    let devices = FakeDevices::denying();
    let mut controller = controller(&devices);
    let _ = controller.request_access(&devices).await;

    // When: The user allows access and retries
    devices.set_behaviour(DeviceBehaviour::default());
    controller.retry(&devices).await.unwrap();

    // Then: Controller is Ready and recording can start
    assert_eq!(controller.phase(), CapturePhase::Ready);
    assert!(controller.start().is_ok());
    assert_eq!(controller.phase(), CapturePhase::Recording);
}

/// WHAT: Starting twice is rejected without a second recorder
/// WHY: At most one active recording and one ticking clock per session
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_recording_when_starting_again_then_already_recording_and_single_recorder() {
    // Given: A recording in progress with two seconds elapsed
    let devices = FakeDevices::granting();
    let mut controller = controller(&devices);
    controller.request_access(&devices).await.unwrap();
    controller.start().unwrap();
    controller.tick();
    controller.tick();

    // When: Starting again
    let result = controller.start();

    // Then: Rejected, still recording, one recorder, clock untouched
    assert!(matches!(result, Err(CoreError::AlreadyRecording { .. })));
    assert_eq!(controller.phase(), CapturePhase::Recording);
    assert_eq!(devices.counters.recorders_started(), 1);
    assert_eq!(controller.elapsed_secs(), 2);
}

/// WHAT: Stop assembles every chunk in emission order
/// WHY: Chunks emitted before stop, including the final flush, belong to the recording
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_recording_when_stopped_then_blob_contains_all_chunks_in_order() {
    // Given: Devices whose recorder emits three chunks
    let devices = FakeDevices::with(DeviceBehaviour {
        chunks: vec![b"aa".to_vec(), b"bb".to_vec(), b"cc".to_vec()],
        ..DeviceBehaviour::default()
    });
    let mut controller = controller(&devices);
    controller.request_access(&devices).await.unwrap();
    controller.start().unwrap();

    // When: Stopping
    let blob = controller.stop().unwrap();

    // Then: One blob with all chunks concatenated, phase Captured
    assert_eq!(blob.bytes(), b"aabbcc");
    assert_eq!(blob.chunk_count(), 3);
    assert_eq!(blob.mime_type(), "video/webm");
    assert_eq!(controller.phase(), CapturePhase::Captured);
    assert_eq!(controller.session().recorded_bytes, Some(6));
    assert_eq!(devices.counters.recorders_stopped(), 1);
}

/// WHAT: Stop outside Recording is rejected
/// WHY: A buffer exists only after a completed stop
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_ready_when_stopping_then_not_recording() {
    // Given: A Ready controller
    let devices = FakeDevices::granting();
    let mut controller = controller(&devices);
    controller.request_access(&devices).await.unwrap();

    // When: Stopping
    let result = controller.stop();

    // Then: NotRecording and no blob
    assert!(matches!(
        result,
        Err(CoreError::NotRecording {
            phase: CapturePhase::Ready,
            ..
        })
    ));
    assert!(controller.recorded_blob().is_none());
}

/// WHAT: Submit without a captured buffer changes nothing
/// WHY: Reporting NoBufferToSubmit must never disturb the session
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_no_captured_buffer_when_submitting_then_no_buffer_and_state_unchanged() {
    // Given: Controllers in NoAccess, Ready and Recording
    let devices = FakeDevices::granting();
    let uploader = FakeUploader::default();

    let mut no_access = controller(&devices);

    let mut ready = controller(&devices);
    ready.request_access(&devices).await.unwrap();

    let mut recording = controller(&devices);
    recording.request_access(&devices).await.unwrap();
    recording.start().unwrap();
    recording.tick();

    for controller in [&mut no_access, &mut ready, &mut recording] {
        let before = controller.session();

        // When: Submitting
        let result = controller.submit(&uploader, "interview-1").await;

        // Then: NoBufferToSubmit, identical snapshot, nothing uploaded
        assert!(matches!(result, Err(CoreError::NoBufferToSubmit { .. })));
        assert_eq!(controller.session(), before);
    }
    assert_eq!(uploader.upload_count(), 0);
}

/// WHAT: Successful submit clears the buffer and keeps the stream
/// WHY: The candidate can record again without another prompt
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_captured_when_submitting_then_uploaded_and_ready() {
    // Given: A captured recording
    let devices = FakeDevices::granting();
    let uploader = FakeUploader::default();
    let mut controller = controller(&devices);
    controller.request_access(&devices).await.unwrap();
    controller.start().unwrap();
    let blob = controller.stop().unwrap();

    // When: Submitting
    let submitted = controller.submit(&uploader, "interview-7").await.unwrap();

    // Then: Uploaded once, back to Ready, a second submit has nothing to send
    assert_eq!(submitted, blob);
    assert_eq!(
        *uploader.uploads.lock().unwrap(),
        vec![("interview-7".to_string(), blob.len())]
    );
    assert_eq!(controller.phase(), CapturePhase::Ready);
    assert!(controller.recorded_blob().is_none());
    assert_eq!(devices.counters.released(), 0);
    assert!(matches!(
        controller.submit(&uploader, "interview-7").await,
        Err(CoreError::NoBufferToSubmit { .. })
    ));
}

/// WHAT: A failed upload keeps the recording
/// WHY: The user must be able to submit again without re-recording
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_failing_uploader_when_submitting_then_upload_failed_and_blob_kept() {
    // Given: A captured recording and an uploader that fails
    let devices = FakeDevices::granting();
    let uploader = FakeUploader::failing();
    let mut controller = controller(&devices);
    controller.request_access(&devices).await.unwrap();
    controller.start().unwrap();
    controller.stop().unwrap();

    // When: Submitting
    let result = controller.submit(&uploader, "interview-1").await;

    // Then: UploadFailed and still Captured
    assert!(matches!(result, Err(CoreError::UploadFailed { .. })));
    assert_eq!(controller.phase(), CapturePhase::Captured);
    assert!(controller.recorded_blob().is_some());
}

/// WHAT: Submit succeeds only between a stop and the next start
/// WHY: A new start discards the unsubmitted recording
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_start_stop_sequences_when_submitting_then_only_after_stop_succeeds() {
    // Given: A Ready controller
    let devices = FakeDevices::granting();
    let uploader = FakeUploader::default();
    let mut controller = controller(&devices);
    controller.request_access(&devices).await.unwrap();

    for _ in 0..3 {
        // When: start → submit (rejected) → stop → start → submit (rejected) → stop → submit
        controller.start().unwrap();
        assert!(controller.submit(&uploader, "i").await.is_err());

        controller.stop().unwrap();
        controller.start().unwrap();
        assert_eq!(controller.phase(), CapturePhase::Recording);
        assert!(controller.recorded_blob().is_none());
        assert!(controller.submit(&uploader, "i").await.is_err());

        controller.stop().unwrap();

        // Then: Only the submit directly after a stop succeeds
        assert!(controller.submit(&uploader, "i").await.is_ok());
    }
    assert_eq!(uploader.upload_count(), 3);
}

/// WHAT: Elapsed counter ticks only while recording and resets on start
/// WHY: The on-screen timer must reflect the current take only
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_ticks_when_recording_and_idle_then_counter_advances_only_while_recording() {
    // Given: A Ready controller
    let devices = FakeDevices::granting();
    let mut controller = controller(&devices);
    controller.request_access(&devices).await.unwrap();

    // When/Then: Ticks before start are ignored
    assert_eq!(controller.tick(), None);
    assert_eq!(controller.elapsed_secs(), 0);

    // When/Then: Three ticks while recording count exactly three
    controller.start().unwrap();
    assert_eq!(controller.tick(), Some(1));
    assert_eq!(controller.tick(), Some(2));
    assert_eq!(controller.tick(), Some(3));

    // When/Then: After stop the counter is frozen
    controller.stop().unwrap();
    assert_eq!(controller.tick(), None);
    assert_eq!(controller.elapsed_secs(), 3);

    // When/Then: A new start resets to zero
    controller.start().unwrap();
    assert_eq!(controller.elapsed_secs(), 0);
    assert_eq!(controller.tick(), Some(1));
}

/// WHAT: Recorder start failure leaves the phase unchanged
/// WHY: A broken recorder must not strand the stream or the previous recording
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_failing_recorder_when_starting_then_recorder_start_failure_and_ready() {
    // Given: A stream whose recorder cannot be created
    let devices = FakeDevices::with(DeviceBehaviour {
        recorder_fails: true,
        ..DeviceBehaviour::default()
    });
    let mut controller = controller(&devices);
    controller.request_access(&devices).await.unwrap();

    // When: Starting
    let result = controller.start();

    // Then: RecorderStartFailure, still Ready with the stream held
    assert!(matches!(result, Err(CoreError::RecorderStartFailure { .. })));
    assert_eq!(controller.phase(), CapturePhase::Ready);
    assert_eq!(devices.counters.released(), 0);
    assert_eq!(controller.tick(), None);
}

/// WHAT: A recorder that fails to stop with nothing buffered returns to Ready
/// WHY: An empty recording is not submittable
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_recorder_losing_device_when_stopping_empty_then_stop_failure() {
    // Given: A recorder that emits nothing and fails on stop
    let devices = FakeDevices::with(DeviceBehaviour {
        stop_fails: true,
        chunks: Vec::new(),
        ..DeviceBehaviour::default()
    });
    let mut controller = controller(&devices);
    controller.request_access(&devices).await.unwrap();
    controller.start().unwrap();

    // When: Stopping
    let result = controller.stop();

    // Then: RecorderStopFailure and back to Ready
    assert!(matches!(result, Err(CoreError::RecorderStopFailure { .. })));
    assert_eq!(controller.phase(), CapturePhase::Ready);
}

/// WHAT: Partial data survives a recorder that fails to stop
/// WHY: Device loss mid-recording should not throw away what was captured
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_recorder_losing_device_when_stopping_with_data_then_captured() {
    // Given: A recorder that emitted its first chunk and fails on stop
    let devices = FakeDevices::with(DeviceBehaviour {
        stop_fails: true,
        ..DeviceBehaviour::default()
    });
    let mut controller = controller(&devices);
    controller.request_access(&devices).await.unwrap();
    controller.start().unwrap();

    // When: Stopping
    let blob = controller.stop().unwrap();

    // Then: The partial recording is kept
    assert_eq!(blob.bytes(), b"chunk-1");
    assert_eq!(controller.phase(), CapturePhase::Captured);
}

/// WHAT: Each acquisition is released exactly once across retries and unmount
/// WHY: A leaked stream keeps the camera light on and the device locked
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_retry_cycles_when_unmounting_then_every_stream_released_once() {
    // Given: A controller that records, then retries access twice
    let devices = FakeDevices::granting();
    let mut controller = controller(&devices);
    controller.request_access(&devices).await.unwrap();
    controller.start().unwrap();
    controller.retry(&devices).await.unwrap();
    controller.retry(&devices).await.unwrap();

    // When: Unmounting twice
    controller.unmount();
    controller.unmount();

    // Then: Three acquisitions, three releases, recorder stopped, previews balanced
    assert_eq!(devices.counters.acquired(), 3);
    assert_eq!(devices.counters.released(), 3);
    assert_eq!(devices.counters.recorders_stopped(), 1);
    assert_eq!(
        devices.counters.preview_attached(),
        devices.counters.preview_detached()
    );
    assert_eq!(controller.phase(), CapturePhase::NoAccess);

    // And: Dropping afterwards does not release again
    drop(controller);
    assert_eq!(devices.counters.released(), 3);
}

/// WHAT: Dropping a mounted controller releases its stream
/// WHY: View unmount must free the device even without explicit teardown
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_recording_controller_when_dropped_then_stream_released() {
    // Given: A controller mid-recording
    let devices = FakeDevices::granting();
    let mut controller = controller(&devices);
    controller.request_access(&devices).await.unwrap();
    controller.start().unwrap();

    // When: Dropping it
    drop(controller);

    // Then: Recorder stopped and stream released
    assert_eq!(devices.counters.recorders_stopped(), 1);
    assert_eq!(devices.counters.released(), 1);
}

/// WHAT: A superseded permission resolution is ignored and released
/// WHY: Only the latest retry may bind a stream; late ones must not leak
#[test]
#[allow(clippy::unwrap_used)]
fn given_two_attempts_when_older_resolves_then_ignored_and_released() {
    // Given: Two attempts issued back to back
    let devices = FakeDevices::granting();
    let mut controller = controller(&devices);
    let first = controller.begin_access_request();
    let second = controller.begin_access_request();

    // When: The older attempt resolves with a stream
    let stale = controller
        .complete_access(first, Ok(devices.make_stream()))
        .unwrap();

    // Then: It is ignored and its stream released; the newer one still binds
    assert_eq!(stale, AccessOutcome::Ignored);
    assert_eq!(controller.phase(), CapturePhase::Requesting);
    assert_eq!(devices.counters.released(), 1);

    let current = controller
        .complete_access(second, Ok(devices.make_stream()))
        .unwrap();
    assert_eq!(current, AccessOutcome::Granted);
    assert_eq!(controller.phase(), CapturePhase::Ready);
    assert_eq!(devices.counters.released(), 1);
}

/// WHAT: A resolution arriving after unmount is released immediately
/// WHY: The permission prompt cannot be cancelled, only ignored
#[test]
#[allow(clippy::unwrap_used)]
fn given_unmounted_controller_when_access_resolves_then_stream_released() {
    // Given: An attempt in flight when the view unmounts
    let devices = FakeDevices::granting();
    let mut controller = controller(&devices);
    let attempt = controller.begin_access_request();
    controller.unmount();

    // When: The prompt resolves
    let outcome = controller
        .complete_access(attempt, Ok(devices.make_stream()))
        .unwrap();

    // Then: Ignored, released, no preview binding
    assert_eq!(outcome, AccessOutcome::Ignored);
    assert_eq!(devices.counters.acquired(), 1);
    assert_eq!(devices.counters.released(), 1);
    assert_eq!(devices.counters.preview_attached(), 0);
    assert!(!controller.is_mounted());
}

/// WHAT: Track toggles reach the held stream
/// WHY: Mic/camera buttons mute tracks without dropping the stream
#[test]
#[allow(clippy::unwrap_used)]
fn given_held_stream_when_toggling_tracks_then_stream_updated() {
    // Given: A controller holding a stream we can observe
    let devices = FakeDevices::granting();
    let mut controller = controller(&devices);
    let attempt = controller.begin_access_request();
    let stream = devices.make_stream();
    let audio = stream.audio_enabled.clone();
    let video = stream.video_enabled.clone();
    controller.complete_access(attempt, Ok(stream)).unwrap();

    // When: Muting audio and blanking video
    controller.set_audio_enabled(false).unwrap();
    controller.set_video_enabled(false).unwrap();

    // Then: The stream tracks are disabled
    assert!(!audio.load(Ordering::SeqCst));
    assert!(!video.load(Ordering::SeqCst));
}

/// WHAT: Track toggles without a stream are rejected
/// WHY: There is nothing to mute before access is granted
#[test]
fn given_no_stream_when_toggling_audio_then_no_device_access() {
    // Given: A controller without access
    let devices = FakeDevices::granting();
    let mut controller = controller(&devices);

    // When: Toggling audio
    let result = controller.set_audio_enabled(false);

    // Then: NoDeviceAccess
    assert!(matches!(result, Err(CoreError::NoDeviceAccess { .. })));
}

/// WHAT: The controller reports whether the held stream carries video
/// WHY: An audio-only backend has no camera to toggle
#[test]
#[allow(clippy::unwrap_used)]
fn given_audio_only_stream_when_checking_video_then_false() {
    // Given: No stream yet, then an audio-only stream
    let devices = FakeDevices::with(DeviceBehaviour {
        audio_only: true,
        ..DeviceBehaviour::default()
    });
    let mut controller = controller(&devices);
    assert!(!controller.has_video());
    let attempt = controller.begin_access_request();

    // When: The audio-only stream is granted
    controller
        .complete_access(attempt, Ok(devices.make_stream()))
        .unwrap();

    // Then: No video, while a full stream reports video
    assert!(!controller.has_video());
    devices.set_behaviour(DeviceBehaviour::default());
    let attempt = controller.begin_access_request();
    controller
        .complete_access(attempt, Ok(devices.make_stream()))
        .unwrap();
    assert!(controller.has_video());
}
