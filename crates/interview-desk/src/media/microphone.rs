//! CPAL-backed capture using the default system microphone.
//!
//! The input stream is opened and played when access is granted, so the
//! device stays claimed for as long as the stream is held. Recorders tap
//! into that stream by installing a [`ChunkSink`] for the callback to feed.

use interview_desk_core::{
    ChunkSink, DeviceFailure, DeviceStream, MediaConstraints, MediaDevices, MediaRecorder,
};

use std::{
    fmt::Display,
    future::Future,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use cpal::{
    Stream,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use tracing::{debug, error, info, instrument};

type Tap = Arc<Mutex<Option<ChunkSink>>>;

/// Opens the default input device.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrophoneDevices;

impl MicrophoneDevices {
    /// Backend for the host's default microphone.
    pub fn new() -> Self {
        Self
    }
}

impl MediaDevices for MicrophoneDevices {
    type Stream = MicrophoneStream;

    fn request_stream(
        &self,
        constraints: MediaConstraints,
    ) -> impl Future<Output = Result<MicrophoneStream, DeviceFailure>> + Send {
        let result = if constraints.audio {
            MicrophoneStream::open()
        } else {
            Err(DeviceFailure::Unavailable(
                "microphone backend can only capture audio".to_string(),
            ))
        };
        async move { result }
    }
}

/// Live microphone input stream.
pub struct MicrophoneStream {
    label: String,
    stream: Option<Stream>,
    tap: Tap,
    muted: Arc<AtomicBool>,
    mime_type: String,
}

impl MicrophoneStream {
    #[instrument]
    fn open() -> Result<Self, DeviceFailure> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| DeviceFailure::Unavailable("no microphone found".to_string()))?;

        let config = device
            .default_input_config()
            .map_err(|e| DeviceFailure::Unavailable(format!("Failed to get config: {}", e)))?;

        let sample_rate = config.sample_rate();
        let channels = config.channels();
        let config: cpal::StreamConfig = config.into();

        let tap: Tap = Arc::new(Mutex::new(None));
        let muted = Arc::new(AtomicBool::new(false));

        let callback_tap = Arc::clone(&tap);
        let callback_muted = Arc::clone(&muted);

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Lock poison is recovered: the sink is still valid.
                    let tap = callback_tap.lock().unwrap_or_else(|e| {
                        error!("Microphone tap lock poisoned, recovering: {}", e);
                        e.into_inner()
                    });
                    let Some(sink) = tap.as_ref() else {
                        return;
                    };
                    let silent = callback_muted.load(Ordering::Acquire);
                    let mut bytes = Vec::with_capacity(data.len() * 4);
                    for sample in data {
                        let sample = if silent { 0.0f32 } else { *sample };
                        bytes.extend_from_slice(&sample.to_le_bytes());
                    }
                    sink.push(bytes);
                },
                |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| DeviceFailure::Unavailable(format!("Failed to build stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| DeviceFailure::Unavailable(format!("Failed to start stream: {}", e)))?;

        let label = stream_label(device.id());

        info!(
            stream = %label,
            sample_rate = sample_rate,
            channels = channels,
            "Microphone stream opened"
        );

        Ok(Self {
            label,
            stream: Some(stream),
            tap,
            muted,
            mime_type: format!(
                "audio/pcm;format=f32le;rate={};channels={}",
                sample_rate, channels
            ),
        })
    }
}

/// Label a stream by device id, or `microphone default` when the host
/// cannot name the device.
pub(crate) fn stream_label<I: Display, E: Display>(id: Result<I, E>) -> String {
    match id {
        Ok(id) => format!("microphone {}", id),
        Err(e) => {
            debug!(error = %e, "Microphone id unavailable");
            "microphone default".to_string()
        }
    }
}

impl DeviceStream for MicrophoneStream {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn has_video(&self) -> bool {
        false
    }

    fn create_recorder(&self) -> Result<Box<dyn MediaRecorder>, DeviceFailure> {
        if self.stream.is_none() {
            return Err(DeviceFailure::Recorder("stream already released".to_string()));
        }
        Ok(Box::new(MicrophoneRecorder {
            tap: Arc::clone(&self.tap),
            mime_type: self.mime_type.clone(),
        }))
    }

    fn set_audio_enabled(&mut self, enabled: bool) {
        self.muted.store(!enabled, Ordering::Release);
        debug!(enabled, "Microphone track toggled");
    }

    fn set_video_enabled(&mut self, enabled: bool) {
        debug!(enabled, "No video track on microphone stream");
    }

    fn release(&mut self) {
        // Detach any recorder first so the callback stops writing.
        self.tap.lock().unwrap_or_else(|e| e.into_inner()).take();
        if self.stream.take().is_some() {
            info!(stream = %self.label, "Microphone stream released");
        }
    }
}

/// Feeds the shared input stream into a sink while installed.
struct MicrophoneRecorder {
    tap: Tap,
    mime_type: String,
}

impl MediaRecorder for MicrophoneRecorder {
    fn start(&mut self, sink: ChunkSink) -> Result<(), DeviceFailure> {
        let mut tap = self
            .tap
            .lock()
            .map_err(|e| DeviceFailure::Recorder(format!("Failed to lock tap: {}", e)))?;
        *tap = Some(sink);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DeviceFailure> {
        // Taking the sink under the lock guarantees no callback writes after
        // this returns.
        let mut tap = self
            .tap
            .lock()
            .map_err(|e| DeviceFailure::Recorder(format!("Failed to lock tap: {}", e)))?;
        tap.take();
        Ok(())
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}
