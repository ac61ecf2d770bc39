//! Synthetic camera and microphone for machines without capture hardware.
//!
//! Access resolves after a short "prompt" delay. While recording, a worker
//! thread emits one frame chunk per interval; stopping joins the worker and
//! flushes a trailer chunk, so no data arrives after `stop` returns.

use interview_desk_core::{
    ChunkSink, DeviceFailure, DeviceStream, MediaConstraints, MediaDevices, MediaRecorder,
};

use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    thread::JoinHandle,
    time::Duration,
};

use tracing::{debug, info, warn};

/// Delay before the simulated permission prompt resolves.
pub(crate) const PROMPT_DELAY: Duration = Duration::from_millis(300);

/// Interval between emitted frame chunks.
pub(crate) const FRAME_INTERVAL: Duration = Duration::from_millis(100);

const SIMULATED_MIME: &str = "video/x-simulated";

/// Simulated device-permission API.
#[derive(Debug, Clone)]
pub struct SimulatedDevices {
    deny: Arc<AtomicBool>,
    prompt_delay: Duration,
    frame_interval: Duration,
    opened: Arc<AtomicU64>,
    closed: Arc<AtomicU64>,
}

impl SimulatedDevices {
    /// Devices that grant access after [`PROMPT_DELAY`].
    pub fn new() -> Self {
        Self {
            deny: Arc::new(AtomicBool::new(false)),
            prompt_delay: PROMPT_DELAY,
            frame_interval: FRAME_INTERVAL,
            opened: Arc::new(AtomicU64::new(0)),
            closed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Override prompt and frame timing.
    #[cfg(test)]
    pub fn with_timing(mut self, prompt_delay: Duration, frame_interval: Duration) -> Self {
        self.prompt_delay = prompt_delay;
        self.frame_interval = frame_interval;
        self
    }

    /// Make subsequent prompts refuse access.
    #[cfg(test)]
    pub fn set_deny(&self, deny: bool) {
        self.deny.store(deny, Ordering::SeqCst);
    }

    /// Streams handed out so far.
    #[cfg(test)]
    pub fn opened_count(&self) -> u64 {
        self.opened.load(Ordering::SeqCst)
    }

    /// Streams released so far.
    #[cfg(test)]
    pub fn closed_count(&self) -> u64 {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Default for SimulatedDevices {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaDevices for SimulatedDevices {
    type Stream = SimulatedStream;

    fn request_stream(
        &self,
        constraints: MediaConstraints,
    ) -> impl Future<Output = Result<SimulatedStream, DeviceFailure>> + Send {
        let deny = self.deny.load(Ordering::SeqCst);
        let prompt_delay = self.prompt_delay;
        let frame_interval = self.frame_interval;
        let opened = Arc::clone(&self.opened);
        let closed = Arc::clone(&self.closed);

        async move {
            tokio::time::sleep(prompt_delay).await;

            if deny {
                warn!("Simulated permission prompt dismissed");
                return Err(DeviceFailure::PermissionDenied(
                    "simulated prompt dismissed".to_string(),
                ));
            }
            if !constraints.audio && !constraints.video {
                return Err(DeviceFailure::Unavailable("no tracks requested".to_string()));
            }

            let id = opened.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(SimulatedStream::new(id, constraints, frame_interval, closed))
        }
    }
}

/// Simulated live stream with independently switchable tracks.
pub struct SimulatedStream {
    label: String,
    audio: Arc<AtomicBool>,
    video: Arc<AtomicBool>,
    has_video: bool,
    frame_interval: Duration,
    released: bool,
    closed: Arc<AtomicU64>,
}

impl SimulatedStream {
    fn new(
        id: u64,
        constraints: MediaConstraints,
        frame_interval: Duration,
        closed: Arc<AtomicU64>,
    ) -> Self {
        let label = format!("simulated-camera-{}", id);
        info!(stream = %label, "Simulated stream opened");
        Self {
            label,
            audio: Arc::new(AtomicBool::new(constraints.audio)),
            video: Arc::new(AtomicBool::new(constraints.video)),
            has_video: constraints.video,
            frame_interval,
            released: false,
            closed,
        }
    }

    /// Whether the audio track is live.
    #[cfg(test)]
    pub fn audio_enabled(&self) -> bool {
        self.audio.load(Ordering::SeqCst)
    }

    /// Whether the video track is live.
    #[cfg(test)]
    pub fn video_enabled(&self) -> bool {
        self.video.load(Ordering::SeqCst)
    }

    /// Whether `release` has been called.
    #[cfg(test)]
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl DeviceStream for SimulatedStream {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn has_video(&self) -> bool {
        self.has_video
    }

    fn create_recorder(&self) -> Result<Box<dyn MediaRecorder>, DeviceFailure> {
        if self.released {
            return Err(DeviceFailure::Recorder("stream already released".to_string()));
        }
        Ok(Box::new(SimulatedRecorder {
            audio: Arc::clone(&self.audio),
            video: Arc::clone(&self.video),
            frame_interval: self.frame_interval,
            worker: None,
        }))
    }

    fn set_audio_enabled(&mut self, enabled: bool) {
        self.audio.store(enabled, Ordering::SeqCst);
    }

    fn set_video_enabled(&mut self, enabled: bool) {
        self.video.store(enabled, Ordering::SeqCst);
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.closed.fetch_add(1, Ordering::SeqCst);
            info!(stream = %self.label, "Simulated stream released");
        }
    }
}

struct Worker {
    stopping: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
    handle: JoinHandle<()>,
    sink: ChunkSink,
}

struct SimulatedRecorder {
    audio: Arc<AtomicBool>,
    video: Arc<AtomicBool>,
    frame_interval: Duration,
    worker: Option<Worker>,
}

/// One frame chunk, tagged with which tracks were live.
fn frame_chunk(index: u64, audio: bool, video: bool) -> Vec<u8> {
    format!(
        "FRAME {} audio={} video={}\n",
        index,
        u8::from(audio),
        u8::from(video)
    )
    .into_bytes()
}

impl MediaRecorder for SimulatedRecorder {
    fn start(&mut self, sink: ChunkSink) -> Result<(), DeviceFailure> {
        if self.worker.is_some() {
            return Err(DeviceFailure::Recorder("recorder already running".to_string()));
        }

        let stopping = Arc::new(AtomicBool::new(false));
        let frames = Arc::new(AtomicU64::new(0));

        let thread_stopping = Arc::clone(&stopping);
        let thread_frames = Arc::clone(&frames);
        let thread_sink = sink.clone();
        let audio = Arc::clone(&self.audio);
        let video = Arc::clone(&self.video);
        let interval = self.frame_interval;

        let handle = std::thread::Builder::new()
            .name("simulated-recorder".to_string())
            .spawn(move || {
                loop {
                    std::thread::sleep(interval);
                    if thread_stopping.load(Ordering::Acquire) {
                        break;
                    }
                    let index = thread_frames.fetch_add(1, Ordering::SeqCst);
                    thread_sink.push(frame_chunk(
                        index,
                        audio.load(Ordering::SeqCst),
                        video.load(Ordering::SeqCst),
                    ));
                }
            })
            .map_err(|e| DeviceFailure::Recorder(format!("Failed to spawn recorder: {}", e)))?;

        self.worker = Some(Worker {
            stopping,
            frames,
            handle,
            sink,
        });
        debug!("Simulated recorder started");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DeviceFailure> {
        let Some(worker) = self.worker.take() else {
            return Err(DeviceFailure::Recorder("recorder not running".to_string()));
        };

        worker.stopping.store(true, Ordering::Release);
        if worker.handle.join().is_err() {
            return Err(DeviceFailure::Recorder("recorder thread panicked".to_string()));
        }

        // Final flush, as a real recorder delivers its last buffered chunk.
        let index = worker.frames.fetch_add(1, Ordering::SeqCst);
        worker.sink.push(frame_chunk(
            index,
            self.audio.load(Ordering::SeqCst),
            self.video.load(Ordering::SeqCst),
        ));

        debug!(frames = index + 1, "Simulated recorder stopped");
        Ok(())
    }

    fn mime_type(&self) -> &str {
        SIMULATED_MIME
    }
}

impl Drop for SimulatedRecorder {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stopping.store(true, Ordering::Release);
            let _ = worker.handle.join();
        }
    }
}
