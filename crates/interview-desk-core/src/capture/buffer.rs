use std::{
    fmt,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use tracing::{debug, error};

/// Shared, append-only chunk buffer handed to a [`MediaRecorder`](crate::capture::MediaRecorder).
///
/// Clones share the same storage, so the recorder may push from its own
/// thread while the controller keeps a handle for finalization.
#[derive(Clone, Default)]
pub struct ChunkSink {
    chunks: Arc<Mutex<Vec<Vec<u8>>>>,
    /// Set by `close()`. Pushes after this are dropped so a late recorder
    /// callback cannot change a finalized recording.
    closed: Arc<AtomicBool>,
}

impl ChunkSink {
    /// Create an empty, open sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one data chunk. Returns `false` if the chunk was dropped.
    pub fn push(&self, chunk: Vec<u8>) -> bool {
        if chunk.is_empty() || self.closed.load(Ordering::Acquire) {
            return false;
        }

        // A poisoned mutex still holds valid chunks; keep recording into it.
        let mut chunks = self.chunks.lock().unwrap_or_else(|e| {
            error!("Chunk buffer lock poisoned, recovering: {}", e);
            e.into_inner()
        });
        chunks.push(chunk);
        true
    }

    /// Stop accepting chunks.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Whether `close()` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of chunks buffered so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Concatenate every buffered chunk, in arrival order, into one blob.
    ///
    /// Closes the sink.
    pub fn finish(&self, mime_type: &str) -> RecordedBlob {
        self.close();

        let chunks = self.chunks.lock().unwrap_or_else(|e| e.into_inner());
        let total: usize = chunks.iter().map(Vec::len).sum();
        let mut bytes = Vec::with_capacity(total);
        for chunk in chunks.iter() {
            bytes.extend_from_slice(chunk);
        }

        debug!(
            chunk_count = chunks.len(),
            bytes = bytes.len(),
            mime_type,
            "Recording finalized"
        );

        RecordedBlob {
            bytes: Arc::from(bytes),
            mime_type: mime_type.to_string(),
            chunk_count: chunks.len(),
        }
    }
}

impl fmt::Debug for ChunkSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkSink")
            .field("chunk_count", &self.chunk_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// A finalized recording, ready for upload.
///
/// The payload is opaque and cheap to clone.
#[derive(Clone, PartialEq, Eq)]
pub struct RecordedBlob {
    bytes: Arc<[u8]>,
    mime_type: String,
    chunk_count: usize,
}

impl RecordedBlob {
    /// Raw payload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Container/codec of the payload, e.g. `video/webm`.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// How many recorder chunks were assembled.
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }
}

impl fmt::Debug for RecordedBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordedBlob")
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .field("chunk_count", &self.chunk_count)
            .finish()
    }
}
