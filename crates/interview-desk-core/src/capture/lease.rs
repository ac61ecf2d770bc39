use crate::capture::DeviceStream;

use tracing::debug;

/// RAII owner of a device stream.
///
/// Guarantees [`DeviceStream::release`] runs exactly once per acquisition:
/// either through [`release`](StreamLease::release) or when the lease is dropped.
/// Without this, an early return between acquire and teardown would leave the
/// camera/microphone locked.
pub struct StreamLease<S: DeviceStream> {
    stream: Option<S>,
    label: String,
}

impl<S: DeviceStream> StreamLease<S> {
    /// Take ownership of a freshly acquired stream.
    pub fn new(stream: S) -> Self {
        let label = stream.label();
        debug!(stream = %label, "Device stream acquired");
        Self {
            stream: Some(stream),
            label,
        }
    }

    /// Label of the leased stream.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Borrow the stream.
    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// Mutably borrow the stream.
    pub fn stream_mut(&mut self) -> Option<&mut S> {
        self.stream.as_mut()
    }

    /// Release the device now.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
            debug!(stream = %self.label, "Device stream released");
        }
    }
}

impl<S: DeviceStream> Drop for StreamLease<S> {
    fn drop(&mut self) {
        self.release_inner();
    }
}
