//! Owned handle for an acquired capture stream.
//!
//! The device is released on `finish` or when the guard is dropped, whichever comes first.

use crate::domain::CapturedAudio;
use crate::ports::CaptureStream;
use tracing::debug;

pub struct CaptureGuard {
    stream: Option<Box<dyn CaptureStream>>,
    audio: CapturedAudio,
}

impl CaptureGuard {
    pub fn new(stream: Box<dyn CaptureStream>) -> Self {
        let audio = CapturedAudio::new(stream.sample_rate());
        Self {
            stream: Some(stream),
            audio,
        }
    }

    /// Pull whatever the stream has buffered into the recording.
    pub fn drain(&mut self) {
        if let Some(stream) = self.stream.as_mut() {
            while let Some(chunk) = stream.next_chunk() {
                self.audio.samples.extend_from_slice(&chunk);
            }
        }
    }

    /// Drain, release the device, and hand back the recording.
    pub fn finish(mut self) -> CapturedAudio {
        self.drain();
        self.release();
        std::mem::take(&mut self.audio)
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
            debug!(samples = self.audio.samples.len(), "capture device released");
        }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.release();
    }
}
