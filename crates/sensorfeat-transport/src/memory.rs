use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::traits::{CommandTransport, DeviceContext};

/// A frame captured by [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFrame {
    pub device: DeviceContext,
    pub bytes: Vec<u8>,
}

/// Records every accepted frame in memory.
///
/// Useful for dry runs and for asserting exact wire bytes in tests. Can be
/// switched to refuse writes to exercise the rejected path.
#[derive(Debug)]
pub struct MemoryTransport {
    frames: Mutex<Vec<WrittenFrame>>,
    accepting: AtomicBool,
}

impl MemoryTransport {
    /// Create a transport that accepts every write.
    pub fn new() -> Self {
        Self {
            frames: Mutex::new(Vec::new()),
            accepting: AtomicBool::new(true),
        }
    }

    /// Create a transport that refuses every write.
    pub fn rejecting() -> Self {
        let transport = Self::new();
        transport.set_accepting(false);
        transport
    }

    /// Toggle whether subsequent writes are accepted.
    pub fn set_accepting(&self, accepting: bool) {
        self.accepting.store(accepting, Ordering::SeqCst);
    }

    /// Snapshot of recorded frames, oldest first.
    pub fn frames(&self) -> Vec<WrittenFrame> {
        match self.frames.lock() {
            Ok(frames) => frames.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Bytes of the most recent frame.
    pub fn last_bytes(&self) -> Option<Vec<u8>> {
        self.frames().pop().map(|frame| frame.bytes)
    }

    /// Remove and return all recorded frames.
    pub fn take_frames(&self) -> Vec<WrittenFrame> {
        match self.frames.lock() {
            Ok(mut frames) => std::mem::take(&mut *frames),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandTransport for MemoryTransport {
    fn write(&self, device: &DeviceContext, bytes: &[u8]) -> bool {
        if !self.accepting.load(Ordering::SeqCst) {
            debug!(%device, "memory transport refusing write");
            return false;
        }
        let mut frames = match self.frames.lock() {
            Ok(frames) => frames,
            Err(poisoned) => {
                warn!(%device, "memory transport lock poisoned, recovering");
                poisoned.into_inner()
            }
        };
        frames.push(WrittenFrame {
            device: device.clone(),
            bytes: bytes.to_vec(),
        });
        true
    }
}
