use std::io::{ErrorKind, Write};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{Result, TransportError};
use crate::traits::{CommandTransport, DeviceContext};

/// Writes command frames to any `Write` sink.
///
/// The sink sits behind a mutex so features sharing one link have their
/// frames written whole and in call order.
pub struct StreamTransport<W> {
    inner: Mutex<W>,
}

impl<W: Write> StreamTransport<W> {
    /// Wrap a sink.
    pub fn new(inner: W) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Write a complete frame and flush (blocking).
    pub fn try_write(&self, device: &DeviceContext, bytes: &[u8]) -> Result<()> {
        let mut sink = self.inner.lock().map_err(|_| TransportError::Poisoned)?;

        let mut offset = 0usize;
        while offset < bytes.len() {
            match sink.write(&bytes[offset..]) {
                Ok(0) => {
                    return Err(TransportError::Rejected {
                        device: device.to_string(),
                    })
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }

        loop {
            match sink.flush() {
                Ok(()) => break,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }

        debug!(%device, len = bytes.len(), "frame written");
        Ok(())
    }

    /// Consume the transport and return the sink.
    pub fn into_inner(self) -> Result<W> {
        self.inner.into_inner().map_err(|_| TransportError::Poisoned)
    }
}

impl<W: Write> CommandTransport for StreamTransport<W> {
    fn write(&self, device: &DeviceContext, bytes: &[u8]) -> bool {
        match self.try_write(device, bytes) {
            Ok(()) => true,
            Err(err) => {
                warn!(%device, error = %err, "command write failed");
                false
            }
        }
    }
}

impl<W> std::fmt::Debug for StreamTransport<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamTransport").finish_non_exhaustive()
    }
}
