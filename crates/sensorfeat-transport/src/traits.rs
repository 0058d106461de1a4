use std::fmt;
use std::sync::Arc;

/// Identifies the peripheral a command frame is addressed to.
///
/// The core never interprets the address; it is passed through to the
/// transport so one transport can serve several peripherals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceContext {
    name: String,
    address: String,
}

impl DeviceContext {
    /// Create a device context.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Human-readable peripheral name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Link-level address (MAC, handle, path).
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for DeviceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.address)
    }
}

/// The write primitive a feature uses to emit command frames.
///
/// Returns `true` when the link accepted the bytes for transmission. This
/// says nothing about whether the peripheral acted on them.
///
/// Implementations shared between features must serialise their own writes.
pub trait CommandTransport {
    fn write(&self, device: &DeviceContext, bytes: &[u8]) -> bool;
}

impl<T: CommandTransport + ?Sized> CommandTransport for &T {
    fn write(&self, device: &DeviceContext, bytes: &[u8]) -> bool {
        (**self).write(device, bytes)
    }
}

impl<T: CommandTransport + ?Sized> CommandTransport for Arc<T> {
    fn write(&self, device: &DeviceContext, bytes: &[u8]) -> bool {
        (**self).write(device, bytes)
    }
}

impl<T: CommandTransport + ?Sized> CommandTransport for Box<T> {
    fn write(&self, device: &DeviceContext, bytes: &[u8]) -> bool {
        (**self).write(device, bytes)
    }
}
