use std::sync::Arc;

use sensorfeat_frame::{
    encode_command, encode_command_with, encode_status, CommandFrame, CommandType,
    FieldDescriptor, FrameDecoder, Sample,
};
use sensorfeat_transport::{CommandTransport, DeviceContext};
use tracing::{debug, warn};

use crate::error::Result;
use crate::listener::SampleListener;

/// One logical sensor or actuator exposed by a peripheral.
///
/// The descriptor list is fixed when the feature is built and defines the
/// wire contract for its whole lifetime. Build one with
/// [`FeatureBuilder`](crate::FeatureBuilder).
pub struct Feature<T> {
    name: String,
    device: DeviceContext,
    decoder: FrameDecoder,
    transport: T,
    listeners: Vec<Arc<dyn SampleListener>>,
}

impl<T: CommandTransport> Feature<T> {
    pub(crate) fn from_parts(
        name: String,
        device: DeviceContext,
        decoder: FrameDecoder,
        transport: T,
    ) -> Self {
        Self {
            name,
            device,
            decoder,
            transport,
            listeners: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device(&self) -> &DeviceContext {
        &self.device
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        self.decoder.fields()
    }

    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Register a listener for decoded samples.
    pub fn add_listener(&mut self, listener: Arc<dyn SampleListener>) {
        self.listeners.push(listener);
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, listener: &Arc<dyn SampleListener>) -> bool {
        let before = self.listeners.len();
        self.listeners
            .retain(|registered| !Arc::ptr_eq(registered, listener));
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Decode this feature's sub-frame without publishing it.
    ///
    /// Returns the sample and the bytes consumed, so callers sharing one
    /// transport buffer between features can advance their cursor.
    pub fn extract(&self, timestamp: u64, raw: &[u8], offset: usize) -> Result<(Sample, usize)> {
        Ok(self.decoder.decode(timestamp, raw, offset)?)
    }

    /// Decode an inbound sub-frame and publish the sample to every listener.
    ///
    /// Nothing is published when decoding fails.
    pub fn on_raw_frame(&self, timestamp: u64, raw: &[u8], offset: usize) -> Result<Sample> {
        let (sample, consumed) = self.extract(timestamp, raw, offset)?;
        debug!(
            feature = %self.name,
            timestamp,
            consumed,
            listeners = self.listeners.len(),
            "sample decoded"
        );
        for listener in &self.listeners {
            listener.on_sample(&self.name, &sample);
        }
        Ok(sample)
    }

    /// Send `command` to the peripheral identified by `selector`.
    pub fn send_command(&self, selector: u8, command: CommandType) -> bool {
        self.send_frame(encode_command(selector, command))
    }

    /// Send `command` with an explicit sub-parameter byte.
    pub fn send_command_with(&self, selector: u8, command: CommandType, sub_parameter: u8) -> bool {
        self.send_frame(encode_command_with(selector, command, sub_parameter))
    }

    /// Send a direct status change.
    pub fn send_status(&self, status: u8) -> bool {
        self.send_frame(encode_status(status))
    }

    /// Hand an encoded frame to the transport.
    ///
    /// `true` means the transport accepted the bytes for transmission, not
    /// that the peripheral acted on them.
    pub fn send_frame(&self, frame: CommandFrame) -> bool {
        let accepted = self.transport.write(&self.device, frame.as_ref());
        if accepted {
            debug!(
                feature = %self.name,
                device = %self.device,
                bytes = ?frame.as_bytes(),
                "command sent"
            );
        } else {
            warn!(
                feature = %self.name,
                device = %self.device,
                bytes = ?frame.as_bytes(),
                "transport rejected command"
            );
        }
        accepted
    }
}

impl<T> std::fmt::Debug for Feature<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feature")
            .field("name", &self.name)
            .field("device", &self.device)
            .field("decoder", &self.decoder)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
