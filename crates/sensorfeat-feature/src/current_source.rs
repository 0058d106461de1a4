//! Programmable current source.
//!
//! The peripheral reports no data fields; its frames are status-only. The
//! host drives it with three waveform commands and a direct status write.

use sensorfeat_frame::{CommandType, FieldDescriptor, FieldType, Sample};
use sensorfeat_transport::{CommandTransport, DeviceContext};

use crate::builder::FeatureBuilder;
use crate::error::Result;
use crate::feature::Feature;

pub const FEATURE_NAME: &str = "Current Source";
pub const FEATURE_UNIT: &str = "mA";
pub const FEATURE_DATA_NAME: &str = "milli-Ampere";
pub const DATA_MIN: f64 = 0.0;
pub const DATA_MAX: f64 = 4095.0;

/// Canonical first field of every current-source feature.
pub const CURRENT_SOURCE_FIELD: FieldDescriptor = FieldDescriptor::from_static(
    FEATURE_DATA_NAME,
    FEATURE_UNIT,
    FieldType::UInt16,
    DATA_MIN,
    DATA_MAX,
);

/// Builder for the status-only current-source layout.
pub fn layout() -> FeatureBuilder {
    FeatureBuilder::new(FEATURE_NAME, CURRENT_SOURCE_FIELD).status_only()
}

/// Current-source status/control feature.
#[derive(Debug)]
pub struct CurrentSource<T> {
    feature: Feature<T>,
}

impl<T: CommandTransport> CurrentSource<T> {
    pub fn new(device: DeviceContext, transport: T) -> Result<Self> {
        let feature = layout().build(device, transport)?;
        Ok(Self { feature })
    }

    /// A specialised current source with extra fields.
    ///
    /// `fields[0]` must be [`CURRENT_SOURCE_FIELD`]; anything else fails
    /// with `InvalidFieldLayout`.
    pub fn extended(
        name: impl Into<String>,
        device: DeviceContext,
        transport: T,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self> {
        let feature = FeatureBuilder::extending(name, &CURRENT_SOURCE_FIELD, fields)?
            .status_only()
            .build(device, transport)?;
        Ok(Self { feature })
    }

    pub fn feature(&self) -> &Feature<T> {
        &self.feature
    }

    pub fn feature_mut(&mut self) -> &mut Feature<T> {
        &mut self.feature
    }

    pub fn into_feature(self) -> Feature<T> {
        self.feature
    }

    /// Decode and publish an inbound frame. Always consumes zero bytes.
    pub fn on_raw_frame(&self, timestamp: u64, raw: &[u8], offset: usize) -> Result<Sample> {
        self.feature.on_raw_frame(timestamp, raw, offset)
    }

    /// Write a new status byte: `[status, 0x00, 0x00]`.
    pub fn change_status(&self, status: u8) -> bool {
        self.feature.send_status(status)
    }

    /// `[device, 0x02, 0x00]`.
    pub fn percent(&self, device: u8) -> bool {
        self.feature.send_command(device, CommandType::Percent)
    }

    /// `[device, 0x01, 0x00]`.
    pub fn ramp(&self, device: u8) -> bool {
        self.feature.send_command(device, CommandType::Ramp)
    }

    /// `[device, 0x00, 0x00]`.
    pub fn step(&self, device: u8) -> bool {
        self.feature.send_command(device, CommandType::Step)
    }
}

/// Status byte carried by a sample, one bit per current source.
///
/// Returns `0` when there is no sample or its first value is absent.
pub fn current_source_status(sample: Option<&Sample>) -> u8 {
    sample
        .and_then(|sample| sample.get(0))
        // keep the low byte, matching a narrowing integer cast
        .map(|value| value as i64 as u8)
        .unwrap_or(0)
}
