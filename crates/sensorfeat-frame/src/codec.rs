use std::sync::Arc;

use bytes::Buf;
use tracing::{debug, trace};

use crate::config::{DecodeConfig, RangePolicy};
use crate::error::{FrameError, Result};
use crate::field::FieldDescriptor;
use crate::sample::{Sample, SampleValue};

/// How a feature's descriptors map onto inbound bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLayout {
    /// Every descriptor is read from the wire, in order.
    Fields,
    /// The feature carries no data fields on the wire. Decode consumes
    /// nothing and every value is `Absent`.
    StatusOnly,
}

/// Turns raw sub-frames into [`Sample`]s for one fixed list of descriptors.
///
/// Decoding is pure: the same inputs always produce the same result, and a
/// decoder can be shared across threads.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    fields: Arc<[FieldDescriptor]>,
    layout: FrameLayout,
    config: DecodeConfig,
}

impl FrameDecoder {
    /// Create a decoder that reads every descriptor from the wire.
    pub fn new(fields: impl Into<Arc<[FieldDescriptor]>>) -> Result<Self> {
        Self::with_layout(fields, FrameLayout::Fields)
    }

    /// Create a decoder for a feature that carries no data fields.
    pub fn status_only(fields: impl Into<Arc<[FieldDescriptor]>>) -> Result<Self> {
        Self::with_layout(fields, FrameLayout::StatusOnly)
    }

    /// Create a decoder with an explicit layout.
    pub fn with_layout(
        fields: impl Into<Arc<[FieldDescriptor]>>,
        layout: FrameLayout,
    ) -> Result<Self> {
        let fields = fields.into();
        if fields.is_empty() {
            return Err(FrameError::InvalidFieldLayout(
                "a feature needs at least one field descriptor".to_string(),
            ));
        }
        Ok(Self {
            fields,
            layout,
            config: DecodeConfig::default(),
        })
    }

    /// Override decode config.
    pub fn with_config(mut self, config: DecodeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn fields(&self) -> &Arc<[FieldDescriptor]> {
        &self.fields
    }

    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Bytes a complete sub-frame occupies on the wire.
    pub fn frame_width(&self) -> usize {
        match self.layout {
            FrameLayout::Fields => self.fields.iter().map(FieldDescriptor::byte_width).sum(),
            FrameLayout::StatusOnly => 0,
        }
    }

    /// Decode the sub-frame starting at `offset`.
    ///
    /// Returns the sample and the number of bytes consumed. Fails with
    /// [`FrameError::TruncatedFrame`] if the buffer ends before the last
    /// field; an `offset` past the end is treated as an empty remainder.
    pub fn decode(&self, timestamp: u64, raw: &[u8], offset: usize) -> Result<(Sample, usize)> {
        if self.layout == FrameLayout::StatusOnly {
            trace!(timestamp, "status-only frame, nothing to read");
            return Ok((Sample::absent(timestamp, self.fields.clone()), 0));
        }

        let mut src = raw.get(offset..).unwrap_or_default();
        let start = src.len();
        let mut values = Vec::with_capacity(self.fields.len());

        for (index, field) in self.fields.iter().enumerate() {
            let needed = field.byte_width();
            if src.remaining() < needed {
                debug!(
                    field = index,
                    needed,
                    available = src.remaining(),
                    "truncated frame"
                );
                return Err(FrameError::TruncatedFrame {
                    field: index,
                    needed,
                    available: src.remaining(),
                });
            }
            let raw_value = field.field_type().read(&mut src);
            let value = self.apply_range_policy(index, field, raw_value)?;
            trace!(field = index, name = field.name(), value, "decoded field");
            values.push(SampleValue::Present(value));
        }

        let consumed = start - src.remaining();
        let sample = Sample::new(timestamp, values, self.fields.clone())?;
        Ok((sample, consumed))
    }

    fn apply_range_policy(&self, index: usize, field: &FieldDescriptor, value: f64) -> Result<f64> {
        if field.is_in_range(value) {
            return Ok(value);
        }
        match self.config.range_policy {
            RangePolicy::PassThrough => {
                debug!(
                    field = index,
                    value,
                    min = field.min(),
                    max = field.max(),
                    "value outside declared range"
                );
                Ok(value)
            }
            // NaN floats stay NaN under clamp
            RangePolicy::Clamp => Ok(value.clamp(field.min(), field.max())),
            RangePolicy::Reject => Err(FrameError::OutOfRange {
                field: index,
                value,
                min: field.min(),
                max: field.max(),
            }),
        }
    }
}
