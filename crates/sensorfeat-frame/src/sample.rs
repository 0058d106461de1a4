use std::fmt;
use std::sync::Arc;

use crate::error::{FrameError, Result};
use crate::field::FieldDescriptor;

/// One decoded field value.
///
/// `Absent` means the field was not carried by this particular frame. It is
/// not the same as a zero reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    Present(f64),
    Absent,
}

impl SampleValue {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            SampleValue::Present(value) => Some(value),
            SampleValue::Absent => None,
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, SampleValue::Present(_))
    }
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleValue::Present(value) => write!(f, "{value}"),
            SampleValue::Absent => f.write_str("-"),
        }
    }
}

/// An immutable, timestamped set of field values.
///
/// Values pair positionally with the owning feature's descriptors; the two
/// sequences always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    timestamp: u64,
    values: Vec<SampleValue>,
    fields: Arc<[FieldDescriptor]>,
}

impl Sample {
    /// Build a sample, checking that every descriptor has a value slot.
    pub fn new(
        timestamp: u64,
        values: Vec<SampleValue>,
        fields: Arc<[FieldDescriptor]>,
    ) -> Result<Self> {
        if values.len() != fields.len() {
            return Err(FrameError::InvalidFieldLayout(format!(
                "sample has {} values for {} fields",
                values.len(),
                fields.len()
            )));
        }
        Ok(Self {
            timestamp,
            values,
            fields,
        })
    }

    /// A sample in which no field was carried.
    pub fn absent(timestamp: u64, fields: Arc<[FieldDescriptor]>) -> Self {
        Self {
            timestamp,
            values: vec![SampleValue::Absent; fields.len()],
            fields,
        }
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn values(&self) -> &[SampleValue] {
        &self.values
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Numeric value at `index`, `None` if absent or out of bounds.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).and_then(|value| value.as_f64())
    }

    /// Numeric value of the field named `name`.
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        let index = self.fields.iter().position(|field| field.name() == name)?;
        self.get(index)
    }

    /// Descriptor/value pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldDescriptor, SampleValue)> + '_ {
        self.fields.iter().zip(self.values.iter().copied())
    }

    /// Number of values actually carried by the frame.
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_present()).count()
    }
}
