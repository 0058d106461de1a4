use std::borrow::Cow;
use std::fmt;

use bytes::Buf;
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};

/// Numeric wire type of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    UInt8,
    UInt16,
    Int8,
    Int16,
    Int24,
    Int32,
    Float,
}

impl FieldType {
    /// Bytes consumed on the wire.
    pub fn byte_width(self) -> usize {
        match self {
            FieldType::UInt8 | FieldType::Int8 => 1,
            FieldType::UInt16 | FieldType::Int16 => 2,
            FieldType::Int24 => 3,
            FieldType::Int32 | FieldType::Float => 4,
        }
    }

    /// Whether raw bits are sign-extended.
    pub fn is_signed(self) -> bool {
        !matches!(self, FieldType::UInt8 | FieldType::UInt16)
    }

    /// Read one little-endian value.
    ///
    /// Callers must check `src.remaining() >= self.byte_width()` first.
    pub(crate) fn read(self, src: &mut impl Buf) -> f64 {
        match self {
            FieldType::UInt8 => f64::from(src.get_u8()),
            FieldType::UInt16 => f64::from(src.get_u16_le()),
            FieldType::Int8 => f64::from(src.get_i8()),
            FieldType::Int16 => f64::from(src.get_i16_le()),
            // get_int_le sign-extends from the top bit of the 3-byte value
            FieldType::Int24 => src.get_int_le(3) as f64,
            FieldType::Int32 => f64::from(src.get_i32_le()),
            FieldType::Float => f64::from(src.get_f32_le()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::UInt8 => "uint8",
            FieldType::UInt16 => "uint16",
            FieldType::Int8 => "int8",
            FieldType::Int16 => "int16",
            FieldType::Int24 => "int24",
            FieldType::Int32 => "int32",
            FieldType::Float => "float",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one scalar within a feature's frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    unit: Cow<'static, str>,
    field_type: FieldType,
    min: f64,
    max: f64,
}

impl FieldDescriptor {
    /// Create a descriptor, rejecting `min > max` and NaN bounds.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        unit: impl Into<Cow<'static, str>>,
        field_type: FieldType,
        min: f64,
        max: f64,
    ) -> Result<Self> {
        let name = name.into();
        if min.is_nan() || max.is_nan() || min > max {
            return Err(FrameError::InvalidRange {
                name: name.into_owned(),
                min,
                max,
            });
        }
        Ok(Self {
            name,
            unit: unit.into(),
            field_type,
            min,
            max,
        })
    }

    /// Const constructor for descriptors declared as `const` items.
    ///
    /// The range check runs at compile time when used in a const context.
    /// Use [`FieldDescriptor::new`] for bounds that are not known statically.
    ///
    /// # Panics
    ///
    /// Panics if `min > max` or either bound is NaN. In a const item this
    /// is a compile error instead.
    pub const fn from_static(
        name: &'static str,
        unit: &'static str,
        field_type: FieldType,
        min: f64,
        max: f64,
    ) -> Self {
        assert!(min <= max, "field descriptor min must not exceed max");
        Self {
            name: Cow::Borrowed(name),
            unit: Cow::Borrowed(unit),
            field_type,
            min,
            max,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Bytes this field consumes during decode (1-4).
    pub fn byte_width(&self) -> usize {
        self.field_type.byte_width()
    }

    /// True iff `min <= value <= max`.
    pub fn is_in_range(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) [{}, {}]",
            self.name, self.unit, self.field_type, self.min, self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_widths() {
        assert_eq!(FieldType::UInt8.byte_width(), 1);
        assert_eq!(FieldType::Int8.byte_width(), 1);
        assert_eq!(FieldType::UInt16.byte_width(), 2);
        assert_eq!(FieldType::Int16.byte_width(), 2);
        assert_eq!(FieldType::Int24.byte_width(), 3);
        assert_eq!(FieldType::Int32.byte_width(), 4);
        assert_eq!(FieldType::Float.byte_width(), 4);
    }

    #[test]
    fn signedness() {
        assert!(!FieldType::UInt8.is_signed());
        assert!(!FieldType::UInt16.is_signed());
        assert!(FieldType::Int24.is_signed());
        assert!(FieldType::Float.is_signed());
    }

    #[test]
    fn int24_sign_extends() {
        let mut src: &[u8] = &[0xFF, 0xFF, 0xFF];
        assert_eq!(FieldType::Int24.read(&mut src), -1.0);

        let mut src: &[u8] = &[0x00, 0x00, 0x80];
        assert_eq!(FieldType::Int24.read(&mut src), -8_388_608.0);

        let mut src: &[u8] = &[0xFF, 0xFF, 0x7F];
        assert_eq!(FieldType::Int24.read(&mut src), 8_388_607.0);
    }

    #[test]
    fn reads_are_little_endian() {
        let mut src: &[u8] = &[0x34, 0x12];
        assert_eq!(FieldType::UInt16.read(&mut src), 4660.0);

        let mut src: &[u8] = &[0xFE, 0xFF];
        assert_eq!(FieldType::Int16.read(&mut src), -2.0);

        let mut src: &[u8] = &1.5f32.to_le_bytes();
        assert_eq!(FieldType::Float.read(&mut src), 1.5);
    }

    #[test]
    fn const_descriptor_equals_runtime_one() {
        const FIELD: FieldDescriptor =
            FieldDescriptor::from_static("current", "mA", FieldType::UInt16, 0.0, 4095.0);
        let runtime =
            FieldDescriptor::new("current".to_string(), "mA", FieldType::UInt16, 0.0, 4095.0)
                .unwrap();
        assert_eq!(FIELD, runtime);
        assert_eq!(FIELD.byte_width(), 2);
    }

    #[test]
    #[should_panic(expected = "min must not exceed max")]
    fn runtime_from_static_panics_on_inverted_range() {
        let max = std::hint::black_box(1.0);
        let _ = FieldDescriptor::from_static("x", "u", FieldType::UInt8, 10.0, max);
    }

    #[test]
    fn rejects_inverted_range() {
        let err = FieldDescriptor::new("x", "u", FieldType::UInt8, 10.0, 1.0).unwrap_err();
        assert!(matches!(err, FrameError::InvalidRange { .. }));
    }

    #[test]
    fn rejects_nan_bounds() {
        let err = FieldDescriptor::new("x", "u", FieldType::UInt8, f64::NAN, 1.0).unwrap_err();
        assert!(matches!(err, FrameError::InvalidRange { .. }));
    }

    #[test]
    fn range_check_is_inclusive() {
        let field = FieldDescriptor::new("current", "mA", FieldType::UInt16, 0.0, 4095.0).unwrap();
        assert!(field.is_in_range(0.0));
        assert!(field.is_in_range(4095.0));
        assert!(!field.is_in_range(4096.0));
        assert!(!field.is_in_range(-1.0));
    }

    #[test]
    fn field_type_serde_names() {
        let parsed: FieldType = serde_json::from_str("\"int24\"").unwrap();
        assert_eq!(parsed, FieldType::Int24);
        assert_eq!(FieldType::UInt16.to_string(), "uint16");
    }
}
