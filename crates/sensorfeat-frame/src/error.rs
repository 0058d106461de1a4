/// Errors that can occur while decoding samples or building layouts.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The buffer ended before the field at `field` could be read.
    #[error("truncated frame at field {field} (needed {needed} bytes, {available} available)")]
    TruncatedFrame {
        field: usize,
        needed: usize,
        available: usize,
    },

    /// A feature layout broke its construction contract.
    #[error("invalid field layout: {0}")]
    InvalidFieldLayout(String),

    /// A field descriptor was declared with `min > max` or a NaN bound.
    #[error("invalid range for field {name:?}: [{min}, {max}]")]
    InvalidRange { name: String, min: f64, max: f64 },

    /// A decoded value fell outside its descriptor's bounds under
    /// [`RangePolicy::Reject`](crate::RangePolicy::Reject).
    #[error("field {field} value {value} outside [{min}, {max}]")]
    OutOfRange {
        field: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The discriminant byte does not name a known command.
    #[error("unknown command discriminant 0x{0:02x}")]
    UnknownCommand(u8),

    /// An I/O error surfaced through the stream codec.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
