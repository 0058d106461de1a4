use serde::{Deserialize, Serialize};

/// What the decoder does with a value outside its descriptor's bounds.
///
/// The peripheral owns the correctness of the ranges it emits, so values
/// pass through untouched unless a stricter policy is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangePolicy {
    #[default]
    PassThrough,
    /// Limit the value to `[min, max]`.
    Clamp,
    /// Fail the decode with `FrameError::OutOfRange`.
    Reject,
}

/// Controls decoder behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeConfig {
    #[serde(default)]
    pub range_policy: RangePolicy,
}
