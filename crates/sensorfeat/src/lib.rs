//! Typed sample decoding and command encoding for wireless sensor features.
//!
//! sensorfeat gives every sensor feature the same contract: little-endian
//! sub-frames decoded into unit-annotated samples, and fixed 3-byte command
//! frames handed to whatever link the host uses.
//!
//! # Crate Structure
//!
//! - [`transport`] — Write primitive and bundled transports
//! - [`frame`] — Field descriptors, sample decoding, command encoding
//! - [`feature`] — Feature composition, listeners, the current-source feature

/// Re-export transport types.
pub mod transport {
    pub use sensorfeat_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use sensorfeat_frame::*;
}

/// Re-export feature types.
pub mod feature {
    pub use sensorfeat_feature::*;
}
