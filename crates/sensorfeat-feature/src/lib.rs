//! Feature composition root.
//!
//! A [`Feature`] binds a fixed list of field descriptors to one peripheral:
//! inbound sub-frames are decoded into samples and handed to registered
//! listeners, outbound commands are encoded and handed to the transport.
//!
//! [`CurrentSource`] is the bundled instantiation: a status-only feature
//! that drives a programmable current source.

pub mod builder;
pub mod config;
pub mod current_source;
pub mod error;
pub mod feature;
pub mod listener;

pub use builder::FeatureBuilder;
pub use config::{FieldConfig, LayoutConfig, DEFAULT_MAX_LAYOUT_FILE_SIZE};
pub use current_source::{current_source_status, CurrentSource, CURRENT_SOURCE_FIELD};
pub use error::{FeatureError, Result};
pub use feature::Feature;
pub use listener::SampleListener;
