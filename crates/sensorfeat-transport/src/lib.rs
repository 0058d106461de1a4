//! Outbound write primitive for sensor features.
//!
//! Features never own a link. They hand encoded command frames to a
//! [`CommandTransport`], which reports whether the bytes were accepted for
//! transmission. Delivery confirmation belongs to the link itself.
//!
//! Two implementations ship here:
//! - [`StreamTransport`] — writes frames to any `std::io::Write` sink
//! - [`MemoryTransport`] — records frames in memory (tests, dry runs)

pub mod error;
pub mod memory;
pub mod stream;
pub mod traits;

pub use error::{Result, TransportError};
pub use memory::{MemoryTransport, WrittenFrame};
pub use stream::StreamTransport;
pub use traits::{CommandTransport, DeviceContext};
