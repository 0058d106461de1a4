//! Field-described sample decoding and fixed-layout command encoding.
//!
//! Every inbound sub-frame is a run of little-endian scalars laid out by an
//! ordered list of [`FieldDescriptor`]s:
//! - widths of 1, 2, 3 or 4 bytes, chosen by [`FieldType`]
//! - signed types sign-extended, `Float` read as IEEE-754 single precision
//!
//! Every outbound command is exactly [`COMMAND_FRAME_LEN`] bytes.
//!
//! Malformed or short input is reported as an error, never a panic and never
//! a partial [`Sample`].

pub mod codec;
pub mod command;
pub mod config;
pub mod error;
pub mod field;
pub mod reader;
pub mod sample;

#[cfg(feature = "async")]
pub mod stream;

pub use codec::{FrameDecoder, FrameLayout};
pub use command::{
    encode_command, encode_command_with, encode_status, CommandFrame, CommandType,
    COMMAND_FRAME_LEN, RESERVED_SUB_PARAMETER,
};
pub use config::{DecodeConfig, RangePolicy};
pub use error::{FrameError, Result};
pub use field::{FieldDescriptor, FieldType};
pub use reader::MultiplexReader;
pub use sample::{Sample, SampleValue};

#[cfg(feature = "async")]
pub use stream::SampleCodec;
