use std::fmt;

use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::error::{FrameError, Result};

/// Every command frame is exactly this many bytes.
pub const COMMAND_FRAME_LEN: usize = 3;

/// Default value of the reserved third byte.
pub const RESERVED_SUB_PARAMETER: u8 = 0x00;

/// Command discriminants understood by the current-source peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandType {
    Step = 0x00,
    Ramp = 0x01,
    Percent = 0x02,
}

impl CommandType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Map a discriminant byte back to its command.
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(CommandType::Step),
            0x01 => Ok(CommandType::Ramp),
            0x02 => Ok(CommandType::Percent),
            other => Err(FrameError::UnknownCommand(other)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CommandType::Step => "step",
            CommandType::Ramp => "ramp",
            CommandType::Percent => "percent",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 3-byte outbound frame.
///
/// Wire format:
/// ```text
/// ┌──────────────────┬───────────────┬────────────────┐
/// │ Selector/Status  │ Discriminant  │ Sub-parameter  │
/// │ (1B)             │ (1B)          │ (1B, reserved) │
/// └──────────────────┴───────────────┴────────────────┘
/// ```
///
/// The first byte is a device selector for [`encode_command`] and a direct
/// status value for [`encode_status`]. The peripheral firmware overloads the
/// same layout for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandFrame([u8; COMMAND_FRAME_LEN]);

impl CommandFrame {
    /// Peripheral-side view of a received command frame.
    ///
    /// Reads the first [`COMMAND_FRAME_LEN`] bytes; fails with
    /// [`FrameError::TruncatedFrame`] on shorter input.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        match bytes.get(..COMMAND_FRAME_LEN) {
            Some(&[first, second, third]) => Ok(Self([first, second, third])),
            _ => Err(FrameError::TruncatedFrame {
                field: 0,
                needed: COMMAND_FRAME_LEN,
                available: bytes.len(),
            }),
        }
    }

    pub fn as_bytes(&self) -> &[u8; COMMAND_FRAME_LEN] {
        &self.0
    }

    /// Device selector, or the status value for status frames.
    pub fn selector(&self) -> u8 {
        self.0[0]
    }

    pub fn discriminant(&self) -> u8 {
        self.0[1]
    }

    pub fn sub_parameter(&self) -> u8 {
        self.0[2]
    }

    /// `(selector_or_status, discriminant, sub_parameter)`.
    pub fn triple(&self) -> (u8, u8, u8) {
        (self.0[0], self.0[1], self.0[2])
    }

    /// Append the frame to a buffer.
    pub fn encode_into(&self, dst: &mut BytesMut) {
        dst.reserve(COMMAND_FRAME_LEN);
        dst.put_slice(&self.0);
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<CommandFrame> for [u8; COMMAND_FRAME_LEN] {
    fn from(frame: CommandFrame) -> Self {
        frame.0
    }
}

/// Encode `command` for the peripheral identified by `selector`, with the
/// reserved sub-parameter left at its default.
pub fn encode_command(selector: u8, command: CommandType) -> CommandFrame {
    encode_command_with(selector, command, RESERVED_SUB_PARAMETER)
}

/// Encode `command` with an explicit sub-parameter byte.
pub fn encode_command_with(selector: u8, command: CommandType, sub_parameter: u8) -> CommandFrame {
    trace!(selector, %command, sub_parameter, "encoding command");
    CommandFrame([selector, command.as_u8(), sub_parameter])
}

/// Encode a direct status change: `[status, 0x00, 0x00]`.
pub fn encode_status(status: u8) -> CommandFrame {
    trace!(status, "encoding status change");
    CommandFrame([status, 0x00, RESERVED_SUB_PARAMETER])
}
