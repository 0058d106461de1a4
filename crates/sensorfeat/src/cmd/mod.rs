use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use sensorfeat_feature::{current_source, FeatureBuilder, LayoutConfig};
use sensorfeat_frame::{CommandType, RangePolicy};

use crate::exit::{feature_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod command;
pub mod decode;
pub mod fields;
pub mod inspect;
pub mod status;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode one feature sub-frame from hex.
    Decode(DecodeArgs),
    /// Encode a current-source waveform command.
    Command(CommandArgs),
    /// Encode a direct status change.
    Status(StatusArgs),
    /// Show the peripheral-side view of a command frame.
    Inspect(InspectArgs),
    /// Print the field layout of a feature.
    Fields(FieldsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Command(args) => command::run(args, format),
        Command::Status(args) => status::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Fields(args) => fields::run(args, format),
        Command::Version(args) => version::run(args, format),
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum RangePolicyArg {
    PassThrough,
    Clamp,
    Reject,
}

impl From<RangePolicyArg> for RangePolicy {
    fn from(arg: RangePolicyArg) -> Self {
        match arg {
            RangePolicyArg::PassThrough => RangePolicy::PassThrough,
            RangePolicyArg::Clamp => RangePolicy::Clamp,
            RangePolicyArg::Reject => RangePolicy::Reject,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum CommandKind {
    Step,
    Ramp,
    Percent,
}

impl From<CommandKind> for CommandType {
    fn from(kind: CommandKind) -> Self {
        match kind {
            CommandKind::Step => CommandType::Step,
            CommandKind::Ramp => CommandType::Ramp,
            CommandKind::Percent => CommandType::Percent,
        }
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Inbound buffer as hex (spaces and colons allowed).
    #[arg(long)]
    pub hex: String,
    /// Layout file (JSON). Default: the current-source feature.
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,
    /// Byte offset of this feature's sub-frame within the buffer.
    #[arg(long, default_value = "0")]
    pub offset: usize,
    /// Sample timestamp. Default: milliseconds since the Unix epoch.
    #[arg(long)]
    pub timestamp: Option<u64>,
    /// Override the layout's out-of-range policy.
    #[arg(long, value_name = "POLICY")]
    pub range_policy: Option<RangePolicyArg>,
}

#[derive(Args, Debug)]
pub struct CommandArgs {
    /// Waveform command.
    pub kind: CommandKind,
    /// Device selector (decimal or 0x-prefixed hex).
    #[arg(long, value_parser = parse_byte)]
    pub device: u8,
    /// Reserved sub-parameter byte.
    #[arg(long, value_parser = parse_byte, default_value = "0")]
    pub sub: u8,
    /// Append the frame to this file instead of only printing it.
    #[arg(long, value_name = "PATH")]
    pub write: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// New status byte (decimal or 0x-prefixed hex).
    #[arg(value_parser = parse_byte)]
    pub value: u8,
    /// Append the frame to this file instead of only printing it.
    #[arg(long, value_name = "PATH")]
    pub write: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Command frame as hex.
    #[arg(long)]
    pub hex: String,
}

#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Layout file (JSON). Default: the current-source feature.
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn parse_byte(input: &str) -> Result<u8, String> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(digits) => u8::from_str_radix(digits, 16),
        None => input.parse::<u8>(),
    };
    parsed.map_err(|err| format!("invalid byte {input:?}: {err}"))
}

pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    let cleaned = cleaned
        .strip_prefix("0x")
        .unwrap_or(cleaned.as_str());
    hex::decode(cleaned).map_err(|err| CliError::new(USAGE, format!("invalid hex input: {err}")))
}

/// Builder for `--layout`, or the current-source layout when absent.
pub fn load_layout(layout: Option<&PathBuf>) -> CliResult<FeatureBuilder> {
    match layout {
        Some(path) => LayoutConfig::from_path(path)
            .and_then(|config| config.builder())
            .map_err(|err| feature_error("layout load failed", err)),
        None => Ok(current_source::layout()),
    }
}
