use sensorfeat_frame::CommandFrame;

use crate::cmd::{parse_hex, InspectArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_command, OutputFormat};

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let raw = parse_hex(&args.hex)?;
    let frame = CommandFrame::parse(&raw).map_err(|err| frame_error("inspect failed", err))?;
    if raw.len() > frame.as_bytes().len() {
        tracing::warn!(trailing = raw.len() - frame.as_bytes().len(), "ignoring trailing bytes");
    }
    print_command(&frame, None, format);
    Ok(SUCCESS)
}
