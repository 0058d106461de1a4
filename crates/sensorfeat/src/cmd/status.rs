use sensorfeat_frame::encode_status;

use crate::cmd::command::write_frame;
use crate::cmd::StatusArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_command, OutputFormat};

pub fn run(args: StatusArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = encode_status(args.value);
    if let Some(path) = &args.write {
        write_frame(path, frame)?;
    }
    print_command(&frame, Some(args.write.is_some()), format);
    Ok(SUCCESS)
}
