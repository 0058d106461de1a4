use std::fs::{File, OpenOptions};
use std::path::Path;

use sensorfeat_feature::CurrentSource;
use sensorfeat_frame::{encode_command_with, CommandFrame};
use sensorfeat_transport::{DeviceContext, StreamTransport};

use crate::cmd::CommandArgs;
use crate::exit::{feature_error, io_error, CliError, CliResult, FAILURE, SUCCESS};
use crate::output::{print_command, OutputFormat};

pub fn run(args: CommandArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = encode_command_with(args.device, args.kind.into(), args.sub);
    if let Some(path) = &args.write {
        write_frame(path, frame)?;
    }
    print_command(&frame, Some(args.write.is_some()), format);
    Ok(SUCCESS)
}

/// Send `frame` through a current-source feature bound to a file sink.
pub fn write_frame(path: &Path, frame: CommandFrame) -> CliResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
    let source = open_source(path, file)?;

    if !source.feature().send_frame(frame) {
        return Err(CliError::new(
            FAILURE,
            format!("transport rejected command for {}", path.display()),
        ));
    }
    Ok(())
}

fn open_source(path: &Path, file: File) -> CliResult<CurrentSource<StreamTransport<File>>> {
    let device = DeviceContext::new("cli", path.display().to_string());
    CurrentSource::new(device, StreamTransport::new(file))
        .map_err(|err| feature_error("feature setup failed", err))
}
