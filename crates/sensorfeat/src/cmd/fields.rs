use crate::cmd::{load_layout, FieldsArgs};
use crate::exit::{feature_error, CliResult, SUCCESS};
use crate::output::{print_layout, OutputFormat};

pub fn run(args: FieldsArgs, format: OutputFormat) -> CliResult<i32> {
    let builder = load_layout(args.layout.as_ref())?;
    let decoder = builder
        .build_decoder()
        .map_err(|err| feature_error("layout invalid", err))?;
    print_layout(builder.name(), decoder.fields(), decoder.frame_width(), format);
    Ok(SUCCESS)
}
