use std::time::{SystemTime, UNIX_EPOCH};

use sensorfeat_frame::DecodeConfig;

use crate::cmd::{load_layout, parse_hex, DecodeArgs};
use crate::exit::{feature_error, frame_error, CliResult, SUCCESS};
use crate::output::{print_sample, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let raw = parse_hex(&args.hex)?;
    let mut builder = load_layout(args.layout.as_ref())?;
    if let Some(policy) = args.range_policy {
        builder = builder.decode_config(DecodeConfig {
            range_policy: policy.into(),
        });
    }
    let decoder = builder
        .build_decoder()
        .map_err(|err| feature_error("layout invalid", err))?;

    let timestamp = args.timestamp.unwrap_or_else(now_millis);
    let (sample, consumed) = decoder
        .decode(timestamp, &raw, args.offset)
        .map_err(|err| frame_error("decode failed", err))?;

    tracing::debug!(feature = builder.name(), consumed, "decoded sample");
    print_sample(builder.name(), &sample, consumed, format);
    Ok(SUCCESS)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
