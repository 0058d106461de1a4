use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use sensorfeat_frame::{CommandFrame, CommandType, FieldDescriptor, Sample};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FieldOutput<'a> {
    name: &'a str,
    unit: &'a str,
    #[serde(rename = "type")]
    field_type: &'a str,
    width: usize,
    min: f64,
    max: f64,
}

impl<'a> From<&'a FieldDescriptor> for FieldOutput<'a> {
    fn from(field: &'a FieldDescriptor) -> Self {
        Self {
            name: field.name(),
            unit: field.unit(),
            field_type: field.field_type().as_str(),
            width: field.byte_width(),
            min: field.min(),
            max: field.max(),
        }
    }
}

#[derive(Serialize)]
struct ValueOutput<'a> {
    name: &'a str,
    unit: &'a str,
    value: Option<f64>,
    in_range: Option<bool>,
}

#[derive(Serialize)]
struct SampleOutput<'a> {
    schema_id: &'a str,
    feature: &'a str,
    timestamp: u64,
    consumed: usize,
    values: Vec<ValueOutput<'a>>,
}

#[derive(Serialize)]
struct CommandOutput<'a> {
    schema_id: &'a str,
    bytes: String,
    selector: u8,
    discriminant: u8,
    command: Option<&'a str>,
    sub_parameter: u8,
    written: Option<bool>,
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    schema_id: &'a str,
    feature: &'a str,
    frame_width: usize,
    fields: Vec<FieldOutput<'a>>,
}

pub fn print_sample(feature: &str, sample: &Sample, consumed: usize, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = SampleOutput {
                schema_id: "https://schemas.3leaps.dev/sensorfeat/cli/v1/sample-decoded.schema.json",
                feature,
                timestamp: sample.timestamp(),
                consumed,
                values: sample
                    .iter()
                    .map(|(field, value)| ValueOutput {
                        name: field.name(),
                        unit: field.unit(),
                        value: value.as_f64(),
                        in_range: value.as_f64().map(|v| field.is_in_range(v)),
                    })
                    .collect(),
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "UNIT", "VALUE", "RANGE"]);
            for (field, value) in sample.iter() {
                table.add_row(vec![
                    field.name().to_string(),
                    field.unit().to_string(),
                    value.to_string(),
                    format!("[{}, {}]", field.min(), field.max()),
                ]);
            }
            println!("{table}");
            println!("feature={feature} timestamp={} consumed={consumed}", sample.timestamp());
        }
        OutputFormat::Pretty => {
            let values: Vec<String> = sample
                .iter()
                .map(|(field, value)| format!("{}={}{}", field.name(), value, field.unit()))
                .collect();
            println!(
                "feature={feature} timestamp={} consumed={consumed} {}",
                sample.timestamp(),
                values.join(" ")
            );
        }
        OutputFormat::Raw => {
            let line: Vec<String> = sample.values().iter().map(ToString::to_string).collect();
            println!("{}", line.join(","));
        }
    }
}

/// `written` is `None` when the command has no sink option (`inspect`).
pub fn print_command(frame: &CommandFrame, written: Option<bool>, format: OutputFormat) {
    let command = CommandType::from_u8(frame.discriminant())
        .ok()
        .map(CommandType::name);
    match format {
        OutputFormat::Json => {
            let out = CommandOutput {
                schema_id: "https://schemas.3leaps.dev/sensorfeat/cli/v1/command-frame.schema.json",
                bytes: hex::encode(frame.as_bytes()),
                selector: frame.selector(),
                discriminant: frame.discriminant(),
                command,
                sub_parameter: frame.sub_parameter(),
                written,
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["BYTES", "SELECTOR", "COMMAND", "SUB", "WRITTEN"])
                .add_row(vec![
                    hex::encode(frame.as_bytes()),
                    format!("0x{:02x}", frame.selector()),
                    command.unwrap_or("unknown").to_string(),
                    format!("0x{:02x}", frame.sub_parameter()),
                    written.map_or_else(|| "-".to_string(), |w| w.to_string()),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "bytes={} selector=0x{:02x} command={} sub=0x{:02x}",
                hex::encode(frame.as_bytes()),
                frame.selector(),
                command.unwrap_or("unknown"),
                frame.sub_parameter()
            );
        }
        OutputFormat::Raw => print_raw(frame.as_bytes()),
    }
}

pub fn print_layout(
    feature: &str,
    fields: &[FieldDescriptor],
    frame_width: usize,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = LayoutOutput {
                schema_id: "https://schemas.3leaps.dev/sensorfeat/cli/v1/feature-layout.schema.json",
                feature,
                frame_width,
                fields: fields.iter().map(FieldOutput::from).collect(),
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "FIELD", "UNIT", "TYPE", "WIDTH", "MIN", "MAX"]);
            for (index, field) in fields.iter().enumerate() {
                table.add_row(vec![
                    index.to_string(),
                    field.name().to_string(),
                    field.unit().to_string(),
                    field.field_type().to_string(),
                    field.byte_width().to_string(),
                    field.min().to_string(),
                    field.max().to_string(),
                ]);
            }
            println!("{table}");
            println!("feature={feature} frame_width={frame_width}");
        }
        OutputFormat::Pretty => {
            println!("feature={feature} frame_width={frame_width}");
            for field in fields {
                println!("  {field}");
            }
        }
        OutputFormat::Raw => {
            for line in layout_raw_lines(fields) {
                println!("{line}");
            }
        }
    }
}

/// One `name,unit,type,min,max` line per field.
fn layout_raw_lines(fields: &[FieldDescriptor]) -> Vec<String> {
    fields
        .iter()
        .map(|field| {
            format!(
                "{},{},{},{},{}",
                field.name(),
                field.unit(),
                field.field_type().as_str(),
                field.min(),
                field.max()
            )
        })
        .collect()
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

#[cfg(test)]
mod tests {
    use sensorfeat_frame::FieldType;

    use super::*;

    #[test]
    fn raw_layout_lines_are_csv_per_field() {
        let fields = vec![
            FieldDescriptor::new("milli-Ampere", "mA", FieldType::UInt16, 0.0, 4095.0).unwrap(),
            FieldDescriptor::new("temperature", "C", FieldType::Int16, -400.0, 1200.0).unwrap(),
        ];
        assert_eq!(
            layout_raw_lines(&fields),
            vec![
                "milli-Ampere,mA,uint16,0,4095".to_string(),
                "temperature,C,int16,-400,1200".to_string(),
            ]
        );
    }
}
