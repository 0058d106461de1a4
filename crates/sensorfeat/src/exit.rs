use std::fmt;
use std::io;

use sensorfeat_feature::FeatureError;
use sensorfeat_frame::FrameError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::TruncatedFrame { .. }
        | FrameError::OutOfRange { .. }
        | FrameError::UnknownCommand(_) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        FrameError::InvalidFieldLayout(_) | FrameError::InvalidRange { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
    }
}

pub fn feature_error(context: &str, err: FeatureError) -> CliError {
    match err {
        FeatureError::Frame(err) => frame_error(context, err),
        FeatureError::Config(_) | FeatureError::Json(_) => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_data_invalid() {
        let err = frame_error(
            "decode",
            FrameError::TruncatedFrame {
                field: 0,
                needed: 2,
                available: 1,
            },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("decode: truncated frame"));
    }

    #[test]
    fn layout_errors_are_usage() {
        let err = feature_error("layout", FeatureError::Config("missing".to_string()));
        assert_eq!(err.code, USAGE);
        let err = feature_error(
            "layout",
            FeatureError::Frame(FrameError::InvalidFieldLayout("empty".to_string())),
        );
        assert_eq!(err.code, USAGE);
    }
}
