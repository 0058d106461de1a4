use std::io::Read;
use std::path::Path;

use sensorfeat_frame::{DecodeConfig, FieldDescriptor, FieldType, FrameError, FrameLayout};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::FeatureBuilder;
use crate::error::{FeatureError, Result};

/// Largest layout file accepted by [`LayoutConfig::from_path`].
pub const DEFAULT_MAX_LAYOUT_FILE_SIZE: usize = 64 * 1024;

/// One field entry of a layout file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub min: f64,
    pub max: f64,
}

impl FieldConfig {
    pub fn to_descriptor(&self) -> Result<FieldDescriptor> {
        Ok(FieldDescriptor::new(
            self.name.clone(),
            self.unit.clone(),
            self.field_type,
            self.min,
            self.max,
        )?)
    }
}

impl From<&FieldDescriptor> for FieldConfig {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name().to_string(),
            unit: field.unit().to_string(),
            field_type: field.field_type(),
            min: field.min(),
            max: field.max(),
        }
    }
}

/// A feature layout described in JSON.
///
/// ```json
/// {
///   "name": "Accelerometer",
///   "decode": { "range_policy": "clamp" },
///   "fields": [
///     { "name": "X", "unit": "mg", "type": "int16", "min": -2000, "max": 2000 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub name: String,
    #[serde(default)]
    pub status_only: bool,
    #[serde(default)]
    pub decode: DecodeConfig,
    pub fields: Vec<FieldConfig>,
}

impl LayoutConfig {
    /// Parse a layout from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a layout file, capped at [`DEFAULT_MAX_LAYOUT_FILE_SIZE`].
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_path_with_limit(path, DEFAULT_MAX_LAYOUT_FILE_SIZE)
    }

    /// Load a layout file with an explicit size cap.
    pub fn from_path_with_limit(path: &Path, max_bytes: usize) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|err| FeatureError::Config(format!("{}: {err}", path.display())))?;
        let metadata = file
            .metadata()
            .map_err(|err| FeatureError::Config(format!("{}: {err}", path.display())))?;
        if !metadata.is_file() {
            return Err(FeatureError::Config(format!(
                "not a regular file: {}",
                path.display()
            )));
        }
        if metadata.len() > max_bytes as u64 {
            return Err(FeatureError::Config(format!(
                "layout file too large ({} bytes, max {max_bytes}): {}",
                metadata.len(),
                path.display()
            )));
        }

        let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
        let mut content = String::new();
        file.take(read_limit)
            .read_to_string(&mut content)
            .map_err(|err| FeatureError::Config(format!("{}: {err}", path.display())))?;
        if content.len() > max_bytes {
            return Err(FeatureError::Config(format!(
                "layout file too large while reading: {}",
                path.display()
            )));
        }

        debug!(path = %path.display(), "loaded layout file");
        Self::from_json(&content)
    }

    /// Validated descriptors, in wire order.
    pub fn descriptors(&self) -> Result<Vec<FieldDescriptor>> {
        self.fields.iter().map(FieldConfig::to_descriptor).collect()
    }

    /// A builder carrying this layout.
    pub fn builder(&self) -> Result<FeatureBuilder> {
        let mut descriptors = self.descriptors()?.into_iter();
        let base = descriptors.next().ok_or_else(|| {
            FrameError::InvalidFieldLayout(format!("{}: layout has no fields", self.name))
        })?;
        let layout = if self.status_only {
            FrameLayout::StatusOnly
        } else {
            FrameLayout::Fields
        };
        Ok(FeatureBuilder::new(self.name.clone(), base)
            .fields(descriptors)
            .layout(layout)
            .decode_config(self.decode))
    }
}
