use sensorfeat_frame::{DecodeConfig, FieldDescriptor, FrameDecoder, FrameError, FrameLayout};
use sensorfeat_transport::{CommandTransport, DeviceContext};

use crate::error::Result;
use crate::feature::Feature;

/// Validated construction of a [`Feature`].
///
/// A feature starts from a base descriptor and may append any number of
/// extension descriptors. Specialised features that must keep a canonical
/// first field are started with [`FeatureBuilder::extending`].
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    layout: FrameLayout,
    config: DecodeConfig,
}

impl FeatureBuilder {
    /// Start a feature whose first field is `base`.
    pub fn new(name: impl Into<String>, base: FieldDescriptor) -> Self {
        Self {
            name: name.into(),
            fields: vec![base],
            layout: FrameLayout::Fields,
            config: DecodeConfig::default(),
        }
    }

    /// Start from a full field list whose first entry must equal `canonical`.
    ///
    /// Fails with `InvalidFieldLayout` if the list is empty or its first
    /// descriptor differs from `canonical`.
    pub fn extending(
        name: impl Into<String>,
        canonical: &FieldDescriptor,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self> {
        let name = name.into();
        match fields.first() {
            Some(first) if first == canonical => {}
            Some(first) => {
                return Err(FrameError::InvalidFieldLayout(format!(
                    "{name}: first field must be {:?}, found {:?}",
                    canonical.name(),
                    first.name()
                ))
                .into())
            }
            None => {
                return Err(FrameError::InvalidFieldLayout(format!(
                    "{name}: field list is empty, expected {:?} first",
                    canonical.name()
                ))
                .into())
            }
        }
        Ok(Self {
            name,
            fields,
            layout: FrameLayout::Fields,
            config: DecodeConfig::default(),
        })
    }

    /// Append an extension field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several extension fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Mark the feature as carrying no data fields on the wire.
    pub fn status_only(self) -> Self {
        self.layout(FrameLayout::StatusOnly)
    }

    pub fn layout(mut self, layout: FrameLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn decode_config(mut self, config: DecodeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_list(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Build a decoder for the layout without binding a device.
    pub fn build_decoder(&self) -> Result<FrameDecoder> {
        let decoder = FrameDecoder::with_layout(self.fields.clone(), self.layout)?
            .with_config(self.config);
        Ok(decoder)
    }

    /// Bind the layout to a device and transport.
    pub fn build<T: CommandTransport>(
        self,
        device: DeviceContext,
        transport: T,
    ) -> Result<Feature<T>> {
        let decoder = self.build_decoder()?;
        Ok(Feature::from_parts(self.name, device, decoder, transport))
    }
}

#[cfg(test)]
mod tests {
    use sensorfeat_frame::{FieldType, RangePolicy};
    use sensorfeat_transport::MemoryTransport;

    use super::*;
    use crate::error::FeatureError;

    fn base() -> FieldDescriptor {
        FieldDescriptor::new("pressure", "mBar", FieldType::Int32, 0.0, 2000.0).unwrap()
    }

    fn other() -> FieldDescriptor {
        FieldDescriptor::new("temperature", "C", FieldType::Int16, -40.0, 120.0).unwrap()
    }

    #[test]
    fn extending_accepts_canonical_first_field() {
        let builder =
            FeatureBuilder::extending("Pressure+", &base(), vec![base(), other()]).unwrap();
        assert_eq!(builder.field_list().len(), 2);
        let feature = builder
            .build(DeviceContext::new("n", "a"), MemoryTransport::new())
            .unwrap();
        assert_eq!(feature.fields()[0], base());
        assert_eq!(feature.decoder().frame_width(), 6);
    }

    #[test]
    fn extending_rejects_replaced_first_field() {
        let err = FeatureBuilder::extending("Broken", &base(), vec![other(), base()]).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::Frame(FrameError::InvalidFieldLayout(_))
        ));
    }

    #[test]
    fn extending_rejects_empty_list() {
        let err = FeatureBuilder::extending("Empty", &base(), Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::Frame(FrameError::InvalidFieldLayout(_))
        ));
    }

    #[test]
    fn same_name_different_range_is_not_canonical() {
        let narrowed =
            FieldDescriptor::new("pressure", "mBar", FieldType::Int32, 0.0, 1000.0).unwrap();
        assert!(FeatureBuilder::extending("Narrowed", &base(), vec![narrowed]).is_err());
    }

    #[test]
    fn carries_layout_and_config_into_decoder() {
        let config = DecodeConfig {
            range_policy: RangePolicy::Clamp,
        };
        let decoder = FeatureBuilder::new("S", base())
            .fields([other()])
            .status_only()
            .decode_config(config)
            .build_decoder()
            .unwrap();
        assert_eq!(decoder.layout(), FrameLayout::StatusOnly);
        assert_eq!(decoder.config(), &config);
        assert_eq!(decoder.fields().len(), 2);
    }
}
