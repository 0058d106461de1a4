use tracing::debug;

use crate::codec::FrameDecoder;
use crate::error::Result;
use crate::sample::Sample;

/// Splits one transport buffer into the sub-frames of several features.
///
/// Sub-frames are packed back to back in decoder order. Each decoder's
/// consumed byte count advances the cursor for the next one.
#[derive(Debug, Clone, Default)]
pub struct MultiplexReader {
    decoders: Vec<FrameDecoder>,
}

impl MultiplexReader {
    /// Create a reader for the given decoders, in wire order.
    pub fn new(decoders: Vec<FrameDecoder>) -> Self {
        Self { decoders }
    }

    /// Append a decoder to the end of the wire order.
    pub fn push(&mut self, decoder: FrameDecoder) {
        self.decoders.push(decoder);
    }

    pub fn decoders(&self) -> &[FrameDecoder] {
        &self.decoders
    }

    /// Bytes a complete multiplexed buffer occupies.
    pub fn frame_width(&self) -> usize {
        self.decoders.iter().map(FrameDecoder::frame_width).sum()
    }

    /// Decode every sub-frame starting at `offset`.
    ///
    /// Returns one sample per decoder plus the total bytes consumed. Any
    /// truncated sub-frame fails the whole buffer; no samples are returned.
    pub fn read(&self, timestamp: u64, raw: &[u8], offset: usize) -> Result<(Vec<Sample>, usize)> {
        let mut cursor = offset;
        let mut samples = Vec::with_capacity(self.decoders.len());

        for decoder in &self.decoders {
            let (sample, consumed) = decoder.decode(timestamp, raw, cursor)?;
            cursor += consumed;
            samples.push(sample);
        }

        let consumed = cursor - offset;
        if raw.len() > cursor {
            debug!(
                trailing = raw.len() - cursor,
                "multiplexed buffer has trailing bytes"
            );
        }
        Ok((samples, consumed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use crate::field::{FieldDescriptor, FieldType};
    use crate::sample::SampleValue;

    fn decoder(field_type: FieldType) -> FrameDecoder {
        FrameDecoder::new(vec![
            FieldDescriptor::new("v", "u", field_type, -1e9, 1e9).unwrap()
        ])
        .unwrap()
    }

    #[test]
    fn reads_back_to_back_sub_frames() {
        let status = FrameDecoder::status_only(vec![FieldDescriptor::new(
            "s",
            "",
            FieldType::UInt8,
            0.0,
            255.0,
        )
        .unwrap()])
        .unwrap();
        let reader = MultiplexReader::new(vec![
            decoder(FieldType::UInt16),
            status,
            decoder(FieldType::Int8),
        ]);

        let raw = [0x10, 0x00, 0xFF];
        let (samples, consumed) = reader.read(100, &raw, 0).unwrap();

        assert_eq!(consumed, 3);
        assert_eq!(reader.frame_width(), 3);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].get(0), Some(16.0));
        assert_eq!(samples[1].values(), &[SampleValue::Absent]);
        assert_eq!(samples[2].get(0), Some(-1.0));
        assert!(samples.iter().all(|sample| sample.timestamp() == 100));
    }

    #[test]
    fn truncated_tail_fails_whole_buffer() {
        let mut reader = MultiplexReader::default();
        reader.push(decoder(FieldType::UInt8));
        reader.push(decoder(FieldType::Int32));

        let err = reader.read(0, &[0x01, 0x02, 0x03], 0).unwrap_err();
        assert!(matches!(err, FrameError::TruncatedFrame { field: 0, .. }));
    }

    #[test]
    fn respects_start_offset() {
        let reader = MultiplexReader::new(vec![decoder(FieldType::UInt8)]);
        let (samples, consumed) = reader.read(0, &[0xEE, 0x07], 1).unwrap();
        assert_eq!(consumed, 1);
        assert_eq!(samples[0].get(0), Some(7.0));
    }
}
