//! `tokio_util::codec` adapter for a continuous byte stream carrying one
//! feature's sub-frames back to back.

use std::time::Instant;

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::debug;

use crate::codec::FrameDecoder;
use crate::command::CommandFrame;
use crate::error::{FrameError, Result};
use crate::sample::Sample;

/// Decodes [`Sample`]s from a stream and encodes [`CommandFrame`]s onto it.
///
/// A short buffer is not an error here: the codec waits for more bytes.
/// A partial sub-frame left over when the stream ends is dropped and logged
/// at debug level, so the stream finishes cleanly after the last whole
/// sample. Timestamps are milliseconds since the codec was created.
#[derive(Debug)]
pub struct SampleCodec {
    decoder: FrameDecoder,
    width: usize,
    started: Instant,
}

impl SampleCodec {
    /// Wrap a decoder. Status-only layouts carry no bytes and cannot be
    /// delimited on a stream, so they are rejected.
    pub fn new(decoder: FrameDecoder) -> Result<Self> {
        let width = decoder.frame_width();
        if width == 0 {
            return Err(FrameError::InvalidFieldLayout(
                "stream codec needs a layout with a non-zero wire width".to_string(),
            ));
        }
        Ok(Self {
            decoder,
            width,
            started: Instant::now(),
        })
    }

    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }

    fn now_millis(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Decoder for SampleCodec {
    type Item = Sample;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Sample>> {
        if src.len() < self.width {
            src.reserve(self.width - src.len());
            return Ok(None);
        }

        match self.decoder.decode(self.now_millis(), &src[..], 0) {
            Ok((sample, consumed)) => {
                src.advance(consumed);
                Ok(Some(sample))
            }
            Err(FrameError::TruncatedFrame { .. }) => Ok(None),
            Err(err) => {
                // Drop the offending sub-frame so the next call starts aligned.
                debug!(error = %err, "discarding undecodable sub-frame");
                src.advance(self.width);
                Err(err)
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Sample>> {
        if let Some(sample) = self.decode(src)? {
            return Ok(Some(sample));
        }
        if !src.is_empty() {
            debug!(
                remaining = src.len(),
                width = self.width,
                "dropping partial sub-frame at end of stream"
            );
            src.clear();
        }
        Ok(None)
    }
}

impl Encoder<CommandFrame> for SampleCodec {
    type Error = FrameError;

    fn encode(&mut self, item: CommandFrame, dst: &mut BytesMut) -> Result<()> {
        item.encode_into(dst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;
    use tokio_util::codec::FramedRead;

    use super::*;
    use crate::command::encode_status;
    use crate::config::{DecodeConfig, RangePolicy};
    use crate::field::{FieldDescriptor, FieldType};

    fn current_decoder() -> FrameDecoder {
        FrameDecoder::new(vec![FieldDescriptor::new(
            "milli-Ampere",
            "mA",
            FieldType::UInt16,
            0.0,
            4095.0,
        )
        .unwrap()])
        .unwrap()
    }

    #[test]
    fn waits_for_complete_sub_frame() {
        let mut codec = SampleCodec::new(current_decoder()).unwrap();
        let mut buf = BytesMut::from(&[0x10][..]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(&[0x00, 0x20]);
        let sample = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(sample.get(0), Some(16.0));
        assert_eq!(buf.as_ref(), &[0x20]);
    }

    #[test]
    fn rejects_status_only_layout() {
        let decoder = FrameDecoder::status_only(current_decoder().fields().clone()).unwrap();
        let err = SampleCodec::new(decoder).unwrap_err();
        assert!(matches!(err, FrameError::InvalidFieldLayout(_)));
    }

    #[test]
    fn rejected_value_skips_sub_frame() {
        let decoder = current_decoder().with_config(DecodeConfig {
            range_policy: RangePolicy::Reject,
        });
        let mut codec = SampleCodec::new(decoder).unwrap();
        let mut buf = BytesMut::from(&[0xFF, 0xFF, 0x01, 0x00][..]);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(FrameError::OutOfRange { .. })
        ));
        let sample = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(sample.get(0), Some(1.0));
    }

    #[test]
    fn encodes_command_frames() {
        let mut codec = SampleCodec::new(current_decoder()).unwrap();
        let mut dst = BytesMut::new();
        codec.encode(encode_status(0x03), &mut dst).unwrap();
        assert_eq!(dst.as_ref(), &[0x03, 0x00, 0x00]);
    }

    #[tokio::test]
    async fn framed_read_yields_samples_in_order() {
        let raw: &[u8] = &[0x01, 0x00, 0x02, 0x00, 0xFF, 0x0F];
        let codec = SampleCodec::new(current_decoder()).unwrap();
        let mut framed = FramedRead::new(raw, codec);

        let mut values = Vec::new();
        let mut last_timestamp = 0;
        while let Some(sample) = framed.next().await {
            let sample = sample.unwrap();
            assert!(sample.timestamp() >= last_timestamp);
            last_timestamp = sample.timestamp();
            values.push(sample.get(0).unwrap());
        }

        assert_eq!(values, vec![1.0, 2.0, 4095.0]);
    }

    #[tokio::test]
    async fn framed_read_ends_cleanly_on_partial_tail() {
        let raw: &[u8] = &[0x01, 0x00, 0x02];
        let codec = SampleCodec::new(current_decoder()).unwrap();
        let mut framed = FramedRead::new(raw, codec);

        let first = framed.next().await.unwrap().unwrap();
        assert_eq!(first.get(0), Some(1.0));
        assert!(framed.next().await.is_none());
    }

    #[test]
    fn decode_eof_discards_leftover_bytes() {
        let mut codec = SampleCodec::new(current_decoder()).unwrap();
        let mut buf = BytesMut::from(&[0x07][..]);
        assert!(codec.decode_eof(&mut buf).unwrap().is_none());
        assert!(buf.is_empty());
    }
}
