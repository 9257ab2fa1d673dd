//! Audio decoding capability.
//!
//! The pipeline treats decoding as an external call: anything that can turn
//! a compressed file's bytes into per-channel floating-point samples can be
//! injected. The crate ships a WAV decoder for the uncompressed input
//! family; lossy-format decoders are supplied by the caller.

use crate::audio::buffer::SampleBuffer;
use crate::error::{RepaceError, Result};
use async_trait::async_trait;
use std::io::Cursor;

/// Decoding capability injected into the pipelines.
///
/// Implementations must not mutate shared state; each call produces a
/// fresh, exclusively-owned buffer.
#[async_trait]
pub trait AudioDecoder: Send + Sync {
    /// Decode a complete file's bytes into a sample buffer.
    async fn decode(&self, bytes: &[u8]) -> Result<SampleBuffer>;

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "decoder"
    }
}

/// WAV decoder for the uncompressed linear input family.
///
/// Preserves the source's sample rate and channel layout; no resampling or
/// downmixing (rate mismatches are the merger's concern, and it rejects
/// them).
#[derive(Debug, Clone, Copy, Default)]
pub struct WavDecoder;

#[async_trait]
impl AudioDecoder for WavDecoder {
    async fn decode(&self, bytes: &[u8]) -> Result<SampleBuffer> {
        let mut reader = hound::WavReader::new(Cursor::new(bytes)).map_err(|e| {
            RepaceError::DecodeFailure {
                message: format!("failed to parse WAV file: {}", e),
            }
        })?;

        let spec = reader.spec();
        let channel_count = spec.channels as usize;
        if channel_count == 0 {
            return Err(RepaceError::DecodeFailure {
                message: "WAV file declares zero channels".to_string(),
            });
        }

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>(),
            hound::SampleFormat::Int => {
                // Scale by 2^(bits-1) so full scale maps to [-1.0, 1.0].
                let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<std::result::Result<Vec<_>, _>>()
            }
        }
        .map_err(|e| RepaceError::DecodeFailure {
            message: format!("failed to read WAV samples: {}", e),
        })?;

        if interleaved.is_empty() {
            return Err(RepaceError::DecodeFailure {
                message: "WAV file contains no samples".to_string(),
            });
        }

        let mut channels = vec![Vec::with_capacity(interleaved.len() / channel_count); channel_count];
        for frame in interleaved.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }

        log::debug!(
            "decoded WAV: {} channel(s), {} Hz, {} samples/channel",
            channel_count,
            spec.sample_rate,
            channels[0].len()
        );

        SampleBuffer::from_channels(channels, spec.sample_rate)
    }

    fn name(&self) -> &'static str {
        "wav"
    }
}
