//! Block encoder capability and the PCM adaptation layer.
//!
//! The lossy bitstream encoder itself is external; this module defines the
//! capability it is injected through and adapts floating-point buffers to
//! its fixed-size 16-bit block interface.

use crate::audio::buffer::SampleBuffer;
use crate::defaults::{ENCODER_BLOCK_SIZE, PCM_SCALE};
use crate::error::Result;

/// A codec component that compresses audio in fixed-size sample groups.
///
/// `flush` must be called after the final block to emit trailing data; it
/// leaves the encoder ready for a new stream, so one injected encoder can
/// serve sequential pipeline invocations.
pub trait BlockEncoder: Send {
    /// Compress one block of 16-bit PCM. `right` is `None` for mono input.
    /// Returns the compressed fragment, which may be empty while the
    /// encoder accumulates internal state.
    fn encode_block(&mut self, left: &[i16], right: Option<&[i16]>) -> Result<Vec<u8>>;

    /// Drain the encoder's internal state at end of stream.
    fn flush(&mut self) -> Result<Vec<u8>>;

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "encoder"
    }
}

/// Convert floating-point samples to 16-bit PCM.
///
/// Samples are clamped to [-1.0, 1.0] and scaled by 32767; the cast
/// truncates toward zero.
pub fn pcm_to_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * PCM_SCALE) as i16)
        .collect()
}

/// Feed a buffer through the block encoder and collect the compressed
/// byte stream.
///
/// Channels are converted to 16-bit PCM and fed in lockstep,
/// `ENCODER_BLOCK_SIZE` samples per channel at a time (the last block may
/// be shorter), followed by a flush. Mono input omits the right-channel
/// argument; channels beyond the second are ignored because the target
/// codec carries at most two.
pub fn encode_buffer(buffer: &SampleBuffer, encoder: &mut dyn BlockEncoder) -> Result<Vec<u8>> {
    let pcm: Vec<Vec<i16>> = buffer.channels().iter().map(|c| pcm_to_i16(c)).collect();

    log::debug!(
        "encoding {} samples x {} channel(s) via {}",
        buffer.len(),
        buffer.channel_count(),
        encoder.name()
    );

    let mut output = Vec::new();
    let length = buffer.len();
    let mut offset = 0;

    while offset < length {
        let end = (offset + ENCODER_BLOCK_SIZE).min(length);
        let left = &pcm[0][offset..end];
        let right = pcm.get(1).map(|channel| &channel[offset..end]);

        let fragment = encoder.encode_block(left, right)?;
        if !fragment.is_empty() {
            output.extend_from_slice(&fragment);
        }
        offset = end;
    }

    let tail = encoder.flush()?;
    if !tail.is_empty() {
        output.extend_from_slice(&tail);
    }

    Ok(output)
}
