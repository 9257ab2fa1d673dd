//! Buffer merging.
//!
//! Validates that a set of independently-decoded buffers is compatible and
//! concatenates them in input order. Order is significant and
//! caller-controlled; validation happens before any copying so a mismatch
//! never produces partial output.

use crate::audio::buffer::SampleBuffer;
use crate::error::{RepaceError, Result};

/// Concatenate two or more buffers in input order.
///
/// Every buffer after the first must match the first's sample rate and
/// channel count exactly; mismatches fail with the offending and expected
/// values named. Sample rates are never converted.
pub fn merge(buffers: &[SampleBuffer]) -> Result<SampleBuffer> {
    if buffers.len() < 2 {
        return Err(RepaceError::InvalidInputCount {
            count: buffers.len(),
        });
    }

    let first = &buffers[0];
    validate_compatible(first, &buffers[1..])?;

    let total_len: usize = buffers.iter().map(SampleBuffer::len).sum();
    log::debug!(
        "merging {} buffers into {} samples at {} Hz",
        buffers.len(),
        total_len,
        first.sample_rate()
    );

    let mut output = SampleBuffer::zeroed(first.channel_count(), total_len, first.sample_rate())?;

    for (channel_index, destination) in output.channels_mut().iter_mut().enumerate() {
        let mut offset = 0;
        for buffer in buffers {
            let source = buffer.channel(channel_index);
            destination[offset..offset + source.len()].copy_from_slice(source);
            offset += source.len();
        }
    }

    Ok(output)
}

/// Fail-fast compatibility check against the first buffer.
fn validate_compatible(first: &SampleBuffer, rest: &[SampleBuffer]) -> Result<()> {
    for buffer in rest {
        if buffer.sample_rate() != first.sample_rate() {
            return Err(RepaceError::SampleRateMismatch {
                expected: first.sample_rate(),
                actual: buffer.sample_rate(),
            });
        }
        if buffer.channel_count() != first.channel_count() {
            return Err(RepaceError::ChannelCountMismatch {
                expected: first.channel_count(),
                actual: buffer.channel_count(),
            });
        }
    }
    Ok(())
}
