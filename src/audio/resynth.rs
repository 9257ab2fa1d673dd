//! Pause resynthesis.
//!
//! Rebuilds a waveform from its speech chunks with every inter-speech gap
//! rescaled by the pause multiplier. The destination buffer is
//! zero-initialized, so silence needs no explicit writing pass.

use crate::audio::buffer::SampleBuffer;
use crate::audio::segmenter::SpeechChunk;
use crate::config::Settings;
use crate::error::{RepaceError, Result};

/// Build a new buffer whose pauses are scaled by `settings.pause_multiplier`.
///
/// Each chunk contributes `(end - start) * (1 + multiplier)` samples to the
/// output: the speech itself plus a scaled trailing pause. The write cursor
/// accumulates in f64 and rounds only at the point of writing, bounding
/// cumulative drift to under one sample per chunk boundary. Cursor
/// arithmetic runs identically for every channel, so the stereo image stays
/// aligned.
///
/// Fails with `NoSpeechDetected` if `chunks` is empty and with
/// `EmptyResynthesis` if the computed output length is not positive.
pub fn resynthesize(
    buffer: &SampleBuffer,
    chunks: &[SpeechChunk],
    settings: Settings,
) -> Result<SampleBuffer> {
    if chunks.is_empty() {
        return Err(RepaceError::NoSpeechDetected);
    }
    for chunk in chunks {
        if chunk.start >= chunk.end || chunk.end > buffer.len() {
            return Err(RepaceError::InvalidBuffer {
                message: format!(
                    "chunk {}..{} out of range for buffer of {} samples",
                    chunk.start,
                    chunk.end,
                    buffer.len()
                ),
            });
        }
    }

    let stretch = 1.0 + settings.pause_multiplier as f64;
    let total: f64 = chunks.iter().map(|c| c.len() as f64 * stretch).sum();
    let output_len = total.ceil() as usize;
    if output_len == 0 {
        return Err(RepaceError::EmptyResynthesis { samples: 0 });
    }

    log::debug!(
        "resynthesizing {} chunk(s) with multiplier {}: {} -> {} samples",
        chunks.len(),
        settings.pause_multiplier,
        buffer.len(),
        output_len
    );

    let mut output = SampleBuffer::zeroed(buffer.channel_count(), output_len, buffer.sample_rate())?;

    for (channel_index, destination) in output.channels_mut().iter_mut().enumerate() {
        let source = buffer.channel(channel_index);
        let mut cursor = 0.0f64;

        for chunk in chunks {
            let write_at = cursor.round() as usize;
            let copy_len = chunk.len().min(output_len.saturating_sub(write_at));
            destination[write_at..write_at + copy_len]
                .copy_from_slice(&source[chunk.start..chunk.start + copy_len]);
            cursor += chunk.len() as f64 * stretch;
        }
    }

    Ok(output)
}
