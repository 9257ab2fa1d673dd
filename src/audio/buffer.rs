//! Multi-channel sample buffer — the common currency between pipeline stages.

use crate::error::{RepaceError, Result};

/// An owned, multi-channel floating-point waveform plus its sample rate.
///
/// All channels have identical length and samples lie in [-1.0, 1.0].
/// Buffers are created by decoding, resynthesis, and merging; once handed
/// to a later pipeline stage a buffer is never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Build a buffer from per-channel sample vectors.
    ///
    /// Fails if there are no channels, channels differ in length, the
    /// buffer is empty, or the sample rate is zero.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(RepaceError::InvalidBuffer {
                message: "sample rate must be positive".to_string(),
            });
        }
        let Some(first) = channels.first() else {
            return Err(RepaceError::InvalidBuffer {
                message: "buffer must have at least one channel".to_string(),
            });
        };
        if first.is_empty() {
            return Err(RepaceError::InvalidBuffer {
                message: "buffer must contain at least one sample".to_string(),
            });
        }
        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != first.len())
        {
            return Err(RepaceError::InvalidBuffer {
                message: format!(
                    "channel {} has {} samples, channel 0 has {}",
                    index,
                    channel.len(),
                    first.len()
                ),
            });
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Allocate a zero-initialized buffer.
    ///
    /// Destination for resynthesis and merging, where silence is the
    /// default value of every unwritten sample.
    pub fn zeroed(channel_count: usize, length: usize, sample_rate: u32) -> Result<Self> {
        Self::from_channels(vec![vec![0.0; length]; channel_count], sample_rate)
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    /// True if the buffer holds no samples. Constructors reject empty
    /// buffers, so this is always false for a constructed buffer.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    /// Borrow one channel's samples.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Borrow all channels.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Mutably borrow all channels. Used only while a stage is still
    /// building a buffer it owns.
    pub(crate) fn channels_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.channels
    }

    /// Largest sample magnitude across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flat_map(|c| c.iter())
            .fold(0.0f32, |max, &s| max.max(s.abs()))
    }
}
