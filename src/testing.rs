//! Test doubles for the injected capabilities.
//!
//! Usable from unit and integration tests, and by downstream callers that
//! want to exercise the pipelines without a real codec.

use crate::audio::buffer::SampleBuffer;
use crate::codec::decoder::AudioDecoder;
use crate::codec::encoder::BlockEncoder;
use crate::error::{RepaceError, Result};
use async_trait::async_trait;

/// Decoder that returns a preset buffer regardless of input bytes.
#[derive(Debug, Clone)]
pub struct FixedDecoder {
    buffer: SampleBuffer,
}

impl FixedDecoder {
    pub fn new(buffer: SampleBuffer) -> Self {
        Self { buffer }
    }
}

#[async_trait]
impl AudioDecoder for FixedDecoder {
    async fn decode(&self, _bytes: &[u8]) -> Result<SampleBuffer> {
        Ok(self.buffer.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Decoder that returns one buffer per call, in sequence.
///
/// Lets a merge test hand distinct buffers to each input file. Fails if
/// called more times than buffers were provided.
#[derive(Debug)]
pub struct SequenceDecoder {
    buffers: std::sync::Mutex<std::collections::VecDeque<SampleBuffer>>,
}

impl SequenceDecoder {
    pub fn new(buffers: Vec<SampleBuffer>) -> Self {
        Self {
            buffers: std::sync::Mutex::new(buffers.into()),
        }
    }
}

#[async_trait]
impl AudioDecoder for SequenceDecoder {
    async fn decode(&self, _bytes: &[u8]) -> Result<SampleBuffer> {
        let next = match self.buffers.lock() {
            Ok(mut buffers) => buffers.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        next.ok_or_else(|| RepaceError::DecodeFailure {
            message: "sequence decoder exhausted".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}

/// Decoder that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingDecoder {
    message: String,
}

impl FailingDecoder {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl AudioDecoder for FailingDecoder {
    async fn decode(&self, _bytes: &[u8]) -> Result<SampleBuffer> {
        Err(RepaceError::DecodeFailure {
            message: self.message.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Encoder that emits each block's left-channel PCM as little-endian
/// bytes and a single `0xFE` marker byte on flush.
///
/// The "compressed" stream is therefore exactly inspectable in tests.
#[derive(Debug, Default)]
pub struct PassthroughEncoder {
    blocks: usize,
}

impl PassthroughEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks encoded since construction or the last flush.
    pub fn blocks(&self) -> usize {
        self.blocks
    }
}

impl BlockEncoder for PassthroughEncoder {
    fn encode_block(&mut self, left: &[i16], _right: Option<&[i16]>) -> Result<Vec<u8>> {
        self.blocks += 1;
        Ok(left.iter().flat_map(|s| s.to_le_bytes()).collect())
    }

    fn flush(&mut self) -> Result<Vec<u8>> {
        self.blocks = 0;
        Ok(vec![0xFE])
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}
