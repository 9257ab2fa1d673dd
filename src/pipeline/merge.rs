//! Merge pipeline: decode each input → validate → concatenate → encode.
//!
//! Decoding is strictly sequential and order-preserving: buffer `i` is
//! fully decoded before buffer `i + 1` begins, and decode order equals
//! concatenation order. The input list's order is caller-controlled.

use crate::audio::merger::merge;
use crate::codec::decoder::AudioDecoder;
use crate::codec::encoder::{BlockEncoder, encode_buffer};
use crate::error::{RepaceError, Result};
use crate::pipeline::progress::ProgressSink;
use std::sync::Arc;

/// Orchestrator for merging two or more audio files into one stream.
pub struct MergePipeline {
    decoder: Arc<dyn AudioDecoder>,
    encoder: Option<Box<dyn BlockEncoder>>,
}

impl MergePipeline {
    /// Creates a pipeline with the given decoder and no encoder; running
    /// it without `with_encoder` fails with `EncoderUnavailable`.
    pub fn new(decoder: Arc<dyn AudioDecoder>) -> Self {
        Self {
            decoder,
            encoder: None,
        }
    }

    /// Injects the block encoder capability.
    pub fn with_encoder(mut self, encoder: Box<dyn BlockEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Run the full pipeline on the given files, in the given order.
    ///
    /// Emits one progress message per decoded file plus one for the merge
    /// and one for the encode (`file_count + 2` total). Fails before any
    /// decoding when fewer than two inputs are given; a compatibility
    /// mismatch fails before any concatenation, with no partial output.
    pub async fn run(
        &mut self,
        inputs: &[Vec<u8>],
        progress: &dyn ProgressSink,
    ) -> Result<Vec<u8>> {
        if inputs.len() < 2 {
            return Err(RepaceError::InvalidInputCount {
                count: inputs.len(),
            });
        }

        let mut buffers = Vec::with_capacity(inputs.len());
        for (index, bytes) in inputs.iter().enumerate() {
            progress.report(&format!("Decoding file {} of {}...", index + 1, inputs.len()));
            buffers.push(self.decoder.decode(bytes).await?);
        }

        // Short cooperative yields so observers can update between the
        // decode burst and the validate/merge work.
        tokio::task::yield_now().await;
        progress.report("Merging audio files...");
        tokio::task::yield_now().await;
        let merged = merge(&buffers)?;
        log::info!(
            "merge: {} files into {:.2}s at {} Hz",
            inputs.len(),
            merged.duration_secs(),
            merged.sample_rate()
        );

        progress.report("Encoding audio...");
        let encoder = self
            .encoder
            .as_deref_mut()
            .ok_or_else(|| RepaceError::EncoderUnavailable {
                capability: "block encoder".to_string(),
            })?;
        encode_buffer(&merged, encoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::buffer::SampleBuffer;
    use crate::pipeline::progress::{CollectorProgress, NullProgress};
    use crate::testing::{FailingDecoder, PassthroughEncoder, SequenceDecoder};

    fn mono(value: f32, length: usize, rate: u32) -> SampleBuffer {
        SampleBuffer::from_channels(vec![vec![value; length]], rate).unwrap()
    }

    #[tokio::test]
    async fn run_emits_file_count_plus_two_messages() {
        let decoder = SequenceDecoder::new(vec![
            mono(0.1, 1000, 16000),
            mono(0.2, 1000, 16000),
            mono(0.3, 1000, 16000),
        ]);
        let mut pipeline = MergePipeline::new(Arc::new(decoder))
            .with_encoder(Box::new(PassthroughEncoder::new()));
        let progress = CollectorProgress::new();

        pipeline
            .run(&[vec![1], vec![2], vec![3]], &progress)
            .await
            .unwrap();

        let messages = progress.messages();
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0], "Decoding file 1 of 3...");
        assert_eq!(messages[1], "Decoding file 2 of 3...");
        assert_eq!(messages[2], "Decoding file 3 of 3...");
        assert!(messages[3].contains("Merging"));
        assert!(messages[4].contains("Encoding"));
    }

    #[tokio::test]
    async fn run_concatenates_in_input_order() {
        // 1000 + 2000 samples at 16 kHz mono.
        let decoder =
            SequenceDecoder::new(vec![mono(0.5, 1000, 16000), mono(-0.5, 2000, 16000)]);
        let mut pipeline = MergePipeline::new(Arc::new(decoder))
            .with_encoder(Box::new(PassthroughEncoder::new()));

        let bytes = pipeline
            .run(&[vec![1], vec![2]], &NullProgress)
            .await
            .unwrap();

        // 3000 i16 samples as little-endian pairs, plus the flush marker.
        assert_eq!(bytes.len(), 3000 * 2 + 1);
        let first = i16::from_le_bytes([bytes[0], bytes[1]]);
        let last = i16::from_le_bytes([bytes[5998], bytes[5999]]);
        assert!(first > 0, "output must start with buffer A");
        assert!(last < 0, "output must end with buffer B");
    }

    #[tokio::test]
    async fn run_rejects_fewer_than_two_inputs_before_decoding() {
        let decoder = FailingDecoder::new("must not be called");
        let mut pipeline = MergePipeline::new(Arc::new(decoder))
            .with_encoder(Box::new(PassthroughEncoder::new()));
        let progress = CollectorProgress::new();

        let result = pipeline.run(&[vec![1]], &progress).await;

        assert!(matches!(
            result,
            Err(RepaceError::InvalidInputCount { count: 1 })
        ));
        assert!(
            progress.messages().is_empty(),
            "no stage may run before the input-count check"
        );
    }

    #[tokio::test]
    async fn run_fails_on_sample_rate_mismatch_with_no_output() {
        let decoder =
            SequenceDecoder::new(vec![mono(0.1, 100, 44100), mono(0.2, 100, 48000)]);
        let mut pipeline = MergePipeline::new(Arc::new(decoder))
            .with_encoder(Box::new(PassthroughEncoder::new()));
        let progress = CollectorProgress::new();

        let result = pipeline.run(&[vec![1], vec![2]], &progress).await;

        match result {
            Err(RepaceError::SampleRateMismatch { expected, actual }) => {
                assert_eq!(expected, 44100);
                assert_eq!(actual, 48000);
            }
            other => panic!("Expected SampleRateMismatch, got {:?}", other),
        }
        // The encode stage never ran.
        assert!(!progress.messages().iter().any(|m| m.contains("Encoding")));
    }

    #[tokio::test]
    async fn run_fails_on_channel_count_mismatch() {
        let stereo =
            SampleBuffer::from_channels(vec![vec![0.1; 100], vec![0.1; 100]], 16000).unwrap();
        let decoder = SequenceDecoder::new(vec![stereo, mono(0.2, 100, 16000)]);
        let mut pipeline = MergePipeline::new(Arc::new(decoder))
            .with_encoder(Box::new(PassthroughEncoder::new()));

        let result = pipeline.run(&[vec![1], vec![2]], &NullProgress).await;
        assert!(matches!(
            result,
            Err(RepaceError::ChannelCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[tokio::test]
    async fn run_propagates_decode_failure_from_any_input() {
        let decoder = FailingDecoder::new("bad input");
        let mut pipeline = MergePipeline::new(Arc::new(decoder))
            .with_encoder(Box::new(PassthroughEncoder::new()));

        let result = pipeline.run(&[vec![1], vec![2]], &NullProgress).await;
        match result {
            Err(RepaceError::DecodeFailure { message }) => assert_eq!(message, "bad input"),
            other => panic!("Expected DecodeFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn run_without_encoder_fails_naming_capability() {
        let decoder =
            SequenceDecoder::new(vec![mono(0.1, 100, 16000), mono(0.2, 100, 16000)]);
        let mut pipeline = MergePipeline::new(Arc::new(decoder));

        let result = pipeline.run(&[vec![1], vec![2]], &NullProgress).await;
        assert!(matches!(
            result,
            Err(RepaceError::EncoderUnavailable { .. })
        ));
    }
}
