//! Pace pipeline: decode → segment → resynthesize → encode.
//!
//! One invocation runs to completion or fails; the caller drives the
//! surrounding `PipelineState` machine and resets it on failure. The
//! output is always the lossy codec byte stream — callers naming the
//! result should use the codec's extension.

use crate::audio::resynth::resynthesize;
use crate::audio::segmenter::segment;
use crate::codec::decoder::AudioDecoder;
use crate::codec::encoder::{BlockEncoder, encode_buffer};
use crate::config::Settings;
use crate::error::{RepaceError, Result};
use crate::pipeline::progress::ProgressSink;
use std::sync::Arc;

/// Orchestrator for pause re-pacing of a single audio file.
///
/// Holds the injected decode and encode capabilities; the pipeline itself
/// keeps no state between invocations.
pub struct PacePipeline {
    decoder: Arc<dyn AudioDecoder>,
    encoder: Option<Box<dyn BlockEncoder>>,
}

impl PacePipeline {
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

    /// Run the full pipeline on one file's bytes.
    ///
    /// Emits one progress message per stage (four stages). Fails with
    /// `NoSpeechDetected` if nothing in the file exceeds the silence
    /// threshold; any failure aborts the invocation with no partial
    /// output.
    pub async fn run(
        &mut self,
        bytes: &[u8],
        settings: Settings,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<u8>> {
        progress.report("Decoding audio...");
        let buffer = self.decoder.decode(bytes).await?;
        log::info!(
            "pace: decoded {:.2}s of audio ({} channel(s) at {} Hz)",
            buffer.duration_secs(),
            buffer.channel_count(),
            buffer.sample_rate()
        );

        progress.report("Analyzing speech...");
        let chunks = segment(&buffer, settings);
        if chunks.is_empty() {
            return Err(RepaceError::NoSpeechDetected);
        }

        progress.report("Adjusting pauses...");
        let paced = resynthesize(&buffer, &chunks, settings)?;

        progress.report("Encoding audio...");
        let encoder = self
            .encoder
            .as_deref_mut()
            .ok_or_else(|| RepaceError::EncoderUnavailable {
                capability: "block encoder".to_string(),
            })?;
        let output = encode_buffer(&paced, encoder)?;

        log::info!(
            "pace: {:.2}s in, {:.2}s out, {} bytes encoded",
            buffer.duration_secs(),
            paced.duration_secs(),
            output.len()
        );
        Ok(output)
    }
}
