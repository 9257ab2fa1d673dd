//! repace - speech pause pacing and audio merge pipeline
//!
//! Segments decoded audio into speech and silence regions, rebuilds the
//! waveform with pauses scaled by a configurable ratio, merges
//! independently-decoded waveforms, and re-encodes the result through an
//! injected block encoder. Decoding and encoding are pluggable
//! capabilities; the pipelines themselves are single-threaded, stateless
//! and re-entrant.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod codec;
pub mod config;
pub mod defaults;
pub mod error;
pub mod pipeline;
pub mod testing;

// Core data model and operations
pub use audio::buffer::SampleBuffer;
pub use audio::merger::merge;
pub use audio::resynth::resynthesize;
pub use audio::segmenter::{SpeechChunk, segment};

// Capabilities (decode -> process -> encode)
pub use codec::decoder::{AudioDecoder, WavDecoder};
pub use codec::encoder::{BlockEncoder, encode_buffer, pcm_to_i16};

// Pipelines
pub use pipeline::merge::MergePipeline;
pub use pipeline::pace::PacePipeline;
pub use pipeline::progress::{CollectorProgress, NullProgress, ProgressSink};
pub use pipeline::state::PipelineState;

// Error handling
pub use error::{RepaceError, Result};

// Config
pub use config::Settings;
