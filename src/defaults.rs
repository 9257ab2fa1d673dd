//! Default configuration constants for repace.
//!
//! Shared across the settings module and the pipelines so tuning values
//! live in one place.

/// Default silence threshold as an absolute sample amplitude (0.0 to 1.0).
///
/// Samples whose magnitude stays below this value are treated as silence.
/// 0.01 works well for normalized speech recordings.
pub const SILENCE_THRESHOLD: f32 = 0.01;

/// Lowest accepted silence threshold.
pub const SILENCE_THRESHOLD_MIN: f32 = 0.001;

/// Highest accepted silence threshold.
pub const SILENCE_THRESHOLD_MAX: f32 = 0.1;

/// Default minimum silence duration in seconds.
///
/// A quiet stretch must last at least this long to count as a pause;
/// shorter dips are treated as interior pause noise within a speech region.
pub const MIN_SILENCE_DURATION_SECS: f32 = 0.5;

/// Lowest accepted minimum silence duration in seconds.
pub const MIN_SILENCE_DURATION_MIN_SECS: f32 = 0.2;

/// Highest accepted minimum silence duration in seconds.
pub const MIN_SILENCE_DURATION_MAX_SECS: f32 = 2.0;

/// Default pause multiplier.
///
/// Each speech region is followed by a pause of multiplier times its own
/// length, so 1.0 gives every region equal speech and pause time; lower
/// values tighten pauses, higher values stretch them.
pub const PAUSE_MULTIPLIER: f32 = 1.0;

/// Lowest accepted pause multiplier.
pub const PAUSE_MULTIPLIER_MIN: f32 = 0.5;

/// Highest accepted pause multiplier.
pub const PAUSE_MULTIPLIER_MAX: f32 = 3.0;

/// Samples per channel fed to the block encoder in one call.
///
/// 1152 is the frame size of the target lossy codec; the final block of a
/// buffer may be shorter.
pub const ENCODER_BLOCK_SIZE: usize = 1152;

/// Scale factor for converting f32 samples in [-1.0, 1.0] to 16-bit PCM.
pub const PCM_SCALE: f32 = 32767.0;
