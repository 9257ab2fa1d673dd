//! Silence segmentation.
//!
//! Scans a buffer's reference channel and produces the ordered list of
//! speech regions, separated by confirmed silences. The scan is an explicit
//! state machine with an `InSilenceLookahead` state instead of manual
//! index jumps, so the lookahead-window boundary has exactly one owner.

use crate::audio::buffer::SampleBuffer;
use crate::config::Settings;

/// A contiguous run of samples classified as speech.
///
/// Invariant: `0 <= start < end <= buffer length`; chunks are produced in
/// ascending, non-overlapping order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechChunk {
    /// Index of the first speech sample.
    pub start: usize,
    /// Index one past the last speech sample.
    pub end: usize,
}

impl SpeechChunk {
    /// Number of samples in the chunk.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the chunk spans no samples. Never true for chunks produced
    /// by `segment`.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Scan state for the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Not currently inside a speech region.
    Idle,
    /// Inside a speech region that opened at `start`.
    InSpeech { start: usize },
    /// Inside a speech region, counting quiet samples since `silence_at`.
    /// Confirms the pause once the quiet run reaches the minimum length.
    InSilenceLookahead { start: usize, silence_at: usize },
}

/// Detect speech regions on the buffer's first channel.
///
/// Subsequent channels are assumed time-aligned and are not analyzed
/// independently. A buffer whose peak never exceeds the threshold yields
/// an empty vec; a buffer with no qualifying silence yields exactly one
/// chunk from the first onset to the buffer end.
pub fn segment(buffer: &SampleBuffer, settings: Settings) -> Vec<SpeechChunk> {
    let samples = buffer.channel(0);
    let threshold = settings.silence_threshold;
    let min_silence = settings.min_silence_samples(buffer.sample_rate());

    log::debug!(
        "segmenting {} samples at {} Hz (threshold {}, min silence {} samples)",
        samples.len(),
        buffer.sample_rate(),
        threshold,
        min_silence
    );

    // Nothing anywhere in the buffer can open a speech region.
    if buffer.peak() <= threshold {
        log::info!("no sample exceeds the silence threshold");
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut state = ScanState::Idle;

    for (i, &sample) in samples.iter().enumerate() {
        let loud = sample.abs() > threshold;

        state = match state {
            ScanState::Idle if loud => ScanState::InSpeech { start: i },
            ScanState::Idle => ScanState::Idle,

            ScanState::InSpeech { start } if loud => ScanState::InSpeech { start },
            ScanState::InSpeech { start } => {
                confirm_or_wait(start, i, i, min_silence, &mut chunks)
            }

            // A loud sample inside the lookahead window means the silence
            // was too short: the region stays open.
            ScanState::InSilenceLookahead { start, .. } if loud => {
                ScanState::InSpeech { start }
            }
            ScanState::InSilenceLookahead { start, silence_at } => {
                confirm_or_wait(start, silence_at, i, min_silence, &mut chunks)
            }
        };
    }

    // Buffer ended while still in speech (including an unconfirmed
    // lookahead): the final chunk runs to the buffer end.
    match state {
        ScanState::InSpeech { start } | ScanState::InSilenceLookahead { start, .. } => {
            chunks.push(SpeechChunk {
                start,
                end: samples.len(),
            });
        }
        ScanState::Idle => {}
    }

    log::info!("detected {} speech chunk(s)", chunks.len());
    chunks
}

/// One quiet sample observed at `now` inside a region opened at `start`
/// whose quiet run began at `silence_at`. Closes the chunk once the run
/// reaches `min_silence` samples, otherwise keeps waiting.
fn confirm_or_wait(
    start: usize,
    silence_at: usize,
    now: usize,
    min_silence: usize,
    chunks: &mut Vec<SpeechChunk>,
) -> ScanState {
    if now - silence_at + 1 >= min_silence {
        chunks.push(SpeechChunk {
            start,
            end: silence_at,
        });
        ScanState::Idle
    } else {
        ScanState::InSilenceLookahead { start, silence_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_from(samples: Vec<f32>, rate: u32) -> SampleBuffer {
        SampleBuffer::from_channels(vec![samples], rate).unwrap()
    }

    fn settings(threshold: f32, min_silence_duration: f32) -> Settings {
        Settings {
            silence_threshold: threshold,
            min_silence_duration,
            ..Default::default()
        }
    }

    #[test]
    fn all_quiet_buffer_yields_no_chunks() {
        let buffer = buffer_from(vec![0.005; 16000], 16000);
        let chunks = segment(&buffer, settings(0.01, 0.2));
        assert!(chunks.is_empty());
    }

    #[test]
    fn buffer_without_qualifying_silence_yields_one_chunk() {
        // Loud throughout; chunk spans onset to buffer end.
        let buffer = buffer_from(vec![0.5; 8000], 16000);
        let chunks = segment(&buffer, settings(0.01, 0.2));
        assert_eq!(chunks, vec![SpeechChunk { start: 0, end: 8000 }]);
    }

    #[test]
    fn chunk_opens_at_first_loud_sample() {
        let mut samples = vec![0.0; 1000];
        samples.extend(vec![0.5; 1000]);
        let buffer = buffer_from(samples, 16000);

        let chunks = segment(&buffer, settings(0.01, 0.2));
        assert_eq!(
            chunks,
            vec![SpeechChunk {
                start: 1000,
                end: 2000
            }]
        );
    }

    #[test]
    fn confirmed_silence_closes_chunk_at_silence_onset() {
        // 0.3s min silence at 16kHz = 4800 samples; gap of 6000 qualifies.
        let mut samples = vec![0.5; 2000];
        samples.extend(vec![0.0; 6000]);
        samples.extend(vec![0.5; 2000]);
        let buffer = buffer_from(samples, 16000);

        let chunks = segment(&buffer, settings(0.07, 0.3));
        assert_eq!(
            chunks,
            vec![
                SpeechChunk { start: 0, end: 2000 },
                SpeechChunk {
                    start: 8000,
                    end: 10000
                },
            ]
        );
    }

    #[test]
    fn short_interior_silence_keeps_chunk_open() {
        // Gap of 1000 samples is below the 4800-sample minimum.
        let mut samples = vec![0.5; 2000];
        samples.extend(vec![0.0; 1000]);
        samples.extend(vec![0.5; 2000]);
        let buffer = buffer_from(samples, 16000);

        let chunks = segment(&buffer, settings(0.07, 0.3));
        assert_eq!(chunks, vec![SpeechChunk { start: 0, end: 5000 }]);
    }

    #[test]
    fn trailing_unconfirmed_silence_extends_to_buffer_end() {
        // Quiet tail of 1000 samples never reaches the minimum, so the
        // scanner is still in speech when the buffer ends.
        let mut samples = vec![0.5; 2000];
        samples.extend(vec![0.0; 1000]);
        let buffer = buffer_from(samples, 16000);

        let chunks = segment(&buffer, settings(0.07, 0.3));
        assert_eq!(chunks, vec![SpeechChunk { start: 0, end: 3000 }]);
    }

    #[test]
    fn trailing_confirmed_silence_is_not_part_of_chunk() {
        let mut samples = vec![0.5; 2000];
        samples.extend(vec![0.0; 6000]);
        let buffer = buffer_from(samples, 16000);

        let chunks = segment(&buffer, settings(0.07, 0.3));
        assert_eq!(chunks, vec![SpeechChunk { start: 0, end: 2000 }]);
    }

    #[test]
    fn speech_then_long_silence_yields_single_chunk() {
        // 4 seconds at 16 kHz mono: magnitude 0.5 for [0, 8000), silence after.
        let mut samples = vec![0.5; 8000];
        samples.extend(vec![0.0; 56000]);
        let buffer = buffer_from(samples, 16000);

        let chunks = segment(&buffer, settings(0.07, 0.3));
        assert_eq!(chunks, vec![SpeechChunk { start: 0, end: 8000 }]);
    }

    #[test]
    fn chunks_are_ordered_and_non_overlapping() {
        // Three bursts separated by qualifying gaps.
        let mut samples = Vec::new();
        for _ in 0..3 {
            samples.extend(vec![0.5; 1500]);
            samples.extend(vec![0.0; 5000]);
        }
        let buffer = buffer_from(samples, 16000);

        let chunks = segment(&buffer, settings(0.07, 0.3));
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.start < chunk.end);
            assert!(chunk.end <= buffer.len());
        }
        for pair in chunks.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn negative_samples_count_as_speech() {
        let buffer = buffer_from(vec![-0.5; 4000], 16000);
        let chunks = segment(&buffer, settings(0.07, 0.3));
        assert_eq!(chunks, vec![SpeechChunk { start: 0, end: 4000 }]);
    }

    #[test]
    fn sample_exactly_at_threshold_is_silence() {
        // The contract is strictly-above-threshold for speech.
        let buffer = buffer_from(vec![0.07; 4000], 16000);
        let chunks = segment(&buffer, settings(0.07, 0.2));
        assert!(chunks.is_empty());
    }

    #[test]
    fn lookahead_boundary_is_exact() {
        // Gap of exactly min_silence_samples - 1 stays open, exactly
        // min_silence_samples closes.
        let min = settings(0.07, 0.2).min_silence_samples(16000); // 3200

        let mut open = vec![0.5; 100];
        open.extend(vec![0.0; min - 1]);
        open.extend(vec![0.5; 100]);
        let chunks = segment(&buffer_from(open, 16000), settings(0.07, 0.2));
        assert_eq!(chunks.len(), 1, "gap one short of minimum must not split");

        let mut closed = vec![0.5; 100];
        closed.extend(vec![0.0; min]);
        closed.extend(vec![0.5; 100]);
        let chunks = segment(&buffer_from(closed, 16000), settings(0.07, 0.2));
        assert_eq!(chunks.len(), 2, "gap of exactly the minimum must split");
        assert_eq!(chunks[0], SpeechChunk { start: 0, end: 100 });
        assert_eq!(
            chunks[1],
            SpeechChunk {
                start: 100 + min,
                end: 200 + min
            }
        );
    }
}
