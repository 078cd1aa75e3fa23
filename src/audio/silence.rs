//! Silence detection over decoded audio frames.
//!
//! Finds pause points: the start times of silence runs long enough to read
//! as intentional breaks, spaced far enough apart to avoid over-cutting.
//! Decode failures never propagate out of [`detect_pauses`] — a slideshow
//! must still render when pause detection is unavailable, so the caller
//! falls back to a single full-duration segment.

use crate::audio::wav::{AudioFrame, WavAudio};
use crate::defaults;
use crate::error::Result;
use crate::output;
use std::path::Path;

/// Tuning for silence detection.
#[derive(Debug, Clone, Copy)]
pub struct SilenceConfig {
    /// Minimum silence duration (seconds) for a run to count as a pause.
    pub min_pause: f64,
    /// Loudness threshold (dBFS); frames below it are silent.
    pub noise_threshold_db: f64,
    /// Minimum spacing (seconds) between kept pause points. Zero or
    /// negative disables the spacing filter.
    pub min_interval: f64,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            min_pause: defaults::MIN_PAUSE_SECS,
            noise_threshold_db: defaults::NOISE_THRESHOLD_DB,
            min_interval: defaults::MIN_INTERVAL_SECS,
        }
    }
}

/// Streaming silence-run state machine.
///
/// Feed frames in presentation order with [`process`](Self::process), then
/// call [`finish`](Self::finish) to close a trailing run and obtain the
/// filtered pause points.
pub struct SilenceDetector {
    config: SilenceConfig,
    run_start: Option<f64>,
    current_time: f64,
    frame_duration: f64,
    candidates: Vec<f64>,
}

impl SilenceDetector {
    pub fn new(config: SilenceConfig) -> Self {
        Self {
            config,
            run_start: None,
            current_time: 0.0,
            frame_duration: 0.0,
            candidates: Vec::new(),
        }
    }

    /// Decode-and-detect over a whole [`WavAudio`].
    pub fn detect(audio: &WavAudio, config: SilenceConfig) -> Vec<f64> {
        let mut detector = Self::new(config);
        for frame in audio.frames() {
            detector.process(&frame);
        }
        detector.finish()
    }

    /// Consume one frame. Frames must arrive in presentation order.
    pub fn process(&mut self, frame: &AudioFrame<'_>) {
        self.current_time = frame.pts;
        self.frame_duration = frame.duration();

        // Empty frames carry zero energy and read as silent.
        let silent = frame_db(frame.samples) < self.config.noise_threshold_db;

        if silent {
            if self.run_start.is_none() {
                self.run_start = Some(frame.pts);
            }
        } else if let Some(start) = self.run_start.take() {
            self.close_run(start, frame.pts);
        }
    }

    /// Close any trailing run and return pause points filtered by spacing.
    pub fn finish(mut self) -> Vec<f64> {
        if let Some(start) = self.run_start.take() {
            // A run still open at stream end extends through the last frame.
            let end = self.current_time + self.frame_duration;
            self.close_run(start, end);
        }

        filter_min_interval(self.candidates, self.config.min_interval)
    }

    fn close_run(&mut self, start: f64, end: f64) {
        if end - start >= self.config.min_pause {
            self.candidates.push(start);
        }
    }
}

/// RMS loudness of a frame in dBFS.
///
/// Samples are normalized to [-1, 1]; zero RMS maps to the
/// [`SILENCE_FLOOR_DB`](defaults::SILENCE_FLOOR_DB) floor instead of -inf.
pub fn frame_db(samples: &[i16]) -> f64 {
    if samples.is_empty() {
        return defaults::SILENCE_FLOOR_DB;
    }

    let sum_squares: f64 = samples
        .iter()
        .map(|&sample| {
            let normalized = sample as f64 / i16::MAX as f64;
            normalized * normalized
        })
        .sum();

    let rms = (sum_squares / samples.len() as f64).sqrt();
    if rms > 0.0 {
        20.0 * rms.log10()
    } else {
        defaults::SILENCE_FLOOR_DB
    }
}

/// Keep candidates spaced at least `min_interval` after the last *kept*
/// point (which starts at 0.0). Measuring from the kept point rather than
/// the previous raw candidate produces fewer, more evenly spaced cuts on
/// audio with many short pauses.
fn filter_min_interval(pauses: Vec<f64>, min_interval: f64) -> Vec<f64> {
    if min_interval <= 0.0 || pauses.is_empty() {
        return pauses;
    }

    let mut kept = Vec::new();
    let mut last_kept = 0.0;
    for point in pauses {
        if point - last_kept >= min_interval {
            kept.push(point);
            last_kept = point;
        }
    }
    kept
}

/// Detect pause points in an audio file, absorbing decode failures.
///
/// Any error while opening or decoding is reported as a warning and yields
/// an empty result; the timeline then reduces to a single segment.
pub fn detect_pauses(path: &Path, config: SilenceConfig, quiet: bool) -> Vec<f64> {
    match try_detect(path, config) {
        Ok(pauses) => pauses,
        Err(e) => {
            if !quiet {
                output::warn(&format!(
                    "pause detection unavailable for {}: {}",
                    path.display(),
                    e
                ));
            }
            Vec::new()
        }
    }
}

fn try_detect(path: &Path, config: SilenceConfig) -> Result<Vec<f64>> {
    let audio = WavAudio::open(path)?;
    Ok(SilenceDetector::detect(&audio, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 16000;

    fn silence(secs: f64) -> Vec<i16> {
        vec![0i16; (secs * RATE as f64) as usize]
    }

    fn tone(secs: f64) -> Vec<i16> {
        // Constant amplitude 8000 ≈ -12 dBFS, well above the -35 dB threshold
        vec![8000i16; (secs * RATE as f64) as usize]
    }

    fn run_detector(samples: &[i16], config: SilenceConfig) -> Vec<f64> {
        let mut detector = SilenceDetector::new(config);
        let frame_len = (RATE as usize) / 10;
        for (i, chunk) in samples.chunks(frame_len).enumerate() {
            let frame = AudioFrame {
                samples: chunk,
                sample_rate: RATE,
                pts: (i * frame_len) as f64 / RATE as f64,
            };
            detector.process(&frame);
        }
        detector.finish()
    }

    fn config(min_pause: f64, min_interval: f64) -> SilenceConfig {
        SilenceConfig {
            min_pause,
            noise_threshold_db: -35.0,
            min_interval,
        }
    }

    #[test]
    fn frame_db_silence_hits_floor() {
        assert_eq!(frame_db(&vec![0i16; 1000]), defaults::SILENCE_FLOOR_DB);
        assert_eq!(frame_db(&[]), defaults::SILENCE_FLOOR_DB);
    }

    #[test]
    fn frame_db_full_scale_is_zero() {
        let db = frame_db(&vec![i16::MAX; 1000]);
        assert!(db.abs() < 0.01, "full scale should be ~0 dBFS, got {}", db);
    }

    #[test]
    fn frame_db_half_scale() {
        let db = frame_db(&vec![i16::MAX / 2; 1000]);
        // 20*log10(0.5) ≈ -6.02
        assert!((db + 6.02).abs() < 0.05, "got {}", db);
    }

    #[test]
    fn single_long_silence_yields_one_candidate_near_start() {
        // 6s tone, 1s silence, 6s tone
        let mut samples = tone(6.0);
        samples.extend(silence(1.0));
        samples.extend(tone(6.0));

        let pauses = run_detector(&samples, config(0.7, 5.0));
        assert_eq!(pauses.len(), 1);
        assert!(
            (pauses[0] - 6.0).abs() < 0.11,
            "pause should start near 6.0s, got {}",
            pauses[0]
        );
    }

    #[test]
    fn short_silence_is_not_a_pause() {
        // 0.3s gap, below the 0.7s minimum
        let mut samples = tone(6.0);
        samples.extend(silence(0.3));
        samples.extend(tone(6.0));

        let pauses = run_detector(&samples, config(0.7, 5.0));
        assert!(pauses.is_empty());
    }

    #[test]
    fn trailing_silence_is_closed_at_stream_end() {
        let mut samples = tone(6.0);
        samples.extend(silence(1.0));

        let pauses = run_detector(&samples, config(0.7, 5.0));
        assert_eq!(pauses.len(), 1);
        assert!((pauses[0] - 6.0).abs() < 0.11);
    }

    #[test]
    fn leading_silence_opens_at_stream_start() {
        let mut samples = silence(1.0);
        samples.extend(tone(6.0));

        // min_interval 0 disables spacing so the t=0 candidate survives
        let pauses = run_detector(&samples, config(0.7, 0.0));
        assert_eq!(pauses.len(), 1);
        assert!(pauses[0] < 0.11);
    }

    #[test]
    fn close_candidates_collapse_to_first_kept() {
        // Pauses near 6s and 8s: the second is within 5s of the first kept
        // point and is dropped; spacing is measured from the kept point.
        let mut samples = tone(6.0);
        samples.extend(silence(1.0));
        samples.extend(tone(1.0));
        samples.extend(silence(1.0));
        samples.extend(tone(6.0));

        let pauses = run_detector(&samples, config(0.7, 5.0));
        assert_eq!(pauses.len(), 1);
        assert!((pauses[0] - 6.0).abs() < 0.11);
    }

    #[test]
    fn kept_point_spacing_differs_from_sliding_window() {
        // Candidates near 6, 8, 12. From last-kept: keep 6, drop 8
        // (8-6 < 5), keep 12 (12-6 >= 5). A sliding-window filter over raw
        // candidates would instead drop 12 because it follows 8 by 4s.
        let mut samples = tone(6.0);
        samples.extend(silence(1.0)); // 6..7
        samples.extend(tone(1.0)); // 7..8
        samples.extend(silence(1.0)); // 8..9
        samples.extend(tone(3.0)); // 9..12
        samples.extend(silence(1.0)); // 12..13
        samples.extend(tone(4.0));

        let pauses = run_detector(&samples, config(0.7, 5.0));
        assert_eq!(pauses.len(), 2, "got {:?}", pauses);
        assert!((pauses[0] - 6.0).abs() < 0.11);
        assert!((pauses[1] - 12.0).abs() < 0.11);
    }

    #[test]
    fn zero_min_interval_keeps_all_candidates() {
        let mut samples = tone(2.0);
        samples.extend(silence(1.0));
        samples.extend(tone(1.0));
        samples.extend(silence(1.0));
        samples.extend(tone(2.0));

        let pauses = run_detector(&samples, config(0.7, 0.0));
        assert_eq!(pauses.len(), 2);
    }

    #[test]
    fn all_silent_audio_yields_single_run_at_zero() {
        let samples = silence(10.0);
        let pauses = run_detector(&samples, config(0.7, 0.0));
        assert_eq!(pauses.len(), 1);
        assert_eq!(pauses[0], 0.0);
    }

    #[test]
    fn empty_frames_do_not_crash() {
        let mut detector = SilenceDetector::new(config(0.7, 5.0));
        let frame = AudioFrame {
            samples: &[],
            sample_rate: RATE,
            pts: 0.0,
        };
        detector.process(&frame);
        // Zero-length run: silent but too short to be a pause
        assert!(detector.finish().is_empty());
    }

    #[test]
    fn filter_min_interval_empty_input() {
        assert!(filter_min_interval(Vec::new(), 5.0).is_empty());
    }

    #[test]
    fn filter_min_interval_first_point_measured_from_zero() {
        // 3.0 is closer than 5s to t=0, so it goes; 9.0 survives.
        let kept = filter_min_interval(vec![3.0, 9.0], 5.0);
        assert_eq!(kept, vec![9.0]);
    }

    #[test]
    fn detect_pauses_absorbs_missing_file() {
        let pauses = detect_pauses(
            Path::new("/nonexistent/slidecast.wav"),
            SilenceConfig::default(),
            true,
        );
        assert!(pauses.is_empty());
    }

    #[test]
    fn detect_over_wav_audio_matches_manual_drive() {
        use std::io::Cursor;

        let mut samples = tone(6.0);
        samples.extend(silence(1.0));
        samples.extend(tone(6.0));

        let mut cursor = Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in &samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let audio = WavAudio::from_reader(Box::new(Cursor::new(cursor.into_inner()))).unwrap();
        let pauses = SilenceDetector::detect(&audio, config(0.7, 5.0));
        assert_eq!(pauses, run_detector(&samples, config(0.7, 5.0)));
    }
}
