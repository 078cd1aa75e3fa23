//! Default configuration constants for slidecast.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

/// Minimum silence duration in seconds for a pause candidate.
///
/// Silences shorter than this are breathing gaps and word boundaries, not
/// intentional pauses; cutting on them produces a jittery slideshow.
pub const MIN_PAUSE_SECS: f64 = 0.7;

/// RMS loudness threshold in dBFS below which a frame counts as silent.
///
/// -35 dB sits comfortably between room tone in typical voice recordings
/// and the quietest parts of actual speech or music.
pub const NOISE_THRESHOLD_DB: f64 = -35.0;

/// Minimum spacing in seconds between kept pause points.
///
/// Audio with many short gaps would otherwise over-segment the timeline;
/// five seconds keeps each slide on screen long enough to register.
pub const MIN_INTERVAL_SECS: f64 = 5.0;

/// Floor value in dB substituted when a frame's RMS is exactly zero.
///
/// Avoids a logarithm domain error on digitally silent frames.
pub const SILENCE_FLOOR_DB: f64 = -100.0;

/// Default cross-fade duration in seconds between adjacent segments.
pub const TRANSITION_SECS: f64 = 1.0;

/// Default output frame rate.
pub const FPS: u32 = 24;

/// Default canvas size preset name.
pub const CANVAS_PRESET: &str = "hd_720p";

/// Default animation intensity (0.0 to 1.0).
///
/// Controls motion amplitude: zoom range is `intensity * 0.3` of the base
/// scale, pan travel is `intensity * 0.3` of the canvas dimension.
pub const ANIMATION_INTENSITY: f64 = 0.1;

/// Default easing curve name for animated segments.
pub const EASING: &str = "ease_in_out_quad";

/// Analysis frame length in milliseconds.
///
/// 100 ms frames give pause boundaries at worst 0.1 s off the true silence
/// onset, well below what a viewer can perceive at slideshow cut points.
pub const FRAME_MS: u32 = 100;

/// Audio file names probed in the working directory when `--audio` is not
/// given, in priority order.
pub const AUDIO_CANDIDATES: [&str; 2] = ["audio.wav", "narration.wav"];
