//! slidecast - Silence-synchronized slideshow planner
//!
//! Detects pauses in a narration track and plans a slideshow that changes
//! slides exactly where the speaker pauses.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod animation;
pub mod app;
pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod media;
pub mod output;
pub mod plan;
pub mod sizes;
pub mod slideshow;
pub mod timeline;

// Core pipeline (audio → timeline → slideshow → plan)
pub use audio::silence::{SilenceConfig, SilenceDetector, detect_pauses};
pub use audio::wav::WavAudio;
pub use slideshow::{Segment, SlideshowCursor};
pub use timeline::{SegmentWindow, Timeline};

// Plan output
pub use plan::{ClipSpec, CompositionPlan, Compositor, JsonPlanWriter};

// Error handling
pub use error::{Result, SlidecastError};

// Config
pub use config::Config;
pub use sizes::PixelSize;
