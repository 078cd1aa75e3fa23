//! The composition plan: the renderer-facing description of the slideshow.
//!
//! Planning and rendering are decoupled. The planner emits a
//! [`CompositionPlan`] and hands it to a [`Compositor`]; the default
//! implementation serializes the plan as JSON for an external renderer.

use crate::animation::AnimationSpec;
use crate::error::Result;
use crate::media::MediaKind;
use crate::sizes::PixelSize;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One clip on the output timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipSpec {
    pub source: PathBuf,
    pub kind: MediaKind,
    /// Nominal start on the audio timeline, in seconds.
    pub start_time: f64,
    /// Nominal end on the audio timeline, in seconds.
    pub end_time: f64,
    /// Actual render length, including cross-fade overlap.
    pub rendered_duration: f64,
    pub fade_in: bool,
    pub fade_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationSpec>,
}

/// Everything a renderer needs to assemble the final video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionPlan {
    pub canvas: PixelSize,
    pub fps: u32,
    /// Cross-fade length between adjacent clips, in seconds.
    pub transition: f64,
    pub audio: PathBuf,
    pub audio_duration: f64,
    /// Where the concatenated output must be cut.
    pub trimmed_end: f64,
    pub clips: Vec<ClipSpec>,
}

impl CompositionPlan {
    /// Sum of nominal clip durations, which equals the audio duration when
    /// the timeline is well formed.
    pub fn nominal_duration(&self) -> f64 {
        self.clips.iter().map(|c| c.end_time - c.start_time).sum()
    }
}

/// Pluggable plan consumer. The planner produces exactly one plan per run
/// and hands it here.
pub trait Compositor: Send {
    fn compose(&mut self, plan: &CompositionPlan) -> Result<()>;

    /// Name for diagnostics.
    fn name(&self) -> &'static str {
        "compositor"
    }
}

/// Writes the plan as JSON, to a file or stdout.
pub struct JsonPlanWriter {
    target: Option<PathBuf>,
}

impl JsonPlanWriter {
    /// Write to the given file path.
    pub fn to_file(path: &Path) -> Self {
        Self {
            target: Some(path.to_path_buf()),
        }
    }

    /// Write to stdout.
    pub fn to_stdout() -> Self {
        Self { target: None }
    }
}

impl Compositor for JsonPlanWriter {
    fn compose(&mut self, plan: &CompositionPlan) -> Result<()> {
        let json = serde_json::to_string_pretty(plan)?;
        match &self.target {
            Some(path) => {
                std::fs::write(path, json)?;
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(json.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

/// Collects plans in memory, for tests and library callers.
pub struct CollectorCompositor {
    pub plans: Vec<CompositionPlan>,
}

impl CollectorCompositor {
    pub fn new() -> Self {
        Self { plans: Vec::new() }
    }
}

impl Default for CollectorCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor for CollectorCompositor {
    fn compose(&mut self, plan: &CompositionPlan) -> Result<()> {
        self.plans.push(plan.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}
