//! Ken Burns style motion: easing curves, animation kinds, and the
//! per-segment transform functions the renderer evaluates each frame.

use crate::sizes::PixelSize;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized segment progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    #[default]
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Map an easing name to a curve. Unknown names fall back to linear so
    /// a typo in config degrades the motion rather than aborting the run.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "ease_in_quad" => Self::EaseInQuad,
            "ease_out_quad" => Self::EaseOutQuad,
            "ease_in_out_quad" => Self::EaseInOutQuad,
            "ease_in_cubic" => Self::EaseInCubic,
            "ease_out_cubic" => Self::EaseOutCubic,
            "ease_in_out_cubic" => Self::EaseInOutCubic,
            _ => Self::Linear,
        }
    }

    /// Evaluate the curve at progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => t * (2.0 - t),
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// The motion applied to a clip over its segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    #[default]
    None,
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
}

/// Every animated kind, for random selection.
const ANIMATED_KINDS: &[AnimationKind] = &[
    AnimationKind::ZoomIn,
    AnimationKind::ZoomOut,
    AnimationKind::PanLeft,
    AnimationKind::PanRight,
    AnimationKind::PanUp,
    AnimationKind::PanDown,
];

impl AnimationKind {
    /// Map a kind name to a variant. Unknown names mean no animation.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "zoom_in" => Self::ZoomIn,
            "zoom_out" => Self::ZoomOut,
            "pan_left" => Self::PanLeft,
            "pan_right" => Self::PanRight,
            "pan_up" => Self::PanUp,
            "pan_down" => Self::PanDown,
            _ => Self::None,
        }
    }

    /// Pick a random animated kind.
    pub fn random(rng: &mut StdRng) -> Self {
        ANIMATED_KINDS[rng.random_range(0..ANIMATED_KINDS.len())]
    }
}

/// A fully resolved animation for one clip, as recorded in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub kind: AnimationKind,
    pub intensity: f64,
    pub easing: Easing,
    /// Motion duration; defaults to the full segment when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Time-parameterized scale and position for one clip.
///
/// Both functions take elapsed seconds within the segment. Positions are
/// the top-left corner of the scaled clip on the canvas.
pub struct Transform {
    pub scale: Box<dyn Fn(f64) -> f64 + Send + Sync>,
    pub position: Box<dyn Fn(f64) -> (f64, f64) + Send + Sync>,
}

/// The scale at which a source exactly covers the canvas.
pub fn cover_scale(source: PixelSize, canvas: PixelSize) -> f64 {
    let sx = canvas.width as f64 / source.width as f64;
    let sy = canvas.height as f64 / source.height as f64;
    sx.max(sy)
}

impl AnimationSpec {
    pub fn new(kind: AnimationKind, intensity: f64, easing: Easing) -> Self {
        Self {
            kind,
            intensity,
            easing,
            duration: None,
        }
    }

    /// Build the frame-time transform for a clip of the given source size
    /// on the given canvas.
    ///
    /// Progress saturates at 1.0, so a clip that outlives its animation
    /// duration holds the final pose instead of overshooting.
    pub fn transform(&self, source: PixelSize, canvas: PixelSize, segment_duration: f64) -> Transform {
        let base = cover_scale(source, canvas);
        let duration = self.duration.unwrap_or(segment_duration).max(1e-9);
        let easing = self.easing;
        let progress = move |t: f64| easing.apply((t / duration).clamp(0.0, 1.0));

        let cw = canvas.width as f64;
        let ch = canvas.height as f64;
        let sw = source.width as f64;
        let sh = source.height as f64;
        let centered = move |scale: f64| ((cw - sw * scale) / 2.0, (ch - sh * scale) / 2.0);

        match self.kind {
            AnimationKind::None => Transform {
                scale: Box::new(move |_| base),
                position: Box::new(move |_| centered(base)),
            },
            AnimationKind::ZoomIn | AnimationKind::ZoomOut => {
                let far = base * (1.0 + self.intensity * 0.3);
                let (from, to) = if self.kind == AnimationKind::ZoomIn {
                    (base, far)
                } else {
                    (far, base)
                };
                let scale_at = move |t: f64| from + (to - from) * progress(t);
                Transform {
                    scale: Box::new(scale_at),
                    position: Box::new(move |t| centered(scale_at(t))),
                }
            }
            AnimationKind::PanLeft
            | AnimationKind::PanRight
            | AnimationKind::PanUp
            | AnimationKind::PanDown => {
                // Fixed over-scale leaves headroom so the pan never exposes
                // the canvas edge.
                let scale = base * (1.0 + self.intensity * 0.5);
                let max_x = cw * self.intensity * 0.3 / 2.0;
                let max_y = ch * self.intensity * 0.3 / 2.0;
                let kind = self.kind;
                Transform {
                    scale: Box::new(move |_| scale),
                    position: Box::new(move |t| {
                        let (cx, cy) = centered(scale);
                        let p = progress(t);
                        match kind {
                            AnimationKind::PanLeft => (cx + max_x * (1.0 - 2.0 * p), cy),
                            AnimationKind::PanRight => (cx + max_x * (2.0 * p - 1.0), cy),
                            AnimationKind::PanUp => (cx, cy + max_y * (1.0 - 2.0 * p)),
                            AnimationKind::PanDown => (cx, cy + max_y * (2.0 * p - 1.0)),
                            _ => (cx, cy),
                        }
                    }),
                }
            }
        }
    }
}
