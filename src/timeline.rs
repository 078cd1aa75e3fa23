//! Timeline construction: change points and transition-compensated windows.
//!
//! Segments are later concatenated with a negative padding equal to the
//! transition duration (adjacent segments overlap during their cross-fade so
//! the perceived cut lands exactly on the change point). Every segment
//! except the last therefore renders longer than its nominal span by one
//! transition length; without that compensation the perceived cuts drift
//! earlier by one transition per accumulated segment.

use crate::error::{Result, SlidecastError};

/// One renderable slot on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentWindow {
    /// Nominal start on the audio timeline, in seconds.
    pub start: f64,
    /// Nominal end on the audio timeline, in seconds.
    pub end: f64,
    /// Duration the clip must actually render, including cross-fade overlap.
    pub rendered_duration: f64,
    pub fade_in: bool,
    pub fade_out: bool,
}

impl SegmentWindow {
    /// Nominal (perceived) duration, before overlap compensation.
    pub fn nominal_duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Ordered change points plus the transition length they were built with.
#[derive(Debug, Clone)]
pub struct Timeline {
    change_points: Vec<f64>,
    transition: f64,
}

impl Timeline {
    /// Build a timeline from the audio duration and detected pause starts.
    ///
    /// Pause points outside `(0, total_duration)` are dropped. The detector
    /// emits candidates in time order; anything non-monotonic after
    /// filtering is a programming error, not a user-facing condition.
    pub fn build(total_duration: f64, pause_starts: &[f64], transition: f64) -> Result<Self> {
        if transition < 0.0 {
            return Err(SlidecastError::ConfigInvalidValue {
                key: "video.transition".to_string(),
                message: format!("must not be negative, got {}", transition),
            });
        }
        if total_duration <= 0.0 {
            return Err(SlidecastError::InvariantViolation {
                message: format!("audio duration must be positive, got {}", total_duration),
            });
        }

        let mut change_points = Vec::with_capacity(pause_starts.len() + 2);
        change_points.push(0.0);
        change_points.extend(
            pause_starts
                .iter()
                .copied()
                .filter(|&p| p > 0.0 && p < total_duration),
        );
        change_points.push(total_duration);

        if change_points.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(SlidecastError::InvariantViolation {
                message: format!("change points not monotonic: {:?}", change_points),
            });
        }

        Ok(Self {
            change_points,
            transition,
        })
    }

    pub fn change_points(&self) -> &[f64] {
        &self.change_points
    }

    pub fn total_duration(&self) -> f64 {
        *self
            .change_points
            .last()
            .unwrap_or(&0.0)
    }

    pub fn transition(&self) -> f64 {
        self.transition
    }

    /// Number of segments (one per consecutive change-point pair).
    pub fn segment_count(&self) -> usize {
        self.change_points.len() - 1
    }

    /// The window for segment `index`, or None past the end.
    pub fn window(&self, index: usize) -> Option<SegmentWindow> {
        if index >= self.segment_count() {
            return None;
        }

        let start = self.change_points[index];
        let end = self.change_points[index + 1];
        let is_last = index == self.segment_count() - 1;

        Some(SegmentWindow {
            start,
            end,
            rendered_duration: if is_last {
                end - start
            } else {
                end - start + self.transition
            },
            fade_in: index > 0,
            fade_out: !is_last,
        })
    }

    /// Iterate over all windows in order.
    pub fn windows(&self) -> impl Iterator<Item = SegmentWindow> + '_ {
        (0..self.segment_count()).filter_map(move |i| self.window(i))
    }

    /// Length of the concatenation after overlapping adjacent windows by
    /// one transition each.
    pub fn concatenated_duration(&self) -> f64 {
        let rendered: f64 = self.windows().map(|w| w.rendered_duration).sum();
        let overlaps = (self.segment_count().saturating_sub(1)) as f64 * self.transition;
        rendered - overlaps
    }

    /// Where the final output must be cut, guarding rounding overshoot.
    pub fn trimmed_end(&self) -> f64 {
        self.total_duration().min(self.concatenated_duration())
    }
}
