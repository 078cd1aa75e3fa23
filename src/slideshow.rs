//! Assigns media items to timeline segments.
//!
//! The first pass walks the pool in name order so every item appears before
//! any repeats. Once the pool is exhausted the cursor either picks randomly
//! (avoiding back-to-back repeats) or cycles through the pool again.

use crate::error::{Result, SlidecastError};
use crate::media::MediaItem;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// One planned slideshow slot: which item plays and when.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub item: MediaItem,
    pub start_time: f64,
    pub end_time: f64,
    /// Position of this segment on the timeline, starting at 0.
    pub index: usize,
}

/// Walks the change points, handing out one media item per segment.
pub struct SlideshowCursor {
    pool: Vec<MediaItem>,
    change_points: Vec<f64>,
    position: usize,
    last_choice: Option<usize>,
    random_loop: bool,
    rng: StdRng,
}

impl SlideshowCursor {
    /// Build a cursor over the media pool and change points.
    ///
    /// `random_loop` controls what happens after every item has been used
    /// once: random selection, or cycling through the pool in order.
    pub fn new(pool: Vec<MediaItem>, change_points: &[f64], random_loop: bool) -> Result<Self> {
        Self::with_rng(pool, change_points, random_loop, StdRng::from_os_rng())
    }

    /// Like [`new`](Self::new) but seeded, for reproducible output.
    pub fn with_seed(
        pool: Vec<MediaItem>,
        change_points: &[f64],
        random_loop: bool,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(pool, change_points, random_loop, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        pool: Vec<MediaItem>,
        change_points: &[f64],
        random_loop: bool,
        rng: StdRng,
    ) -> Result<Self> {
        if pool.is_empty() {
            return Err(SlidecastError::InvariantViolation {
                message: "media pool is empty".to_string(),
            });
        }

        Ok(Self {
            pool,
            change_points: change_points.to_vec(),
            position: 0,
            last_choice: None,
            random_loop,
            rng,
        })
    }

    /// Total number of segments this cursor will produce.
    pub fn total(&self) -> usize {
        self.change_points.len().saturating_sub(1)
    }

    /// Segments not yet handed out.
    pub fn remaining(&self) -> usize {
        self.total() - self.position
    }

    /// Rewind to the first segment. Random picks after the first pass are
    /// not replayed; only the boundaries are stable across a reset.
    pub fn reset(&mut self) {
        self.position = 0;
        self.last_choice = None;
    }

    fn pick(&mut self) -> usize {
        let n = self.pool.len();
        if self.position < n {
            return self.position;
        }

        if self.random_loop && n > 1 {
            let candidates: Vec<usize> = (0..n)
                .filter(|&i| Some(i) != self.last_choice)
                .collect();
            return *candidates.choose(&mut self.rng).unwrap_or(&0);
        }

        self.position % n
    }
}

impl Iterator for SlideshowCursor {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.position >= self.total() {
            return None;
        }

        let choice = self.pick();
        self.last_choice = Some(choice);

        let segment = Segment {
            item: self.pool[choice].clone(),
            start_time: self.change_points[self.position],
            end_time: self.change_points[self.position + 1],
            index: self.position,
        };
        self.position += 1;
        Some(segment)
    }
}
