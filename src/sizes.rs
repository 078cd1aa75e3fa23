//! Canvas size presets and parsing.
//!
//! Accepts either a named preset (`hd_720p`, `portrait_1080p`, ...) or an
//! explicit `WIDTHxHEIGHT` string such as `1280x720`.

use crate::error::{Result, SlidecastError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse a preset name (case-insensitive) or a `WIDTHxHEIGHT` string.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if let Some(&(_, size)) = PRESETS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        {
            return Ok(size);
        }

        if let Some((w, h)) = trimmed.to_ascii_lowercase().split_once('x')
            && let (Ok(width), Ok(height)) = (w.trim().parse::<u32>(), h.trim().parse::<u32>())
            && width > 0
            && height > 0
        {
            return Ok(Self { width, height });
        }

        Err(SlidecastError::ConfigInvalidValue {
            key: "size".to_string(),
            message: format!(
                "cannot parse `{}`; use a preset ({}) or WIDTHxHEIGHT like 1280x720",
                trimmed,
                PRESETS
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
    }

    /// Aspect ratio as width over height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// All named canvas presets, grouped roughly by orientation.
pub const PRESETS: &[(&str, PixelSize)] = &[
    // Test sizes for quick previews
    ("test_tiny", PixelSize::new(320, 240)),
    ("test_small", PixelSize::new(480, 360)),
    ("test_medium", PixelSize::new(640, 480)),
    // Landscape
    ("hd_720p", PixelSize::new(1280, 720)),
    ("full_hd_1080p", PixelSize::new(1920, 1080)),
    ("widescreen_2k", PixelSize::new(2560, 1440)),
    ("uhd_4k", PixelSize::new(3840, 2160)),
    ("cinema_4k", PixelSize::new(4096, 2160)),
    // Portrait (short-video platforms)
    ("portrait_small", PixelSize::new(180, 320)),
    ("portrait_test", PixelSize::new(360, 640)),
    ("portrait_720p", PixelSize::new(720, 1280)),
    ("portrait_1080p", PixelSize::new(1080, 1920)),
    // Square
    ("square_test", PixelSize::new(480, 480)),
    ("square_720", PixelSize::new(720, 720)),
    ("square_1080", PixelSize::new(1080, 1080)),
];

/// Look up a preset by name (case-insensitive).
pub fn preset(name: &str) -> Option<PixelSize> {
    PRESETS
        .iter()
        .find(|(preset_name, _)| preset_name.eq_ignore_ascii_case(name))
        .map(|&(_, size)| size)
}
