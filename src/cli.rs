//! Command-line interface for slidecast
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Silence-synchronized slideshow planner
#[derive(Parser, Debug)]
#[command(
    name = "slidecast",
    version,
    about = "Plan a slideshow that changes slides during narration pauses"
)]
pub struct Cli {
    /// Subcommand to execute; omitted means generate
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: plan summary, -vv: per-clip details)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Media directory containing images and video clips
    #[arg(long, short = 'm', value_name = "DIR")]
    pub media: Option<PathBuf>,

    /// Narration WAV file (default: audio.wav in the media directory)
    #[arg(long, short = 'a', value_name = "FILE")]
    pub audio: Option<PathBuf>,

    /// Write the plan to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Canvas size: preset name or WIDTHxHEIGHT
    #[arg(long, short = 's', value_name = "SIZE")]
    pub size: Option<String>,

    /// Output frame rate
    #[arg(long, value_name = "FPS")]
    pub fps: Option<u32>,

    /// Cross-fade duration. Examples: 1, 0.5, 500ms, 2s
    #[arg(long, short = 't', value_name = "DURATION", value_parser = parse_secs)]
    pub transition: Option<f64>,

    /// Disable Ken Burns motion on image clips
    #[arg(long)]
    pub no_animation: bool,

    /// Seed for reproducible media and animation choices
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

/// Parse a duration string into seconds.
///
/// Supports bare numbers (seconds, fractions allowed) and any format
/// accepted by `humantime` (`500ms`, `2s`, `1m30s`).
fn parse_secs(s: &str) -> Result<f64, String> {
    let s = s.trim();
    // Bare number → seconds
    if let Ok(secs) = s.parse::<f64>() {
        if !secs.is_finite() || secs < 0.0 {
            return Err(format!("invalid duration: {}", s));
        }
        return Ok(secs);
    }
    humantime::parse_duration(s)
        .map(|d| d.as_secs_f64())
        .map_err(|e| e.to_string())
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the built-in canvas size presets
    Sizes,

    /// Detect narration pauses and print their start times
    Pauses {
        /// WAV file to analyze
        #[arg(value_name = "FILE")]
        audio: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
