//! Terminal rendering for plan summaries and diagnostics.
//! All human-facing text goes to stderr; stdout is reserved for plan JSON.

use crate::plan::CompositionPlan;

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Print a warning line.
pub fn warn(message: &str) {
    eprintln!("{YELLOW}warning:{RESET} {message}");
}

/// Print an error line.
pub fn error(message: &str) {
    eprintln!("{RED}error:{RESET} {message}");
}

/// Print an informational line.
pub fn info(message: &str) {
    eprintln!("{message}");
}

/// Format seconds as `m:ss.cc`.
fn format_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as u64;
    let rest = seconds - minutes as f64 * 60.0;
    format!("{}:{:05.2}", minutes, rest)
}

/// Render detected pause starts, one per line.
pub fn render_pauses(pauses: &[f64]) {
    if pauses.is_empty() {
        eprintln!("{DIM}no pauses detected{RESET}");
        return;
    }
    for (i, pause) in pauses.iter().enumerate() {
        eprintln!("{:>3}  {}", i + 1, format_time(*pause));
    }
}

/// Render a one-line-per-clip plan summary.
pub fn render_plan_summary(plan: &CompositionPlan) {
    eprintln!(
        "{GREEN}plan{RESET}: {} clip(s), {} @ {} fps, audio {}",
        plan.clips.len(),
        plan.canvas,
        plan.fps,
        format_time(plan.audio_duration),
    );

    for (i, clip) in plan.clips.iter().enumerate() {
        let name = clip
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| clip.source.display().to_string());
        let animation = clip
            .animation
            .map(|a| format!(" {DIM}{:?}{RESET}", a.kind))
            .unwrap_or_default();
        let fades = match (clip.fade_in, clip.fade_out) {
            (true, true) => " <>",
            (true, false) => " <",
            (false, true) => " >",
            (false, false) => "",
        };
        eprintln!(
            "{:>3}  {} - {}  {}{}{}",
            i + 1,
            format_time(clip.start_time),
            format_time(clip.end_time),
            name,
            animation,
            fades,
        );
    }

    if plan.trimmed_end < plan.audio_duration {
        eprintln!(
            "{DIM}output trimmed at {}{RESET}",
            format_time(plan.trimmed_end)
        );
    }
}
