//! Wires configuration, media scanning, pause detection, and timeline
//! construction into a composition plan.

use crate::animation::{AnimationKind, AnimationSpec, Easing};
use crate::audio::silence::{SilenceConfig, detect_pauses};
use crate::audio::wav::WavAudio;
use crate::cli::Cli;
use crate::config::Config;
use crate::error::{Result, SlidecastError};
use crate::media::{MediaItem, find_default_audio, scan_media_dir};
use crate::output;
use crate::plan::{ClipSpec, CompositionPlan, Compositor, JsonPlanWriter};
use crate::slideshow::SlideshowCursor;
use crate::timeline::Timeline;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

/// Media directory used when neither the CLI nor the config names one.
const DEFAULT_MEDIA_DIR: &str = "media";

/// Everything `build_plan` needs beyond the config.
pub struct PlanRequest {
    pub media_dir: PathBuf,
    pub audio: PathBuf,
    pub seed: Option<u64>,
    pub quiet: bool,
}

/// Load configuration, honoring `--config`, environment overrides, and
/// per-run CLI flags, in that order of increasing precedence.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        // An explicitly named config file must exist.
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&Config::default_path())?,
    }
    .with_env_overrides();

    if let Some(size) = &cli.size {
        config.video.size = size.clone();
    }
    if let Some(fps) = cli.fps {
        config.video.fps = fps;
    }
    if let Some(transition) = cli.transition {
        config.video.transition = transition;
    }
    if cli.no_animation {
        config.animation.enabled = false;
    }
    if let Some(media) = &cli.media {
        config.slideshow.media_dir = Some(media.display().to_string());
    }
    if let Some(audio) = &cli.audio {
        config.audio.source = Some(audio.display().to_string());
    }

    config.validate()?;
    Ok(config)
}

/// Resolve the media directory from config, falling back to `media/`.
pub fn resolve_media_dir(config: &Config) -> PathBuf {
    config
        .slideshow
        .media_dir
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MEDIA_DIR))
}

/// Resolve the narration file: explicit source, or a well-known name in
/// the media directory.
pub fn resolve_audio(config: &Config, media_dir: &Path) -> Result<PathBuf> {
    if let Some(source) = &config.audio.source {
        return Ok(PathBuf::from(source));
    }
    find_default_audio(media_dir).ok_or_else(|| SlidecastError::SourceNotFound {
        path: media_dir.join("audio.wav").display().to_string(),
    })
}

fn silence_config(config: &Config) -> SilenceConfig {
    SilenceConfig {
        min_pause: config.audio.min_pause,
        noise_threshold_db: config.audio.noise_threshold_db,
        min_interval: config.audio.min_interval,
    }
}

/// Pick the animation for one media item, or None for videos and disabled
/// animation. Videos already carry motion; layering Ken Burns on top reads
/// as camera shake.
fn animation_for(item: &MediaItem, config: &Config, rng: &mut StdRng) -> Option<AnimationSpec> {
    if !config.animation.enabled || item.is_video() {
        return None;
    }

    let kind = if config.animation.random {
        AnimationKind::random(rng)
    } else {
        AnimationKind::from_name(&config.animation.kind)
    };
    if kind == AnimationKind::None {
        return None;
    }

    Some(AnimationSpec::new(
        kind,
        config.animation.intensity,
        Easing::from_name(&config.animation.easing),
    ))
}

/// Build the composition plan: scan media, probe the narration, detect
/// pauses, and assign one clip per timeline segment.
///
/// A narration that cannot be decoded at all is fatal (the plan needs its
/// duration); a pause detection failure on an otherwise readable file only
/// degrades the timeline to a single segment.
pub fn build_plan(config: &Config, request: &PlanRequest) -> Result<CompositionPlan> {
    let pool = scan_media_dir(&request.media_dir);
    if pool.is_empty() {
        return Err(SlidecastError::MediaDirEmpty {
            dir: request.media_dir.display().to_string(),
        });
    }

    let narration = WavAudio::open(&request.audio)?;
    let audio_duration = narration.duration();
    if audio_duration <= 0.0 {
        return Err(SlidecastError::AudioDecode {
            message: format!("{} contains no audio samples", request.audio.display()),
        });
    }

    let pauses = detect_pauses(&request.audio, silence_config(config), request.quiet);
    let timeline = Timeline::build(audio_duration, &pauses, config.video.transition)?;

    let cursor = match request.seed {
        Some(seed) => SlideshowCursor::with_seed(
            pool,
            timeline.change_points(),
            config.slideshow.random_loop,
            seed,
        )?,
        None => SlideshowCursor::new(pool, timeline.change_points(), config.slideshow.random_loop)?,
    };

    let mut animation_rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut clips = Vec::with_capacity(timeline.segment_count());
    for segment in cursor {
        let window = timeline
            .window(segment.index)
            .ok_or_else(|| SlidecastError::InvariantViolation {
                message: format!("segment {} has no timeline window", segment.index),
            })?;

        let animation = animation_for(&segment.item, config, &mut animation_rng);
        clips.push(ClipSpec {
            source: segment.item.path.clone(),
            kind: segment.item.kind,
            start_time: window.start,
            end_time: window.end,
            rendered_duration: window.rendered_duration,
            fade_in: window.fade_in,
            fade_out: window.fade_out,
            animation,
        });
    }

    Ok(CompositionPlan {
        canvas: config.canvas()?,
        fps: config.video.fps,
        transition: config.video.transition,
        audio: request.audio.clone(),
        audio_duration,
        trimmed_end: timeline.trimmed_end(),
        clips,
    })
}

/// The default command: plan the slideshow and emit it.
pub fn run_generate(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let media_dir = resolve_media_dir(&config);
    let audio = resolve_audio(&config, &media_dir)?;

    let request = PlanRequest {
        media_dir,
        audio,
        seed: cli.seed,
        quiet: cli.quiet,
    };
    let plan = build_plan(&config, &request)?;

    let mut compositor: Box<dyn Compositor> = match &cli.output {
        Some(path) => Box::new(JsonPlanWriter::to_file(path)),
        None => Box::new(JsonPlanWriter::to_stdout()),
    };
    compositor.compose(&plan)?;

    if !cli.quiet && cli.verbose >= 1 {
        output::render_plan_summary(&plan);
    }
    Ok(())
}

/// The `pauses` command: print detected pause starts, one per line.
pub fn run_pauses(cli: &Cli, audio: &Path) -> Result<()> {
    let config = load_config(cli)?;

    let narration = WavAudio::open(audio)?;
    let pauses = crate::audio::silence::SilenceDetector::detect(&narration, silence_config(&config));

    for pause in &pauses {
        println!("{:.3}", pause);
    }
    if !cli.quiet {
        output::info(&format!("{} pause(s) detected", pauses.len()));
    }
    Ok(())
}

/// The `sizes` command: list canvas presets.
pub fn run_sizes() {
    for (name, size) in crate::sizes::PRESETS {
        println!("{:<16} {}", name, size);
    }
}
