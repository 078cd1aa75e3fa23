use crate::defaults;
use crate::error::{Result, SlidecastError};
use crate::sizes::PixelSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub video: VideoConfig,
    pub slideshow: SlideshowConfig,
    pub animation: AnimationConfig,
}

/// Pause detection configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Narration file; when absent, well-known names in the media
    /// directory are probed.
    pub source: Option<String>,
    pub min_pause: f64,
    pub noise_threshold_db: f64,
    pub min_interval: f64,
}

/// Output canvas configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VideoConfig {
    /// Preset name or `WIDTHxHEIGHT`.
    pub size: String,
    pub fps: u32,
    pub transition: f64,
}

/// Media pool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SlideshowConfig {
    pub media_dir: Option<String>,
    /// After the first pass through the pool: random picks when true,
    /// in-order cycling when false.
    pub random_loop: bool,
}

/// Ken Burns configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub enabled: bool,
    /// Pick a random kind per clip instead of `kind`.
    pub random: bool,
    pub kind: String,
    pub intensity: f64,
    pub easing: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            source: None,
            min_pause: defaults::MIN_PAUSE_SECS,
            noise_threshold_db: defaults::NOISE_THRESHOLD_DB,
            min_interval: defaults::MIN_INTERVAL_SECS,
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            size: defaults::CANVAS_PRESET.to_string(),
            fps: defaults::FPS,
            transition: defaults::TRANSITION_SECS,
        }
    }
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            media_dir: None,
            random_loop: true,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            random: true,
            kind: "zoom_in".to_string(),
            intensity: defaults::ANIMATION_INTENSITY,
            easing: defaults::EASING.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing or contains invalid TOML.
    /// Missing fields use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SlidecastError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                SlidecastError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file, or defaults if the file is missing.
    ///
    /// Invalid TOML is still an error; only absence falls back.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(SlidecastError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SLIDECAST_SIZE → video.size
    /// - SLIDECAST_MEDIA_DIR → slideshow.media_dir
    /// - SLIDECAST_AUDIO → audio.source
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(size) = std::env::var("SLIDECAST_SIZE")
            && !size.is_empty()
        {
            self.video.size = size;
        }

        if let Ok(dir) = std::env::var("SLIDECAST_MEDIA_DIR")
            && !dir.is_empty()
        {
            self.slideshow.media_dir = Some(dir);
        }

        if let Ok(audio) = std::env::var("SLIDECAST_AUDIO")
            && !audio.is_empty()
        {
            self.audio.source = Some(audio);
        }

        self
    }

    /// Reject values that cannot produce a usable plan.
    pub fn validate(&self) -> Result<()> {
        if self.video.fps == 0 {
            return Err(SlidecastError::ConfigInvalidValue {
                key: "video.fps".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.video.transition < 0.0 {
            return Err(SlidecastError::ConfigInvalidValue {
                key: "video.transition".to_string(),
                message: format!("must not be negative, got {}", self.video.transition),
            });
        }
        if self.audio.min_pause <= 0.0 {
            return Err(SlidecastError::ConfigInvalidValue {
                key: "audio.min_pause".to_string(),
                message: format!("must be positive, got {}", self.audio.min_pause),
            });
        }
        if !(0.0..=1.0).contains(&self.animation.intensity) {
            return Err(SlidecastError::ConfigInvalidValue {
                key: "animation.intensity".to_string(),
                message: format!("must be in 0..=1, got {}", self.animation.intensity),
            });
        }
        // Parse errors carry the preset list.
        self.canvas()?;
        Ok(())
    }

    /// Resolve the configured canvas size.
    pub fn canvas(&self) -> Result<PixelSize> {
        PixelSize::parse(&self.video.size)
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/slidecast/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("slidecast")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to serialize tests that modify environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // SAFETY: These helpers are only used in tests with ENV_LOCK held,
    // ensuring no concurrent access to environment variables.
    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) }
    }

    fn clear_slidecast_env() {
        remove_env("SLIDECAST_SIZE");
        remove_env("SLIDECAST_MEDIA_DIR");
        remove_env("SLIDECAST_AUDIO");
    }

    #[test]
    fn test_default_config_has_correct_values() {
        let config = Config::default();

        assert_eq!(config.audio.source, None);
        assert_eq!(config.audio.min_pause, 0.7);
        assert_eq!(config.audio.noise_threshold_db, -35.0);
        assert_eq!(config.audio.min_interval, 5.0);

        assert_eq!(config.video.size, "hd_720p");
        assert_eq!(config.video.fps, 24);
        assert_eq!(config.video.transition, 1.0);

        assert_eq!(config.slideshow.media_dir, None);
        assert!(config.slideshow.random_loop);

        assert!(config.animation.enabled);
        assert!(config.animation.random);
        assert_eq!(config.animation.intensity, 0.1);
        assert_eq!(config.animation.easing, "ease_in_out_quad");
    }

    #[test]
    fn test_load_from_toml_file() {
        let toml_content = r#"
            [audio]
            source = "voice.wav"
            min_pause = 1.2
            noise_threshold_db = -40.0
            min_interval = 8.0

            [video]
            size = "1920x1080"
            fps = 30
            transition = 0.5

            [slideshow]
            media_dir = "assets"
            random_loop = false

            [animation]
            enabled = false
            random = false
            kind = "pan_left"
            intensity = 0.2
            easing = "linear"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.audio.source, Some("voice.wav".to_string()));
        assert_eq!(config.audio.min_pause, 1.2);
        assert_eq!(config.audio.noise_threshold_db, -40.0);
        assert_eq!(config.audio.min_interval, 8.0);

        assert_eq!(config.video.size, "1920x1080");
        assert_eq!(config.video.fps, 30);
        assert_eq!(config.video.transition, 0.5);

        assert_eq!(config.slideshow.media_dir, Some("assets".to_string()));
        assert!(!config.slideshow.random_loop);

        assert!(!config.animation.enabled);
        assert_eq!(config.animation.kind, "pan_left");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_content = r#"
            [video]
            fps = 60
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.video.fps, 60);
        assert_eq!(config.video.size, "hd_720p");
        assert_eq!(config.audio.min_pause, 0.7);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let result = Config::load(Path::new("/nonexistent/slidecast.toml"));
        assert!(matches!(
            result,
            Err(SlidecastError::ConfigFileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/slidecast.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_invalid_toml_is_an_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"this is not [ valid toml").unwrap();

        let result = Config::load_or_default(temp_file.path());
        assert!(matches!(result, Err(SlidecastError::Config(_))));
    }

    #[test]
    fn test_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_slidecast_env();

        set_env("SLIDECAST_SIZE", "640x480");
        set_env("SLIDECAST_MEDIA_DIR", "/tmp/media");
        set_env("SLIDECAST_AUDIO", "/tmp/audio.wav");

        let config = Config::default().with_env_overrides();
        assert_eq!(config.video.size, "640x480");
        assert_eq!(config.slideshow.media_dir, Some("/tmp/media".to_string()));
        assert_eq!(config.audio.source, Some("/tmp/audio.wav".to_string()));

        clear_slidecast_env();
    }

    #[test]
    fn test_empty_env_vars_are_ignored() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_slidecast_env();

        set_env("SLIDECAST_SIZE", "");

        let config = Config::default().with_env_overrides();
        assert_eq!(config.video.size, "hd_720p");

        clear_slidecast_env();
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_fps() {
        let mut config = Config::default();
        config.video.fps = 0;
        assert!(matches!(
            config.validate(),
            Err(SlidecastError::ConfigInvalidValue { key, .. }) if key == "video.fps"
        ));
    }

    #[test]
    fn test_validate_rejects_negative_transition() {
        let mut config = Config::default();
        config.video.transition = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_min_pause() {
        let mut config = Config::default();
        config.audio.min_pause = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_intensity() {
        let mut config = Config::default();
        config.animation.intensity = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_size() {
        let mut config = Config::default();
        config.video.size = "gigantic".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_canvas_resolves_presets_and_dimensions() {
        let mut config = Config::default();
        let canvas = config.canvas().unwrap();
        assert_eq!((canvas.width, canvas.height), (1280, 720));

        config.video.size = "1920x1080".to_string();
        let canvas = config.canvas().unwrap();
        assert_eq!((canvas.width, canvas.height), (1920, 1080));
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = Config::default_path();
        assert!(path.ends_with("slidecast/config.toml"));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }
}
