//! Error types for slidecast.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlidecastError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Media pool errors
    #[error("No media files found in {dir} (expected images or videos)")]
    MediaDirEmpty { dir: String },

    // Missing media or audio sources at composition time
    #[error("Source file not found: {path}")]
    SourceNotFound { path: String },

    // Audio decoding errors
    #[error("Audio decode failed: {message}")]
    AudioDecode { message: String },

    // Defensive checks that should never fire on valid inputs
    #[error("Timeline invariant violated: {message}")]
    InvariantViolation { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Plan serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SlidecastError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_file_not_found_display() {
        let error = SlidecastError::ConfigFileNotFound {
            path: "/path/to/config.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found at /path/to/config.toml"
        );
    }

    #[test]
    fn test_config_invalid_value_display() {
        let error = SlidecastError::ConfigInvalidValue {
            key: "video.fps".to_string(),
            message: "must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for video.fps: must be positive"
        );
    }

    #[test]
    fn test_media_dir_empty_display() {
        let error = SlidecastError::MediaDirEmpty {
            dir: "media".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No media files found in media (expected images or videos)"
        );
    }

    #[test]
    fn test_source_not_found_display() {
        let error = SlidecastError::SourceNotFound {
            path: "media/beach.jpg".to_string(),
        };
        assert_eq!(error.to_string(), "Source file not found: media/beach.jpg");
    }

    #[test]
    fn test_audio_decode_display() {
        let error = SlidecastError::AudioDecode {
            message: "not a WAV file".to_string(),
        };
        assert_eq!(error.to_string(), "Audio decode failed: not a WAV file");
    }

    #[test]
    fn test_invariant_violation_display() {
        let error = SlidecastError::InvariantViolation {
            message: "change points not monotonic".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Timeline invariant violated: change points not monotonic"
        );
    }

    #[test]
    fn test_other_display() {
        let error = SlidecastError::Other("unexpected error".to_string());
        assert_eq!(error.to_string(), "unexpected error");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: SlidecastError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_str = "invalid = toml = syntax";
        let toml_error = toml::from_str::<toml::Value>(toml_str).unwrap_err();
        let error: SlidecastError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<SlidecastError>();
        assert_sync::<SlidecastError>();
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: SlidecastError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }
}
