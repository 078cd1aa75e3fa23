//! Media pool: item types and directory scanning.

use crate::defaults::AUDIO_CANDIDATES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Supported image extensions (lowercase, without the dot).
const IMAGE_EXTS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "tiff", "bmp"];

/// Supported video extensions (lowercase, without the dot).
const VIDEO_EXTS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v", "flv"];

/// Whether a media item is a still image or a video clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

/// A single slideshow source. Owned by the caller; the planner only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub path: PathBuf,
    pub kind: MediaKind,
    /// Display name, normally the file name.
    pub name: String,
}

impl MediaItem {
    pub fn new(path: PathBuf, kind: MediaKind) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, kind, name }
    }

    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::Image
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// Classify a path by its extension.
fn kind_for(path: &Path) -> Option<MediaKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if IMAGE_EXTS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Scan a directory for media files, sorted by file name.
///
/// Unknown extensions and subdirectories are skipped. A missing directory
/// yields an empty pool; callers decide whether that is an error.
pub fn scan_media_dir(dir: &Path) -> Vec<MediaItem> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut items: Vec<MediaItem> = entries
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if !path.is_file() {
                return None;
            }
            kind_for(&path).map(|kind| MediaItem::new(path, kind))
        })
        .collect();

    items.sort_by(|a, b| a.name.cmp(&b.name));
    items
}

/// Find a default audio file in the given directory.
///
/// Probes the well-known names in priority order (`audio.wav` first).
pub fn find_default_audio(dir: &Path) -> Option<PathBuf> {
    AUDIO_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}
