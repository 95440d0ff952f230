//! Supported lecture media kinds, detected by file extension.
//!
//! Detection happens before any bytes are read or uploaded so an unsupported
//! file fails fast with a local error instead of burning an upstream call.

use std::path::Path;

/// Broad media category of a lecture file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Pdf,
    Docx,
    Image,
    Text,
}

/// Map a file extension to its media kind and mime type.
/// Returns None for unsupported or missing extensions.
pub fn detect(path: &Path) -> Option<(MediaKind, &'static str)> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let (kind, mime) = match ext.as_str() {
        "mp3" => (MediaKind::Audio, "audio/mpeg"),
        "wav" => (MediaKind::Audio, "audio/wav"),
        "m4a" => (MediaKind::Audio, "audio/mp4"),
        "flac" => (MediaKind::Audio, "audio/flac"),
        "ogg" => (MediaKind::Audio, "audio/ogg"),
        "pdf" => (MediaKind::Pdf, "application/pdf"),
        "docx" => (
            MediaKind::Docx,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ),
        "png" => (MediaKind::Image, "image/png"),
        "jpg" | "jpeg" => (MediaKind::Image, "image/jpeg"),
        "webp" => (MediaKind::Image, "image/webp"),
        "heic" => (MediaKind::Image, "image/heic"),
        "txt" => (MediaKind::Text, "text/plain"),
        _ => return None,
    };
    Some((kind, mime))
}
