//! Safe static resolver: maps a caller-supplied relative path onto a file
//! that is guaranteed to live inside a trusted root.

use std::path::{Path, PathBuf};

pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Outcome of one resolution. `Rejected` covers traversal, missing files and
/// directories alike; callers must not tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    File {
        path: PathBuf,
        content_type: &'static str,
    },
    Rejected,
}

impl ResolvedPath {
    pub fn is_rejected(&self) -> bool {
        matches!(self, ResolvedPath::Rejected)
    }
}

/// Resolve `relative` under `root`.
///
/// Both sides are canonicalized, so `..` segments and symlinks pointing
/// outside the root are rejected after resolution, not by string matching.
pub fn resolve(root: &Path, relative: &str) -> ResolvedPath {
    if relative.contains('\0') {
        return ResolvedPath::Rejected;
    }
    let candidate = Path::new(relative);
    if candidate.is_absolute() || candidate.has_root() {
        return ResolvedPath::Rejected;
    }

    let root = match root.canonicalize() {
        Ok(root) => root,
        Err(e) => {
            tracing::warn!("[Static] Root {} is unavailable: {}", root.display(), e);
            return ResolvedPath::Rejected;
        }
    };

    let target = match root.join(candidate).canonicalize() {
        Ok(target) => target,
        Err(_) => return ResolvedPath::Rejected,
    };

    if !target.starts_with(&root) {
        tracing::warn!("[Static] Blocked path outside root: {:?}", relative);
        return ResolvedPath::Rejected;
    }

    match std::fs::metadata(&target) {
        Ok(meta) if meta.is_file() => ResolvedPath::File {
            content_type: content_type_for(&target),
            path: target,
        },
        _ => ResolvedPath::Rejected,
    }
}

/// Media type by file extension (case-insensitive).
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("atlas") => "text/plain; charset=utf-8",
        _ => FALLBACK_CONTENT_TYPE,
    }
}
