//! Application-relative logical paths.
//!
//! A logical path is rooted at `~` (the application root) and may use either
//! `/` or `\` as separator. Internally it is always stored with `/`.

use std::borrow::Borrow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::{Error, Result};

/// Root marker every logical path starts with.
pub const ROOT_MARKER: char = '~';

/// Characters left literal inside a url path segment (RFC 3986 unreserved,
/// minus `~` so the root marker can never leak into a url).
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Validated application-relative path.
///
/// Invariants:
/// - Starts with `~`
/// - Separators are `/`
/// - No trailing `/` (except the root itself, stored as `~`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalPath(Arc<str>);

impl LogicalPath {
    /// Parse a logical path, rejecting anything without the root marker.
    ///
    /// `.` and `..` segments are folded; a path that climbs above `~` is
    /// rejected like a missing marker.
    pub fn new(path: &str) -> Result<Self> {
        let invalid = || Error::InvalidPath {
            path: path.to_string(),
        };
        let rest = path.strip_prefix(ROOT_MARKER).ok_or_else(invalid)?;
        let rest = to_forward_slashes(rest);
        let segments = fold_segments(Vec::new(), &rest).ok_or_else(invalid)?;
        Ok(Self::from_segments(&segments))
    }

    fn from_segments(segments: &[&str]) -> Self {
        if segments.is_empty() {
            return Self::root();
        }
        Self(Arc::from(format!("~/{}", segments.join("/"))))
    }

    /// The application root `~`.
    pub fn root() -> Self {
        Self(Arc::from("~"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path below the root, without the marker or leading slash.
    ///
    /// `~/css/site.css` -> `css/site.css`, `~` -> ``
    pub fn relative(&self) -> &str {
        self.0.trim_start_matches(ROOT_MARKER).trim_start_matches('/')
    }

    /// Last path segment, `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        let rel = self.relative();
        if rel.is_empty() {
            return None;
        }
        rel.rsplit('/').next()
    }

    /// Containing directory. The root is its own parent.
    ///
    /// `~/css/site.css` -> `~/css`, `~/site.css` -> `~`
    pub fn parent(&self) -> Self {
        match self.0.rfind('/') {
            Some(idx) if idx > 1 => Self(Arc::from(&self.0[..idx])),
            _ => Self::root(),
        }
    }

    /// Resolve `name` against this path treated as a directory.
    ///
    /// - `~/...` names are already absolute and parsed as-is
    /// - `/...` names are resolved from the root
    /// - `.` and `..` segments are folded; climbing above `~` is rejected
    pub fn join(&self, name: &str) -> Result<Self> {
        if name.starts_with(ROOT_MARKER) {
            return Self::new(name);
        }

        let name = to_forward_slashes(name);
        let base = if name.starts_with('/') {
            Vec::new()
        } else {
            self.relative().split('/').filter(|s| !s.is_empty()).collect()
        };

        let segments = fold_segments(base, &name).ok_or_else(|| Error::InvalidPath {
            path: format!("{}/{}", self.0, name),
        })?;
        Ok(Self::from_segments(&segments))
    }

    /// Map onto a file system path below `root`.
    pub fn to_fs_path(&self, root: &Path) -> PathBuf {
        self.relative()
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
    }
}

impl std::fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LogicalPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for LogicalPath {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl serde::Serialize for LogicalPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

/// Convert a logical path into url-safe segments.
///
/// `~\img\my logo.png` -> `img/my%20logo.png`
///
/// Each segment is percent-encoded on its own, so an encoded character can
/// never be mistaken for a separator. `.` and `..` are folded first, so the
/// result never points above the root.
pub fn normalize(path: &str) -> Result<String> {
    let path = LogicalPath::new(path)?;
    Ok(encode_segments(path.relative()))
}

/// Percent-encode every `/`-separated segment of `path`, keeping the
/// separators (and so any leading `/`).
pub fn encode_segments(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Apply the segments of `path` on top of `base`.
///
/// Returns `None` when a `..` would climb above the root.
fn fold_segments<'a>(mut base: Vec<&'a str>, path: &'a str) -> Option<Vec<&'a str>> {
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                base.pop()?;
            }
            other => base.push(other),
        }
    }
    Some(base)
}

#[inline]
fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}
