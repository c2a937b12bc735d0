//! The closed set of url kinds and how each one is composed.
//!
//! | Kind         | Shape                                  |
//! |--------------|----------------------------------------|
//! | `Bundle`     | `{prefix}{bundle url}`                 |
//! | `DebugAsset` | `{prefix}asset/{path}?{hex}`           |
//! | `HashedFile` | `{prefix}file/{dir}/{stem}-{hex}.{ext}`|
//! | `CachedFile` | `{prefix}cached/{path}`                |
//! | `Absolute`   | `{path}` (no prefix)                   |

use crate::asset::ContentDigest;
use crate::core::{ROOT_MARKER, encode_segments};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind<'a> {
    /// Bundle with its own versioned url.
    Bundle { url: &'a str },
    /// Single unbundled asset. The digest goes in the query string so assets
    /// of one directory still list together in browser dev tools. Segments
    /// of `path` are percent-encoded like normalized file paths.
    DebugAsset {
        path: &'a str,
        digest: &'a ContentDigest,
    },
    /// Raw file with the digest spliced into its file name.
    /// `path` is already normalized; `digest` is lowercase hex.
    HashedFile { path: &'a str, digest: &'a str },
    /// Raw file whose caching is handled elsewhere (e.g. ETags).
    CachedFile { path: &'a str },
    /// Already resolved path.
    Absolute { path: &'a str },
}

impl UrlKind<'_> {
    /// Compose the url before rewriting.
    ///
    /// With `hash_suffix` off, digests are left out of every kind.
    pub fn compose(&self, prefix: &str, hash_suffix: bool) -> String {
        match *self {
            Self::Bundle { url } => format!("{prefix}{url}"),
            Self::DebugAsset { path, digest } => {
                let path = path.strip_prefix(ROOT_MARKER).unwrap_or(path);
                let path = encode_segments(&path.replace('\\', "/"));
                let sep = if path.starts_with('/') { "" } else { "/" };
                if hash_suffix {
                    format!("{prefix}asset{sep}{path}?{}", digest.to_hex())
                } else {
                    format!("{prefix}asset{sep}{path}")
                }
            }
            Self::HashedFile { path, digest } => {
                if hash_suffix {
                    format!("{prefix}file/{}", insert_digest(path, digest))
                } else {
                    format!("{prefix}file/{path}")
                }
            }
            Self::CachedFile { path } => format!("{prefix}cached/{path}"),
            Self::Absolute { path } => path.trim_start_matches([ROOT_MARKER, '/']).to_string(),
        }
    }
}

/// Insert `-{digest}` before the last `.` of the final segment, or append it
/// when the final segment has no extension.
///
/// `css/site.css` -> `css/site-abcd.css`, `v1.2/logo` -> `v1.2/logo-abcd`
fn insert_digest(path: &str, digest: &str) -> String {
    let name_start = path.rfind('/').map_or(0, |idx| idx + 1);
    match path[name_start..].rfind('.') {
        Some(dot) => {
            let at = name_start + dot;
            format!("{}-{}{}", &path[..at], digest, &path[at..])
        }
        None => format!("{path}-{digest}"),
    }
}
