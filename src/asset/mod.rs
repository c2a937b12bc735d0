//! Assets, bundles and the content they are read from.

mod digest;
mod dir;

pub use digest::{ContentDigest, hash_bytes, hash_reader};
pub use dir::{ContentDirectory, FsDirectory};

/// A bundle knows its own versioned url path.
pub trait Bundle {
    /// Url path relative to the mount prefix, e.g. `script/a1b2/app`.
    fn url(&self) -> &str;
}

impl Bundle for str {
    fn url(&self) -> &str {
        self
    }
}

impl Bundle for String {
    fn url(&self) -> &str {
        self
    }
}

/// A single asset served unbundled (debug mode).
pub trait Asset {
    /// Logical path, `~/scripts/app.js` or `/scripts/app.js`.
    fn path(&self) -> &str;

    fn digest(&self) -> &ContentDigest;
}

/// Asset with a known path and digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAsset {
    pub path: String,
    pub digest: ContentDigest,
}

impl StaticAsset {
    pub fn new(path: impl Into<String>, digest: ContentDigest) -> Self {
        Self {
            path: path.into(),
            digest,
        }
    }
}

impl Asset for StaticAsset {
    fn path(&self) -> &str {
        &self.path
    }

    fn digest(&self) -> &ContentDigest {
        &self.digest
    }
}
