//! Url generator: logical paths and assets → public urls.

use std::path::PathBuf;
use std::sync::Arc;

use super::{UrlKind, UrlRewrite};
use crate::asset::{Asset, Bundle, ContentDirectory, hash_reader};
use crate::core::{LogicalPath, ROOT_MARKER, normalize};
use crate::debug;
use crate::error::{Error, Result};

/// Immutable generator configuration, fixed at startup.
#[derive(Clone)]
pub struct UrlConfig {
    /// Leave digests out of every url.
    pub disable_hash_suffix: bool,
    /// Where raw files are looked up and hashed.
    pub content_root: Arc<dyn ContentDirectory>,
    /// Mount point, e.g. `_assets/`.
    pub mount_prefix: String,
    /// Applied last to every url.
    pub rewrite: UrlRewrite,
}

impl std::fmt::Debug for UrlConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlConfig")
            .field("disable_hash_suffix", &self.disable_hash_suffix)
            .field("mount_prefix", &self.mount_prefix)
            .field("rewrite", &self.rewrite)
            .finish_non_exhaustive()
    }
}

/// Stateless url generator. Cheap to share across threads.
#[derive(Debug, Clone)]
pub struct UrlGenerator {
    config: UrlConfig,
}

impl UrlGenerator {
    pub fn new(config: UrlConfig) -> Self {
        Self { config }
    }

    /// Compose a url of any kind and pass it through the rewrite hook.
    pub fn render(&self, kind: &UrlKind<'_>) -> String {
        let url = kind.compose(&self.config.mount_prefix, !self.config.disable_hash_suffix);
        self.config.rewrite.apply(&url)
    }

    /// `{prefix}{bundle url}`. Bundles version themselves.
    pub fn bundle_url<B: Bundle + ?Sized>(&self, bundle: &B) -> String {
        self.render(&UrlKind::Bundle { url: bundle.url() })
    }

    /// Debug-mode url for a single asset, digest in the query string.
    pub fn asset_url<A: Asset + ?Sized>(&self, asset: &A) -> String {
        self.render(&UrlKind::DebugAsset {
            path: asset.path(),
            digest: asset.digest(),
        })
    }

    /// Hashed url for a raw file under the content root.
    ///
    /// `~/css/site.css` -> `{prefix}file/css/site-{hex}.css`
    pub fn raw_file_url(&self, filename: &str) -> Result<String> {
        require_rooted("filename", filename)?;

        let path = LogicalPath::new(filename)?;
        let root = &self.config.content_root;
        if !root.exists(&path) {
            return Err(Error::NotFound {
                path: filename.to_string(),
            });
        }

        if self.config.disable_hash_suffix {
            return self.raw_file_url_with_digest(filename, "");
        }

        let reader = root
            .open_read(&path)
            .map_err(|e| Error::io(PathBuf::from(filename), e))?;
        let digest = hash_reader(reader).map_err(|e| Error::io(PathBuf::from(filename), e))?;

        self.raw_file_url_with_digest(filename, &digest.to_hex())
    }

    /// Hashed url for a raw file whose digest is already known.
    ///
    /// The file is not read, nor checked for existence.
    pub fn raw_file_url_with_digest(&self, filename: &str, digest: &str) -> Result<String> {
        require_rooted("filename", filename)?;

        let path = normalize(filename)?;
        let url = self.render(&UrlKind::HashedFile {
            path: &path,
            digest,
        });
        debug!("url"; "{} -> {}", filename, url);
        Ok(url)
    }

    /// Unhashed url for a raw file, cache busting handled by another layer.
    pub fn cached_file_url(&self, filename: &str) -> Result<String> {
        require_rooted("filename", filename)?;

        let path = normalize(filename)?;
        Ok(self.render(&UrlKind::CachedFile { path: &path }))
    }

    /// Url for an already resolved application path.
    pub fn absolute_path_url(&self, path: &str) -> Result<String> {
        require_rooted("path", path)?;
        Ok(self.render(&UrlKind::Absolute { path }))
    }
}

fn require_rooted(param: &'static str, value: &str) -> Result<()> {
    if value.starts_with(ROOT_MARKER) {
        Ok(())
    } else {
        Err(Error::invalid_argument(param, value))
    }
}
