//! Configuration management for `assetmark.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `[url]`     | Mount prefix, hashing, content root, rewrite base |
//! | `[compile]` | Stylesheet compiler options                       |
//!
//! # Example
//!
//! ```toml
//! [url]
//! prefix = "_assets/"
//! disable_hash_suffix = false
//! content_root = "static"
//! base = "https://cdn.example.com/"
//!
//! [compile]
//! minify = true
//! ```

mod util;

pub use util::find_config_file;

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::asset::FsDirectory;
use crate::compiler::Compiler;
use crate::error::{Error, Result};
use crate::url::{UrlConfig, UrlGenerator, UrlRewrite};

/// Default config file name.
pub const CONFIG_FILE: &str = "assetmark.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing assetmark.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Absolute path to the config file, empty when none was found
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Url generation settings
    pub url: UrlSection,

    /// Compiler settings
    pub compile: CompileSection,
}

/// `[url]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlSection {
    /// Mount point under which every url lives.
    pub prefix: String,
    /// Leave content digests out of urls.
    pub disable_hash_suffix: bool,
    /// Directory `~` maps to, relative to the project root.
    pub content_root: PathBuf,
    /// Prepended to every url (`/`, `/app/` or `https://cdn.example.com/`).
    /// Empty leaves urls untouched.
    pub base: String,
}

impl Default for UrlSection {
    fn default() -> Self {
        Self {
            prefix: "_assets/".into(),
            disable_hash_suffix: false,
            content_root: PathBuf::from("."),
            base: "/".into(),
        }
    }
}

/// `[compile]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileSection {
    /// Minify compiled stylesheets.
    pub minify: bool,
}

impl AssetConfig {
    /// Load configuration, searching upward from `start` for `config_name`.
    ///
    /// Without a config file, defaults apply and `start` is the project root.
    pub fn load(start: &Path, config_name: &Path) -> Result<Self> {
        match find_config_file(start, config_name) {
            Some(path) => Self::from_path(&path),
            None => Ok(Self {
                root: start.to_path_buf(),
                ..Self::default()
            }),
        }
    }

    /// Parse the config file at `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        config.config_path = path.to_path_buf();
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Directory `~` maps to.
    pub fn content_root(&self) -> PathBuf {
        self.root.join(&self.url.content_root)
    }

    /// Check settings that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if !util::is_valid_base(&self.url.base) {
            return Err(Error::Config(format!(
                "url.base must be empty, a `/`-rooted directory or an http(s) url, \
                 and end with `/`: `{}`",
                self.url.base
            )));
        }

        let content_root = self.content_root();
        if !content_root.is_dir() {
            return Err(Error::Config(format!(
                "url.content_root is not a directory: `{}`",
                content_root.display()
            )));
        }
        Ok(())
    }

    pub fn rewrite(&self) -> UrlRewrite {
        if self.url.base.is_empty() {
            UrlRewrite::Identity
        } else {
            UrlRewrite::prepend(self.url.base.as_str())
        }
    }

    pub fn url_config(&self) -> UrlConfig {
        UrlConfig {
            disable_hash_suffix: self.url.disable_hash_suffix,
            content_root: Arc::new(FsDirectory::new(self.content_root())),
            mount_prefix: self.url.prefix.clone(),
            rewrite: self.rewrite(),
        }
    }

    pub fn url_generator(&self) -> UrlGenerator {
        UrlGenerator::new(self.url_config())
    }

    pub fn compiler(&self) -> Compiler {
        Compiler::css(self.compile.minify)
    }
}

// ============================================================================
// tests
// ============================================================================
