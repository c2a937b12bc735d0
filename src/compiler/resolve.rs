//! Import resolution against the content directory.
//!
//! Every file the reader serves is recorded: that record is the set of
//! sources a compiled output depends on.

use rustc_hash::FxHashSet;

use crate::asset::ContentDirectory;
use crate::core::LogicalPath;
use crate::error::{Error, Result};

pub struct ImportReader<'a> {
    directory: &'a dyn ContentDirectory,
    source: LogicalPath,
    base: LogicalPath,
    served: Vec<LogicalPath>,
    seen: FxHashSet<LogicalPath>,
}

impl<'a> ImportReader<'a> {
    /// Reader for imports of `source`, resolving names from its directory.
    pub fn new(directory: &'a dyn ContentDirectory, source: &LogicalPath) -> Self {
        Self {
            directory,
            source: source.clone(),
            base: source.parent(),
            served: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    /// Directory relative names are resolved from.
    pub fn base(&self) -> &LogicalPath {
        &self.base
    }

    /// Resolve `name` from the source directory. `~/...` names are absolute.
    pub fn resolve(&self, name: &str) -> Result<LogicalPath> {
        self.base.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name)
            .is_ok_and(|path| self.directory.exists(&path))
    }

    /// Read an imported source and record it as a dependency.
    pub fn read(&mut self, name: &str) -> Result<String> {
        let path = self.resolve(name)?;
        if !self.directory.exists(&path) {
            return Err(Error::NotFound {
                path: path.to_string(),
            });
        }

        let text = self
            .directory
            .read_to_string(&path)
            .map_err(|e| Error::io(path.as_str(), e))?;

        if path != self.source && self.seen.insert(path.clone()) {
            self.served.push(path);
        }
        Ok(text)
    }

    /// Served paths in first-read order, without duplicates.
    pub fn imports(&self) -> &[LogicalPath] {
        &self.served
    }

    pub fn into_imports(self) -> Vec<LogicalPath> {
        self.served
    }
}
