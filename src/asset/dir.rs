//! Content directory abstraction.
//!
//! Files are addressed by [`LogicalPath`]; how they are stored is up to the
//! implementation. [`FsDirectory`] serves them from a directory on disk.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use crate::core::LogicalPath;

pub trait ContentDirectory: Send + Sync {
    /// Whether a regular file exists at `path`.
    fn exists(&self, path: &LogicalPath) -> bool;

    /// Open `path` for reading.
    fn open_read(&self, path: &LogicalPath) -> io::Result<Box<dyn Read + '_>>;

    /// Read `path` as UTF-8 text.
    fn read_to_string(&self, path: &LogicalPath) -> io::Result<String> {
        let mut text = String::new();
        self.open_read(path)?.read_to_string(&mut text)?;
        Ok(text)
    }
}

/// Content directory backed by the file system.
#[derive(Debug, Clone)]
pub struct FsDirectory {
    root: PathBuf,
}

impl FsDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Disk location of a logical path.
    pub fn resolve(&self, path: &LogicalPath) -> PathBuf {
        path.to_fs_path(&self.root)
    }
}

impl ContentDirectory for FsDirectory {
    fn exists(&self, path: &LogicalPath) -> bool {
        self.resolve(path).is_file()
    }

    fn open_read(&self, path: &LogicalPath) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(self.resolve(path))?;
        Ok(Box::new(BufReader::with_capacity(64 * 1024, file)))
    }
}
