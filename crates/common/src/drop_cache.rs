use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const DEFAULT_DROP_CACHES_PATH: &str = "/proc/sys/vm/drop_caches";

/// What the kernel should reclaim when `drop_caches` is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropMode {
    /// Free the page cache.
    PageCache = 1,
    /// Free reclaimable slab objects (dentries and inodes).
    Inodes = 2,
    /// Free both.
    #[default]
    All = 3,
}

impl fmt::Display for DropMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Write `mode` to the kernel control file at `path`.
///
/// The file is opened write-only without create or truncate, exactly as
/// `echo 3 > /proc/sys/vm/drop_caches` would. Needs root on a real system;
/// permission denied is the usual failure. Success means the kernel accepted
/// the write, nothing more.
pub fn drop_caches(path: &Path, mode: DropMode) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    file.write_all(format!("{mode}\n").as_bytes())
        .with_context(|| format!("writing to {}", path.display()))?;
    Ok(())
}

/// A drop target bound to a control path and mode.
#[derive(Debug, Clone)]
pub struct CacheDropper {
    path: PathBuf,
    mode: DropMode,
}

impl CacheDropper {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), mode: DropMode::default() }
    }

    pub fn with_mode(mut self, mode: DropMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn drop_caches(&self) -> Result<()> {
        drop_caches(&self.path, self.mode)
    }
}

impl Default for CacheDropper {
    fn default() -> Self {
        Self::new(DEFAULT_DROP_CACHES_PATH)
    }
}
