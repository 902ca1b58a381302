//! Local File System Helpers
//!
//! Atomic writes, build-tree modification times, and the per-project push lock.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, SubsecRound, Utc};
use fs2::FileExt;
use ignore::WalkBuilder;
use tempfile::NamedTempFile;

use crate::domain::ports::RepositoryError;
use crate::domain::value_objects::Timestamp;

/// Write `content` to `path` via a temp file in the same directory + rename.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Newest modification time of `dir` and everything below it.
///
/// Hidden files and ignore files are not honored: every build artifact counts.
/// `Invalid` when nothing could be read.
pub fn newest_mod_time(dir: &Path) -> Timestamp {
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let newest = walker
        .filter_map(Result::ok)
        .filter_map(|entry| entry.metadata().ok())
        .filter_map(|meta| meta.modified().ok())
        .max();

    match newest {
        Some(at) => Timestamp::from(to_utc(at)),
        None => Timestamp::Invalid(dir.display().to_string()),
    }
}

/// Whole seconds, matching the persisted timestamp precision
fn to_utc(at: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(at).trunc_subsecs(0)
}

/// Exclusive advisory lock held for the duration of a push.
///
/// Released on drop.
#[derive(Debug)]
pub struct ProjectLock {
    file: File,
    path: PathBuf,
}

impl ProjectLock {
    /// Take the lock without waiting; `Locked` if another run holds it.
    pub fn acquire(path: &Path) -> Result<Self, RepositoryError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        file.try_lock_exclusive()
            .map_err(|_| RepositoryError::Locked(path.to_path_buf()))?;
        tracing::debug!(path = %path.display(), "acquired push lock");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ProjectLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
