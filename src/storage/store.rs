//! Crash-safe JSON persistence for single-file collections.
//!
//! `write_atomic` guarantees a reader never observes a half-written file:
//! the full document is written to a uniquely-named temp file in the target
//! directory, flushed and fsynced, then renamed onto the destination in one
//! filesystem operation. The containing directory is fsynced afterwards on a
//! best-effort basis so the rename itself survives a crash.
//!
//! Writes to the same file from concurrent processes still race at the
//! read-modify-write level (last-rename-wins); each individual write stays
//! internally consistent, but a concurrent update can be lost. Callers that
//! need isolation must serialize writers themselves.

use crate::core::{Result, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

/// What `read_or_default` does when a file exists but cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptPolicy {
    /// Log a warning and fall back to the caller-supplied default.
    #[default]
    UseDefault,
    /// Surface a typed error instead of masking the corruption.
    Fail,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore {
    corrupt_policy: CorruptPolicy,
}

impl JsonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_corrupt_policy(corrupt_policy: CorruptPolicy) -> Self {
        Self { corrupt_policy }
    }

    /// Reads `path` as a JSON document. A missing file always yields
    /// `default`; an unreadable or unparsable file yields `default` or an
    /// error depending on the corruption policy. Never returns partial
    /// content.
    pub fn read_or_default<T: DeserializeOwned>(&self, path: &Path, default: T) -> Result<T> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(default),
            Err(e) => {
                return match self.corrupt_policy {
                    CorruptPolicy::UseDefault => {
                        warn!(path = %path.display(), error = %e, "unreadable data file, using default");
                        Ok(default)
                    }
                    CorruptPolicy::Fail => Err(StoreError::Io(format!(
                        "failed to read '{}': {}",
                        path.display(),
                        e
                    ))),
                };
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(e) => match self.corrupt_policy {
                CorruptPolicy::UseDefault => {
                    warn!(path = %path.display(), error = %e, "corrupt data file, using default");
                    Ok(default)
                }
                CorruptPolicy::Fail => {
                    Err(StoreError::Corrupt(path.display().to_string(), e.to_string()))
                }
            },
        }
    }

    /// Serializes `value` and atomically replaces `path` with it.
    ///
    /// Unrecoverable I/O failures (disk full, permission denied) propagate;
    /// the caller must know persistence failed. The temp file is removed if
    /// the attempt aborts before the rename.
    pub fn write_atomic<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let dir = parent_dir(path);
        fs::create_dir_all(&dir).map_err(|e| {
            StoreError::Io(format!("failed to create '{}': {}", dir.display(), e))
        })?;

        let serialized = serde_json::to_vec_pretty(value)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        // Temp file lives in the target directory so the rename below never
        // crosses a filesystem boundary.
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| {
            StoreError::Io(format!("failed to create temp file in '{}': {}", dir.display(), e))
        })?;
        tmp.write_all(&serialized)
            .map_err(|e| StoreError::Io(format!("failed to write '{}': {}", path.display(), e)))?;
        tmp.flush()
            .map_err(|e| StoreError::Io(format!("failed to flush '{}': {}", path.display(), e)))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::Io(format!("failed to sync '{}': {}", path.display(), e)))?;
        tmp.persist(path).map_err(|e| {
            StoreError::Io(format!("failed to replace '{}': {}", path.display(), e))
        })?;

        // Best-effort: not every platform/filesystem supports directory fsync.
        if let Ok(dir_handle) = File::open(&dir) {
            let _ = dir_handle.sync_all();
        }
        Ok(())
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
