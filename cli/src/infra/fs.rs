//! Filesystem infrastructure: implements `ArtifactWriter` and `ArtifactReader`.
//!
//! Writes go to a temporary file in the target directory, which is flushed,
//! synced, given its final mode and then renamed over the target. The
//! temporary file is owned by a `NamedTempFile`, so every early return
//! closes the handle and deletes it; the target is only touched by the
//! final rename.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::application::ports::{
    ArtifactFile, ArtifactReader, ArtifactWriter, WriteOptions, WriteOutcome,
};
use crate::domain::artifacts::{DESCRIPTOR_MODE, LAUNCHER_MODE};
use crate::domain::error::{VerifyError, WriteError};

/// Production filesystem implementation of the artifact ports.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl ArtifactWriter for LocalFs {
    fn write(
        &self,
        path: &Path,
        content: &str,
        options: WriteOptions,
    ) -> Result<WriteOutcome, WriteError> {
        let mode = if options.executable {
            LAUNCHER_MODE
        } else {
            DESCRIPTOR_MODE
        };
        if is_unchanged(path, content.as_bytes(), mode) {
            debug!(path = %path.display(), "content unchanged, skipping write");
            return Ok(WriteOutcome::Unchanged);
        }
        let existed = path.exists();
        stage(path, content.as_bytes(), mode, options.create_parents)?.commit()?;
        Ok(if existed {
            WriteOutcome::Replaced
        } else {
            WriteOutcome::Created
        })
    }
}

impl ArtifactReader for LocalFs {
    fn read(&self, path: &Path) -> Result<ArtifactFile, VerifyError> {
        let unreadable = |source| VerifyError::Unreadable {
            path: path.to_path_buf(),
            source,
        };
        let content = std::fs::read_to_string(path).map_err(unreadable)?;
        let metadata = std::fs::metadata(path).map_err(unreadable)?;
        Ok(ArtifactFile {
            content,
            mode: file_mode(&metadata),
        })
    }
}

/// A fully written temporary file waiting to replace its target.
///
/// Dropping it without calling [`StagedArtifact::commit`] deletes the
/// temporary file and leaves the target as it was.
#[derive(Debug)]
pub struct StagedArtifact {
    file: NamedTempFile,
    target: PathBuf,
}

impl StagedArtifact {
    /// Path of the temporary file.
    #[must_use]
    pub fn temp_path(&self) -> &Path {
        self.file.path()
    }

    /// Atomically rename the temporary file over the target.
    ///
    /// # Errors
    ///
    /// Returns `WriteError` if the rename fails; the temporary file is
    /// removed and the target is unchanged.
    pub fn commit(self) -> Result<(), WriteError> {
        let StagedArtifact { file, target } = self;
        file.persist(&target)
            .map_err(|e| WriteError::new(&target, e.error))?;
        trace!(path = %target.display(), "artifact committed");
        Ok(())
    }
}

/// Write `content` to a temporary file beside `path` with permissions `mode`.
///
/// # Errors
///
/// Returns `WriteError` if the target directory is missing (and
/// `create_parents` is false), not writable, or the write fails.
pub fn stage(
    path: &Path,
    content: &[u8],
    mode: u32,
    create_parents: bool,
) -> Result<StagedArtifact, WriteError> {
    let dir = parent_dir(path);
    if create_parents {
        std::fs::create_dir_all(dir).map_err(|e| WriteError::new(dir, e))?;
    }
    let mut file = tempfile::Builder::new()
        .prefix(".kernel-setup-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| WriteError::new(path, e))?;
    file.write_all(content)
        .and_then(|()| file.flush())
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| WriteError::new(path, e))?;
    set_mode(file.path(), mode).map_err(|e| WriteError::new(path, e))?;
    trace!(temp = %file.path().display(), target = %path.display(), "artifact staged");
    Ok(StagedArtifact {
        file,
        target: path.to_path_buf(),
    })
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn is_unchanged(path: &Path, content: &[u8], mode: u32) -> bool {
    let Ok(existing) = std::fs::read(path) else {
        return false;
    };
    if existing != content {
        return false;
    }
    match std::fs::metadata(path) {
        Ok(metadata) => file_mode(&metadata).is_none_or(|m| m & 0o777 == mode),
        Err(_) => false,
    }
}

#[cfg(unix)]
fn file_mode(metadata: &std::fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn file_mode(_metadata: &std::fs::Metadata) -> Option<u32> {
    None
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
