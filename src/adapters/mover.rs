use crate::domain::ports::Mover;
use crate::utils::error::{Result, SorterError};
use filetime::FileTime;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Moves files on the local filesystem.
///
/// Renames when possible. Only a cross-device rename falls back to copy +
/// remove, which keeps the access and modification times. Never overwrites.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMover;

impl FsMover {
    pub fn new() -> Self {
        Self
    }
}

impl Mover for FsMover {
    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        Ok(())
    }

    fn relocate(&self, from: &Path, to: &Path) -> Result<()> {
        if to.symlink_metadata().is_ok() {
            return Err(SorterError::DestinationExists {
                path: to.to_path_buf(),
            });
        }

        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if is_cross_device(&e) => {
                tracing::debug!(
                    "{} and {} are on different devices, copying",
                    from.display(),
                    to.display()
                );
                copy_then_remove(from, to)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn is_cross_device(err: &io::Error) -> bool {
    // EXDEV on unix, ERROR_NOT_SAME_DEVICE on windows
    const NOT_SAME_DEVICE: i32 = if cfg!(windows) { 17 } else { 18 };
    err.kind() == io::ErrorKind::CrossesDevices || err.raw_os_error() == Some(NOT_SAME_DEVICE)
}

/// Copy with timestamps, then drop the source. On any failure the copy is
/// removed so the file exists at exactly one path.
fn copy_then_remove(from: &Path, to: &Path) -> Result<()> {
    let metadata = fs::metadata(from)?;

    if let Err(e) = fs::copy(from, to) {
        let _ = fs::remove_file(to);
        return Err(e.into());
    }

    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    if let Err(e) = filetime::set_file_times(to, atime, mtime) {
        let _ = fs::remove_file(to);
        return Err(e.into());
    }

    if let Err(e) = fs::remove_file(from) {
        let _ = fs::remove_file(to);
        return Err(e.into());
    }
    Ok(())
}

/// Reports what would happen without touching the filesystem.
///
/// Remembers the destinations planned so far, so two files aimed at the same
/// path collide exactly as they would in a real run.
#[derive(Debug, Default, Clone)]
pub struct DryRunMover {
    planned: RefCell<HashSet<PathBuf>>,
}

impl DryRunMover {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Mover for DryRunMover {
    fn ensure_dir(&self, _dir: &Path) -> Result<()> {
        Ok(())
    }

    fn relocate(&self, _from: &Path, to: &Path) -> Result<()> {
        if to.symlink_metadata().is_ok() || !self.planned.borrow_mut().insert(to.to_path_buf()) {
            return Err(SorterError::DestinationExists {
                path: to.to_path_buf(),
            });
        }
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}
