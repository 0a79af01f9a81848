use sitegraft_core::{Error, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively copy `src` into `dst`, creating directories as needed and
/// overwriting files that already exist.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| Error::Copy {
            path: src.to_path_buf(),
            source: e.into(),
        })?;

        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|source| Error::Copy {
                path: entry.path().to_path_buf(),
                source,
            })?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Copy a single file, creating the destination's parent directory.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let copy = || -> std::io::Result<()> {
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, dst)?;
        Ok(())
    };
    copy().map_err(|source| Error::Copy {
        path: src.to_path_buf(),
        source,
    })
}

/// Delete whatever is at `dst` (file or directory), then copy `src` there.
///
/// Full overwrite, never an incremental merge: files that exist only in the
/// old destination are gone afterwards.
pub fn replace_with(src: &Path, dst: &Path) -> Result<()> {
    remove_existing(dst)?;
    if src.is_dir() {
        copy_tree(src, dst)
    } else {
        copy_file(src, dst)
    }
}

fn remove_existing(path: &Path) -> Result<()> {
    let removed = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    };
    removed.map_err(|source| Error::Copy {
        path: path.to_path_buf(),
        source,
    })
}
