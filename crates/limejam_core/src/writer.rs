//! Rewriting the target file in permutation order.

use crate::config::WriteStrategy;
use crate::encoding::UTF8_BOM;
use crate::error::{ReorderError, ReorderResult};
use crate::line::LineStore;
use crate::permute::Permutation;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Suffix of the hidden temporary file used by [`WriteStrategy::Atomic`].
pub const TEMP_SUFFIX: &str = ".limejam-tmp";

/// Writes the optional BOM followed by the lines in `order`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn emit<W: Write>(
    out: &mut W,
    has_bom: bool,
    store: &LineStore,
    order: &Permutation,
) -> io::Result<()> {
    if has_bom {
        out.write_all(&UTF8_BOM)?;
    }
    for &index in order.iter() {
        out.write_all(store[index].as_bytes())?;
    }
    Ok(())
}

/// Replaces the contents of `path` with the reordered lines.
///
/// # Errors
///
/// Returns [`ReorderError::CannotWriteFile`] if the output cannot be opened
/// and [`ReorderError::WriteFailed`] for any later failure.
pub fn write_file(
    path: &Path,
    has_bom: bool,
    store: &LineStore,
    order: &Permutation,
    strategy: WriteStrategy,
) -> ReorderResult<()> {
    match strategy {
        WriteStrategy::Atomic => write_atomic(path, has_bom, store, order),
        WriteStrategy::InPlace => write_in_place(path, has_bom, store, order),
    }
}

fn write_in_place(
    path: &Path,
    has_bom: bool,
    store: &LineStore,
    order: &Permutation,
) -> ReorderResult<()> {
    warn!(path = %path.display(), "overwriting in place; a failure may leave the file partially written");

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| ReorderError::cannot_write(path, e))?;

    write_and_sync(&mut file, has_bom, store, order)
        .map_err(|e| ReorderError::write_failed(path, e))
}

/// Write-then-rename:
/// 1. Check the target is writable
/// 2. Write to a hidden temporary file in the same directory
/// 3. Sync it to disk
/// 4. Copy the original permissions onto it
/// 5. Rename it over the target and sync the directory
fn write_atomic(
    path: &Path,
    has_bom: bool,
    store: &LineStore,
    order: &Permutation,
) -> ReorderResult<()> {
    // Follow symlinks so the link itself survives the rename.
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    check_writable(&target).map_err(|e| ReorderError::cannot_write(path, e))?;

    let mut temp = temp_file_for(&target).map_err(|e| ReorderError::cannot_write(path, e))?;
    debug!(temp = %temp.path().display(), "writing temporary file");

    // On error `temp` is dropped, which removes the file.
    write_and_sync(temp.as_file_mut(), has_bom, store, order)
        .and_then(|()| copy_permissions(&target, temp.path()))
        .and_then(|()| temp.persist(&target).map(drop).map_err(|e| e.error))
        .and_then(|()| sync_parent(&target))
        .map_err(|e| ReorderError::write_failed(path, e))
}

/// Fails the way an in-place open would for a read-only target.
fn check_writable(target: &Path) -> io::Result<()> {
    match OpenOptions::new().write(true).open(target) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Creates `dir/.name.XXXXXX.limejam-tmp` next to `target`.
fn temp_file_for(target: &Path) -> io::Result<NamedTempFile> {
    let mut prefix = OsString::from(".");
    prefix.push(target.file_name().unwrap_or_else(|| target.as_os_str()));
    prefix.push(".");
    tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(parent_dir(target))
}

fn write_and_sync(
    file: &mut File,
    has_bom: bool,
    store: &LineStore,
    order: &Permutation,
) -> io::Result<()> {
    let mut out = BufWriter::new(&mut *file);
    emit(&mut out, has_bom, store, order)?;
    out.flush()?;
    drop(out);
    file.sync_all()
}

fn copy_permissions(from: &Path, to: &Path) -> io::Result<()> {
    match fs::metadata(from) {
        Ok(metadata) => fs::set_permissions(to, metadata.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn parent_dir(target: &Path) -> &Path {
    match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn sync_parent(target: &Path) -> io::Result<()> {
    File::open(parent_dir(target))?.sync_all()
}

// NTFS journals metadata updates; directories cannot be opened for sync.
#[cfg(not(unix))]
fn sync_parent(_target: &Path) -> io::Result<()> {
    Ok(())
}
