//! Capability-based access to dataset files.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Report whether `path` exists and is a regular file.
///
/// The parent directory is opened as a capability and the file is inspected
/// relative to it.
///
/// # Errors
/// Returns [`io::ErrorKind::NotFound`] when the path or its parent does not
/// exist, and any other I/O error raised while inspecting it.
pub fn dataset_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "dataset path has no file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(file_name).map(|meta| meta.is_file())
}

/// Open the dataset file at `path` using ambient authority.
///
/// Directories are rejected up front so callers get a clear error rather
/// than a confusing read failure.
///
/// # Errors
/// Returns any I/O error raised while opening the file, or
/// [`io::ErrorKind::InvalidInput`] when `path` names a directory.
pub fn open_dataset_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority())?;
    if file.metadata()?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path} is a directory"),
        ));
    }
    Ok(file)
}
