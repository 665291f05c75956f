//! Destination path derivation
//!
//! Maps a `.json` source onto the `.js` module generated from it.

use std::path::{Path, PathBuf};

use crate::constants::{SOURCE_SUFFIX, TARGET_SUFFIX};
use crate::errors::{
    Result, invalid_filename_error, path_operation_error, unexpected_extension_error,
};

/// Computes the destination of `source`
///
/// The file name keeps its stem and swaps `.json` for `.js`. It is placed in
/// `directory` when given, otherwise beside the source.
///
/// # Errors
/// * `PathOperation` if `source` has no file name
/// * `InvalidFilename` if the file name is not valid UTF-8
/// * `UnexpectedExtension` if the file name does not end with `.json`
///
/// # Examples
/// ```
/// use std::path::{Path, PathBuf};
/// use json2js::destination::derive_destination;
///
/// let beside = derive_destination(Path::new("lang/en.json"), None).unwrap();
/// assert_eq!(beside, PathBuf::from("lang/en.js"));
///
/// let moved = derive_destination(Path::new("lang/en.json"), Some(Path::new("out"))).unwrap();
/// assert_eq!(moved, PathBuf::from("out/en.js"));
/// ```
pub fn derive_destination(source: &Path, directory: Option<&Path>) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| path_operation_error(source.to_path_buf(), "get filename"))?
        .to_str()
        .ok_or_else(|| invalid_filename_error(source.to_path_buf()))?;

    let stem = file_name
        .strip_suffix(SOURCE_SUFFIX)
        .ok_or_else(|| unexpected_extension_error(source.to_path_buf(), SOURCE_SUFFIX))?;

    let target_directory = match directory {
        Some(dir) => dir,
        None => source.parent().unwrap_or_else(|| Path::new("")),
    };

    Ok(target_directory.join(format!("{stem}{TARGET_SUFFIX}")))
}
