//! Output directory normalisation

use std::path::PathBuf;

use log::debug;

use crate::fs::DirectoryEnsurer;
use crate::outcome::{Diagnostic, Normalized, Stage};

/// Validates the optional output directory, creating it when missing
///
/// Blank or absent input means "next to each source" and returns `None`
/// without touching the filesystem. Otherwise the path is created and
/// returned exactly as given. A directory that cannot be created degrades
/// to `None` as well, with a diagnostic naming the cause.
pub fn normalize_directory<D>(directory: Option<&str>, ensurer: &D) -> Normalized<Option<PathBuf>>
where
    D: DirectoryEnsurer + ?Sized,
{
    let Some(raw) = directory.filter(|d| !d.trim().is_empty()) else {
        debug!("No output directory; destinations stay next to their sources");
        return Normalized::clean(None);
    };

    let path = PathBuf::from(raw);
    match ensurer.ensure_dir(&path) {
        Ok(()) => {
            debug!("Output directory ready: {}", path.display());
            Normalized::clean(Some(path))
        }
        Err(e) => Normalized::recovered(
            None,
            Diagnostic::new(
                Stage::Directory,
                format!(
                    "cannot use output directory {}: {}; writing next to sources instead",
                    path.display(),
                    e
                ),
            ),
        ),
    }
}
