//! Conversion planning
//!
//! Ties pattern normalisation, discovery, directory handling and destination
//! derivation together into one call.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::destination::derive_destination;
use crate::directory::normalize_directory;
use crate::discovery::find_sources;
use crate::fs::{DirectoryEnsurer, GlobResolver, LocalFileSystem};
use crate::outcome::{Diagnostic, Stage};
use crate::patterns::{PatternInput, normalize_patterns};

/// Source files and the module paths they convert into
///
/// `sources[i]` converts into `destinations[i]`; both always have the same
/// length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
    pub sources: Vec<PathBuf>,
    pub destinations: Vec<PathBuf>,
    /// Every default substituted along the way
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// Iterates over `(source, destination)` pairs
    pub fn pairs(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.sources
            .iter()
            .zip(&self.destinations)
            .map(|(source, destination)| (source.as_path(), destination.as_path()))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Plans the conversion against the local filesystem
///
/// # Examples
/// ```no_run
/// let conversion = json2js::convert("lang/*.json", Some("build/lang"));
/// for (source, destination) in conversion.pairs() {
///     println!("{} -> {}", source.display(), destination.display());
/// }
/// ```
pub fn convert(patterns: impl Into<PatternInput>, directory: Option<&str>) -> Conversion {
    convert_with(&LocalFileSystem, &patterns.into(), directory)
}

/// Plans the conversion using the given filesystem capabilities
pub fn convert_with<F>(fs: &F, patterns: &PatternInput, directory: Option<&str>) -> Conversion
where
    F: GlobResolver + DirectoryEnsurer + ?Sized,
{
    let mut diagnostics = Vec::new();

    let (pattern_set, notes) = normalize_patterns(patterns).into_parts();
    diagnostics.extend(notes);

    let (found, notes) = find_sources(&pattern_set, fs).into_parts();
    diagnostics.extend(notes);

    let (output_dir, notes) = normalize_directory(directory, fs).into_parts();
    diagnostics.extend(notes);

    let mut sources = Vec::with_capacity(found.len());
    let mut destinations = Vec::with_capacity(found.len());
    for source in found {
        match derive_destination(&source, output_dir.as_deref()) {
            Ok(destination) => {
                debug!("{} -> {}", source.display(), destination.display());
                sources.push(source);
                destinations.push(destination);
            }
            Err(e) => {
                let diagnostic = Diagnostic::new(Stage::Destination, format!("skipped: {e}"));
                log::warn!("{diagnostic}");
                diagnostics.push(diagnostic);
            }
        }
    }

    info!("Planned {} conversion(s)", sources.len());
    Conversion {
        sources,
        destinations,
        diagnostics,
    }
}
