//! Source discovery
//!
//! This module resolves pattern sets to the JSON files that should be
//! converted.

use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::constants::SOURCE_EXTENSION;
use crate::fs::GlobResolver;
use crate::outcome::{Diagnostic, Normalized, Stage};
use crate::patterns::PatternSet;

/// Whether `path` names a file with exactly the source extension
///
/// The comparison is case-sensitive and the file name must be valid UTF-8,
/// since destinations are derived from it textually.
pub fn is_source_file(path: &Path) -> bool {
    path.file_name().and_then(|name| name.to_str()).is_some()
        && path.extension().and_then(|ext| ext.to_str()) == Some(SOURCE_EXTENSION)
}

/// Finds the source files matched by `patterns`
///
/// Order follows the resolver. An empty result is not an error; a resolver
/// failure yields an empty list plus a diagnostic.
pub fn find_sources<R>(patterns: &PatternSet, resolver: &R) -> Normalized<Vec<PathBuf>>
where
    R: GlobResolver + ?Sized,
{
    let matches = match resolver.resolve(patterns) {
        Ok(matches) => matches,
        Err(e) => {
            return Normalized::recovered(
                Vec::new(),
                Diagnostic::new(Stage::Discovery, format!("no sources resolved: {e}")),
            );
        }
    };

    let sources: Vec<PathBuf> = matches
        .into_iter()
        .filter(|path| {
            let keep = is_source_file(path);
            if !keep {
                trace!("Ignoring non-JSON match: {}", path.display());
            }
            keep
        })
        .collect();

    debug!("Found {} source file(s)", sources.len());
    Normalized::clean(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;
    use crate::patterns::{PatternInput, normalize_patterns};

    fn set(input: PatternInput) -> PatternSet {
        normalize_patterns(&input).value
    }

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("lang/en.json")));
        assert!(is_source_file(Path::new("en.json")));
        assert!(!is_source_file(Path::new("lang/en.JSON")));
        assert!(!is_source_file(Path::new("lang/en.jsonc")));
        assert!(!is_source_file(Path::new("lang/en.json.bak")));
        assert!(!is_source_file(Path::new("lang/.json")));
        assert!(!is_source_file(Path::new("lang/json")));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_names_are_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let broken = Path::new("lang").join(OsStr::from_bytes(b"\xffa.json"));
        assert!(!is_source_file(&broken));
        assert!(!is_source_file(Path::new(OsStr::from_bytes(b"\xffa.json"))));
        assert!(is_source_file(Path::new("lang/a.json")));
    }

    #[test]
    fn test_filters_to_json_files() {
        let fs = MemoryFileSystem::new()
            .with_file("lang/en.json")
            .with_file("lang/fr.json")
            .with_file("lang/README.md")
            .with_file("lang/de.JSON");

        let found = find_sources(&set("lang/*".into()), &fs);
        assert!(!found.is_degraded());
        assert_eq!(
            found.value,
            vec![PathBuf::from("lang/en.json"), PathBuf::from("lang/fr.json")]
        );
    }

    #[test]
    fn test_no_matches_is_empty() {
        let fs = MemoryFileSystem::new().with_file("lang/en.json");

        let found = find_sources(&set("missing/*.json".into()), &fs);
        assert!(found.value.is_empty());
        assert!(!found.is_degraded());
    }

    #[test]
    fn test_resolver_failure_is_recovered() {
        let fs = MemoryFileSystem::new().with_file("lang/en.json");

        let found = find_sources(&set("lang/[*.json".into()), &fs);
        assert!(found.value.is_empty());
        assert_eq!(found.diagnostics[0].stage, Stage::Discovery);
    }
}
