//! Filesystem capabilities
//!
//! Everything that touches the disk goes through [`GlobResolver`] and
//! [`DirectoryEnsurer`], so the rest of the crate can be driven by
//! [`MemoryFileSystem`] in tests or dry runs.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet};
use std::fs::create_dir_all;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern, glob_with};
use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::NEGATION_PREFIX;
use crate::errors::{Result, glob_pattern_error};
use crate::patterns::PatternSet;

/// Resolves glob patterns to existing file paths
pub trait GlobResolver {
    /// Returns the ordered union of files matched by `patterns`
    fn resolve(&self, patterns: &PatternSet) -> Result<Vec<PathBuf>>;
}

/// Creates directories on demand
pub trait DirectoryEnsurer {
    /// Creates `path` and any missing ancestors; succeeds if it already exists
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expands `{a,b}` groups into one pattern per alternative
///
/// Groups without a comma are left as they are. Nested groups are expanded
/// innermost first.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    static BRACE_GROUP: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\{([^{}]*,[^{}]*)\}")
            .expect("Failed to compile regex pattern for BRACE_GROUP")
    });

    let Some(captures) = BRACE_GROUP.captures(pattern) else {
        return vec![pattern.to_string()];
    };
    let (Some(group), Some(alternatives)) = (captures.get(0), captures.get(1)) else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..group.start()];
    let suffix = &pattern[group.end()..];

    let mut expanded = Vec::new();
    for alternative in alternatives.as_str().split(',') {
        for candidate in expand_braces(&format!("{prefix}{alternative}{suffix}")) {
            if !expanded.contains(&candidate) {
                expanded.push(candidate);
            }
        }
    }
    expanded
}

/// Shared pattern handling for every resolver
///
/// Positive patterns are brace-expanded and handed to `matcher` in order;
/// their results are merged keeping first occurrences. Patterns starting with
/// `!` remove whatever they match from the final list.
fn resolve_with<F>(patterns: &PatternSet, mut matcher: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&str) -> Result<Vec<PathBuf>>,
{
    let mut exclusions = Vec::new();
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for pattern in patterns {
        if let Some(negated) = pattern.strip_prefix(NEGATION_PREFIX) {
            for expanded in expand_braces(negated) {
                let compiled =
                    Pattern::new(&expanded).map_err(|e| glob_pattern_error(e, pattern))?;
                exclusions.push(compiled);
            }
            continue;
        }

        for expanded in expand_braces(pattern) {
            for path in matcher(&expanded)? {
                if seen.insert(path.clone()) {
                    matches.push(path);
                }
            }
        }
    }

    if !exclusions.is_empty() {
        matches.retain(|path| {
            let excluded = exclusions
                .iter()
                .any(|exclusion| exclusion.matches_path_with(path, MATCH_OPTIONS));
            if excluded {
                trace!("Excluded by negated pattern: {}", path.display());
            }
            !excluded
        });
    }

    Ok(matches)
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl GlobResolver for LocalFileSystem {
    fn resolve(&self, patterns: &PatternSet) -> Result<Vec<PathBuf>> {
        resolve_with(patterns, |pattern| {
            debug!("Resolving glob pattern: {pattern}");
            let entries = glob_with(pattern, MATCH_OPTIONS)
                .map_err(|e| glob_pattern_error(e, pattern))?;

            let mut files = Vec::new();
            for entry in entries {
                match entry {
                    Ok(path) if path.is_file() => files.push(path),
                    Ok(path) => trace!("Skipping non-file match: {}", path.display()),
                    Err(e) => {
                        warn!("Skipping unreadable path {}: {}", e.path().display(), e.error())
                    }
                }
            }
            Ok(files)
        })
    }
}

impl DirectoryEnsurer for LocalFileSystem {
    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        create_dir_all(path)
    }
}

/// In-memory filesystem holding a fixed set of files
///
/// Directories "created" through [`DirectoryEnsurer`] are recorded and can be
/// inspected afterwards. Paths registered with [`deny`](Self::deny), and
/// everything below them, refuse creation with `PermissionDenied`.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: BTreeSet<PathBuf>,
    directories: RefCell<BTreeSet<PathBuf>>,
    denied: Vec<PathBuf>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        MemoryFileSystem::default()
    }

    /// Adds a file; its parent directories are considered to exist
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let directories = self.directories.get_mut();
        for ancestor in path.ancestors().skip(1) {
            if !ancestor.as_os_str().is_empty() {
                directories.insert(ancestor.to_path_buf());
            }
        }
        self.files.insert(path);
        self
    }

    /// Makes directory creation fail at and below `path`
    pub fn deny(mut self, path: impl Into<PathBuf>) -> Self {
        self.denied.push(path.into());
        self
    }

    pub fn has_dir(&self, path: &Path) -> bool {
        self.directories.borrow().contains(path)
    }
}

impl GlobResolver for MemoryFileSystem {
    fn resolve(&self, patterns: &PatternSet) -> Result<Vec<PathBuf>> {
        resolve_with(patterns, |pattern| {
            let compiled = Pattern::new(pattern).map_err(|e| glob_pattern_error(e, pattern))?;
            Ok(self
                .files
                .iter()
                .filter(|path| compiled.matches_path_with(path, MATCH_OPTIONS))
                .cloned()
                .collect())
        })
    }
}

impl DirectoryEnsurer for MemoryFileSystem {
    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        if self.denied.iter().any(|denied| path.starts_with(denied)) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        if self.files.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("a file already exists at {}", path.display()),
            ));
        }

        let mut directories = self.directories.borrow_mut();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                directories.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{PatternInput, normalize_patterns};

    fn set(patterns: Vec<&str>) -> PatternSet {
        normalize_patterns(&PatternInput::from(patterns)).value
    }

    fn lang_fs() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("lang/en.json")
            .with_file("lang/fr.json")
            .with_file("lang/de.yaml")
            .with_file("lang/nested/es.json")
    }

    #[test]
    fn test_expand_braces() {
        assert_eq!(expand_braces("lang/*.json"), vec!["lang/*.json"]);
        assert_eq!(
            expand_braces("lang/{en,fr}.json"),
            vec!["lang/en.json", "lang/fr.json"]
        );
        assert_eq!(
            expand_braces("{a,b}/{x,y}"),
            vec!["a/x", "a/y", "b/x", "b/y"]
        );
        assert_eq!(expand_braces("{a,{b,c}}"), vec!["a", "b", "c"]);
        assert_eq!(expand_braces("{single}.json"), vec!["{single}.json"]);
    }

    #[test]
    fn test_memory_resolve_orders_and_dedups() {
        let fs = lang_fs();
        let found = fs
            .resolve(&set(vec!["lang/fr.json", "lang/*.json"]))
            .unwrap();

        assert_eq!(
            found,
            vec![PathBuf::from("lang/fr.json"), PathBuf::from("lang/en.json")]
        );
    }

    #[test]
    fn test_memory_resolve_star_stays_in_directory() {
        let fs = lang_fs();
        let shallow = fs.resolve(&set(vec!["lang/*.json"])).unwrap();
        assert!(!shallow.contains(&PathBuf::from("lang/nested/es.json")));

        let deep = fs.resolve(&set(vec!["lang/**/*.json"])).unwrap();
        assert!(deep.contains(&PathBuf::from("lang/nested/es.json")));
    }

    #[test]
    fn test_negated_pattern_excludes() {
        let fs = lang_fs();
        let found = fs
            .resolve(&set(vec!["lang/*", "!lang/fr.json"]))
            .unwrap();

        assert_eq!(
            found,
            vec![PathBuf::from("lang/de.yaml"), PathBuf::from("lang/en.json")]
        );
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let fs = lang_fs();
        assert!(fs.resolve(&set(vec!["lang/[.json"])).is_err());
    }

    #[test]
    fn test_memory_ensure_dir() {
        let fs = MemoryFileSystem::new().deny("locked");

        fs.ensure_dir(Path::new("out/js")).unwrap();
        assert!(fs.has_dir(Path::new("out")));
        assert!(fs.has_dir(Path::new("out/js")));
        fs.ensure_dir(Path::new("out/js")).unwrap();

        let error = fs.ensure_dir(Path::new("locked/js")).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::PermissionDenied);
        assert!(!fs.has_dir(Path::new("locked/js")));
    }
}
