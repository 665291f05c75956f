//! Configuration file handling
//!
//! A config file supplies the same two inputs as the command line:
//!
//! ```yaml
//! patterns:
//!   - lang/*.json
//!   - "!lang/draft-*.json"
//! directory: build/lang
//! ```
//!
//! `directory` may also be given as a list of path segments. A leading `~`
//! in a config-file directory is expanded to the home directory; values
//! passed on the command line are used as given.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Deserializer};
use serde_yaml::{Value, from_str};
use shellexpand::tilde;

use crate::constants::DEFAULT_CONFIG_PATH;
use crate::errors::{Result, config_parsing_error, file_operation_error};
use crate::patterns::PatternInput;

/// Contents of a json2js config file
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Patterns locating the source files; any shape is accepted
    pub patterns: PatternInput,
    /// Output directory; values that are neither a string nor a list of
    /// strings are treated as absent
    #[serde(deserialize_with = "deserialize_directory")]
    pub directory: Option<String>,
}

impl Config {
    /// Applies command-line values on top of the file's
    ///
    /// Non-empty `patterns` replace the file's patterns; a given `directory`
    /// replaces the file's directory.
    pub fn with_overrides(mut self, patterns: Vec<String>, directory: Option<String>) -> Config {
        if !patterns.is_empty() {
            self.patterns = patterns.into();
        }
        if directory.is_some() {
            self.directory = directory;
        }
        self
    }
}

/// Expands a leading `~` to the user's home directory
pub fn expand_path(path: &str) -> String {
    tilde(path).to_string()
}

/// Deserializes the output directory from a string or a list of segments
fn deserialize_directory<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(directory) => Some(expand_path(&directory)),
        Value::Sequence(segments) => segments
            .iter()
            .map(Value::as_str)
            .collect::<Option<Vec<&str>>>()
            .map(|parts| {
                let joined = parts.iter().collect::<PathBuf>();
                expand_path(&joined.to_string_lossy())
            }),
        _ => None,
    })
}

/// Parses a config from YAML text
///
/// An empty document yields the default config.
pub fn parse_config(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    from_str(content).map_err(|e| config_parsing_error(e, "Please check the YAML syntax"))
}

/// Loads a configuration from a file
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid YAML
pub fn load_config(file: &Path) -> Result<Config> {
    let content =
        fs::read_to_string(file).map_err(|e| file_operation_error(e, file.to_path_buf(), "read"))?;

    let config = parse_config(&content).map_err(|e| {
        config_parsing_error(e, &format!("Failed to parse {}", file.display()))
    })?;

    info!("Loaded configuration from {}", file.display());
    Ok(config)
}

/// Loads the explicitly requested config, or the default one if present
///
/// A missing default config file is not an error and yields `None`.
pub fn find_config(explicit: Option<&Path>) -> Result<Option<Config>> {
    if let Some(file) = explicit {
        return load_config(file).map(Some);
    }

    let default = Path::new(DEFAULT_CONFIG_PATH);
    if default.is_file() {
        load_config(default).map(Some)
    } else {
        debug!("No {DEFAULT_CONFIG_PATH} found; using command-line values only");
        Ok(None)
    }
}
