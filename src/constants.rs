/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// Pattern used when no usable pattern was supplied
pub const DEFAULT_PATTERN: &str = "**/*.json";

/// Extension (without the dot) a file must carry to be picked up as a source
pub const SOURCE_EXTENSION: &str = "json";

/// Suffix stripped from a source file name when deriving its destination
pub const SOURCE_SUFFIX: &str = ".json";

/// Suffix appended to the destination file name
pub const TARGET_SUFFIX: &str = ".js";

/// Prefix marking a glob pattern as an exclusion
pub const NEGATION_PREFIX: char = '!';

/// Help text for the pattern positional argument
pub const PATTERN_HELP: &str = "Glob pattern(s) locating the JSON files to convert";

/// Help text for the directory command-line option
pub const DIRECTORY_HELP: &str =
    "Place every generated module in this directory (created if missing)";

/// Help text for the config command-line option
pub const CONFIG_HELP: &str = "Read patterns and directory from a specific config file";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";

/// Help text for the log file command-line option
pub const LOG_FILE_HELP: &str = "Also write log messages to this file";

/// Default path for the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "json2js.yaml";
