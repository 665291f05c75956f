use std::path::PathBuf;

use clap::{
    Arg, ArgAction, ArgMatches, Command, command, crate_authors, crate_description, crate_name,
    crate_version,
};
use colored::Colorize;

use crate::config::{Config, find_config};
use crate::constants::{CONFIG_HELP, DIRECTORY_HELP, LOG_FILE_HELP, PATTERN_HELP, VERBOSE_HELP};
use crate::converter::{Conversion, convert};
use crate::errors::Result;
use crate::logging::{LogLevel, format_message};

/// Builds the command-line interface
///
/// Defines the following arguments:
/// - `patterns`: glob patterns for the source files (positional, repeatable)
/// - `directory`: output directory for the generated modules
/// - `config`: YAML file providing patterns and directory
/// - `verbose`: increase verbosity level
/// - `log_file`: additionally log to a file
pub fn build_command() -> Command {
    let arg_patterns = Arg::new("patterns")
        .value_name("PATTERN")
        .help(PATTERN_HELP)
        .num_args(0..)
        .action(ArgAction::Append);

    let arg_directory = Arg::new("directory")
        .short('d')
        .long("directory")
        .value_name("DIR")
        .help(DIRECTORY_HELP);

    let arg_config = Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help(CONFIG_HELP);

    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(ArgAction::Count);

    let arg_log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .value_name("FILE")
        .help(LOG_FILE_HELP);

    command!()
        .author(crate_authors!())
        .about(crate_description!())
        .name(crate_name!())
        .version(crate_version!())
        .arg(arg_patterns)
        .arg(arg_directory)
        .arg(arg_config)
        .arg(arg_verbose)
        .arg(arg_log_file)
}

/// Parses the process arguments
pub fn get_matches() -> ArgMatches {
    build_command().get_matches()
}

/// Gets the verbosity level from the number of -v/--verbose flags
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    LogLevel::from_occurrences(matches.get_count("verbose"))
}

/// Gets the optional log file path
pub fn get_log_file(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<String>("log_file").map(PathBuf::from)
}

/// Combines the config file (if any) with the command-line values
///
/// # Errors
/// Returns an error if an explicitly named config file cannot be loaded
pub fn resolve_config(matches: &ArgMatches) -> Result<Config> {
    let explicit = matches.get_one::<String>("config").map(PathBuf::from);
    let config = find_config(explicit.as_deref())?.unwrap_or_default();

    let patterns: Vec<String> = matches
        .get_many::<String>("patterns")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let directory = matches.get_one::<String>("directory").cloned();

    Ok(config.with_overrides(patterns, directory))
}

/// Plans the conversion described by the command line
pub fn run(matches: &ArgMatches) -> Result<Conversion> {
    let config = resolve_config(matches)?;
    Ok(convert(config.patterns, config.directory.as_deref()))
}

/// Formats one `source -> destination` line per planned conversion
pub fn render_pairs(conversion: &Conversion) -> Vec<String> {
    conversion
        .pairs()
        .map(|(source, destination)| {
            let plain = format!("{} -> {}", source.display(), destination.display());
            let colored = format!(
                "{} {} {}",
                source.display().to_string().cyan(),
                "->".dimmed(),
                destination.display().to_string().green()
            );
            format_message(&plain, &colored)
        })
        .collect()
}
