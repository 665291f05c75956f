//! Plans JSON-to-JavaScript module conversions
//!
//! Given glob patterns and an optional output directory, json2js finds the
//! `.json` files to convert and computes the `.js` path each one maps to.
//! It never reads or writes file contents.

pub mod cli;
pub mod config;
pub mod constants;
pub mod converter;
pub mod destination;
pub mod directory;
pub mod discovery;
mod errors;
pub mod fs;
pub mod logging;
pub mod outcome;
pub mod patterns;

pub use converter::{Conversion, convert, convert_with};
pub use errors::*;
pub use outcome::{Diagnostic, Normalized, Stage};
pub use patterns::{PatternInput, PatternSet};

pub mod prelude {
    pub use crate::converter::{Conversion, convert, convert_with};
    pub use crate::errors::{
        config_parsing_error, file_operation_error, glob_pattern_error, invalid_filename_error,
        path_operation_error, unexpected_extension_error,
    };
    pub use crate::errors::{Error, Result};
    pub use crate::fs::{DirectoryEnsurer, GlobResolver, LocalFileSystem, MemoryFileSystem};
    pub use crate::logging::{LogLevel, format_message, init_logger};
    pub use crate::outcome::{Diagnostic, Normalized, Stage};
    pub use crate::patterns::{PatternInput, PatternSet, normalize_patterns};
}
