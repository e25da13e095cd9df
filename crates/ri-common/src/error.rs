//! Error types for runinfo.
//!
//! The transformation path itself never fails: classification always
//! resolves to a tag, unsupported languages and missing scripts pass
//! through unchanged, and diagnostic-tool availability is handled inside
//! the generated code at run time. Errors surface only from strict option
//! validation, which hosts may run once at pipeline startup.

use thiserror::Error;

/// Result type alias for runinfo operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by strict option validation.
#[derive(Debug, Error)]
pub enum Error {
    /// An option value had the wrong JSON type.
    #[error("invalid value for option `{key}`: expected {expected}, got {found}")]
    InvalidOptionType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A key under the plugin option namespace is not recognized.
    #[error("unrecognized runinfo option `{0}`")]
    UnknownOption(String),
}
