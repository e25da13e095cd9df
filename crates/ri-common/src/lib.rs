//! runinfo shared foundation types.
//!
//! This crate provides the pieces every runinfo crate builds on:
//! - Language tags and the interpreter-path classifier
//! - The interpreter invocation value as supplied by the host framework
//! - Plugin option records with two-level (pipeline/job) resolution
//! - Placeholder template rendering for generated code
//! - Common error types

pub mod error;
pub mod lang;
pub mod opts;
pub mod template;

pub use error::{Error, Result};
pub use lang::{classify, classify_stem, InterpreterSpec, LanguageTag};
pub use opts::{RuninfoOpts, OPT_LANG, OPT_PATH, OPT_SUBMOD};
pub use template::{Template, METADIR_PLACEHOLDER};

/// Whether a metadata-directory path points at remote storage.
///
/// Paths carrying a scheme separator (`s3://...`, `gs://...`) cannot be
/// written directly by a shell; generated code writes to a temp file and
/// relocates it with the external `cloudsh` helper instead.
pub fn is_remote_path(path: &str) -> bool {
    path.contains("://")
}
