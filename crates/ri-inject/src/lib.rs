//! Per-language session-info injectors.
//!
//! Each supported language family knows how to splice a finalizer into a
//! job script so that, however control leaves the script, a
//! `job.runinfo.session` artifact is written to the job's metadata
//! directory, without changing the script's own stdout/stderr/exit status.
//!
//! Per-family strategy:
//! - python: run-at-exit registration (`atexit`), block prepended
//! - R: whole script wrapped in `tryCatch({...}, finally = ...)`
//! - bash / fish: finalizer function registered on the EXIT trap
//!
//! Everything injected lives under a fixed identifier prefix (`_runinfo_`
//! in python and the shells, `.runinfo.` in R) so it cannot collide with
//! names a user script defines. Templates carry the literal
//! `{{job.metadir}}` token; the host framework substitutes the real
//! metadata directory when the job is materialized.

mod bash;
mod fish;
mod python;
mod rlang;
pub mod transform;

pub use transform::transform;

use ri_common::LanguageTag;

/// Version stamped into generated instrumentation code.
pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display options threaded into the generated session-info routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectOptions {
    /// Include the per-module filesystem path column.
    pub show_module_path: bool,

    /// Include dotted/nested submodule entries.
    pub include_submodules: bool,
}

impl Default for InjectOptions {
    fn default() -> Self {
        InjectOptions {
            show_module_path: true,
            include_submodules: false,
        }
    }
}

/// A per-language strategy for splicing the session-info finalizer into a
/// job script.
///
/// Implementations must keep the transformed script syntactically valid in
/// their language, guarantee the finalizer runs exactly once however
/// control leaves the script, and leave the script's observable behavior
/// otherwise unchanged.
pub trait SessionInjector: Sync {
    fn inject(&self, script: &str, opts: &InjectOptions) -> String;
}

/// Look up the injector for a language family.
///
/// `Other` tags have no injector registered; the orchestrator passes those
/// scripts through unchanged.
pub fn injector_for(tag: &LanguageTag) -> Option<&'static dyn SessionInjector> {
    match tag {
        LanguageTag::Python => Some(&python::PythonInjector),
        LanguageTag::R => Some(&rlang::RInjector),
        LanguageTag::Bash => Some(&bash::BashInjector),
        LanguageTag::Fish => Some(&fish::FishInjector),
        LanguageTag::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_family_has_an_injector() {
        for tag in [
            LanguageTag::Python,
            LanguageTag::R,
            LanguageTag::Bash,
            LanguageTag::Fish,
        ] {
            assert!(injector_for(&tag).is_some(), "missing injector for {tag}");
        }
    }

    #[test]
    fn other_tags_have_no_injector() {
        assert!(injector_for(&LanguageTag::Other("sh".to_string())).is_none());
        assert!(injector_for(&LanguageTag::Other("zsh".to_string())).is_none());
    }
}
