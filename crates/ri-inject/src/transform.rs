//! Script transformation orchestration.
//!
//! One call per job: resolve the effective language tag, pick the matching
//! injector, and return the transformed script text. Everything that can
//! go "wrong" here (an unsupported language, a job with no script body)
//! is a documented pass-through, never an error. This module touches no
//! filesystem and holds no state, so the framework may call it from any
//! number of worker contexts at once.

use ri_common::{classify, InterpreterSpec, LanguageTag, RuninfoOpts};
use tracing::debug;

use crate::{injector_for, InjectOptions};

/// Transform one job's script with session-info instrumentation.
///
/// The effective language is the explicit `runinfo_lang` override when
/// set, otherwise the classification of `lang_hint` (an absent hint means
/// bash). Scripts that are empty, or whose language has no registered
/// injector, are returned textually unchanged.
pub fn transform(script: &str, lang_hint: Option<&InterpreterSpec>, opts: &RuninfoOpts) -> String {
    let tag = match opts.lang.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => LanguageTag::from_name(name),
        None => classify(lang_hint),
    };

    if script.is_empty() {
        return script.to_string();
    }

    match injector_for(&tag) {
        Some(injector) => {
            debug!(lang = %tag, "injecting session info");
            injector.inject(
                script,
                &InjectOptions {
                    show_module_path: opts.path,
                    include_submodules: opts.submod,
                },
            )
        }
        None => {
            debug!(lang = %tag, "no injector for language, passing script through");
            script.to_string()
        }
    }
}
