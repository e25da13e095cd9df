//! Host-facing extension points.
//!
//! The framework calls these by contract: [`apply_option_defaults`] once
//! at pipeline startup, [`rewrite_script`] once per job after its script
//! is resolved, and the three `jobcmd` generators (re-exported from
//! [`crate::jobcmd`]) at the lifecycle points around the subprocess
//! invocation. All of them are pure functions over their inputs; nothing
//! here keeps state between calls.

use serde_json::{Map, Value};
use tracing::debug;

use ri_common::{opts, InterpreterSpec, RuninfoOpts};
use ri_inject::transform;

/// Name the host registers this plugin under.
pub const PLUGIN_NAME: &str = "runinfo";

/// Plugin version, stamped into every generated artifact header.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Establish the recognized option defaults on the pipeline-wide map:
/// `runinfo_path=true`, `runinfo_submod=false`, `runinfo_lang` unset.
/// Values the operator already set are left untouched.
pub fn apply_option_defaults(pipeline_opts: &mut Map<String, Value>) {
    opts::apply_defaults(pipeline_opts);
    debug!("runinfo option defaults applied");
}

/// Rewrite one job's script with session-info instrumentation.
///
/// Options are resolved per key, job over pipeline over default. Jobs
/// that declare no script pass through as `None`, since there is nothing
/// to run a finalizer at the exit of, and languages with no registered
/// injector pass the script through unchanged.
pub fn rewrite_script(
    script: Option<&str>,
    lang_hint: Option<&InterpreterSpec>,
    pipeline_opts: &Map<String, Value>,
    job_opts: &Map<String, Value>,
) -> Option<String> {
    let script = script?;
    let resolved = RuninfoOpts::resolve(pipeline_opts, job_opts);
    Some(transform(script, lang_hint, &resolved))
}
