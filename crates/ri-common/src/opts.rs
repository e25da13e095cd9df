//! Plugin options and two-level resolution.
//!
//! The host framework carries plugin option maps at two levels: a
//! pipeline-wide map and a per-job override map. Resolution is per key
//! (job value, then pipeline value, then built-in default), so a job can
//! override one option without restating the rest.
//!
//! The runtime path is lenient by policy: a value of the wrong JSON type
//! falls back to the built-in default instead of erroring, matching the
//! rule that script transformation never fails a job. Hosts that prefer to
//! fail fast on misconfiguration can call [`validate`] once at startup.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Option key: include per-module filesystem paths in session info.
pub const OPT_PATH: &str = "runinfo_path";

/// Option key: include dotted/nested submodule entries in session info.
pub const OPT_SUBMOD: &str = "runinfo_submod";

/// Option key: explicit language tag, skipping classification.
pub const OPT_LANG: &str = "runinfo_lang";

/// Resolved plugin options for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuninfoOpts {
    /// Whether session-info rows carry the module path column.
    pub path: bool,

    /// Whether dotted/nested module names are reported.
    pub submod: bool,

    /// Explicit language override; `None` means classify the interpreter.
    pub lang: Option<String>,
}

impl Default for RuninfoOpts {
    fn default() -> Self {
        RuninfoOpts {
            path: true,
            submod: false,
            lang: None,
        }
    }
}

impl RuninfoOpts {
    /// Resolve effective options per key: job over pipeline over default.
    pub fn resolve(pipeline: &Map<String, Value>, job: &Map<String, Value>) -> Self {
        let defaults = RuninfoOpts::default();
        RuninfoOpts {
            path: bool_opt(job, pipeline, OPT_PATH).unwrap_or(defaults.path),
            submod: bool_opt(job, pipeline, OPT_SUBMOD).unwrap_or(defaults.submod),
            lang: str_opt(job, pipeline, OPT_LANG),
        }
    }
}

/// Establish the three recognized option defaults on the pipeline-wide
/// map, leaving keys the operator already set untouched. Called once at
/// pipeline startup.
pub fn apply_defaults(opts: &mut Map<String, Value>) {
    opts.entry(OPT_PATH.to_string()).or_insert(Value::Bool(true));
    opts.entry(OPT_SUBMOD.to_string())
        .or_insert(Value::Bool(false));
    opts.entry(OPT_LANG.to_string()).or_insert(Value::Null);
}

/// Strictly check every `runinfo_*` key in an option map.
///
/// The transformation path never consults this; it exists for hosts that
/// want typo and type errors reported at startup rather than silently
/// falling back to defaults.
pub fn validate(opts: &Map<String, Value>) -> Result<()> {
    for (key, value) in opts {
        if !key.starts_with("runinfo_") {
            continue;
        }
        match key.as_str() {
            OPT_PATH | OPT_SUBMOD => {
                if !value.is_boolean() {
                    return Err(Error::InvalidOptionType {
                        key: key.clone(),
                        expected: "bool",
                        found: json_type(value),
                    });
                }
            }
            OPT_LANG => {
                if !(value.is_null() || value.is_string()) {
                    return Err(Error::InvalidOptionType {
                        key: key.clone(),
                        expected: "string or null",
                        found: json_type(value),
                    });
                }
            }
            _ => return Err(Error::UnknownOption(key.clone())),
        }
    }
    Ok(())
}

fn first_value<'a>(
    job: &'a Map<String, Value>,
    pipeline: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a Value> {
    job.get(key).or_else(|| pipeline.get(key))
}

fn bool_opt(job: &Map<String, Value>, pipeline: &Map<String, Value>, key: &str) -> Option<bool> {
    first_value(job, pipeline, key).and_then(Value::as_bool)
}

fn str_opt(job: &Map<String, Value>, pipeline: &Map<String, Value>, key: &str) -> Option<String> {
    first_value(job, pipeline, key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
