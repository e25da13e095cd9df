//! runinfo: job run-time diagnostics plugin for pipeline frameworks.
//!
//! For each job the plugin (a) splices a session-info finalizer into the
//! job's script, in the script's own language, and (b) hands the
//! framework shell fragments that time the job with GNU time and capture
//! host/device information around the subprocess invocation. Everything
//! produced here is text; executing it is entirely the framework's
//! business.
//!
//! Artifacts written when the generated code runs:
//! - `<metadir>/job.runinfo.session`: interpreter and loaded libraries
//! - `<metadir>/job.runinfo.time`: resource usage of the job process
//! - `<metadir>/job.runinfo.device`: host CPU/memory/disk/network/GPU

pub mod jobcmd;
pub mod plugin;

pub use jobcmd::{end_fragment, init_fragment, prep_fragment};
pub use plugin::{apply_option_defaults, rewrite_script, PLUGIN_NAME, PLUGIN_VERSION};
