//! Session-info injection for the bash family.
//!
//! bash has no block-level exception handling, but its EXIT trap fires no
//! matter how the shell terminates and leaves the exit status untouched
//! as long as the trap body does not call `exit` itself. The injector
//! prepends a finalizer function plus the trap registration and appends
//! the original script verbatim.
//!
//! Remote metadata directories cannot be written by the shell directly, so
//! the generated code detects a scheme separator at run time, writes to a
//! temp file, and relocates it with `cloudsh mv`.

use ri_common::Template;

use crate::{InjectOptions, SessionInjector, VERSION};

const SESSION_INFO_BASH: Template = Template(
    r##"# Inserted by runinfo v@version@, please do not modify
_runinfo_session_info() {
    runinfo_session="{{job.metadir}}/job.runinfo.session"
    if [[ "$runinfo_session" == *"://"* ]]; then
        runinfo_session_orig="$runinfo_session"
        runinfo_session=$(mktemp)
    fi

    echo "# Generated by runinfo v@version@" > $runinfo_session
    # shellcheck disable=SC2129
    echo "# Lang: bash" >> $runinfo_session
    echo -e "SHELL\t$SHELL" >> $runinfo_session
    echo -e "BASH_VERSION\t$BASH_VERSION" >> $runinfo_session
    echo -e "BASH_ARGV0\t$BASH_ARGV0" >> $runinfo_session
    echo -e "BASH_SOURCE\t$BASH_SOURCE" >> $runinfo_session
    runinfo_exe=$(readlink /proc/$$/exe)
    # shellcheck disable=SC2129
    echo -e "proc-exe\t$runinfo_exe" >> $runinfo_session
    echo -e "proc-exe-version\t$($runinfo_exe --version | head -1)" >> $runinfo_session

    if [[ -v runinfo_session_orig ]]; then
        cloudsh mv "$runinfo_session" "$runinfo_session_orig"
    fi
}

trap _runinfo_session_info EXIT
# End of inserted by runinfo
# ------------------------------------------------------------
# Regular script starts
# ------------------------------------------------------------
"##,
);

pub(crate) struct BashInjector;

impl SessionInjector for BashInjector {
    fn inject(&self, script: &str, _opts: &InjectOptions) -> String {
        let code = SESSION_INFO_BASH.render(&[("version", VERSION)]);
        format!("{code}\n{script}")
    }
}
