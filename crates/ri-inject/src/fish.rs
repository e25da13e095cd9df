//! Session-info injection for the fish family.
//!
//! Same strategy as bash (a finalizer function on the EXIT trap) in
//! fish syntax: `function`/`end` blocks, `set -l` locals, and
//! `string match` for the remote-target check. The interpreter executable
//! is resolved through `$fish_pid` rather than `$$`, which fish does not
//! expand.

use ri_common::Template;

use crate::{InjectOptions, SessionInjector, VERSION};

const SESSION_INFO_FISH: Template = Template(
    r##"# Inserted by runinfo v@version@, please do not modify
function _runinfo_session_info
    set -l runinfo_session "{{job.metadir}}/job.runinfo.session"
    if string match -q "*://*" $runinfo_session
        set runinfo_session_orig $runinfo_session
        set runinfo_session (mktemp)
    end

    echo "# Generated by runinfo v@version@" > $runinfo_session
    echo "# Lang: fish" >> $runinfo_session
    echo -e "SHELL\t$SHELL" >> $runinfo_session
    echo -e "FISH_VERSION\t$FISH_VERSION" >> $runinfo_session
    set -l runinfo_exe (readlink /proc/$fish_pid/exe)
    echo -e "proc-exe\t$runinfo_exe" >> $runinfo_session
    echo -e "proc-exe-version\t$($runinfo_exe --version)" 2>/dev/null >> $runinfo_session

    if set -q runinfo_session_orig
        cloudsh mv $runinfo_session $runinfo_session_orig
    end
end

trap _runinfo_session_info EXIT
# End of inserted by runinfo
# ------------------------------------------------------------
# Regular script starts
# ------------------------------------------------------------
"##,
);

pub(crate) struct FishInjector;

impl SessionInjector for FishInjector {
    fn inject(&self, script: &str, _opts: &InjectOptions) -> String {
        let code = SESSION_INFO_FISH.render(&[("version", VERSION)]);
        format!("{code}\n{script}")
    }
}
