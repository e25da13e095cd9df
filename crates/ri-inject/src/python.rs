//! Session-info injection for the python family.
//!
//! The finalizer is registered with `atexit`, which fires however the
//! interpreter shuts down, so the block is simply prepended. The one structural wrinkle is
//! `from __future__ import annotations`: python requires future imports to
//! be the first statement of the module, so when the script opens with one
//! (ignoring blank lines and full-line comments) it is re-emitted ahead of
//! the injected block. A match deeper in the file, e.g. inside a string
//! literal, is left exactly where it is.

use std::sync::OnceLock;

use regex::Regex;
use ri_common::Template;

use crate::{InjectOptions, SessionInjector, VERSION};

const SESSION_INFO_PYTHON: Template = Template(
    r##"# Inserted by runinfo v@version@, please do not modify
import atexit


def _runinfo_session_info(show_path, include_submodule):
    try:
        from importlib import metadata as importlib_metadata
    except ImportError:
        import importlib_metadata

    import subprocess
    import sys
    import tempfile
    from pathlib import Path

    target = "{{job.metadir}}/job.runinfo.session"
    remote_target = None
    if "://" in target:
        remote_target = target
        target = tempfile.mkstemp()[1]

    lines = ["# Generated by runinfo v@version@\n", "# Lang: python\n"]
    if show_path:
        lines.append("Name\t__version__\timportlib.metadata\tPath\n")
        lines.append(f"python\t{sys.version}\t-\t{sys.executable}\n")
    else:
        lines.append("Name\t__version__\timportlib.metadata\n")
        lines.append(f"python\t{sys.version}\t-\n")

    for name, module in sys.modules.copy().items():
        if not include_submodule and "." in name:
            continue

        ver = getattr(module, "__version__", getattr(module, "version", "-"))
        mdfile = getattr(module, "__file__", None)
        package = getattr(module, "__package__", None)
        if mdfile is None or "site-packages" not in mdfile or not package:
            # Built-in or stdlib module
            continue

        try:
            imver = importlib_metadata.version(package)
        except importlib_metadata.PackageNotFoundError:
            imver = "-"

        if show_path:
            lines.append(f"{name}\t{ver}\t{imver}\t{mdfile}\n")
        else:
            lines.append(f"{name}\t{ver}\t{imver}\n")

    with Path(target).open("w") as fout:
        fout.writelines(lines)

    if remote_target is not None:
        subprocess.run(["cloudsh", "mv", target, remote_target], check=False)


@atexit.register
def _runinfo_at_exit():
    _runinfo_session_info(@show_path@, @include_submodule@)


# End of inserted by runinfo
# ------------------------------------------------------------
# Regular script starts
# ------------------------------------------------------------
"##,
);

/// The one statement that must stay first in a python module.
const FUTURE_IMPORT: &str = "from __future__ import annotations";

fn future_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^from\s+__future__\s+import\s+annotations\s*$").expect("valid regex")
    })
}

fn py_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

pub(crate) struct PythonInjector;

impl SessionInjector for PythonInjector {
    fn inject(&self, script: &str, opts: &InjectOptions) -> String {
        let code = SESSION_INFO_PYTHON.render(&[
            ("version", VERSION),
            ("show_path", py_bool(opts.show_module_path)),
            ("include_submodule", py_bool(opts.include_submodules)),
        ]);

        let Some(found) = future_import_re().find(script) else {
            return format!("{code}\n{script}");
        };

        // The statement only keeps its special meaning when everything
        // before it is blank lines or full-line comments; otherwise the
        // match is inside later content (e.g. a string literal) and must
        // stay put.
        let prefix = &script[..found.start()];
        let leading_only = prefix
            .lines()
            .all(|line| line.trim().is_empty() || line.trim_start().starts_with('#'));
        if !leading_only {
            return format!("{code}\n{script}");
        }

        let remainder = format!("{}{}", prefix, &script[found.end()..]);
        format!("{FUTURE_IMPORT}\n{code}\n{remainder}")
    }
}
