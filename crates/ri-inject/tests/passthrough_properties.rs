//! Property-based tests for transformation invariants.

use proptest::prelude::*;
use ri_common::{InterpreterSpec, RuninfoOpts};
use ri_inject::transform;

fn opts_with_lang(lang: &str) -> RuninfoOpts {
    RuninfoOpts {
        lang: Some(lang.to_string()),
        ..RuninfoOpts::default()
    }
}

proptest! {
    /// Unsupported tags are a strict no-op whatever the script contains.
    #[test]
    fn unknown_language_passthrough_is_identity(script in ".{0,300}") {
        let out = transform(&script, None, &opts_with_lang("zsh"));
        prop_assert_eq!(out, script);
    }

    /// Shell injection is strictly prepend-only: the script always forms
    /// the tail of the output, byte for byte.
    #[test]
    fn shell_injection_preserves_script_as_suffix(script in "[ -~\n]{0,300}") {
        for lang in ["bash", "fish"] {
            let out = transform(&script, None, &opts_with_lang(lang));
            if script.is_empty() {
                prop_assert_eq!(&out, &script);
            } else {
                prop_assert!(out.ends_with(&script));
                prop_assert!(out.contains("trap _runinfo_session_info EXIT"));
            }
        }
    }

    /// The R wrap keeps the script verbatim inside the protected region.
    #[test]
    fn r_injection_preserves_script_verbatim(script in "[ -~\n]{1,300}") {
        let out = transform(&script, None, &opts_with_lang("R"));
        prop_assert!(out.contains(&script));
        prop_assert!(
            out.contains("}, finally = .runinfo.save_session_info())"),
            "R wrap missing finally clause"
        );
    }

    /// Python injection never panics and always targets the session file,
    /// whatever the script looks like.
    #[test]
    fn python_injection_is_total(script in ".{0,300}") {
        let hint = InterpreterSpec::from("python3");
        let out = transform(&script, Some(&hint), &RuninfoOpts::default());
        if !script.is_empty() {
            prop_assert!(out.contains("{{job.metadir}}/job.runinfo.session"));
        }
    }
}
