#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ri_common::LanguageTag;
use ri_inject::{injector_for, InjectOptions, SessionInjector};

#[derive(Debug, Arbitrary)]
struct Input {
    script: String,
    show_module_path: bool,
    include_submodules: bool,
}

// Injection never panics for any script text. The R and shell injectors
// keep the script verbatim; python may re-anchor a leading future-import
// statement, so it only promises to target the session artifact.
fuzz_target!(|input: Input| {
    let opts = InjectOptions {
        show_module_path: input.show_module_path,
        include_submodules: input.include_submodules,
    };

    for tag in [LanguageTag::R, LanguageTag::Bash, LanguageTag::Fish] {
        let injector = injector_for(&tag).expect("supported family");
        let out = injector.inject(&input.script, &opts);
        assert!(out.contains(&input.script));
    }

    let python = injector_for(&LanguageTag::Python).expect("supported family");
    let out = python.inject(&input.script, &opts);
    assert!(out.contains("{{job.metadir}}/job.runinfo.session"));
});
