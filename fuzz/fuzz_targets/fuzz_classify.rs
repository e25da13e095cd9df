#![no_main]

use libfuzzer_sys::fuzz_target;
use ri_common::{classify_stem, LanguageTag};

// Classification is total and deterministic, and stems outside the four
// families must survive verbatim.
fuzz_target!(|stem: &str| {
    let tag = classify_stem(stem);
    assert_eq!(tag, classify_stem(stem));

    if let LanguageTag::Other(raw) = &tag {
        assert_eq!(raw, stem);
    }
});
