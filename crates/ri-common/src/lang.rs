//! Language tags and the interpreter-path classifier.
//!
//! Jobs declare their interpreter as either a plain executable path or a
//! full argv token list. Classification looks only at the filename stem of
//! the executable token and resolves it to one of the four supported
//! language families, or passes the stem through verbatim as [`LanguageTag::Other`].
//!
//! The matcher is intentionally narrow: `sh` and `zsh` are shell-like but
//! are NOT folded into the bash family; only the `bash` and `fish`
//! families themselves are matched. Scripts tagged `Other` receive no
//! instrumentation.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Language family resolved for a job script.
///
/// Derived per job, never persisted. `Other` carries the raw filename stem
/// verbatim for interpreters outside the supported families.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LanguageTag {
    Python,
    R,
    Bash,
    Fish,
    Other(String),
}

impl LanguageTag {
    /// Canonical name, as used in `# Lang:` artifact headers and in the
    /// `runinfo_lang` option.
    pub fn as_str(&self) -> &str {
        match self {
            LanguageTag::Python => "python",
            LanguageTag::R => "R",
            LanguageTag::Bash => "bash",
            LanguageTag::Fish => "fish",
            LanguageTag::Other(name) => name,
        }
    }

    /// Parse an explicit `runinfo_lang` override.
    ///
    /// Exact names only; anything else is preserved verbatim as `Other`,
    /// which the orchestrator treats as "no injector registered".
    pub fn from_name(name: &str) -> Self {
        match name {
            "python" => LanguageTag::Python,
            "R" => LanguageTag::R,
            "bash" => LanguageTag::Bash,
            "fish" => LanguageTag::Fish,
            other => LanguageTag::Other(other.to_string()),
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interpreter invocation as supplied by the host framework.
///
/// Frameworks hand this over either as a single path-like string or as an
/// ordered argv list whose first token is the interpreter executable;
/// trailing tokens are flags and never participate in classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterpreterSpec {
    Path(String),
    Argv(Vec<String>),
}

impl InterpreterSpec {
    /// The executable token, if any.
    pub fn executable(&self) -> Option<&str> {
        let token = match self {
            InterpreterSpec::Path(path) => path.as_str(),
            InterpreterSpec::Argv(tokens) => tokens.first().map(String::as_str).unwrap_or(""),
        };
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }
}

impl From<&str> for InterpreterSpec {
    fn from(path: &str) -> Self {
        InterpreterSpec::Path(path.to_string())
    }
}

/// Classify an interpreter invocation into a language family.
///
/// Absent or empty input defaults to bash. Matching is prefix-based on the
/// filename stem, so versioned interpreter names (`python3.8.1`,
/// `Rscript-3.6`) resolve to their family. Pure and total; never fails.
pub fn classify(spec: Option<&InterpreterSpec>) -> LanguageTag {
    let stem = spec
        .and_then(InterpreterSpec::executable)
        .map(|exe| {
            Path::new(exe)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .filter(|stem| !stem.is_empty());

    let tag = match stem {
        Some(stem) => classify_stem(&stem),
        None => LanguageTag::Bash,
    };
    trace!(tag = %tag, "classified interpreter");
    tag
}

/// Apply the family rules to an already-extracted filename stem.
///
/// First match wins:
/// 1. `python` prefix (covers `python3`, `python3.7m`, ...)
/// 2. exactly `R`, or a `Rscript`/`R-` prefix (covers `Rscript-3.6`, `R-3.6`)
/// 3. `bash` prefix
/// 4. `fish` prefix
/// 5. anything else passes through verbatim
pub fn classify_stem(stem: &str) -> LanguageTag {
    if stem.starts_with("python") {
        return LanguageTag::Python;
    }
    // Bare `R` must match exactly so that e.g. `Ruby` falls through.
    if stem == "R" || stem.starts_with("Rscript") || stem.starts_with("R-") {
        return LanguageTag::R;
    }
    if stem.starts_with("bash") {
        return LanguageTag::Bash;
    }
    if stem.starts_with("fish") {
        return LanguageTag::Fish;
    }
    LanguageTag::Other(stem.to_string())
}
