//! Placeholder rendering for generated-code templates.
//!
//! Instrumentation templates are `&'static str` constants with `@name@`
//! tokens. Rendering applies a name/value list immutably and returns a new
//! string; the constants themselves are never touched, which keeps every
//! call reentrant across concurrently transformed jobs.
//!
//! The host framework's own substitution token ([`METADIR_PLACEHOLDER`])
//! is not a template placeholder: it survives rendering untouched and is
//! replaced by the framework when the job is materialized.

/// Token the host framework replaces with the job's metadata directory.
pub const METADIR_PLACEHOLDER: &str = "{{job.metadir}}";

/// A code template with `@name@` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Template(pub &'static str);

impl Template {
    /// Render the template, replacing each `@name@` token with its value.
    ///
    /// Only the tokens named in `vars` are replaced; any other `@` in the
    /// template text (python decorators, say) is left alone.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = self.0.to_string();
        for (name, value) in vars {
            let token = format!("@{name}@");
            out = out.replace(&token, value);
        }
        out
    }
}
