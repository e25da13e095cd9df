//! Session-info injection for the R family.
//!
//! R has no reliable run-at-exit primitive across error paths, so the
//! whole original script is wrapped in `tryCatch({...}, finally = ...)`
//! with the finalizer on the `finally` clause. The script body is inserted
//! verbatim and unindented between comment banners so its line content
//! (and any error line numbers close to the top) stay recognizable.

use ri_common::Template;

use crate::{InjectOptions, SessionInjector, VERSION};

const SESSION_INFO_R: Template = Template(
    r##".runinfo.save_session_info <- function() {
    .runinfo.session.file <- "{{job.metadir}}/job.runinfo.session"
    if (grepl("://", .runinfo.session.file, fixed = TRUE)) {
        .runinfo.session.file.orig <- .runinfo.session.file
        .runinfo.session.file <- tempfile()
    }

    writeLines(
        c(
            "# Generated by runinfo v@version@",
            "# Lang: R",
            capture.output(sessionInfo())
        ),
        .runinfo.session.file
    )

    if (exists(".runinfo.session.file.orig")) {
        system2("cloudsh", c("mv", .runinfo.session.file, .runinfo.session.file.orig))
    }
}
"##,
);

const BANNER: &str = "# ------------------------------------------------------";

pub(crate) struct RInjector;

impl SessionInjector for RInjector {
    fn inject(&self, script: &str, _opts: &InjectOptions) -> String {
        let code = SESSION_INFO_R.render(&[("version", VERSION)]);

        let mut lines: Vec<String> = Vec::new();
        lines.push(format!(
            "# Inserted by runinfo v{VERSION}, please do not modify"
        ));
        lines.extend(code.lines().map(str::to_string));
        lines.push("tryCatch({".to_string());
        lines.push("# End of inserted by runinfo, please do not modify".to_string());
        lines.push(BANNER.to_string());
        lines.push("# Regular script starts".to_string());
        lines.push(BANNER.to_string());
        lines.push(String::new());
        lines.push(script.to_string());
        lines.push(String::new());
        lines.push(BANNER.to_string());
        lines.push("# Regular script ends".to_string());
        lines.push(BANNER.to_string());
        lines.push("}, finally = .runinfo.save_session_info())".to_string());
        lines.push(String::new());
        lines.join("\n")
    }
}
