//! Job-command wrapper fragments.
//!
//! Three pure text generators the framework splices around the actual
//! subprocess invocation: `init` declares the report-path variables,
//! `prep` rewraps the pending command line (exposed by the framework in
//! the `cmd` shell variable and later `eval`ed) with GNU time, and `end`
//! fills the device report after the command has run. The fragments
//! assume a POSIX-like shell; every diagnostic tool is probed at run time
//! and degrades to an explanatory placeholder line rather than failing
//! the job.
//!
//! Remote metadata directories are decided at generation time: `init`
//! then points the report variables at temp files and records the real
//! destinations in `*_orig` variables, which `end` relocates via
//! `cloudsh mv`.

use ri_common::{is_remote_path, Template};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Marker line identifying runinfo fragments in the assembled wrapper.
const FRAGMENT_MARKER: &str = "# plugin: runinfo";

const PREP_FRAGMENT: Template = Template(
    r#"# plugin: runinfo
if env time -V &>/dev/null; then
    cmd="env time \
        -f '# Generated by runinfo v@version@\n\n\
Command: %C\n\
Voluntary context switches: %w\n\
Involuntary context switches: %c\n\
Percentage of CPU this job got: %P\n\
Major page faults: %F\n\
Minor page faults: %R\n\
Maximum resident set size (kB): %M\n\
Elapsed real time (s): %e\n\
System (kernel) time (s): %S\n\
User time (s): %U\n\
Exit status: %x' \
        -o $runinfo_time $cmd"
else
    echo "GNU time is not available, job is not timed." > $runinfo_time
    echo "See: https://www.gnu.org/software/time/" >> $runinfo_time
fi
"#,
);

const RELOCATE_REMOTE: &str = r#"if [[ -v runinfo_device_orig ]]; then
    cloudsh mv $runinfo_device $runinfo_device_orig
    cloudsh mv $runinfo_time $runinfo_time_orig
fi
"#;

/// One labeled block of the device report.
struct DeviceSection {
    title: &'static str,
    body: SectionBody,
}

enum SectionBody {
    /// Append the output of one command unconditionally.
    Command(&'static str),
    /// Probe commands in order and report with the first available one.
    Probed {
        /// `(probe invocation, report command)` pairs.
        candidates: &'static [(&'static str, &'static str)],
        fallback: &'static str,
    },
}

const DEVICE_SECTIONS: &[DeviceSection] = &[
    DeviceSection {
        title: "Hostname",
        body: SectionBody::Command("hostname"),
    },
    DeviceSection {
        title: "CPU",
        body: SectionBody::Command("lscpu"),
    },
    DeviceSection {
        title: "Memory",
        body: SectionBody::Command("free -h"),
    },
    DeviceSection {
        title: "Disk",
        body: SectionBody::Command("df -h"),
    },
    DeviceSection {
        title: "Network",
        body: SectionBody::Probed {
            candidates: &[("ifconfig --version", "ifconfig"), ("ip -V", "ip a")],
            fallback: "Neither ifconfig nor ip is available.",
        },
    },
    DeviceSection {
        title: "GPU",
        body: SectionBody::Probed {
            candidates: &[("nvidia-smi --version", "nvidia-smi")],
            fallback: "nvidia-smi is not available.",
        },
    },
];

/// Declare the device/timing report variables for one job.
///
/// Local metadata directories are written directly; remote ones get temp
/// files plus `*_orig` destinations for the relocation in
/// [`end_fragment`].
pub fn init_fragment(metadir: &str) -> String {
    if is_remote_path(metadir) {
        format!(
            r#"{FRAGMENT_MARKER}
runinfo_device_orig="{metadir}/job.runinfo.device"
runinfo_device=$(mktemp)
runinfo_time_orig="{metadir}/job.runinfo.time"
runinfo_time=$(mktemp)
"#
        )
    } else {
        format!(
            r#"{FRAGMENT_MARKER}
runinfo_device="{metadir}/job.runinfo.device"
runinfo_time="{metadir}/job.runinfo.time"
"#
        )
    }
}

/// Rewrap the pending `$cmd` line with GNU time, writing the fixed field
/// set to the timing report; falls back to a placeholder note when GNU
/// time is absent on the host.
pub fn prep_fragment() -> String {
    PREP_FRAGMENT.render(&[("version", VERSION)])
}

/// Fill the device report after the command has run, then relocate both
/// reports when the init fragment chose the remote strategy.
pub fn end_fragment(scheduler: &str) -> String {
    let mut out = String::new();
    out.push_str(FRAGMENT_MARKER);
    out.push_str("\n\n");
    out.push_str(&format!(
        "echo \"# Generated by runinfo v{VERSION}\" > $runinfo_device\n"
    ));

    push_section_header(&mut out, "Scheduler");
    out.push_str(&format!("echo \"{scheduler}\" >> $runinfo_device\n"));

    for section in DEVICE_SECTIONS {
        push_section_header(&mut out, section.title);
        match &section.body {
            SectionBody::Command(cmd) => {
                out.push_str(&format!("{cmd} >> $runinfo_device\n"));
            }
            SectionBody::Probed {
                candidates,
                fallback,
            } => push_probed(&mut out, candidates, fallback, 0),
        }
    }

    out.push_str("echo \"\" >> $runinfo_device\n\n");
    out.push_str(RELOCATE_REMOTE);
    out
}

fn push_section_header(out: &mut String, title: &str) {
    out.push_str("echo \"\" >> $runinfo_device\n");
    out.push_str(&format!("echo \"{title}\" >> $runinfo_device\n"));
    out.push_str(&format!(
        "echo \"{}\" >> $runinfo_device\n",
        "-".repeat(title.len())
    ));
}

fn push_probed(out: &mut String, candidates: &[(&str, &str)], fallback: &str, depth: usize) {
    let pad = "    ".repeat(depth);
    match candidates.split_first() {
        Some(((probe, report), rest)) => {
            out.push_str(&format!("{pad}if {probe} &>/dev/null; then\n"));
            out.push_str(&format!("{pad}    {report} >> $runinfo_device\n"));
            out.push_str(&format!("{pad}else\n"));
            push_probed(out, rest, fallback, depth + 1);
            out.push_str(&format!("{pad}fi\n"));
        }
        None => {
            out.push_str(&format!("{pad}echo \"{fallback}\" >> $runinfo_device\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_local_writes_directly() {
        let out = init_fragment("/work/pipeline/job.0");
        assert!(out.starts_with(FRAGMENT_MARKER));
        assert!(out.contains("runinfo_device=\"/work/pipeline/job.0/job.runinfo.device\""));
        assert!(out.contains("runinfo_time=\"/work/pipeline/job.0/job.runinfo.time\""));
        assert!(!out.contains("mktemp"));
        assert!(!out.contains("_orig"));
    }

    #[test]
    fn init_remote_points_at_temp_files() {
        let out = init_fragment("s3://bucket/pipeline/job.0");
        assert!(out.contains("runinfo_device_orig=\"s3://bucket/pipeline/job.0/job.runinfo.device\""));
        assert!(out.contains("runinfo_device=$(mktemp)"));
        assert!(out.contains("runinfo_time_orig=\"s3://bucket/pipeline/job.0/job.runinfo.time\""));
        assert!(out.contains("runinfo_time=$(mktemp)"));
    }

    #[test]
    fn prep_wraps_cmd_with_gnu_time_or_degrades() {
        let out = prep_fragment();
        assert!(out.starts_with(FRAGMENT_MARKER));
        assert!(out.contains("if env time -V &>/dev/null; then"));
        assert!(out.contains("-o $runinfo_time $cmd"));
        assert!(out.contains("GNU time is not available, job is not timed."));
        assert!(out.contains("https://www.gnu.org/software/time/"));
    }

    #[test]
    fn prep_reports_the_fixed_field_set() {
        let out = prep_fragment();
        for field in [
            "Command: %C",
            "Voluntary context switches: %w",
            "Involuntary context switches: %c",
            "Percentage of CPU this job got: %P",
            "Major page faults: %F",
            "Minor page faults: %R",
            "Maximum resident set size (kB): %M",
            "Elapsed real time (s): %e",
            "System (kernel) time (s): %S",
            "User time (s): %U",
            "Exit status: %x",
        ] {
            assert!(out.contains(field), "missing field `{field}`");
        }
    }

    #[test]
    fn end_reports_every_section_with_matching_underline() {
        let out = end_fragment("slurm");
        for title in ["Scheduler", "Hostname", "CPU", "Memory", "Disk", "Network", "GPU"] {
            assert!(out.contains(&format!("echo \"{title}\" >> $runinfo_device")));
            let underline = "-".repeat(title.len());
            assert!(out.contains(&format!("echo \"{underline}\" >> $runinfo_device")));
        }
        assert!(out.contains("echo \"slurm\" >> $runinfo_device"));
        assert!(out.contains("lscpu >> $runinfo_device"));
        assert!(out.contains("free -h >> $runinfo_device"));
        assert!(out.contains("df -h >> $runinfo_device"));
    }

    #[test]
    fn network_probe_prefers_ifconfig_then_ip() {
        let out = end_fragment("local");
        let ifconfig = out.find("if ifconfig --version &>/dev/null; then").unwrap();
        let ip = out.find("if ip -V &>/dev/null; then").unwrap();
        let fallback = out.find("Neither ifconfig nor ip is available.").unwrap();
        assert!(ifconfig < ip && ip < fallback);
    }

    #[test]
    fn gpu_probe_degrades_gracefully() {
        let out = end_fragment("local");
        assert!(out.contains("if nvidia-smi --version &>/dev/null; then"));
        assert!(out.contains("nvidia-smi is not available."));
    }

    #[test]
    fn end_relocates_only_under_the_remote_strategy() {
        let out = end_fragment("local");
        assert!(out.contains("if [[ -v runinfo_device_orig ]]; then"));
        assert!(out.contains("cloudsh mv $runinfo_device $runinfo_device_orig"));
        assert!(out.contains("cloudsh mv $runinfo_time $runinfo_time_orig"));
    }
}
