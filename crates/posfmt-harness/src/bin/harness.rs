//! CLI entrypoint for the posfmt conformance harness.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use posfmt_core::{ScanPolicy, Scanner};
use posfmt_harness::fixtures::fixture_paths;
use posfmt_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, Outcome, now_utc,
};
use posfmt_harness::{
    ConformanceReport, FixtureArg, FixtureSet, HarnessConfig, TestRunner, VerificationResult,
};

/// Conformance tooling for posfmt.
#[derive(Debug, Parser)]
#[command(name = "posfmt-harness")]
#[command(about = "Conformance testing harness for posfmt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Format a template with the given arguments and print the result.
    Render {
        /// Template containing `{n}` placeholders.
        #[arg(long)]
        template: String,
        /// Scan policy (`strict` or `lenient`); defaults to `POSFMT_SCAN_POLICY`.
        #[arg(long)]
        policy: Option<String>,
        /// Arguments as `TYPE:VALUE` (e.g. `i8:-128`) or plain strings.
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Verify the formatter against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Run only this policy (`strict` or `lenient`); both when omitted.
        #[arg(long)]
        policy: Option<String>,
        /// Output report path (`.json` for JSON, markdown otherwise).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path; defaults to `POSFMT_LOG`.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Artifact index path (SHA-256 of report and log).
        #[arg(long)]
        artifact_index: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Print the classic hello-world example.
    Demo,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            template,
            policy,
            args,
        } => {
            let config = HarnessConfig::from_env().with_policy_override(policy.as_deref());
            let args = args
                .iter()
                .map(|a| FixtureArg::parse_cli(a))
                .collect::<Result<Vec<_>, _>>()?;
            let out = Scanner::new(config.policy).format(&template, args.as_slice())?;
            println!("{out}");
        }
        Command::Verify {
            fixture,
            policy,
            report,
            log,
            artifact_index,
            timestamp,
        } => {
            let config = HarnessConfig::from_env().with_log_override(log);
            let policies = match policy.as_deref() {
                Some(name) => vec![ScanPolicy::from_str_loose(name)],
                None => vec![ScanPolicy::Strict, ScanPolicy::Lenient],
            };
            verify(
                &fixture,
                &policies,
                report.as_deref(),
                &config,
                artifact_index.as_deref(),
                timestamp,
            )?;
        }
        Command::Demo => {
            println!("{}", posfmt_core::format("{1} {0}!", ("world", "hello"))?);
        }
    }

    Ok(())
}

fn verify(
    fixture: &Path,
    policies: &[ScanPolicy],
    report_path: Option<&Path>,
    config: &HarnessConfig,
    artifact_index: Option<&Path>,
    timestamp: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Verifying against fixtures in {}", fixture.display());
    let mut fixture_sets = Vec::new();
    for path in fixture_paths(fixture)? {
        match FixtureSet::from_file(&path) {
            Ok(set) => fixture_sets.push(set),
            Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
        }
    }
    if fixture_sets.is_empty() {
        return Err(format!("No fixture JSON files found in {}", fixture.display()).into());
    }

    let mut results = Vec::new();
    for &policy in policies {
        let runner = TestRunner::new("fixture-verify", policy);
        for set in &fixture_sets {
            results.extend(runner.run(set));
        }
    }
    // Stable ordering for reproducible reports.
    results.sort_by(|a, b| {
        a.family
            .cmp(&b.family)
            .then_with(|| a.case_name.cmp(&b.case_name))
    });

    let run_id = format!("verify-{}", std::process::id());
    if let Some(log_path) = &config.log_path {
        write_log(log_path, &run_id, &results, report_path)?;
    }

    let report = ConformanceReport::new(
        "fixture-verify",
        timestamp.unwrap_or_else(now_utc),
        results,
    );
    match report_path {
        Some(path) => {
            let body = if path.extension().and_then(|s| s.to_str()) == Some("json") {
                report.to_json()?
            } else {
                report.to_markdown()
            };
            std::fs::write(path, body)?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", report.to_markdown()),
    }

    if let Some(index_path) = artifact_index {
        let mut index = ArtifactIndex::new(&run_id);
        if let Some(path) = report_path {
            index.add_file(path, "report")?;
        }
        if let Some(path) = &config.log_path {
            index.add_file(path, "log")?;
        }
        std::fs::write(index_path, index.to_json()?)?;
    }

    eprintln!(
        "{} cases: {} passed, {} failed",
        report.total_cases, report.passed, report.failed
    );
    if !report.all_passed() {
        return Err(format!("{} fixture case(s) failed", report.failed).into());
    }
    Ok(())
}

fn write_log(
    path: &Path,
    run_id: &str,
    results: &[VerificationResult],
    report_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut emitter = LogEmitter::to_file(path, run_id)?;
    emitter.emit(LogLevel::Info, "verify_start")?;
    for r in results {
        let (level, outcome) = if r.passed {
            (LogLevel::Info, Outcome::Pass)
        } else {
            (LogLevel::Error, Outcome::Fail)
        };
        let mut entry = LogEntry::new(String::new(), level, "case_result")
            .with_case(&r.family, &r.case_name)
            .with_policy(&r.policy)
            .with_outcome(outcome)
            .with_latency_ns(r.latency_ns);
        if let Some(kind) = &r.error_kind {
            entry = entry.with_error_kind(kind);
        }
        if let Some(diff) = &r.diff {
            entry = entry.with_details(serde_json::json!({ "diff": diff }));
        }
        emitter.emit_entry(entry)?;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    let mut summary = LogEntry::new(String::new(), LogLevel::Info, "verify_summary").with_details(
        serde_json::json!({ "total": results.len(), "passed": passed, "failed": results.len() - passed }),
    );
    if let Some(path) = report_path {
        summary = summary.with_artifacts(vec![path.display().to_string()]);
    }
    emitter.emit_entry(summary)?;
    emitter.flush()?;
    Ok(())
}
