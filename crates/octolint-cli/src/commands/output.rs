//! Report rendering for the check command.

use anyhow::Result;
use miette::GraphicalReportHandler;
use octolint_core::{CheckFailure, LintReport, Severity};

use crate::OutputFormat;

/// Print a report in the specified format.
pub fn print(report: &LintReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print!("{}", compact(report)),
    }
    Ok(())
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Ok => "\x1b[32mok\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Permission => "\x1b[35mpermission\x1b[0m",
        Severity::Error => "\x1b[31merror\x1b[0m",
    }
}

fn print_text(report: &LintReport) {
    for result in &report.results {
        let mut lines = result.message().lines();
        println!("{} [{}]", result.check(), result.category());
        println!(
            "  {}: {}",
            severity_label(result.severity()),
            lines.next().unwrap_or_default()
        );
        for line in lines {
            println!("    {line}");
        }
        if !result.link().is_empty() {
            println!("  = see: {}", result.link());
        }
        println!();
    }

    for failure in &report.failures {
        eprintln!("{}", render_failure(failure));
    }

    for id in &report.not_applicable {
        println!("{id}: not applicable");
    }

    let counts = report.count_by_severity();
    let summary_color = if counts.errors > 0 || !report.failures.is_empty() {
        "\x1b[31m"
    } else if counts.warnings > 0 || counts.permissions > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Ran {} check(s): {} ok, {} warning(s), {} permission issue(s), {} error(s), {} failed\x1b[0m",
        summary_color,
        report.checks_run,
        counts.ok,
        counts.warnings,
        counts.permissions,
        counts.errors,
        report.failures.len()
    );
}

fn render_failure(failure: &CheckFailure) -> String {
    let mut rendered = format!("{} failed ({:?}):\n", failure.check, failure.kind);
    if GraphicalReportHandler::new()
        .render_report(&mut rendered, &failure.error)
        .is_err()
    {
        rendered.push_str(&failure.message);
    }
    rendered
}

fn print_json(report: &LintReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn compact(report: &LintReport) -> String {
    let mut out = String::new();
    for result in &report.results {
        out.push_str(&result.to_string());
        out.push('\n');
    }
    for failure in &report.failures {
        out.push_str(&format!("{}: failed [{:?}] {}\n", failure.check, failure.kind, failure.message));
    }
    out
}
