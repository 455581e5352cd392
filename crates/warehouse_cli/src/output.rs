use colored::*;
use serde_json::json;
use warehouse_contracts::ValidationReport;

/// Prints the report in the requested format.
///
/// Text output is line-oriented and stable: one line per finding, prefixed
/// with its severity, then one summary line containing PASS or FAIL, so
/// calling automation can grep or pipe it. JSON output emits one record per
/// finding plus a final summary record, line-delimited.
pub fn print_report(report: &ValidationReport, json_output: bool) {
    if json_output {
        print_json_report(report);
    } else {
        print_text_report(report);
    }
}

fn print_text_report(report: &ValidationReport) {
    for finding in &report.findings {
        match &finding.relation {
            Some(relation) => println!(
                "{} [{}]: {}",
                finding.severity.to_string().red().bold(),
                relation,
                finding.message
            ),
            None => println!(
                "{}: {}",
                finding.severity.to_string().red().bold(),
                finding.message
            ),
        }
    }

    if report.passed() {
        println!("{} {}", "✓".green().bold(), "Validation PASS".green().bold());
    } else {
        println!(
            "{} {} ({} finding(s))",
            "✗".red().bold(),
            "Validation FAIL".red().bold(),
            report.findings.len()
        );
    }
}

fn print_json_report(report: &ValidationReport) {
    for finding in &report.findings {
        // Findings serialize infallibly; the types hold only strings/enums
        if let Ok(line) = serde_json::to_string(finding) {
            println!("{line}");
        }
    }

    let summary = json!({
        "summary": true,
        "passed": report.passed(),
        "findings": report.findings.len(),
    });
    println!("{summary}");
}

/// Prints a fatal (infrastructure) error to stderr.
pub fn print_fatal(message: &str) {
    eprintln!("{} {}", "FATAL:".red().bold(), message.red());
}
