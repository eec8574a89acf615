//! Output formatting - plaintext and JSON.

use serde_json::{json, Value};

use crate::builder::{FileReport, SkippedFile};

/// Renders diagnostics as `path:line: message` lines followed by a summary.
pub fn render_plain(reports: &[FileReport]) -> String {
    let mut out = String::new();
    let mut count = 0usize;

    for report in reports {
        for diag in &report.diagnostics {
            count += 1;
            match diag.line {
                Some(line) => out.push_str(&format!(
                    "{}:{}: {}\n",
                    report.path.display(),
                    line,
                    diag.message
                )),
                None => out.push_str(&format!("{}: {}\n", report.path.display(), diag.message)),
            }
        }
    }

    if count == 0 {
        out.push_str("No ignored Logger metadata found.\n");
    } else {
        out.push_str(&format!("\n{} issue(s) in {} file(s)\n", count, files_with_issues(reports)));
    }
    out
}

/// Builds the JSON document:
/// `{"issues": [{"file", "line", "message"}], "count", "skipped": [{"file", "reason"}]}`.
pub fn render_json(reports: &[FileReport], skipped: &[SkippedFile]) -> Value {
    let issues: Vec<Value> = reports
        .iter()
        .flat_map(|report| {
            report.diagnostics.iter().map(move |diag| {
                json!({
                    "file": report.path.display().to_string(),
                    "line": diag.line,
                    "message": diag.message,
                })
            })
        })
        .collect();

    let skipped: Vec<Value> = skipped
        .iter()
        .map(|s| {
            json!({
                "file": s.path.display().to_string(),
                "reason": s.reason,
            })
        })
        .collect();

    json!({ "count": issues.len(), "issues": issues, "skipped": skipped })
}

fn files_with_issues(reports: &[FileReport]) -> usize {
    reports.iter().filter(|r| !r.diagnostics.is_empty()).count()
}

/// Prints diagnostics in plain text format.
pub fn print_plain(reports: &[FileReport]) {
    print!("{}", render_plain(reports));
}

/// Prints diagnostics in JSON format.
///
/// Falls back to a compact form if pretty printing fails.
pub fn print_json(reports: &[FileReport], skipped: &[SkippedFile]) {
    let doc = render_json(reports, skipped);
    match serde_json::to_string_pretty(&doc) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::warn!(error = %e, "JSON pretty printing failed");
            println!("{}", doc);
        }
    }
}
