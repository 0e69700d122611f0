//! Common display utilities for CLI commands.

use std::fmt::Write;

use techjobs::Record;

const DELIMITER: &str = "*****";

/// Message printed when a query has no matches.
pub const NO_RESULTS: &str = "No results";

/// Print jobs as text blocks or as a JSON array.
pub fn print_jobs(jobs: &[&Record], json: bool) -> Result<(), techjobs::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(jobs)?);
    } else {
        print!("{}", format_jobs(jobs));
    }
    Ok(())
}

/// Render each job as a `*****`-delimited block of `field: value` lines.
///
/// An empty slice renders as [`NO_RESULTS`].
pub fn format_jobs(jobs: &[&Record]) -> String {
    if jobs.is_empty() {
        return format!("{NO_RESULTS}\n");
    }

    let mut out = String::new();
    for job in jobs {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "\n{DELIMITER}\n{job}\n{DELIMITER}");
    }
    out
}
