//! `techjobs search` command implementation.

use colored::Colorize;
use techjobs::JobStore;

use super::display;

/// Run the search command.
///
/// With a column the term is matched against that field only; without one,
/// against every field.
pub fn run(
    store: &JobStore,
    term: &str,
    column: Option<&str>,
    json: bool,
) -> Result<(), techjobs::Error> {
    let jobs = match column {
        Some(column) => store.find_by_column_and_value(column, term)?,
        None => store.find_by_value(term)?,
    };

    if !json {
        let scope = column.unwrap_or("all fields");
        println!(
            "Found {} jobs matching \"{}\" in {}:",
            jobs.len().to_string().green().bold(),
            term.cyan(),
            scope
        );
    }

    display::print_jobs(&jobs, json)
}
