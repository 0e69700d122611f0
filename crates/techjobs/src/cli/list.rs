//! `techjobs list` command implementation.

use colored::Colorize;
use techjobs::JobStore;

/// Run the list command.
pub fn run(store: &JobStore, field: &str, json: bool) -> Result<(), techjobs::Error> {
    let values = store.find_all_values(field)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    println!("\n*** All {} Values ***", field.cyan().bold());
    for value in &values {
        println!("{value}");
    }

    Ok(())
}
