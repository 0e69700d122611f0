//! `techjobs all` command implementation.

use techjobs::JobStore;

use super::display;

/// Run the all command.
pub fn run(store: &JobStore, json: bool) -> Result<(), techjobs::Error> {
    let jobs: Vec<_> = store.find_all()?.iter().collect();
    display::print_jobs(&jobs, json)
}
