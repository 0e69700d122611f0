//! CLI command implementations.

mod display;

pub mod all;
pub mod list;
pub mod search;
