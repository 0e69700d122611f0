//! Techjobs - an in-memory query layer over a CSV table of job listings.
//!
//! The dataset is loaded once, lazily, from a delimited text source and then
//! answers three kinds of read-only queries:
//!
//! - distinct values of one field ([`JobStore::find_all_values`])
//! - rows whose given field contains a term ([`JobStore::find_by_column_and_value`])
//! - rows where any field contains a term ([`JobStore::find_by_value`])
//!
//! Value matching ignores case; field names must match the header exactly.
//!
//! # Example
//!
//! ```
//! use techjobs::{DataSource, JobStore};
//!
//! let store = JobStore::new(DataSource::inline(
//!     "employer,title\nAcme Inc,Engineer\nEnterprise Holdings,Manager\n",
//! ));
//!
//! let hits = store.find_by_value("ACME")?;
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].get("title")?, "Engineer");
//! # Ok::<(), techjobs::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod record;
pub mod source;
pub mod store;

pub use config::Config;
pub use error::{Error, LoadError, Result};
pub use record::{Header, Record};
pub use source::{DataSource, Dataset, TableSource};
pub use store::JobStore;
