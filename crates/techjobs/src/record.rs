//! Row representation for a loaded dataset.
//!
//! A [`Header`] is built once per load and shared by every [`Record`] through
//! an `Arc`, so all records of a dataset have the identical key set by
//! construction. Field lookup is an exact, case-sensitive match on the
//! column name; value matching is case-folded.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, LoadError, Result};

/// Ordered column names of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Header {
    /// Build a header from column names in source order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingHeader`] if `names` is empty and
    /// [`LoadError::DuplicateColumn`] if a name repeats.
    pub fn new<I, S>(names: I) -> std::result::Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(LoadError::MissingHeader);
        }

        let mut positions = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            if positions.insert(name.clone(), idx).is_some() {
                return Err(LoadError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self { names, positions })
    }

    /// Position of `field` in the header, if present.
    #[must_use]
    pub fn position(&self, field: &str) -> Option<usize> {
        self.positions.get(field).copied()
    }

    /// Returns `true` if `field` is a column of this header.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.positions.contains_key(field)
    }

    /// Column names in source order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the header has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve `field` to its position or fail with `FieldNotFound`.
    pub(crate) fn require(&self, field: &str) -> Result<usize> {
        self.position(field).ok_or_else(|| Error::field_not_found(field))
    }
}

/// One row of the dataset as an immutable field-name to value mapping.
///
/// Values are stored as strings exactly as they appeared in the source; no
/// type coercion is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    header: Arc<Header>,
    values: Box<[String]>,
}

impl Record {
    /// Pair a header-aligned row with its header.
    ///
    /// The caller guarantees `values.len() == header.len()`; the loader checks
    /// row length before constructing records.
    pub(crate) fn new(header: Arc<Header>, values: Vec<String>) -> Self {
        debug_assert_eq!(header.len(), values.len());
        Self {
            header,
            values: values.into_boxed_slice(),
        }
    }

    /// Value stored under `field`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldNotFound`] if `field` is not a column of this record.
    pub fn get(&self, field: &str) -> Result<&str> {
        let idx = self.header.require(field)?;
        Ok(&self.values[idx])
    }

    /// Field names in header order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        self.header.names()
    }

    /// Values in header order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// `(field, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .names()
            .iter()
            .zip(self.values.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if any value contains `folded_term` case-insensitively.
    ///
    /// `folded_term` must already be lowercased.
    pub(crate) fn any_value_contains(&self, folded_term: &str) -> bool {
        self.values.iter().any(|v| fold_contains(v, folded_term))
    }

    /// Returns `true` if the value at `idx` contains `folded_term` case-insensitively.
    pub(crate) fn value_contains_at(&self, idx: usize, folded_term: &str) -> bool {
        fold_contains(&self.values[idx], folded_term)
    }

    /// Case-insensitive substring test against any field.
    #[must_use]
    pub fn contains_folded(&self, term: &str) -> bool {
        self.any_value_contains(&term.to_lowercase())
    }

    /// Case-insensitive substring test against one field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldNotFound`] if `field` is not a column of this record.
    pub fn field_contains_folded(&self, field: &str, term: &str) -> Result<bool> {
        let idx = self.header.require(field)?;
        Ok(self.value_contains_at(idx, &term.to_lowercase()))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (field, value)) in self.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}: {value}")?;
        }
        Ok(())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Case-insensitive containment: lowercase `value`, then look for `folded_term`.
fn fold_contains(value: &str, folded_term: &str) -> bool {
    folded_term.is_empty() || value.to_lowercase().contains(folded_term)
}
