//! Selector maps
//!
//! A selector map binds the logical field names of one page variant to
//! ordered lists of fallback expressions. Maps are built once at page
//! construction and never change; resolution order is exactly declaration
//! order.

use crate::driver::Selector;
use crate::{Error, Result};
use std::collections::HashMap;

/// One logical field with its fallback expressions, in declared order
#[derive(Debug, Clone, Copy)]
pub struct FieldEntry<'a> {
    /// Logical field name (e.g. "usernameInput")
    pub field: &'a str,
    /// Fallback expressions, tried first to last
    pub selectors: &'a [Selector],
}

/// Named, ordered collection of selector fallback lists
#[derive(Debug, Clone, Default)]
pub struct SelectorMap {
    entries: HashMap<&'static str, Vec<Selector>>,
}

impl SelectorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a logical field to its fallback expressions
    pub fn insert(&mut self, field: &'static str, selectors: Vec<Selector>) {
        self.entries.insert(field, selectors);
    }

    /// Look up a field; unknown names are an error, not an empty list
    pub fn get(&self, field: &str) -> Result<FieldEntry<'_>> {
        match self.entries.get_key_value(field) {
            Some((name, selectors)) => Ok(FieldEntry {
                field: name,
                selectors,
            }),
            None => Err(Error::UnknownField(field.to_string())),
        }
    }

    /// Look up the error-display entry for a field ("username" -> "usernameError")
    pub fn error_entry(&self, field: &str) -> Result<FieldEntry<'_>> {
        self.get(&format!("{}Error", field))
    }

    /// Whether a field is declared
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }
}
