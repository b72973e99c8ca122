//! Journal author blocks
//!
//! Formatters turn a resolved author list into the LaTeX a journal template
//! expects. They share institute numbering and the rule for how a name is
//! displayed.

pub mod aanda;
pub mod mnras;

use authors_domain::{Affiliation, AuthorRecord};
use indexmap::IndexMap;

use crate::text::{non_breaking, to_initials_last};

pub use aanda::AandAOptions;
pub use mnras::MnrasOptions;

/// Document-wide institute numbering.
///
/// Institutes are numbered from 1 in the order they are first seen. An
/// institute keeps the label it was first seen with.
#[derive(Debug, Clone, Default)]
pub struct InstituteTable {
    entries: IndexMap<String, Option<String>>,
}

impl InstituteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `affiliation`, registering it if new
    pub fn number(&mut self, affiliation: &Affiliation) -> usize {
        let entry = self.entries.entry(affiliation.name().to_string());
        let index = entry.index();
        entry.or_insert_with(|| affiliation.label().map(String::from));
        index + 1
    }

    /// Label an institute is referenced by, if it has one
    pub fn label(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|label| label.as_deref())
    }

    /// `(number, name, label)` in numbering order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, Option<&str>)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (name, label))| (i + 1, name.as_str(), label.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Name as printed: the spelling override, else initials + last name when
/// `force_initials`, else the registered name. Spaces become `~`.
pub fn display_name(name: &str, record: &AuthorRecord, force_initials: bool) -> String {
    let shown = match &record.spelling {
        Some(spelling) => spelling.clone(),
        None if force_initials => to_initials_last(name),
        None => name.to_string(),
    };
    non_breaking(&shown)
}
