//! Author list resolution
//!
//! Turns the ordered author list of a paper into [`ResolvedAuthor`]s:
//! every raw name is looked up in the [`NameIndex`] and the list is ordered
//! according to an [`OrderingPolicy`]. Unknown names are kept, so the output
//! always has one entry per input name.

use std::fs;
use std::ops::Range;
use std::path::Path;

use authors_domain::Registry;
use indexmap::IndexSet;

use crate::error::{AuthorsError, Result};
use crate::index::{AuthorMatch, NameIndex};
use crate::text::names::{casefold, extract_last_name};

/// How the author list is ordered before rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OrderingPolicy {
    /// Keep the input order
    #[default]
    AsGiven,
    /// Keep the first `k` authors, sort the rest by last name
    AlphabeticalAfter(usize),
    /// Sort by last name within each group delimited by these indices.
    ///
    /// `[5, 10]`: authors 1-5 as given, 6-10 sorted, 11 onwards sorted.
    AlphabeticalGroups(Vec<usize>),
}

/// One entry of a resolved author list
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAuthor {
    /// The name as written in the author list
    pub raw: String,
    /// The registry record, or `None` for an unknown author
    pub matched: Option<AuthorMatch>,
}

impl ResolvedAuthor {
    pub fn is_known(&self) -> bool {
        self.matched.is_some()
    }
}

/// The ordered author names of one paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorList {
    names: Vec<String>,
}

impl AuthorList {
    /// Load from a file with one name per line, or from a newline-separated
    /// string when `source` is not an existing file.
    pub fn from_source(source: &str) -> Result<Self> {
        if source.is_empty() {
            return Err(AuthorsError::InvalidInput(
                "author list source should not be empty".to_string(),
            ));
        }
        let path = Path::new(source);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "reading author list");
            Self::parse(&fs::read_to_string(path)?)
        } else {
            Self::parse(source)
        }
    }

    /// Parse newline-separated names; blank lines are skipped
    pub fn parse(text: &str) -> Result<Self> {
        let names: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        if names.is_empty() {
            return Err(AuthorsError::InvalidInput(
                "author list contains no names".to_string(),
            ));
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn first_author(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}

/// Positions of `names` in the order `policy` asks for
fn ordered_indices(names: &[String], policy: &OrderingPolicy) -> Vec<usize> {
    let n = names.len();
    let keys: Vec<String> = names
        .iter()
        .map(|name| casefold(&extract_last_name(name)))
        .collect();
    let sorted = |range: Range<usize>| {
        let mut indices: Vec<usize> = range.collect();
        indices.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
        indices
    };

    match policy {
        OrderingPolicy::AsGiven => (0..n).collect(),
        OrderingPolicy::AlphabeticalAfter(k) => {
            let k = (*k).min(n);
            (0..k).chain(sorted(k..n)).collect()
        }
        OrderingPolicy::AlphabeticalGroups(boundaries) => {
            let mut bounds: Vec<usize> = boundaries.iter().map(|&b| b.min(n)).collect();
            bounds.sort_unstable();
            bounds.push(n);
            bounds.dedup();

            let mut order: Vec<usize> = (0..bounds[0]).collect();
            for window in bounds.windows(2) {
                order.extend(sorted(window[0]..window[1]));
            }
            order
        }
    }
}

fn resolve_one(index: &NameIndex, raw: &str) -> ResolvedAuthor {
    let matched = if index.contains(raw) {
        match index.resolve(raw) {
            Ok(found) => Some(found),
            Err(err) => {
                tracing::warn!(author = raw, %err, "known author could not be resolved");
                None
            }
        }
    } else {
        None
    };
    ResolvedAuthor {
        raw: raw.to_string(),
        matched,
    }
}

/// Order `names` by `policy` and resolve each one against `index`.
///
/// Never fails: unknown names come back with `matched = None`.
pub fn resolve_list(index: &NameIndex, names: &[String], policy: &OrderingPolicy) -> Vec<ResolvedAuthor> {
    ordered_indices(names, policy)
        .into_iter()
        .map(|i| resolve_one(index, &names[i]))
        .collect()
}

/// Distinct acknowledgement texts of the known authors, in list order
pub fn acknowledgements(resolved: &[ResolvedAuthor]) -> Vec<String> {
    let unique: IndexSet<&str> = resolved
        .iter()
        .filter_map(|author| author.matched.as_ref())
        .filter_map(|found| found.record.acknowledgements.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect();
    unique.into_iter().map(String::from).collect()
}

/// What the journal formatters need from an author list
pub trait AuthorSource {
    /// The authors in rendering order
    fn resolve_list(&self, policy: &OrderingPolicy) -> Vec<ResolvedAuthor>;

    /// Look up a single author
    fn query_author(&self, name: &str) -> Result<AuthorMatch>;
}

/// The authors of one paper, resolved against a registry snapshot
#[derive(Debug, Clone)]
pub struct Authors {
    index: NameIndex,
    list: AuthorList,
}

impl Authors {
    pub fn new(index: NameIndex, list: AuthorList) -> Self {
        Self { index, list }
    }

    /// Index `registry` and load the author list from `source`
    pub fn from_registry(registry: Registry, source: &str) -> Result<Self> {
        let list = AuthorList::from_source(source)?;
        Ok(Self::new(NameIndex::new(registry), list))
    }

    pub fn list(&self) -> &AuthorList {
        &self.list
    }

    pub fn index(&self) -> &NameIndex {
        &self.index
    }

    /// Whether each listed name, in input order, is a known author
    pub fn known(&self) -> Vec<bool> {
        self.list.names().iter().map(|name| self.index.contains(name)).collect()
    }
}

impl AuthorSource for Authors {
    fn resolve_list(&self, policy: &OrderingPolicy) -> Vec<ResolvedAuthor> {
        resolve_list(&self.index, self.list.names(), policy)
    }

    fn query_author(&self, name: &str) -> Result<AuthorMatch> {
        self.index.resolve(name)
    }
}
