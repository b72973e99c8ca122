//! Known-author index
//!
//! A read-only view over a [`Registry`] that answers "is this name known, and
//! which record is it". Academic names come in many spellings (initials or
//! full first names, with or without accents, married names kept as
//! nicknames), so several cheap comparisons are tried from strict to loose.
//! The first record that matches wins; collisions between records are not
//! reported.

use authors_domain::{AuthorRecord, Registry};

use crate::error::{AuthorsError, Result};
use crate::text::latex::{deescape_tex, has_unconverted_escape};
use crate::text::names::{
    casefold, extract_last_name, is_initials_form, strip_accents, to_first_last, to_initials_last,
};

/// A registry record a name resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorMatch {
    /// Full name as registered
    pub name: String,
    pub record: AuthorRecord,
}

/// Comparison keys for one registered author, all casefolded unless noted
#[derive(Debug, Clone)]
struct IndexedName {
    full: String,
    full_stripped: String,
    last: String,
    last_stripped: String,
    /// Registered last name with TeX escapes converted, case kept
    last_deescaped: String,
    /// `j. p. faria`
    initials_last: String,
    /// `j. faria`
    initials_short: String,
    first_last: String,
    nicknames: Vec<String>,
    nickname_field: Option<String>,
}

impl IndexedName {
    fn new(name: &str, record: &AuthorRecord) -> Self {
        let full = casefold(name);
        let last_raw = extract_last_name(name);
        let last = casefold(&last_raw);
        Self {
            full_stripped: strip_accents(&full),
            last_stripped: strip_accents(&last),
            last_deescaped: deescape_tex(&last_raw),
            initials_last: to_initials_last(&full),
            initials_short: to_initials_last(&to_first_last(&full)),
            first_last: to_first_last(&full),
            nicknames: record.nicknames().into_iter().map(casefold).collect(),
            nickname_field: record.nickname.as_deref().map(casefold),
            full,
            last,
        }
    }

    fn initials_match(&self, initials: &str) -> bool {
        self.initials_last == initials || self.initials_short == initials
    }

    fn initials_match_stripped(&self, initials: &str) -> bool {
        strip_accents(&self.initials_last) == initials || strip_accents(&self.initials_short) == initials
    }
}

/// Comparison keys for a queried name
struct Query {
    folded: String,
    stripped: String,
    last: String,
    last_stripped: String,
    initials: String,
    initials_stripped: String,
    initials_form: bool,
    first_last: String,
}

impl Query {
    fn new(raw: &str) -> Self {
        let folded = casefold(&normalize_query(raw));
        let last = extract_last_name(&folded);
        let initials = to_initials_last(&folded);
        Self {
            stripped: strip_accents(&folded),
            last_stripped: strip_accents(&last),
            initials_stripped: strip_accents(&initials),
            initials_form: is_initials_form(&folded),
            first_last: to_first_last(&folded),
            initials,
            last,
            folded,
        }
    }
}

/// Trim and convert TeX escapes in a queried name
fn normalize_query(raw: &str) -> String {
    let trimmed = raw.trim();
    if has_unconverted_escape(trimmed) {
        deescape_tex(trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Index over every registered author, rebuilt whenever the registry loads
#[derive(Debug, Clone)]
pub struct NameIndex {
    registry: Registry,
    entries: Vec<IndexedName>,
}

impl NameIndex {
    pub fn new(registry: Registry) -> Self {
        let entries = registry
            .iter()
            .map(|(name, record)| IndexedName::new(name, record))
            .collect();
        Self { registry, entries }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `raw` names a known author.
    ///
    /// Tried in order: full or last name; nickname; accent-stripped full or
    /// last name; initials + last name (only for names written with
    /// initials); the same on accent-stripped forms; first + last name.
    pub fn contains(&self, raw: &str) -> bool {
        let q = Query::new(raw);
        if q.folded.is_empty() {
            return false;
        }

        self.entries.iter().any(|e| e.full == q.folded || e.last == q.folded)
            || self.entries.iter().any(|e| e.nicknames.contains(&q.folded))
            || self
                .entries
                .iter()
                .any(|e| e.full_stripped == q.stripped || e.last_stripped == q.stripped)
            || (q.initials_form
                && self
                    .entries
                    .iter()
                    .any(|e| e.last == q.last && e.initials_match(&q.initials)))
            || (q.initials_form
                && self.entries.iter().any(|e| {
                    e.last_stripped == q.last_stripped && e.initials_match_stripped(&q.initials_stripped)
                }))
            || self.entries.iter().any(|e| e.first_last == q.first_last)
    }

    /// Find the record `raw` refers to.
    ///
    /// An exact full-name match wins; otherwise the first record, in registry
    /// order, whose last name equals the queried last name (ignoring case),
    /// whose de-escaped last name equals it exactly, whose nickname contains
    /// it, or whose accent-stripped last name contains it.
    pub fn resolve(&self, raw: &str) -> Result<AuthorMatch> {
        let query = normalize_query(raw);
        if query.is_empty() {
            return Err(AuthorsError::NotFound(raw.to_string()));
        }

        if let Some((name, record)) = self.registry.get_full(&query) {
            return Ok(AuthorMatch {
                name: name.to_string(),
                record: record.clone(),
            });
        }

        let last = extract_last_name(&query);
        let last_folded = casefold(&last);
        if last_folded.is_empty() {
            return Err(AuthorsError::NotFound(raw.to_string()));
        }
        let last_stripped = strip_accents(&last_folded);

        self.registry
            .iter()
            .zip(&self.entries)
            .find(|(_, e)| {
                e.last == last_folded
                    || e.last_deescaped == last
                    || e
                        .nickname_field
                        .as_deref()
                        .is_some_and(|nick| nick.contains(&last_folded))
                    || e.last_stripped.contains(&last_stripped)
            })
            .map(|((name, record), _)| AuthorMatch {
                name: name.to_string(),
                record: record.clone(),
            })
            .ok_or_else(|| AuthorsError::NotFound(raw.to_string()))
    }
}
