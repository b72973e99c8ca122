//! The registry of known authors
//!
//! An insertion-ordered map from full name to [`AuthorRecord`]. All mutations
//! here are in-memory; persisting them is the store's job.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{Affiliation, AuthorRecord, RegistryError};

/// How new affiliations combine with the ones an author already has
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// New affiliations first, then the existing ones, duplicates dropped
    #[default]
    Merge,
    /// Existing affiliations discarded
    Replace,
}

/// All known authors, keyed by full name
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    authors: IndexMap<String, AuthorRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&AuthorRecord> {
        self.authors.get(name)
    }

    pub fn get_full(&self, name: &str) -> Option<(&str, &AuthorRecord)> {
        self.authors
            .get_key_value(name)
            .map(|(key, record)| (key.as_str(), record))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.authors.contains_key(name)
    }

    /// Iterate in registry order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AuthorRecord)> {
        self.authors.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.authors.keys().map(String::as_str)
    }

    /// Add a new author at the end of the registry
    pub fn register(
        &mut self,
        name: impl Into<String>,
        record: AuthorRecord,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.authors.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }
        self.authors.insert(name, record);
        Ok(())
    }

    /// Remove an author, keeping the order of the others
    pub fn delete(&mut self, name: &str) -> Result<AuthorRecord, RegistryError> {
        self.authors
            .shift_remove(name)
            .ok_or_else(|| RegistryError::AuthorNotFound(name.to_string()))
    }

    /// Change an author's full name; the record keeps its position
    pub fn rename(&mut self, old_name: &str, new_name: impl Into<String>) -> Result<(), RegistryError> {
        let new_name = new_name.into();
        if old_name == new_name {
            return if self.contains(old_name) {
                Ok(())
            } else {
                Err(RegistryError::AuthorNotFound(old_name.to_string()))
            };
        }
        if self.authors.contains_key(&new_name) {
            return Err(RegistryError::AlreadyRegistered(new_name));
        }
        let (index, _, record) = self
            .authors
            .shift_remove_full(old_name)
            .ok_or_else(|| RegistryError::AuthorNotFound(old_name.to_string()))?;
        self.authors.shift_insert(index, new_name, record);
        Ok(())
    }

    fn record_mut(&mut self, name: &str) -> Result<&mut AuthorRecord, RegistryError> {
        self.authors
            .get_mut(name)
            .ok_or_else(|| RegistryError::AuthorNotFound(name.to_string()))
    }

    pub fn set_email(&mut self, name: &str, email: impl Into<String>) -> Result<(), RegistryError> {
        self.record_mut(name)?.email = Some(email.into());
        Ok(())
    }

    pub fn set_orcid(&mut self, name: &str, orcid: impl Into<String>) -> Result<(), RegistryError> {
        self.record_mut(name)?.orcid = Some(orcid.into());
        Ok(())
    }

    pub fn set_nickname(&mut self, name: &str, nickname: impl Into<String>) -> Result<(), RegistryError> {
        self.record_mut(name)?.nickname = Some(nickname.into());
        Ok(())
    }

    pub fn set_spelling(&mut self, name: &str, spelling: impl Into<String>) -> Result<(), RegistryError> {
        self.record_mut(name)?.spelling = Some(spelling.into());
        Ok(())
    }

    pub fn set_acknowledgements(
        &mut self,
        name: &str,
        text: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.record_mut(name)?.acknowledgements = Some(text.into());
        Ok(())
    }

    /// Update an author's affiliations.
    ///
    /// With [`UpdateStrategy::Merge`] the new affiliations go first and an
    /// existing entry naming the same institution is dropped.
    pub fn update_affiliations(
        &mut self,
        name: &str,
        affiliations: Vec<Affiliation>,
        strategy: UpdateStrategy,
    ) -> Result<(), RegistryError> {
        let record = self.record_mut(name)?;
        let combined = match strategy {
            UpdateStrategy::Replace => affiliations,
            UpdateStrategy::Merge => {
                let mut combined = affiliations;
                combined.append(&mut record.affiliations);
                combined
            }
        };
        record.affiliations = dedup_by_name(combined);
        Ok(())
    }

    /// Replace `old` with `new` inside every affiliation string.
    ///
    /// Returns the number of records that changed. If a record ends up with
    /// the same institution twice, only the first occurrence is kept.
    pub fn change_affiliation(&mut self, old: &str, new: &str) -> usize {
        if old.is_empty() || old == new {
            return 0;
        }
        let mut changed = 0;
        for record in self.authors.values_mut() {
            if !record.affiliations.iter().any(|a| a.name().contains(old)) {
                continue;
            }
            let replaced = record
                .affiliations
                .iter()
                .map(|a| a.with_name(a.name().replace(old, new)))
                .collect();
            record.affiliations = dedup_by_name(replaced);
            changed += 1;
        }
        changed
    }

    /// Swap every affiliation named exactly `old` for `new`, keeping its label.
    ///
    /// Returns the number of records that changed.
    pub fn replace_affiliation(&mut self, old: &str, new: &str) -> usize {
        if old == new {
            return 0;
        }
        let mut changed = 0;
        for record in self.authors.values_mut() {
            if !record.has_affiliation(old) {
                continue;
            }
            let replaced = record
                .affiliations
                .iter()
                .map(|a| if a.name() == old { a.with_name(new) } else { a.clone() })
                .collect();
            record.affiliations = dedup_by_name(replaced);
            changed += 1;
        }
        changed
    }

    /// Attach `label` to every occurrence of the institution `affiliation`.
    ///
    /// Returns the number of records that changed.
    pub fn set_affiliation_label(&mut self, affiliation: &str, label: &str) -> usize {
        let mut changed = 0;
        for record in self.authors.values_mut() {
            if !record.has_affiliation(affiliation) {
                continue;
            }
            for entry in record.affiliations.iter_mut() {
                if entry.name() == affiliation {
                    *entry = Affiliation::labeled(affiliation, label);
                }
            }
            changed += 1;
        }
        changed
    }

    /// Every distinct institution string, in first-seen order
    pub fn all_affiliations(&self) -> Vec<&str> {
        let unique: IndexSet<&str> = self
            .authors
            .values()
            .flat_map(|record| record.affiliations.iter().map(Affiliation::name))
            .collect();
        unique.into_iter().collect()
    }
}

impl FromIterator<(String, AuthorRecord)> for Registry {
    fn from_iter<T: IntoIterator<Item = (String, AuthorRecord)>>(iter: T) -> Self {
        Self {
            authors: iter.into_iter().collect(),
        }
    }
}

fn dedup_by_name(affiliations: Vec<Affiliation>) -> Vec<Affiliation> {
    let mut seen = IndexSet::new();
    affiliations
        .into_iter()
        .filter(|a| seen.insert(a.name().to_string()))
        .collect()
}
