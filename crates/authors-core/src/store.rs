//! YAML registry file
//!
//! The registry lives in a single YAML document mapping full names to
//! records:
//!
//! ```yaml
//! João P. Faria:
//!   affiliations:
//!   - Instituto de Astrofísica e Ciências do Espaço, Universidade do Porto
//!   - Observatoire de Genève: {label: geneva}
//!   email: joao.faria@astro.up.pt
//!   orcid: 0000-0002-6728-244X
//! ```
//!
//! Every write rewrites the whole file through a temporary file in the same
//! directory, so a crash never leaves a truncated registry behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use authors_domain::{Affiliation, AuthorRecord, Registry};
use tempfile::NamedTempFile;

use crate::error::{AuthorsError, Result};
use crate::text::deescape_tex;

/// Handle on the registry file
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole registry. A missing or blank file is an empty registry.
    pub fn load(&self) -> Result<Registry> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "registry file not found, starting empty");
            return Ok(Registry::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Registry::new());
        }
        let registry: Registry = serde_yaml::from_str(&contents)?;
        tracing::debug!(path = %self.path.display(), authors = registry.len(), "loaded registry");
        Ok(registry)
    }

    /// Replace the registry file with `registry`.
    ///
    /// An empty registry is refused and the file is left as it was.
    pub fn save(&self, registry: &Registry) -> Result<()> {
        if registry.is_empty() {
            return Err(AuthorsError::RegistryEmpty(self.path.clone()));
        }
        let yaml = serde_yaml::to_string(registry)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(yaml.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        tracing::info!(path = %self.path.display(), authors = registry.len(), "wrote registry");
        Ok(())
    }

    /// Load, apply `mutate`, and save.
    ///
    /// Nothing is written when `mutate` fails.
    pub fn update<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Registry) -> Result<T>,
    {
        let mut registry = self.load()?;
        let out = mutate(&mut registry)?;
        self.save(&registry)?;
        Ok(out)
    }

    /// Add a new author to the registry file.
    ///
    /// The name and affiliations may contain TeX escapes, which are converted
    /// before storing. `labels`, when given, pairs positionally with
    /// `affiliations`.
    pub fn register_author(
        &self,
        full_name: &str,
        affiliations: &[String],
        email: Option<&str>,
        orcid: Option<&str>,
        labels: Option<&[String]>,
    ) -> Result<()> {
        let record = new_author_record(affiliations, email, orcid, labels)?;
        let name = deescape_tex(full_name.trim());
        if name.is_empty() {
            return Err(AuthorsError::InvalidInput("author name should not be empty".to_string()));
        }
        self.update(|registry| Ok(registry.register(name, record)?))
    }
}

/// Build a record from command-line style arguments
pub fn new_author_record(
    affiliations: &[String],
    email: Option<&str>,
    orcid: Option<&str>,
    labels: Option<&[String]>,
) -> Result<AuthorRecord> {
    if let Some(labels) = labels {
        if labels.len() != affiliations.len() {
            return Err(AuthorsError::InvalidInput(format!(
                "got {} labels for {} affiliations",
                labels.len(),
                affiliations.len()
            )));
        }
    }

    let affiliations = affiliations
        .iter()
        .enumerate()
        .map(|(i, aff)| {
            let name = deescape_tex(aff.trim());
            match labels.map(|labels| labels[i].as_str()) {
                Some(label) if !label.is_empty() => Affiliation::labeled(name, label),
                _ => Affiliation::plain(name),
            }
        })
        .collect();

    let mut record = AuthorRecord::new(affiliations);
    record.email = email.map(String::from);
    record.orcid = orcid.map(String::from);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_author_record_with_labels() {
        let record = new_author_record(
            &["Observatoire de Gen\\`eve".to_string(), "CAUP".to_string()],
            Some("a@b.c"),
            None,
            Some(&["geneva".to_string(), String::new()]),
        )
        .unwrap();
        assert_eq!(
            record.affiliations,
            vec![
                Affiliation::labeled("Observatoire de Genève", "geneva"),
                Affiliation::plain("CAUP"),
            ]
        );
        assert_eq!(record.email.as_deref(), Some("a@b.c"));
        assert!(record.orcid.is_none());
    }

    #[test]
    fn test_new_author_record_label_mismatch() {
        let result = new_author_record(
            &["CAUP".to_string(), "ESO".to_string()],
            None,
            None,
            Some(&["caup".to_string()]),
        );
        assert!(matches!(result, Err(AuthorsError::InvalidInput(_))));
    }
}
