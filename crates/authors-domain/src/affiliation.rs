//! Affiliation representation
//!
//! In the registry file an affiliation is either a bare string or a
//! single-key map carrying a LaTeX cross-reference label:
//!
//! ```yaml
//! affiliations:
//! - Instituto de Astrofísica e Ciências do Espaço, Universidade do Porto
//! - Observatoire de Genève: {label: geneva}
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::RegistryError;

/// An institution an author belongs to
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAffiliation", into = "RawAffiliation")]
pub enum Affiliation {
    Plain(String),
    Labeled { name: String, label: String },
}

impl Affiliation {
    pub fn plain(name: impl Into<String>) -> Self {
        Affiliation::Plain(name.into())
    }

    pub fn labeled(name: impl Into<String>, label: impl Into<String>) -> Self {
        Affiliation::Labeled {
            name: name.into(),
            label: label.into(),
        }
    }

    /// The institution string, without its label
    pub fn name(&self) -> &str {
        match self {
            Affiliation::Plain(name) => name,
            Affiliation::Labeled { name, .. } => name,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Affiliation::Plain(_) => None,
            Affiliation::Labeled { label, .. } => Some(label),
        }
    }

    /// Same affiliation with a different institution string, label kept
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        match self {
            Affiliation::Plain(_) => Affiliation::Plain(name.into()),
            Affiliation::Labeled { label, .. } => Affiliation::Labeled {
                name: name.into(),
                label: label.clone(),
            },
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawAffiliation {
    Plain(String),
    Labeled(IndexMap<String, LabelSpec>),
}

#[derive(Serialize, Deserialize)]
struct LabelSpec {
    label: String,
}

impl TryFrom<RawAffiliation> for Affiliation {
    type Error = RegistryError;

    fn try_from(raw: RawAffiliation) -> Result<Self, Self::Error> {
        match raw {
            RawAffiliation::Plain(name) => Ok(Affiliation::Plain(name)),
            RawAffiliation::Labeled(map) => {
                if map.len() != 1 {
                    return Err(RegistryError::InvalidAffiliation(format!(
                        "expected a single institution per labeled entry, found {}",
                        map.len()
                    )));
                }
                let (name, spec) = map
                    .into_iter()
                    .next()
                    .ok_or_else(|| RegistryError::InvalidAffiliation("empty entry".into()))?;
                Ok(Affiliation::Labeled {
                    name,
                    label: spec.label,
                })
            }
        }
    }
}

impl From<Affiliation> for RawAffiliation {
    fn from(affiliation: Affiliation) -> Self {
        match affiliation {
            Affiliation::Plain(name) => RawAffiliation::Plain(name),
            Affiliation::Labeled { name, label } => {
                let mut map = IndexMap::new();
                map.insert(name, LabelSpec { label });
                RawAffiliation::Labeled(map)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_label() {
        let plain = Affiliation::plain("CAUP");
        assert_eq!(plain.name(), "CAUP");
        assert_eq!(plain.label(), None);

        let labeled = Affiliation::labeled("Observatoire de Genève", "geneva");
        assert_eq!(labeled.name(), "Observatoire de Genève");
        assert_eq!(labeled.label(), Some("geneva"));
    }

    #[test]
    fn test_with_name_keeps_label() {
        let labeled = Affiliation::labeled("Obs. de Genève", "geneva");
        assert_eq!(
            labeled.with_name("Observatoire de Genève"),
            Affiliation::labeled("Observatoire de Genève", "geneva")
        );
    }

    #[test]
    fn test_yaml_forms() {
        let yaml = "- CAUP\n- Observatoire de Genève:\n    label: geneva\n";
        let parsed: Vec<Affiliation> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            vec![
                Affiliation::plain("CAUP"),
                Affiliation::labeled("Observatoire de Genève", "geneva"),
            ]
        );

        let written = serde_yaml::to_string(&parsed).unwrap();
        let reparsed: Vec<Affiliation> = serde_yaml::from_str(&written).unwrap();
        assert_eq!(reparsed, parsed);
    }

    #[test]
    fn test_multi_key_entry_rejected() {
        let yaml = "A: {label: a}\nB: {label: b}\n";
        let parsed: Result<Affiliation, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }
}
