//! Author record representation

use serde::{Deserialize, Serialize};

use crate::Affiliation;

/// Everything the registry knows about one author.
///
/// The author's full name is not stored here: it is the key under which the
/// record lives in the [`Registry`](crate::Registry).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledgements: Option<String>,

    /// Ordered; the order drives institute numbering in rendered output
    #[serde(default)]
    pub affiliations: Vec<Affiliation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Alternative names the author is known by, comma or semicolon separated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,

    /// Exact rendering of the name, used verbatim instead of the initials form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spelling: Option<String>,
}

impl AuthorRecord {
    /// Create a record with the given affiliations and nothing else
    pub fn new(affiliations: Vec<Affiliation>) -> Self {
        Self {
            affiliations,
            ..Self::default()
        }
    }

    /// Builder method to add an email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder method to add an ORCID
    pub fn with_orcid(mut self, orcid: impl Into<String>) -> Self {
        self.orcid = Some(orcid.into());
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_spelling(mut self, spelling: impl Into<String>) -> Self {
        self.spelling = Some(spelling.into());
        self
    }

    pub fn with_acknowledgements(mut self, text: impl Into<String>) -> Self {
        self.acknowledgements = Some(text.into());
        self
    }

    /// Individual nicknames, trimmed, empty entries dropped
    pub fn nicknames(&self) -> Vec<&str> {
        self.nickname
            .as_deref()
            .map(|field| {
                field
                    .split([',', ';'])
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the record lists an affiliation with this institution string
    pub fn has_affiliation(&self, name: &str) -> bool {
        self.affiliations.iter().any(|a| a.name() == name)
    }
}
