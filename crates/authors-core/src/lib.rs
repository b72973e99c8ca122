//! authors-core: author registry and author-block rendering for papers
//!
//! This library provides:
//! - Name canonicalization (initials, last names, accents, TeX escapes)
//! - Fuzzy matching (Levenshtein distance, bitap approximate search)
//! - Resolution of free-form author names against the registry
//! - YAML registry persistence and a registry health check
//! - A&A and MNRAS LaTeX author/institute blocks

pub mod config;
pub mod error;
pub mod health;
pub mod index;
pub mod journals;
pub mod matching;
pub mod resolver;
pub mod store;
pub mod text;

// Re-export main types for convenience
pub use authors_domain::{Affiliation, AuthorRecord, Registry, RegistryError, UpdateStrategy};
pub use config::AuthorsConfig;
pub use error::{AuthorsError, Result};
pub use health::{health_check, merge_similar_affiliations, HealthReport, MergeChoice, SimilarAffiliations};
pub use index::{AuthorMatch, NameIndex};
pub use journals::{AandAOptions, InstituteTable, MnrasOptions};
pub use resolver::{acknowledgements, AuthorList, AuthorSource, Authors, OrderingPolicy, ResolvedAuthor};
pub use store::RegistryStore;
