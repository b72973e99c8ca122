//! Domain types for the authors registry
//!
//! This crate provides the data model shared by the resolution engine and
//! the journal formatters:
//! - AuthorRecord: one registered author (contact details, affiliations)
//! - Affiliation: an institution, optionally carrying a LaTeX label
//! - Registry: the insertion-ordered set of all known authors

pub mod affiliation;
pub mod error;
pub mod record;
pub mod registry;

pub use affiliation::*;
pub use error::*;
pub use record::*;
pub use registry::*;
