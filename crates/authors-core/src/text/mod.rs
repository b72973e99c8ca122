//! Text processing for author names
//!
//! - Name canonicalization (last name, initials, bracket overrides)
//! - Accent stripping
//! - TeX escaping and de-escaping

pub mod latex;
pub mod names;

pub use latex::{deescape_tex, escape_tex, has_unconverted_escape};
pub use names::{
    casefold, extract_last_name, non_breaking, strip_accents, to_first_last, to_initials_last,
    to_initials_list,
};
