//! Name canonicalization
//!
//! Reduces a raw author name to the forms the index compares: last name,
//! initials + last name, first + last name, and accent-stripped variants.
//!
//! A user can pin a multi-word last name with a bracket override:
//! `Jane {van der Berg}` or `Jane [van der Berg]` has last name
//! `van der Berg`, which is never tokenized.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref BRACKET_OVERRIDE: Regex = Regex::new(r"\{([^{}]*)\}|\[([^\[\]]*)\]").unwrap();
}

/// A name split into its leading tokens and its last name
struct NameParts<'a> {
    leading: Vec<&'a str>,
    last: &'a str,
}

/// Split on a bracket override, if the name has one
fn bracket_parts(name: &str) -> Option<NameParts<'_>> {
    let caps = BRACKET_OVERRIDE.captures(name)?;
    let whole = caps.get(0)?;
    let literal = caps.get(1).or_else(|| caps.get(2))?;
    Some(NameParts {
        leading: name[..whole.start()].split_whitespace().collect(),
        last: literal.as_str(),
    })
}

/// Split a name into leading tokens and last name.
///
/// `None` for names without a space (a single token is already a last name).
fn name_parts(name: &str) -> Option<NameParts<'_>> {
    if let Some(parts) = bracket_parts(name) {
        return Some(parts);
    }
    if !name.contains(' ') {
        return None;
    }
    let mut tokens: Vec<&str> = name.split_whitespace().collect();
    let last = tokens.pop().unwrap_or("");
    Some(NameParts {
        leading: tokens,
        last,
    })
}

/// Last name of `name`.
///
/// ```
/// use authors_core::text::extract_last_name;
/// assert_eq!(extract_last_name("John Ronald Reuel Tolkien"), "Tolkien");
/// assert_eq!(extract_last_name("Jane {van der Berg}"), "van der Berg");
/// assert_eq!(extract_last_name("Tolkien"), "Tolkien");
/// ```
pub fn extract_last_name(name: &str) -> String {
    match name_parts(name) {
        Some(parts) => parts.last.to_string(),
        None => name.to_string(),
    }
}

/// Reduce one given-name token to its initial, `Jean-Pierre` to `J.-P.`
fn reduce_token(token: &str) -> String {
    let trimmed = token.trim_matches('-');
    if trimmed.contains('-') {
        trimmed
            .split('-')
            .filter(|part| !part.is_empty())
            .map(initial)
            .collect::<Vec<_>>()
            .join("-")
    } else {
        initial(token)
    }
}

fn initial(token: &str) -> String {
    match token.chars().next() {
        Some(c) => format!("{c}."),
        None => String::new(),
    }
}

/// `F. M. Last` form of a name.
///
/// ```
/// use authors_core::text::to_initials_last;
/// assert_eq!(to_initials_last("John Ronald Reuel Tolkien"), "J. R. R. Tolkien");
/// assert_eq!(to_initials_last("Jean-Pierre Dupont"), "J.-P. Dupont");
/// ```
pub fn to_initials_last(name: &str) -> String {
    let Some(parts) = name_parts(name) else {
        return name.to_string();
    };
    let mut reduced: Vec<String> = parts.leading.iter().map(|t| reduce_token(t)).collect();
    reduced.push(parts.last.to_string());
    reduced.join(" ")
}

/// First token and last name, middle names dropped
pub fn to_first_last(name: &str) -> String {
    let Some(parts) = name_parts(name) else {
        return name.to_string();
    };
    match parts.leading.first() {
        Some(first) => format!("{} {}", first, parts.last),
        None => parts.last.to_string(),
    }
}

/// First letter of every whitespace-separated token
pub fn to_initials_list(name: &str) -> Vec<char> {
    name.split_whitespace()
        .filter_map(|token| token.chars().next())
        .collect()
}

/// Join a name with LaTeX ties so it never breaks across lines
pub fn non_breaking(name: &str) -> String {
    name.replace(' ', "~")
}

/// Remove diacritics, keeping case: `João` → `Joao`
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Case-insensitive comparison key
pub fn casefold(text: &str) -> String {
    text.to_lowercase()
}

/// Whether `name` is already written as initials + last name (`J. P. Faria`)
pub(crate) fn is_initials_form(name: &str) -> bool {
    to_initials_last(name) == name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_last_name() {
        assert_eq!(extract_last_name("João P. Faria"), "Faria");
        assert_eq!(extract_last_name("John  Smith"), "Smith");
        assert_eq!(extract_last_name("Smith"), "Smith");
        assert_eq!(extract_last_name(""), "");
    }

    #[test]
    fn test_bracket_override() {
        assert_eq!(extract_last_name("Jane {van der Berg}"), "van der Berg");
        assert_eq!(extract_last_name("Jane [van der Berg]"), "van der Berg");
        assert_eq!(extract_last_name("{Zhang Wei}"), "Zhang Wei");
        assert_eq!(extract_last_name("{Smith}"), "Smith");
    }

    #[test]
    fn test_to_initials_last() {
        assert_eq!(to_initials_last("John Ronald Reuel Tolkien"), "J. R. R. Tolkien");
        assert_eq!(to_initials_last("João P. Faria"), "J. P. Faria");
        assert_eq!(to_initials_last("Jean-Pierre Dupont"), "J.-P. Dupont");
        assert_eq!(to_initials_last("Tolkien"), "Tolkien");
        assert_eq!(to_initials_last(""), "");
    }

    #[test]
    fn test_to_initials_last_bracket() {
        assert_eq!(to_initials_last("Jane Anne {van der Berg}"), "J. A. van der Berg");
        assert_eq!(to_initials_last("{van der Berg}"), "van der Berg");
    }

    #[test]
    fn test_to_first_last() {
        assert_eq!(to_first_last("João P. Faria"), "João Faria");
        assert_eq!(to_first_last("Jane {van der Berg}"), "Jane van der Berg");
        assert_eq!(to_first_last("Faria"), "Faria");
    }

    #[test]
    fn test_to_initials_list() {
        assert_eq!(to_initials_list("João P. Faria"), vec!['J', 'P', 'F']);
        assert!(to_initials_list("").is_empty());
    }

    #[test]
    fn test_non_breaking() {
        assert_eq!(non_breaking("J. P. Faria"), "J.~P.~Faria");
    }

    #[test]
    fn test_strip_accents() {
        assert_eq!(strip_accents("João Müller-Sánchez"), "Joao Muller-Sanchez");
        assert_eq!(strip_accents("Ñ"), "N");
        assert_eq!(strip_accents(""), "");
    }

    #[test]
    fn test_is_initials_form() {
        assert!(is_initials_form("J. Faria"));
        assert!(is_initials_form("J. P. Faria"));
        assert!(is_initials_form("J.-P. Dupont"));
        assert!(!is_initials_form("Jose Faria"));
    }
}
