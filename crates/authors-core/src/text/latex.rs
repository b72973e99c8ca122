//! TeX escaping and de-escaping
//!
//! Names and affiliations are stored as plain Unicode. `deescape_tex` turns
//! TeX accent macros typed by users (`Jos\'e`) into Unicode; `escape_tex`
//! protects LaTeX special characters when an affiliation is rendered.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

/// A set of literal replacements applied in one pass, longest match first
struct ReplaceTable {
    pattern: Regex,
    replacements: HashMap<String, String>,
}

impl ReplaceTable {
    fn new(pairs: Vec<(String, String)>) -> Self {
        let mut keys: Vec<&String> = pairs.iter().map(|(k, _)| k).collect();
        // Sort by pattern length, longest first, so "\'{u}" wins over "\'u"
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        keys.dedup();
        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation).unwrap();
        let replacements = pairs.into_iter().collect();
        Self {
            pattern,
            replacements,
        }
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                let matched = &caps[0];
                // `\o` must not eat the start of `\orcidlink`
                if let Some(m) = caps.get(0) {
                    let letter_follows = text[m.end()..].starts_with(|c: char| c.is_ascii_alphabetic());
                    if letter_follows && ends_in_control_word(matched) {
                        return matched.to_string();
                    }
                }
                self.replacements
                    .get(matched)
                    .cloned()
                    .unwrap_or_else(|| matched.to_string())
            })
            .into_owned()
    }
}

/// Whether `key` ends in a control word such as `\o` or `\ss`
fn ends_in_control_word(key: &str) -> bool {
    key.rsplit_once('\\')
        .is_some_and(|(_, word)| !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()))
}

// ===== Accent macros =====

/// Accent commands written with a symbol: `\'e`, `\'{e}`
const SYMBOL_ACCENTS: &[(&str, char)] = &[
    ("'", '\u{0301}'),  // acute
    ("’", '\u{0301}'),  // acute, typed with a curly quote
    ("`", '\u{0300}'),  // grave
    ("‘", '\u{0300}'),  // grave, typed with a curly quote
    ("^", '\u{0302}'),  // circumflex
    ("~", '\u{0303}'),  // tilde
    ("=", '\u{0304}'),  // macron
    (".", '\u{0307}'),  // dot above
    ("\"", '\u{0308}'), // diaeresis
];

/// Accent commands written with a letter: `\c{c}`, `\c c`
const LETTER_ACCENTS: &[(&str, char)] = &[
    ("c", '\u{0327}'), // cedilla
    ("v", '\u{030C}'), // caron
    ("r", '\u{030A}'), // ring
    ("u", '\u{0306}'), // breve
    ("k", '\u{0328}'), // ogonek
    ("H", '\u{030B}'), // double acute
];

/// Standalone letters and ligatures
const SPECIAL_LETTERS: &[(&str, &str)] = &[
    ("\\aa", "å"),
    ("\\AA", "Å"),
    ("\\ae", "æ"),
    ("\\AE", "Æ"),
    ("\\oe", "œ"),
    ("\\OE", "Œ"),
    ("\\o", "ø"),
    ("\\O", "Ø"),
    ("\\l", "ł"),
    ("\\L", "Ł"),
    ("\\ss", "ß"),
    ("\\i", "ı"),
];

/// Spacing and punctuation left over from BibTeX-style author strings
const PUNCTUATION: &[(&str, &str)] = &[
    ("\\,", " "),
    ("\\ ", " "),
    ("\\&", "&"),
    ("${\\rm \\mid}$", "|"),
    ("{\\rm \\&}", "&"),
];

/// Compose `base` with a combining `mark`, if Unicode has a precomposed form
fn compose(base: char, mark: char) -> Option<String> {
    let composed: String = [base, mark].iter().collect::<String>().nfc().collect();
    (composed.chars().count() == 1).then_some(composed)
}

fn deescape_pairs() -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut push = |pattern: String, replacement: String| {
        pairs.push((format!("{{{pattern}}}"), replacement.clone()));
        pairs.push((pattern, replacement));
    };

    let letters = ('a'..='z').chain('A'..='Z');
    for base in letters {
        for (command, mark) in SYMBOL_ACCENTS {
            if let Some(composed) = compose(base, *mark) {
                push(format!("\\{command}{base}"), composed.clone());
                push(format!("\\{command}{{{base}}}"), composed);
            }
        }
        for (command, mark) in LETTER_ACCENTS {
            if let Some(composed) = compose(base, *mark) {
                push(format!("\\{command}{{{base}}}"), composed.clone());
                push(format!("\\{command} {base}"), composed);
            }
        }
    }

    // Accents on a dotless i compose with a plain i
    for (command, mark) in SYMBOL_ACCENTS {
        if let Some(composed) = compose('i', *mark) {
            push(format!("\\{command}{{\\i}}"), composed.clone());
            push(format!("\\{command}\\i"), composed);
        }
    }

    for (pattern, replacement) in SPECIAL_LETTERS {
        push(pattern.to_string(), replacement.to_string());
    }

    for (pattern, replacement) in PUNCTUATION {
        pairs.push((pattern.to_string(), replacement.to_string()));
    }

    pairs
}

// ===== LaTeX special characters =====

const ESCAPES: &[(&str, &str)] = &[
    ("&", "\\&"),
    ("|", "$\\|$"),
    ("%", "\\%"),
    ("$", "\\$"),
    ("#", "\\#"),
    ("_", "\\_"),
    ("{", "\\{"),
    ("}", "\\}"),
    ("~", "\\textasciitilde{}"),
    ("^", "\\^{}"),
    ("\\", "\\textbackslash{}"),
    ("<", "\\textless{}"),
    (">", "\\textgreater{}"),
];

lazy_static! {
    static ref DEESCAPE: ReplaceTable = ReplaceTable::new(deescape_pairs());
    static ref ESCAPE: ReplaceTable = ReplaceTable::new(
        ESCAPES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    );
}

/// Convert TeX accent macros to Unicode: `Jos\'e` → `José`.
///
/// Any backslash left after conversion is reported with a warning and the
/// partially converted text is returned.
pub fn deescape_tex(text: &str) -> String {
    let converted = DEESCAPE.apply(text);
    if has_unconverted_escape(&converted) {
        tracing::warn!(text = %converted, "some TeX escapes were not converted");
    }
    converted
}

/// Whether `text` still contains a TeX escape
pub fn has_unconverted_escape(text: &str) -> bool {
    text.contains('\\')
}

/// Escape LaTeX special characters: `50% & $5` → `50\% \& \$5`
pub fn escape_tex(text: &str) -> String {
    ESCAPE.apply(text)
}
