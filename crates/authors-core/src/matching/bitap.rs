//! Approximate substring search (bitap with errors)
//!
//! Shift-and bitap extended with one state row per allowed error count. Bit
//! `j` of row `d` is set when the first `j + 1` needle characters match a
//! substring ending at the current haystack position with at most `d`
//! insertions, deletions or substitutions. Rows are multi-word so needles of
//! any length work.

use std::collections::HashMap;

use super::levenshtein_distance;

/// A substring of the haystack that approximately matches the needle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub matched: String,
    pub errors: usize,
}

#[derive(Clone, Debug)]
struct BitRow {
    words: Vec<u64>,
}

impl BitRow {
    fn zeros(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(64).max(1)],
        }
    }

    /// Row with the lowest `count` bits set
    fn low_bits(bits: usize, count: usize) -> Self {
        let mut row = Self::zeros(bits);
        for i in 0..count {
            row.set(i);
        }
        row
    }

    fn set(&mut self, bit: usize) {
        self.words[bit / 64] |= 1 << (bit % 64);
    }

    fn get(&self, bit: usize) -> bool {
        self.words[bit / 64] & (1 << (bit % 64)) != 0
    }

    /// `(self << 1) | 1`
    fn shifted_in(&self) -> Self {
        let mut carry = 1;
        let words = self
            .words
            .iter()
            .map(|&word| {
                let shifted = (word << 1) | carry;
                carry = word >> 63;
                shifted
            })
            .collect();
        Self { words }
    }

    fn and_assign(&mut self, other: &BitRow) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= b;
        }
    }

    fn or_assign(&mut self, other: &BitRow) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
    }

    fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }
}

/// Find `needle` in `haystack` with at most `max_errors` edits.
///
/// Returns the matching substring with the fewest errors; on a tie the match
/// ending earliest wins. `None` when no substring is within the bound. An
/// empty needle matches the empty string with no errors.
///
/// ```
/// use authors_core::matching::bitap_fuzzy_search;
/// let found = bitap_fuzzy_search("Centro de Astrofisica", "Astrofísica", 1).unwrap();
/// assert_eq!(found.matched, "Astrofisica");
/// assert_eq!(found.errors, 1);
/// assert!(bitap_fuzzy_search("Porto", "Lisboa", 0).is_none());
/// ```
pub fn bitap_fuzzy_search(haystack: &str, needle: &str, max_errors: usize) -> Option<FuzzyMatch> {
    let pattern: Vec<char> = needle.chars().collect();
    let text: Vec<char> = haystack.chars().collect();
    let m = pattern.len();
    if m == 0 {
        return Some(FuzzyMatch {
            matched: String::new(),
            errors: 0,
        });
    }

    // Deleting the whole needle costs m, so more errors than that never help
    let k = max_errors.min(m);
    let accept = m - 1;

    let mut masks: HashMap<char, BitRow> = HashMap::new();
    for (i, c) in pattern.iter().enumerate() {
        masks.entry(*c).or_insert_with(|| BitRow::zeros(m)).set(i);
    }

    let mut rows: Vec<BitRow> = (0..=k).map(|d| BitRow::low_bits(m, d)).collect();

    // (errors, end position in chars, exclusive)
    let mut best: Option<(usize, usize)> = (0..=k).find(|&d| rows[d].get(accept)).map(|d| (d, 0));

    for (i, c) in text.iter().enumerate() {
        let mask = masks.get(c);

        let mut prev_old = rows[0].clone();
        let mut exact = rows[0].shifted_in();
        match mask {
            Some(mask) => exact.and_assign(mask),
            None => exact.clear(),
        }
        rows[0] = exact;

        for d in 1..=k {
            let old = rows[d].clone();

            let mut next = old.shifted_in();
            match mask {
                Some(mask) => next.and_assign(mask),
                None => next.clear(),
            }
            // extra haystack character
            next.or_assign(&prev_old);
            // substitution (old row d-1) or skipped needle character (new row d-1)
            let mut diagonal = prev_old;
            diagonal.or_assign(&rows[d - 1]);
            next.or_assign(&diagonal.shifted_in());

            prev_old = old;
            rows[d] = next;
        }

        if let Some(d) = (0..=k).find(|&d| rows[d].get(accept)) {
            if best.map_or(true, |(errors, _)| d < errors) {
                best = Some((d, i + 1));
            }
        }
        if matches!(best, Some((0, _))) {
            break;
        }
    }

    let (errors, end) = best?;
    let start = match_start(&text, &pattern, end, errors);
    Some(FuzzyMatch {
        matched: text[start..end].iter().collect(),
        errors,
    })
}

/// Leftmost start of a substring ending at `end` within `errors` edits
fn match_start(text: &[char], pattern: &[char], end: usize, errors: usize) -> usize {
    let needle: String = pattern.iter().collect();
    let earliest = end.saturating_sub(pattern.len() + errors);
    (earliest..=end)
        .find(|&start| {
            let candidate: String = text[start..end].iter().collect();
            levenshtein_distance(&candidate, &needle) <= errors
        })
        .unwrap_or(end.saturating_sub(pattern.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_search() {
        let found = bitap_fuzzy_search("Universidade do Porto", "Porto", 0).unwrap();
        assert_eq!(found, FuzzyMatch { matched: "Porto".into(), errors: 0 });
        assert!(bitap_fuzzy_search("Universidade do Porto", "Lisboa", 0).is_none());
    }

    #[test]
    fn test_substitution() {
        let found = bitap_fuzzy_search("the stomp here", "stamp", 1).unwrap();
        assert_eq!(found.matched, "stomp");
        assert_eq!(found.errors, 1);
    }

    #[test]
    fn test_insertion_in_haystack() {
        let found = bitap_fuzzy_search("xx Geneeva xx", "Geneva", 1).unwrap();
        assert_eq!(found.errors, 1);
        assert!(found.matched.starts_with("Gene"));
    }

    #[test]
    fn test_deletion_from_haystack() {
        let found = bitap_fuzzy_search("Obsrvatoire", "Observatoire", 2).unwrap();
        assert_eq!(found.errors, 1);
        assert_eq!(found.matched, "Obsrvatoire");
    }

    #[test]
    fn test_bound_respected() {
        assert!(bitap_fuzzy_search("abcdef", "xyz", 2).is_none());
        let found = bitap_fuzzy_search("abcdef", "xyz", 3).unwrap();
        assert_eq!(found.errors, 3);
    }

    #[test]
    fn test_empty_needle() {
        let found = bitap_fuzzy_search("anything", "", 0).unwrap();
        assert_eq!(found, FuzzyMatch { matched: String::new(), errors: 0 });
    }

    #[test]
    fn test_empty_haystack() {
        assert!(bitap_fuzzy_search("", "abc", 2).is_none());
        let found = bitap_fuzzy_search("", "abc", 3).unwrap();
        assert_eq!(found, FuzzyMatch { matched: String::new(), errors: 3 });
    }

    #[test]
    fn test_long_needle_spans_words() {
        let needle = "Instituto de Astrofísica e Ciências do Espaço, Universidade do Porto, CAUP, Rua das Estrelas";
        assert!(needle.chars().count() > 64);
        let haystack = format!("prefix {} suffix", needle.replace("Rua", "Ruа"));
        let found = bitap_fuzzy_search(&haystack, needle, 2).unwrap();
        assert_eq!(found.errors, 1);
    }

    #[test]
    fn test_unicode_characters() {
        let found = bitap_fuzzy_search("Dr. João Faria", "Joao", 1).unwrap();
        assert_eq!(found.matched, "João");
        assert_eq!(found.errors, 1);
    }
}
