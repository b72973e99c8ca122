//! Fuzzy string matching
//!
//! Edit distance, similarity scores, and approximate substring search used
//! to compare author names and affiliation strings.

mod bitap;
mod levenshtein;

pub use bitap::{bitap_fuzzy_search, FuzzyMatch};
pub use levenshtein::{levenshtein_distance, similarity_score};

/// Rank `candidates` by how well each one occurs inside `query`.
///
/// Each candidate is searched for in `query` with its own length as the error
/// bound, and candidates are ordered by ascending error count. The sort is
/// stable, so ties keep their input order. At most `top_n` are returned.
pub fn closest_matches<S: AsRef<str>>(query: &str, candidates: &[S], top_n: usize) -> Vec<String> {
    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .map(|candidate| {
            let candidate = candidate.as_ref();
            let bound = candidate.chars().count();
            let errors = bitap_fuzzy_search(query, candidate, bound).map_or(usize::MAX, |m| m.errors);
            (errors, candidate)
        })
        .collect();
    scored.sort_by_key(|(errors, _)| *errors);
    scored
        .into_iter()
        .take(top_n)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
