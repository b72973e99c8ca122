//! Registry health check
//!
//! Looks for authors registered twice under different spellings and for
//! affiliation strings that are probably the same institution written
//! differently. Merging is left to a caller-supplied chooser.

use std::fmt;

use authors_domain::Registry;
use indexmap::IndexMap;

use crate::matching::{levenshtein_distance, similarity_score};
use crate::text::to_initials_last;

/// Pairs scoring above this are reported as similar
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Two affiliation strings that probably name the same institution
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarAffiliations {
    pub first: String,
    pub second: String,
    pub distance: usize,
    pub score: f64,
}

/// What to do with a pair of similar affiliations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeChoice {
    /// Rewrite the second as the first
    KeepFirst,
    /// Rewrite the first as the second
    KeepSecond,
    KeepBoth,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthReport {
    pub author_count: usize,
    /// Initials-last forms shared by more than one author, with counts
    pub duplicate_initials: Vec<(String, usize)>,
    pub affiliation_count: usize,
    pub similar_affiliations: Vec<SimilarAffiliations>,
}

impl HealthReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_initials.is_empty() && self.similar_affiliations.is_empty()
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "there are {} known authors", self.author_count)?;
        if self.duplicate_initials.is_empty() {
            writeln!(f, " no duplicates in initials, last name")?;
        } else {
            writeln!(f, " duplicates in initials, last name:")?;
            for (name, count) in &self.duplicate_initials {
                writeln!(f, "   {name} occurs {count} times")?;
            }
        }
        writeln!(f, "there are {} unique affiliations", self.affiliation_count)?;
        for pair in &self.similar_affiliations {
            writeln!(f, "distance={}, score={:.3}", pair.distance, pair.score)?;
            writeln!(f, " {}", pair.first)?;
            writeln!(f, " {}", pair.second)?;
        }
        Ok(())
    }
}

/// Check `registry` for duplicate authors and similar affiliations.
///
/// The affiliation comparison is quadratic; `progress(done, total)` is
/// called after each affiliation has been compared with the rest.
pub fn health_check<P>(registry: &Registry, progress: P) -> HealthReport
where
    P: FnMut(usize, usize),
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for name in registry.names() {
        *counts.entry(to_initials_last(name)).or_default() += 1;
    }
    let duplicate_initials = counts.into_iter().filter(|(_, count)| *count > 1).collect();

    let affiliations = registry.all_affiliations();
    let similar_affiliations = find_similar_affiliations(&affiliations, progress);

    HealthReport {
        author_count: registry.len(),
        duplicate_initials,
        affiliation_count: affiliations.len(),
        similar_affiliations,
    }
}

/// Every pair in `affiliations` with a similarity above [`SIMILARITY_THRESHOLD`]
pub fn find_similar_affiliations<P>(affiliations: &[&str], mut progress: P) -> Vec<SimilarAffiliations>
where
    P: FnMut(usize, usize),
{
    let total = affiliations.len();
    let mut pairs = Vec::new();
    for (i, first) in affiliations.iter().enumerate() {
        for second in &affiliations[i + 1..] {
            let score = similarity_score(first, second);
            if score > SIMILARITY_THRESHOLD {
                pairs.push(SimilarAffiliations {
                    first: first.to_string(),
                    second: second.to_string(),
                    distance: levenshtein_distance(first, second),
                    score,
                });
            }
        }
        progress(i + 1, total);
    }
    pairs
}

/// Ask `choose` about each pair and rewrite affiliations accordingly.
///
/// Returns the number of author records changed.
pub fn merge_similar_affiliations<C>(
    registry: &mut Registry,
    pairs: &[SimilarAffiliations],
    mut choose: C,
) -> usize
where
    C: FnMut(&SimilarAffiliations) -> MergeChoice,
{
    let mut changed = 0;
    for pair in pairs {
        changed += match choose(pair) {
            MergeChoice::KeepFirst => registry.replace_affiliation(&pair.second, &pair.first),
            MergeChoice::KeepSecond => registry.replace_affiliation(&pair.first, &pair.second),
            MergeChoice::KeepBoth => 0,
        };
    }
    if changed > 0 {
        tracing::info!(records = changed, "merged similar affiliations");
    }
    changed
}
