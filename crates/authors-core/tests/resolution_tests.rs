//! Name matching and author list resolution against the sample registry

mod common;

use authors_core::matching::{bitap_fuzzy_search, levenshtein_distance, similarity_score};
use authors_core::text::{escape_tex, extract_last_name, strip_accents, to_first_last, to_initials_last};
use authors_core::{
    Affiliation, AuthorList, AuthorRecord, AuthorSource, Authors, AuthorsError, NameIndex, OrderingPolicy, Registry,
};
use common::fixtures::{fixture_path, load_index, load_registry};
use proptest::prelude::*;
use rstest::rstest;

// === Known-author index ===

#[rstest]
#[case("João P. Faria", true)]
#[case("J. P. Faria", true)]
#[case("J. Faria", true)]
#[case("Joao P. Faria", true)]
#[case(r"Jo\~ao P. Faria", true)]
#[case("joca", true)]
#[case("Faria", true)]
#[case("João Faria", true)]
#[case("Sergio Sousa", true)]
#[case("S. Sousa", true)]
#[case("N. Santos", true)]
#[case("Le Roux", true)]
#[case("Jose Faria", false)]
#[case("P. Faria", false)]
#[case("Albert Einstein", false)]
#[case("", false)]
fn test_contains(#[case] name: &str, #[case] known: bool) {
    assert_eq!(load_index().contains(name), known, "contains({name:?})");
}

#[rstest]
#[case("J. P. Faria", "João P. Faria")]
#[case("Joca", "João P. Faria")]
#[case("X. DUMUSQUE", "Xavier Dumusque")]
#[case("S. Sousa", "Sérgio Sousa")]
#[case("J.-P. {Le Roux}", "Jean-Pierre {Le Roux}")]
#[case("Nuno C. Santos", "Nuno C. Santos")]
#[case("J. García", "Jose Garcia")]
fn test_resolve(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(load_index().resolve(name).unwrap().name, expected);
}

#[test]
fn test_resolve_unknown() {
    let err = load_index().resolve("Albert Einstein").unwrap_err();
    assert!(matches!(err, AuthorsError::NotFound(name) if name == "Albert Einstein"));
}

/// Put an acute accent (or cedilla) on every letter that has one
fn accented(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a' => 'á',
            'e' => 'é',
            'i' => 'í',
            'o' => 'ó',
            'u' => 'ú',
            'c' => 'ç',
            'A' => 'Á',
            'E' => 'É',
            _ => c,
        })
        .collect()
}

/// Spellings a paper might use for a registered name
fn spellings(name: &str) -> Vec<String> {
    let plain = strip_accents(name);
    let mut variants = vec![
        name.to_string(),
        plain.clone(),
        accented(&plain),
        to_initials_last(name),
        to_initials_last(&plain),
        accented(&to_initials_last(&plain)),
        to_first_last(name),
        to_first_last(&plain),
        extract_last_name(name),
        accented(&extract_last_name(&plain)),
    ];
    let cased: Vec<String> = variants
        .iter()
        .flat_map(|v| [v.to_lowercase(), v.to_uppercase()])
        .collect();
    variants.extend(cased);
    variants
}

#[test]
fn test_known_names_always_resolve() {
    let index = load_index();
    for name in index.registry().names() {
        for variant in spellings(name) {
            if index.contains(&variant) {
                assert!(
                    index.resolve(&variant).is_ok(),
                    "{variant:?} is known but does not resolve (registered as {name:?})"
                );
            }
        }
    }
}

// === Author lists ===

#[test]
fn test_author_list_from_file() {
    let source = fixture_path("paper_authors.txt");
    let authors = Authors::from_registry(load_registry(), source.to_str().unwrap()).unwrap();
    assert_eq!(authors.list().len(), 5);
    assert_eq!(authors.known(), vec![true, true, true, false, true]);

    let resolved = authors.resolve_list(&OrderingPolicy::AsGiven);
    let names: Vec<Option<&str>> = resolved
        .iter()
        .map(|author| author.matched.as_ref().map(|found| found.name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            Some("João P. Faria"),
            Some("Sérgio Sousa"),
            Some("Nuno C. Santos"),
            None,
            Some("Xavier Dumusque"),
        ]
    );
    assert_eq!(resolved[3].raw, "Albert Einstein");
}

#[test]
fn test_alphabetical_after_first_author() {
    let authors = Authors::new(
        load_index(),
        AuthorList::parse("J. P. Faria\nX. Dumusque\nN. C. Santos\nAlbert Einstein").unwrap(),
    );
    let order: Vec<String> = authors
        .resolve_list(&OrderingPolicy::AlphabeticalAfter(1))
        .into_iter()
        .map(|author| author.raw)
        .collect();
    assert_eq!(order, vec!["J. P. Faria", "X. Dumusque", "Albert Einstein", "N. C. Santos"]);
}

#[test]
fn test_query_author() {
    let authors = Authors::new(load_index(), AuthorList::parse("J. Faria").unwrap());
    let found = authors.query_author("J. Faria").unwrap();
    assert_eq!(found.record.nickname.as_deref(), Some("Joca"));
}

// === Name helpers ===

#[rstest]
#[case("John Ronald Reuel Tolkien", "J. R. R. Tolkien")]
#[case("Tolkien", "Tolkien")]
#[case("Jean-Pierre {Le Roux}", "J.-P. Le Roux")]
#[case("{Le Roux}", "Le Roux")]
#[case("", "")]
fn test_initials_last(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(to_initials_last(name), expected);
}

#[test]
fn test_escape_tex() {
    assert_eq!(escape_tex("50% & $5"), r"50\% \& \$5");
}

// === Fuzzy matching properties ===

fn brute_force_substring_distance(haystack: &str, needle: &str) -> usize {
    let chars: Vec<char> = haystack.chars().collect();
    let mut best = needle.chars().count();
    for start in 0..=chars.len() {
        for end in start..=chars.len() {
            let candidate: String = chars[start..end].iter().collect();
            best = best.min(levenshtein_distance(&candidate, needle));
        }
    }
    best
}

proptest! {
    #[test]
    fn test_distance_matches_reference(a in "\\PC{0,12}", b in "\\PC{0,12}") {
        prop_assert_eq!(levenshtein_distance(&a, &b), strsim::levenshtein(&a, &b));
    }

    #[test]
    fn test_distance_symmetric(a in "[a-zé ]{0,15}", b in "[a-zé ]{0,15}") {
        prop_assert_eq!(levenshtein_distance(&a, &b), levenshtein_distance(&b, &a));
    }

    #[test]
    fn test_distance_identity(a in "\\PC{0,20}") {
        prop_assert_eq!(levenshtein_distance(&a, &a), 0);
        prop_assert_eq!(similarity_score(&a, &a), 1.0);
    }

    #[test]
    fn test_similarity_in_unit_range(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
        let score = similarity_score(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_exact_occurrence_found(prefix in "[a-z ]{0,10}", needle in "[a-z]{1,8}", suffix in "[a-z ]{0,10}") {
        let haystack = format!("{prefix}{needle}{suffix}");
        let found = bitap_fuzzy_search(&haystack, &needle, 0).unwrap();
        prop_assert_eq!(found.errors, 0);
        prop_assert_eq!(found.matched, needle);
    }

    #[test]
    fn test_bitap_finds_minimal_errors(haystack in "[ab]{0,8}", needle in "[ab]{1,4}") {
        let bound = needle.chars().count();
        let found = bitap_fuzzy_search(&haystack, &needle, bound).unwrap();
        prop_assert_eq!(found.errors, brute_force_substring_distance(&haystack, &needle));
        prop_assert_eq!(levenshtein_distance(&found.matched, &needle), found.errors);
    }

    #[test]
    fn test_resolve_list_keeps_every_name(names in prop::collection::vec("[A-Z]\\. [A-Z][a-z]{2,8}", 1..8), k in 0usize..10) {
        let list = AuthorList::parse(&names.join("\n")).unwrap();
        let authors = Authors::new(load_index(), list);
        let resolved = authors.resolve_list(&OrderingPolicy::AlphabeticalAfter(k));
        prop_assert_eq!(resolved.len(), names.len());
    }

    #[test]
    fn test_accented_initials_resolve(first in "[A-Z][a-z]{2,8}", last in "[A-Z][a-z]{2,8}") {
        let name = format!("{first} {last}");
        let registry: Registry = [(name.clone(), AuthorRecord::new(vec![Affiliation::plain("IAC")]))]
            .into_iter()
            .collect();
        let index = NameIndex::new(registry);
        let query = format!("{}. {}", &first[..1], accented(&last));
        prop_assert!(index.contains(&query));
        prop_assert_eq!(index.resolve(&query).unwrap().name, name);
    }

    #[test]
    fn test_last_name_is_a_token(name in "[A-Z][a-z]{1,6}( [A-Z][a-z]{1,6}){0,3}") {
        let last = extract_last_name(&name);
        prop_assert!(name.ends_with(&last));
    }
}
