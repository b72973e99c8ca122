//! Astronomy & Astrophysics `\author` / `\institute` blocks

use crate::resolver::{AuthorSource, OrderingPolicy};
use crate::text::escape_tex;

use super::{display_name, InstituteTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AandAOptions {
    /// Add `\orcidlink{}` for authors with an ORCID
    pub add_orcids: bool,
    /// Add the first author's email to the first institute
    pub add_email: bool,
    pub force_initials: bool,
    pub ordering: OrderingPolicy,
}

impl Default for AandAOptions {
    fn default() -> Self {
        Self {
            add_orcids: true,
            add_email: true,
            force_initials: true,
            ordering: OrderingPolicy::AsGiven,
        }
    }
}

/// Render the A&A author and institute blocks.
///
/// Institutes without a label are referenced as `inst1`, `inst2`, ...
/// Unknown authors are kept, with `\inst{unknown}`.
pub fn render<S: AuthorSource + ?Sized>(source: &S, options: &AandAOptions) -> String {
    let authors = source.resolve_list(&options.ordering);
    let mut institutes = InstituteTable::new();
    let mut email = String::new();

    let mut text = String::from("\\author{\n");
    for (i, author) in authors.iter().enumerate() {
        match &author.matched {
            Some(found) => {
                let record = &found.record;
                if options.add_email && i == 0 {
                    email = record.email.clone().unwrap_or_default();
                }

                let refs: Vec<String> = record
                    .affiliations
                    .iter()
                    .map(|affiliation| {
                        let number = institutes.number(affiliation);
                        match institutes.label(affiliation.name()) {
                            Some(label) => format!("\\ref{{{label}}}"),
                            None => format!("\\ref{{ inst{number} }}"),
                        }
                    })
                    .collect();

                text.push_str(&format!(
                    "  {} \\inst{{{}}} ",
                    display_name(&found.name, record, options.force_initials),
                    refs.join(", ")
                ));
                if let Some(orcid) = record.orcid.as_deref().filter(|_| options.add_orcids) {
                    text.push_str(&format!("\\orcidlink{{{orcid}}} "));
                }
            }
            None => text.push_str(&format!("  {} \\inst{{unknown}} ", author.raw)),
        }
        if i + 1 < authors.len() {
            text.push_str("\\and\n");
        }
    }
    text.push_str("\n}\n\n");

    text.push_str("\\institute{\n");
    let count = institutes.len();
    for (number, name, label) in institutes.iter() {
        text.push_str(&format!("  {} ", escape_tex(name)));
        match label {
            Some(label) => text.push_str(&format!("\\label{{{label}}} ")),
            None => text.push_str(&format!("\\label{{ inst{number} }} ")),
        }
        if options.add_email && number == 1 && !email.is_empty() {
            text.push_str(&format!("\\\\ \\email{{{email}}} "));
        }
        text.push_str(if number == count { "\n" } else { "\\and\n" });
    }
    text.push_str("}\n");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::NameIndex;
    use crate::resolver::{AuthorList, Authors};
    use authors_domain::{Affiliation, AuthorRecord, Registry};

    fn authors(list: &str) -> Authors {
        let mut registry = Registry::new();
        registry
            .register(
                "João P. Faria",
                AuthorRecord::new(vec![
                    Affiliation::plain("CAUP"),
                    Affiliation::labeled("Observatoire de Genève", "geneva"),
                ])
                .with_email("joao.faria@astro.up.pt")
                .with_orcid("0000-0002-6728-244X"),
            )
            .unwrap();
        registry
            .register("Nuno C. Santos", AuthorRecord::new(vec![Affiliation::plain("CAUP")]))
            .unwrap();
        Authors::new(NameIndex::new(registry), AuthorList::parse(list).unwrap())
    }

    #[test]
    fn test_single_author() {
        let text = render(&authors("João P. Faria"), &AandAOptions::default());
        assert_eq!(
            text,
            "\\author{\n\
             \x20 J.~P.~Faria \\inst{\\ref{ inst1 }, \\ref{geneva}} \\orcidlink{0000-0002-6728-244X} \n\
             }\n\n\
             \\institute{\n\
             \x20 CAUP \\label{ inst1 } \\\\ \\email{joao.faria@astro.up.pt} \\and\n\
             \x20 Observatoire de Genève \\label{geneva} \n\
             }\n"
        );
    }

    #[test]
    fn test_unknown_author_and_options() {
        let options = AandAOptions {
            add_orcids: false,
            add_email: false,
            force_initials: false,
            ..AandAOptions::default()
        };
        let text = render(&authors("N. Santos\nAlbert Einstein"), &options);
        assert_eq!(
            text,
            "\\author{\n\
             \x20 Nuno~C.~Santos \\inst{\\ref{ inst1 }} \\and\n\
             \x20 Albert Einstein \\inst{unknown} \n\
             }\n\n\
             \\institute{\n\
             \x20 CAUP \\label{ inst1 } \n\
             }\n"
        );
    }
}
