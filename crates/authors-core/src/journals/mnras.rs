//! Monthly Notices of the RAS `\author[]` block

use crate::resolver::{AuthorSource, OrderingPolicy};
use crate::text::escape_tex;

use super::{display_name, InstituteTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnrasOptions {
    /// Insert `\newauthor` after this many authors; 0 never breaks
    pub line_breaks: usize,
    pub force_initials: bool,
    /// Add `\orcidlink{}` after the institute numbers; off by default
    pub add_orcids: bool,
    pub ordering: OrderingPolicy,
}

impl Default for MnrasOptions {
    fn default() -> Self {
        Self {
            line_breaks: 6,
            force_initials: true,
            add_orcids: false,
            ordering: OrderingPolicy::AsGiven,
        }
    }
}

/// Render the MNRAS author block with numbered institutes.
///
/// Authors missing from the registry are left out.
pub fn render<S: AuthorSource + ?Sized>(source: &S, options: &MnrasOptions) -> String {
    let known: Vec<_> = source
        .resolve_list(&options.ordering)
        .into_iter()
        .filter_map(|author| match author.matched {
            Some(found) => Some(found),
            None => {
                tracing::warn!(author = %author.raw, "unknown author left out of MNRAS author list");
                None
            }
        })
        .collect();

    let mut institutes = InstituteTable::new();
    let mut text = String::from("\\author[]{\n");
    for (i, found) in known.iter().enumerate() {
        let numbers: Vec<String> = found
            .record
            .affiliations
            .iter()
            .map(|affiliation| institutes.number(affiliation).to_string())
            .collect();

        text.push_str(&format!(
            "  {} $^{{{}}}$",
            display_name(&found.name, &found.record, options.force_initials),
            numbers.join(",\\, ")
        ));
        if let Some(orcid) = found.record.orcid.as_deref().filter(|_| options.add_orcids) {
            text.push_str(&format!(" \\orcidlink{{{orcid}}}"));
        }
        let last = i + 1 == known.len();
        if !last {
            text.push_str(", ");
        }
        if options.line_breaks > 0 && (i + 1) % options.line_breaks == 0 {
            text.push_str("\\newauthor\\,\\!");
        }
        if !last {
            text.push('\n');
        }
    }
    text.push('\n');

    text.push_str("\\\\\n");
    let count = institutes.len();
    for (number, name, _) in institutes.iter() {
        text.push_str(&format!(" $^{{{number}}}$ {} ", escape_tex(name)));
        text.push_str(if number == count { "\n" } else { "\\\\\n" });
    }
    text.push_str("}\n");
    text
}
