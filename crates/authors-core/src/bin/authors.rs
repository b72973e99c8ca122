//! authors command line interface
//!
//! Renders author blocks for a paper and edits the registry of known authors.
//!
//! # Usage
//!
//! ```bash
//! # A&A author and institute blocks for the names in authors.txt
//! authors render authors.txt
//!
//! # MNRAS, first two authors as given, the rest sorted by last name
//! authors render authors.txt --journal mnras --alphabetical-after 2
//!
//! # Look up one author
//! authors query "J. Faria"
//!
//! # Register a new author
//! authors register "João P. Faria" "CAUP" "Observatoire de Genève" --label "" --label geneva
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use authors_core::journals::{aanda, mnras};
use authors_core::matching::closest_matches;
use authors_core::{
    acknowledgements, health_check, merge_similar_affiliations, Affiliation, AandAOptions, AuthorSource, Authors,
    AuthorsConfig, AuthorsError, MergeChoice, MnrasOptions, NameIndex, OrderingPolicy, Result, SimilarAffiliations,
    UpdateStrategy,
};

#[derive(Parser)]
#[command(name = "authors")]
#[command(version)]
#[command(about = "Keep track of paper authors and render journal author blocks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Registry file (overrides AUTHORS_REGISTRY and the config file)
    #[arg(long, global = true)]
    registry: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Journal {
    Aanda,
    Mnras,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the author block for a list of authors
    Render {
        /// File with one author per line, or the names separated by newlines
        source: String,

        #[arg(short, long, default_value = "aanda", value_enum)]
        journal: Journal,

        /// Keep the first N authors, sort the rest by last name
        #[arg(long, conflicts_with = "alphabetical_groups")]
        alphabetical_after: Option<usize>,

        /// Sort by last name within groups, e.g. 5,10
        #[arg(long, value_delimiter = ',')]
        alphabetical_groups: Option<Vec<usize>>,

        /// Use registered full names instead of initials
        #[arg(long)]
        full_names: bool,

        /// A&A: leave out ORCID links
        #[arg(long)]
        no_orcids: bool,

        /// A&A: leave out the first author's email
        #[arg(long)]
        no_email: bool,

        /// MNRAS: add ORCID links
        #[arg(long)]
        mnras_orcids: bool,

        /// MNRAS: authors per line
        #[arg(long, default_value_t = 6)]
        line_breaks: usize,

        /// Also print the acknowledgements of the known authors
        #[arg(long)]
        acknowledgements: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the registry record a name resolves to
    Query { name: String },

    /// Register a new author
    Register {
        full_name: String,
        affiliations: Vec<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        orcid: Option<String>,
        /// Label for each affiliation, in order (use "" for none)
        #[arg(long = "label")]
        labels: Vec<String>,
    },

    /// Change an author's full name
    Rename { old_name: String, new_name: String },

    SetEmail { name: String, email: String },

    SetOrcid { name: String, orcid: String },

    /// Set alternative names, comma separated
    SetNickname { name: String, nickname: String },

    /// Set the exact spelling used when rendering
    SetSpelling { name: String, spelling: String },

    SetAcknowledgements { name: String, text: String },

    /// Add affiliations to an author, or replace them
    SetAffiliations {
        name: String,
        #[arg(required = true)]
        affiliations: Vec<String>,
        #[arg(long)]
        replace: bool,
    },

    Delete { name: String },

    /// Replace text inside every affiliation
    ChangeAffiliation { old: String, new: String },

    /// Give an affiliation a LaTeX label
    SetLabel { affiliation: String, label: String },

    /// Look for duplicate authors and similar affiliations
    Health {
        /// Ask which spelling to keep for each pair of similar affiliations
        #[arg(long)]
        fix: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AuthorsConfig::resolve(cli.registry.as_deref())?;
    let store = config.store();

    match cli.command {
        Commands::Render {
            source,
            journal,
            alphabetical_after,
            alphabetical_groups,
            full_names,
            no_orcids,
            no_email,
            mnras_orcids,
            line_breaks,
            acknowledgements: show_acknowledgements,
            output,
        } => {
            let ordering = match (alphabetical_after, alphabetical_groups) {
                (Some(k), _) => OrderingPolicy::AlphabeticalAfter(k),
                (None, Some(groups)) => OrderingPolicy::AlphabeticalGroups(groups),
                (None, None) => OrderingPolicy::AsGiven,
            };
            let authors = Authors::from_registry(store.load()?, &source)?;

            let mut text = match journal {
                Journal::Aanda => aanda::render(
                    &authors,
                    &AandAOptions {
                        add_orcids: !no_orcids,
                        add_email: !no_email,
                        force_initials: !full_names,
                        ordering: ordering.clone(),
                    },
                ),
                Journal::Mnras => mnras::render(
                    &authors,
                    &MnrasOptions {
                        line_breaks,
                        force_initials: !full_names,
                        add_orcids: mnras_orcids,
                        ordering: ordering.clone(),
                    },
                ),
            };
            if show_acknowledgements {
                let texts = acknowledgements(&authors.resolve_list(&ordering));
                if !texts.is_empty() {
                    text.push('\n');
                    text.push_str(&texts.join("\n"));
                    text.push('\n');
                }
            }

            match output {
                Some(path) => std::fs::write(path, text)?,
                None => print!("{text}"),
            }
        }

        Commands::Query { name } => {
            let index = NameIndex::new(store.load()?);
            match index.resolve(&name) {
                Ok(found) => {
                    println!("{}", found.name);
                    print!("{}", serde_yaml::to_string(&found.record)?);
                }
                Err(err @ AuthorsError::NotFound(_)) => {
                    let names: Vec<&str> = index.registry().names().collect();
                    let suggestions = closest_matches(&name, &names, 3);
                    if !suggestions.is_empty() {
                        eprintln!("closest known authors: {}", suggestions.join("; "));
                    }
                    return Err(err);
                }
                Err(err) => return Err(err),
            }
        }

        Commands::Register {
            full_name,
            affiliations,
            email,
            orcid,
            labels,
        } => {
            let labels = (!labels.is_empty()).then_some(labels.as_slice());
            store.register_author(&full_name, &affiliations, email.as_deref(), orcid.as_deref(), labels)?;
        }

        Commands::Rename { old_name, new_name } => {
            store.update(|registry| Ok(registry.rename(&old_name, new_name)?))?;
        }
        Commands::SetEmail { name, email } => {
            store.update(|registry| Ok(registry.set_email(&name, email)?))?;
        }
        Commands::SetOrcid { name, orcid } => {
            store.update(|registry| Ok(registry.set_orcid(&name, orcid)?))?;
        }
        Commands::SetNickname { name, nickname } => {
            store.update(|registry| Ok(registry.set_nickname(&name, nickname)?))?;
        }
        Commands::SetSpelling { name, spelling } => {
            store.update(|registry| Ok(registry.set_spelling(&name, spelling)?))?;
        }
        Commands::SetAcknowledgements { name, text } => {
            store.update(|registry| Ok(registry.set_acknowledgements(&name, text)?))?;
        }
        Commands::SetAffiliations {
            name,
            affiliations,
            replace,
        } => {
            let strategy = if replace {
                UpdateStrategy::Replace
            } else {
                UpdateStrategy::Merge
            };
            let affiliations = affiliations.into_iter().map(Affiliation::plain).collect();
            store.update(|registry| Ok(registry.update_affiliations(&name, affiliations, strategy)?))?;
        }
        Commands::Delete { name } => {
            store.update(|registry| Ok(registry.delete(&name).map(|_| ())?))?;
        }
        Commands::ChangeAffiliation { old, new } => {
            let changed = store.update(|registry| Ok(registry.change_affiliation(&old, &new)))?;
            println!("{changed} authors updated");
        }
        Commands::SetLabel { affiliation, label } => {
            let changed = store.update(|registry| Ok(registry.set_affiliation_label(&affiliation, &label)))?;
            println!("{changed} authors updated");
        }

        Commands::Health { fix } => {
            let mut registry = store.load()?;
            let report = health_check(&registry, report_progress);
            eprintln!();
            print!("{report}");

            if fix && !report.similar_affiliations.is_empty() {
                let changed = merge_similar_affiliations(&mut registry, &report.similar_affiliations, ask_merge_choice);
                if changed > 0 {
                    store.save(&registry)?;
                }
                println!("{changed} authors updated");
            }
        }
    }
    Ok(())
}

fn report_progress(done: usize, total: usize) {
    eprint!("\rcomparing affiliations {done}/{total}");
}

fn ask_merge_choice(pair: &SimilarAffiliations) -> MergeChoice {
    println!("distance={}, score={:.3}", pair.distance, pair.score);
    println!(" {}", pair.first);
    println!(" {}", pair.second);
    loop {
        print!(" (1) keep first (2) keep second (3) keep both : ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => return MergeChoice::KeepBoth,
            Ok(_) => {}
        }
        match line.trim() {
            "1" => return MergeChoice::KeepFirst,
            "2" => return MergeChoice::KeepSecond,
            "3" => return MergeChoice::KeepBoth,
            _ => continue,
        }
    }
}
