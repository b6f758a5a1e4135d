//! Termlint CLI - Terminology-Driven Identifier Review
//!
//! Reviews source files against a terminology dictionary and reports
//! standardized naming suggestions, optionally applying them in place.

use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use termlint::core::file_utils::FileReader;
use termlint::{Convention, ReviewEngine, TermlintConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Terminology-driven identifier review
#[derive(Parser)]
#[command(name = "termlint")]
#[command(version = VERSION)]
#[command(about = "Review identifier names against a terminology dictionary")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a termlint YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Review a source file (or stdin) and print suggestions
    Review(ReviewArgs),
    /// Inspect and manage the terminology dictionary
    Terms(TermsArgs),
    /// Print the default configuration as YAML
    PrintDefaultConfig,
}

#[derive(Args)]
struct ReviewArgs {
    /// Source file to review; reads stdin when omitted
    path: Option<PathBuf>,

    /// Target naming convention (detected from the source when omitted)
    #[arg(long, value_enum)]
    convention: Option<ConventionArg>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Use evidence-aggregated analysis instead of the rule chain
    #[arg(long)]
    evidence: bool,

    /// Apply the suggestions and print the rewritten source
    #[arg(long, conflicts_with = "evidence")]
    fix: bool,
}

#[derive(Args)]
struct TermsArgs {
    #[command(subcommand)]
    command: TermsCommand,
}

#[derive(Subcommand)]
enum TermsCommand {
    /// Show dictionary statistics
    Stats,
    /// Search entries by substring
    Search { query: String },
    /// Add a custom term
    Add {
        /// Term name (standard form is derived from it)
        name: String,
        /// Preferred abbreviation
        #[arg(long, default_value = "")]
        abbreviation: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Extra aliases that should resolve to this term
        #[arg(long = "alias")]
        aliases: Vec<String>,
    },
    /// Delete a custom term by any of its keys
    Delete { key: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum ConventionArg {
    Snake,
    Camel,
    Pascal,
}

impl From<ConventionArg> for Convention {
    fn from(arg: ConventionArg) -> Self {
        match arg {
            ConventionArg::Snake => Convention::Snake,
            ConventionArg::Camel => Convention::Camel,
            ConventionArg::Pascal => Convention::Pascal,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => TermlintConfig::from_yaml_file(path)?,
        None => TermlintConfig::default(),
    };

    match cli.command {
        Commands::Review(args) => review_command(config, args),
        Commands::Terms(args) => terms_command(config, args),
        Commands::PrintDefaultConfig => {
            print!("{}", serde_yaml::to_string(&TermlintConfig::default())?);
            Ok(())
        }
    }
}

fn review_command(mut config: TermlintConfig, args: ReviewArgs) -> anyhow::Result<()> {
    if let Some(convention) = args.convention {
        config.analysis.convention = Some(convention.into());
    }
    let engine = ReviewEngine::new(config)?;

    let source = match &args.path {
        Some(path) => FileReader::read_with_encoding_fallback(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if args.evidence {
        let suggestions = engine.review_with_evidence(&source);
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&suggestions)?),
            OutputFormat::Text => {
                if suggestions.is_empty() {
                    println!("All identifier names follow the standard.");
                }
                for s in &suggestions {
                    println!(
                        "{} -> {} : {} (confidence: {:.0}%)",
                        s.original,
                        s.suggested,
                        s.reason.label(),
                        s.confidence * 100.0
                    );
                    for e in &s.evidence {
                        println!("  - {} (weight: {:.2})", e.detail, e.weight);
                    }
                    for (name, confidence) in &s.alternatives {
                        println!("  alt: {name} (confidence: {:.0}%)", confidence * 100.0);
                    }
                }
            }
        }
        return Ok(());
    }

    let report = engine.review(&source);

    if args.fix {
        let rewritten = engine.apply_suggestions(&source, &report.suggestions)?;
        print!("{rewritten}");
        return Ok(());
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => println!("{}", report.render_text()),
    }
    Ok(())
}

fn terms_command(config: TermlintConfig, args: TermsArgs) -> anyhow::Result<()> {
    let mut engine = ReviewEngine::new(config)?;

    match args.command {
        TermsCommand::Stats => {
            let stats = engine.store().stats();
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        TermsCommand::Search { query } => {
            let hits = engine.store().search(&query);
            if hits.is_empty() {
                println!("No matching terms.");
            }
            for entry in hits {
                println!("{} -> {} ({})", entry.term, entry.standard_form, entry.description);
            }
        }
        TermsCommand::Add {
            name,
            abbreviation,
            description,
            aliases,
        } => {
            if engine
                .store_mut()
                .add(&name, &abbreviation, &description, &aliases)
            {
                let saved = engine.save_custom_terms()?;
                println!("Added '{name}' ({saved} custom term(s) persisted).");
            } else {
                anyhow::bail!("could not derive a standard form for '{name}'");
            }
        }
        TermsCommand::Delete { key } => {
            if engine.store_mut().delete(&key) {
                let saved = engine.save_custom_terms()?;
                println!("Deleted '{key}' ({saved} custom term(s) persisted).");
            } else {
                anyhow::bail!("'{key}' is not a deletable custom term");
            }
        }
    }
    Ok(())
}
