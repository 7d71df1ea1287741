//! # matchbook-cli
//!
//! Command-line interface for converting league spreadsheets and browsing
//! the matches they record.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use matchbook_events::{group_document, GroupingOptions, MatchReport};
use matchbook_sheet::{Book, ContentRule, Document, NormalizeOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// matchbook - league spreadsheet export and match browser
#[derive(Parser)]
#[command(name = "matchbook")]
#[command(author, version, about = "League spreadsheet export and match browser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Convert workbook or CSV sources into the JSON document
    Convert {
        /// Workbook (xlsx, xls, ods) or CSV files
        #[arg(value_name = "SOURCE", required = true)]
        sources: Vec<PathBuf>,

        /// Where to write the document
        #[arg(
            short,
            long,
            env = "MATCHBOOK_OUTPUT",
            default_value = "client/public/data.json"
        )]
        output: PathBuf,

        /// Also drop records whose values are all falsy (0, "", false)
        #[arg(long)]
        truthy: bool,
    },

    /// Group a document's records by match and report on them
    Matches {
        /// JSON document written by `convert`
        #[arg(value_name = "DOCUMENT", env = "MATCHBOOK_DATA")]
        document: PathBuf,

        /// Sheet holding one record per player per match
        #[arg(long, default_value = "Elo_Player_All")]
        sheet: String,

        /// Field carrying the match identifier
        #[arg(long, default_value = "match_id")]
        event_field: String,

        /// Field carrying the player name
        #[arg(long, default_value = "player_name")]
        player_field: String,

        /// Field carrying the rating after the match
        #[arg(long, default_value = "player_elo_after")]
        rating_field: String,

        /// Number of earliest matches to show
        #[arg(long, default_value_t = 5)]
        head: usize,

        /// Number of latest matches to show
        #[arg(long, default_value_t = 3)]
        tail: usize,

        /// Output format (table, json)
        #[arg(short = 'f', long = "format", default_value = "table")]
        format: OutputFormat,
    },
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable summary (default)
    #[default]
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    match cli.command {
        Command::Convert {
            sources,
            output,
            truthy,
        } => {
            let rule = if truthy {
                ContentRule::Truthy
            } else {
                ContentRule::Present
            };
            let doc = convert(&sources, &output, rule)?;
            print_conversion(&doc, &output);
            Ok(())
        }
        Command::Matches {
            document,
            sheet,
            event_field,
            player_field,
            rating_field,
            head,
            tail,
            format,
        } => {
            let options = GroupingOptions::default()
                .with_sheet(&sheet)
                .with_event_field(&event_field)
                .with_player_field(&player_field)
                .with_rating_field(&rating_field);
            let report = match_report(&document, &options, head, tail)?;
            print_report(&report, format)
        }
    }
}

/// Load every source, normalize it and write the document to `output`.
fn convert(sources: &[PathBuf], output: &Path, rule: ContentRule) -> Result<Document> {
    for source in sources {
        tracing::debug!(source = %source.display(), "loading source");
    }

    let book = Book::from_files(sources).context("Failed to load sources")?;
    tracing::info!(sheets = book.sheet_count(), "loaded sources");
    let doc = book.to_document(&NormalizeOptions::default().with_content_rule(rule));

    doc.save_as_json(output)
        .with_context(|| format!("Failed to write document: {}", output.display()))?;

    Ok(doc)
}

/// Load a document, group its matches and summarize them.
fn match_report(
    document: &Path,
    options: &GroupingOptions,
    head: usize,
    tail: usize,
) -> Result<MatchReport> {
    let doc = Document::from_json(document)
        .with_context(|| format!("Failed to read document: {}", document.display()))?;

    let index = group_document(&doc, options)
        .with_context(|| format!("Failed to group matches in '{}'", options.sheet))?;

    Ok(index.report(head, tail))
}

fn print_conversion(doc: &Document, output: &Path) {
    println!(
        "{} {} ({} sheets, {} records)",
        "Wrote".green().bold(),
        output.display(),
        doc.sheet_count(),
        doc.total_records()
    );
    for (sheet, count) in doc.summary() {
        println!("  {} {count} records", format!("{sheet}:").cyan());
    }
}

fn print_report(report: &MatchReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            println!("{}", "Match overview".cyan().bold());
            print!("{report}");
        }
    }
    Ok(())
}
