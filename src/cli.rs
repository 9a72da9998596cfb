use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::compact;
use crate::commands::create::{self, CreateOptions};
use crate::commands::export;
use crate::commands::list;
use crate::commands::search::{self, SearchOptions};
use crate::commands::stats;
use crate::commands::status;
use crate::commands::validate::{self, ValidateOptions};
use crate::commands::view::{self, ViewOptions};
use crate::commands::{CommandReport, GuideContext};
use crate::logging::{self, Verbosity};

const EXAMPLES: &str = "\
Examples:
  guide create
  guide search earth
  guide view towel";

/// Hitchhiker's Guide article manager.
///
/// Creates, indexes, searches, and validates the articles that ship on the
/// device's SD card.
#[derive(Debug, Parser)]
#[command(name = "guide", version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Print the command report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new article (prompts for anything not passed as a flag)
    Create(CreateArgs),
    /// List all articles grouped by category
    List,
    /// Search article titles
    Search {
        #[arg(required = true, num_args = 1.., value_name = "TERM")]
        term: Vec<String>,
    },
    /// View an article
    View {
        #[arg(required = true, num_args = 1.., value_name = "TITLE")]
        title: Vec<String>,
    },
    /// Check the index against the article files
    Validate {
        /// Exit non-zero when any issue is found
        #[arg(long)]
        strict: bool,
    },
    /// Show word and category statistics
    Stats,
    /// Show instructions for copying the guide to an SD card
    Export,
    /// Rewrite the index without blank lines
    Compact,
    /// Show resolved paths and configuration
    Status,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Article title
    #[arg(long)]
    pub title: Option<String>,
    /// Category name or menu number
    #[arg(long)]
    pub category: Option<String>,
    /// Article body
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,
    /// Read the article body from a file
    #[arg(long, value_name = "FILE")]
    pub content_file: Option<PathBuf>,
}

impl From<CreateArgs> for CreateOptions {
    fn from(args: CreateArgs) -> Self {
        Self {
            title: args.title,
            category: args.category,
            content: args.content,
            content_file: args.content_file,
        }
    }
}

fn render(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for line in &report.details {
        println!("{line}");
    }
    if !report.issues.is_empty() {
        println!();
        println!("✗ Found {} issue(s):", report.issues.len());
        for issue in &report.issues {
            println!("  • {issue}");
        }
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    let Some(command) = cli.command else {
        Cli::command().print_long_help()?;
        return Ok(());
    };

    let ctx = GuideContext::load()?;
    let validate_opts = ValidateOptions {
        strict: matches!(command, Command::Validate { strict: true }),
    };
    let report = match command {
        Command::Create(args) => create::run(&ctx, &args.into())?,
        Command::List => list::run(&ctx)?,
        Command::Search { term } => search::run(
            &ctx,
            &SearchOptions {
                query: term.join(" "),
            },
        )?,
        Command::View { title } => view::run(
            &ctx,
            &ViewOptions {
                query: title.join(" "),
            },
        )?,
        Command::Validate { .. } => validate::run(&ctx)?,
        Command::Stats => stats::run(&ctx)?,
        Command::Export => export::run(&ctx)?,
        Command::Compact => compact::run(&ctx)?,
        Command::Status => status::run(&ctx)?,
    };

    render(&report, cli.json)?;

    if validate_opts.strict && !report.ok {
        anyhow::bail!("strict validate failed: {} issue(s)", report.issues.len());
    }
    Ok(())
}
