//! wiki-crawl entry point
//!
//! This is the command-line interface for the Wikipedia category crawler.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wiki_category_crawler::config::{load_or_default, Config};
use wiki_category_crawler::crawler::{crawl, CrawlOptions, FailurePolicy, OutputMode};
use wiki_category_crawler::output::print_report;
use wiki_category_crawler::url::{available_languages, DEFAULT_LANGUAGE};
use wiki_category_crawler::CrawlError;

const EXAMPLES: &str = "Example usage:
    wiki-crawl -c \"Search_algorithms\" -o search-algorithms -l en
    wiki-crawl --category \"Avrupa_Yakası\" --output avrupa-yakasi --pdf --language tr";

/// Wikipedia Category Crawler
///
/// Downloads every article listed on a Wikipedia category page and writes
/// its paragraph text (or its PDF rendition) into an output directory.
#[derive(Parser, Debug)]
#[command(name = "wiki-crawl")]
#[command(version)]
#[command(about = "Wikipedia Category Crawler", long_about = None)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Wikipedia category to crawl (e.g. "Search_algorithms", "Alacakaranlık_filmleri")
    #[arg(short, long)]
    category: String,

    /// Output directory, created if missing
    #[arg(short, long, value_name = "DIR")]
    output: PathBuf,

    /// Wikipedia language edition (en, tr, or one declared in the config file)
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Download articles as PDF instead of text
    #[arg(long)]
    pdf: bool,

    /// Skip articles that fail and list them at the end instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report_error(&CrawlError::from(e)),
    };
    if let Some(path) = &cli.config {
        tracing::info!("Configuration loaded from {}", path.display());
    }

    if let Err(e) = check_language(&cli.language, &config) {
        e.exit();
    }

    match run(cli, &config).await {
        Ok(code) => code,
        Err(e) => report_error(&e),
    }
}

/// Prints the one-line `Error: <message>` form and fails
fn report_error(error: &CrawlError) -> ExitCode {
    tracing::debug!("Crawl failed: {:?}", error);
    println!("Error: {}", single_line(&error.to_string()));
    ExitCode::FAILURE
}

fn single_line(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rejects a language code no edition serves, as a usage error
///
/// The accepted codes depend on the configuration, so this runs after it is loaded.
fn check_language(language: &str, config: &Config) -> Result<(), clap::Error> {
    let available = available_languages(config);
    if available.iter().any(|code| code == language) {
        return Ok(());
    }

    Err(Cli::command().error(
        ErrorKind::InvalidValue,
        format!(
            "invalid value '{}' for '--language <LANGUAGE>'\n  [possible values: {}]",
            language,
            available.join(", ")
        ),
    ))
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG` wins over the flags when it is set.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("wiki_category_crawler=info,wiki_crawl=info,warn"),
                1 => EnvFilter::new("wiki_category_crawler=debug,wiki_crawl=debug,info"),
                2 => EnvFilter::new("wiki_category_crawler=trace,wiki_crawl=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the crawl and maps a partial keep-going run to a failing exit code
async fn run(cli: Cli, config: &Config) -> wiki_category_crawler::Result<ExitCode> {
    let options = CrawlOptions {
        category: cli.category,
        output_dir: cli.output,
        language: cli.language,
        mode: if cli.pdf {
            OutputMode::Pdf
        } else {
            OutputMode::Text
        },
        failure_policy: if cli.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::Abort
        },
        show_progress: !cli.quiet,
    };
    let keep_going = options.failure_policy == FailurePolicy::KeepGoing;

    let report = crawl(config, options).await?;

    if keep_going {
        print_report(&report);
    }

    if report.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
