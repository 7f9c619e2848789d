use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use arxfeed::config::{default_config_path, Config, OutputFormat};
use arxfeed::feed::{self, EntryFailure, FailurePolicy, ParsedRecord};
use arxfeed::util::{single_line, strip_control_chars};

#[derive(Parser, Debug)]
#[command(
    name = "arxfeed",
    about = "List new arXiv submissions from a downloaded RSS feed"
)]
struct Args {
    /// Feed document to read (`-` for stdin)
    #[arg(long, value_name = "FILE")]
    feed: Option<PathBuf>,

    /// Subject code to list, e.g. hep-th
    #[arg(long)]
    category: Option<String>,

    /// List every parsed entry, including updates and cross-lists
    #[arg(long)]
    all: bool,

    /// Print the selected records as JSON
    #[arg(long)]
    json: bool,

    /// Abort on the first malformed entry instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Config file (default: ~/.config/arxfeed/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Loads the config file and applies command line overrides on top.
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match args.config.clone().or_else(default_config_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => Config::default(),
    };

    if let Some(category) = &args.category {
        config.category = category.clone();
    }
    if let Some(feed) = &args.feed {
        config.feed = Some(feed.clone());
    }
    if args.all {
        config.include_updated = true;
        config.include_cross_lists = true;
    }
    if args.json {
        config.output = OutputFormat::Json;
    }
    if args.strict {
        config.on_error = FailurePolicy::Abort;
    }
    Ok(config)
}

fn print_text(out: &mut impl Write, selected: &[(usize, &ParsedRecord)]) -> std::io::Result<()> {
    for (index, record) in selected {
        writeln!(
            out,
            "{}. {}",
            index,
            single_line(&strip_control_chars(&record.title))
        )?;
        let authors: Vec<_> = record
            .authors
            .iter()
            .map(|name| strip_control_chars(name))
            .collect();
        writeln!(out, "{}", authors.join(", "))?;
        writeln!(out)?;
    }
    Ok(())
}

fn report_failures(failures: &[EntryFailure]) {
    if failures.is_empty() {
        return;
    }
    eprintln!("Skipped {} malformed entries:", failures.len());
    for failure in failures {
        eprintln!("  {}", strip_control_chars(&failure.to_string()));
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for --json
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;

    let Some(feed_path) = config.feed.clone() else {
        let url = feed::feed_url(&config.category);
        eprintln!("Error: No feed document given");
        eprintln!();
        eprintln!("Download the {} feed and pass it with --feed:", config.category);
        eprintln!("  curl -o {}.xml {}", config.category, url);
        eprintln!("  arxfeed --feed {}.xml", config.category);
        std::process::exit(1);
    };

    let bytes = feed::read_feed(&feed_path)
        .with_context(|| format!("Failed to read feed '{}'", feed_path.display()))?;
    let entries = feed::parse_feed(&bytes).context("Failed to parse feed")?;
    tracing::info!(entries = entries.len(), path = %feed_path.display(), "Loaded feed");

    let assembly = feed::assemble_with(&entries, config.on_error)
        .context("Aborted on malformed feed entry")?;

    let selected: Vec<(usize, &ParsedRecord)> = assembly
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| config.selects(record))
        .collect();

    let mut out = std::io::stdout().lock();
    match config.output {
        OutputFormat::Text => print_text(&mut out, &selected)?,
        OutputFormat::Json => {
            let records: Vec<&ParsedRecord> = selected.iter().map(|(_, r)| *r).collect();
            serde_json::to_writer_pretty(&mut out, &records)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    report_failures(&assembly.failures);
    Ok(())
}
