use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use anyhow::{Context as _, Error};
use clap::{Parser, ValueEnum};
use dominance_cli::{Graph, Query, Report};

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Compute the dominator tree of a control flow graph stored as JSON.
#[derive(Parser)]
struct Cli {
    file: PathBuf,
    /// Start from this vertex instead of the entry named in the file.
    #[arg(long)]
    entry: Option<String>,
    /// Ignore vertices that are not reachable from the entry instead of failing.
    #[arg(long)]
    prune_unreachable: bool,
    /// Also compute dominance frontiers.
    #[arg(long)]
    frontiers: bool,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Ask whether one vertex dominates another, written as `A:B`. May be repeated.
    #[arg(long = "query", value_name = "A:B")]
    queries: Vec<Query>,
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let graph = Graph::load(&cli.file)
        .with_context(|| format!("loading {}", cli.file.display()))?;

    let entry = cli.entry.as_deref().unwrap_or(graph.entry());
    let dominator = graph.dominator(entry, cli.prune_unreachable)?;
    log::info!("computed dominators of {} vertices", dominator.len());

    let report = Report::new(&dominator, cli.frontiers, &cli.queries);

    let mut stdout = io::stdout().lock();
    match cli.format {
        Format::Text => report.write_text(&mut stdout)?,
        Format::Json => {
            report.write_json(&mut stdout)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
