//! Command line front-end for resolving presence snapshots into activity cards.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use activity_card::card::follow_presence;
use activity_card::logging;
use activity_card::presence::load_snapshot;
use activity_card::team::team_entries;
use activity_card::{AssetResolver, JsonLinesPresence, PresenceSource, ResolverConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

/// Top-level CLI for the activity card.
#[derive(Debug, Parser)]
#[command(name = "activity-card")]
#[command(about = "Resolve presence snapshots into portfolio activity cards", long_about = None)]
struct Cli {
    /// Resolver configuration JSON; defaults to `activity.config.json` when present.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a single asset descriptor into an image URL.
    Resolve {
        /// Asset descriptor, e.g. `spotify:<id>` or `mp:external/...`.
        descriptor: String,
        /// First-party application id owning the asset.
        #[arg(long)]
        application_id: Option<String>,
    },

    /// Render card states for a JSON-lines stream of presence snapshots.
    Cards {
        /// Snapshot stream; stdin when omitted.
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Initial snapshot used until live data carries activities.
        #[arg(long, value_name = "FILE")]
        initial: Option<PathBuf>,
    },

    /// Print the work-history entries.
    Team,
}

fn main() {
    logging::init_logging();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("activity-card error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let resolver = AssetResolver::new(load_config(cli.config.as_deref())?);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Command::Resolve {
            descriptor,
            application_id,
        } => {
            let image = resolver.resolve_descriptor(Some(&descriptor), application_id.as_deref());
            tracing::info!(source = ?image.source, "resolved descriptor");
            writeln!(out, "{}", image.url)?;
        }
        Command::Cards { input, initial } => {
            let initial = initial
                .as_deref()
                .map(load_snapshot)
                .transpose()
                .context("failed to load initial snapshot")?;

            let mut source: Box<dyn PresenceSource> = match input {
                Some(path) => Box::new(JsonLinesPresence::open(&path)?),
                None => Box::new(JsonLinesPresence::new(io::stdin().lock())),
            };

            let mut write_result: Result<()> = Ok(());
            follow_presence(source.as_mut(), initial.as_ref(), &resolver, |state| {
                if write_result.is_ok() {
                    write_result = serde_json::to_writer(&mut out, &state)
                        .map_err(anyhow::Error::from)
                        .and_then(|()| writeln!(out).map_err(anyhow::Error::from));
                }
            })
            .context("failed to read presence snapshots")?;
            write_result.context("failed to write card state")?;
        }
        Command::Team => {
            serde_json::to_writer_pretty(&mut out, &team_entries())?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ResolverConfig> {
    match path {
        Some(path) => ResolverConfig::load_from_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("failed to resolve working directory")?;
            Ok(ResolverConfig::discover(&cwd))
        }
    }
}
