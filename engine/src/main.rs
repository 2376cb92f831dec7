// Headless driver: evaluates every panel for one selection.
use anyhow::{bail, Context, Result};
use clap::Parser;
use engine::config::DashboardSettings;
use engine::data::DataContext;
use engine::services::dashboard::{JsonLinesSink, LogSink, PanelSink};
use engine::services::{Dashboard, Selection};
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "District statistics panels", long_about = None)]
struct Cli {
    /// JSON settings file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Territory to compare against the reference territory
    #[arg(short, long)]
    territory: Option<String>,

    /// Show period-over-period relative change instead of absolute values
    #[arg(long)]
    relative: bool,

    /// Emit one JSON object per panel on stdout
    #[arg(long)]
    json: bool,

    /// Print the selectable territories and exit
    #[arg(long)]
    list_territories: bool,
}

fn main() -> Result<()> {
    // stdout carries panel output (`--json`), logs go to stderr.
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => DashboardSettings::load_from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => DashboardSettings::default(),
    };
    info!(data_dir = %settings.data_dir.display(), reference = %settings.reference_territory, "Loading statistical tables");

    let ctx = DataContext::load(&settings).context("failed to load statistical tables")?;
    let territories = ctx.territories();

    if cli.list_territories {
        for territory in &territories {
            println!("{}", territory);
        }
        return Ok(());
    }

    let territory = cli
        .territory
        .unwrap_or_else(|| settings.reference_territory.clone());
    if !territories.contains(&territory) {
        bail!("unknown territory '{}'; use --list-territories", territory);
    }

    let dashboard = Dashboard::from_settings(&settings)?;
    let selection = Selection::new(territory).relative_change(cli.relative);

    let mut sink: Box<dyn PanelSink> = if cli.json {
        Box::new(JsonLinesSink::new(io::stdout().lock()))
    } else {
        Box::new(LogSink)
    };
    let rendered = dashboard.render(&ctx, &selection, sink.as_mut())?;
    info!(panels = rendered, "Dashboard rendered");

    Ok(())
}
