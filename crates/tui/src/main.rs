mod config;
mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use worklane_core::loader::load_layout;
use worklane_core::model::YearMonth;
use worklane_core::selection::Selection;
use worklane_core::svg::render_timeline_svg;

use crate::config::FileConfig;

/// Work-history timeline viewer
#[derive(Debug, Parser)]
#[command(name = "worklane", version, about)]
struct Args {
    /// JSON file with the experience records
    records: PathBuf,

    /// Month treated as "now" for ongoing roles (YYYY-MM); defaults to today
    #[arg(long)]
    now: Option<YearMonth>,

    /// TOML file with `[layout]` and `[style]` tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the timeline as SVG to this path instead of opening the viewer
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Light palette for SVG export
    #[arg(long)]
    light: bool,

    /// SVG width in pixels
    #[arg(long, default_value_t = 960.0)]
    width: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("worklane_core=warn,worklane_tui=warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let now = args
        .now
        .unwrap_or_else(|| YearMonth::from_date(chrono::Local::now().date_naive()));

    let data = std::fs::read(&args.records)
        .with_context(|| format!("reading {}", args.records.display()))?;
    let layout = load_layout(&data, now, &config.layout)
        .with_context(|| format!("loading {}", args.records.display()))?;
    tracing::info!(
        entries = layout.len(),
        tracks = layout.track_count,
        span = layout.span_months,
        "timeline ready"
    );

    if let Some(path) = &args.svg {
        let svg = render_timeline_svg(&layout, &Selection::none(), args.width, &config.style, !args.light);
        std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
        return Ok(());
    }

    renderer::render_tui(&layout)?;
    Ok(())
}
