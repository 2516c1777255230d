mod app;
mod config;
mod gallery;
mod util;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui::vec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::GridConfig;
use gallery::{LayoutResult, Simulation};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with grid and force tunables.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    items: Option<usize>,

    #[arg(long)]
    columns_min: Option<usize>,

    /// Fixes the random stream so runs are reproducible.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1600.0)]
    width: f32,

    #[arg(long, default_value_t = 1000.0)]
    height: f32,

    /// Solve the grid for `--width`×`--height`, print it as JSON and exit.
    #[arg(long)]
    print_layout: bool,
}

#[derive(Serialize)]
struct LayoutReport<'a> {
    viewport: [f32; 2],
    layout: &'a LayoutResult,
    anchors: Vec<[f32; 2]>,
    edges: &'a [(usize, usize)],
}

fn load_config(args: &Args) -> Result<GridConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading grid config");
            GridConfig::load(path)?
        }
        None => GridConfig::default(),
    };
    if let Some(items) = args.items {
        config.total_items = items;
    }
    if let Some(columns_min) = args.columns_min {
        config.columns_min = columns_min;
    }
    config.validate().context("invalid grid configuration")?;
    Ok(config)
}

fn print_layout(args: &Args, config: GridConfig) -> Result<()> {
    let rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let mut simulation = Simulation::new(config, rng);
    simulation.resize(vec2(args.width, args.height));

    let report = LayoutReport {
        viewport: [args.width, args.height],
        layout: simulation.layout(),
        anchors: simulation
            .nodes()
            .iter()
            .map(|node| [node.anchor.x, node.anchor.y])
            .collect(),
        edges: simulation.edges(),
    };
    let json = serde_json::to_string_pretty(&report).context("failed to encode layout")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    if args.print_layout {
        return print_layout(&args, config);
    }

    info!(
        items = config.total_items,
        columns_min = config.columns_min,
        "starting tile mesh"
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    let seed = args.seed;
    eframe::run_native(
        "tile-mesh",
        options,
        Box::new(move |cc| Ok(Box::new(app::TileMeshApp::new(cc, config, seed)))),
    )
    .map_err(|err| anyhow!("failed to run window: {err}"))
}
