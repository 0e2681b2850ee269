//! Townmap CLI - render town government-form choropleth maps from GeoJSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use townmap_core::{read_geojson, ConicConformal, FeatureCollection};
use townmap_render::{
    render, CategoryPalette, MapStyle, Rgb, UnknownCategory, TYPE_PROPERTY,
};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "townmap")]
#[command(author, version, about = "Render a town government-form choropleth from GeoJSON", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the choropleth map to an SVG file
    Render {
        /// Input GeoJSON file
        #[arg(default_value = "json/TOWNS_POLYM.geo.json")]
        input: PathBuf,
        /// Output SVG file
        #[arg(default_value = "towns.svg")]
        output: PathBuf,
        /// Fail on category codes outside the palette instead of filling gray
        #[arg(long)]
        strict: bool,
    },
    /// Show information about a GeoJSON file
    Info {
        /// Input GeoJSON file
        input: PathBuf,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_collection(path: &PathBuf) -> Result<FeatureCollection> {
    let pb = spinner("Reading GeoJSON...");
    let collection = read_geojson(path).context("Failed to read GeoJSON")?;
    pb.finish_and_clear();
    info!("Input: {} features", collection.len());
    Ok(collection)
}

fn done(name: &str, path: &PathBuf, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            input,
            output,
            strict,
        } => {
            let collection = read_collection(&input)?;
            let style = MapStyle {
                unknown: if strict {
                    UnknownCategory::Strict
                } else {
                    UnknownCategory::Fallback(Rgb::GRAY)
                },
                ..MapStyle::default()
            };

            let start = Instant::now();
            let document = render(
                &collection,
                &ConicConformal::mass_state_plane(),
                &CategoryPalette::government_forms(),
                &style,
            )
            .context("Failed to render map")?;
            let elapsed = start.elapsed();

            let pb = spinner("Writing output...");
            svg::save(&output, &document).context("Failed to write output")?;
            pb.finish_and_clear();
            done("Choropleth", &output, elapsed);
        }

        Commands::Info { input } => {
            let collection = read_collection(&input)?;
            println!("File: {}", input.display());
            println!("Features: {}", collection.len());
            if let Some((min_x, min_y, max_x, max_y)) = collection.bounds() {
                println!(
                    "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                    min_x, min_y, max_x, max_y
                );
            }

            let palette = CategoryPalette::government_forms();
            let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
            for feature in collection.iter() {
                let code = feature.string_property(TYPE_PROPERTY).unwrap_or("(none)");
                *tally.entry(code).or_default() += 1;
            }

            println!("\nGovernment forms:");
            for (code, count) in tally {
                match palette.lookup(code) {
                    Some(entry) => println!("  {} ({}): {}", code, entry.label, count),
                    None => println!("  {} (outside palette): {}", code, count),
                }
            }
        }
    }

    Ok(())
}
