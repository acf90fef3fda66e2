use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

use hexmask::config::FileConfig;
use hexmask::geojson::{self, FeatureCollection};
use hexmask::hexclip::{self, ClipStats};

/// Clip the environmental hex grid to the US landmask
///
/// Reads the landmask produced by create-landmask, intersects every hex
/// with it and writes the surviving hexes (clipped or kept whole) with
/// their original properties and ids.
#[derive(Parser, Debug)]
#[command(name = "clip-hexes")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches hexmask.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    if !config.hex_source.exists() {
        bail!("Hex source not found at {}", config.hex_source.display());
    }
    if !config.landmask_output.exists() {
        bail!(
            "US landmask not found at {}. Please run create-landmask first.",
            config.landmask_output.display()
        );
    }

    println!("Loading US landmask (country boundary)...");
    let landmask = geojson::read_collection(&config.landmask_output)?;
    if let Some(geometry) = landmask.features.first().and_then(|f| f.geometry.as_ref()) {
        println!(
            "Using US country boundary for clipping (type: {})",
            geometry.type_name()
        );
    }

    println!("Loading hex data...");
    let source = geojson::read_collection(&config.hex_source)?;
    if source.features.is_empty() {
        bail!("Hex source has no features.");
    }

    println!(
        "Clipping {} hexes to US country boundary...",
        source.features.len()
    );
    let start = Instant::now();
    let bar = ProgressBar::new(source.features.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.green} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );
    let mut observer = |done: usize, stats: &ClipStats| {
        bar.set_position(done as u64);
        if done % 100 == 0 {
            bar.set_message(format!(
                "clipped: {}, kept: {}, skipped: {}",
                stats.clipped, stats.kept, stats.skipped
            ));
        }
    };

    let (features, stats) = hexclip::clip(&source.features, &landmask, Some(&mut observer))
        .context("Failed to clip hexes against the landmask")?;
    bar.finish_and_clear();

    let output = FeatureCollection::new(features);
    geojson::write_collection(&config.hex_output, &output)
        .context("Failed to write clipped hexes")?;

    println!(
        "\nWrote {} features to {} [{:.1}s]",
        output.features.len(),
        config.hex_output.display(),
        start.elapsed().as_secs_f32()
    );
    println!("  - Clipped: {}", stats.clipped);
    println!("  - Kept original (inside): {}", stats.kept);
    println!("  - Skipped (outside): {}", stats.skipped);

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    if let Some(config_path) = path {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str(&contents).context("Failed to parse config file")
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        Ok(FileConfig::load().unwrap_or_default())
    }
}
