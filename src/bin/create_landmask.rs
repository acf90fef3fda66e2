use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

use hexmask::config::FileConfig;
use hexmask::geojson;
use hexmask::landmask;

/// Build the simplified US landmask from a world landmass dataset
///
/// Clips the landmass to the continental US, Alaska, Hawaii and Puerto
/// Rico bounding boxes and unions the pieces into a single-feature
/// FeatureCollection consumed by clip-hexes.
#[derive(Parser, Debug)]
#[command(name = "create-landmask")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches hexmask.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    if !config.landmass_source.exists() {
        bail!(
            "Source GeoJSON not found at {}. Download it before running create-landmask.",
            config.landmass_source.display()
        );
    }

    let spinner = create_spinner("Loading world landmass dataset...");
    let start = Instant::now();
    let source = geojson::read_collection(&config.landmass_source)?;
    spinner.finish_with_message(format!(
        "Loaded {} landmass features [{:.1}s]",
        source.features.len(),
        start.elapsed().as_secs_f32()
    ));

    if source.features.is_empty() {
        bail!("The source GeoJSON has no features.");
    }

    let spinner = create_spinner(format!(
        "Clipping landmass to {} regions and merging...",
        config.regions.len()
    ));
    let start = Instant::now();
    let mask = landmask::build(&source.features, &config.regions)
        .context("Failed to build the landmask")?;
    let geometry_type = mask.features[0]
        .geometry
        .as_ref()
        .map(|g| g.type_name())
        .unwrap_or("unknown");
    spinner.finish_with_message(format!(
        "Built landmask ({}) [{:.1}s]",
        geometry_type,
        start.elapsed().as_secs_f32()
    ));

    geojson::write_collection(&config.landmask_output, &mask)
        .context("Failed to write the landmask")?;
    println!("Generated {}", config.landmask_output.display());

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

fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
