use serde::Deserialize;
use std::path::PathBuf;

use crate::geometry::Bounds;

fn default_landmass_source() -> PathBuf {
    PathBuf::from("tmp/ne_10m_land.geojson")
}
fn default_landmask_output() -> PathBuf {
    PathBuf::from("public/data/us_landmask.geojson")
}
fn default_hex_source() -> PathBuf {
    PathBuf::from("public/chel2022_wgs84.geojson")
}
fn default_hex_output() -> PathBuf {
    PathBuf::from("public/chel2022_wgs84_clipped.geojson")
}

/// A named clip region for the landmask builder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Region {
    pub name: String,
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Region {
    pub fn new(name: &str, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            name: name.to_string(),
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }
}

/// The four US regions the landmask covers by default.
pub fn default_regions() -> Vec<Region> {
    vec![
        Region::new("continental", -130.0, 24.0, -65.0, 52.0),
        Region::new("alaska", -170.0, 50.0, -129.0, 72.0),
        Region::new("hawaii", -161.0, 18.0, -154.0, 23.0),
        Region::new("puerto_rico", -68.5, 17.5, -64.0, 19.0),
    ]
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_landmass_source")]
    pub landmass_source: PathBuf,
    #[serde(default = "default_landmask_output")]
    pub landmask_output: PathBuf,
    #[serde(default = "default_hex_source")]
    pub hex_source: PathBuf,
    #[serde(default = "default_hex_output")]
    pub hex_output: PathBuf,
    #[serde(default = "default_regions")]
    pub regions: Vec<Region>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            landmass_source: default_landmass_source(),
            landmask_output: default_landmask_output(),
            hex_source: default_hex_source(),
            hex_output: default_hex_output(),
            regions: default_regions(),
        }
    }
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("hexmask.toml"));
    paths.push(PathBuf::from(".hexmask.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("hexmask").join("config.toml"));
        paths.push(config_dir.join("hexmask.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".hexmask.toml"));
        paths.push(home.join(".config").join("hexmask").join("config.toml"));
    }

    paths
}
