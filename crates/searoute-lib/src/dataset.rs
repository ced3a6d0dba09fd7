//! Registry dataset value types and the providers that supply them.
//!
//! The engine never hard-codes its geography: every waypoint, land polygon,
//! shipping lane and weather zone arrives through a [`LandDataProvider`].
//! [`BuiltinDataset`] ships a coarse global dataset; [`JsonDatasetProvider`]
//! loads a replacement from disk so accuracy can improve without touching the
//! search code.

mod builtin;

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::geo::Coordinate;
use crate::hazard::Hazard;

pub use builtin::{BuiltinDataset, BUILTIN_DATASET_VERSION};

/// Kind of navigational point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointCategory {
    Port,
    Buoy,
    Light,
    Waypoint,
    Canal,
    Strait,
}

/// Named navigable point used as a routing graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: String,
    pub name: String,
    pub position: Coordinate,
    pub category: WaypointCategory,
    /// Charted depth in metres, when known.
    #[serde(default)]
    pub depth_m: Option<f64>,
    #[serde(default)]
    pub restrictions: BTreeSet<String>,
    #[serde(default)]
    pub weather_zone: Option<String>,
}

/// Closed polygon approximating a coastline. The closing edge is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandMass {
    pub name: String,
    pub vertices: Vec<Coordinate>,
}

/// Known commercial corridor expressed as an ordered coordinate sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingLane {
    pub name: String,
    pub points: Vec<Coordinate>,
}

impl ShippingLane {
    /// Great-circle length of the lane in nautical miles.
    pub fn length_nm(&self) -> f64 {
        crate::geo::path_length_nm(&self.points)
    }
}

/// Region with seasonal hazards (monsoon, cyclone or winter storm seasons).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherZone {
    pub id: String,
    pub name: String,
    /// Calendar months (1-12) during which `seasonal_hazards` apply.
    pub season_months: Vec<u32>,
    pub seasonal_hazards: Vec<Hazard>,
}

impl WeatherZone {
    pub fn in_season(&self, month: u32) -> bool {
        self.season_months.contains(&month)
    }
}

/// Complete, versioned input to the [`crate::registry::Registry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryDataset {
    pub version: String,
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub land_masses: Vec<LandMass>,
    #[serde(default)]
    pub shipping_lanes: Vec<ShippingLane>,
    #[serde(default)]
    pub weather_zones: Vec<WeatherZone>,
}

/// Source of registry data.
pub trait LandDataProvider: Send + Sync {
    /// Human readable description of where the data comes from.
    fn source(&self) -> String;

    /// Load the dataset. Validation happens in the registry, not here.
    fn load(&self) -> Result<RegistryDataset>;
}

impl LandDataProvider for RegistryDataset {
    fn source(&self) -> String {
        format!("in-memory dataset {}", self.version)
    }

    fn load(&self) -> Result<RegistryDataset> {
        Ok(self.clone())
    }
}

/// Loads a [`RegistryDataset`] serialized as JSON.
#[derive(Debug, Clone)]
pub struct JsonDatasetProvider {
    path: PathBuf,
}

impl JsonDatasetProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LandDataProvider for JsonDatasetProvider {
    fn source(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<RegistryDataset> {
        let file = File::open(&self.path)?;
        let dataset: RegistryDataset = serde_json::from_reader(BufReader::new(file))?;
        debug!(
            path = %self.path.display(),
            version = %dataset.version,
            waypoints = dataset.waypoints.len(),
            "loaded JSON dataset"
        );
        Ok(dataset)
    }
}

/// Write a dataset as pretty-printed JSON, e.g. to seed a
/// [`JsonDatasetProvider`] from the built-in data.
pub fn write_dataset_json(dataset: &RegistryDataset, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, dataset)?;
    writer.flush()?;
    Ok(())
}
