//! Validated, read-only catalog of waypoints and hazard geography.

use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::dataset::{
    LandDataProvider, LandMass, RegistryDataset, ShippingLane, Waypoint, WeatherZone,
};
use crate::error::{Error, Result};

/// Index of a waypoint inside the registry; used as the routing graph node id.
pub type WaypointId = usize;

/// Minimum similarity (normalized Levenshtein) for an id to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.5;

/// Immutable waypoint and hazard catalog built from a [`RegistryDataset`].
#[derive(Debug, Clone)]
pub struct Registry {
    version: String,
    waypoints: Vec<Waypoint>,
    ids: HashMap<String, WaypointId>,
    land_masses: Vec<LandMass>,
    shipping_lanes: Vec<ShippingLane>,
    weather_zones: HashMap<String, WeatherZone>,
}

impl Registry {
    /// Load and validate the dataset supplied by `provider`.
    pub fn from_provider(provider: &dyn LandDataProvider) -> Result<Self> {
        let dataset = provider.load()?;
        let registry = Self::from_dataset(dataset)?;
        info!(
            source = %provider.source(),
            version = %registry.version,
            waypoints = registry.waypoints.len(),
            land_masses = registry.land_masses.len(),
            shipping_lanes = registry.shipping_lanes.len(),
            weather_zones = registry.weather_zones.len(),
            "loaded waypoint registry"
        );
        Ok(registry)
    }

    /// Validate `dataset` and build the registry.
    ///
    /// Fails on duplicate or empty waypoint ids, invalid coordinates,
    /// polygons with fewer than three vertices, lanes with fewer than two
    /// points and dangling weather-zone references.
    pub fn from_dataset(dataset: RegistryDataset) -> Result<Self> {
        let RegistryDataset {
            version,
            waypoints,
            land_masses,
            shipping_lanes,
            weather_zones,
        } = dataset;

        let mut zones = HashMap::new();
        for zone in weather_zones {
            if let Some(month) = zone.season_months.iter().find(|m| !(1..=12).contains(*m)) {
                return Err(invalid(format!(
                    "weather zone {} has invalid month {month}",
                    zone.id
                )));
            }
            if zones.contains_key(&zone.id) {
                return Err(invalid(format!("duplicate weather zone {}", zone.id)));
            }
            zones.insert(zone.id.clone(), zone);
        }

        let mut ids = HashMap::with_capacity(waypoints.len());
        for (index, waypoint) in waypoints.iter().enumerate() {
            if waypoint.id.trim().is_empty() {
                return Err(invalid(format!("waypoint at position {index} has an empty id")));
            }
            waypoint.position.validate()?;
            if let Some(depth) = waypoint.depth_m {
                if !depth.is_finite() || depth < 0.0 {
                    return Err(invalid(format!(
                        "waypoint {} has invalid depth {depth}",
                        waypoint.id
                    )));
                }
            }
            if let Some(zone) = &waypoint.weather_zone {
                if !zones.contains_key(zone) {
                    return Err(invalid(format!(
                        "waypoint {} references unknown weather zone {zone}",
                        waypoint.id
                    )));
                }
            }
            if ids.insert(waypoint.id.clone(), index).is_some() {
                return Err(Error::DuplicateWaypoint {
                    id: waypoint.id.clone(),
                });
            }
        }

        let mut names = HashSet::new();
        for land in &land_masses {
            if land.vertices.len() < 3 {
                return Err(invalid(format!(
                    "land mass {} needs at least three vertices",
                    land.name
                )));
            }
            if !names.insert(land.name.as_str()) {
                return Err(invalid(format!("duplicate land mass {}", land.name)));
            }
            for vertex in &land.vertices {
                vertex.validate()?;
            }
        }

        for lane in &shipping_lanes {
            if lane.points.len() < 2 {
                return Err(invalid(format!(
                    "shipping lane {} needs at least two points",
                    lane.name
                )));
            }
            for point in &lane.points {
                point.validate()?;
            }
        }

        Ok(Self {
            version,
            waypoints,
            ids,
            land_masses,
            shipping_lanes,
            weather_zones: zones,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn all_waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn land_masses(&self) -> &[LandMass] {
        &self.land_masses
    }

    pub fn shipping_lanes(&self) -> &[ShippingLane] {
        &self.shipping_lanes
    }

    pub fn weather_zone(&self, id: &str) -> Option<&WeatherZone> {
        self.weather_zones.get(id)
    }

    pub fn weather_zones(&self) -> impl Iterator<Item = &WeatherZone> {
        self.weather_zones.values()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.get(id)
    }

    /// Node id for a waypoint identifier, if present.
    pub fn index_of(&self, id: &str) -> Option<WaypointId> {
        self.ids.get(id).copied()
    }

    /// Resolve a waypoint identifier, suggesting close matches when unknown.
    pub fn resolve(&self, id: &str) -> Result<WaypointId> {
        self.index_of(id).ok_or_else(|| Error::UnknownWaypoint {
            id: id.to_string(),
            suggestions: self.fuzzy_matches(id, 3),
        })
    }

    /// Up to `limit` waypoint ids most similar to `query`, best first.
    pub fn fuzzy_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .waypoints
            .iter()
            .map(|waypoint| {
                let by_id = strsim::normalized_levenshtein(&needle, &waypoint.id);
                let by_name =
                    strsim::normalized_levenshtein(&needle, &waypoint.name.to_lowercase());
                (by_id.max(by_name), waypoint.id.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_string())
            .collect()
    }

    /// Human readable label used in error messages.
    pub(crate) fn label(&self, id: WaypointId) -> String {
        self.get(id)
            .map(|waypoint| waypoint.id.clone())
            .unwrap_or_else(|| format!("#{id}"))
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidDataset { message }
}
