//! Shared fixtures for integration tests.
//!
//! The island dataset is small enough to reason about by hand: a 10°×10°
//! square island centred on (0, 0) with one waypoint to the west, east,
//! north and south of it, plus an unreachable waypoint in the Southern
//! Ocean. The northern passage is slightly shorter than the southern one.

#![allow(dead_code)]

use std::collections::BTreeSet;

use searoute_lib::{
    Coordinate, EngineConfig, Hazard, LandMass, RegistryDataset, RouteEngine, ShippingLane,
    Waypoint, WaypointCategory, WeatherZone,
};

pub const WEST: (f64, f64) = (0.0, -12.0);
pub const EAST: (f64, f64) = (0.0, 12.0);
pub const NORTH: (f64, f64) = (10.0, 0.0);
pub const SOUTH: (f64, f64) = (-10.5, 0.0);
pub const ISOLATED: (f64, f64) = (-60.0, 150.0);

pub fn coord(point: (f64, f64)) -> Coordinate {
    Coordinate::from(point)
}

pub fn waypoint(id: &str, position: (f64, f64), category: WaypointCategory) -> Waypoint {
    Waypoint {
        id: id.to_string(),
        name: id.replace('_', " "),
        position: coord(position),
        category,
        depth_m: None,
        restrictions: BTreeSet::new(),
        weather_zone: None,
    }
}

pub fn island_dataset() -> RegistryDataset {
    let mut north = waypoint("north_passage", NORTH, WaypointCategory::Waypoint);
    north.weather_zone = Some("island_monsoon".to_string());
    let mut south = waypoint("south_passage", SOUTH, WaypointCategory::Waypoint);
    south.depth_m = Some(400.0);

    RegistryDataset {
        version: "island-test".to_string(),
        waypoints: vec![
            waypoint("west_port", WEST, WaypointCategory::Port),
            waypoint("east_port", EAST, WaypointCategory::Port),
            north,
            south,
            waypoint("isolated_buoy", ISOLATED, WaypointCategory::Buoy),
        ],
        land_masses: vec![LandMass {
            name: "square_island".to_string(),
            vertices: vec![
                coord((-5.0, -5.0)),
                coord((-5.0, 5.0)),
                coord((5.0, 5.0)),
                coord((5.0, -5.0)),
            ],
        }],
        shipping_lanes: vec![ShippingLane {
            name: "southern_corridor".to_string(),
            points: vec![coord(WEST), coord(SOUTH), coord(EAST)],
        }],
        weather_zones: vec![WeatherZone {
            id: "island_monsoon".to_string(),
            name: "Island monsoon".to_string(),
            season_months: vec![6, 7, 8],
            seasonal_hazards: vec![Hazard::Storm],
        }],
    }
}

/// Passage legs are roughly 950 nm, so the direct-edge limit is raised.
pub fn island_config() -> EngineConfig {
    EngineConfig {
        max_direct_connection_nm: 1_500.0,
        ..EngineConfig::default()
    }
}

pub fn island_engine() -> RouteEngine {
    RouteEngine::new(&island_dataset(), island_config()).expect("island engine builds")
}

pub fn builtin_engine() -> RouteEngine {
    RouteEngine::builtin().expect("built-in engine builds")
}

/// Planar midpoint of a leg, unwrapping longitude across the antimeridian.
pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    let mut delta = b.longitude - a.longitude;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    let mut longitude = a.longitude + delta / 2.0;
    if longitude > 180.0 {
        longitude -= 360.0;
    } else if longitude < -180.0 {
        longitude += 360.0;
    }
    Coordinate::from(((a.latitude + b.latitude) / 2.0, longitude))
}
