//! Marine route optimization engine.
//!
//! Given an origin, a destination and an optimization preference, the engine
//! finds a land-avoiding sea route across a graph of named waypoints and
//! annotates it with distance, time, fuel, hazards and a safety score.
//!
//! The pipeline is built once at startup and is read-only afterwards:
//! a [`Registry`] loaded from a [`LandDataProvider`], a [`SpatialIndex`] for
//! nearest-waypoint lookup, a [`LandAvoidance`] oracle and an immutable
//! [`RoutingGraph`]. Requests go through [`RouteEngine::route`].

pub mod config;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod graph;
pub mod hazard;
pub mod land;
pub mod logging;
pub mod path;
pub mod registry;
pub mod routing;
pub mod safety;
pub mod segment;
pub mod spatial;
pub mod weather;

pub use config::EngineConfig;
pub use dataset::{
    write_dataset_json, BuiltinDataset, JsonDatasetProvider, LandDataProvider, LandMass,
    RegistryDataset, ShippingLane, Waypoint, WaypointCategory, WeatherZone,
    BUILTIN_DATASET_VERSION,
};
pub use error::{Error, Result};
pub use geo::{haversine_nm, Coordinate};
pub use graph::{build_graph, Edge, EdgeKind, GraphBuildOptions, RoutingGraph};
pub use hazard::Hazard;
pub use land::{DetourOptions, LandAvoidance};
pub use path::{find_route_a_star, CancelFlag, OptimizationMode, PathConstraints, SearchBudget};
pub use registry::{Registry, WaypointId};
pub use routing::{
    AlternativeRoute, AlternativeStrategy, LatitudeBand, OptimizedRoute, RouteEngine,
    RouteRequest, RouteType, ShippingLaneStrategy,
};
pub use safety::safety_score;
pub use segment::{CurrentEffects, RouteSegment, SegmentSynthesizer};
pub use spatial::{Neighbour, SpatialIndex};
pub use weather::{WeatherSnapshot, WeatherThresholds};
