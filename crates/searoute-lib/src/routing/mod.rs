//! Route assembly: the engine that ties registry, graph, search and scoring
//! together.
//!
//! This module provides:
//! - [`RouteRequest`] - origin/destination plus optimization preferences
//! - [`OptimizedRoute`] - the serializable result handed back to callers
//! - [`RouteEngine`] - immutable, shareable engine built once at startup
//!
//! # Example
//!
//! ```no_run
//! use searoute_lib::{Coordinate, OptimizationMode, RouteEngine, RouteRequest};
//!
//! let engine = RouteEngine::builtin()?;
//! let request = RouteRequest::new(
//!     Coordinate::new(51.9244, 4.4777)?,
//!     Coordinate::new(1.2905, 103.8520)?,
//! )
//! .with_mode(OptimizationMode::Balanced);
//! let route = engine.route(&request)?;
//! println!("{:.0} nm, {:?}", route.total_distance_nm, route.route_type);
//! # Ok::<(), searoute_lib::Error>(())
//! ```

mod alternatives;

pub use alternatives::{
    default_strategies, generate_alternatives, AlternativeContext, AlternativeRoute,
    AlternativeStrategy, LatitudeBand, ShippingLaneStrategy,
};

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::dataset::{BuiltinDataset, LandDataProvider, Waypoint};
use crate::error::{Error, Result};
use crate::geo::{path_length_nm, Coordinate};
use crate::graph::{build_graph, RoutingGraph};
use crate::hazard::Hazard;
use crate::land::{DetourOptions, LandAvoidance};
use crate::path::{
    find_route_a_star, OptimizationMode, PathConstraints, SearchBudget, SearchQuery,
};
use crate::registry::{Registry, WaypointId};
use crate::safety::safety_score;
use crate::segment::{RouteSegment, SegmentSynthesizer};
use crate::spatial::SpatialIndex;
use crate::weather::WeatherSnapshot;

/// Distance classification of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    /// Under 100 nm.
    Coastal,
    /// Under 1000 nm.
    Regional,
    /// Under 3000 nm.
    Oceanic,
    Transoceanic,
}

impl RouteType {
    pub fn classify(distance_nm: f64) -> Self {
        if distance_nm < 100.0 {
            RouteType::Coastal
        } else if distance_nm < 1_000.0 {
            RouteType::Regional
        } else if distance_nm < 3_000.0 {
            RouteType::Oceanic
        } else {
            RouteType::Transoceanic
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteType::Coastal => "coastal",
            RouteType::Regional => "regional",
            RouteType::Oceanic => "oceanic",
            RouteType::Transoceanic => "transoceanic",
        };
        f.write_str(value)
    }
}

fn default_vessel_type() -> String {
    "container".to_string()
}

fn default_true() -> bool {
    true
}

/// A single routing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    #[serde(default)]
    pub optimization_mode: OptimizationMode,
    /// Echoed in the response; does not change the segment model.
    #[serde(default = "default_vessel_type")]
    pub vessel_type: String,
    #[serde(default)]
    pub weather_data: Option<WeatherSnapshot>,
    /// Waypoints within the configured radius of any of these points are not
    /// used as intermediate stops.
    #[serde(default)]
    pub avoid_areas: Vec<Coordinate>,
    /// Departure time; defaults to the time of the request.
    #[serde(default)]
    pub departure: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub include_alternatives: bool,
}

impl RouteRequest {
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            optimization_mode: OptimizationMode::default(),
            vessel_type: default_vessel_type(),
            weather_data: None,
            avoid_areas: Vec::new(),
            departure: None,
            include_alternatives: true,
        }
    }

    pub fn with_mode(mut self, mode: OptimizationMode) -> Self {
        self.optimization_mode = mode;
        self
    }

    pub fn with_vessel_type(mut self, vessel_type: impl Into<String>) -> Self {
        self.vessel_type = vessel_type.into();
        self
    }

    pub fn with_weather(mut self, weather: WeatherSnapshot) -> Self {
        self.weather_data = Some(weather);
        self
    }

    pub fn avoiding(mut self, point: Coordinate) -> Self {
        self.avoid_areas.push(point);
        self
    }

    pub fn departing_at(mut self, departure: DateTime<Utc>) -> Self {
        self.departure = Some(departure);
        self
    }

    pub fn without_alternatives(mut self) -> Self {
        self.include_alternatives = false;
        self
    }

    fn validate(&self) -> Result<()> {
        self.origin.validate()?;
        self.destination.validate()?;
        for point in &self.avoid_areas {
            point.validate()?;
        }
        Ok(())
    }
}

/// Fully assembled route returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedRoute {
    pub origin: Coordinate,
    pub destination: Coordinate,
    /// Origin, every routed waypoint, destination.
    pub waypoints: Vec<Coordinate>,
    pub segments: Vec<RouteSegment>,
    pub total_distance_nm: f64,
    pub total_time_hours: f64,
    pub total_fuel_mt: f64,
    pub optimization_mode: OptimizationMode,
    pub vessel_type: String,
    pub weather_warnings: BTreeSet<Hazard>,
    pub safety_score: f64,
    pub route_type: RouteType,
    pub estimated_arrival: DateTime<Utc>,
    pub alternative_routes: Vec<AlternativeRoute>,
}

/// Route planner holding the immutable registry, spatial index, land oracle
/// and routing graph.
///
/// Construction is the only expensive step. The engine is `Send + Sync` and
/// cheap to clone, so one instance can serve concurrent requests.
#[derive(Clone)]
pub struct RouteEngine {
    config: EngineConfig,
    registry: Arc<Registry>,
    index: Arc<SpatialIndex>,
    oracle: Arc<LandAvoidance>,
    graph: RoutingGraph,
    strategies: Vec<Arc<dyn AlternativeStrategy>>,
}

impl fmt::Debug for RouteEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEngine")
            .field("dataset", &self.registry.version())
            .field("waypoints", &self.registry.len())
            .field("edges", &self.graph.edge_count())
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl RouteEngine {
    /// Load the provider's dataset and build every derived structure.
    pub fn new(provider: &dyn LandDataProvider, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let started = Instant::now();
        let registry = Registry::from_provider(provider)?;
        let index = SpatialIndex::build(&registry);
        let oracle = LandAvoidance::new(registry.land_masses());
        let graph = build_graph(&registry, &index, &oracle, &config.graph_options());
        info!(
            dataset = %registry.version(),
            waypoints = registry.len(),
            edges = graph.edge_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "route engine ready"
        );

        Ok(Self {
            config,
            registry: Arc::new(registry),
            index: Arc::new(index),
            oracle: Arc::new(oracle),
            graph,
            strategies: default_strategies(),
        })
    }

    /// Engine over the built-in dataset with default configuration.
    pub fn builtin() -> Result<Self> {
        Self::new(&BuiltinDataset, EngineConfig::default())
    }

    /// Replace the alternative-route strategies.
    pub fn with_strategies(mut self, strategies: Vec<Arc<dyn AlternativeStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn spatial_index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn land(&self) -> &LandAvoidance {
        &self.oracle
    }

    pub fn graph(&self) -> &RoutingGraph {
        &self.graph
    }

    /// Plan a route without a deadline.
    pub fn route(&self, request: &RouteRequest) -> Result<OptimizedRoute> {
        self.route_with_budget(request, &SearchBudget::unlimited())
    }

    /// Plan a route, aborting the primary search when `budget` runs out.
    ///
    /// Alternatives share the budget, further limited by the configured
    /// alternative timeout; their failures never fail the request.
    pub fn route_with_budget(
        &self,
        request: &RouteRequest,
        budget: &SearchBudget,
    ) -> Result<OptimizedRoute> {
        request.validate()?;

        let start = self.index.nearest(request.origin)?.id;
        let goal = self.index.nearest(request.destination)?.id;
        let constraints = PathConstraints {
            avoided: self.avoided_waypoints(&request.avoid_areas, start, goal),
        };
        let query = SearchQuery::new(request.optimization_mode, &constraints)
            .with_weather(request.weather_data.as_ref(), self.config.weather_thresholds());

        let path = find_route_a_star(&self.graph, &self.registry, start, goal, &query, budget)?;

        let departure = request.departure.unwrap_or_else(Utc::now);
        let synthesizer =
            SegmentSynthesizer::new(&self.registry, &self.graph, &self.oracle, &self.config);
        let segments =
            synthesizer.synthesize(&path, request.weather_data.as_ref(), departure.month());

        // Folding from +0.0 keeps an empty route at 0.0 rather than -0.0.
        let total_distance_nm = segments.iter().fold(0.0, |acc, s| acc + s.distance_nm);
        let total_time_hours = segments
            .iter()
            .fold(0.0, |acc, s| acc + s.estimated_time_hours);
        let total_fuel_mt = segments
            .iter()
            .fold(0.0, |acc, s| acc + s.fuel_consumption_mt);
        let weather_warnings: BTreeSet<Hazard> = segments
            .iter()
            .flat_map(|segment| segment.hazards.iter().cloned())
            .collect();
        let safety_score = safety_score(&segments);
        let waypoints = self.coordinates_for(request.origin, &path, request.destination);
        let route_type = RouteType::classify(path_length_nm(&waypoints));

        let alternative_routes = if request.include_alternatives && start != goal {
            let context = AlternativeContext {
                registry: &self.registry,
                graph: &self.graph,
                oracle: &self.oracle,
                config: &self.config,
                origin: request.origin,
                destination: request.destination,
                start,
                goal,
                query,
            };
            let deadline = Instant::now() + self.config.alternative_timeout();
            generate_alternatives(
                &context,
                &self.strategies,
                &waypoints,
                &budget.tightened(deadline),
            )
        } else {
            Vec::new()
        };

        debug!(
            mode = %request.optimization_mode,
            hops = path.len().saturating_sub(1),
            distance_nm = total_distance_nm,
            safety_score,
            alternatives = alternative_routes.len(),
            "assembled route"
        );

        Ok(OptimizedRoute {
            origin: request.origin,
            destination: request.destination,
            waypoints,
            segments,
            total_distance_nm,
            total_time_hours,
            total_fuel_mt,
            optimization_mode: request.optimization_mode,
            vessel_type: request.vessel_type.clone(),
            weather_warnings,
            safety_score,
            route_type,
            estimated_arrival: arrival_time(departure, total_time_hours),
            alternative_routes,
        })
    }

    /// Route between two registry waypoints identified by id.
    ///
    /// Unknown ids fail with [`Error::UnknownWaypoint`] carrying the closest
    /// matching ids.
    pub fn waypoint_path(
        &self,
        from: &str,
        to: &str,
        mode: OptimizationMode,
    ) -> Result<Vec<&Waypoint>> {
        let start = self.registry.resolve(from)?;
        let goal = self.registry.resolve(to)?;
        let constraints = PathConstraints::default();
        let query = SearchQuery::new(mode, &constraints);
        let path = find_route_a_star(
            &self.graph,
            &self.registry,
            start,
            goal,
            &query,
            &SearchBudget::unlimited(),
        )?;
        Ok(path.into_iter().filter_map(|id| self.registry.get(id)).collect())
    }

    /// Chain of safe legs between two arbitrary points, threading through
    /// registry waypoints when the straight leg is unsafe.
    pub fn direct_passage(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<Coordinate>> {
        origin.validate()?;
        destination.validate()?;
        let candidates: Vec<Coordinate> = self
            .registry
            .all_waypoints()
            .iter()
            .map(|waypoint| waypoint.position)
            .collect();
        let options = DetourOptions {
            safety_margin_nm: self.config.safety_margin_nm,
            max_leg_nm: self.config.max_direct_connection_nm,
            max_expansions: self.config.max_detour_expansions,
        };
        self.oracle
            .find_detour(origin, destination, &candidates, &options)
    }

    pub fn nearest_waypoint(&self, coordinate: Coordinate) -> Result<&Waypoint> {
        coordinate.validate()?;
        let neighbour = self.index.nearest(coordinate)?;
        self.registry.get(neighbour.id).ok_or(Error::NoWaypoints)
    }

    fn avoided_waypoints(
        &self,
        areas: &[Coordinate],
        start: WaypointId,
        goal: WaypointId,
    ) -> HashSet<WaypointId> {
        areas
            .iter()
            .flat_map(|area| self.index.within_radius_nm(*area, self.config.avoid_radius_nm))
            .map(|neighbour| neighbour.id)
            .filter(|id| *id != start && *id != goal)
            .collect()
    }

    fn coordinates_for(
        &self,
        origin: Coordinate,
        path: &[WaypointId],
        destination: Coordinate,
    ) -> Vec<Coordinate> {
        let nodes = path
            .iter()
            .filter_map(|id| self.registry.get(*id))
            .map(|waypoint| waypoint.position);
        chain_coordinates(origin, nodes, destination)
    }
}

/// `origin`, `points`, `destination` with consecutive repeats collapsed.
pub(crate) fn chain_coordinates(
    origin: Coordinate,
    points: impl IntoIterator<Item = Coordinate>,
    destination: Coordinate,
) -> Vec<Coordinate> {
    let mut chain: Vec<Coordinate> = Vec::new();
    for point in std::iter::once(origin)
        .chain(points)
        .chain(std::iter::once(destination))
    {
        if chain.last().is_some_and(|last| last.approx_eq(&point, 1e-9)) {
            continue;
        }
        chain.push(point);
    }
    chain
}

fn arrival_time(departure: DateTime<Utc>, hours: f64) -> DateTime<Utc> {
    let millis = (hours * 3_600_000.0).round();
    if !millis.is_finite() {
        return departure;
    }
    TimeDelta::try_milliseconds(millis as i64)
        .and_then(|delta| departure.checked_add_signed(delta))
        .unwrap_or(departure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn classify_uses_documented_boundaries() {
        assert_eq!(RouteType::classify(0.0), RouteType::Coastal);
        assert_eq!(RouteType::classify(99.9), RouteType::Coastal);
        assert_eq!(RouteType::classify(100.0), RouteType::Regional);
        assert_eq!(RouteType::classify(999.0), RouteType::Regional);
        assert_eq!(RouteType::classify(2_999.0), RouteType::Oceanic);
        assert_eq!(RouteType::classify(8_330.0), RouteType::Transoceanic);
    }

    #[test]
    fn chain_collapses_repeated_points() {
        let a = Coordinate::from((1.0, 1.0));
        let b = Coordinate::from((2.0, 2.0));
        assert_eq!(chain_coordinates(a, [a, b], b), vec![a, b]);
        assert_eq!(chain_coordinates(a, [a], a), vec![a]);
    }

    #[test]
    fn arrival_adds_fractional_hours() {
        let departure = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let arrival = arrival_time(departure, 1.5);
        assert_eq!(arrival, Utc.with_ymd_and_hms(2024, 3, 1, 13, 30, 0).unwrap());
        assert_eq!(arrival_time(departure, f64::NAN), departure);
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let request: RouteRequest = serde_json::from_str(
            r#"{
                "origin": {"latitude": 51.9, "longitude": 4.5},
                "destination": {"latitude": 1.3, "longitude": 103.9},
                "optimization_mode": "fuel"
            }"#,
        )
        .expect("parse request");
        assert_eq!(request.optimization_mode, OptimizationMode::Fuel);
        assert_eq!(request.vessel_type, "container");
        assert!(request.include_alternatives);
        assert!(request.avoid_areas.is_empty());
    }
}
