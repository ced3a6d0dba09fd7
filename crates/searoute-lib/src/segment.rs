//! Turns a waypoint path into annotated route segments.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::dataset::Waypoint;
use crate::geo::{haversine_nm, Coordinate};
use crate::graph::{EdgeKind, RoutingGraph};
use crate::hazard::Hazard;
use crate::land::LandAvoidance;
use crate::registry::{Registry, WaypointId};
use crate::weather::WeatherSnapshot;

/// Wave height above which speed drops 30% and fuel burn rises 30%.
pub const ROUGH_SEA_WAVE_HEIGHT_M: f64 = 4.0;
/// Wind speed above which speed drops 20% and fuel burn rises 20%.
pub const STRONG_WIND_SPEED_MS: f64 = 20.0;
/// Wave height above which a segment is tagged "high waves".
pub const HIGH_WAVES_HAZARD_M: f64 = 6.0;
/// Wind speed above which a segment is tagged "high winds".
pub const HIGH_WINDS_HAZARD_MS: f64 = 25.0;

/// Assumed head current used until live current data is available.
const PLACEHOLDER_CURRENT_KNOTS: f64 = 0.5;

/// Estimated effect of ocean currents on a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentEffects {
    pub speed_knots: f64,
    /// Direction the current sets towards, degrees clockwise from north.
    pub direction_deg: f64,
    pub speed_reduction_pct: f64,
}

/// One leg of a route between two consecutive path waypoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
    pub start: Coordinate,
    pub end: Coordinate,
    pub distance_nm: f64,
    pub estimated_time_hours: f64,
    pub fuel_consumption_mt: f64,
    pub weather_conditions: WeatherSnapshot,
    pub hazards: BTreeSet<Hazard>,
    /// Shallowest charted depth of the two endpoints, in metres.
    pub depth_restriction: f64,
    pub current_effects: CurrentEffects,
    pub edge_kind: Option<EdgeKind>,
}

/// Builds [`RouteSegment`]s for node paths found in the routing graph.
pub struct SegmentSynthesizer<'a> {
    registry: &'a Registry,
    graph: &'a RoutingGraph,
    oracle: &'a LandAvoidance,
    config: &'a EngineConfig,
}

impl<'a> SegmentSynthesizer<'a> {
    pub fn new(
        registry: &'a Registry,
        graph: &'a RoutingGraph,
        oracle: &'a LandAvoidance,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            registry,
            graph,
            oracle,
            config,
        }
    }

    /// One segment per consecutive pair in `path`.
    ///
    /// `month` (1-12) selects which weather-zone seasonal hazards apply.
    pub fn synthesize(
        &self,
        path: &[WaypointId],
        weather: Option<&WeatherSnapshot>,
        month: u32,
    ) -> Vec<RouteSegment> {
        let empty = WeatherSnapshot::default();
        let weather = weather.unwrap_or(&empty);
        path.windows(2)
            .filter_map(|pair| {
                let from = self.registry.get(pair[0])?;
                let to = self.registry.get(pair[1])?;
                let edge = self.graph.edge(pair[0], pair[1]);
                let distance = edge
                    .map(|edge| edge.distance)
                    .unwrap_or_else(|| haversine_nm(&from.position, &to.position));
                Some(self.segment(from, to, distance, edge.map(|e| e.kind), weather, month))
            })
            .collect()
    }

    fn segment(
        &self,
        from: &Waypoint,
        to: &Waypoint,
        distance_nm: f64,
        edge_kind: Option<EdgeKind>,
        weather: &WeatherSnapshot,
        month: u32,
    ) -> RouteSegment {
        let wave_height = weather.wave_height_m();
        let wind_speed = weather.wind_speed_ms();

        let mut speed = self.config.base_speed_knots;
        let mut fuel_rate = self.config.base_fuel_mt_per_100nm;
        if wave_height > ROUGH_SEA_WAVE_HEIGHT_M {
            speed *= 0.7;
            fuel_rate *= 1.3;
        }
        if wind_speed > STRONG_WIND_SPEED_MS {
            speed *= 0.8;
            fuel_rate *= 1.2;
        }

        let mut hazards = BTreeSet::new();
        if !self
            .oracle
            .is_safe_passage(from.position, to.position, self.config.safety_margin_nm)
        {
            hazards.insert(Hazard::CloseToLand);
        }
        if wave_height > HIGH_WAVES_HAZARD_M {
            hazards.insert(Hazard::HighWaves);
        }
        if wind_speed > HIGH_WINDS_HAZARD_MS {
            hazards.insert(Hazard::HighWinds);
        }
        if weather.has_storm_warning() {
            hazards.insert(Hazard::Storm);
        }
        for waypoint in [from, to] {
            hazards.extend(
                waypoint
                    .restrictions
                    .iter()
                    .filter_map(|tag| Hazard::from_restriction(tag)),
            );
            if waypoint
                .depth_m
                .is_some_and(|depth| depth < self.config.shallow_water_depth_m)
            {
                hazards.insert(Hazard::ShallowWater);
            }
            if let Some(zone) = waypoint
                .weather_zone
                .as_deref()
                .and_then(|id| self.registry.weather_zone(id))
            {
                if zone.in_season(month) {
                    hazards.extend(zone.seasonal_hazards.iter().cloned());
                }
            }
        }

        let depth_restriction = from
            .depth_m
            .unwrap_or(self.config.default_depth_m)
            .min(to.depth_m.unwrap_or(self.config.default_depth_m));

        let bearing = from.position.initial_bearing(&to.position);
        let current_effects = CurrentEffects {
            speed_knots: PLACEHOLDER_CURRENT_KNOTS,
            direction_deg: (bearing + 180.0) % 360.0,
            speed_reduction_pct: PLACEHOLDER_CURRENT_KNOTS / self.config.base_speed_knots * 100.0,
        };

        RouteSegment {
            start: from.position,
            end: to.position,
            distance_nm,
            estimated_time_hours: distance_nm / speed,
            fuel_consumption_mt: distance_nm / 100.0 * fuel_rate,
            weather_conditions: weather.clone(),
            hazards,
            depth_restriction,
            current_effects,
            edge_kind,
        }
    }
}
