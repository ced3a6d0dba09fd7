//! Alternative route strategies.
//!
//! Each strategy produces at most one candidate independently of the
//! primary search. [`generate_alternatives`] runs them in parallel under a
//! shared budget, drops failures and removes duplicates.

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::geo::{haversine_nm, path_length_nm, Coordinate};
use crate::graph::RoutingGraph;
use crate::land::LandAvoidance;
use crate::path::{find_route_a_star, EdgeWeighting, SearchBudget, SearchQuery};
use crate::registry::{Registry, WaypointId};

use super::chain_coordinates;

/// Candidate route offered next to the primary one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeRoute {
    /// Name of the strategy that produced the candidate.
    pub strategy: String,
    pub waypoints: Vec<Coordinate>,
    /// Great-circle length of `waypoints`, origin and destination legs included.
    pub distance_nm: f64,
}

/// Read-only state a strategy needs to build its candidate.
#[derive(Clone, Copy)]
pub struct AlternativeContext<'a> {
    pub registry: &'a Registry,
    pub graph: &'a RoutingGraph,
    pub oracle: &'a LandAvoidance,
    pub config: &'a EngineConfig,
    pub origin: Coordinate,
    pub destination: Coordinate,
    /// Waypoint nearest to `origin`.
    pub start: WaypointId,
    /// Waypoint nearest to `destination`.
    pub goal: WaypointId,
    /// Query used for the primary search; strategies may add a weighting.
    pub query: SearchQuery<'a>,
}

/// A way of producing one alternative route.
pub trait AlternativeStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Build the candidate coordinate chain, origin to destination.
    fn generate(
        &self,
        context: &AlternativeContext<'_>,
        budget: &SearchBudget,
    ) -> Result<Vec<Coordinate>>;
}

/// Northern band, southern band, then the best shipping lane.
pub fn default_strategies() -> Vec<Arc<dyn AlternativeStrategy>> {
    vec![
        Arc::new(LatitudeBand::North),
        Arc::new(LatitudeBand::South),
        Arc::new(ShippingLaneStrategy),
    ]
}

/// Run every strategy, keeping candidates that differ from `primary` and
/// from each other. Output follows strategy order.
pub fn generate_alternatives(
    context: &AlternativeContext<'_>,
    strategies: &[Arc<dyn AlternativeStrategy>],
    primary: &[Coordinate],
    budget: &SearchBudget,
) -> Vec<AlternativeRoute> {
    let results: Vec<(&'static str, Result<Vec<Coordinate>>)> = strategies
        .par_iter()
        .map(|strategy| (strategy.name(), strategy.generate(context, budget)))
        .collect();

    let mut accepted: Vec<AlternativeRoute> = Vec::new();
    for (name, result) in results {
        let waypoints = match result {
            Ok(waypoints) => waypoints,
            Err(err) => {
                warn!(strategy = name, error = %err, "alternative route discarded");
                continue;
            }
        };
        let duplicate = same_track(&waypoints, primary)
            || accepted
                .iter()
                .any(|route| same_track(&route.waypoints, &waypoints));
        if duplicate {
            debug!(strategy = name, "alternative route duplicates an earlier one");
            continue;
        }
        accepted.push(AlternativeRoute {
            strategy: name.to_string(),
            distance_nm: path_length_nm(&waypoints),
            waypoints,
        });
    }
    accepted
}

fn same_track(a: &[Coordinate], b: &[Coordinate]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.approx_eq(y, 1e-9))
}

/// Latitude-biased search: edges whose midpoint lies on the disfavoured side
/// of the origin/destination mean latitude cost more.
///
/// The multiplier is `1 + weight * min(1, deviation / 90°)`, with the weight
/// taken from [`EngineConfig::latitude_bias_weight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatitudeBand {
    North,
    South,
}

impl AlternativeStrategy for LatitudeBand {
    fn name(&self) -> &'static str {
        match self {
            LatitudeBand::North => "northern",
            LatitudeBand::South => "southern",
        }
    }

    fn generate(
        &self,
        context: &AlternativeContext<'_>,
        budget: &SearchBudget,
    ) -> Result<Vec<Coordinate>> {
        let bias = BandBias {
            band: *self,
            reference_latitude: (context.origin.latitude + context.destination.latitude) / 2.0,
            weight: context.config.latitude_bias_weight,
        };
        let query = context.query.with_weighting(&bias);
        let path = find_route_a_star(
            context.graph,
            context.registry,
            context.start,
            context.goal,
            &query,
            budget,
        )?;
        let nodes = path
            .iter()
            .filter_map(|id| context.registry.get(*id))
            .map(|waypoint| waypoint.position);
        Ok(chain_coordinates(context.origin, nodes, context.destination))
    }
}

struct BandBias {
    band: LatitudeBand,
    reference_latitude: f64,
    weight: f64,
}

impl EdgeWeighting for BandBias {
    fn multiplier(&self, from: &Coordinate, to: &Coordinate) -> f64 {
        let midpoint = (from.latitude + to.latitude) / 2.0;
        let deviation = match self.band {
            LatitudeBand::North => self.reference_latitude - midpoint,
            LatitudeBand::South => midpoint - self.reference_latitude,
        };
        1.0 + self.weight * (deviation.max(0.0) / 90.0).min(1.0)
    }
}

/// Follow the single shipping lane that minimises
/// `start -> lane start + lane length + lane end -> goal`, trying each lane in
/// both directions.
///
/// `start` and `goal` are the waypoints the request snapped to, so the lane
/// is joined from open water even when the requested endpoints lie inland.
/// Every leg from `start` through the lane to `goal` must be a safe passage at
/// the configured margin; otherwise the candidate fails with
/// [`Error::UnsafeRoute`]. The snapping legs to the requested endpoints are
/// shared with the primary route and are not re-certified.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShippingLaneStrategy;

impl AlternativeStrategy for ShippingLaneStrategy {
    fn name(&self) -> &'static str {
        "shipping_lane"
    }

    fn generate(
        &self,
        context: &AlternativeContext<'_>,
        budget: &SearchBudget,
    ) -> Result<Vec<Coordinate>> {
        budget.check()?;
        let start = context
            .registry
            .get(context.start)
            .ok_or(Error::NoWaypoints)?
            .position;
        let goal = context
            .registry
            .get(context.goal)
            .ok_or(Error::NoWaypoints)?
            .position;

        let mut best: Option<(f64, &str, Vec<Coordinate>)> = None;
        for lane in context.registry.shipping_lanes() {
            let (Some(first), Some(last)) = (lane.points.first(), lane.points.last()) else {
                continue;
            };
            let length = lane.length_nm();
            let forward = haversine_nm(&start, first) + length + haversine_nm(last, &goal);
            let backward = haversine_nm(&start, last) + length + haversine_nm(first, &goal);
            let (cost, points) = if backward < forward {
                (backward, lane.points.iter().rev().copied().collect())
            } else {
                (forward, lane.points.clone())
            };
            if best.as_ref().map_or(true, |(current, _, _)| cost < *current) {
                best = Some((cost, lane.name.as_str(), points));
            }
        }

        let Some((_, lane, points)) = best else {
            return Err(Error::UnsafeRoute {
                message: "dataset defines no shipping lanes".to_string(),
            });
        };
        let track = chain_coordinates(start, points, goal);
        let margin = context.config.safety_margin_nm;
        if let Some(index) = track
            .windows(2)
            .position(|leg| !context.oracle.is_safe_passage(leg[0], leg[1], margin))
        {
            return Err(Error::UnsafeRoute {
                message: format!(
                    "leg {index} of the {lane} lane route passes within {margin} nm of land"
                ),
            });
        }
        Ok(chain_coordinates(context.origin, track, context.destination))
    }
}
