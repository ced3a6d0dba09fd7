use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::geo::haversine_nm;
use crate::land::LandAvoidance;
use crate::registry::{Registry, WaypointId};
use crate::spatial::SpatialIndex;

/// Provenance of an edge in the routing graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    ShippingLane,
    Direct,
}

/// Edge within the routing graph.
#[derive(Debug, Clone)]
pub struct Edge {
    pub target: WaypointId,
    pub kind: EdgeKind,
    /// Great-circle length in nautical miles.
    pub distance: f64,
}

/// Parameters for [`build_graph`].
#[derive(Debug, Clone, Copy)]
pub struct GraphBuildOptions {
    /// Land clearance required for direct edges.
    pub safety_margin_nm: f64,
    /// Longest direct edge considered.
    pub max_direct_connection_nm: f64,
}

impl Default for GraphBuildOptions {
    fn default() -> Self {
        Self {
            safety_margin_nm: 10.0,
            max_direct_connection_nm: 500.0,
        }
    }
}

/// Immutable, undirected waypoint graph shared by every search.
#[derive(Debug, Clone, Default)]
pub struct RoutingGraph {
    adjacency: Arc<HashMap<WaypointId, Vec<Edge>>>,
    edge_count: usize,
}

impl RoutingGraph {
    /// Return the neighbours for a given waypoint.
    pub fn neighbours(&self, node: WaypointId) -> &[Edge] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The edge joining `from` and `to`, if any.
    pub fn edge(&self, from: WaypointId, to: WaypointId) -> Option<&Edge> {
        self.neighbours(from).iter().find(|edge| edge.target == to)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Every undirected edge once, as `(lower id, edge to higher id)`.
    pub fn edges(&self) -> impl Iterator<Item = (WaypointId, &Edge)> + '_ {
        self.adjacency.iter().flat_map(|(&from, edges)| {
            edges
                .iter()
                .filter(move |edge| from < edge.target)
                .map(move |edge| (from, edge))
        })
    }
}

/// Build the routing graph from the registry.
///
/// 1. Every waypoint becomes a node.
/// 2. Consecutive points of each shipping lane are snapped to their nearest
///    waypoints and joined by a `shipping_lane` edge, provided the leg does
///    not cross land. Lane edges are not held to the safety margin; segments
///    that pass closer are tagged as close to land instead.
/// 3. Every pair within `max_direct_connection_nm` whose leg is a safe
///    passage at `safety_margin_nm` gets a `direct` edge.
///
/// A pair joined by both kinds keeps a single `shipping_lane` edge.
pub fn build_graph(
    registry: &Registry,
    index: &SpatialIndex,
    oracle: &LandAvoidance,
    options: &GraphBuildOptions,
) -> RoutingGraph {
    let waypoints = registry.all_waypoints();
    let mut edges: BTreeMap<(WaypointId, WaypointId), Edge> = BTreeMap::new();

    for lane in registry.shipping_lanes() {
        let snapped: Vec<WaypointId> = lane
            .points
            .iter()
            .filter_map(|point| index.nearest(*point).ok())
            .map(|neighbour| neighbour.id)
            .collect();

        for pair in snapped.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a == b {
                continue;
            }
            let (from, to) = (&waypoints[a], &waypoints[b]);
            if let Some(land) = oracle.crossed_land_mass(from.position, to.position) {
                warn!(
                    lane = %lane.name,
                    from = %from.id,
                    to = %to.id,
                    land,
                    "skipping shipping lane leg that crosses land"
                );
                continue;
            }
            edges.insert(
                key(a, b),
                Edge {
                    target: a.max(b),
                    kind: EdgeKind::ShippingLane,
                    distance: haversine_nm(&from.position, &to.position),
                },
            );
        }
    }

    let mut direct = 0usize;
    for (a, waypoint) in waypoints.iter().enumerate() {
        for neighbour in
            index.within_radius_nm(waypoint.position, options.max_direct_connection_nm)
        {
            let b = neighbour.id;
            if b <= a {
                continue;
            }
            let Entry::Vacant(slot) = edges.entry(key(a, b)) else {
                continue;
            };
            if !oracle.is_safe_passage(
                waypoint.position,
                waypoints[b].position,
                options.safety_margin_nm,
            ) {
                continue;
            }
            slot.insert(Edge {
                target: b,
                kind: EdgeKind::Direct,
                distance: haversine_nm(&waypoint.position, &waypoints[b].position),
            });
            direct += 1;
        }
    }

    let mut adjacency: HashMap<WaypointId, Vec<Edge>> =
        (0..waypoints.len()).map(|id| (id, Vec::new())).collect();
    let edge_count = edges.len();
    for ((a, b), edge) in edges {
        adjacency.entry(a).or_default().push(Edge {
            target: b,
            ..edge.clone()
        });
        adjacency.entry(b).or_default().push(Edge { target: a, ..edge });
    }
    for list in adjacency.values_mut() {
        list.sort_by(|x, y| {
            compare_distance(x.distance, y.distance)
                .then_with(|| x.kind.cmp(&y.kind))
                .then_with(|| x.target.cmp(&y.target))
        });
    }

    let isolated = adjacency.values().filter(|list| list.is_empty()).count();
    info!(
        nodes = adjacency.len(),
        edges = edge_count,
        shipping_lane_edges = edge_count - direct,
        direct_edges = direct,
        isolated,
        "built routing graph"
    );

    RoutingGraph {
        adjacency: Arc::new(adjacency),
        edge_count,
    }
}

fn key(a: WaypointId, b: WaypointId) -> (WaypointId, WaypointId) {
    (a.min(b), a.max(b))
}

fn compare_distance(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Greater)
}
