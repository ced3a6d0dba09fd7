//! KD-tree spatial index for nearest-waypoint lookups.
//!
//! Waypoints are embedded as unit vectors on the sphere so that Euclidean
//! (chord) ordering in the tree matches great-circle ordering on the Earth,
//! without any special handling at the antimeridian or the poles. Distances
//! reported to callers are recomputed with the haversine formula.
//!
//! # Example
//!
//! ```
//! use searoute_lib::{BuiltinDataset, Coordinate, Registry, SpatialIndex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::from_provider(&BuiltinDataset)?;
//! let index = SpatialIndex::build(&registry);
//!
//! let nearest = index.nearest(Coordinate::new(1.29, 103.85)?)?;
//! assert_eq!(registry.all_waypoints()[nearest.id].id, "singapore");
//! # Ok(())
//! # }
//! ```

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::info;

use crate::error::{Error, Result};
use crate::geo::{chord_for_nm, haversine_nm, Coordinate};
use crate::registry::{Registry, WaypointId};

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Slack applied to chord radii to absorb `f32` rounding in the tree.
const CHORD_SLACK: f64 = 1e-5;

/// Waypoint returned by a spatial query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    pub id: WaypointId,
    pub distance_nm: f64,
}

/// Read-only nearest-neighbour index over the registry's waypoints.
pub struct SpatialIndex {
    tree: KdTree<f32, usize, 3, BUCKET_SIZE, u32>,
    positions: Vec<Coordinate>,
}

impl SpatialIndex {
    /// Build the index from every waypoint in `registry`.
    pub fn build(registry: &Registry) -> Self {
        let positions: Vec<Coordinate> = registry
            .all_waypoints()
            .iter()
            .map(|waypoint| waypoint.position)
            .collect();

        let mut tree: KdTree<f32, usize, 3, BUCKET_SIZE, u32> = KdTree::new();
        for (index, position) in positions.iter().enumerate() {
            tree.add(&to_point(position), index);
        }

        info!(node_count = positions.len(), "built spatial index");

        Self { tree, positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The waypoint closest to `coordinate`.
    pub fn nearest(&self, coordinate: Coordinate) -> Result<Neighbour> {
        self.nearest_n(coordinate, 1)
            .into_iter()
            .next()
            .ok_or(Error::NoWaypoints)
    }

    /// Up to `k` waypoints ordered by increasing distance from `coordinate`.
    pub fn nearest_n(&self, coordinate: Coordinate, k: usize) -> Vec<Neighbour> {
        if k == 0 || self.positions.is_empty() {
            return Vec::new();
        }

        let mut neighbours: Vec<Neighbour> = self
            .tree
            .nearest_n::<SquaredEuclidean>(&to_point(&coordinate), k)
            .into_iter()
            .map(|neighbour| self.neighbour(neighbour.item, &coordinate))
            .collect();
        sort_neighbours(&mut neighbours);
        neighbours
    }

    /// Every waypoint within `radius_nm` great-circle miles of `coordinate`.
    pub fn within_radius_nm(&self, coordinate: Coordinate, radius_nm: f64) -> Vec<Neighbour> {
        if self.positions.is_empty() || radius_nm.is_nan() || radius_nm < 0.0 {
            return Vec::new();
        }

        let chord = chord_for_nm(radius_nm) + CHORD_SLACK;
        let mut neighbours: Vec<Neighbour> = self
            .tree
            .within::<SquaredEuclidean>(&to_point(&coordinate), (chord * chord) as f32)
            .into_iter()
            .map(|neighbour| self.neighbour(neighbour.item, &coordinate))
            .filter(|neighbour| neighbour.distance_nm <= radius_nm)
            .collect();
        sort_neighbours(&mut neighbours);
        neighbours
    }

    fn neighbour(&self, id: WaypointId, from: &Coordinate) -> Neighbour {
        Neighbour {
            id,
            distance_nm: haversine_nm(from, &self.positions[id]),
        }
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.positions.len())
            .finish()
    }
}

fn to_point(coordinate: &Coordinate) -> [f32; 3] {
    let [x, y, z] = coordinate.to_unit_vector();
    [x as f32, y as f32, z as f32]
}

fn sort_neighbours(neighbours: &mut [Neighbour]) {
    neighbours.sort_by(|a, b| {
        a.distance_nm
            .total_cmp(&b.distance_nm)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{RegistryDataset, Waypoint, WaypointCategory};

    fn registry(points: &[(&str, f64, f64)]) -> Registry {
        let waypoints = points
            .iter()
            .map(|&(id, latitude, longitude)| Waypoint {
                id: id.to_string(),
                name: id.to_string(),
                position: Coordinate {
                    latitude,
                    longitude,
                },
                category: WaypointCategory::Waypoint,
                depth_m: None,
                restrictions: Default::default(),
                weather_zone: None,
            })
            .collect();
        Registry::from_dataset(RegistryDataset {
            version: "test".to_string(),
            waypoints,
            land_masses: Vec::new(),
            shipping_lanes: Vec::new(),
            weather_zones: Vec::new(),
        })
        .expect("valid registry")
    }

    #[test]
    fn empty_index_reports_no_waypoints() {
        let index = SpatialIndex::build(&registry(&[]));
        assert!(index.is_empty());
        assert!(matches!(
            index.nearest(Coordinate::from((0.0, 0.0))),
            Err(Error::NoWaypoints)
        ));
    }

    #[test]
    fn nearest_crosses_the_antimeridian() {
        let index = SpatialIndex::build(&registry(&[
            ("east", 0.0, 179.5),
            ("west", 0.0, -170.0),
        ]));
        let nearest = index
            .nearest(Coordinate::from((0.0, -179.9)))
            .expect("index has waypoints");
        assert_eq!(nearest.id, 0);
        assert!((nearest.distance_nm - 36.0).abs() < 0.1);
    }

    #[test]
    fn within_radius_filters_by_great_circle_distance() {
        let index = SpatialIndex::build(&registry(&[
            ("a", 0.0, 0.0),
            ("b", 0.0, 1.0),
            ("c", 0.0, 3.0),
        ]));
        // One degree of longitude on the equator is ~60.04 nm.
        let hits = index.within_radius_nm(Coordinate::from((0.0, 0.0)), 61.0);
        let ids: Vec<WaypointId> = hits.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert!(index
            .within_radius_nm(Coordinate::from((0.0, 0.0)), 59.0)
            .iter()
            .all(|n| n.id == 0));
    }
}
