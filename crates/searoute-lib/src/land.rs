//! Land-avoidance oracle.
//!
//! Segments are tested in planar (latitude, longitude) degree space against
//! the registry's coarse coastline polygons. Longitude is unwrapped so a
//! segment crossing the antimeridian is tested as the short way round, using
//! shifted copies of the segment (±360°) against polygons that live in
//! [-180, 180]. Clearance in degrees converts to nautical miles with
//! `1° ≈ 60 nm`.
//!
//! Each call is linear in the total vertex count; a per-polygon bounding box
//! skips most polygons cheaply. This is adequate for a handful of coarse
//! polygons and does not scale to chart-accurate coastlines, which would need
//! a proper spatial index over coastline segments.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::dataset::LandMass;
use crate::error::{Error, Result};
use crate::geo::{haversine_nm, nm_to_degrees, Coordinate, NM_PER_DEGREE};
use crate::path::FloatOrd;

/// Tolerance for collinearity in the orientation test, in squared degrees.
const ORIENTATION_EPS: f64 = 1e-12;

/// (latitude, longitude) in degrees.
type Point = (f64, f64);

#[derive(Debug, Clone)]
struct PreparedPolygon {
    name: String,
    vertices: Vec<Point>,
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl PreparedPolygon {
    /// `None` for polygons with fewer than three vertices.
    fn new(land: &LandMass) -> Option<Self> {
        if land.vertices.len() < 3 {
            return None;
        }
        let vertices: Vec<Point> = land
            .vertices
            .iter()
            .map(|v| (v.latitude, v.longitude))
            .collect();
        let mut polygon = Self {
            name: land.name.clone(),
            vertices,
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
        };
        for &(lat, lon) in &polygon.vertices {
            polygon.min_lat = polygon.min_lat.min(lat);
            polygon.max_lat = polygon.max_lat.max(lat);
            polygon.min_lon = polygon.min_lon.min(lon);
            polygon.max_lon = polygon.max_lon.max(lon);
        }
        Some(polygon)
    }

    /// Planar gap in degrees between the polygon's bounding box and the
    /// segment's bounding box; zero when they overlap.
    fn bounds_gap(&self, a: Point, b: Point) -> f64 {
        let lat_gap = (self.min_lat - a.0.max(b.0))
            .max(a.0.min(b.0) - self.max_lat)
            .max(0.0);
        let lon_gap = (self.min_lon - a.1.max(b.1))
            .max(a.1.min(b.1) - self.max_lon)
            .max(0.0);
        lat_gap.hypot(lon_gap)
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    fn contains(&self, p: Point) -> bool {
        point_in_polygon(p, &self.vertices)
    }

    fn crosses(&self, a: Point, b: Point) -> bool {
        if self.bounds_gap(a, b) > 0.0 {
            return false;
        }
        self.contains(a)
            || self.contains(b)
            || self.edges().any(|(e1, e2)| segments_intersect(a, b, e1, e2))
    }

    fn distance(&self, a: Point, b: Point) -> f64 {
        if self.contains(a) || self.contains(b) {
            return 0.0;
        }
        self.edges()
            .map(|(e1, e2)| segment_distance(a, b, e1, e2))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Limits for [`LandAvoidance::find_detour`].
#[derive(Debug, Clone, Copy)]
pub struct DetourOptions {
    /// Required land clearance for every leg.
    pub safety_margin_nm: f64,
    /// Longest permitted leg between two intermediate points.
    pub max_leg_nm: f64,
    /// Number of frontier expansions before giving up.
    pub max_expansions: usize,
}

/// Pure geometric oracle answering land-crossing and clearance questions.
#[derive(Debug, Clone, Default)]
pub struct LandAvoidance {
    polygons: Vec<PreparedPolygon>,
}

impl LandAvoidance {
    /// Prepare `land_masses` for querying. Degenerate polygons are skipped.
    pub fn new(land_masses: &[LandMass]) -> Self {
        let polygons = land_masses
            .iter()
            .filter_map(|land| {
                let prepared = PreparedPolygon::new(land);
                if prepared.is_none() {
                    warn!(
                        land_mass = %land.name,
                        vertices = land.vertices.len(),
                        "skipping degenerate land polygon"
                    );
                }
                prepared
            })
            .collect();
        Self { polygons }
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// True if the segment between `p1` and `p2` crosses, touches or lies
    /// within any land polygon.
    pub fn intersects_land(&self, p1: Coordinate, p2: Coordinate) -> bool {
        self.crossed_land_mass(p1, p2).is_some()
    }

    /// Name of the first land mass the segment crosses, if any.
    pub fn crossed_land_mass(&self, p1: Coordinate, p2: Coordinate) -> Option<&str> {
        let copies = segment_copies(p1, p2);
        self.polygons
            .iter()
            .find(|polygon| copies.iter().any(|&(a, b)| polygon.crosses(a, b)))
            .map(|polygon| polygon.name.as_str())
    }

    /// Minimum planar distance from the segment to any land, in nautical miles.
    ///
    /// Zero when the segment touches land; infinite when there is no land.
    pub fn clearance_nm(&self, p1: Coordinate, p2: Coordinate) -> f64 {
        let copies = segment_copies(p1, p2);
        let mut best = f64::INFINITY;
        for polygon in &self.polygons {
            for &(a, b) in &copies {
                if polygon.bounds_gap(a, b) >= best {
                    continue;
                }
                best = best.min(polygon.distance(a, b));
                if best == 0.0 {
                    return 0.0;
                }
            }
        }
        best * NM_PER_DEGREE
    }

    /// False when the segment crosses land or passes within
    /// `safety_margin_nm` of it.
    pub fn is_safe_passage(&self, p1: Coordinate, p2: Coordinate, safety_margin_nm: f64) -> bool {
        if self.intersects_land(p1, p2) {
            return false;
        }
        let margin = nm_to_degrees(safety_margin_nm.max(0.0));
        let copies = segment_copies(p1, p2);
        self.polygons.iter().all(|polygon| {
            copies.iter().all(|&(a, b)| {
                polygon.bounds_gap(a, b) >= margin || polygon.distance(a, b) >= margin
            })
        })
    }

    /// Whether `point` lies on land.
    pub fn is_on_land(&self, point: Coordinate) -> bool {
        let p = (point.latitude, point.longitude);
        self.polygons.iter().any(|polygon| polygon.contains(p))
    }

    /// Find a chain of safe legs from `origin` to `destination` through
    /// `candidates`.
    ///
    /// Exploration is best-first by great-circle distance to the destination,
    /// ties broken by candidate order, so results are reproducible. Returns
    /// `[origin, destination]` when the direct leg is already safe, and
    /// [`Error::UnsafeRoute`] when the frontier or the expansion budget runs
    /// out.
    pub fn find_detour(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        candidates: &[Coordinate],
        options: &DetourOptions,
    ) -> Result<Vec<Coordinate>> {
        let margin = options.safety_margin_nm;
        let point = |node: usize| {
            if node == 0 {
                origin
            } else {
                candidates[node - 1]
            }
        };

        let mut parents: HashMap<usize, usize> = HashMap::new();
        let mut visited: HashSet<usize> = HashSet::new();
        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse((FloatOrd(haversine_nm(&origin, &destination)), 0usize)));
        let mut expansions = 0usize;

        while let Some(Reverse((_, node))) = frontier.pop() {
            if !visited.insert(node) {
                continue;
            }
            expansions += 1;
            if expansions > options.max_expansions {
                return Err(Error::UnsafeRoute {
                    message: format!(
                        "detour search exhausted its budget of {} expansions",
                        options.max_expansions
                    ),
                });
            }

            let current = point(node);
            if self.is_safe_passage(current, destination, margin) {
                let mut chain = vec![destination, current];
                let mut cursor = node;
                while let Some(&parent) = parents.get(&cursor) {
                    chain.push(point(parent));
                    cursor = parent;
                }
                chain.reverse();
                debug!(legs = chain.len() - 1, expansions, "found detour");
                return Ok(chain);
            }

            for (index, candidate) in candidates.iter().enumerate() {
                let next = index + 1;
                if visited.contains(&next) || parents.contains_key(&next) {
                    continue;
                }
                if haversine_nm(&current, candidate) > options.max_leg_nm {
                    continue;
                }
                if !self.is_safe_passage(current, *candidate, margin) {
                    continue;
                }
                parents.insert(next, node);
                frontier.push(Reverse((
                    FloatOrd(haversine_nm(candidate, &destination)),
                    next,
                )));
            }
        }

        Err(Error::UnsafeRoute {
            message: "no chain of safe legs reaches the destination".to_string(),
        })
    }
}

/// The segment with its end longitude unwrapped towards the start, plus
/// copies shifted by ±360° when the unwrapped segment leaves [-180, 180].
fn segment_copies(p1: Coordinate, p2: Coordinate) -> Vec<(Point, Point)> {
    let mut delta = p2.longitude - p1.longitude;
    while delta > 180.0 {
        delta -= 360.0;
    }
    while delta < -180.0 {
        delta += 360.0;
    }
    let a = (p1.latitude, p1.longitude);
    let b = (p2.latitude, p1.longitude + delta);

    let mut copies = vec![(a, b)];
    if a.1.max(b.1) > 180.0 {
        copies.push(((a.0, a.1 - 360.0), (b.0, b.1 - 360.0)));
    }
    if a.1.min(b.1) < -180.0 {
        copies.push(((a.0, a.1 + 360.0), (b.0, b.1 + 360.0)));
    }
    copies
}

fn orient(p: Point, q: Point, r: Point) -> f64 {
    (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
}

fn on_segment(p: Point, q: Point, r: Point) -> bool {
    let within = |a: f64, b: f64, value: f64| {
        value >= a.min(b) - ORIENTATION_EPS && value <= a.max(b) + ORIENTATION_EPS
    };
    within(p.0, q.0, r.0) && within(p.1, q.1, r.1)
}

fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let o1 = orient(a1, a2, b1);
    let o2 = orient(a1, a2, b2);
    let o3 = orient(b1, b2, a1);
    let o4 = orient(b1, b2, a2);

    if o1.abs() <= ORIENTATION_EPS && on_segment(a1, a2, b1) {
        return true;
    }
    if o2.abs() <= ORIENTATION_EPS && on_segment(a1, a2, b2) {
        return true;
    }
    if o3.abs() <= ORIENTATION_EPS && on_segment(b1, b2, a1) {
        return true;
    }
    if o4.abs() <= ORIENTATION_EPS && on_segment(b1, b2, a2) {
        return true;
    }

    let a_crosses = (o1 > ORIENTATION_EPS && o2 < -ORIENTATION_EPS)
        || (o1 < -ORIENTATION_EPS && o2 > ORIENTATION_EPS);
    let b_crosses = (o3 > ORIENTATION_EPS && o4 < -ORIENTATION_EPS)
        || (o3 < -ORIENTATION_EPS && o4 > ORIENTATION_EPS);
    a_crosses && b_crosses
}

/// Even-odd ray casting with latitude as y and longitude as x.
fn point_in_polygon(p: Point, vertices: &[Point]) -> bool {
    let (lat, lon) = p;
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (lat_i, lon_i) = vertices[i];
        let (lat_j, lon_j) = vertices[j];
        if (lat_i > lat) != (lat_j > lat) {
            let crossing = lon_i + (lat - lat_i) * (lon_j - lon_i) / (lat_j - lat_i);
            if lon < crossing {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / length_sq).clamp(0.0, 1.0)
    };
    (p.0 - (a.0 + t * dx)).hypot(p.1 - (a.1 + t * dy))
}

fn segment_distance(a1: Point, a2: Point, b1: Point, b2: Point) -> f64 {
    if segments_intersect(a1, a2, b1, b2) {
        return 0.0;
    }
    point_segment_distance(a1, b1, b2)
        .min(point_segment_distance(a2, b1, b2))
        .min(point_segment_distance(b1, a1, a2))
        .min(point_segment_distance(b2, a1, a2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(name: &str, lat: f64, lon: f64, size: f64) -> LandMass {
        LandMass {
            name: name.to_string(),
            vertices: vec![
                Coordinate::from((lat, lon)),
                Coordinate::from((lat, lon + size)),
                Coordinate::from((lat + size, lon + size)),
                Coordinate::from((lat + size, lon)),
            ],
        }
    }

    #[test]
    fn crossing_segment_intersects_land() {
        let oracle = LandAvoidance::new(&[square("island", 0.0, 0.0, 2.0)]);
        let west = Coordinate::from((1.0, -1.0));
        let east = Coordinate::from((1.0, 3.0));
        assert!(oracle.intersects_land(west, east));
        assert_eq!(oracle.crossed_land_mass(west, east), Some("island"));
        assert!(!oracle.is_safe_passage(west, east, 0.0));
    }

    #[test]
    fn segment_inside_polygon_counts_as_land() {
        let oracle = LandAvoidance::new(&[square("island", 0.0, 0.0, 4.0)]);
        assert!(oracle.intersects_land(
            Coordinate::from((1.0, 1.0)),
            Coordinate::from((2.0, 2.0))
        ));
        assert!(oracle.is_on_land(Coordinate::from((1.0, 1.0))));
    }

    #[test]
    fn clearance_uses_sixty_miles_per_degree() {
        let oracle = LandAvoidance::new(&[square("island", 0.0, 0.0, 2.0)]);
        // Runs parallel to the northern shore, half a degree away.
        let a = Coordinate::from((2.5, 0.0));
        let b = Coordinate::from((2.5, 2.0));
        assert!(!oracle.intersects_land(a, b));
        assert!((oracle.clearance_nm(a, b) - 30.0).abs() < 1e-9);
        assert!(oracle.is_safe_passage(a, b, 29.0));
        assert!(!oracle.is_safe_passage(a, b, 31.0));
    }

    #[test]
    fn antimeridian_segment_is_tested_the_short_way() {
        // Island straddling 180° expressed on the western side.
        let oracle = LandAvoidance::new(&[square("dateline", -1.0, -179.8, 1.0)]);
        let a = Coordinate::from((-0.5, 179.0));
        let b = Coordinate::from((-0.5, -178.0));
        assert!(oracle.intersects_land(a, b));

        // Same longitudes but well north of the island.
        let c = Coordinate::from((5.0, 179.0));
        let d = Coordinate::from((5.0, -178.0));
        assert!(!oracle.intersects_land(c, d));
        assert!(oracle.is_safe_passage(c, d, 60.0));
    }

    #[test]
    fn degenerate_polygons_are_ignored() {
        let empty = LandMass {
            name: "empty".to_string(),
            vertices: Vec::new(),
        };
        let sliver = LandMass {
            name: "sliver".to_string(),
            vertices: vec![Coordinate::from((0.0, 0.0)), Coordinate::from((1.0, 1.0))],
        };
        let oracle = LandAvoidance::new(&[empty, sliver, square("island", 0.0, 0.0, 2.0)]);
        assert_eq!(oracle.polygon_count(), 1);
        assert!(!oracle.is_on_land(Coordinate::from((-5.0, -5.0))));
        assert!(oracle.is_on_land(Coordinate::from((1.0, 1.0))));
    }

    #[test]
    fn no_land_means_infinite_clearance() {
        let oracle = LandAvoidance::default();
        let a = Coordinate::from((0.0, 0.0));
        let b = Coordinate::from((10.0, 10.0));
        assert!(oracle.clearance_nm(a, b).is_infinite());
        assert!(oracle.is_safe_passage(a, b, 1_000.0));
    }

    #[test]
    fn detour_routes_around_an_island() {
        let oracle = LandAvoidance::new(&[square("island", -1.0, -1.0, 2.0)]);
        let origin = Coordinate::from((0.0, -3.0));
        let destination = Coordinate::from((0.0, 3.0));
        let candidates = [
            Coordinate::from((-3.0, 0.0)),
            Coordinate::from((3.0, 0.0)),
            Coordinate::from((0.0, 0.0)),
        ];
        let options = DetourOptions {
            safety_margin_nm: 10.0,
            max_leg_nm: 500.0,
            max_expansions: 16,
        };

        let first = oracle
            .find_detour(origin, destination, &candidates, &options)
            .expect("detour exists");
        let second = oracle
            .find_detour(origin, destination, &candidates, &options)
            .expect("detour exists");
        assert_eq!(first, second);
        assert_eq!(first.first(), Some(&origin));
        assert_eq!(first.last(), Some(&destination));
        assert_eq!(first.len(), 3);
        for pair in first.windows(2) {
            assert!(oracle.is_safe_passage(pair[0], pair[1], 10.0));
        }
    }

    #[test]
    fn detour_reports_unsafe_route_when_budget_runs_out() {
        let oracle = LandAvoidance::new(&[square("island", -1.0, -1.0, 2.0)]);
        let options = DetourOptions {
            safety_margin_nm: 10.0,
            max_leg_nm: 500.0,
            max_expansions: 1,
        };
        let result = oracle.find_detour(
            Coordinate::from((0.0, -3.0)),
            Coordinate::from((0.0, 3.0)),
            &[Coordinate::from((3.0, 0.0))],
            &options,
        );
        assert!(matches!(result, Err(Error::UnsafeRoute { .. })));

        let no_candidates = oracle.find_detour(
            Coordinate::from((0.0, -3.0)),
            Coordinate::from((0.0, 3.0)),
            &[],
            &DetourOptions {
                max_expansions: 10,
                ..options
            },
        );
        assert!(matches!(no_candidates, Err(Error::UnsafeRoute { .. })));
    }
}
