mod common;

use searoute_lib::{haversine_nm, BuiltinDataset, Coordinate, Error, Registry, SpatialIndex};

use common::{coord, island_dataset};

fn brute_force_nearest(registry: &Registry, query: &Coordinate) -> f64 {
    registry
        .all_waypoints()
        .iter()
        .map(|w| haversine_nm(query, &w.position))
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn nearest_matches_brute_force_scan() {
    let registry = Registry::from_provider(&BuiltinDataset).expect("registry");
    let index = SpatialIndex::build(&registry);
    assert_eq!(index.len(), registry.len());

    for latitude in (-80..=80).step_by(20) {
        for longitude in (-180..=180).step_by(30) {
            let query = coord((f64::from(latitude), f64::from(longitude)));
            let found = index.nearest(query).expect("non-empty index");
            let expected = brute_force_nearest(&registry, &query);
            // Ties may resolve to a different waypoint at the same distance.
            assert!(
                (found.distance_nm - expected).abs() < 1e-3,
                "query {query:?}: index {} nm, scan {} nm",
                found.distance_nm,
                expected
            );
        }
    }
}

#[test]
fn nearest_n_is_sorted_by_distance() {
    let registry = Registry::from_provider(&BuiltinDataset).expect("registry");
    let index = SpatialIndex::build(&registry);
    let neighbours = index.nearest_n(coord((36.0, -5.0)), 5);

    assert_eq!(neighbours.len(), 5);
    assert!(neighbours
        .windows(2)
        .all(|pair| pair[0].distance_nm <= pair[1].distance_nm));
    let closest = registry.get(neighbours[0].id).expect("waypoint");
    assert_eq!(closest.id, "gibraltar");
}

#[test]
fn radius_query_includes_only_points_within_range() {
    let registry = Registry::from_dataset(island_dataset()).expect("registry");
    let index = SpatialIndex::build(&registry);

    let around_west = index.within_radius_nm(coord((0.0, -12.0)), 100.0);
    assert_eq!(around_west.len(), 1);

    let wide = index.within_radius_nm(coord((0.0, -12.0)), 1_000.0);
    let ids: Vec<&str> = wide
        .iter()
        .filter_map(|n| registry.get(n.id))
        .map(|w| w.id.as_str())
        .collect();
    assert_eq!(ids, vec!["west_port", "north_passage", "south_passage"]);
}

#[test]
fn empty_registry_has_no_nearest_waypoint() {
    let mut dataset = island_dataset();
    dataset.waypoints.clear();
    dataset.shipping_lanes.clear();
    let registry = Registry::from_dataset(dataset).expect("empty registry is valid");
    let index = SpatialIndex::build(&registry);
    assert!(index.is_empty());
    assert!(matches!(
        index.nearest(coord((0.0, 0.0))),
        Err(Error::NoWaypoints)
    ));
}
