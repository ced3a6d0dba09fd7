mod common;

use searoute_lib::{
    build_graph, safety_score, EdgeKind, EngineConfig, Hazard, LandAvoidance, Registry,
    SegmentSynthesizer, SpatialIndex, WeatherSnapshot,
};

use common::{island_config, island_dataset};

struct Fixture {
    registry: Registry,
    oracle: LandAvoidance,
    graph: searoute_lib::RoutingGraph,
    config: EngineConfig,
}

impl Fixture {
    fn new() -> Self {
        Self::with_safety_margin(island_config().safety_margin_nm)
    }

    fn with_safety_margin(safety_margin_nm: f64) -> Self {
        let mut dataset = island_dataset();
        dataset.waypoints[0].depth_m = Some(12.0);
        dataset.waypoints[3]
            .restrictions
            .insert("piracy_risk".to_string());
        dataset.waypoints[3]
            .restrictions
            .insert("traffic_separation_scheme".to_string());

        let registry = Registry::from_dataset(dataset).expect("registry");
        let config = EngineConfig {
            safety_margin_nm,
            ..island_config()
        };
        let index = SpatialIndex::build(&registry);
        let oracle = LandAvoidance::new(registry.land_masses());
        let graph = build_graph(&registry, &index, &oracle, &config.graph_options());
        Self {
            registry,
            oracle,
            graph,
            config,
        }
    }

    fn id(&self, name: &str) -> usize {
        self.registry.resolve(name).expect("known id")
    }

    fn synthesizer(&self) -> SegmentSynthesizer<'_> {
        SegmentSynthesizer::new(&self.registry, &self.graph, &self.oracle, &self.config)
    }
}

#[test]
fn segments_follow_the_path() {
    let fixture = Fixture::new();
    let path = [
        fixture.id("west_port"),
        fixture.id("south_passage"),
        fixture.id("east_port"),
    ];
    let segments = fixture.synthesizer().synthesize(&path, None, 1);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].end, segments[1].start);
    for segment in &segments {
        assert_eq!(segment.edge_kind, Some(EdgeKind::ShippingLane));
        assert!((segment.estimated_time_hours - segment.distance_nm / 15.0).abs() < 1e-9);
        assert!((segment.fuel_consumption_mt - segment.distance_nm / 100.0 * 2.5).abs() < 1e-9);
        assert!(segment.weather_conditions.is_empty());
        assert_eq!(segment.current_effects.speed_knots, 0.5);
    }
}

#[test]
fn restrictions_and_depth_become_hazards() {
    let fixture = Fixture::new();
    let path = [
        fixture.id("west_port"),
        fixture.id("south_passage"),
        fixture.id("east_port"),
    ];
    let segments = fixture.synthesizer().synthesize(&path, None, 1);

    let first = &segments[0];
    assert!(first.hazards.contains(&Hazard::ShallowWater));
    assert!(first.hazards.contains(&Hazard::PiracyRisk));
    assert_eq!(first.depth_restriction, 12.0);

    let second = &segments[1];
    assert!(!second.hazards.contains(&Hazard::ShallowWater));
    assert!(second.hazards.contains(&Hazard::PiracyRisk));
    // South is charted at 400 m, east is unknown and falls back to 50 m.
    assert_eq!(second.depth_restriction, 50.0);

    // 0.25 + 0.35 + 0.35 exceeds the 0.80 cap.
    let score = safety_score(&segments);
    assert!((score - 0.2).abs() < 1e-9);
}

#[test]
fn lane_legs_inside_the_margin_are_close_to_land() {
    // The southern corridor clears the island by roughly 51 nm.
    let tight = Fixture::with_safety_margin(55.0);
    let path = [
        tight.id("west_port"),
        tight.id("south_passage"),
        tight.id("east_port"),
    ];
    let segments = tight.synthesizer().synthesize(&path, None, 1);
    assert_eq!(segments.len(), 2);
    for segment in &segments {
        assert_eq!(segment.edge_kind, Some(EdgeKind::ShippingLane));
        assert!(segment.hazards.contains(&Hazard::CloseToLand));
    }

    let relaxed = Fixture::with_safety_margin(45.0);
    let segments = relaxed.synthesizer().synthesize(&path, None, 1);
    for segment in &segments {
        assert!(!segment.hazards.contains(&Hazard::CloseToLand));
    }
}

#[test]
fn severe_weather_slows_and_flags_segments() {
    let fixture = Fixture::new();
    let path = [fixture.id("west_port"), fixture.id("north_passage")];
    let weather = WeatherSnapshot {
        wind_speed: Some(26.0),
        wave_height: Some(6.5),
        storm_warnings: vec!["tropical storm".to_string()],
        visibility: Some(2.0),
    };
    let segments = fixture.synthesizer().synthesize(&path, Some(&weather), 1);

    let segment = &segments[0];
    let speed = 15.0 * 0.7 * 0.8;
    assert!((segment.estimated_time_hours - segment.distance_nm / speed).abs() < 1e-9);
    for hazard in [Hazard::HighWaves, Hazard::HighWinds, Hazard::Storm] {
        assert!(segment.hazards.contains(&hazard), "missing {hazard}");
    }
    assert_eq!(segment.weather_conditions, weather);
}

#[test]
fn current_opposes_the_direction_of_travel() {
    let fixture = Fixture::new();
    let path = [fixture.id("north_passage"), fixture.id("east_port")];
    let segments = fixture.synthesizer().synthesize(&path, None, 1);

    let segment = &segments[0];
    let bearing = segment.start.initial_bearing(&segment.end);
    let expected = (bearing + 180.0) % 360.0;
    assert!((segment.current_effects.direction_deg - expected).abs() < 1e-9);
    assert!((segment.current_effects.speed_reduction_pct - 0.5 / 15.0 * 100.0).abs() < 1e-9);
}

#[test]
fn single_node_path_has_no_segments() {
    let fixture = Fixture::new();
    let segments = fixture
        .synthesizer()
        .synthesize(&[fixture.id("west_port")], None, 7);
    assert!(segments.is_empty());
    assert_eq!(safety_score(&segments), 1.0);
}
