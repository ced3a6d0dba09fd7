use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use searoute_lib::{
    build_graph, BuiltinDataset, Coordinate, GraphBuildOptions, LandAvoidance, OptimizationMode,
    Registry, RouteEngine, RouteRequest, SpatialIndex, WeatherSnapshot,
};
use std::hint::black_box;

static ENGINE: Lazy<RouteEngine> = Lazy::new(|| RouteEngine::builtin().expect("engine builds"));
static REGISTRY: Lazy<Registry> =
    Lazy::new(|| Registry::from_provider(&BuiltinDataset).expect("registry loads"));

fn rotterdam_singapore() -> RouteRequest {
    RouteRequest::new(
        Coordinate::from((51.9244, 4.4777)),
        Coordinate::from((1.2905, 103.8520)),
    )
}

fn benchmark_graph_build(c: &mut Criterion) {
    let registry = &*REGISTRY;

    c.bench_function("build_graph_builtin", |b| {
        b.iter(|| {
            let index = SpatialIndex::build(registry);
            let oracle = LandAvoidance::new(registry.land_masses());
            let graph = build_graph(registry, &index, &oracle, &GraphBuildOptions::default());
            black_box(graph.edge_count())
        });
    });
}

fn benchmark_routing(c: &mut Criterion) {
    let engine = &*ENGINE;

    c.bench_function("route_rotterdam_singapore_balanced", |b| {
        let request = rotterdam_singapore().without_alternatives();
        b.iter(|| {
            let route = engine.route(&request).expect("route exists");
            black_box(route.total_distance_nm)
        });
    });

    c.bench_function("route_rotterdam_singapore_weather", |b| {
        let request = rotterdam_singapore()
            .with_mode(OptimizationMode::Weather)
            .with_weather(WeatherSnapshot {
                wind_speed: Some(18.0),
                wave_height: Some(5.0),
                ..WeatherSnapshot::default()
            })
            .without_alternatives();
        b.iter(|| {
            let route = engine.route(&request).expect("route exists");
            black_box(route.safety_score)
        });
    });

    c.bench_function("route_rotterdam_singapore_with_alternatives", |b| {
        let request = rotterdam_singapore();
        b.iter(|| {
            let route = engine.route(&request).expect("route exists");
            black_box(route.alternative_routes.len())
        });
    });
}

criterion_group!(benches, benchmark_graph_build, benchmark_routing);
criterion_main!(benches);
