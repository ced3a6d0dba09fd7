//! Coarse global dataset compiled into the library.
//!
//! Coastlines are deliberately simplified polygons (tens of vertices per
//! continent) and are not suitable for navigation. Waypoints sit in open
//! water with at least ten nautical miles of clearance from every polygon.

use once_cell::sync::Lazy;

use super::{
    LandDataProvider, LandMass, RegistryDataset, ShippingLane, Waypoint, WaypointCategory,
    WeatherZone,
};
use crate::error::Result;
use crate::geo::Coordinate;
use crate::hazard::Hazard;

/// Version tag stamped on the built-in dataset.
pub const BUILTIN_DATASET_VERSION: &str = "builtin-2024.1";

static DATASET: Lazy<RegistryDataset> = Lazy::new(build_dataset);

/// Provider for the dataset compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDataset;

impl BuiltinDataset {
    /// Shared reference to the built-in dataset.
    pub fn dataset() -> &'static RegistryDataset {
        &DATASET
    }
}

impl LandDataProvider for BuiltinDataset {
    fn source(&self) -> String {
        format!("built-in dataset {BUILTIN_DATASET_VERSION}")
    }

    fn load(&self) -> Result<RegistryDataset> {
        Ok(DATASET.clone())
    }
}

// id, name, latitude, longitude, category, depth (m), restrictions, weather zone
type WaypointRow = (
    &'static str,
    &'static str,
    f64,
    f64,
    WaypointCategory,
    Option<f64>,
    &'static [&'static str],
    Option<&'static str>,
);

const TSS: &str = "traffic_separation_scheme";

#[rustfmt::skip]
const WAYPOINTS: &[WaypointRow] = &[
    ("rotterdam", "Rotterdam", 52.0, 3.9, WaypointCategory::Port, Some(24.0), &[], Some("north_atlantic")),
    ("dover_strait", "Dover Strait", 51.0, 1.45, WaypointCategory::Strait, Some(30.0), &[TSS], Some("north_atlantic")),
    ("ushant", "Ushant", 48.5, -5.8, WaypointCategory::Waypoint, Some(110.0), &[TSS], Some("north_atlantic")),
    ("cape_finisterre", "Cape Finisterre", 43.2, -9.9, WaypointCategory::Waypoint, Some(150.0), &[TSS], Some("north_atlantic")),
    ("lisbon", "Lisbon", 38.6, -9.45, WaypointCategory::Port, Some(16.0), &[], None),
    ("cape_st_vincent", "Cape St. Vincent", 36.75, -9.3, WaypointCategory::Waypoint, Some(120.0), &[TSS], None),
    ("gibraltar", "Strait of Gibraltar", 35.95, -5.55, WaypointCategory::Strait, Some(280.0), &["strong_currents", TSS], None),
    ("alboran_sea", "Alboran Sea", 36.1, -3.0, WaypointCategory::Waypoint, Some(900.0), &[], None),
    ("barcelona", "Barcelona", 41.25, 2.25, WaypointCategory::Port, Some(16.0), &[], None),
    ("marseille", "Marseille", 43.1, 5.25, WaypointCategory::Port, Some(20.0), &[], None),
    ("genoa", "Genoa", 43.95, 8.9, WaypointCategory::Port, Some(15.0), &[], None),
    ("algiers_offshore", "Algiers Offshore", 37.2, 3.0, WaypointCategory::Waypoint, Some(2000.0), &[], None),
    ("sicily_channel", "Sicily Channel", 37.3, 11.6, WaypointCategory::Strait, Some(100.0), &[], None),
    ("malta", "Malta", 35.8, 14.6, WaypointCategory::Port, Some(14.0), &[], None),
    ("ionian_sea", "Ionian Sea", 36.5, 19.0, WaypointCategory::Waypoint, Some(3000.0), &[], None),
    ("piraeus", "Piraeus", 37.8, 23.55, WaypointCategory::Port, Some(16.0), &[], None),
    ("crete_south", "South of Crete", 34.5, 25.0, WaypointCategory::Waypoint, Some(2500.0), &[], None),
    ("port_said", "Port Said", 31.4, 32.35, WaypointCategory::Canal, Some(24.0), &["canal_transit"], None),
    ("suez", "Suez", 29.85, 32.55, WaypointCategory::Canal, Some(24.0), &["canal_transit"], None),
    ("gulf_of_suez", "Gulf of Suez", 27.6, 33.85, WaypointCategory::Waypoint, Some(60.0), &[TSS], None),
    ("jeddah", "Jeddah", 21.45, 38.9, WaypointCategory::Port, Some(16.0), &[], None),
    ("red_sea_south", "Southern Red Sea", 15.5, 41.6, WaypointCategory::Waypoint, Some(800.0), &[], Some("arabian_sea")),
    ("bab_el_mandeb", "Bab-el-Mandeb", 12.55, 43.35, WaypointCategory::Strait, Some(150.0), &["piracy_risk", "strong_currents"], Some("arabian_sea")),
    ("aden", "Aden", 12.6, 45.0, WaypointCategory::Port, Some(15.0), &["piracy_risk"], Some("arabian_sea")),
    ("gulf_of_aden", "Gulf of Aden", 13.3, 49.5, WaypointCategory::Waypoint, Some(2000.0), &["piracy_risk"], Some("arabian_sea")),
    ("socotra_north", "North of Socotra", 13.3, 54.0, WaypointCategory::Waypoint, Some(3500.0), &["piracy_risk"], Some("arabian_sea")),
    ("salalah", "Salalah", 16.8, 54.0, WaypointCategory::Port, Some(18.0), &[], Some("arabian_sea")),
    ("ras_al_hadd", "Ras al Hadd", 22.9, 60.3, WaypointCategory::Waypoint, Some(2500.0), &[], Some("arabian_sea")),
    ("hormuz", "Strait of Hormuz", 26.4, 56.6, WaypointCategory::Strait, Some(80.0), &[TSS], None),
    ("jebel_ali", "Jebel Ali", 25.2, 54.9, WaypointCategory::Port, Some(17.0), &[], None),
    ("mumbai", "Mumbai", 18.85, 72.6, WaypointCategory::Port, Some(14.0), &[], Some("arabian_sea")),
    ("colombo", "Colombo", 6.95, 79.6, WaypointCategory::Port, Some(18.0), &[], Some("bay_of_bengal")),
    ("dondra_head", "Dondra Head", 5.5, 80.6, WaypointCategory::Waypoint, Some(1500.0), &[TSS], Some("bay_of_bengal")),
    ("chennai", "Chennai", 13.1, 80.6, WaypointCategory::Port, Some(16.0), &[], Some("bay_of_bengal")),
    ("six_degree_channel", "Six Degree Channel", 6.0, 94.2, WaypointCategory::Strait, Some(2000.0), &[], Some("bay_of_bengal")),
    ("malacca_north", "Northern Malacca Strait", 5.4, 98.6, WaypointCategory::Strait, Some(70.0), &["piracy_risk"], None),
    ("port_klang", "Port Klang", 2.85, 100.95, WaypointCategory::Port, Some(15.0), &[], None),
    ("malacca_south", "Southern Malacca Strait", 2.05, 102.05, WaypointCategory::Strait, Some(25.0), &["piracy_risk", TSS], None),
    ("singapore", "Singapore", 1.2, 103.85, WaypointCategory::Port, Some(16.0), &[TSS], None),
    ("singapore_strait_east", "Singapore Strait East", 1.4, 104.6, WaypointCategory::Strait, Some(30.0), &["piracy_risk"], None),
    ("south_china_sea", "South China Sea", 9.0, 110.5, WaypointCategory::Waypoint, Some(4000.0), &[], Some("south_china_sea")),
    ("hong_kong", "Hong Kong", 22.0, 114.2, WaypointCategory::Port, Some(15.0), &[], Some("south_china_sea")),
    ("taiwan_strait", "Taiwan Strait", 24.2, 119.6, WaypointCategory::Strait, Some(60.0), &[], Some("south_china_sea")),
    ("shanghai", "Shanghai", 30.8, 122.9, WaypointCategory::Port, Some(12.5), &[], None),
    ("busan", "Busan", 34.9, 129.1, WaypointCategory::Port, Some(15.0), &[], None),
    ("tokyo", "Tokyo Bay Approach", 34.9, 139.9, WaypointCategory::Port, Some(20.0), &[], Some("north_pacific")),
    ("honolulu", "Honolulu", 21.2, -157.9, WaypointCategory::Port, Some(12.0), &[], Some("north_pacific")),
    ("los_angeles", "Los Angeles", 33.55, -118.4, WaypointCategory::Port, Some(16.0), &[], Some("north_pacific")),
    ("panama_pacific", "Panama Canal (Pacific)", 8.8, -79.5, WaypointCategory::Canal, Some(13.0), &["canal_transit"], None),
    ("panama_atlantic", "Panama Canal (Atlantic)", 9.45, -79.95, WaypointCategory::Canal, Some(13.0), &["canal_transit"], None),
    ("windward_passage", "Windward Passage", 20.0, -73.9, WaypointCategory::Strait, Some(1500.0), &[], None),
    ("new_york", "New York", 40.4, -73.8, WaypointCategory::Port, Some(15.0), &[], Some("north_atlantic")),
    ("mid_atlantic", "Mid Atlantic", 45.0, -35.0, WaypointCategory::Waypoint, Some(4000.0), &[], Some("north_atlantic")),
    ("las_palmas", "Las Palmas", 28.15, -15.35, WaypointCategory::Port, Some(16.0), &[], None),
    ("cape_verde", "Cape Verde", 15.0, -24.5, WaypointCategory::Waypoint, Some(3500.0), &[], None),
    ("gulf_of_guinea", "Gulf of Guinea", 1.0, -8.0, WaypointCategory::Waypoint, Some(4500.0), &[], None),
    ("cape_town", "Cape Town", -33.85, 18.3, WaypointCategory::Port, Some(15.5), &[], Some("southern_ocean")),
    ("cape_of_good_hope", "Cape of Good Hope", -35.0, 18.5, WaypointCategory::Waypoint, Some(200.0), &["strong_currents"], Some("southern_ocean")),
    ("durban", "Durban", -29.9, 31.2, WaypointCategory::Port, Some(12.8), &[], Some("southern_ocean")),
    ("mauritius", "Port Louis", -20.1, 57.4, WaypointCategory::Port, Some(16.0), &[], None),
    ("santos", "Santos", -24.1, -46.2, WaypointCategory::Port, Some(15.0), &[], None),
    ("recife", "Recife", -8.1, -34.7, WaypointCategory::Port, Some(12.0), &[], None),
    ("sunda_strait", "Sunda Strait", -6.0, 105.75, WaypointCategory::Strait, Some(60.0), &["strong_currents"], None),
    ("agulhas", "Agulhas Bank", -35.3, 22.0, WaypointCategory::Waypoint, Some(150.0), &["strong_currents"], Some("southern_ocean")),
    ("east_london_offshore", "East London Offshore", -33.6, 28.2, WaypointCategory::Waypoint, Some(1000.0), &["strong_currents"], Some("southern_ocean")),
    ("karimata_strait", "Karimata Strait", -2.0, 108.5, WaypointCategory::Strait, Some(40.0), &[], None),
    ("central_america_pacific", "Central America Pacific", 6.5, -83.0, WaypointCategory::Waypoint, Some(3000.0), &[], None),
    ("mexico_pacific", "Mexico Pacific", 15.5, -100.0, WaypointCategory::Waypoint, Some(3500.0), &[], None),
    ("baja_california", "Baja California", 22.0, -110.5, WaypointCategory::Waypoint, Some(3000.0), &[], Some("north_pacific")),
    ("kyushu_south", "South of Kyushu", 30.3, 130.0, WaypointCategory::Waypoint, Some(1000.0), &[], Some("north_pacific")),
    ("laccadive_sea", "Laccadive Sea", 10.5, 74.8, WaypointCategory::Waypoint, Some(2000.0), &[], Some("arabian_sea")),
    ("cape_comorin", "Cape Comorin", 7.0, 77.0, WaypointCategory::Waypoint, Some(1000.0), &[], Some("arabian_sea")),
    ("arabian_sea", "Arabian Sea", 17.0, 57.0, WaypointCategory::Waypoint, Some(4000.0), &[], Some("arabian_sea")),
    ("bay_of_bengal", "Bay of Bengal", 9.5, 86.0, WaypointCategory::Waypoint, Some(3500.0), &[], Some("bay_of_bengal")),
    ("pratas", "Pratas Approach", 20.7, 116.7, WaypointCategory::Waypoint, Some(1000.0), &[], Some("south_china_sea")),
    ("hormuz_approach", "Hormuz Approach", 26.2, 55.2, WaypointCategory::Waypoint, Some(70.0), &[TSS], None),
    ("gulf_of_panama", "Gulf of Panama", 7.0, -80.0, WaypointCategory::Waypoint, Some(150.0), &[], None),
    ("abrolhos", "Abrolhos Bank", -18.5, -37.5, WaypointCategory::Waypoint, Some(60.0), &[], None),
    ("cabo_frio", "Cabo Frio", -23.6, -42.0, WaypointCategory::Waypoint, Some(100.0), &[], None),
];

const LAND_MASSES: &[(&str, &[(f64, f64)])] = &[
    (
        "europe",
        &[
            (36.45, -5.9), (36.9, -8.5), (38.2, -8.8), (38.95, -9.0), (42.9, -8.9), (43.45, -7.9),
            (43.35, -2.0), (46.0, -1.3), (47.4, -2.6), (48.15, -4.4), (48.7, -3.2), (48.9, -1.6),
            (49.5, -1.4), (49.6, 0.2), (50.6, 1.6), (51.0, 2.3), (51.35, 3.4), (52.2, 4.45),
            (53.3, 5.9), (53.6, 8.5), (54.6, 8.7), (55.0, 14.0), (54.5, 20.0), (46.0, 30.0),
            (41.4, 28.8), (40.8, 26.2), (40.6, 23.0), (38.3, 23.3), (37.6, 22.8), (36.6, 22.5),
            (37.0, 21.7), (38.2, 21.4), (39.5, 20.3), (41.8, 19.5), (43.5, 16.5), (45.3, 13.7),
            (45.5, 12.6), (44.0, 12.4), (42.0, 15.3), (40.9, 17.2), (40.2, 18.4), (39.0, 17.1),
            (38.0, 16.1), (38.3, 15.7), (39.8, 15.7), (40.6, 14.3), (41.2, 13.2), (42.4, 11.2),
            (43.9, 10.0), (44.5, 8.5), (43.8, 7.5), (43.45, 6.2), (43.55, 4.6), (43.0, 3.2),
            (42.2, 3.2), (41.6, 2.0), (40.6, 0.7), (39.5, -0.3), (38.7, -0.1), (37.6, -0.8),
            (36.75, -2.1), (36.75, -4.4),
        ],
    ),
    (
        "great_britain",
        &[
            (50.1, -5.6), (50.6, -2.0), (50.8, 0.3), (51.3, 1.0), (51.8, 1.3), (52.9, 1.6),
            (53.6, 0.2), (55.0, -1.4), (57.6, -1.8), (58.6, -3.0), (58.5, -5.0), (56.0, -6.2),
            (54.5, -3.5), (53.3, -4.6), (52.0, -5.0), (51.6, -3.0), (51.2, -4.3),
        ],
    ),
    (
        "africa",
        &[
            (35.5, -5.6), (35.3, -2.5), (36.6, 3.0), (36.9, 8.0), (37.0, 10.2), (36.8, 11.0),
            (35.5, 10.9), (34.0, 10.2), (33.0, 11.3), (32.5, 15.0), (30.5, 19.0), (32.7, 21.5),
            (32.8, 23.0), (31.5, 25.0), (31.1, 29.0), (31.0, 31.8), (29.7, 32.2), (28.0, 33.0),
            (24.0, 35.3), (22.0, 36.6), (18.0, 38.3), (15.5, 39.6), (13.5, 41.6), (12.2, 43.0),
            (11.5, 43.5), (10.5, 45.0), (11.3, 49.0), (11.8, 51.2), (2.0, 45.5), (-4.0, 39.7),
            (-10.5, 40.5), (-15.0, 40.7), (-20.0, 35.0), (-25.9, 33.0), (-29.8, 30.8),
            (-33.1, 27.6), (-34.1, 25.6), (-34.5, 20.0), (-34.0, 18.7), (-33.0, 18.4),
            (-29.0, 16.8), (-22.0, 14.2), (-17.0, 11.7), (-12.0, 13.6), (-6.0, 12.2), (-1.0, 9.0),
            (4.0, 9.5), (4.5, 6.0), (6.3, 2.0), (4.8, -2.0), (4.5, -7.5), (7.5, -13.0),
            (10.5, -15.0), (14.7, -17.3), (21.0, -17.0), (27.5, -13.2), (30.0, -9.8), (33.5, -8.0),
            (35.5, -6.1),
        ],
    ),
    (
        "asia",
        &[
            (31.1, 32.8), (30.0, 32.85), (28.3, 33.9), (27.9, 34.3), (28.0, 35.0), (26.0, 36.5),
            (22.5, 39.2), (18.0, 41.8), (15.5, 42.8), (13.0, 43.6), (13.0, 45.0), (13.8, 48.0),
            (15.5, 52.0), (17.2, 53.5), (17.6, 55.5), (19.5, 57.8), (22.3, 59.6), (23.7, 58.4),
            (24.8, 56.3), (26.0, 56.1), (25.4, 55.6), (24.6, 54.6), (24.1, 52.0), (25.9, 50.2),
            (29.3, 48.1), (30.1, 48.9), (29.0, 50.8), (27.6, 52.4), (27.2, 55.0), (27.0, 56.8),
            (25.9, 57.7), (25.3, 61.5), (25.2, 66.5), (23.8, 68.3), (22.5, 70.0), (20.5, 72.8),
            (19.2, 73.0), (15.5, 73.7), (12.0, 74.8), (8.3, 77.0), (8.9, 78.3), (10.3, 79.3),
            (13.1, 80.2), (15.8, 80.9), (17.0, 82.3), (20.0, 86.6), (21.5, 88.0), (22.0, 90.5),
            (21.0, 92.2), (16.0, 94.5), (16.5, 97.5), (13.0, 98.6), (9.0, 98.3), (7.0, 99.9),
            (5.5, 100.3), (3.2, 101.3), (2.2, 102.7), (1.6, 103.7), (1.6, 104.2), (2.7, 103.6),
            (5.5, 103.0), (6.5, 102.0), (8.6, 104.8), (10.5, 107.0), (12.5, 109.3), (16.0, 108.3),
            (19.0, 105.8), (21.5, 108.0), (21.5, 110.0), (22.5, 114.0), (23.0, 116.5),
            (25.0, 119.0), (27.0, 120.2), (30.0, 121.7), (31.5, 121.5), (35.0, 119.5),
            (37.4, 122.5), (38.0, 118.8), (39.5, 119.5), (39.8, 124.0), (37.5, 126.5),
            (34.7, 126.3), (34.8, 127.9), (35.3, 129.2), (37.5, 129.2), (42.5, 130.5),
            (48.0, 140.0), (53.0, 141.3), (60.0, 150.0), (65.0, 170.0), (70.0, 160.0),
            (75.0, 100.0), (70.0, 60.0), (68.0, 40.0), (60.0, 30.0), (46.0, 38.0), (41.0, 41.5),
            (42.0, 33.0), (41.2, 29.2), (40.0, 26.5), (38.5, 26.9), (37.0, 27.4), (36.6, 30.5),
            (36.2, 33.5), (36.9, 35.8), (35.0, 35.9), (33.0, 35.1), (31.6, 34.4),
        ],
    ),
    (
        "sri_lanka",
        &[
            (9.7, 80.0), (8.5, 81.3), (6.9, 81.9), (6.2, 81.2), (6.3, 80.3), (7.2, 79.9),
            (8.5, 79.8),
        ],
    ),
    (
        "japan",
        &[
            (31.0, 130.5), (33.8, 130.2), (35.5, 133.0), (37.0, 137.0), (41.5, 140.0),
            (45.5, 142.0), (43.0, 145.5), (40.0, 141.9), (36.0, 140.8), (35.3, 140.4),
            (35.1, 138.6), (34.0, 136.0), (33.5, 135.2), (33.0, 132.0),
        ],
    ),
    (
        "sumatra",
        &[
            (5.3, 95.4), (4.3, 98.0), (3.0, 99.8), (1.5, 101.8), (0.6, 103.4), (-3.0, 106.0),
            (-5.5, 104.5), (-4.0, 102.0), (0.0, 98.8), (3.0, 96.0),
        ],
    ),
    (
        "north_america",
        &[
            (60.0, -140.0), (58.0, -136.0), (49.0, -124.5), (40.0, -124.0), (34.5, -120.5),
            (34.0, -118.5), (32.5, -117.2), (30.0, -115.6), (23.0, -110.0), (20.0, -105.5),
            (16.0, -95.0), (14.0, -91.5), (11.0, -86.0), (8.5, -83.5), (8.0, -81.0), (9.0, -80.7),
            (10.5, -83.5), (11.0, -83.7), (15.5, -84.0), (16.0, -88.0), (21.5, -87.0),
            (21.0, -90.5), (18.5, -95.0), (22.0, -97.8), (28.0, -97.0), (29.5, -93.0),
            (29.0, -89.0), (30.3, -86.0), (29.8, -84.0), (25.5, -81.2), (25.3, -80.4),
            (27.0, -80.0), (31.0, -81.3), (35.0, -76.0), (37.0, -76.0), (39.8, -74.15),
            (40.6, -74.1), (40.75, -73.3), (41.0, -72.0), (41.5, -70.0), (43.5, -70.0),
            (44.5, -66.5), (43.5, -65.8), (45.0, -61.0), (47.5, -52.7), (51.5, -55.5),
            (55.0, -59.0), (60.0, -64.5), (63.0, -78.0), (70.0, -80.0), (70.0, -140.0),
        ],
    ),
    (
        "south_america",
        &[
            (9.0, -78.5), (11.0, -75.0), (12.2, -72.0), (10.7, -68.0), (10.5, -62.0), (8.5, -60.0),
            (5.0, -52.5), (1.5, -50.0), (-1.0, -48.0), (-2.5, -40.0), (-5.2, -35.5), (-8.0, -35.2),
            (-13.0, -38.6), (-18.0, -39.5), (-22.9, -42.0), (-23.6, -46.0), (-25.5, -48.3),
            (-28.5, -48.8), (-34.0, -53.5), (-35.0, -57.0), (-38.5, -58.0), (-41.0, -63.0),
            (-46.0, -67.5), (-52.0, -68.5), (-55.0, -67.0), (-52.0, -74.5), (-40.0, -73.7),
            (-30.0, -71.5), (-18.5, -70.4), (-14.0, -76.2), (-5.0, -81.2), (-1.0, -80.5),
            (1.5, -79.0), (7.0, -77.8), (8.0, -78.9),
        ],
    ),
];

// Lanes are listed as waypoint ids and expanded to coordinates at load time.
const SHIPPING_LANES: &[(&str, &[&str])] = &[
    (
        "europe_asia_suez",
        &[
            "rotterdam", "dover_strait", "ushant", "cape_finisterre", "cape_st_vincent",
            "gibraltar", "algiers_offshore", "sicily_channel", "crete_south", "port_said", "suez",
            "gulf_of_suez", "red_sea_south", "bab_el_mandeb", "gulf_of_aden", "socotra_north",
            "dondra_head", "six_degree_channel", "malacca_north", "malacca_south", "singapore",
        ],
    ),
    (
        "europe_asia_cape",
        &[
            "rotterdam", "dover_strait", "ushant", "cape_finisterre", "las_palmas", "cape_verde",
            "gulf_of_guinea", "cape_town", "cape_of_good_hope", "agulhas", "east_london_offshore",
            "mauritius", "sunda_strait", "karimata_strait", "singapore_strait_east", "singapore",
        ],
    ),
    (
        "north_atlantic",
        &[
            "rotterdam", "dover_strait", "ushant", "mid_atlantic", "new_york",
        ],
    ),
    (
        "asia_pacific",
        &[
            "singapore", "singapore_strait_east", "south_china_sea", "hong_kong", "pratas",
            "taiwan_strait", "shanghai", "busan", "kyushu_south", "tokyo",
        ],
    ),
    (
        "transpacific",
        &[
            "tokyo", "honolulu", "los_angeles",
        ],
    ),
    (
        "americas",
        &[
            "new_york", "windward_passage", "panama_atlantic", "panama_pacific", "gulf_of_panama",
            "central_america_pacific", "mexico_pacific", "baja_california", "los_angeles",
        ],
    ),
    (
        "gulf_feeder",
        &[
            "jebel_ali", "hormuz_approach", "hormuz", "ras_al_hadd", "mumbai", "laccadive_sea",
            "cape_comorin", "colombo", "dondra_head",
        ],
    ),
    (
        "gulf_suez",
        &[
            "jebel_ali", "hormuz_approach", "hormuz", "ras_al_hadd", "arabian_sea", "socotra_north",
        ],
    ),
    (
        "bay_of_bengal",
        &[
            "chennai", "bay_of_bengal", "six_degree_channel",
        ],
    ),
    (
        "south_atlantic",
        &[
            "cape_verde", "recife", "abrolhos", "cabo_frio", "santos",
        ],
    ),
];

// id, name, season months, seasonal hazards
const WEATHER_ZONES: &[(&str, &str, &[u32], &[&str])] = &[
    (
        "north_atlantic",
        "North Atlantic winter storm belt",
        &[11, 12, 1, 2, 3],
        &["storm", "high waves"],
    ),
    (
        "arabian_sea",
        "Arabian Sea south-west monsoon",
        &[6, 7, 8],
        &["high waves", "high winds"],
    ),
    (
        "bay_of_bengal",
        "Bay of Bengal cyclone seasons",
        &[4, 5, 10, 11],
        &["storm"],
    ),
    (
        "south_china_sea",
        "South China Sea typhoon season",
        &[7, 8, 9, 10],
        &["storm", "high winds"],
    ),
    (
        "north_pacific",
        "North Pacific winter lows",
        &[12, 1, 2, 3],
        &["storm", "high waves"],
    ),
    (
        "southern_ocean",
        "Southern Ocean winter swell",
        &[5, 6, 7, 8],
        &["high waves", "strong currents"],
    ),
];

fn build_dataset() -> RegistryDataset {
    let waypoints: Vec<Waypoint> = WAYPOINTS
        .iter()
        .map(
            |&(id, name, latitude, longitude, category, depth_m, restrictions, zone)| Waypoint {
                id: id.to_string(),
                name: name.to_string(),
                position: Coordinate {
                    latitude,
                    longitude,
                },
                category,
                depth_m,
                restrictions: restrictions.iter().map(|tag| tag.to_string()).collect(),
                weather_zone: zone.map(str::to_string),
            },
        )
        .collect();

    let land_masses = LAND_MASSES
        .iter()
        .map(|&(name, vertices)| LandMass {
            name: name.to_string(),
            vertices: vertices.iter().map(|&point| Coordinate::from(point)).collect(),
        })
        .collect();

    let shipping_lanes = SHIPPING_LANES
        .iter()
        .map(|&(name, ids)| ShippingLane {
            name: name.to_string(),
            points: ids
                .iter()
                .filter_map(|id| {
                    waypoints
                        .iter()
                        .find(|waypoint| waypoint.id == *id)
                        .map(|waypoint| waypoint.position)
                })
                .collect(),
        })
        .collect();

    let weather_zones = WEATHER_ZONES
        .iter()
        .map(|&(id, name, months, hazards)| WeatherZone {
            id: id.to_string(),
            name: name.to_string(),
            season_months: months.to_vec(),
            seasonal_hazards: hazards.iter().map(|tag| Hazard::parse(tag)).collect(),
        })
        .collect();

    RegistryDataset {
        version: BUILTIN_DATASET_VERSION.to_string(),
        waypoints,
        land_masses,
        shipping_lanes,
        weather_zones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanes_resolve_every_waypoint_id() {
        let dataset = BuiltinDataset::dataset();
        for (lane, &(_, ids)) in dataset.shipping_lanes.iter().zip(SHIPPING_LANES) {
            assert_eq!(lane.points.len(), ids.len(), "lane {} lost points", lane.name);
        }
    }

    #[test]
    fn dataset_is_versioned() {
        let dataset = BuiltinDataset.load().expect("builtin dataset loads");
        assert_eq!(dataset.version, BUILTIN_DATASET_VERSION);
        assert_eq!(dataset.land_masses.len(), 9);
        assert_eq!(dataset.shipping_lanes.len(), 10);
        assert_eq!(dataset.weather_zones.len(), 6);
    }

    #[test]
    fn lane_legs_keep_the_default_safety_margin() {
        let dataset = BuiltinDataset::dataset();
        let oracle = crate::land::LandAvoidance::new(&dataset.land_masses);
        for lane in &dataset.shipping_lanes {
            for leg in lane.points.windows(2) {
                assert!(
                    oracle.is_safe_passage(leg[0], leg[1], 10.0),
                    "lane {} leg {:?} -> {:?} passes too close to land",
                    lane.name,
                    leg[0],
                    leg[1]
                );
            }
        }
    }
}
