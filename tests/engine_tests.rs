/// Cross-module tests for the estimation engine: codec round trips, the
/// moving-truck override, and selection/aggregation behavior over real
/// pricing output.
use std::path::Path;

use whatsthemove::codec::{self, CityRegistry};
use whatsthemove::distance::DistanceResult;
use whatsthemove::models::query::{MoveQuery, TransportMode, YearMonth};
use whatsthemove::pricing::modes::{self, CostCategory, PricedOption};
use whatsthemove::pricing::PricingTables;
use whatsthemove::selection::{CategorySlot, CostSheet};

fn decode_path(path: &str, reference_year: i32) -> MoveQuery {
    let parts: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    assert_eq!(parts.len(), 7, "path {path} should have 7 segments");
    codec::decode(
        parts[0], parts[1], parts[2], parts[3], parts[4], parts[5], parts[6],
        reference_year,
    )
    .unwrap()
}

fn query(transport: Option<TransportMode>) -> MoveQuery {
    MoveQuery {
        origin: "Madison, WI".to_string(),
        destination: "Seattle, WA".to_string(),
        start: YearMonth::new(2025, 6),
        end: YearMonth::new(2025, 8),
        transport,
        needs_moving_truck: false,
        wants_moving_help: false,
        housing_budget: 1400,
    }
}

#[test]
fn codec_round_trips_every_mode() {
    let registry = CityRegistry::new(&["Madison, WI", "Seattle, WA"]);

    for mode in TransportMode::ALL {
        let original = query(Some(mode));
        let decoded = decode_path(&codec::encode(&original), 2025);

        let restored = MoveQuery {
            origin: registry.display_name(&decoded.origin),
            destination: registry.display_name(&decoded.destination),
            ..decoded
        };
        // The moving-truck mode bit also decodes back to moving-truck even
        // though the flags segment said "0?": the segment carries exactly
        // one set bit, which is that mode's own position.
        assert_eq!(restored, original, "round trip failed for {mode:?}");
    }
}

#[test]
fn truck_flag_overrides_any_selected_mode() {
    let mut original = query(Some(TransportMode::Plane));
    original.needs_moving_truck = true;

    let path = codec::encode(&original);
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    assert_eq!(segments[4], "10");
    assert_eq!(segments[5], codec::TRUCK_TRANSPORT_SEGMENT);

    let decoded = decode_path(&path, 2025);
    assert_eq!(decoded.effective_transport(), Some(TransportMode::MovingTruck));
}

#[test]
fn truck_move_prices_and_toggles_exactly() {
    // The full moving-truck scenario: 2000 driving miles, truck base
    // round(2000 * 0.3087) = 617, travel forced to zero, and toggling the
    // truck option moves the grand total by exactly its cost.
    let tables = PricingTables::without_flight_data();
    let distance = DistanceResult {
        driving_miles: Some(2000.0),
        straight_line_miles: None,
    };

    let travel = modes::travel_estimate(Some(TransportMode::MovingTruck), &distance, &tables);
    assert!(travel.options.is_empty());

    let truck = modes::moving_truck_estimate(&distance, &tables);
    let truck_id = truck.options[0].id;
    assert_eq!(truck.options[0].cost, 617);

    let mut sheet = CostSheet::new(
        3200,
        false,
        CategorySlot::from_estimate(travel),
        CategorySlot::from_estimate(truck),
        CategorySlot::inactive(),
    );

    let before = sheet.grand_total();
    assert_eq!(before.travel, 0);
    assert_eq!(before.moving_truck, 0);
    assert_eq!(before.total, 3200);

    let on = sheet.toggle(truck_id).unwrap();
    assert_eq!(on.moving_truck, 617);
    assert_eq!(on.total, before.total + 617);

    let off = sheet.toggle(truck_id).unwrap();
    assert_eq!(off, before);
}

#[test]
fn shipped_flight_table_covers_the_madison_seattle_band() {
    let tables = PricingTables::load(Path::new("data/air_fare_bands.csv")).unwrap();

    // 1617.0 straight-line miles (city-center haversine) must land in a
    // populated band so the plane mode surfaces real carrier options.
    let rows = tables.flight.matches(1617.0);
    assert!(!rows.is_empty());

    let distance = DistanceResult {
        driving_miles: None,
        straight_line_miles: Some(1617.0),
    };
    let estimate = modes::travel_estimate(Some(TransportMode::Plane), &distance, &tables);
    assert_eq!(estimate.options.len(), rows.len());
    assert!(!estimate.used_fallback);

    // Cheapest carrier backs the base.
    let default = estimate
        .options
        .iter()
        .find(|o| Some(o.id) == estimate.default_id)
        .unwrap();
    assert!(estimate.options.iter().all(|o| o.cost >= default.cost));
}

#[test]
fn unmatched_flight_distance_falls_back_flat() {
    let tables = PricingTables::load(Path::new("data/air_fare_bands.csv")).unwrap();
    let distance = DistanceResult {
        driving_miles: None,
        straight_line_miles: Some(25_000.0),
    };
    let estimate = modes::travel_estimate(Some(TransportMode::Plane), &distance, &tables);
    assert!(estimate.used_fallback);
    assert_eq!(estimate.options.len(), 1);
    assert_eq!(estimate.options[0].cost, modes::FLAT_PLANE);
}

#[test]
fn toggling_is_idempotent_per_category_across_many_rounds() {
    let options: Vec<PricedOption> = (0..5i64)
        .map(|i| PricedOption::new(CostCategory::Travel, format!("carrier {i}"), 100 + i * 37))
        .collect();
    let ids: Vec<_> = options.iter().map(|o| o.id).collect();

    let mut sheet = CostSheet::new(
        1000,
        false,
        CategorySlot::with_cheapest_default(options, false),
        CategorySlot::inactive(),
        CategorySlot::inactive(),
    );
    let base = sheet.grand_total();

    for id in &ids {
        sheet.toggle(*id).unwrap();
        sheet.toggle(*id).unwrap();
        assert_eq!(sheet.grand_total(), base);
    }
}
