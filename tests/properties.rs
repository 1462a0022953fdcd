//! Property-based tests for the envelope engines.

use dev_envelope::engine::{compute_ancillary_areas, compute_parking};
use dev_envelope::{calculate_all, Jurisdiction, LandUse, ProjectInput, RuleBook, ZoneType};
use proptest::prelude::*;

fn jurisdiction() -> impl Strategy<Value = Jurisdiction> {
    prop::sample::select(Jurisdiction::ALL.to_vec())
}

fn zone() -> impl Strategy<Value = ZoneType> {
    prop::sample::select(vec![
        ZoneType::Residential,
        ZoneType::Commercial,
        ZoneType::Industrial,
        ZoneType::Mixed,
    ])
}

fn land_use() -> impl Strategy<Value = LandUse> {
    prop::sample::select(vec![
        LandUse::Residential,
        LandUse::Commercial,
        LandUse::RetailMall,
        LandUse::Restaurant,
        LandUse::Industrial,
        LandUse::Mixed,
    ])
}

prop_compose! {
    fn project()(
        jurisdiction in jurisdiction(),
        zone in zone(),
        plot_area in 1.0f64..20_000.0,
        road_width in 0.0f64..80.0,
        floors in prop::option::of(1u32..40),
        height in prop::option::of(3.0f64..150.0),
        tod in any::<bool>(),
        heritage in any::<bool>(),
    ) -> ProjectInput {
        let mut input = ProjectInput::new(jurisdiction, zone, plot_area)
            .with_road_width(road_width)
            .with_transit_oriented_zone(tod)
            .with_heritage_building(heritage);
        input.proposed_floors = floors;
        input.proposed_height = height;
        input
    }
}

proptest! {
    // ========================
    // FSI
    // ========================

    #[test]
    fn current_fsi_never_exceeds_max(input in project()) {
        let fsi = calculate_all(&input).fsi;
        prop_assert!(fsi.current_fsi <= fsi.max_fsi);
    }

    #[test]
    fn wide_road_never_lowers_fsi(input in project(), narrow in 0.0f64..12.0, wide in 12.0f64..80.0) {
        let before = calculate_all(&input.clone().with_road_width(narrow)).fsi.current_fsi;
        let after = calculate_all(&input.with_road_width(wide)).fsi.current_fsi;
        prop_assert!(after >= before);
    }

    #[test]
    fn tdr_zero_on_small_plots(input in project(), plot_area in 0.0f64..=1000.0) {
        let mut input = input;
        input.plot_area = plot_area;
        prop_assert_eq!(calculate_all(&input).fsi.transferable_development_fsi, 0.0);
    }

    #[test]
    fn tdr_fills_gap_to_max_on_large_plots(input in project(), plot_area in 1000.001f64..50_000.0) {
        let mut input = input;
        input.plot_area = plot_area;
        let fsi = calculate_all(&input).fsi;
        prop_assert_eq!(fsi.transferable_development_fsi, (fsi.max_fsi - fsi.current_fsi).max(0.0));
    }

    // ========================
    // Setbacks
    // ========================

    #[test]
    fn front_setback_capped(input in project(), road_width in 0.0f64..10_000.0) {
        let setbacks = calculate_all(&input.with_road_width(road_width)).setbacks;
        prop_assert!(setbacks.front <= 6.0);
        prop_assert!(setbacks.front >= 0.0);
        prop_assert!(setbacks.rear >= 0.0);
        prop_assert!(setbacks.side1 >= 0.0 && setbacks.side2 >= 0.0);
    }

    // ========================
    // Area identities
    // ========================

    #[test]
    fn built_up_is_plot_times_fsi(input in project()) {
        let result = calculate_all(&input);
        let expected = input.plot_area * result.fsi.current_fsi;
        prop_assert!((result.built_up_area.total_built_up_area - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn constructible_is_built_up_plus_ancillary(input in project()) {
        let result = calculate_all(&input);
        let a = &result.ancillary_areas;
        prop_assert_eq!(
            a.total_constructible_area,
            result.built_up_area.total_built_up_area + a.total_ancillary_area
        );
    }

    #[test]
    fn ancillary_identity_direct(area in 0.0f64..1_000_000.0, floors in 0u32..50) {
        let a = compute_ancillary_areas(area, floors, &RuleBook::builtin().ancillary);
        prop_assert_eq!(a.total_constructible_area, area + a.total_ancillary_area);
    }

    // ========================
    // Parking
    // ========================

    #[test]
    fn parking_monotone_in_area(use_ in land_use(), a in 0.0f64..100_000.0, delta in 0.0f64..10_000.0) {
        let rules = &RuleBook::builtin().parking;
        let small = compute_parking(use_, a, None, None, rules).required_standard_car_space_units;
        let large = compute_parking(use_, a + delta, None, None, rules).required_standard_car_space_units;
        prop_assert!(large >= small);
    }

    #[test]
    fn parking_area_matches_units(use_ in land_use(), a in 0.0f64..100_000.0) {
        let p = compute_parking(use_, a, None, None, &RuleBook::builtin().parking);
        prop_assert_eq!(p.estimated_parking_area, p.required_standard_car_space_units as f64 * 25.0);
    }

    // ========================
    // Height
    // ========================

    #[test]
    fn compliance_matches_limits(input in project()) {
        let h = calculate_all(&input).height;
        let floors_ok = h.proposed_floors.map_or(true, |f| f <= h.max_floors);
        let height_ok = h.proposed_height.map_or(true, |v| v <= h.max_height);
        prop_assert_eq!(h.is_compliant, floors_ok && height_ok);
    }

    #[test]
    fn narrow_road_ceiling(input in project(), road_width in 0.0f64..9.0) {
        let h = calculate_all(&input.with_road_width(road_width)).height;
        prop_assert!(h.max_height <= 12.0);
        prop_assert!(h.max_floors <= 3);
    }
}
