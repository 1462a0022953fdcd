//! Boundary setbacks
//!
//! The front setback follows wide roads but is capped, so an extreme road
//! width never produces a setback deeper than a small plot can absorb.

use crate::input::{JurisdictionGroup, ProjectInput};
use crate::rules::SetbackRules;

use super::types::SetbackResult;

/// Front setback implied by the road alone, before comparing to the band
pub fn road_derived_front(
    road_width: f64,
    group: JurisdictionGroup,
    rules: &SetbackRules,
) -> Option<f64> {
    if road_width < rules.road_width_threshold {
        return None;
    }
    let group_rules = rules.for_group(group);
    Some((road_width * group_rules.road_factor).min(group_rules.front_cap))
}

/// Compute the mandatory setbacks for a plot
///
/// The tall-building rear increment applies to the explicit proposed height,
/// or to proposed floors x `standard_floor_height` when only floors are given.
pub fn compute_setbacks(
    input: &ProjectInput,
    group: JurisdictionGroup,
    rules: &SetbackRules,
    standard_floor_height: f64,
) -> SetbackResult {
    let group_rules = rules.for_group(group);
    let band = group_rules.band_for(input.plot_area);

    let mut front = band.front;
    if let Some(road_front) = road_derived_front(input.road_width, group, rules) {
        front = front.max(road_front);
    }
    front = front.min(group_rules.front_cap);

    let (side1, side2) = match group_rules.side_for_floors(input.proposed_floors.unwrap_or(0)) {
        Some(side) => (side, side),
        None => (band.side1, band.side2),
    };

    let proposed_height = input
        .proposed_height
        .or_else(|| input.proposed_floors.map(|f| f as f64 * standard_floor_height));

    let mut rear = band.rear;
    if let (Some(limit), Some(height)) = (group_rules.tall_building_height, proposed_height) {
        if height > limit {
            rear += group_rules.tall_building_rear_increment;
        }
    }

    SetbackResult {
        front: front.max(0.0),
        rear: rear.max(0.0),
        side1: side1.max(0.0),
        side2: side2.max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Jurisdiction, ZoneType};
    use crate::rules::RuleBook;

    fn setbacks(input: &ProjectInput) -> SetbackResult {
        let book = RuleBook::builtin();
        compute_setbacks(
            input,
            book.group_of(input.jurisdiction),
            &book.setback,
            book.height.standard_floor_height,
        )
    }

    fn metro(plot_area: f64) -> ProjectInput {
        ProjectInput::new(Jurisdiction::Mumbai, ZoneType::Residential, plot_area)
    }

    fn standard(plot_area: f64) -> ProjectInput {
        ProjectInput::new(Jurisdiction::Pune, ZoneType::Residential, plot_area)
    }

    #[test]
    fn test_metro_banded_baseline() {
        let result = setbacks(&metro(250.0));
        assert_eq!(result.front, 3.0);
        assert_eq!(result.rear, 1.5);

        let result = setbacks(&metro(800.0));
        assert_eq!(result.front, 4.5);
        assert_eq!(result.rear, 3.0);
    }

    #[test]
    fn test_road_front_replaces_smaller_baseline() {
        // 15 x 0.33 = 4.95 beats the 3.0 band value
        let result = setbacks(&metro(250.0).with_road_width(15.0));
        assert!((result.front - 4.95).abs() < 1e-9);
    }

    #[test]
    fn test_road_front_never_shrinks_baseline() {
        // 12 x 0.33 = 3.96 is below the 4.5 band value
        let result = setbacks(&metro(800.0).with_road_width(12.0));
        assert_eq!(result.front, 4.5);
    }

    #[test]
    fn test_road_front_ignored_below_threshold() {
        let result = setbacks(&standard(120.0).with_road_width(11.0));
        assert_eq!(result.front, 2.0);
    }

    #[test]
    fn test_front_capped_on_extreme_roads() {
        for road in [24.0, 35.0, 60.0, 1000.0] {
            assert_eq!(setbacks(&metro(400.0).with_road_width(road)).front, 6.0);
            assert_eq!(setbacks(&standard(400.0).with_road_width(road)).front, 6.0);
        }
    }

    #[test]
    fn test_metro_sides_follow_floor_count() {
        assert_eq!(setbacks(&metro(500.0)).side1, 0.0);
        assert_eq!(setbacks(&metro(500.0).with_proposed_floors(2)).side1, 0.0);
        assert_eq!(setbacks(&metro(500.0).with_proposed_floors(3)).side1, 1.5);
        assert_eq!(setbacks(&metro(500.0).with_proposed_floors(4)).side2, 1.5);
        assert_eq!(setbacks(&metro(500.0).with_proposed_floors(5)).side1, 3.0);
        assert_eq!(setbacks(&metro(500.0).with_proposed_floors(40)).side2, 3.0);
    }

    #[test]
    fn test_standard_sides_ignore_floor_count() {
        let low = setbacks(&standard(400.0).with_proposed_floors(1));
        let high = setbacks(&standard(400.0).with_proposed_floors(12));
        assert_eq!(low.side1, 2.25);
        assert_eq!(high.side1, 2.25);
        assert_eq!(low, high);
    }

    #[test]
    fn test_metro_rear_grows_for_tall_buildings() {
        assert_eq!(setbacks(&metro(800.0).with_proposed_height(24.0)).rear, 3.0);
        assert_eq!(setbacks(&metro(800.0).with_proposed_height(24.5)).rear, 4.5);
    }

    #[test]
    fn test_metro_rear_grows_for_tall_floor_count() {
        // 8 floors x 3.5 m = 28 m, above the 24 m limit
        assert_eq!(setbacks(&metro(800.0).with_proposed_floors(8)).rear, 4.5);
        // 6 floors x 3.5 m = 21 m
        assert_eq!(setbacks(&metro(800.0).with_proposed_floors(6)).rear, 3.0);
        // Explicit height wins over the floor count
        let short = metro(800.0).with_proposed_floors(8).with_proposed_height(20.0);
        assert_eq!(setbacks(&short).rear, 3.0);
    }

    #[test]
    fn test_standard_rear_ignores_height() {
        assert_eq!(setbacks(&standard(800.0).with_proposed_height(40.0)).rear, 3.0);
    }

    #[test]
    fn test_road_derived_front() {
        let book = RuleBook::builtin();
        assert_eq!(road_derived_front(10.0, JurisdictionGroup::Standard, &book.setback), None);
        let front = road_derived_front(12.0, JurisdictionGroup::Standard, &book.setback).unwrap();
        assert!((front - 3.6).abs() < 1e-9);
    }
}
