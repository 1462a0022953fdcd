//! Ancillary (non-FSI) construction allowances
//!
//! Stairs, lifts, tanks, service ducts and roof head-room are excluded from
//! FSI accounting and are reported apart from the built-up area.

use crate::rules::AncillaryRules;

use super::types::AncillaryAreaResult;

pub fn compute_ancillary_areas(
    built_up_area: f64,
    effective_floors: u32,
    rules: &AncillaryRules,
) -> AncillaryAreaResult {
    let built_up_area = built_up_area.max(0.0);

    let stairs_and_lift_area = built_up_area * rules.stairs_and_lift;
    let water_tank_area = built_up_area * rules.water_tank;
    let services_area = built_up_area * rules.services;
    let roof_head_room_area = if effective_floors > 0 && built_up_area > 0.0 {
        rules.roof_head_room
    } else {
        0.0
    };

    let total_ancillary_area =
        stairs_and_lift_area + roof_head_room_area + water_tank_area + services_area;

    AncillaryAreaResult {
        stairs_and_lift_area,
        roof_head_room_area,
        water_tank_area,
        services_area,
        total_ancillary_area,
        total_constructible_area: built_up_area + total_ancillary_area,
    }
}
