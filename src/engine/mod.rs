//! Calculation engines for the development envelope
//!
//! Each engine is a pure function of the project input and one rule table.
//! [`calculate`] runs them in dependency order:
//! FSI, setbacks and height first, then built-up area, then parking and
//! ancillary allowances.

pub mod ancillary;
pub mod built_up;
pub mod fsi;
pub mod height;
pub mod parking;
pub mod setback;
pub mod types;

pub use ancillary::compute_ancillary_areas;
pub use built_up::compute_built_up_area;
pub use fsi::compute_fsi;
pub use height::{compute_height, permissible_height};
pub use parking::compute_parking;
pub use setback::{compute_setbacks, road_derived_front};
pub use types::*;

use crate::input::ProjectInput;
use crate::lint;
use crate::rules::RuleBook;

/// Floor count used to spread built-up area: the proposal when one was
/// given, otherwise the permissible maximum
pub fn effective_floors(input: &ProjectInput, height: &HeightResult) -> u32 {
    input
        .proposed_floors
        .filter(|floors| *floors > 0)
        .unwrap_or(height.max_floors)
}

/// Run every engine and assemble the combined result
///
/// Never fails. The input is expected to have passed through
/// [`crate::input::sanitize`] or to have been built directly with valid
/// values.
pub fn calculate(input: &ProjectInput, rules: &RuleBook) -> CalculationResult {
    let group = rules.group_of(input.jurisdiction);

    // Leaf engines
    let fsi = compute_fsi(input, group, &rules.fsi);
    let setbacks = compute_setbacks(
        input,
        group,
        &rules.setback,
        rules.height.standard_floor_height,
    );
    let height = compute_height(input, group, &rules.height);

    // Area derived from FSI and floor count
    let floors = effective_floors(input, &height);
    let built_up_area = compute_built_up_area(input.plot_area, fsi.current_fsi, floors);

    // Allowances derived from built-up area
    let parking = compute_parking(
        input.land_use,
        built_up_area.total_built_up_area,
        input.dwelling_unit_count,
        input.carpet_area_per_unit,
        &rules.parking,
    );
    let ancillary_areas =
        compute_ancillary_areas(built_up_area.total_built_up_area, floors, &rules.ancillary);

    let summary = CalculationSummary {
        jurisdiction: input.jurisdiction,
        jurisdiction_group: group,
        zone_type: input.zone_type,
        land_use: input.land_use,
        permissible_fsi: fsi.current_fsi,
        max_fsi: fsi.max_fsi,
        max_built_up_area: built_up_area.total_built_up_area,
        ancillary_area: ancillary_areas.total_ancillary_area,
        total_constructible_area: ancillary_areas.total_constructible_area,
        max_height: height.max_height,
        max_floors: height.max_floors,
        required_parking: parking.required_standard_car_space_units,
        front_setback: setbacks.front,
        rear_setback: setbacks.rear,
        side1_setback: setbacks.side1,
        side2_setback: setbacks.side2,
    };

    tracing::debug!(
        jurisdiction = %input.jurisdiction,
        group = %group,
        zone = %input.zone_type,
        fsi = fsi.current_fsi,
        built_up = built_up_area.total_built_up_area,
        parking = parking.required_standard_car_space_units,
        "envelope calculated"
    );

    let mut result = CalculationResult {
        fsi,
        setbacks,
        height,
        built_up_area,
        parking,
        ancillary_areas,
        summary,
        warnings: Vec::new(),
        citations: Vec::new(),
    };
    result.warnings = lint::check(input, &result, rules);
    result
}
