//! Required parking in standard car-space units

use crate::input::LandUse;
use crate::rules::ParkingRules;

use super::types::ParkingResult;

/// Compute required parking
///
/// Residential projects with a known dwelling mix are sized per dwelling.
/// Everything else is sized by built-up area per car space, rounded up.
pub fn compute_parking(
    land_use: LandUse,
    built_up_area: f64,
    dwelling_unit_count: Option<u32>,
    carpet_area_per_unit: Option<f64>,
    rules: &ParkingRules,
) -> ParkingResult {
    let units = match (land_use, dwelling_unit_count, carpet_area_per_unit) {
        (LandUse::Residential, Some(count), Some(carpet_area)) => {
            count.saturating_mul(rules.units_per_dwelling(carpet_area))
        }
        _ => units_by_area(built_up_area, rules.area_per_car_space.get(land_use)),
    };

    ParkingResult {
        required_standard_car_space_units: units,
        estimated_parking_area: units as f64 * rules.area_per_unit,
    }
}

fn units_by_area(built_up_area: f64, area_per_car_space: f64) -> u32 {
    if built_up_area <= 0.0 || area_per_car_space <= 0.0 {
        return 0;
    }
    (built_up_area / area_per_car_space).ceil() as u32
}
