//! Maximum height and floor count

use crate::input::{JurisdictionGroup, ProjectInput};
use crate::rules::{HeightEntry, HeightRules};

use super::types::HeightResult;

/// Table limits after the narrow-road ceiling is applied
pub fn permissible_height(
    input: &ProjectInput,
    group: JurisdictionGroup,
    rules: &HeightRules,
) -> HeightEntry {
    let entry = *rules.table(group).get(input.zone_type);
    if input.road_width < rules.narrow_road_width {
        HeightEntry {
            max_height: entry.max_height.min(rules.narrow_road_max_height),
            max_floors: entry.max_floors.min(rules.narrow_road_max_floors),
        }
    } else {
        entry
    }
}

/// Compute the height envelope and check any proposal against it
///
/// An explicit proposed height always wins over the height derived from the
/// proposed floor count. Disagreement between the two is reported by
/// [`crate::lint::check`], not here.
pub fn compute_height(
    input: &ProjectInput,
    group: JurisdictionGroup,
    rules: &HeightRules,
) -> HeightResult {
    let limits = permissible_height(input, group, rules);

    let proposed_height = match (input.proposed_height, input.proposed_floors) {
        (Some(height), _) => Some(height),
        (None, Some(floors)) => Some(floors as f64 * rules.standard_floor_height),
        (None, None) => None,
    };

    let height_ok = proposed_height.map_or(true, |h| h <= limits.max_height);
    let floors_ok = input
        .proposed_floors
        .map_or(true, |f| f <= limits.max_floors);

    HeightResult {
        max_height: limits.max_height,
        max_floors: limits.max_floors,
        standard_floor_height: rules.standard_floor_height,
        proposed_height,
        proposed_floors: input.proposed_floors,
        is_compliant: height_ok && floors_ok,
    }
}
