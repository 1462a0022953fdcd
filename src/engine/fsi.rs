//! Floor space index
//!
//! The by-right, purchasable and transferable-rights tracks are reported
//! separately. A user needs to know which portion of the floor area is free,
//! which must be bought, and which needs a market transaction.

use crate::input::{JurisdictionGroup, ProjectInput};
use crate::rules::FsiRules;

use super::types::{FsiBuiltUpAreas, FsiResult};

/// Compute the permissible FSI tracks for a plot
pub fn compute_fsi(
    input: &ProjectInput,
    group: JurisdictionGroup,
    rules: &FsiRules,
) -> FsiResult {
    let entry = *rules.table(group).get(input.zone_type);
    let plot_area = input.plot_area.max(0.0);

    let road_bonus = if input.road_width >= rules.road_bonus_min_width {
        rules.road_bonus
    } else {
        0.0
    };

    let mut transit_and_heritage_bonus = 0.0;
    if input.is_transit_oriented_zone {
        transit_and_heritage_bonus += rules.transit_bonus;
    }
    if input.is_heritage_building {
        transit_and_heritage_bonus += rules.heritage_bonus;
    }

    let current_fsi = (entry.basic + road_bonus + transit_and_heritage_bonus).min(entry.max);

    let transferable_development_fsi = if plot_area > rules.tdr_min_plot_area {
        (entry.max - current_fsi).max(0.0)
    } else {
        0.0
    };

    tracing::trace!(
        group = %group,
        zone = %input.zone_type,
        basic = entry.basic,
        current = current_fsi,
        max = entry.max,
        "fsi tracks"
    );

    FsiResult {
        basic_fsi: entry.basic,
        road_bonus,
        transit_and_heritage_bonus,
        current_fsi,
        purchasable_premium_fsi: entry.premium,
        transferable_development_fsi,
        max_fsi: entry.max,
        built_up_area: FsiBuiltUpAreas {
            using_basic_only: plot_area * current_fsi,
            using_purchased_premium: plot_area * (current_fsi + entry.premium).min(entry.max),
            using_transferable_rights: plot_area * entry.max,
        },
    }
}
