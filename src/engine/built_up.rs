//! Built-up area and ground coverage

use super::types::BuiltUpAreaResult;

/// Compute total and per-floor built-up area
///
/// Every division is guarded: a non-positive floor count spreads the whole
/// area over one floor, and a non-positive plot area yields zero coverage.
pub fn compute_built_up_area(plot_area: f64, fsi: f64, effective_floors: u32) -> BuiltUpAreaResult {
    let plot_area = plot_area.max(0.0);
    let total_built_up_area = plot_area * fsi;

    let per_floor_area = if effective_floors > 0 {
        total_built_up_area / effective_floors as f64
    } else {
        total_built_up_area
    };

    let ground_coverage_percent = if plot_area > 0.0 {
        per_floor_area / plot_area * 100.0
    } else {
        0.0
    };

    BuiltUpAreaResult {
        total_built_up_area,
        per_floor_area,
        ground_coverage_percent,
    }
}
