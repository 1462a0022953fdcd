//! Advisory warnings about a completed calculation.
//!
//! Runs after every engine has produced its result and flags situations a
//! reader of the envelope should know about: inconsistent height proposals,
//! proposals exceeding the envelope, and limits that were clamped.
//! Warnings never change a computed value.

use std::fmt;

use serde::Serialize;

use crate::engine::{road_derived_front, CalculationResult};
use crate::input::ProjectInput;
use crate::rules::RuleBook;

/// An advisory note attached to a calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeWarning {
    pub category: WarningCategory,
    pub message: String,
}

/// Category of advisory note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningCategory {
    /// Proposed floors and proposed height disagree
    HeightMismatch,
    /// Proposal exceeds the permissible height or floor count
    Height,
    /// Road-derived front setback was limited by the cap
    Setback,
    /// Height limits were lowered for a narrow road
    NarrowRoad,
    /// Plot area is zero, so every area is zero
    Plot,
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningCategory::HeightMismatch => write!(f, "height-mismatch"),
            WarningCategory::Height => write!(f, "height"),
            WarningCategory::Setback => write!(f, "setback"),
            WarningCategory::NarrowRoad => write!(f, "narrow-road"),
            WarningCategory::Plot => write!(f, "plot"),
        }
    }
}

impl fmt::Display for EnvelopeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Run all checks on a completed calculation.
pub fn check(
    input: &ProjectInput,
    result: &CalculationResult,
    rules: &RuleBook,
) -> Vec<EnvelopeWarning> {
    let mut warnings = Vec::new();
    check_plot(input, &mut warnings);
    check_height_mismatch(input, rules, &mut warnings);
    check_height_limits(input, result, &mut warnings);
    check_narrow_road(input, result, rules, &mut warnings);
    check_front_cap(input, rules, &mut warnings);
    warnings
}

fn warn(warnings: &mut Vec<EnvelopeWarning>, category: WarningCategory, message: String) {
    tracing::trace!(category = %category, %message, "envelope warning");
    warnings.push(EnvelopeWarning { category, message });
}

fn check_plot(input: &ProjectInput, warnings: &mut Vec<EnvelopeWarning>) {
    if input.plot_area <= 0.0 {
        warn(
            warnings,
            WarningCategory::Plot,
            "plot area is zero; every derived area is zero".to_string(),
        );
    }
}

// ── Proposed floors vs proposed height ────────────────────────────

/// Both representations were given and they differ by more than the
/// tolerance. The explicit height is the one carried into the result.
fn check_height_mismatch(
    input: &ProjectInput,
    rules: &RuleBook,
    warnings: &mut Vec<EnvelopeWarning>,
) {
    let (Some(floors), Some(height)) = (input.proposed_floors, input.proposed_height) else {
        return;
    };
    let derived = floors as f64 * rules.height.standard_floor_height;
    if (height - derived).abs() > rules.height.proposal_tolerance {
        warn(
            warnings,
            WarningCategory::HeightMismatch,
            format!(
                "proposed height {:.2} m disagrees with {} floors x {:.2} m = {:.2} m; using {:.2} m",
                height, floors, rules.height.standard_floor_height, derived, height
            ),
        );
    }
}

fn check_height_limits(
    input: &ProjectInput,
    result: &CalculationResult,
    warnings: &mut Vec<EnvelopeWarning>,
) {
    let height = &result.height;
    if let Some(floors) = input.proposed_floors {
        if floors > height.max_floors {
            warn(
                warnings,
                WarningCategory::Height,
                format!(
                    "proposed {} floors exceeds the maximum of {}",
                    floors, height.max_floors
                ),
            );
        }
    }
    if let Some(proposed) = height.proposed_height {
        if proposed > height.max_height {
            warn(
                warnings,
                WarningCategory::Height,
                format!(
                    "proposed height {:.2} m exceeds the maximum of {:.2} m",
                    proposed, height.max_height
                ),
            );
        }
    }
}

fn check_narrow_road(
    input: &ProjectInput,
    result: &CalculationResult,
    rules: &RuleBook,
    warnings: &mut Vec<EnvelopeWarning>,
) {
    if input.road_width >= rules.height.narrow_road_width {
        return;
    }
    let group = rules.group_of(input.jurisdiction);
    let table = *rules.height.table(group).get(input.zone_type);
    let limits = &result.height;
    if limits.max_height < table.max_height || limits.max_floors < table.max_floors {
        warn(
            warnings,
            WarningCategory::NarrowRoad,
            format!(
                "road narrower than {:.1} m limits the building to {:.1} m / {} floors",
                rules.height.narrow_road_width, limits.max_height, limits.max_floors
            ),
        );
    }
}

fn check_front_cap(
    input: &ProjectInput,
    rules: &RuleBook,
    warnings: &mut Vec<EnvelopeWarning>,
) {
    let group = rules.group_of(input.jurisdiction);
    let group_rules = rules.setback.for_group(group);
    let Some(front) = road_derived_front(input.road_width, group, &rules.setback) else {
        return;
    };
    let uncapped = input.road_width * group_rules.road_factor;
    if uncapped > front {
        warn(
            warnings,
            WarningCategory::Setback,
            format!(
                "road-derived front setback {:.2} m capped at {:.2} m",
                uncapped, front
            ),
        );
    }
}
