//! Result types produced by the calculation engines
//!
//! All results are plain values. They serialize with camelCase field names
//! so a presentation layer can forward them unchanged.

use serde::Serialize;

use crate::citation::Citation;
use crate::input::{Jurisdiction, JurisdictionGroup, LandUse, ZoneType};
use crate::lint::EnvelopeWarning;

/// Permissible FSI, split by acquisition track
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FsiResult {
    /// Free, by-right FSI
    pub basic_fsi: f64,
    pub road_bonus: f64,
    pub transit_and_heritage_bonus: f64,
    /// Basic plus bonuses, never above `max_fsi`
    pub current_fsi: f64,
    /// FSI that may be bought on top of `current_fsi`
    pub purchasable_premium_fsi: f64,
    /// FSI obtainable only through transferable development rights
    pub transferable_development_fsi: f64,
    pub max_fsi: f64,
    pub built_up_area: FsiBuiltUpAreas,
}

/// Built-up area reachable on each FSI track
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FsiBuiltUpAreas {
    pub using_basic_only: f64,
    pub using_purchased_premium: f64,
    pub using_transferable_rights: f64,
}

/// Mandatory clearances from each plot boundary, meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetbackResult {
    pub front: f64,
    pub rear: f64,
    pub side1: f64,
    pub side2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeightResult {
    pub max_height: f64,
    pub max_floors: u32,
    pub standard_floor_height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_floors: Option<u32>,
    /// False when a proposed height or floor count exceeds its maximum
    pub is_compliant: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltUpAreaResult {
    pub total_built_up_area: f64,
    pub per_floor_area: f64,
    pub ground_coverage_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingResult {
    pub required_standard_car_space_units: u32,
    pub estimated_parking_area: f64,
}

/// Construction allowed outside FSI accounting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AncillaryAreaResult {
    pub stairs_and_lift_area: f64,
    pub roof_head_room_area: f64,
    pub water_tank_area: f64,
    pub services_area: f64,
    pub total_ancillary_area: f64,
    /// Built-up area plus every ancillary allowance
    pub total_constructible_area: f64,
}

/// Most commonly displayed figures, flattened for presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationSummary {
    pub jurisdiction: Jurisdiction,
    pub jurisdiction_group: JurisdictionGroup,
    pub zone_type: ZoneType,
    pub land_use: LandUse,
    pub permissible_fsi: f64,
    pub max_fsi: f64,
    pub max_built_up_area: f64,
    pub ancillary_area: f64,
    pub total_constructible_area: f64,
    pub max_height: f64,
    pub max_floors: u32,
    pub required_parking: u32,
    pub front_setback: f64,
    pub rear_setback: f64,
    pub side1_setback: f64,
    pub side2_setback: f64,
}

/// Combined output of one envelope calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub fsi: FsiResult,
    pub setbacks: SetbackResult,
    pub height: HeightResult,
    pub built_up_area: BuiltUpAreaResult,
    pub parking: ParkingResult,
    pub ancillary_areas: AncillaryAreaResult,
    pub summary: CalculationSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<EnvelopeWarning>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
}
