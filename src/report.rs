//! Plain-text envelope report
//!
//! Renders a [`CalculationResult`] as aligned label/value lines for terminal
//! output. Structured consumers should serialize the result instead.

use std::fmt::Write;

use crate::engine::{
    AncillaryAreaResult, BuiltUpAreaResult, CalculationResult, FsiResult, HeightResult,
    ParkingResult, SetbackResult,
};

const LABEL_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 12;

/// Render the full report
pub fn render_text(result: &CalculationResult) -> String {
    let s = &result.summary;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Development envelope: {} ({}), {} zone, {} use",
        s.jurisdiction, s.jurisdiction_group, s.zone_type, s.land_use
    );
    out.push('\n');
    out.push_str(&render_fsi(&result.fsi));
    out.push('\n');
    out.push_str(&render_built_up(&result.built_up_area));
    out.push('\n');
    out.push_str(&render_height(&result.height));
    out.push('\n');
    out.push_str(&render_setbacks(&result.setbacks));
    out.push('\n');
    out.push_str(&render_parking(&result.parking));
    out.push('\n');
    out.push_str(&render_ancillary(&result.ancillary_areas));

    if !result.warnings.is_empty() {
        out.push('\n');
        out.push_str("Warnings\n");
        for warning in &result.warnings {
            let _ = writeln!(out, "  {}", warning);
        }
    }

    if !result.citations.is_empty() {
        out.push('\n');
        out.push_str("References\n");
        for citation in &result.citations {
            let _ = writeln!(out, "  {}", citation);
        }
    }

    out
}

fn line(out: &mut String, label: &str, value: String) {
    let _ = writeln!(
        out,
        "  {:<lw$}{:>vw$}",
        label,
        value,
        lw = LABEL_WIDTH,
        vw = VALUE_WIDTH
    );
}

fn ratio(v: f64) -> String {
    format!("{:.2}", v)
}

fn area(v: f64) -> String {
    format!("{:.2} m2", v)
}

fn meters(v: f64) -> String {
    format!("{:.2} m", v)
}

pub fn render_fsi(fsi: &FsiResult) -> String {
    let mut out = String::from("Floor space index\n");
    line(&mut out, "basic", ratio(fsi.basic_fsi));
    line(&mut out, "road bonus", ratio(fsi.road_bonus));
    line(&mut out, "transit/heritage bonus", ratio(fsi.transit_and_heritage_bonus));
    line(&mut out, "permissible", ratio(fsi.current_fsi));
    line(&mut out, "purchasable premium", ratio(fsi.purchasable_premium_fsi));
    line(&mut out, "transferable rights", ratio(fsi.transferable_development_fsi));
    line(&mut out, "maximum", ratio(fsi.max_fsi));
    line(&mut out, "area, basic only", area(fsi.built_up_area.using_basic_only));
    line(
        &mut out,
        "area, with premium",
        area(fsi.built_up_area.using_purchased_premium),
    );
    line(
        &mut out,
        "area, with transfer rights",
        area(fsi.built_up_area.using_transferable_rights),
    );
    out
}

pub fn render_built_up(built_up: &BuiltUpAreaResult) -> String {
    let mut out = String::from("Built-up area\n");
    line(&mut out, "total", area(built_up.total_built_up_area));
    line(&mut out, "per floor", area(built_up.per_floor_area));
    line(
        &mut out,
        "ground coverage",
        format!("{:.1} %", built_up.ground_coverage_percent),
    );
    out
}

pub fn render_height(height: &HeightResult) -> String {
    let mut out = String::from("Height\n");
    line(&mut out, "maximum height", meters(height.max_height));
    line(&mut out, "maximum floors", height.max_floors.to_string());
    if let Some(h) = height.proposed_height {
        line(&mut out, "proposed height", meters(h));
    }
    if let Some(f) = height.proposed_floors {
        line(&mut out, "proposed floors", f.to_string());
    }
    let status = if height.is_compliant { "yes" } else { "no" };
    line(&mut out, "compliant", status.to_string());
    out
}

pub fn render_setbacks(setbacks: &SetbackResult) -> String {
    let mut out = String::from("Setbacks\n");
    line(&mut out, "front", meters(setbacks.front));
    line(&mut out, "rear", meters(setbacks.rear));
    line(&mut out, "side 1", meters(setbacks.side1));
    line(&mut out, "side 2", meters(setbacks.side2));
    out
}

pub fn render_parking(parking: &ParkingResult) -> String {
    let mut out = String::from("Parking\n");
    line(
        &mut out,
        "car-space units",
        parking.required_standard_car_space_units.to_string(),
    );
    line(&mut out, "estimated area", area(parking.estimated_parking_area));
    out
}

pub fn render_ancillary(ancillary: &AncillaryAreaResult) -> String {
    let mut out = String::from("Ancillary (non-FSI) areas\n");
    line(&mut out, "stairs and lift", area(ancillary.stairs_and_lift_area));
    line(&mut out, "roof head-room", area(ancillary.roof_head_room_area));
    line(&mut out, "water tank", area(ancillary.water_tank_area));
    line(&mut out, "services", area(ancillary.services_area));
    line(&mut out, "total ancillary", area(ancillary.total_ancillary_area));
    line(
        &mut out,
        "total constructible",
        area(ancillary.total_constructible_area),
    );
    out
}
