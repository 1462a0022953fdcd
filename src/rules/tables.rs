//! Lookup tables making up a rule book
//!
//! Every table is plain data. Lookups never fail: a zone without its own
//! entry uses the table's `default` row, and an empty band list yields a
//! zeroed band.

use serde::{Deserialize, Serialize};

use crate::input::{Jurisdiction, JurisdictionGroup, LandUse, ZoneType};

/// Per-zone entries with a mandatory fallback row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneTable<T> {
    /// Row used for any zone without its own entry
    pub default: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residential: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commercial: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industrial: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixed: Option<T>,
}

impl<T> ZoneTable<T> {
    /// The zone's own row, if the table has one
    pub fn entry(&self, zone: ZoneType) -> Option<&T> {
        match zone {
            ZoneType::Residential => self.residential.as_ref(),
            ZoneType::Commercial => self.commercial.as_ref(),
            ZoneType::Industrial => self.industrial.as_ref(),
            ZoneType::Mixed => self.mixed.as_ref(),
        }
    }

    /// The zone's row, falling back to the default row
    pub fn get(&self, zone: ZoneType) -> &T {
        match self.entry(zone) {
            Some(row) => row,
            None => {
                tracing::trace!(zone = %zone, "no zone entry, using default row");
                &self.default
            }
        }
    }
}

/// Which jurisdictions follow the metro table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JurisdictionRules {
    pub metro: Vec<Jurisdiction>,
}

impl JurisdictionRules {
    pub fn group_of(&self, jurisdiction: Jurisdiction) -> JurisdictionGroup {
        if self.metro.contains(&jurisdiction) {
            JurisdictionGroup::Metro
        } else {
            JurisdictionGroup::Standard
        }
    }
}

/// One FSI row: by-right, purchasable, and ceiling values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FsiEntry {
    pub basic: f64,
    pub premium: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsiRules {
    /// Bonus granted on roads at least `road_bonus_min_width` wide
    pub road_bonus: f64,
    pub road_bonus_min_width: f64,
    pub transit_bonus: f64,
    pub heritage_bonus: f64,
    /// Plots must be strictly larger than this to use transferable rights
    pub tdr_min_plot_area: f64,
    pub metro: ZoneTable<FsiEntry>,
    pub standard: ZoneTable<FsiEntry>,
}

impl FsiRules {
    pub fn table(&self, group: JurisdictionGroup) -> &ZoneTable<FsiEntry> {
        match group {
            JurisdictionGroup::Metro => &self.metro,
            JurisdictionGroup::Standard => &self.standard,
        }
    }
}

/// Baseline setbacks for plots up to `max_plot_area`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SetbackBand {
    /// Open-ended when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_plot_area: Option<f64>,
    pub front: f64,
    pub rear: f64,
    pub side1: f64,
    pub side2: f64,
}

/// Side setback for buildings up to `max_floors`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorSideBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_floors: Option<u32>,
    pub side: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetbackGroupRules {
    /// Front setback per meter of road width
    pub road_factor: f64,
    /// Upper bound on the front setback, whatever the road width
    pub front_cap: f64,
    /// Rear grows by `tall_building_rear_increment` above this height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tall_building_height: Option<f64>,
    #[serde(default)]
    pub tall_building_rear_increment: f64,
    pub bands: Vec<SetbackBand>,
    /// When empty, side setbacks come from the plot-area bands
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub floor_sides: Vec<FloorSideBand>,
}

impl SetbackGroupRules {
    /// First band whose ceiling covers the plot, else the last band
    pub fn band_for(&self, plot_area: f64) -> SetbackBand {
        self.bands
            .iter()
            .find(|b| b.max_plot_area.map_or(true, |max| plot_area <= max))
            .or_else(|| self.bands.last())
            .copied()
            .unwrap_or_default()
    }

    /// Side setback from the floor bands, `None` when the group has none
    pub fn side_for_floors(&self, floors: u32) -> Option<f64> {
        if self.floor_sides.is_empty() {
            return None;
        }
        self.floor_sides
            .iter()
            .find(|b| b.max_floors.map_or(true, |max| floors <= max))
            .or_else(|| self.floor_sides.last())
            .map(|b| b.side)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetbackRules {
    /// Road width from which the front setback follows the road
    pub road_width_threshold: f64,
    pub metro: SetbackGroupRules,
    pub standard: SetbackGroupRules,
}

impl SetbackRules {
    pub fn for_group(&self, group: JurisdictionGroup) -> &SetbackGroupRules {
        match group {
            JurisdictionGroup::Metro => &self.metro,
            JurisdictionGroup::Standard => &self.standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightEntry {
    pub max_height: f64,
    pub max_floors: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightRules {
    pub standard_floor_height: f64,
    /// Roads narrower than this clamp height and floors
    pub narrow_road_width: f64,
    pub narrow_road_max_height: f64,
    pub narrow_road_max_floors: u32,
    /// Allowed gap between a proposed height and floors x floor height
    pub proposal_tolerance: f64,
    pub metro: ZoneTable<HeightEntry>,
    pub standard: ZoneTable<HeightEntry>,
}

impl HeightRules {
    pub fn table(&self, group: JurisdictionGroup) -> &ZoneTable<HeightEntry> {
        match group {
            JurisdictionGroup::Metro => &self.metro,
            JurisdictionGroup::Standard => &self.standard,
        }
    }
}

/// Car-space units per dwelling up to `max_carpet_area`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DwellingBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_carpet_area: Option<f64>,
    pub units: u32,
}

/// Built-up area served by one standard car-space unit, per land use
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaPerCarSpace {
    pub residential: f64,
    pub commercial: f64,
    pub retail_mall: f64,
    pub restaurant: f64,
    pub industrial: f64,
    pub mixed: f64,
}

impl AreaPerCarSpace {
    pub fn get(&self, land_use: LandUse) -> f64 {
        match land_use {
            LandUse::Residential => self.residential,
            LandUse::Commercial => self.commercial,
            LandUse::RetailMall => self.retail_mall,
            LandUse::Restaurant => self.restaurant,
            LandUse::Industrial => self.industrial,
            LandUse::Mixed => self.mixed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingRules {
    /// Floor area reserved per car-space unit, m²
    pub area_per_unit: f64,
    pub dwelling_bands: Vec<DwellingBand>,
    pub area_per_car_space: AreaPerCarSpace,
}

impl ParkingRules {
    /// Units required for one dwelling of the given carpet area
    pub fn units_per_dwelling(&self, carpet_area: f64) -> u32 {
        self.dwelling_bands
            .iter()
            .find(|b| b.max_carpet_area.map_or(true, |max| carpet_area <= max))
            .or_else(|| self.dwelling_bands.last())
            .map_or(0, |b| b.units)
    }
}

/// Non-FSI allowances, as fractions of built-up area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AncillaryRules {
    pub stairs_and_lift: f64,
    pub water_tank: f64,
    pub services: f64,
    /// Flat allowance in m², not scaled by area
    pub roof_head_room: f64,
}
