//! Project input types and boundary normalization
//!
//! [`ProjectInput`] is the typed record every engine consumes. Requests arrive
//! at the boundary as a [`RawProjectInput`] (numbers may be strings, flags may
//! be "yes"/"no") and must pass through [`sanitize`] before reaching the
//! engine. The engine's "never fails" guarantee holds only for sanitized
//! input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Administrative district the plot falls under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Jurisdiction {
    Mumbai,
    MumbaiSuburban,
    Thane,
    Pune,
    Nagpur,
    Nashik,
    Aurangabad,
    Kolhapur,
    Solapur,
    Amravati,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 10] = [
        Jurisdiction::Mumbai,
        Jurisdiction::MumbaiSuburban,
        Jurisdiction::Thane,
        Jurisdiction::Pune,
        Jurisdiction::Nagpur,
        Jurisdiction::Nashik,
        Jurisdiction::Aurangabad,
        Jurisdiction::Kolhapur,
        Jurisdiction::Solapur,
        Jurisdiction::Amravati,
    ];

    /// Stable kebab-case identifier, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::Mumbai => "mumbai",
            Jurisdiction::MumbaiSuburban => "mumbai-suburban",
            Jurisdiction::Thane => "thane",
            Jurisdiction::Pune => "pune",
            Jurisdiction::Nagpur => "nagpur",
            Jurisdiction::Nashik => "nashik",
            Jurisdiction::Aurangabad => "aurangabad",
            Jurisdiction::Kolhapur => "kolhapur",
            Jurisdiction::Solapur => "solapur",
            Jurisdiction::Amravati => "amravati",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Jurisdiction {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Jurisdiction::ALL
            .into_iter()
            .find(|j| j.as_str() == key)
            .ok_or_else(|| InputError::UnknownJurisdiction(s.to_string()))
    }
}

/// Partition of jurisdictions sharing one regulation table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JurisdictionGroup {
    Metro,
    Standard,
}

impl fmt::Display for JurisdictionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JurisdictionGroup::Metro => write!(f, "metro"),
            JurisdictionGroup::Standard => write!(f, "standard"),
        }
    }
}

/// Zoning designation of the plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneType {
    Residential,
    Commercial,
    Industrial,
    Mixed,
}

impl ZoneType {
    /// Land use assumed when the request does not name one
    pub fn default_land_use(&self) -> LandUse {
        match self {
            ZoneType::Residential => LandUse::Residential,
            ZoneType::Commercial => LandUse::Commercial,
            ZoneType::Industrial => LandUse::Industrial,
            ZoneType::Mixed => LandUse::Mixed,
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneType::Residential => write!(f, "residential"),
            ZoneType::Commercial => write!(f, "commercial"),
            ZoneType::Industrial => write!(f, "industrial"),
            ZoneType::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for ZoneType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "residential" => Ok(ZoneType::Residential),
            "commercial" => Ok(ZoneType::Commercial),
            "industrial" => Ok(ZoneType::Industrial),
            "mixed" | "mixed-use" => Ok(ZoneType::Mixed),
            _ => Err(InputError::UnknownZoneType(s.to_string())),
        }
    }
}

/// Finer-grained use category that drives parking ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LandUse {
    Residential,
    Commercial,
    RetailMall,
    Restaurant,
    Industrial,
    Mixed,
}

impl fmt::Display for LandUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandUse::Residential => write!(f, "residential"),
            LandUse::Commercial => write!(f, "commercial"),
            LandUse::RetailMall => write!(f, "retail-mall"),
            LandUse::Restaurant => write!(f, "restaurant"),
            LandUse::Industrial => write!(f, "industrial"),
            LandUse::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for LandUse {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "residential" => Ok(LandUse::Residential),
            "commercial" => Ok(LandUse::Commercial),
            "retail-mall" | "retail" | "mall" => Ok(LandUse::RetailMall),
            "restaurant" => Ok(LandUse::Restaurant),
            "industrial" => Ok(LandUse::Industrial),
            "mixed" | "mixed-use" => Ok(LandUse::Mixed),
            _ => Err(InputError::UnknownLandUse(s.to_string())),
        }
    }
}

/// Lowercase, and fold spaces, underscores and slashes into dashes
fn normalize_key(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if matches!(c, ' ' | '_' | '/') { '-' } else { c })
        .collect()
}

/// Typed request parameters for one envelope calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub jurisdiction: Jurisdiction,
    pub zone_type: ZoneType,
    pub land_use: LandUse,
    /// Square meters
    pub plot_area: f64,
    /// Meters
    pub road_width: f64,
    pub proposed_floors: Option<u32>,
    /// Meters
    pub proposed_height: Option<f64>,
    pub is_transit_oriented_zone: bool,
    pub is_heritage_building: bool,
    pub dwelling_unit_count: Option<u32>,
    /// Square meters per dwelling
    pub carpet_area_per_unit: Option<f64>,
}

impl ProjectInput {
    /// Create an input with the land use implied by the zone and every
    /// optional attribute absent
    pub fn new(jurisdiction: Jurisdiction, zone_type: ZoneType, plot_area: f64) -> Self {
        Self {
            jurisdiction,
            zone_type,
            land_use: zone_type.default_land_use(),
            plot_area,
            road_width: 0.0,
            proposed_floors: None,
            proposed_height: None,
            is_transit_oriented_zone: false,
            is_heritage_building: false,
            dwelling_unit_count: None,
            carpet_area_per_unit: None,
        }
    }

    pub fn with_land_use(mut self, land_use: LandUse) -> Self {
        self.land_use = land_use;
        self
    }

    pub fn with_road_width(mut self, width: f64) -> Self {
        self.road_width = width;
        self
    }

    pub fn with_proposed_floors(mut self, floors: u32) -> Self {
        self.proposed_floors = Some(floors);
        self
    }

    pub fn with_proposed_height(mut self, height: f64) -> Self {
        self.proposed_height = Some(height);
        self
    }

    pub fn with_transit_oriented_zone(mut self, tod: bool) -> Self {
        self.is_transit_oriented_zone = tod;
        self
    }

    pub fn with_heritage_building(mut self, heritage: bool) -> Self {
        self.is_heritage_building = heritage;
        self
    }

    /// Set the dwelling mix used for residential parking sizing
    pub fn with_dwelling_units(mut self, count: u32, carpet_area_per_unit: f64) -> Self {
        self.dwelling_unit_count = Some(count);
        self.carpet_area_per_unit = Some(carpet_area_per_unit);
        self
    }
}

/// A number as it may arrive from a form or config file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Finite value, or `None` for unparseable or non-finite input
    fn value(&self) -> Option<f64> {
        let v = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

/// A boolean as it may arrive from a form or config file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawFlag {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl RawFlag {
    fn value(&self) -> bool {
        match self {
            RawFlag::Bool(b) => *b,
            RawFlag::Number(n) => *n != 0,
            RawFlag::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "1" | "on"
            ),
        }
    }
}

/// Unvalidated request record, as deserialized from TOML or JSON
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProjectInput {
    pub jurisdiction: Option<String>,
    pub zone_type: Option<String>,
    pub land_use: Option<String>,
    pub plot_area: Option<RawNumber>,
    pub road_width: Option<RawNumber>,
    pub proposed_floors: Option<RawNumber>,
    pub proposed_height: Option<RawNumber>,
    pub is_transit_oriented_zone: Option<RawFlag>,
    pub is_heritage_building: Option<RawFlag>,
    pub dwelling_unit_count: Option<RawNumber>,
    pub carpet_area_per_unit: Option<RawNumber>,
}

impl RawProjectInput {
    /// Parse a raw record from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, InputError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a raw record from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Normalize a raw request into a [`ProjectInput`]
///
/// Required numbers that are missing, unparseable, non-finite or negative
/// become `0`. Optional numbers that are missing, invalid or not positive
/// become absent. Unknown or missing enum names are the only rejections.
pub fn sanitize(raw: &RawProjectInput) -> Result<ProjectInput, InputError> {
    let jurisdiction: Jurisdiction = raw
        .jurisdiction
        .as_deref()
        .ok_or(InputError::MissingField("jurisdiction"))?
        .parse()?;
    let zone_type: ZoneType = raw
        .zone_type
        .as_deref()
        .ok_or(InputError::MissingField("zoneType"))?
        .parse()?;
    let land_use = match raw.land_use.as_deref() {
        Some(s) if !s.trim().is_empty() => s.parse()?,
        _ => zone_type.default_land_use(),
    };

    Ok(ProjectInput {
        jurisdiction,
        zone_type,
        land_use,
        plot_area: non_negative(raw.plot_area.as_ref()),
        road_width: non_negative(raw.road_width.as_ref()),
        proposed_floors: positive(raw.proposed_floors.as_ref()).map(|v| v.floor() as u32),
        proposed_height: positive(raw.proposed_height.as_ref()),
        is_transit_oriented_zone: flag(raw.is_transit_oriented_zone.as_ref()),
        is_heritage_building: flag(raw.is_heritage_building.as_ref()),
        dwelling_unit_count: positive(raw.dwelling_unit_count.as_ref()).map(|v| v.floor() as u32),
        carpet_area_per_unit: positive(raw.carpet_area_per_unit.as_ref()),
    })
}

fn non_negative(n: Option<&RawNumber>) -> f64 {
    n.and_then(RawNumber::value).filter(|v| *v > 0.0).unwrap_or(0.0)
}

fn positive(n: Option<&RawNumber>) -> Option<f64> {
    n.and_then(RawNumber::value).filter(|v| *v > 0.0)
}

fn flag(f: Option<&RawFlag>) -> bool {
    f.map(RawFlag::value).unwrap_or(false)
}
