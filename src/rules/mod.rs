//! Rule book: the jurisdiction tables every engine reads
//!
//! A [`RuleBook`] bundles the FSI, setback, height, parking and ancillary
//! tables together with the metro/standard jurisdiction partition. A
//! built-in book is embedded as TOML; alternative books can be loaded from
//! disk so jurisdiction data can change without touching control flow.

pub mod tables;

pub use tables::*;

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::RuleBookError;
use crate::input::{Jurisdiction, JurisdictionGroup};

/// Complete set of regulation tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RuleBookMetadata>,
    pub jurisdictions: JurisdictionRules,
    pub fsi: FsiRules,
    pub setback: SetbackRules,
    pub height: HeightRules,
    pub parking: ParkingRules,
    pub ancillary: AncillaryRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBookMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Built-in tables
const DEFAULT_RULES: &str = r#"
[metadata]
name = "built-in"
description = "Development control tables for the metro and standard jurisdiction groups"

[jurisdictions]
metro = ["mumbai", "mumbai-suburban"]

# Floor space index
[fsi]
road_bonus = 0.2
road_bonus_min_width = 12.0
transit_bonus = 1.0
heritage_bonus = 0.33
tdr_min_plot_area = 1000.0

[fsi.metro.default]
basic = 1.33
premium = 0.5
max = 3.0

[fsi.metro.commercial]
basic = 1.5
premium = 0.5
max = 3.5

[fsi.metro.industrial]
basic = 1.0
premium = 0.3
max = 2.0

[fsi.metro.mixed]
basic = 1.4
premium = 0.5
max = 3.0

[fsi.standard.default]
basic = 1.1
premium = 0.5
max = 2.5

[fsi.standard.commercial]
basic = 1.1
premium = 0.6
max = 3.0

[fsi.standard.industrial]
basic = 0.8
premium = 0.3
max = 2.0

# Setbacks
[setback]
road_width_threshold = 12.0

[setback.metro]
road_factor = 0.33
front_cap = 6.0
tall_building_height = 24.0
tall_building_rear_increment = 1.5

[[setback.metro.bands]]
max_plot_area = 300.0
front = 3.0
rear = 1.5
side1 = 0.0
side2 = 0.0

[[setback.metro.bands]]
max_plot_area = 1000.0
front = 4.5
rear = 3.0
side1 = 0.0
side2 = 0.0

[[setback.metro.bands]]
front = 6.0
rear = 4.5
side1 = 0.0
side2 = 0.0

[[setback.metro.floor_sides]]
max_floors = 2
side = 0.0

[[setback.metro.floor_sides]]
max_floors = 4
side = 1.5

[[setback.metro.floor_sides]]
side = 3.0

[setback.standard]
road_factor = 0.30
front_cap = 6.0

[[setback.standard.bands]]
max_plot_area = 150.0
front = 2.0
rear = 1.5
side1 = 0.0
side2 = 0.0

[[setback.standard.bands]]
max_plot_area = 300.0
front = 3.0
rear = 2.0
side1 = 1.5
side2 = 1.5

[[setback.standard.bands]]
max_plot_area = 500.0
front = 3.0
rear = 3.0
side1 = 2.25
side2 = 2.25

[[setback.standard.bands]]
max_plot_area = 1000.0
front = 4.5
rear = 3.0
side1 = 3.0
side2 = 3.0

[[setback.standard.bands]]
front = 6.0
rear = 4.5
side1 = 4.5
side2 = 4.5

# Height
[height]
standard_floor_height = 3.5
narrow_road_width = 9.0
narrow_road_max_height = 12.0
narrow_road_max_floors = 3
proposal_tolerance = 1.0

[height.metro.default]
max_height = 70.0
max_floors = 20

[height.metro.industrial]
max_height = 30.0
max_floors = 8

[height.standard.default]
max_height = 24.0
max_floors = 6

[height.standard.commercial]
max_height = 30.0
max_floors = 8

[height.standard.industrial]
max_height = 18.0
max_floors = 5

# Parking
[parking]
area_per_unit = 25.0

[[parking.dwelling_bands]]
max_carpet_area = 50.0
units = 1

[[parking.dwelling_bands]]
max_carpet_area = 100.0
units = 2

[[parking.dwelling_bands]]
units = 3

[parking.area_per_car_space]
residential = 100.0
commercial = 75.0
retail_mall = 50.0
restaurant = 50.0
industrial = 150.0
mixed = 85.0

# Non-FSI allowances
[ancillary]
stairs_and_lift = 0.10
water_tank = 0.02
services = 0.03
roof_head_room = 15.0
"#;

static BUILTIN: OnceLock<RuleBook> = OnceLock::new();

impl RuleBook {
    /// Shared, parsed-once copy of the built-in tables
    pub fn builtin() -> &'static RuleBook {
        BUILTIN.get_or_init(|| {
            Self::from_str(DEFAULT_RULES).expect("Built-in rule book should be valid TOML")
        })
    }

    /// Load a rule book from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, RuleBookError> {
        let content = std::fs::read_to_string(path)?;
        let book = Self::from_str(&content)?;
        tracing::debug!(path = %path.display(), name = ?book.name(), "loaded rule book");
        Ok(book)
    }

    /// Load a rule book from a TOML string
    pub fn from_str(content: &str) -> Result<Self, RuleBookError> {
        let book: RuleBook = toml::from_str(content)?;
        book.validate()?;
        Ok(book)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.name.as_deref())
    }

    pub fn group_of(&self, jurisdiction: Jurisdiction) -> JurisdictionGroup {
        self.jurisdictions.group_of(jurisdiction)
    }

    /// Reject tables the engines cannot interpret sensibly
    pub fn validate(&self) -> Result<(), RuleBookError> {
        for (group, rules) in [("metro", &self.setback.metro), ("standard", &self.setback.standard)] {
            if rules.bands.is_empty() {
                return Err(RuleBookError::invalid(format!(
                    "setback bands for {} are empty",
                    group
                )));
            }
            if !is_ascending(rules.bands.iter().map(|b| b.max_plot_area)) {
                return Err(RuleBookError::invalid(format!(
                    "setback bands for {} must be ordered by max_plot_area",
                    group
                )));
            }
            if rules.front_cap < 0.0 || rules.road_factor < 0.0 {
                return Err(RuleBookError::invalid(format!(
                    "setback road factor and front cap for {} must be non-negative",
                    group
                )));
            }
        }

        for (group, table) in [("metro", &self.fsi.metro), ("standard", &self.fsi.standard)] {
            let rows = std::iter::once(&table.default)
                .chain(table.residential.iter())
                .chain(table.commercial.iter())
                .chain(table.industrial.iter())
                .chain(table.mixed.iter());
            for row in rows {
                if row.basic > row.max {
                    return Err(RuleBookError::invalid(format!(
                        "fsi basic {} exceeds max {} for {}",
                        row.basic, row.max, group
                    )));
                }
            }
        }

        if self.height.standard_floor_height <= 0.0 {
            return Err(RuleBookError::invalid("standard floor height must be positive"));
        }

        if self.parking.dwelling_bands.is_empty() {
            return Err(RuleBookError::invalid("parking dwelling bands are empty"));
        }
        if !is_ascending(
            self.parking
                .dwelling_bands
                .iter()
                .map(|b| b.max_carpet_area),
        ) {
            return Err(RuleBookError::invalid(
                "parking dwelling bands must be ordered by max_carpet_area",
            ));
        }
        let divisors = self.parking.area_per_car_space;
        if [
            divisors.residential,
            divisors.commercial,
            divisors.retail_mall,
            divisors.restaurant,
            divisors.industrial,
            divisors.mixed,
        ]
        .iter()
        .any(|d| *d <= 0.0)
        {
            return Err(RuleBookError::invalid("area per car space must be positive"));
        }

        Ok(())
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

/// Bounded ceilings ascend, and only the last may be open-ended
fn is_ascending(ceilings: impl Iterator<Item = Option<f64>>) -> bool {
    let mut last: Option<f64> = None;
    let mut open = false;
    for ceiling in ceilings {
        if open {
            return false;
        }
        match ceiling {
            Some(c) => {
                if last.is_some_and(|l| c <= l) {
                    return false;
                }
                last = Some(c);
            }
            None => open = true,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ZoneType;

    #[test]
    fn test_builtin_rule_book_parses() {
        let book = RuleBook::builtin();
        assert_eq!(book.name(), Some("built-in"));
        assert_eq!(book.group_of(Jurisdiction::Mumbai), JurisdictionGroup::Metro);
        assert_eq!(book.group_of(Jurisdiction::Nashik), JurisdictionGroup::Standard);
    }

    #[test]
    fn test_builtin_constants() {
        let book = RuleBook::builtin();
        assert_eq!(book.fsi.road_bonus, 0.2);
        assert_eq!(book.fsi.road_bonus_min_width, 12.0);
        assert_eq!(book.fsi.transit_bonus, 1.0);
        assert_eq!(book.fsi.heritage_bonus, 0.33);
        assert_eq!(book.setback.metro.road_factor, 0.33);
        assert_eq!(book.setback.standard.road_factor, 0.30);
        assert_eq!(book.setback.metro.front_cap, 6.0);
        assert_eq!(book.height.standard_floor_height, 3.5);
        assert_eq!(book.parking.area_per_unit, 25.0);
        assert_eq!(book.ancillary.roof_head_room, 15.0);
    }

    #[test]
    fn test_metro_basic_exceeds_standard_basic() {
        let book = RuleBook::builtin();
        for zone in [
            ZoneType::Residential,
            ZoneType::Commercial,
            ZoneType::Industrial,
            ZoneType::Mixed,
        ] {
            assert!(book.fsi.metro.get(zone).basic > book.fsi.standard.get(zone).basic);
        }
    }

    #[test]
    fn test_round_trip_through_toml() {
        let book = RuleBook::builtin();
        let text = book.to_toml_string().expect("Should serialize");
        let parsed = RuleBook::from_str(&text).expect("Should parse");
        assert_eq!(&parsed, book);
    }

    #[test]
    fn test_rejects_empty_setback_bands() {
        let text = DEFAULT_RULES.replace("[[setback.standard.bands]]", "[[setback.standard.unused]]");
        let err = RuleBook::from_str(&text).unwrap_err();
        assert!(matches!(err, RuleBookError::Parse(_) | RuleBookError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_zero_divisor() {
        let mut book = RuleBook::default();
        book.parking.area_per_car_space.mixed = 0.0;
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_rejects_unordered_bands() {
        let mut book = RuleBook::default();
        book.setback.metro.bands.swap(0, 1);
        let err = book.validate().unwrap_err();
        assert!(err.to_string().contains("ordered"));
    }

    #[test]
    fn test_rejects_basic_above_max() {
        let mut book = RuleBook::default();
        book.fsi.standard.default.basic = 9.0;
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = RuleBook::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(RuleBookError::Parse(_))));
    }

    #[test]
    fn test_is_ascending() {
        assert!(is_ascending([Some(1.0), Some(2.0), None].into_iter()));
        assert!(!is_ascending([Some(2.0), Some(1.0)].into_iter()));
        assert!(!is_ascending([None, Some(1.0)].into_iter()));
        assert!(is_ascending(std::iter::empty()));
    }
}
