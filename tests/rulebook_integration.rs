//! Integration tests for alternative rule books, raw requests and references

use std::io::Write;

use dev_envelope::{
    calculate_raw, calculate_with_repository, calculate_with_rules, Citation, InputError,
    Jurisdiction, ProjectInput, RawProjectInput, ReferenceRegistry, RuleBook, RuleBookError,
    Topic, ZoneType,
};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Should create temp file");
    file.write_all(content.as_bytes())
        .expect("Should write temp file");
    file
}

// ========================
// Rule books
// ========================

#[test]
fn test_builtin_rules_survive_file_round_trip() {
    let text = RuleBook::builtin()
        .to_toml_string()
        .expect("Should serialize");
    let file = temp_file(&text);
    let loaded = RuleBook::from_file(file.path()).expect("Should load");

    assert_eq!(&loaded, RuleBook::builtin());
    assert_eq!(loaded.name(), Some("built-in"));
}

#[test]
fn test_missing_zone_row_falls_back_to_default() {
    let mut book = RuleBook::builtin().clone();
    book.fsi.metro.commercial = None;
    let text = book.to_toml_string().expect("Should serialize");
    let book = RuleBook::from_str(&text).expect("Should parse");

    let input = ProjectInput::new(Jurisdiction::Mumbai, ZoneType::Commercial, 600.0);
    let result = calculate_with_rules(&input, &book);
    assert_eq!(result.fsi.basic_fsi, book.fsi.metro.default.basic);
    assert_eq!(result.fsi.max_fsi, book.fsi.metro.default.max);
}

#[test]
fn test_rule_book_with_basic_above_max_is_rejected() {
    let mut book = RuleBook::builtin().clone();
    book.fsi.standard.default.basic = 5.0;
    let text = book.to_toml_string().expect("Should serialize");

    let err = RuleBook::from_str(&text).unwrap_err();
    assert!(matches!(err, RuleBookError::Invalid { .. }));
}

#[test]
fn test_malformed_rule_book() {
    let err = RuleBook::from_str("[fsi\nroad_bonus = ").unwrap_err();
    assert!(matches!(err, RuleBookError::Parse(_)));
}

#[test]
fn test_missing_rule_book_file() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let err = RuleBook::from_file(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, RuleBookError::Io(_)));
}

// ========================
// Raw requests
// ========================

#[test]
fn test_raw_json_request() {
    let raw = RawProjectInput::from_json_str(
        r#"{
            "jurisdiction": "Mumbai Suburban",
            "zoneType": "Commercial",
            "plotArea": "1200",
            "roadWidth": 18,
            "isTransitOrientedZone": "yes",
            "proposedFloors": "abc"
        }"#,
    )
    .expect("Should parse");
    let result = calculate_raw(&raw, RuleBook::builtin()).expect("Should calculate");

    // 1.5 basic + 0.2 road + 1.0 transit
    assert!((result.fsi.current_fsi - 2.7).abs() < 1e-9);
    assert!((result.built_up_area.total_built_up_area - 3240.0).abs() < 1e-9);
    assert_eq!(result.height.proposed_floors, None);
    assert!(result.fsi.transferable_development_fsi > 0.0);
}

#[test]
fn test_raw_toml_request() {
    let raw = RawProjectInput::from_toml_str(
        r#"
jurisdiction = "kolhapur"
zoneType = "residential"
landUse = "residential"
plotArea = 450.0
roadWidth = -4
dwellingUnitCount = 6
carpetAreaPerUnit = 80
"#,
    )
    .expect("Should parse");
    let result = calculate_raw(&raw, RuleBook::builtin()).expect("Should calculate");

    // Negative road width reads as no road frontage
    assert_eq!(result.fsi.road_bonus, 0.0);
    assert_eq!(result.parking.required_standard_car_space_units, 12);
}

#[test]
fn test_raw_request_without_zone() {
    let raw = RawProjectInput::from_json_str(r#"{"jurisdiction": "pune", "plotArea": 300}"#)
        .expect("Should parse");
    let err = calculate_raw(&raw, RuleBook::builtin()).unwrap_err();
    assert!(matches!(err, InputError::MissingField("zoneType")));
}

#[test]
fn test_raw_request_with_unknown_land_use() {
    let raw = RawProjectInput::from_json_str(
        r#"{"jurisdiction": "pune", "zoneType": "commercial", "landUse": "casino"}"#,
    )
    .expect("Should parse");
    let err = calculate_raw(&raw, RuleBook::builtin()).unwrap_err();
    assert_eq!(err.to_string(), "unknown land use 'casino'");
}

// ========================
// References
// ========================

#[test]
fn test_references_from_file() {
    let file = temp_file(
        r#"
[[reference]]
topic = "setback"
clause = "9.2"
title = "Marginal open spaces"

[[reference]]
jurisdiction = "thane"
topic = "fsi"
clause = "6.4"

[[reference]]
jurisdiction = "mumbai"
topic = "fsi"
clause = "30"
"#,
    );
    let registry = ReferenceRegistry::from_file(file.path()).expect("Should load");

    let input = ProjectInput::new(Jurisdiction::Thane, ZoneType::Residential, 700.0);
    let result = calculate_with_repository(&input, RuleBook::builtin(), &registry);
    let clauses: Vec<&str> = result.citations.iter().map(|c| c.clause.as_str()).collect();
    assert_eq!(clauses, vec!["6.4", "9.2"]);
}

#[test]
fn test_registered_reference_is_cited() {
    let mut registry = ReferenceRegistry::new();
    registry.register(Citation {
        jurisdiction: Some(Jurisdiction::Amravati),
        topic: Topic::Height,
        clause: "7.1".to_string(),
        title: None,
    });

    let input = ProjectInput::new(Jurisdiction::Amravati, ZoneType::Industrial, 2000.0);
    let cited = calculate_with_repository(&input, RuleBook::builtin(), &registry);
    assert_eq!(cited.citations.len(), 1);
    assert_eq!(cited.citations[0].to_string(), "7.1 (height)");

    let elsewhere = ProjectInput::new(Jurisdiction::Nagpur, ZoneType::Industrial, 2000.0);
    let uncited = calculate_with_repository(&elsewhere, RuleBook::builtin(), &registry);
    assert!(uncited.citations.is_empty());
}
