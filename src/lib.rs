//! Dev Envelope - development control calculator for urban plots
//!
//! Given a plot's jurisdiction, zone, land use, dimensions and optional
//! project attributes, this library derives the permissible development
//! envelope: floor space index by acquisition track, setbacks, height,
//! parking, built-up area and non-FSI ancillary allowances.
//!
//! # Example
//!
//! ```rust
//! use dev_envelope::{calculate_all, Jurisdiction, ProjectInput, ZoneType};
//!
//! let input = ProjectInput::new(Jurisdiction::Pune, ZoneType::Residential, 500.0)
//!     .with_road_width(12.0);
//! let result = calculate_all(&input);
//! assert!(result.fsi.current_fsi <= result.fsi.max_fsi);
//! ```

pub mod citation;
pub mod engine;
pub mod error;
pub mod input;
pub mod lint;
pub mod report;
pub mod rules;

pub use citation::{Citation, EmptyRepository, ReferenceRegistry, RuleRepository, Topic};
pub use engine::{
    AncillaryAreaResult, BuiltUpAreaResult, CalculationResult, CalculationSummary, FsiResult,
    HeightResult, ParkingResult, SetbackResult,
};
pub use error::{CitationError, InputError, RuleBookError};
pub use input::{
    sanitize, Jurisdiction, JurisdictionGroup, LandUse, ProjectInput, RawProjectInput, ZoneType,
};
pub use lint::{EnvelopeWarning, WarningCategory};
pub use report::render_text;
pub use rules::RuleBook;

/// Calculate the envelope with the built-in rule book
///
/// This is the main entry point for the library.
///
/// # Example
///
/// ```rust
/// use dev_envelope::{calculate_all, Jurisdiction, LandUse, ProjectInput, ZoneType};
///
/// let input = ProjectInput::new(Jurisdiction::Mumbai, ZoneType::Commercial, 1000.0)
///     .with_road_width(15.0)
///     .with_land_use(LandUse::Commercial)
///     .with_proposed_floors(6);
/// let result = calculate_all(&input);
///
/// let expected = (result.built_up_area.total_built_up_area / 75.0).ceil() as u32;
/// assert_eq!(result.parking.required_standard_car_space_units, expected);
/// ```
pub fn calculate_all(input: &ProjectInput) -> CalculationResult {
    engine::calculate(input, RuleBook::builtin())
}

/// Calculate the envelope with a custom rule book
pub fn calculate_with_rules(input: &ProjectInput, rules: &RuleBook) -> CalculationResult {
    engine::calculate(input, rules)
}

/// Calculate the envelope and attach regulation references
///
/// Identical to [`calculate_with_rules`] apart from the `citations` list.
///
/// # Example
///
/// ```rust
/// use dev_envelope::{
///     calculate_with_repository, Jurisdiction, ProjectInput, ReferenceRegistry, RuleBook,
///     ZoneType,
/// };
///
/// let registry = ReferenceRegistry::from_str(r#"
/// [[reference]]
/// topic = "parking"
/// clause = "8.3"
/// "#).unwrap();
///
/// let input = ProjectInput::new(Jurisdiction::Thane, ZoneType::Residential, 600.0);
/// let result = calculate_with_repository(&input, RuleBook::builtin(), &registry);
/// assert_eq!(result.citations.len(), 1);
/// ```
pub fn calculate_with_repository(
    input: &ProjectInput,
    rules: &RuleBook,
    repository: &dyn RuleRepository,
) -> CalculationResult {
    let mut result = engine::calculate(input, rules);
    result.citations = citation::collect(repository, input.jurisdiction);
    result
}

/// Sanitize a raw request and calculate with the given rule book
pub fn calculate_raw(
    raw: &RawProjectInput,
    rules: &RuleBook,
) -> Result<CalculationResult, InputError> {
    let input = sanitize(raw)?;
    Ok(engine::calculate(&input, rules))
}
