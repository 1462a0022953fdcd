//! Regulation references for citing the clauses behind a result
//!
//! Citations are optional decoration. The engines never consult a
//! repository, so an empty or missing one changes nothing but the
//! `citations` list of a result.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CitationError;
use crate::input::Jurisdiction;

/// Part of the envelope a reference supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    Fsi,
    Setback,
    Height,
    Parking,
    Ancillary,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Fsi,
        Topic::Setback,
        Topic::Height,
        Topic::Parking,
        Topic::Ancillary,
    ];
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Fsi => write!(f, "fsi"),
            Topic::Setback => write!(f, "setback"),
            Topic::Height => write!(f, "height"),
            Topic::Parking => write!(f, "parking"),
            Topic::Ancillary => write!(f, "ancillary"),
        }
    }
}

/// One regulation clause backing part of a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Applies to every jurisdiction when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<Jurisdiction>,
    pub topic: Topic,
    pub clause: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Citation {
    pub fn applies_to(&self, jurisdiction: Jurisdiction, topic: Topic) -> bool {
        self.topic == topic && self.jurisdiction.map_or(true, |j| j == jurisdiction)
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{} ({}): {}", self.clause, self.topic, title),
            None => write!(f, "{} ({})", self.clause, self.topic),
        }
    }
}

/// Source of regulation references
pub trait RuleRepository {
    /// References for one jurisdiction and topic, most specific first
    fn references(&self, jurisdiction: Jurisdiction, topic: Topic) -> Vec<Citation>;
}

/// Repository with no references
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRepository;

impl RuleRepository for EmptyRepository {
    fn references(&self, _jurisdiction: Jurisdiction, _topic: Topic) -> Vec<Citation> {
        Vec::new()
    }
}

/// TOML structure for deserializing reference files
#[derive(Deserialize)]
struct TomlReferences {
    #[serde(default)]
    reference: Vec<Citation>,
}

/// In-memory reference store
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    citations: Vec<Citation>,
}

impl ReferenceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load references from a TOML file of `[[reference]]` entries
    pub fn from_file(path: &Path) -> Result<Self, CitationError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load references from a TOML string
    pub fn from_str(content: &str) -> Result<Self, CitationError> {
        let parsed: TomlReferences = toml::from_str(content)?;
        Ok(Self {
            citations: parsed.reference,
        })
    }

    /// Add one reference
    pub fn register(&mut self, citation: Citation) {
        self.citations.push(citation);
    }

    pub fn len(&self) -> usize {
        self.citations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.citations.is_empty()
    }
}

impl RuleRepository for ReferenceRegistry {
    fn references(&self, jurisdiction: Jurisdiction, topic: Topic) -> Vec<Citation> {
        let matching = self
            .citations
            .iter()
            .filter(|c| c.applies_to(jurisdiction, topic));
        // Jurisdiction-specific entries before general ones
        let (mut specific, general): (Vec<Citation>, Vec<Citation>) =
            matching.cloned().partition(|c| c.jurisdiction.is_some());
        specific.extend(general);
        specific
    }
}

/// Collect references for every topic, in topic order
pub fn collect(repository: &dyn RuleRepository, jurisdiction: Jurisdiction) -> Vec<Citation> {
    Topic::ALL
        .iter()
        .flat_map(|topic| repository.references(jurisdiction, *topic))
        .collect()
}
