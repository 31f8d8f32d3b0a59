use crate::domain::model::{ProjectDefinition, Relationship};
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use std::collections::HashSet;

pub const DEFAULT_OWNER: &str = "pewpi-infinity";

/// name, role, icon, tier
const SPARK_CORE: &[(&str, &str, &str, u8)] = &[
    ("infinity-spark", "main", "star", 1),
    ("infinity-spark-core", "core", "cpu", 1),
    ("infinity-spark-engine", "engine", "zap", 1),
    ("infinity-spark-bridge", "connector", "link", 1),
    ("infinity-spark-relay", "connector", "relay", 2),
    ("infinity-spark-gateway", "connector", "gate", 2),
    ("infinity-spark-nexus", "connector", "nexus", 2),
    ("infinity-spark-hub", "hub", "hub", 1),
    ("infinity-spark-network", "network", "globe", 2),
    ("infinity-spark-terminal", "interface", "terminal", 1),
    ("infinity-spark-console", "interface", "monitor", 2),
    ("infinity-spark-market", "commerce", "shop", 1),
    ("infinity-spark-token", "commerce", "coin", 2),
    ("infinity-spark-mint", "commerce", "mint", 2),
    ("infinity-spark-ledger", "commerce", "ledger", 2),
    ("infinity-spark-vault", "storage", "lock", 2),
    ("infinity-spark-forge", "builder", "hammer", 1),
    ("infinity-spark-builder", "builder", "wrench", 2),
    ("infinity-spark-studio", "builder", "palette", 2),
    ("infinity-spark-lab", "research", "flask", 2),
    ("infinity-spark-research", "research", "book", 2),
    ("infinity-spark-scanner", "analysis", "radar", 2),
    ("infinity-spark-search", "analysis", "search", 2),
    ("infinity-spark-signal", "comms", "signal", 2),
    ("infinity-spark-stream", "comms", "stream", 2),
    ("infinity-spark-pulse", "comms", "pulse", 2),
    ("infinity-spark-portal", "access", "door", 2),
    ("infinity-spark-orbit", "expansion", "orbit", 3),
    ("infinity-spark-reactor", "power", "atom", 2),
    ("infinity-spark-grid", "infra", "grid", 2),
    ("infinity-spark-matrix", "infra", "matrix", 2),
    ("infinity-spark-lattice", "infra", "lattice", 3),
    ("infinity-spark-archive", "storage", "archive", 3),
    ("infinity-spark-vision", "ai", "eye", 2),
    ("infinity-spark-writer", "content", "pen", 2),
    ("infinity-spark-theater", "media", "theater", 3),
    ("infinity-spark-tickets", "commerce", "ticket", 3),
    ("infinity-spark-tour", "showcase", "map", 3),
];

/// from, to, relationship
const CONNECTIONS: &[(&str, &str, &str)] = &[
    ("infinity-spark-core", "infinity-spark-engine", "powers"),
    ("infinity-spark-engine", "infinity-spark-forge", "builds"),
    ("infinity-spark-bridge", "infinity-spark-relay", "routes"),
    ("infinity-spark-bridge", "infinity-spark-gateway", "routes"),
    ("infinity-spark-hub", "infinity-spark-nexus", "aggregates"),
    ("infinity-spark-market", "infinity-spark-token", "trades"),
    ("infinity-spark-market", "infinity-spark-mint", "creates"),
    ("infinity-spark-market", "infinity-spark-ledger", "records"),
    ("infinity-spark-terminal", "infinity-spark-console", "interfaces"),
    ("infinity-spark-vault", "infinity-spark-archive", "stores"),
    ("infinity-spark-scanner", "infinity-spark-search", "discovers"),
    ("infinity-spark-signal", "infinity-spark-stream", "transmits"),
    ("infinity-spark-signal", "infinity-spark-pulse", "monitors"),
    // crown system
    ("infinity-spark-hub", "infinity-crown-index", "feeds"),
    ("infinity-spark-market", "infinity-crown-index", "lists"),
    ("infinity-spark-bridge", "infinity-master-hub", "links"),
    ("infinity-spark-scanner", "mongoose-brain-scanner", "scans"),
    ("infinity-spark-research", "infinity-research-engine", "researches"),
];

/// The declared project set and relationship list. Immutable once built;
/// handed to whatever needs it rather than looked up globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    projects: Vec<ProjectDefinition>,
    relationships: Vec<Relationship>,
}

impl Catalog {
    pub fn new(projects: Vec<ProjectDefinition>, relationships: Vec<Relationship>) -> Result<Self> {
        let catalog = Self {
            projects,
            relationships,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in spark network tables.
    pub fn spark_network() -> Self {
        Self {
            projects: SPARK_CORE
                .iter()
                .map(|(name, role, icon, tier)| ProjectDefinition::new(name, role, icon, *tier))
                .collect(),
            relationships: CONNECTIONS
                .iter()
                .map(|(from, to, rel)| Relationship::new(from, to, rel))
                .collect(),
        }
    }

    /// Projects in declaration order.
    pub fn projects(&self) -> &[ProjectDefinition] {
        &self.projects
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.projects.iter().any(|p| p.name == name)
    }
}

impl Validate for Catalog {
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for project in &self.projects {
            validate_non_empty_string("catalog.name", &project.name)?;
            validate_non_empty_string("catalog.role", &project.role)?;
            validate_range("catalog.tier", project.tier, 1, 3)?;

            if !seen.insert(project.name.as_str()) {
                return Err(RegistryError::ConfigValidationError {
                    field: "catalog.name".to_string(),
                    message: format!("duplicate project identifier '{}'", project.name),
                });
            }
        }

        for rel in &self.relationships {
            validate_non_empty_string("relationships.from", &rel.from)?;
            validate_non_empty_string("relationships.to", &rel.to)?;
        }

        Ok(())
    }
}
