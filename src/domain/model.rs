use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static metadata for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDefinition {
    pub name: String,
    pub role: String,
    pub icon: String,
    pub tier: u8,
}

impl ProjectDefinition {
    pub fn new(name: &str, role: &str, icon: &str, tier: u8) -> Self {
        Self {
            name: name.to_string(),
            role: role.to_string(),
            icon: icon.to_string(),
            tier,
        }
    }
}

/// A declared directed relationship. Either end may name a system outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub relationship: String,
}

impl Relationship {
    pub fn new(from: &str, to: &str, relationship: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            relationship: relationship.to_string(),
        }
    }
}

/// Repository payload as returned by the hosting API. Only the fields the
/// registry reads are declared; everything else in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    #[serde(default)]
    pub has_pages: Option<bool>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Live metadata for a repository that was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStatus {
    pub has_pages: bool,
    /// `YYYY-MM-DD`, or empty when the API reported no update time.
    pub updated: String,
    pub size: u64,
    pub language: String,
    pub url: String,
    /// Present iff `has_pages`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_url: Option<String>,
}

/// Outcome of probing one identifier. Unreachable and missing are the same thing here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusRecord {
    Found(RepoStatus),
    NotFound,
}

impl StatusRecord {
    pub fn exists(&self) -> bool {
        matches!(self, StatusRecord::Found(_))
    }
}

/// A catalog entry merged with its probe result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub role: String,
    pub icon: String,
    pub tier: u8,
    pub exists: bool,
    #[serde(flatten)]
    pub status: Option<RepoStatus>,
}

impl Node {
    pub fn merge(definition: &ProjectDefinition, record: StatusRecord) -> Self {
        let status = match record {
            StatusRecord::Found(status) => Some(status),
            StatusRecord::NotFound => None,
        };

        Self {
            name: definition.name.clone(),
            role: definition.role.clone(),
            icon: definition.icon.clone(),
            tier: definition.tier,
            exists: status.is_some(),
            status,
        }
    }

    pub fn has_pages(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.has_pages)
    }
}

/// A relationship that survived the active-node filter.
pub type Edge = Relationship;

/// Nodes and edges of one assembly pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn active_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.exists).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_defined: usize,
    pub active: usize,
    pub with_pages: usize,
    pub roles: BTreeMap<String, usize>,
}

/// The persisted document. Rebuilt from scratch on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub timestamp: DateTime<Utc>,
    pub stats: Stats,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub roles: BTreeMap<String, Vec<String>>,
}
