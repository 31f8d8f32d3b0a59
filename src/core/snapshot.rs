use crate::core::stats::{aggregate, group_roles};
use crate::core::Storage;
use crate::domain::model::{Graph, RegistrySnapshot};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

pub const DEFAULT_FILENAME: &str = "spark_network.json";

impl RegistrySnapshot {
    pub fn build(graph: Graph, timestamp: DateTime<Utc>) -> Self {
        let stats = aggregate(&graph.nodes);
        let roles = group_roles(&graph.nodes);

        Self {
            timestamp,
            stats,
            nodes: graph.nodes,
            edges: graph.edges,
            roles,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Serializes snapshots into a single file, overwriting it each time.
pub struct SnapshotWriter<S: Storage> {
    storage: S,
    filename: String,
}

impl<S: Storage> SnapshotWriter<S> {
    pub fn new(storage: S, filename: &str) -> Self {
        Self {
            storage,
            filename: filename.to_string(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub async fn write(&self, snapshot: &RegistrySnapshot) -> Result<()> {
        let json = snapshot.to_json()?;
        tracing::debug!("Writing snapshot ({} bytes) to {}", json.len(), self.filename);
        self.storage
            .write_file(&self.filename, json.as_bytes())
            .await
    }
}
