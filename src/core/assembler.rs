use crate::core::probe::StatusProbe;
use crate::core::{Pacer, RepoLookup};
use crate::domain::catalog::Catalog;
use crate::domain::model::{Edge, Graph, Node, Relationship, StatusRecord};
use std::collections::HashSet;

/// Probes every catalog entry in order, one at a time, and builds the graph.
pub struct GraphAssembler<L: RepoLookup, P: Pacer> {
    probe: StatusProbe<L>,
    pacer: P,
}

impl<L: RepoLookup, P: Pacer> GraphAssembler<L, P> {
    pub fn new(probe: StatusProbe<L>, pacer: P) -> Self {
        Self { probe, pacer }
    }

    pub async fn assemble(&self, catalog: &Catalog) -> Graph {
        let mut nodes = Vec::with_capacity(catalog.len());

        for (i, definition) in catalog.projects().iter().enumerate() {
            let record = self.probe.probe(&definition.name).await;

            match &record {
                StatusRecord::Found(status) => tracing::info!(
                    "Checking {}... OK (pages={}, {})",
                    definition.name,
                    status.has_pages,
                    status.language
                ),
                StatusRecord::NotFound => {
                    tracing::info!("Checking {}... NOT FOUND", definition.name)
                }
            }

            nodes.push(Node::merge(definition, record));
            self.pacer.after_probe(i + 1).await;
        }

        let edges = filter_edges(&nodes, catalog.relationships());
        tracing::debug!(
            "Kept {} of {} declared relationships",
            edges.len(),
            catalog.relationships().len()
        );

        Graph { nodes, edges }
    }
}

/// Keeps a relationship when either endpoint is an active node. Order is
/// preserved and nothing is deduplicated.
pub fn filter_edges(nodes: &[Node], relationships: &[Relationship]) -> Vec<Edge> {
    let active: HashSet<&str> = nodes
        .iter()
        .filter(|n| n.exists)
        .map(|n| n.name.as_str())
        .collect();

    relationships
        .iter()
        .filter(|r| active.contains(r.from.as_str()) || active.contains(r.to.as_str()))
        .cloned()
        .collect()
}
