use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct RegistryEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RegistryEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// One full scan. Nothing is written unless every entry was processed.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();

        let graph = self.pipeline.extract().await?;
        tracing::debug!(
            "Assembled {} nodes and {} edges in {:?}",
            graph.nodes.len(),
            graph.edges.len(),
            started.elapsed()
        );

        let snapshot = self.pipeline.transform(graph).await?;
        let stats = snapshot.stats.clone();

        let output_path = self.pipeline.load(snapshot).await?;

        tracing::info!(
            "Spark Network: {}/{} active, {} with pages",
            stats.active,
            stats.total_defined,
            stats.with_pages
        );
        tracing::info!("Saved: {}", output_path);

        Ok(output_path)
    }
}
