use crate::core::assembler::GraphAssembler;
use crate::core::snapshot::SnapshotWriter;
use crate::core::{Pacer, Pipeline, RepoLookup, Storage};
use crate::domain::catalog::Catalog;
use crate::domain::model::{Graph, RegistrySnapshot};
use crate::utils::error::Result;
use chrono::Utc;

/// Catalog in, snapshot file out.
pub struct RegistryPipeline<L: RepoLookup, P: Pacer, S: Storage> {
    catalog: Catalog,
    assembler: GraphAssembler<L, P>,
    writer: SnapshotWriter<S>,
    output_path: String,
}

impl<L: RepoLookup, P: Pacer, S: Storage> RegistryPipeline<L, P, S> {
    pub fn new(
        catalog: Catalog,
        assembler: GraphAssembler<L, P>,
        writer: SnapshotWriter<S>,
        output_path: &str,
    ) -> Self {
        Self {
            catalog,
            assembler,
            writer,
            output_path: output_path.to_string(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[async_trait::async_trait]
impl<L: RepoLookup, P: Pacer, S: Storage> Pipeline for RegistryPipeline<L, P, S> {
    async fn extract(&self) -> Result<Graph> {
        tracing::info!("Building Spark Network...");
        Ok(self.assembler.assemble(&self.catalog).await)
    }

    async fn transform(&self, graph: Graph) -> Result<RegistrySnapshot> {
        Ok(RegistrySnapshot::build(graph, Utc::now()))
    }

    async fn load(&self, snapshot: RegistrySnapshot) -> Result<String> {
        self.writer.write(&snapshot).await?;

        let path = std::path::Path::new(&self.output_path)
            .join(self.writer.filename())
            .to_string_lossy()
            .into_owned();
        Ok(path)
    }
}
