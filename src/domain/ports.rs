use crate::domain::model::{Graph, RegistrySnapshot, RepoInfo};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// Replace the whole file at `path`. No partial content is ever visible.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_root(&self) -> &str;
    fn owner(&self) -> &str;
    fn token(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn filename(&self) -> &str;
    fn request_timeout(&self) -> Duration;

    fn short_delay(&self) -> Duration {
        Duration::from_millis(300)
    }

    fn long_delay(&self) -> Duration {
        Duration::from_secs(2)
    }

    fn long_every(&self) -> usize {
        10
    }
}

/// Fetches a repository by name. `Ok(None)` means the API answered but not with the repo.
#[async_trait]
pub trait RepoLookup: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<Option<RepoInfo>>;
}

/// Stall inserted after each probe. `index` is 1-based.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn after_probe(&self, index: usize);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Graph>;
    async fn transform(&self, graph: Graph) -> Result<RegistrySnapshot>;
    async fn load(&self, snapshot: RegistrySnapshot) -> Result<String>;
}
