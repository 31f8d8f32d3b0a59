pub mod assembler;
pub mod engine;
pub mod pacer;
pub mod pipeline;
pub mod probe;
pub mod snapshot;
pub mod stats;

pub use crate::domain::model::{Edge, Graph, Node, RegistrySnapshot, Stats, StatusRecord};
pub use crate::domain::ports::{ConfigProvider, Pacer, Pipeline, RepoLookup, Storage};
pub use crate::utils::error::Result;
