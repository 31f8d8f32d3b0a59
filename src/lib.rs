pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{local::LocalStorage, toml_config::TomlConfig};

pub use core::{
    assembler::GraphAssembler,
    engine::RegistryEngine,
    pacer::{AnyPacer, FixedPacer, NoopPacer},
    pipeline::RegistryPipeline,
    probe::{GithubLookup, StatusProbe},
    snapshot::SnapshotWriter,
};
pub use domain::catalog::Catalog;
pub use utils::error::{RegistryError, Result};
