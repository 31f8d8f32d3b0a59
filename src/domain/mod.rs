// Domain layer: models, the static catalog, and the ports the core drives.

pub mod catalog;
pub mod model;
pub mod ports;
