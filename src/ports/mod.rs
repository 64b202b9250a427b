//! Port traits decoupling the analytics from ingestion and configuration.

pub mod data_port;
pub mod config_port;
