//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod fallback_adapter;
pub mod file_config_adapter;
