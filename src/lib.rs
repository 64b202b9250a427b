//! tradestat: rolling indicators and risk statistics for a single price series.
//!
//! Hexagonal architecture: analytics in [`domain`], port traits in [`ports`],
//! concrete ingestion and configuration in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
