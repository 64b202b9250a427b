//! Core domain types and analytics.

pub mod ohlcv;
pub mod price_series;
pub mod indicator;
pub mod indicator_helpers;
pub mod risk;
pub mod correlation;
pub mod session;
pub mod report;
pub mod analysis_config;
pub mod catalogue;
pub mod error;
