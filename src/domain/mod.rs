//! Core numerical logic. Everything here is a pure function over values.

pub mod returns;
pub mod risk;
pub mod rolling;
pub mod rolling_metrics;
pub mod vol_target;
pub mod candidate;
pub mod pareto;
pub mod linalg;
pub mod attribution;
pub mod performance;
pub mod portfolio;
pub mod report;
pub mod analysis_config;
pub mod config_validation;
pub mod error;
