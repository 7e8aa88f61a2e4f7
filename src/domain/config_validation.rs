//! Configuration validation.
//!
//! Checks a fully resolved [`AnalysisConfig`] (file values plus any CLI
//! overrides) before any analysis runs.

use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::error::RiskscopeError;

fn invalid(section: &str, key: &str, reason: &str) -> RiskscopeError {
    RiskscopeError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_analysis_config(config: &AnalysisConfig) -> Result<(), RiskscopeError> {
    validate_periods_per_year(config)?;
    validate_risk_free_rate(config)?;
    validate_rolling_window(config)?;
    validate_vol_target(config)?;
    validate_objectives(config)?;
    validate_attribution(config)?;
    Ok(())
}

fn validate_periods_per_year(config: &AnalysisConfig) -> Result<(), RiskscopeError> {
    if !(config.periods_per_year > 0.0 && config.periods_per_year.is_finite()) {
        return Err(invalid(
            "analysis",
            "periods_per_year",
            "periods_per_year must be positive",
        ));
    }
    Ok(())
}

fn validate_risk_free_rate(config: &AnalysisConfig) -> Result<(), RiskscopeError> {
    if !(0.0..1.0).contains(&config.risk_free_rate) {
        return Err(invalid(
            "analysis",
            "risk_free_rate",
            "risk_free_rate must be between 0 and 1",
        ));
    }
    Ok(())
}

fn validate_rolling_window(config: &AnalysisConfig) -> Result<(), RiskscopeError> {
    if config.rolling_window == 0 {
        return Err(invalid(
            "analysis",
            "rolling_window",
            "rolling_window must be at least 1",
        ));
    }
    Ok(())
}

fn validate_vol_target(config: &AnalysisConfig) -> Result<(), RiskscopeError> {
    let target = config.vol_target.target_annual_vol;
    if !(target > 0.0 && target.is_finite()) {
        return Err(invalid(
            "vol_target",
            "target_annual_vol",
            "target_annual_vol must be positive",
        ));
    }
    if config.vol_target.lookback == 0 {
        return Err(invalid(
            "vol_target",
            "lookback",
            "lookback must be at least 1",
        ));
    }
    Ok(())
}

fn validate_objectives(config: &AnalysisConfig) -> Result<(), RiskscopeError> {
    if config.objectives.is_empty() {
        return Err(invalid(
            "pareto",
            "maximize",
            "at least one maximize or minimize key is required",
        ));
    }
    Ok(())
}

fn validate_attribution(config: &AnalysisConfig) -> Result<(), RiskscopeError> {
    if !(config.ridge_lambda >= 0.0 && config.ridge_lambda.is_finite()) {
        return Err(invalid(
            "attribution",
            "lambda",
            "lambda must be non-negative",
        ));
    }
    if config.score_key.trim().is_empty() {
        return Err(RiskscopeError::ConfigMissing {
            section: "attribution".to_string(),
            key: "score_key".to_string(),
        });
    }
    Ok(())
}
