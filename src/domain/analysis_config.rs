//! Analysis parameters, loaded from the `[analysis]`, `[vol_target]`,
//! `[pareto]` and `[attribution]` config sections.

use super::candidate::Objectives;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_PERIODS_PER_YEAR: f64 = 252.0;
pub const DEFAULT_ROLLING_WINDOW: usize = 200;
pub const DEFAULT_TARGET_ANNUAL_VOL: f64 = 0.20;
pub const DEFAULT_VOL_LOOKBACK: usize = 50;
pub const DEFAULT_RIDGE_LAMBDA: f64 = 1e-3;
pub const DEFAULT_SCORE_KEY: &str = "profit";

#[derive(Debug, Clone, PartialEq)]
pub struct VolTargetConfig {
    pub target_annual_vol: f64,
    pub lookback: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub periods_per_year: f64,
    pub risk_free_rate: f64,
    pub rolling_window: usize,
    pub vol_target: VolTargetConfig,
    pub objectives: Objectives,
    pub score_key: String,
    pub ridge_lambda: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            periods_per_year: DEFAULT_PERIODS_PER_YEAR,
            risk_free_rate: 0.0,
            rolling_window: DEFAULT_ROLLING_WINDOW,
            vol_target: VolTargetConfig {
                target_annual_vol: DEFAULT_TARGET_ANNUAL_VOL,
                lookback: DEFAULT_VOL_LOOKBACK,
            },
            objectives: Objectives::default(),
            score_key: DEFAULT_SCORE_KEY.to_string(),
            ridge_lambda: DEFAULT_RIDGE_LAMBDA,
        }
    }
}

fn get_usize(config: &dyn ConfigPort, section: &str, key: &str, default: usize) -> usize {
    let value = config.get_int(section, key, default as i64);
    // Negative values map to 0 so validation reports them as non-positive.
    usize::try_from(value).unwrap_or(0)
}

impl AnalysisConfig {
    /// Reads every field, falling back to the default for absent keys.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let defaults = Self::default();

        let objectives = match (
            config.get_list("pareto", "maximize"),
            config.get_list("pareto", "minimize"),
        ) {
            (None, None) => defaults.objectives,
            (maximize, minimize) => Objectives {
                maximize: maximize.unwrap_or_default(),
                minimize: minimize.unwrap_or_default(),
            },
        };

        Self {
            periods_per_year: config.get_double(
                "analysis",
                "periods_per_year",
                defaults.periods_per_year,
            ),
            risk_free_rate: config.get_double(
                "analysis",
                "risk_free_rate",
                defaults.risk_free_rate,
            ),
            rolling_window: get_usize(
                config,
                "analysis",
                "rolling_window",
                defaults.rolling_window,
            ),
            vol_target: VolTargetConfig {
                target_annual_vol: config.get_double(
                    "vol_target",
                    "target_annual_vol",
                    defaults.vol_target.target_annual_vol,
                ),
                lookback: get_usize(config, "vol_target", "lookback", defaults.vol_target.lookback),
            },
            objectives,
            score_key: config
                .get_string("attribution", "score_key")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.score_key),
            ridge_lambda: config.get_double("attribution", "lambda", defaults.ridge_lambda),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn empty_config_gives_defaults() {
        let adapter = FileConfigAdapter::from_string("").unwrap();
        assert_eq!(AnalysisConfig::from_config(&adapter), AnalysisConfig::default());
    }

    #[test]
    fn reads_all_sections() {
        let ini = r#"
[analysis]
periods_per_year = 52
risk_free_rate = 0.02
rolling_window = 26

[vol_target]
target_annual_vol = 0.15
lookback = 20

[pareto]
maximize = profit, winrate
minimize = max_dd

[attribution]
score_key = sharpe
lambda = 0.01
"#;
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        let config = AnalysisConfig::from_config(&adapter);

        assert_eq!(config.periods_per_year, 52.0);
        assert_eq!(config.risk_free_rate, 0.02);
        assert_eq!(config.rolling_window, 26);
        assert_eq!(config.vol_target.target_annual_vol, 0.15);
        assert_eq!(config.vol_target.lookback, 20);
        assert_eq!(config.objectives.maximize, vec!["profit", "winrate"]);
        assert_eq!(config.objectives.minimize, vec!["max_dd"]);
        assert_eq!(config.score_key, "sharpe");
        assert_eq!(config.ridge_lambda, 0.01);
    }

    #[test]
    fn partial_objectives_replace_defaults() {
        let adapter = FileConfigAdapter::from_string("[pareto]\nmaximize = sharpe\n").unwrap();
        let config = AnalysisConfig::from_config(&adapter);
        assert_eq!(config.objectives.maximize, vec!["sharpe"]);
        assert!(config.objectives.minimize.is_empty());
    }

    #[test]
    fn negative_window_maps_to_zero() {
        let adapter = FileConfigAdapter::from_string("[analysis]\nrolling_window = -5\n").unwrap();
        assert_eq!(AnalysisConfig::from_config(&adapter).rolling_window, 0);
    }
}
