//! Parameter-search candidates and objective lookup.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Anything that exposes named numeric objectives.
///
/// A key the item does not carry returns `None`, which objective comparisons
/// treat as NaN (it never compares as better, worse, or equal).
pub trait Scored {
    fn score(&self, key: &str) -> Option<f64>;
}

/// One evaluated configuration from a parameter search.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CandidateResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub indicators: BTreeMap<String, f64>,
    pub profit: f64,
    pub sharpe: f64,
    pub max_dd: f64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, f64>,
}

impl CandidateResult {
    pub fn new(indicators: BTreeMap<String, f64>, profit: f64, sharpe: f64, max_dd: f64) -> Self {
        Self {
            id: None,
            indicators,
            profit,
            sharpe,
            max_dd,
            extra: BTreeMap::new(),
        }
    }
}

impl Scored for CandidateResult {
    fn score(&self, key: &str) -> Option<f64> {
        match key {
            "profit" => Some(self.profit),
            "sharpe" => Some(self.sharpe),
            "max_dd" | "maxDD" | "max_drawdown" => Some(self.max_dd),
            other => self.extra.get(other).copied(),
        }
    }
}

impl Scored for BTreeMap<String, f64> {
    fn score(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

impl Scored for HashMap<String, f64> {
    fn score(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

/// Which keys to maximize and which to minimize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Objectives {
    pub maximize: Vec<String>,
    pub minimize: Vec<String>,
}

impl Objectives {
    pub fn new<S: Into<String>>(
        maximize: impl IntoIterator<Item = S>,
        minimize: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            maximize: maximize.into_iter().map(Into::into).collect(),
            minimize: minimize.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.maximize.is_empty() && self.minimize.is_empty()
    }
}

impl Default for Objectives {
    fn default() -> Self {
        Self::new(["profit", "sharpe"], ["max_dd"])
    }
}
