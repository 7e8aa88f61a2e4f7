//! Input port for equity curves and parameter-search candidates.

use crate::domain::candidate::CandidateResult;
use crate::domain::error::RiskscopeError;
use crate::domain::portfolio::NamedCurve;

pub trait DataPort {
    /// All curves in `source`, in column order.
    fn fetch_curves(&self, source: &str) -> Result<Vec<NamedCurve>, RiskscopeError>;

    fn fetch_candidates(&self, source: &str) -> Result<Vec<CandidateResult>, RiskscopeError>;

    /// A single curve by name. Errors with `NoData` when it is absent.
    fn fetch_curve(&self, source: &str, name: &str) -> Result<NamedCurve, RiskscopeError> {
        self.fetch_curves(source)?
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| RiskscopeError::NoData {
                source_name: format!("{source} (curve {name})"),
            })
    }
}
