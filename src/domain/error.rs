//! Error types for the configuration, data and report layers.
//!
//! The numerical functions in [`crate::domain`] never fail; degenerate input
//! resolves to a neutral value. Errors only arise at the edges: reading
//! config, loading curves or candidates, and writing reports.

#[derive(Debug, thiserror::Error)]
pub enum RiskscopeError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to read {path}: {reason}")]
    DataRead { path: String, reason: String },

    #[error("malformed data in {path} at row {row}: {reason}")]
    DataParse {
        path: String,
        row: usize,
        reason: String,
    },

    #[error("no data in {source_name}")]
    NoData { source_name: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&RiskscopeError> for std::process::ExitCode {
    fn from(err: &RiskscopeError) -> Self {
        let code: u8 = match err {
            RiskscopeError::Io(_) => 1,
            RiskscopeError::ConfigParse { .. }
            | RiskscopeError::ConfigMissing { .. }
            | RiskscopeError::ConfigInvalid { .. } => 2,
            RiskscopeError::DataRead { .. }
            | RiskscopeError::DataParse { .. }
            | RiskscopeError::NoData { .. } => 3,
            RiskscopeError::Report { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
