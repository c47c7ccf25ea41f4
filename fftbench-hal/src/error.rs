use thiserror::Error;

/// Failure to set up a single benchmark scenario.
///
/// Any of these aborts only the scenario that produced it; resources acquired
/// before the failure are released by their owners' `Drop` impls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid shape: {reason}")]
    InvalidShape { reason: String },

    #[error("failed to allocate {bytes} bytes")]
    Alloc { bytes: usize },

    #[error("{backend}: unsupported configuration: {reason}")]
    Unsupported { backend: &'static str, reason: String },

    #[error("{backend}: {reason}")]
    Library { backend: &'static str, reason: String },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl PlanError {
    pub fn invalid_shape(reason: impl Into<String>) -> Self {
        PlanError::InvalidShape { reason: reason.into() }
    }
}

/// Malformed configuration read from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown effort level `{0}` (expected estimate, measure, patient or exhaustive)")]
    InvalidEffort(String),

    #[error("{var}: expected a positive integer, got `{value}`")]
    InvalidInteger { var: &'static str, value: String },
}
