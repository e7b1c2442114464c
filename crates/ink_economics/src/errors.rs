use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EconomicsError {
    #[error("invalid parameter {param}={value}: {reason}")]
    InvalidParameter {
        param: String,
        value: String,
        reason: String,
    },
    #[error("allocation percentages must sum to 1, got {total}")]
    AllocationSumMismatch { total: Decimal },
    #[error("duplicate allocation category: {0}")]
    DuplicateCategory(String),
    #[error("schedule for {category} needs {required} months but the horizon is {horizon} months")]
    ScheduleExceedsHorizon {
        category: String,
        required: usize,
        horizon: usize,
    },
    #[error("series length mismatch: emissions={emissions}, network={network}")]
    SeriesLengthMismatch { emissions: usize, network: usize },
    #[error("calculation overflow: {0}")]
    CalculationOverflow(&'static str),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl EconomicsError {
    pub(crate) fn invalid(param: impl Into<String>, value: impl ToString, reason: &str) -> Self {
        EconomicsError::InvalidParameter {
            param: param.into(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
