//! Error types shared across tsds crates.
//!
//! Two separate domains live here: [`RateError`] covers per-sample rate
//! validity (expected during normal operation), [`TsdsError`] covers config,
//! input decoding and delivery.

use thiserror::Error;

/// Stable code for each rate failure (used as a log field and metrics label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No baseline recorded for the key.
    UnknownKey,
    /// Sample is too far from the baseline to trust.
    GapTooLarge,
    /// NaN or infinity in the new or previous reading.
    InvalidValue,
    /// Timestamp did not move forward.
    NonPositiveGap,
    /// Rate outside the series bounds.
    RateOutOfRange,
}

impl FailureKind {
    /// String representation used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::UnknownKey => "UNKNOWN_KEY",
            FailureKind::GapTooLarge => "GAP_TOO_LARGE",
            FailureKind::InvalidValue => "INVALID_VALUE",
            FailureKind::NonPositiveGap => "NON_POSITIVE_GAP",
            FailureKind::RateOutOfRange => "RATE_OUT_OF_RANGE",
        }
    }
}

/// Why a sample did not produce a rate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateError {
    #[error("cannot compute rate for unknown key {key}")]
    UnknownKey { key: String },
    #[error("timestamp gap {gap}s reaches limit {limit}s; discarding update")]
    GapTooLarge { gap: i64, limit: i64 },
    #[error("cannot compute rate from non-finite values (value={value}, previous={previous})")]
    InvalidValue { value: f64, previous: f64 },
    #[error("timestamp gap {gap}s is not positive")]
    NonPositiveGap { gap: i64 },
    #[error("rate {rate} is outside [{min}, {max}]")]
    RateOutOfRange { rate: f64, min: f64, max: f64 },
}

impl RateError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RateError::UnknownKey { .. } => FailureKind::UnknownKey,
            RateError::GapTooLarge { .. } => FailureKind::GapTooLarge,
            RateError::InvalidValue { .. } => FailureKind::InvalidValue,
            RateError::NonPositiveGap { .. } => FailureKind::NonPositiveGap,
            RateError::RateOutOfRange { .. } => FailureKind::RateOutOfRange,
        }
    }

    /// `true` when the caller skipped `record_baseline`; every other kind is
    /// an ordinary per-sample outcome.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, RateError::UnknownKey { .. })
    }
}

/// Stable error codes for [`TsdsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidConfig,
    UnsupportedVersion,
    NonNumeric,
    Encode,
    Transport,
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::NonNumeric => "NON_NUMERIC",
            ErrorCode::Encode => "ENCODE",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TsdsError>;

/// Unified error type for everything outside rate validity.
#[derive(Debug, Error)]
pub enum TsdsError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("non-numeric sample value: {0}")]
    NonNumeric(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl TsdsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TsdsError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            TsdsError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            TsdsError::NonNumeric(_) => ErrorCode::NonNumeric,
            TsdsError::Encode(_) => ErrorCode::Encode,
            TsdsError::Transport(_) => ErrorCode::Transport,
            TsdsError::Internal(_) => ErrorCode::Internal,
        }
    }
}
