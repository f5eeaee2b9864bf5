//! Flow-meter calculation errors.

use pf_core::PfError;
use thiserror::Error;

/// Result type for flow-meter operations.
pub type MeterResult<T> = Result<T, MeterError>;

/// Errors that can occur while deriving flow-meter quantities.
///
/// These are deterministic mathematical failures, not transient faults;
/// callers report them, they never retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeterError {
    /// A ratio divided by an exactly-zero quantity (zero pipe diameter,
    /// β saturated to 1, zero Reynolds number).
    #[error("Division by zero in {what}")]
    DivisionByZero { what: &'static str },

    /// The flow-rate square-root argument was negative.
    #[error("Square root of negative value in {what}: {value}")]
    NegativeRadicand { what: &'static str, value: f64 },

    /// An edge-type label from the presentation boundary did not match any
    /// recognized variant.
    #[error("Unsupported edge type: {label}")]
    UnsupportedEdgeType { label: String },

    /// A tap-type label from the presentation boundary did not match any
    /// recognized variant.
    #[error("Unsupported tap type: {label}")]
    UnsupportedTapType { label: String },

    /// A formula produced a non-finite value not covered by a more specific
    /// guard.
    #[error("Non-finite result for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

impl From<MeterError> for PfError {
    fn from(err: MeterError) -> Self {
        PfError::Computation {
            message: err.to_string(),
        }
    }
}
