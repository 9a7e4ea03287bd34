use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value {value} is not a legal {field} content (allowed {min}..={max} in steps of {step})")]
    OutOfDomain {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
        step: f64,
    },

    #[error("Length mismatch: {what} (expected {expected}, got {actual})")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}
