use thiserror::Error;

pub type PfResult<T> = Result<T, PfError>;

#[derive(Error, Debug)]
pub enum PfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Computation failed: {message}")]
    Computation { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
