use thiserror::Error;

/// Core error types for ACLScan
///
/// Normalization is the only fallible stage: the relation, anomaly, and
/// match computations are total over well-formed [`Policy`] lists and never
/// return errors.
///
/// [`Policy`]: crate::core::policy::Policy
#[derive(Debug, Error)]
pub enum Error {
    /// Token could not be parsed into an address, port, protocol, or action
    #[error("parse error in '{token}': {message}")]
    Parse { token: String, message: String },

    /// Token parsed but carries an out-of-range value (prefix > 32, port > 65535, inverted range)
    #[error("validation error in {field}: {message}")]
    Validation { field: String, message: String },

    /// I/O operation failed while reading a rule-set file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rule-set deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a parse failure on a specific input token.
    pub fn parse(token: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            token: token.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an out-of-range value in a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
