//! # CLI Error Type
//!
//! Unified error type for the script runner.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  read script ──── io::Error ─────────► CliError::Read      (IO_ERROR)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse JSON ───── serde_json::Error ─► CliError::Script    (INVALID_…)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  replay (--strict) ─ CartError ──────► CliError::Rejected  (VALIDATION) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write output ─── io::Error ─────────► CliError::Write     (IO_ERROR)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopcart_core::CartError;
use thiserror::Error;

/// Errors that stop a script run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid action script: {0}")]
    Script(#[from] serde_json::Error),

    #[error("action #{index} rejected: {source}")]
    Rejected {
        index: usize,
        #[source]
        source: CartError,
    },

    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Reading input or writing output failed
    IoError,

    /// The script is not a JSON array of cart actions
    InvalidScript,

    /// A cart action failed validation
    ValidationError,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub fn exit_status(self) -> u8 {
        match self {
            ErrorCode::IoError => 74,
            ErrorCode::InvalidScript => 65,
            ErrorCode::ValidationError => 2,
        }
    }
}

impl CliError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Read { .. } | CliError::Write(_) => ErrorCode::IoError,
            CliError::Script(_) => ErrorCode::InvalidScript,
            CliError::Rejected { source, .. } => match source {
                CartError::Validation(_) => ErrorCode::ValidationError,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcart_core::ValidationError;

    #[test]
    fn test_rejected_message_and_code() {
        let err = CliError::Rejected {
            index: 3,
            source: ValidationError::Required {
                field: "_id".to_string(),
            }
            .into(),
        };

        assert_eq!(
            err.to_string(),
            "action #3 rejected: Validation error: _id is required"
        );
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.code().exit_status(), 2);
    }

    #[test]
    fn test_script_error_code() {
        let parse_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = CliError::from(parse_err);

        assert_eq!(err.code(), ErrorCode::InvalidScript);
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::InvalidScript).unwrap();
        assert_eq!(json, "\"INVALID_SCRIPT\"");
    }
}
