//! Three-way result mapping: success, client error, server error.

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::label::Label;
use crate::rules::classify_number;
use crate::validate::{validate, ValidationError};

/// Failure taxonomy for a single classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("internal fault: {0}")]
    InternalFault(String),
}

/// Coarse outcome category; transports map it to their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Ok,
    ClientError,
    ServerError,
}

impl StatusCategory {
    /// Recommended HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            StatusCategory::Ok => 200,
            StatusCategory::ClientError => 400,
            StatusCategory::ServerError => 500,
        }
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StatusCategory::Ok => "ok",
            StatusCategory::ClientError => "client_error",
            StatusCategory::ServerError => "server_error",
        };
        f.write_str(s)
    }
}

/// Label plus status category for one raw token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub label: Label,
    pub status: StatusCategory,
    /// Failure description, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Classification {
    /// Every failure resolves to `INVALID`; only the category differs.
    pub fn from_result(result: Result<Label, ClassifyError>) -> Self {
        match result {
            Ok(label) => Self {
                label,
                status: StatusCategory::Ok,
                error: None,
            },
            Err(e @ ClassifyError::Validation(_)) => Self {
                label: Label::Invalid,
                status: StatusCategory::ClientError,
                error: Some(e.to_string()),
            },
            Err(e @ ClassifyError::InternalFault(_)) => Self {
                label: Label::Invalid,
                status: StatusCategory::ServerError,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == StatusCategory::Ok
    }
}

/// Validate and label a raw token, catching any panic as an internal fault.
pub fn evaluate(raw: &str) -> Result<Label, ClassifyError> {
    let number = validate(raw)?;
    panic::catch_unwind(AssertUnwindSafe(|| classify_number(&number)))
        .map_err(|payload| ClassifyError::InternalFault(panic_message(payload.as_ref())))
}

/// Classify a raw token into a label and status category. Never panics.
pub fn classify(raw: &str) -> Classification {
    Classification::from_result(evaluate(raw))
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
