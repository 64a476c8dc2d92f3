use thiserror::Error;

use crate::registration::Field;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Everything that can go wrong talking to the gym backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never produced an HTTP response (offline, DNS, CORS, aborted).
    #[error("Network error: {0}")]
    Transport(String),

    /// Backend answered with a non-2xx status.
    #[error("Server error: HTTP {status}")]
    Server { status: u16, message: Option<String> },

    /// 2xx response whose body is not what we expected.
    #[error("Unexpected response: {0}")]
    Shape(String),
}

impl ApiError {
    /// Best available text for the user. Never blank.
    pub fn user_message(&self) -> String {
        let specific = match self {
            ApiError::Server {
                message: Some(m), ..
            } => Some(m.trim()),
            ApiError::Server { .. } => None,
            ApiError::Transport(m) | ApiError::Shape(m) => Some(m.trim()),
        };

        match (specific, self) {
            (Some(m), ApiError::Shape(_)) if !m.is_empty() => format!("Unexpected response: {m}"),
            (Some(m), _) if !m.is_empty() => m.to_string(),
            (_, ApiError::Server { status, .. }) => {
                format!("The server responded with HTTP {status}. {GENERIC_FAILURE}")
            }
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Required fields missing before submit. Never reaches the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Please fill in: {}", .missing.iter().map(|f| f.label()).collect::<Vec<_>>().join(", "))]
pub struct ValidationError {
    pub missing: Vec<Field>,
}
