// src/infra/errors.rs — Error types for hotelchat

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    // Client-side validation (never reaches the network)
    #[error("{0}")]
    Validation(String),

    // Transport errors
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("Invalid response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    // Server said no
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Rejected {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Not logged in as admin")]
    NotLoggedIn,

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    /// Build a transport error from a reqwest failure, classifying body
    /// decode failures separately from connection problems.
    pub fn from_reqwest(endpoint: &str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        } else {
            ClientError::Transport {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Text shown to the user inline. Rejections surface the raw server body.
    pub fn detail(&self) -> String {
        match self {
            ClientError::Rejected { body, .. } if !body.is_empty() => body.clone(),
            ClientError::Rejected { status, .. } => format!("HTTP {status}"),
            ClientError::Transport { message, .. } | ClientError::Decode { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ClientError::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_detail_is_raw_body() {
        let e = ClientError::Rejected {
            endpoint: "/book".into(),
            status: 404,
            body: r#"{"detail":"Hotel not found"}"#.into(),
        };
        assert_eq!(e.detail(), r#"{"detail":"Hotel not found"}"#);
        assert!(e.is_rejected());
    }

    #[test]
    fn test_rejected_empty_body_falls_back_to_status() {
        let e = ClientError::Rejected {
            endpoint: "/book".into(),
            status: 500,
            body: String::new(),
        };
        assert_eq!(e.detail(), "HTTP 500");
    }

    #[test]
    fn test_transport_detail() {
        let e = ClientError::Transport {
            endpoint: "/chat".into(),
            message: "connection refused".into(),
        };
        assert_eq!(e.detail(), "connection refused");
        assert!(!e.is_rejected());
    }

    #[test]
    fn test_validation_display() {
        let e = ClientError::validation("Please enter username and password");
        assert_eq!(e.to_string(), "Please enter username and password");
    }
}
