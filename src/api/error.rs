//! Failure taxonomy for calls against the library API.

use thiserror::Error;

/// What went wrong with a request, split the way the UI reports it:
/// a status line for server rejections, the base URL for connectivity
/// problems, the underlying text for local configuration mistakes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("server responded with status {status}")]
    Status { status: u16 },

    #[error("no response from the API at {base_url}; check the connection and that the server is up")]
    Unreachable { base_url: String },

    #[error("request could not be sent: {message}")]
    Request { message: String },

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Classify a transport-level `reqwest` failure. Status rejections never
    /// reach this path; they are produced from the response itself.
    pub fn from_transport(err: reqwest::Error, base_url: &str) -> Self {
        if err.is_builder() {
            return ApiError::Request {
                message: err.to_string(),
            };
        }
        if let Some(status) = err.status() {
            return ApiError::Status {
                status: status.as_u16(),
            };
        }
        // The request left the client but no usable response came back.
        if err.is_connect() || err.is_timeout() || err.is_request() {
            return ApiError::Unreachable {
                base_url: base_url.to_string(),
            };
        }
        ApiError::Unexpected {
            message: err.to_string(),
        }
    }

    /// Classify a failure to decode a 2xx response body.
    pub fn from_decode(err: reqwest::Error) -> Self {
        ApiError::Unexpected {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_carries_the_code() {
        let err = ApiError::Status { status: 500 };
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn unreachable_message_names_the_base_url() {
        let err = ApiError::Unreachable {
            base_url: "http://localhost:5034/api".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("http://localhost:5034/api"));
        assert!(!msg.contains("status"));
    }

    #[test]
    fn request_message_keeps_underlying_text() {
        let err = ApiError::Request {
            message: "builder error: invalid port".to_string(),
        };
        assert!(err.to_string().contains("invalid port"));
    }
}
