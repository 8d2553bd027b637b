//! # Service Errors
//!
//! Failure modes of the outbound HTTP seams (store, relay, ESI, webhook).
//! "Not found" is deliberately absent: lookups model it as `Ok(None)`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} responded with status {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to decode {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service} authentication failed: {message}")]
    Auth {
        service: &'static str,
        message: String,
    },

    #[error("{service} is misconfigured: {message}")]
    Config {
        service: &'static str,
        message: String,
    },
}

impl ServiceError {
    pub fn transport(service: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { service, source }
    }

    pub fn decode(service: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { service, source }
    }

    pub fn auth(service: &'static str, message: impl Into<String>) -> Self {
        Self::Auth {
            service,
            message: message.into(),
        }
    }

    pub fn config(service: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            service,
            message: message.into(),
        }
    }

    /// Network failures, throttling and server errors may clear up on their own.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Decode { .. } | Self::Auth { .. } | Self::Config { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses() {
        let status = |status| ServiceError::Status {
            service: "esi",
            status,
            body: String::new(),
        };
        assert!(status(502).is_transient());
        assert!(status(429).is_transient());
        assert!(!status(404).is_transient());
        assert!(!status(400).is_transient());
    }

    #[test]
    fn test_decode_is_permanent() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ServiceError::decode("redisq", err);
        assert!(!err.is_transient());
        assert!(err.to_string().starts_with("failed to decode redisq response"));
    }
}
