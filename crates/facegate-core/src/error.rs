// ── Core error types ──
//
// Errors from facegate-core that escape to the embedding front end. Submission
// failures never show up here: they are reported to the user through the
// feedback reporter and summarised as a `SubmitOutcome`. What remains is
// construction and file-selection trouble.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out")]
    Timeout,

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Cannot use image {path}: {reason}")]
    InvalidImage { path: String, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<facegate_api::Error> for CoreError {
    fn from(err: facegate_api::Error) -> Self {
        match err {
            facegate_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                    }
                }
            }
            facegate_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            facegate_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
            facegate_api::Error::Io { path, source } => CoreError::InvalidImage {
                path: path.display().to_string(),
                reason: source.to_string(),
            },
            facegate_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unreadable reply: {message}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_maps_to_invalid_image() {
        let err = facegate_api::Error::Io {
            path: "/tmp/face.png".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let core: CoreError = err.into();
        assert!(
            matches!(core, CoreError::InvalidImage { ref path, .. } if path == "/tmp/face.png")
        );
    }

    #[test]
    fn tls_error_maps_to_config() {
        let core: CoreError = facegate_api::Error::Tls("bad pem".into()).into();
        assert_eq!(core.to_string(), "Configuration error: TLS error: bad pem");
    }
}
