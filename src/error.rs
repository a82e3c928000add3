//! Error types for the energy-sensor exporter.
//!
//! Every component has its own error enum; they all convert into the
//! top-level [`Error`] so a single handler in `main` can decide how the
//! process exits.

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Metering API communication and decoding errors
    #[error("metering API error")]
    Api(#[from] ApiError),

    /// Output file errors
    #[error("export error")]
    Export(#[from] ExportError),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Required configuration value is missing
    #[error("missing required configuration: {0}")]
    Missing(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Metering API communication and decoding errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed (401)
    #[error("token expired or not authorized")]
    AuthFailed,

    /// Server returned an error status
    #[error("server error (status {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Gzip body could not be inflated
    #[error("unable to decode gzipped response: {0}")]
    Decompress(#[source] std::io::Error),

    /// Body is not the expected JSON envelope
    #[error("unable to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Next-page cursor is not a usable request target
    #[error("invalid page cursor '{0}'")]
    InvalidCursor(String),
}

/// Output file errors.
#[derive(Error, Debug)]
pub enum ExportError {
    /// File creation or flush failed
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed
    #[error("failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed
    #[error("failed to write JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new missing configuration error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ApiError {
    /// Creates an error from a non-success HTTP status and response body.
    pub fn server_error(status: reqwest::StatusCode, body: String) -> Self {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            Self::AuthFailed
        } else {
            Self::ServerError {
                status: status.as_u16(),
                message: body,
            }
        }
    }
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Configuration problems exit with 2, rejected tokens with 3 and
    /// everything else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(_) => 2,
            Error::Api(ApiError::AuthFailed) => 3,
            Error::Api(_) | Error::Export(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod config_error {
        use super::*;

        #[test]
        fn test_env_parse_error() {
            let err = ConfigError::env_parse("invalid format");
            assert_eq!(err.to_string(), "failed to parse environment variables: invalid format");
        }

        #[test]
        fn test_missing_error() {
            let err = ConfigError::missing("EB_ACCESS_TOKEN");
            assert_eq!(err.to_string(), "missing required configuration: EB_ACCESS_TOKEN");
        }

        #[test]
        fn test_invalid_error() {
            let err = ConfigError::invalid("aggr", "unknown aggregation level 'weekly'");
            assert_eq!(
                err.to_string(),
                "invalid configuration value for aggr: unknown aggregation level 'weekly'"
            );
        }
    }

    mod api_error {
        use super::*;
        use reqwest::StatusCode;

        #[test]
        fn test_unauthorized_maps_to_auth_failed() {
            let err = ApiError::server_error(StatusCode::UNAUTHORIZED, String::new());
            assert!(matches!(err, ApiError::AuthFailed));
            assert_eq!(err.to_string(), "token expired or not authorized");
        }

        #[test]
        fn test_other_status_maps_to_server_error() {
            let err = ApiError::server_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
            assert_eq!(err.to_string(), "server error (status 502): upstream down");
        }

        #[test]
        fn test_forbidden_is_not_auth_failed() {
            let err = ApiError::server_error(StatusCode::FORBIDDEN, "nope".to_string());
            assert!(matches!(err, ApiError::ServerError { status: 403, .. }));
        }
    }

    mod exit_code {
        use super::*;

        #[test]
        fn test_config_error_exits_with_two() {
            let err: Error = ConfigError::missing("token").into();
            assert_eq!(err.exit_code(), 2);
        }

        #[test]
        fn test_auth_error_exits_with_three() {
            let err: Error = ApiError::AuthFailed.into();
            assert_eq!(err.exit_code(), 3);
        }

        #[test]
        fn test_other_errors_exit_with_one() {
            let err: Error = ApiError::InvalidCursor("::".to_string()).into();
            assert_eq!(err.exit_code(), 1);

            let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
            let err: Error = ExportError::Io(io).into();
            assert_eq!(err.exit_code(), 1);
        }
    }

    mod error_conversion {
        use super::*;

        #[test]
        fn test_config_error_conversion() {
            let config_err = ConfigError::missing("test");
            let err: Error = config_err.into();
            assert!(matches!(err, Error::Config(_)));
        }

        #[test]
        fn test_anyhow_chain_contains_cause() {
            let err = Error::Config(ConfigError::missing("test"));
            let anyhow_err: anyhow::Error = err.into();
            let rendered = format!("{:#}", anyhow_err);
            assert!(rendered.contains("configuration error"));
            assert!(rendered.contains("missing required configuration: test"));
        }
    }
}
