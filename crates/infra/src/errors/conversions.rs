//! Conversions from external infrastructure errors into domain errors.

use byt_domain::BytError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use std::io::Error as IoError;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BytError);

impl From<InfraError> for BytError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BytError> for InfraError {
    fn from(value: BytError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoBytError {
    fn into_byt(self) -> BytError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → BytError */
/* -------------------------------------------------------------------------- */

impl IntoBytError for HttpError {
    fn into_byt(self) -> BytError {
        if self.is_timeout() {
            return BytError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return BytError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return BytError::Serialization(format!("invalid HTTP response body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                404 => BytError::NotFound(message),
                _ => BytError::Api { status: code, message },
            };
        }

        BytError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_byt())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → BytError */
/* -------------------------------------------------------------------------- */

impl IntoBytError for JsonError {
    fn into_byt(self) -> BytError {
        BytError::Serialization(format!(
            "JSON error at line {} column {}: {}",
            self.line(),
            self.column(),
            self
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_byt())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → BytError */
/* -------------------------------------------------------------------------- */

impl IntoBytError for IoError {
    fn into_byt(self) -> BytError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::NotFound => BytError::NotFound(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => BytError::Storage(format!("permission denied: {self}")),
            _ => BytError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_byt())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → BytError */
/* -------------------------------------------------------------------------- */

impl IntoBytError for TomlError {
    fn into_byt(self) -> BytError {
        BytError::Config(format!("Invalid TOML format: {}", self.message()))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        InfraError(value.into_byt())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
