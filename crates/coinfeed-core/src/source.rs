use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ValidationError;

/// Exchange identifiers used in log fields and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    Coinalyze,
    Binance,
    Coinbase,
}

impl ExchangeId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coinalyze => "coinalyze",
            Self::Binance => "binance",
            Self::Coinbase => "coinbase",
        }
    }
}

impl Display for ExchangeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// A required credential or setting is missing.
    Configuration,
    /// The caller violated a documented precondition.
    InvalidArgument,
    /// The exchange answered with a non-2xx status.
    Http { status: u16 },
    /// The capability is declared but not built.
    NotImplemented,
    /// The request never produced a response.
    Transport,
    /// The response body did not have the expected shape.
    Decode,
}

/// Structured error returned by every adapter operation.
///
/// HTTP failures carry the exchange's decoded error payload in [`SourceError::body`]
/// so callers can inspect exchange-specific diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    body: Option<Value>,
}

impl SourceError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Configuration,
            message: message.into(),
            body: None,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidArgument,
            message: message.into(),
            body: None,
        }
    }

    pub fn http(exchange: ExchangeId, status: u16, body: Value) -> Self {
        Self {
            kind: SourceErrorKind::Http { status },
            message: format!("{exchange} returned status {status}: {body}"),
            body: Some(body),
        }
    }

    pub fn not_implemented(exchange: ExchangeId, operation: &'static str) -> Self {
        Self {
            kind: SourceErrorKind::NotImplemented,
            message: format!("{exchange} '{operation}' is not implemented"),
            body: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
            body: None,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Decode,
            message: message.into(),
            body: None,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Decoded error payload of a non-2xx response.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub const fn status(&self) -> Option<u16> {
        match self.kind {
            SourceErrorKind::Http { status } => Some(status),
            _ => None,
        }
    }

    /// Nothing in this crate retries; transport failures are the only errors a caller
    /// could reasonably repeat unchanged.
    pub const fn retryable(&self) -> bool {
        matches!(self.kind, SourceErrorKind::Transport)
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Configuration => "source.configuration",
            SourceErrorKind::InvalidArgument => "source.invalid_argument",
            SourceErrorKind::Http { .. } => "source.http",
            SourceErrorKind::NotImplemented => "source.not_implemented",
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::Decode => "source.decode",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<ValidationError> for SourceError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::MissingCredential { .. } => Self::configuration(error.to_string()),
            ValidationError::InvalidDecimal { .. }
            | ValidationError::NegativeValue { .. }
            | ValidationError::TimestampOutOfRange { .. }
            | ValidationError::TimestampNotUtc { .. } => Self::decode(error.to_string()),
            _ => Self::invalid_argument(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_keeps_body_and_status() {
        let body = serde_json::json!({"code": -1121, "msg": "Invalid symbol."});
        let error = SourceError::http(ExchangeId::Binance, 400, body.clone());

        assert_eq!(error.kind(), SourceErrorKind::Http { status: 400 });
        assert_eq!(error.status(), Some(400));
        assert_eq!(error.body(), Some(&body));
        assert_eq!(error.code(), "source.http");
        assert!(!error.retryable());
    }

    #[test]
    fn missing_credential_maps_to_configuration() {
        let error = SourceError::from(ValidationError::MissingCredential { name: "COINALYZE" });
        assert_eq!(error.kind(), SourceErrorKind::Configuration);
    }

    #[test]
    fn oversized_batch_maps_to_invalid_argument() {
        let error = SourceError::from(ValidationError::SymbolBatchTooLarge {
            exchange: "coinalyze",
            len: 21,
            max: 20,
        });
        assert_eq!(error.kind(), SourceErrorKind::InvalidArgument);
        assert!(error.message().contains("21"));
    }
}
