use thiserror::Error;

/// Validation and contract errors exposed by `coinfeed-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid timeframe '{value}', expected one of 1m, 1h, 1d, 1w, 1M")]
    InvalidTimeframe { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("unix timestamp {value} is out of range")]
    TimestampOutOfRange { value: i64 },

    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("field '{field}' is not a valid decimal: '{value}'")]
    InvalidDecimal { field: &'static str, value: String },

    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("request must include at least one symbol")]
    EmptySymbolBatch,
    #[error("{exchange} accepts at most {max} symbols per request, got {len}")]
    SymbolBatchTooLarge {
        exchange: &'static str,
        len: usize,
        max: usize,
    },
    #[error("limit {value} is outside the accepted range {min}..={max}")]
    LimitOutOfRange { value: usize, min: usize, max: usize },

    #[error("missing credential: {name} must be set and non-empty")]
    MissingCredential { name: &'static str },
}
