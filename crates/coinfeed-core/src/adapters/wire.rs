//! Request execution and JSON decoding shared by the exchange adapters.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, Error as DeError};
use serde_json::Value;
use tracing::{debug, warn};

use crate::http_client::{HttpClient, HttpRequest};
use crate::source::{ExchangeId, SourceError};
use crate::ValidationError;

/// Execute `request` and decode a 2xx body into `T`.
///
/// Non-2xx responses become [`SourceError::http`] carrying the decoded body. A body
/// that is not JSON is carried as a JSON string so nothing the exchange said is lost.
pub(crate) async fn fetch_json<T>(
    http_client: &dyn HttpClient,
    exchange: ExchangeId,
    request: HttpRequest,
) -> Result<T, SourceError>
where
    T: DeserializeOwned,
{
    debug!(%exchange, url = %request.url, query = ?request.query, "sending request");

    let response = http_client.execute(request).await.map_err(|error| {
        SourceError::transport(format!("{exchange} transport error: {}", error.message()))
    })?;

    debug!(%exchange, status = response.status, bytes = response.body.len(), "received response");

    if !response.is_success() {
        let body = serde_json::from_str::<Value>(&response.body)
            .unwrap_or_else(|_| Value::String(response.body.clone()));
        warn!(%exchange, status = response.status, %body, "exchange rejected request");
        return Err(SourceError::http(exchange, response.status, body));
    }

    serde_json::from_str(&response.body).map_err(|error| {
        SourceError::decode(format!("failed to parse {exchange} response: {error}"))
    })
}

/// Parse an exchange decimal, accepting plain and scientific notation.
pub(crate) fn parse_decimal(field: &'static str, text: &str) -> Result<Decimal, ValidationError> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| ValidationError::InvalidDecimal {
            field,
            value: text.to_owned(),
        })
}

/// Exchanges send prices either as JSON strings or JSON numbers. With serde_json's
/// `arbitrary_precision` a number keeps the exchange's digits, so its text goes
/// straight to the decimal parser without an `f64` in between.
pub(crate) fn decimal_from_value(
    field: &'static str,
    value: &Value,
) -> Result<Decimal, ValidationError> {
    match value {
        Value::String(text) => parse_decimal(field, text),
        Value::Number(number) => parse_decimal(field, &number.to_string()),
        other => Err(ValidationError::InvalidDecimal {
            field,
            value: other.to_string(),
        }),
    }
}

/// Read one positional element of an array row as a decimal.
pub(crate) fn row_decimal<E>(row: &[Value], index: usize, field: &'static str) -> Result<Decimal, E>
where
    E: DeError,
{
    let value = row
        .get(index)
        .ok_or_else(|| E::custom(format!("row has no element {index} ({field})")))?;
    decimal_from_value(field, value).map_err(E::custom)
}

/// Read one positional element of an array row as an integer timestamp.
pub(crate) fn row_i64<E>(row: &[Value], index: usize, field: &'static str) -> Result<i64, E>
where
    E: DeError,
{
    row.get(index)
        .and_then(Value::as_i64)
        .ok_or_else(|| E::custom(format!("row element {index} ({field}) must be an integer")))
}
