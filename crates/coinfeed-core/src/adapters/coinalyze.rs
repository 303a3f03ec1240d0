use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::adapters::wire::{decimal_from_value, fetch_json};
use crate::config::CoinalyzeConfig;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest};
use crate::source::{ExchangeId, SourceError};
use crate::{FundingRate, Market, OpenInterest, UtcDateTime, ValidationError};

/// Coinalyze rejects requests naming more than this many symbols.
pub const MAX_SYMBOLS_PER_REQUEST: usize = 20;

const SPOT_MARKETS: &str = "/v1/spot-markets";
const FUTURE_MARKETS: &str = "/v1/future-markets";
const OPEN_INTEREST: &str = "/v1/open-interest";
const FUNDING_RATE: &str = "/v1/funding-rate";

/// Coinalyze aggregated derivatives data. Every call is authenticated with the
/// `api_key` header.
#[derive(Clone)]
pub struct CoinalyzeAdapter {
    http_client: Arc<dyn HttpClient>,
    auth: HttpAuth,
    base_url: String,
}

impl CoinalyzeAdapter {
    /// Fails with a configuration error when `api_key` is empty.
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        api_key: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let config = CoinalyzeConfig::new(api_key)?;
        Ok(Self::with_config(http_client, &config))
    }

    pub fn with_config(http_client: Arc<dyn HttpClient>, config: &CoinalyzeConfig) -> Self {
        Self {
            http_client,
            auth: HttpAuth::header("api_key", config.api_key()),
            base_url: config.base_url().to_owned(),
        }
    }

    /// Spot markets tracked by Coinalyze.
    pub async fn spot_markets(&self) -> Result<Vec<Market>, SourceError> {
        let payload: Vec<CoinalyzeMarketPayload> = self.get(SPOT_MARKETS, &[]).await?;
        normalize_markets(payload)
    }

    /// Futures and perpetual markets tracked by Coinalyze.
    pub async fn futures_markets(&self) -> Result<Vec<Market>, SourceError> {
        let payload: Vec<CoinalyzeMarketPayload> = self.get(FUTURE_MARKETS, &[]).await?;
        normalize_markets(payload)
    }

    /// Undecoded spot market catalog, including fields [`Market`] does not carry.
    pub async fn spot_markets_raw(&self) -> Result<Value, SourceError> {
        self.get(SPOT_MARKETS, &[]).await
    }

    /// Undecoded futures market catalog (expiry, margin asset, data availability flags).
    pub async fn futures_markets_raw(&self) -> Result<Value, SourceError> {
        self.get(FUTURE_MARKETS, &[]).await
    }

    /// Current open interest, converted to USD.
    pub async fn open_interest<S>(&self, symbols: &[S]) -> Result<Vec<OpenInterest>, SourceError>
    where
        S: AsRef<str>,
    {
        let joined = join_symbols(symbols)?;
        let payload: Vec<CoinalyzeValuePayload> = self
            .get(OPEN_INTEREST, &[("symbols", joined), ("convert_to_usd", String::from("true"))])
            .await?;

        payload
            .into_iter()
            .map(|item| {
                let (value, time) = item.decode()?;
                OpenInterest::new(item.symbol, value, time).map_err(SourceError::from)
            })
            .collect()
    }

    /// Current funding rates.
    pub async fn funding<S>(&self, symbols: &[S]) -> Result<Vec<FundingRate>, SourceError>
    where
        S: AsRef<str>,
    {
        let joined = join_symbols(symbols)?;
        let payload: Vec<CoinalyzeValuePayload> =
            self.get(FUNDING_RATE, &[("symbols", joined)]).await?;

        payload
            .into_iter()
            .map(|item| {
                let (rate, time) = item.decode()?;
                FundingRate::new(item.symbol, rate, time).map_err(SourceError::from)
            })
            .collect()
    }

    async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, SourceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = query.iter().fold(
            HttpRequest::get(format!("{}{}", self.base_url, path)).with_auth(&self.auth),
            |request, (name, value)| request.with_query(*name, value),
        );

        fetch_json(self.http_client.as_ref(), ExchangeId::Coinalyze, request).await
    }
}

/// Validate the batch size and join symbols into the `symbols` parameter.
fn join_symbols<S>(symbols: &[S]) -> Result<String, ValidationError>
where
    S: AsRef<str>,
{
    if symbols.is_empty() {
        return Err(ValidationError::EmptySymbolBatch);
    }
    if symbols.len() > MAX_SYMBOLS_PER_REQUEST {
        return Err(ValidationError::SymbolBatchTooLarge {
            exchange: ExchangeId::Coinalyze.as_str(),
            len: symbols.len(),
            max: MAX_SYMBOLS_PER_REQUEST,
        });
    }

    Ok(symbols
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(","))
}

fn normalize_markets(payload: Vec<CoinalyzeMarketPayload>) -> Result<Vec<Market>, SourceError> {
    debug!(count = payload.len(), "normalizing coinalyze markets");
    payload
        .into_iter()
        .map(|item| {
            Market::new(item.symbol, item.base_asset, item.quote_asset).map_err(SourceError::from)
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
struct CoinalyzeMarketPayload {
    symbol: String,
    base_asset: String,
    quote_asset: String,
}

/// Shared shape of the open-interest and funding-rate responses.
#[derive(Debug, Clone, Deserialize)]
struct CoinalyzeValuePayload {
    symbol: String,
    value: Value,
    /// Unix milliseconds.
    update: i64,
}

impl CoinalyzeValuePayload {
    fn decode(&self) -> Result<(Decimal, UtcDateTime), ValidationError> {
        let value = decimal_from_value("value", &self.value)?;
        let time = UtcDateTime::from_unix_millis(self.update)?;
        Ok((value, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::StaticHttpClient;
    use crate::source::SourceErrorKind;
    use rust_decimal_macros::dec;

    fn adapter(client: Arc<StaticHttpClient>) -> CoinalyzeAdapter {
        CoinalyzeAdapter::new(client, "test-key").expect("valid key")
    }

    fn symbols(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("SYM{i}USDT_PERP.A")).collect()
    }

    #[test]
    fn construction_requires_key() {
        let client = Arc::new(StaticHttpClient::ok_json("[]"));
        let err = CoinalyzeAdapter::new(client.clone(), "").err().expect("must fail");

        assert_eq!(err.kind(), SourceErrorKind::Configuration);
        assert!(client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn open_interest_sends_key_symbols_and_usd_conversion() {
        let client = Arc::new(StaticHttpClient::ok_json(
            r#"[{"symbol":"BTCUSDT_PERP.A","value":1234567.5,"update":1700000000000}]"#,
        ));
        let rows = adapter(client.clone())
            .open_interest(&["BTCUSDT_PERP.A", "ETHUSDT_PERP.A"])
            .await
            .expect("open interest");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol, "BTCUSDT_PERP.A");
        assert_eq!(rows[0].value, dec!(1234567.5));
        assert_eq!(rows[0].time.unix_seconds(), 1_700_000_000);

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://api.coinalyze.net/v1/open-interest");
        assert_eq!(
            requests[0].headers.get("api_key").map(String::as_str),
            Some("test-key")
        );
        assert_eq!(
            requests[0].query_value("symbols"),
            Some("BTCUSDT_PERP.A,ETHUSDT_PERP.A")
        );
        assert_eq!(requests[0].query_value("convert_to_usd"), Some("true"));
    }

    #[tokio::test]
    async fn funding_does_not_request_usd_conversion() {
        let client = Arc::new(StaticHttpClient::ok_json(
            r#"[{"symbol":"BTCUSDT_PERP.A","value":-0.0012,"update":1700000000000}]"#,
        ));
        let rows = adapter(client.clone())
            .funding(&["BTCUSDT_PERP.A"])
            .await
            .expect("funding");

        assert_eq!(rows[0].rate, dec!(-0.0012));
        let requests = client.recorded_requests();
        assert_eq!(requests[0].url, "https://api.coinalyze.net/v1/funding-rate");
        assert_eq!(requests[0].query_value("convert_to_usd"), None);
    }

    #[tokio::test]
    async fn open_interest_keeps_full_precision_of_numeric_values() {
        let client = Arc::new(StaticHttpClient::ok_json(
            r#"[{"symbol":"BTCUSDT_PERP.A","value":8123456789.123456789,"update":1700000000000}]"#,
        ));
        let rows = adapter(client)
            .open_interest(&["BTCUSDT_PERP.A"])
            .await
            .expect("open interest");

        assert_eq!(rows[0].value, dec!(8123456789.123456789));
    }

    #[tokio::test]
    async fn malformed_value_names_the_field() {
        let client = Arc::new(StaticHttpClient::ok_json(
            r#"[{"symbol":"BTCUSDT_PERP.A","value":"n/a","update":1700000000000}]"#,
        ));
        let err = adapter(client)
            .funding(&["BTCUSDT_PERP.A"])
            .await
            .expect_err("must fail");

        assert_eq!(err.kind(), SourceErrorKind::Decode);
        assert!(err.message().contains("'value'"), "{}", err.message());
    }

    #[tokio::test]
    async fn twenty_symbols_are_accepted() {
        let client = Arc::new(StaticHttpClient::ok_json("[]"));
        let rows = adapter(client.clone())
            .funding(&symbols(MAX_SYMBOLS_PER_REQUEST))
            .await
            .expect("twenty symbols fit in one request");

        assert!(rows.is_empty());
        assert_eq!(client.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn twenty_one_symbols_fail_before_network() {
        let client = Arc::new(StaticHttpClient::ok_json("[]"));
        let adapter = adapter(client.clone());

        let oi = adapter.open_interest(&symbols(21)).await.expect_err("must fail");
        let funding = adapter.funding(&symbols(21)).await.expect_err("must fail");

        assert_eq!(oi.kind(), SourceErrorKind::InvalidArgument);
        assert_eq!(funding.kind(), SourceErrorKind::InvalidArgument);
        assert!(client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn empty_symbol_list_fails_before_network() {
        let client = Arc::new(StaticHttpClient::ok_json("[]"));
        let empty: [&str; 0] = [];
        let err = adapter(client.clone())
            .open_interest(&empty)
            .await
            .expect_err("must fail");

        assert_eq!(err.kind(), SourceErrorKind::InvalidArgument);
        assert!(client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn markets_map_base_and_quote_assets() {
        let client = Arc::new(StaticHttpClient::ok_json(
            r#"[{"symbol":"BTCUSDT.6","exchange":"6","symbol_on_exchange":"BTCUSDT",
                "base_asset":"BTC","quote_asset":"USDT","has_buy_sell_data":true}]"#,
        ));
        let markets = adapter(client.clone())
            .spot_markets()
            .await
            .expect("markets");

        assert_eq!(
            markets,
            vec![Market::new("BTCUSDT.6", "BTC", "USDT").expect("valid")]
        );
        assert_eq!(
            client.recorded_requests()[0].url,
            "https://api.coinalyze.net/v1/spot-markets"
        );
    }

    #[tokio::test]
    async fn raw_catalog_is_passed_through_unchanged() {
        let body = r#"[{"symbol":"BTCUSD_PERP.A","is_perpetual":true,"margined":"COIN"}]"#;
        let client = Arc::new(StaticHttpClient::ok_json(body));
        let raw = adapter(client.clone())
            .futures_markets_raw()
            .await
            .expect("raw");

        let expected: Value = serde_json::from_str(body).expect("fixture");
        assert_eq!(raw, expected);
        assert_eq!(
            client.recorded_requests()[0].url,
            "https://api.coinalyze.net/v1/future-markets"
        );
    }

    #[tokio::test]
    async fn http_error_carries_decoded_body() {
        let client = Arc::new(StaticHttpClient::status(
            401,
            r#"{"message":"Invalid API key"}"#,
        ));
        let err = adapter(client)
            .futures_markets()
            .await
            .expect_err("must fail");

        assert_eq!(err.kind(), SourceErrorKind::Http { status: 401 });
        assert_eq!(
            err.body(),
            Some(&serde_json::json!({"message": "Invalid API key"}))
        );
    }
}
