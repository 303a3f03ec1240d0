use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::adapters::wire::{decimal_from_value, fetch_json, row_decimal, row_i64};
use crate::config::{trim_base_url, BINANCE_BASE_URL};
use crate::http_client::{HttpClient, HttpRequest};
use crate::source::{ExchangeId, SourceError};
use crate::{Candle, Market, Side, Ticker, Timeframe, Trade, UtcDateTime, ValidationError};

/// Default row count for trade and kline requests.
pub const DEFAULT_LIMIT: usize = 500;
/// Largest `limit` Binance accepts on the trades and klines endpoints.
pub const MAX_LIMIT: usize = 1000;

const TICKER_24H: &str = "/api/v3/ticker/24hr";
const TRADES: &str = "/api/v3/trades";
const KLINES: &str = "/api/v3/klines";

/// Binance spot public market data. No credentials are needed.
#[derive(Clone)]
pub struct BinanceAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
}

impl BinanceAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(BINANCE_BASE_URL),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(base_url.into());
        self
    }

    /// 24-hour rolling statistics for every symbol.
    pub async fn tickers(&self) -> Result<Vec<Ticker>, SourceError> {
        let payload: Vec<BinanceTickerPayload> =
            fetch_json(self.http_client.as_ref(), ExchangeId::Binance, self.request(TICKER_24H))
                .await?;

        debug!(count = payload.len(), "normalizing binance tickers");
        payload.into_iter().map(normalize_ticker).collect()
    }

    /// Most recent trades for `symbol`, oldest first.
    pub async fn trades(&self, symbol: &str, limit: usize) -> Result<Vec<Trade>, SourceError> {
        validate_limit(limit)?;
        let request = self
            .request(TRADES)
            .with_query("symbol", symbol)
            .with_query("limit", limit);

        let payload: Vec<BinanceTradePayload> =
            fetch_json(self.http_client.as_ref(), ExchangeId::Binance, request).await?;

        payload.into_iter().map(normalize_trade).collect()
    }

    /// OHLCV bars for `symbol`.
    pub async fn kline(
        &self,
        symbol: &str,
        interval: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, SourceError> {
        validate_limit(limit)?;
        let request = self
            .request(KLINES)
            .with_query("symbol", symbol)
            .with_query("interval", interval.as_str())
            .with_query("limit", limit);

        let rows: Vec<BinanceKlineRow> =
            fetch_json(self.http_client.as_ref(), ExchangeId::Binance, request).await?;

        rows.into_iter().map(normalize_kline).collect()
    }

    /// Not built yet: always fails with a not-implemented error.
    pub async fn markets(&self) -> Result<Vec<Market>, SourceError> {
        Err(SourceError::not_implemented(ExchangeId::Binance, "markets"))
    }

    fn request(&self, path: &str) -> HttpRequest {
        HttpRequest::get(format!("{}{}", self.base_url, path))
    }
}

fn validate_limit(limit: usize) -> Result<(), ValidationError> {
    if limit == 0 || limit > MAX_LIMIT {
        return Err(ValidationError::LimitOutOfRange {
            value: limit,
            min: 1,
            max: MAX_LIMIT,
        });
    }
    Ok(())
}

/// Binance flags whether the buyer was the resting (maker) order. When it was, the
/// aggressor sold into the bid.
fn aggressor_side(is_buyer_maker: bool) -> Side {
    if is_buyer_maker {
        Side::Sell
    } else {
        Side::Buy
    }
}

fn normalize_ticker(payload: BinanceTickerPayload) -> Result<Ticker, SourceError> {
    let price = decimal_from_value("lastPrice", &payload.last_price)?;
    let volume = decimal_from_value("volume", &payload.volume)?;
    Ticker::new(payload.symbol, price, volume).map_err(SourceError::from)
}

fn normalize_trade(payload: BinanceTradePayload) -> Result<Trade, SourceError> {
    let time = UtcDateTime::from_unix_millis(payload.time)?;
    let price = decimal_from_value("price", &payload.price)?;
    let volume = decimal_from_value("qty", &payload.qty)?;
    Trade::new(time, aggressor_side(payload.is_buyer_maker), price, volume)
        .map_err(SourceError::from)
}

fn normalize_kline(row: BinanceKlineRow) -> Result<Candle, SourceError> {
    let time = UtcDateTime::from_unix_millis(row.open_time)?;
    Candle::new(time, row.open, row.high, row.low, row.close, row.volume)
        .map_err(SourceError::from)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceTickerPayload {
    symbol: String,
    last_price: Value,
    volume: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceTradePayload {
    price: Value,
    qty: Value,
    /// Unix milliseconds.
    time: i64,
    is_buyer_maker: bool,
}

/// One kline row. Binance sends
/// `[open_time, open, high, low, close, volume, close_time, quote_volume, trades, ...]`;
/// only the first six elements are read.
#[derive(Debug, Clone, PartialEq)]
struct BinanceKlineRow {
    open_time: i64,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: Decimal,
}

impl<'de> Deserialize<'de> for BinanceKlineRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let row: Vec<Value> = Vec::deserialize(deserializer)?;

        Ok(Self {
            open_time: row_i64::<D::Error>(&row, 0, "open_time")?,
            open: row_decimal::<D::Error>(&row, 1, "open")?,
            high: row_decimal::<D::Error>(&row, 2, "high")?,
            low: row_decimal::<D::Error>(&row, 3, "low")?,
            close: row_decimal::<D::Error>(&row, 4, "close")?,
            volume: row_decimal::<D::Error>(&row, 5, "volume")?,
        })
    }
}
