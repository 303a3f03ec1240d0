use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::adapters::wire::{fetch_json, row_decimal, row_i64};
use crate::config::{trim_base_url, COINBASE_BASE_URL};
use crate::http_client::{HttpClient, HttpRequest};
use crate::source::{ExchangeId, SourceError};
use crate::{Candle, Market, Timeframe, UtcDateTime};

/// Granularity sent for timeframes Coinbase has no bucket for.
pub const FALLBACK_GRANULARITY: u32 = 60;

const PRODUCTS: &str = "/products";

/// Coinbase Exchange public market data. No credentials are needed.
#[derive(Clone)]
pub struct CoinbaseAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
}

impl CoinbaseAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(COINBASE_BASE_URL),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(base_url.into());
        self
    }

    /// Bucket width in seconds for `interval`.
    ///
    /// Coinbase has no weekly or monthly candles. Those fall back to one-minute
    /// buckets instead of failing, which is almost certainly not what a caller
    /// asking for weekly bars wants; the fallback is logged at `warn`.
    pub fn granularity(interval: Timeframe) -> u32 {
        match interval {
            Timeframe::OneMinute => 60,
            Timeframe::OneHour => 3_600,
            Timeframe::OneDay => 86_400,
            Timeframe::OneWeek | Timeframe::OneMonth => {
                warn!(
                    %interval,
                    granularity = FALLBACK_GRANULARITY,
                    "coinbase has no candles for this timeframe, falling back"
                );
                FALLBACK_GRANULARITY
            }
        }
    }

    /// Product catalog.
    pub async fn markets(&self) -> Result<Vec<Market>, SourceError> {
        let payload: Vec<CoinbaseProductPayload> = fetch_json(
            self.http_client.as_ref(),
            ExchangeId::Coinbase,
            HttpRequest::get(format!("{}{}", self.base_url, PRODUCTS)),
        )
        .await?;

        debug!(count = payload.len(), "normalizing coinbase products");
        payload
            .into_iter()
            .map(|item| {
                Market::new(item.id, item.base_currency, item.quote_currency)
                    .map_err(SourceError::from)
            })
            .collect()
    }

    /// Historic candles for `product_id` (e.g. `BTC-USD`), newest first as Coinbase
    /// returns them.
    pub async fn kline(
        &self,
        product_id: &str,
        interval: Timeframe,
    ) -> Result<Vec<Candle>, SourceError> {
        if product_id.trim().is_empty() {
            return Err(SourceError::invalid_argument(
                "coinbase candles request requires a product id",
            ));
        }

        let request = HttpRequest::get(format!(
            "{}{}/{}/candles",
            self.base_url,
            PRODUCTS,
            urlencoding::encode(product_id)
        ))
        .with_query("granularity", Self::granularity(interval));

        let rows: Vec<CoinbaseCandleRow> =
            fetch_json(self.http_client.as_ref(), ExchangeId::Coinbase, request).await?;

        rows.into_iter().map(normalize_candle).collect()
    }
}

fn normalize_candle(row: CoinbaseCandleRow) -> Result<Candle, SourceError> {
    let time = UtcDateTime::from_unix_seconds(row.time)?;
    Candle::new(time, row.open, row.high, row.low, row.close, row.volume)
        .map_err(SourceError::from)
}

#[derive(Debug, Clone, Deserialize)]
struct CoinbaseProductPayload {
    id: String,
    base_currency: String,
    quote_currency: String,
}

/// One candle row. Coinbase orders the elements `[time, low, high, open, close,
/// volume]`, unlike Binance's open-first layout.
#[derive(Debug, Clone, PartialEq)]
struct CoinbaseCandleRow {
    time: i64,
    low: Decimal,
    high: Decimal,
    open: Decimal,
    close: Decimal,
    volume: Decimal,
}

impl<'de> Deserialize<'de> for CoinbaseCandleRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let row: Vec<Value> = Vec::deserialize(deserializer)?;

        Ok(Self {
            time: row_i64::<D::Error>(&row, 0, "time")?,
            low: row_decimal::<D::Error>(&row, 1, "low")?,
            high: row_decimal::<D::Error>(&row, 2, "high")?,
            open: row_decimal::<D::Error>(&row, 3, "open")?,
            close: row_decimal::<D::Error>(&row, 4, "close")?,
            volume: row_decimal::<D::Error>(&row, 5, "volume")?,
        })
    }
}
