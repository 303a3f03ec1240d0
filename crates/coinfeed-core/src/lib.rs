//! # Coinfeed Core
//!
//! Exchange adapters and normalized value types for crypto market data.
//!
//! ## Overview
//!
//! Coinalyze, Binance and Coinbase each encode the same concepts differently:
//! positional kline arrays in different field orders, maker flags instead of
//! sides, string codes or integer seconds for candle widths. This crate maps all
//! of them onto one model:
//!
//! - **Domain models** for trades, candles, tickers, markets, open interest and
//!   funding rates, with exact decimals
//! - **Exchange adapters** that issue the requests and normalize the responses
//! - **HTTP client abstraction** so transports can be swapped or mocked
//! - **Validation** of candle OHLC consistency
//! - **Expectancy formulas** for downstream trade analysis
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Coinalyze, Binance and Coinbase adapters |
//! | [`config`] | Credentials and base URLs |
//! | [`domain`] | Domain models (Trade, Candle, Ticker, Market, Timeframe) |
//! | [`error`] | Validation errors |
//! | [`expectancy`] | Expectancy, Kelly and probability helpers |
//! | [`http_client`] | HTTP client abstraction |
//! | [`source`] | Exchange identifiers and adapter errors |
//! | [`validation`] | Candle consistency check |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use coinfeed_core::{BinanceAdapter, ReqwestHttpClient, Timeframe};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = BinanceAdapter::new(Arc::new(ReqwestHttpClient::new()));
//!
//!     let candles = adapter.kline("BTCUSDT", Timeframe::OneHour, 24).await?;
//!     for candle in &candles {
//!         println!("{} close {}", candle.time, candle.close);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every adapter call returns `Result<_, SourceError>`:
//!
//! ```rust
//! use coinfeed_core::{SourceError, SourceErrorKind};
//!
//! fn handle_error(error: SourceError) {
//!     match error.kind() {
//!         SourceErrorKind::Http { status } => {
//!             // error.body() holds the exchange's own error payload
//!             let _ = (status, error.body());
//!         }
//!         SourceErrorKind::InvalidArgument => {
//!             // Fix the input, e.g. split symbol batches
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Concurrency
//!
//! All operations are `async` and hold no shared mutable state. Nothing here
//! retries, times out or fans out; callers who want concurrent fetches join the
//! futures themselves.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod expectancy;
pub mod http_client;
pub mod source;
pub mod validation;

// Adapter implementations
pub use adapters::{BinanceAdapter, CoinalyzeAdapter, CoinbaseAdapter};

// Configuration
pub use config::{CoinalyzeConfig, COINALYZE_API_KEY_ENV};

// Domain models
pub use domain::{
    Candle, FundingRate, Market, OpenInterest, Side, Ticker, Timeframe, Trade, UtcDateTime,
};

// Error types
pub use error::ValidationError;
pub use source::{ExchangeId, SourceError, SourceErrorKind};

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
    StaticHttpClient,
};

pub use validation::verify_candle;
