//! # Domain Models
//!
//! Normalized market data types produced by every exchange adapter.
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Trade`] | Executed trade with aggressor side |
//! | [`Candle`] | OHLCV bar |
//! | [`Ticker`] | Latest price/volume snapshot |
//! | [`Market`] | Instrument metadata (symbol, base, quote) |
//! | [`OpenInterest`] | Derivatives open interest |
//! | [`FundingRate`] | Perpetual funding rate |
//! | [`Timeframe`] | Candle width (1m, 1h, 1d, 1w, 1M) |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! ## Decimals
//!
//! Prices, volumes and rates are [`rust_decimal::Decimal`]. Binary floating point
//! never appears in the model, so OHLC comparisons are exact.
//!
//! ## Validation
//!
//! Constructors only check shape: non-negative prices and volumes, non-empty
//! symbols. Cross-field rules such as OHLC consistency are opt-in:
//!
//! ```rust,ignore
//! use coinfeed_core::{verify_candle, Candle, UtcDateTime};
//! use rust_decimal_macros::dec;
//!
//! let ts = UtcDateTime::from_unix_seconds(1_700_000_000)?;
//! let candle = Candle::new(ts, dec!(95), dec!(90), dec!(100), dec!(105), dec!(50))?;
//! assert!(!verify_candle(&candle));
//! ```

mod models;
mod timeframe;
mod timestamp;

pub use models::{Candle, FundingRate, Market, OpenInterest, Side, Ticker, Trade};
pub use timeframe::Timeframe;
pub use timestamp::UtcDateTime;
