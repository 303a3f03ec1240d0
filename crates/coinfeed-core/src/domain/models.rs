use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// Aggressor side of a matched trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

/// Single executed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub time: UtcDateTime,
    pub side: Side,
    pub price: Decimal,
    pub volume: Decimal,
}

impl Trade {
    pub fn new(
        time: UtcDateTime,
        side: Side,
        price: Decimal,
        volume: Decimal,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("price", price)?;
        validate_non_negative("volume", volume)?;

        Ok(Self {
            time,
            side,
            price,
            volume,
        })
    }
}

/// OHLCV bar.
///
/// Construction does not check that `high`/`low` bound `open`/`close`; use
/// [`crate::verify_candle`] for that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    pub time: UtcDateTime,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Candle {
    pub fn new(
        time: UtcDateTime,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;
        validate_non_negative("volume", volume)?;

        Ok(Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Latest price/volume snapshot for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: String,
    pub price: Decimal,
    pub volume: Decimal,
}

impl Ticker {
    pub fn new(
        symbol: impl Into<String>,
        price: Decimal,
        volume: Decimal,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("price", price)?;
        validate_non_negative("volume", volume)?;

        Ok(Self {
            symbol: validate_symbol(symbol.into())?,
            price,
            volume,
        })
    }
}

/// Tradable instrument metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Market {
    pub symbol: String,
    pub base: String,
    pub quote: String,
}

impl Market {
    pub fn new(
        symbol: impl Into<String>,
        base: impl Into<String>,
        quote: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            symbol: validate_symbol(symbol.into())?,
            base: base.into(),
            quote: quote.into(),
        })
    }
}

/// Current open interest of a derivatives market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenInterest {
    pub symbol: String,
    pub value: Decimal,
    pub time: UtcDateTime,
}

impl OpenInterest {
    pub fn new(
        symbol: impl Into<String>,
        value: Decimal,
        time: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("value", value)?;

        Ok(Self {
            symbol: validate_symbol(symbol.into())?,
            value,
            time,
        })
    }
}

/// Current funding rate of a perpetual market. Rates may be negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingRate {
    pub symbol: String,
    pub rate: Decimal,
    pub time: UtcDateTime,
}

impl FundingRate {
    pub fn new(
        symbol: impl Into<String>,
        rate: Decimal,
        time: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            symbol: validate_symbol(symbol.into())?,
            rate,
            time,
        })
    }
}

fn validate_non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_symbol(symbol: String) -> Result<String, ValidationError> {
    if symbol.trim().is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    Ok(symbol)
}
