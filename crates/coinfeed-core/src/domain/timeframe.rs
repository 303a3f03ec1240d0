use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Candle bucket widths understood by the exchange adapters.
///
/// Codes are case-sensitive: `1m` is one minute, `1M` is one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

impl Timeframe {
    pub const ALL: [Self; 5] = [
        Self::OneMinute,
        Self::OneHour,
        Self::OneDay,
        Self::OneWeek,
        Self::OneMonth,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::OneHour => "1h",
            Self::OneDay => "1d",
            Self::OneWeek => "1w",
            Self::OneMonth => "1M",
        }
    }
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "1m" => Ok(Self::OneMinute),
            "1h" => Ok(Self::OneHour),
            "1d" => Ok(Self::OneDay),
            "1w" => Ok(Self::OneWeek),
            "1M" => Ok(Self::OneMonth),
            other => Err(ValidationError::InvalidTimeframe {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timeframe() {
        let timeframe = Timeframe::from_str("1d").expect("must parse");
        assert_eq!(timeframe, Timeframe::OneDay);
    }

    #[test]
    fn minute_and_month_codes_are_case_sensitive() {
        assert_eq!(Timeframe::from_str("1m"), Ok(Timeframe::OneMinute));
        assert_eq!(Timeframe::from_str("1M"), Ok(Timeframe::OneMonth));
    }

    #[test]
    fn rejects_unknown_timeframe() {
        let err = Timeframe::from_str("4h").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimeframe { .. }));
    }

    #[test]
    fn display_matches_wire_code() {
        for timeframe in Timeframe::ALL {
            assert_eq!(
                Timeframe::from_str(&timeframe.to_string()),
                Ok(timeframe)
            );
        }
    }
}
