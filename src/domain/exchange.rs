//! Exchange and symbol input validation.

use crate::domain::error::CuratorError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    Nyse,
    Nasdaq,
    Psx,
    Crypto,
}

impl Exchange {
    /// Suffix the price provider expects after a symbol on this exchange.
    pub fn suffix(&self) -> &'static str {
        match self {
            Exchange::Psx => ".KHI",
            Exchange::Nyse | Exchange::Nasdaq | Exchange::Crypto => "",
        }
    }

    pub fn provider_symbol(&self, symbol: &str) -> String {
        format!("{}{}", symbol, self.suffix())
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exchange::Nyse => write!(f, "NYSE"),
            Exchange::Nasdaq => write!(f, "NASDAQ"),
            Exchange::Psx => write!(f, "PSX"),
            Exchange::Crypto => write!(f, "CRYPTO"),
        }
    }
}

impl FromStr for Exchange {
    type Err = CuratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NYSE" => Ok(Exchange::Nyse),
            "NASDAQ" => Ok(Exchange::Nasdaq),
            "PSX" => Ok(Exchange::Psx),
            "CRYPTO" => Ok(Exchange::Crypto),
            _ => Err(CuratorError::InvalidExchange {
                value: s.to_string(),
            }),
        }
    }
}

/// Upper-cases `symbol` and checks it only holds `A-Z`, `0-9`, `.` and `-`.
pub fn validate_symbol(symbol: &str) -> Result<String, CuratorError> {
    let normalized = symbol.trim().to_uppercase();
    let valid = !normalized.is_empty()
        && normalized
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-');
    if !valid {
        return Err(CuratorError::InvalidSymbol {
            symbol: symbol.to_string(),
        });
    }
    Ok(normalized)
}

pub fn validate_days(days: i64) -> Result<usize, CuratorError> {
    if days <= 0 {
        return Err(CuratorError::InvalidDays { days });
    }
    Ok(days as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exchange_case_insensitive() {
        assert_eq!("nyse".parse::<Exchange>().unwrap(), Exchange::Nyse);
        assert_eq!(" PSX ".parse::<Exchange>().unwrap(), Exchange::Psx);
        assert_eq!("Crypto".parse::<Exchange>().unwrap(), Exchange::Crypto);
    }

    #[test]
    fn unknown_exchange_rejected() {
        let err = "LSE".parse::<Exchange>().unwrap_err();
        assert!(matches!(err, CuratorError::InvalidExchange { .. }));
    }

    #[test]
    fn psx_gets_suffix() {
        assert_eq!(Exchange::Psx.provider_symbol("HBL"), "HBL.KHI");
        assert_eq!(Exchange::Nasdaq.provider_symbol("AAPL"), "AAPL");
        assert_eq!(Exchange::Crypto.provider_symbol("BTC-USD"), "BTC-USD");
    }

    #[test]
    fn display_roundtrip() {
        assert_eq!(Exchange::Nasdaq.to_string(), "NASDAQ");
        assert_eq!(
            serde_json::to_string(&Exchange::Crypto).unwrap(),
            "\"CRYPTO\""
        );
    }

    #[test]
    fn symbol_normalized() {
        assert_eq!(validate_symbol("aapl").unwrap(), "AAPL");
        assert_eq!(validate_symbol("btc-usd").unwrap(), "BTC-USD");
        assert_eq!(validate_symbol("BRK.B").unwrap(), "BRK.B");
    }

    #[test]
    fn bad_symbols_rejected() {
        for bad in ["", "   ", "AA PL", "AAPL$", "ÄPFEL"] {
            assert!(
                matches!(validate_symbol(bad), Err(CuratorError::InvalidSymbol { .. })),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn days_must_be_positive() {
        assert_eq!(validate_days(7).unwrap(), 7);
        assert!(matches!(
            validate_days(0),
            Err(CuratorError::InvalidDays { days: 0 })
        ));
        assert!(validate_days(-3).is_err());
    }
}
