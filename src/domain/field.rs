//! Structured feature columns.
//!
//! `Field` is the key of every structured value carried from the indicator
//! engine to the exported record. Its declaration order is the column order
//! used by exporters.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
    DailyReturn,
    Volatility,
    Ma(usize),
    Rsi,
    BollingerUpper,
    BollingerLower,
    Macd,
    MacdSignal,
    MacdHistogram,
    StochK,
    StochD,
    WilliamsR,
    Vix,
    Dxy,
    Treasury10y,
    Sp500Correlation,
}

impl Field {
    pub const OHLCV: [Field; 5] = [
        Field::Open,
        Field::High,
        Field::Low,
        Field::Close,
        Field::Volume,
    ];

    pub const MARKET: [Field; 4] = [
        Field::Vix,
        Field::Dxy,
        Field::Treasury10y,
        Field::Sp500Correlation,
    ];

    pub fn is_ohlcv(&self) -> bool {
        Self::OHLCV.contains(self)
    }

    /// All columns produced by the engine for the given moving-average periods.
    pub fn all(ma_periods: &[usize]) -> Vec<Field> {
        let mut fields = Self::OHLCV.to_vec();
        fields.push(Field::DailyReturn);
        fields.push(Field::Volatility);
        fields.extend(ma_periods.iter().map(|&p| Field::Ma(p)));
        fields.extend([
            Field::Rsi,
            Field::BollingerUpper,
            Field::BollingerLower,
            Field::Macd,
            Field::MacdSignal,
            Field::MacdHistogram,
            Field::StochK,
            Field::StochD,
            Field::WilliamsR,
        ]);
        fields.extend(Self::MARKET);
        fields
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Open => write!(f, "open"),
            Field::High => write!(f, "high"),
            Field::Low => write!(f, "low"),
            Field::Close => write!(f, "close"),
            Field::Volume => write!(f, "volume"),
            Field::DailyReturn => write!(f, "daily_return"),
            Field::Volatility => write!(f, "volatility"),
            Field::Ma(period) => write!(f, "ma_{}", period),
            Field::Rsi => write!(f, "rsi"),
            Field::BollingerUpper => write!(f, "bollinger_upper"),
            Field::BollingerLower => write!(f, "bollinger_lower"),
            Field::Macd => write!(f, "macd"),
            Field::MacdSignal => write!(f, "macd_signal"),
            Field::MacdHistogram => write!(f, "macd_histogram"),
            Field::StochK => write!(f, "stoch_k"),
            Field::StochD => write!(f, "stoch_d"),
            Field::WilliamsR => write!(f, "williams_r"),
            Field::Vix => write!(f, "vix"),
            Field::Dxy => write!(f, "dxy"),
            Field::Treasury10y => write!(f, "treasury_10y"),
            Field::Sp500Correlation => write!(f, "sp500_correlation"),
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim().to_lowercase().as_str() {
            "open" => Field::Open,
            "high" => Field::High,
            "low" => Field::Low,
            "close" => Field::Close,
            "volume" => Field::Volume,
            "daily_return" => Field::DailyReturn,
            "volatility" => Field::Volatility,
            "rsi" => Field::Rsi,
            "bollinger_upper" => Field::BollingerUpper,
            "bollinger_lower" => Field::BollingerLower,
            "macd" => Field::Macd,
            "macd_signal" => Field::MacdSignal,
            "macd_histogram" => Field::MacdHistogram,
            "stoch_k" => Field::StochK,
            "stoch_d" => Field::StochD,
            "williams_r" => Field::WilliamsR,
            "vix" => Field::Vix,
            "dxy" => Field::Dxy,
            "treasury_10y" => Field::Treasury10y,
            "sp500_correlation" => Field::Sp500Correlation,
            other => {
                let period = other
                    .strip_prefix("ma_")
                    .and_then(|p| p.parse::<usize>().ok())
                    .filter(|&p| p > 0)
                    .ok_or_else(|| format!("unknown field: {}", s.trim()))?;
                Field::Ma(period)
            }
        };
        Ok(field)
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
