//! Headline relevance scoring.
//!
//! An ordered list of (matcher, score) rules evaluated first-match-wins. All
//! matching is case-insensitive substring search, so "ai" also matches
//! inside longer words.

const ALIASES: &[(&str, &[&str])] = &[
    ("aapl", &["apple", "iphone", "ipad", "mac", "tim cook"]),
    ("googl", &["google", "alphabet", "android", "youtube", "chrome"]),
    ("msft", &["microsoft", "windows", "office", "azure", "teams"]),
    ("amzn", &["amazon", "aws", "prime", "bezos"]),
    ("tsla", &["tesla", "elon musk", "electric vehicle", "ev"]),
    ("meta", &["facebook", "instagram", "whatsapp", "metaverse"]),
    ("nflx", &["netflix", "streaming"]),
    ("nvda", &["nvidia", "gpu", "ai chip"]),
    ("btc", &["bitcoin", "btc", "cryptocurrency"]),
    ("eth", &["ethereum", "eth", "smart contract"]),
];

const MARKET_TERMS: &[&str] = &[
    "stock",
    "market",
    "shares",
    "trading",
    "investment",
    "earnings",
    "revenue",
    "profit",
];

const SECTOR_TERMS: &[&str] = &[
    "technology",
    "tech",
    "software",
    "digital",
    "ai",
    "artificial intelligence",
    "bank",
    "financial",
    "credit",
    "loan",
    "payment",
];

const ECONOMY_TERMS: &[&str] = &["economy", "economic", "business", "corporate", "industry"];

pub const FALLBACK_RELEVANCE: f64 = 0.1;

#[derive(Debug, Clone, Copy)]
enum Matcher {
    Ticker,
    Alias,
    AnyOf(&'static [&'static str]),
}

const RULES: &[(Matcher, f64)] = &[
    (Matcher::Ticker, 0.9),
    (Matcher::Alias, 0.8),
    (Matcher::AnyOf(MARKET_TERMS), 0.6),
    (Matcher::AnyOf(SECTOR_TERMS), 0.4),
    (Matcher::AnyOf(ECONOMY_TERMS), 0.3),
];

/// Base ticker used for matching: lower-cased, `-USD` suffix stripped.
pub fn base_ticker(symbol: &str) -> String {
    symbol.replace("-USD", "").to_lowercase()
}

/// Known aliases of a base ticker.
pub fn aliases(ticker: &str) -> &'static [&'static str] {
    ALIASES
        .iter()
        .find(|(t, _)| *t == ticker)
        .map(|(_, terms)| *terms)
        .unwrap_or(&[])
}

impl Matcher {
    fn matches(&self, headline: &str, ticker: &str) -> bool {
        match self {
            Matcher::Ticker => headline.contains(ticker),
            Matcher::Alias => aliases(ticker).iter().any(|term| headline.contains(term)),
            Matcher::AnyOf(terms) => terms.iter().any(|term| headline.contains(term)),
        }
    }
}

/// Relevance of `headline` to `symbol` in [0, 1].
///
/// 0.0 only for an empty headline or symbol; anything else scores at least
/// [`FALLBACK_RELEVANCE`].
pub fn relevance(headline: &str, symbol: &str) -> f64 {
    let ticker = base_ticker(symbol);
    if headline.is_empty() || ticker.is_empty() {
        return 0.0;
    }

    let headline = headline.to_lowercase();
    RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(&headline, &ticker))
        .map(|(_, score)| *score)
        .unwrap_or(FALLBACK_RELEVANCE)
}
