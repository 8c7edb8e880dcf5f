//! Word-lexicon polarity analyzer.
//!
//! Each headline token is looked up in a small financial lexicon. A negator
//! ("not", "no", "never", ...) flips the sign of the next scored word.
//! Polarity is the mean of the scored words, 0 when none matched.

use crate::domain::error::CuratorError;
use crate::ports::sentiment_port::SentimentAnalyzer;

const POSITIVE: &[(&str, f64)] = &[
    ("beat", 0.6),
    ("beats", 0.6),
    ("surge", 0.8),
    ("surges", 0.8),
    ("soar", 0.8),
    ("soars", 0.8),
    ("rally", 0.7),
    ("rallies", 0.7),
    ("record", 0.5),
    ("growth", 0.5),
    ("gain", 0.5),
    ("gains", 0.5),
    ("profit", 0.4),
    ("profits", 0.4),
    ("strong", 0.5),
    ("bullish", 0.8),
    ("upgrade", 0.6),
    ("upgraded", 0.6),
    ("outperform", 0.6),
    ("exceed", 0.5),
    ("exceeds", 0.5),
    ("success", 0.6),
    ("breakthrough", 0.7),
    ("good", 0.5),
    ("great", 0.7),
    ("positive", 0.5),
    ("rise", 0.4),
    ("rises", 0.4),
    ("up", 0.2),
];

const NEGATIVE: &[(&str, f64)] = &[
    ("miss", -0.6),
    ("misses", -0.6),
    ("drop", -0.5),
    ("drops", -0.5),
    ("fall", -0.5),
    ("falls", -0.5),
    ("decline", -0.5),
    ("declines", -0.5),
    ("loss", -0.5),
    ("losses", -0.5),
    ("plunge", -0.8),
    ("plunges", -0.8),
    ("crash", -0.9),
    ("crashes", -0.9),
    ("slump", -0.7),
    ("bearish", -0.8),
    ("downgrade", -0.6),
    ("downgraded", -0.6),
    ("weak", -0.5),
    ("layoff", -0.6),
    ("layoffs", -0.6),
    ("lawsuit", -0.5),
    ("warning", -0.5),
    ("fail", -0.6),
    ("fails", -0.6),
    ("bad", -0.6),
    ("negative", -0.5),
    ("concern", -0.4),
    ("concerns", -0.4),
    ("risk", -0.3),
    ("down", -0.2),
];

const NEGATORS: &[&str] = &["not", "no", "never", "without", "isn't", "doesn't", "didn't", "won't"];

#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }

    fn score(word: &str) -> Option<f64> {
        POSITIVE
            .iter()
            .chain(NEGATIVE)
            .find(|(w, _)| *w == word)
            .map(|(_, s)| *s)
    }
}

impl SentimentAnalyzer for LexiconSentiment {
    fn polarity(&self, text: &str) -> Result<f64, CuratorError> {
        let lowered = text.to_lowercase();
        let mut negate = false;
        let mut total = 0.0;
        let mut hits = 0usize;

        for token in lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty())
        {
            if NEGATORS.contains(&token) {
                negate = true;
                continue;
            }
            if let Some(score) = Self::score(token) {
                total += if negate { -score } else { score };
                hits += 1;
                negate = false;
            }
        }

        if hits == 0 {
            return Ok(0.0);
        }
        Ok((total / hits as f64).clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polarity(text: &str) -> f64 {
        LexiconSentiment::new().polarity(text).unwrap()
    }

    #[test]
    fn positive_headline() {
        assert!(polarity("Apple shares surge after strong earnings") > 0.5);
    }

    #[test]
    fn negative_headline() {
        assert!(polarity("Tesla stock plunges on weak deliveries") < -0.5);
    }

    #[test]
    fn neutral_without_lexicon_words() {
        assert_eq!(polarity("Company holds annual meeting"), 0.0);
        assert_eq!(polarity(""), 0.0);
    }

    #[test]
    fn negation_flips_next_word() {
        assert!(polarity("Results were not good") < 0.0);
        assert!(polarity("Outlook is not bad") > 0.0);
    }

    #[test]
    fn mixed_headline_averages() {
        let p = polarity("Profit beats estimates but losses widen");
        assert!((p - (0.4 + 0.6 - 0.5) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn always_in_range() {
        for text in ["crash crash crash", "soar soar", "no no no crash"] {
            let p = polarity(text);
            assert!((-1.0..=1.0).contains(&p), "{text}: {p}");
        }
    }
}
