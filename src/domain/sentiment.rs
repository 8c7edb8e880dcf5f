//! Sentiment normalisation.
//!
//! The analyzer behind [`SentimentAnalyzer`] reports polarity in [-1, 1].
//! Here it is mapped to [0, 1] as (polarity + 1) / 2 and rounded to 3
//! decimals. Empty text and analyzer failures both yield the neutral 0.5,
//! which downstream consumers cannot tell apart from a genuinely neutral
//! reading.

use crate::domain::article::NEUTRAL_SENTIMENT;
use crate::domain::numeric::round_to;
use crate::ports::diagnostics_port::DiagnosticsPort;
use crate::ports::sentiment_port::SentimentAnalyzer;

const COMPONENT: &str = "sentiment";

pub fn sentiment(
    analyzer: &dyn SentimentAnalyzer,
    text: &str,
    diagnostics: &dyn DiagnosticsPort,
) -> f64 {
    if text.trim().is_empty() {
        return NEUTRAL_SENTIMENT;
    }

    match analyzer.polarity(text) {
        Ok(polarity) if polarity.is_finite() => {
            round_to((polarity.clamp(-1.0, 1.0) + 1.0) / 2.0, 3)
        }
        Ok(polarity) => {
            diagnostics.debug(COMPONENT, &format!("non-finite polarity {}", polarity));
            NEUTRAL_SENTIMENT
        }
        Err(e) => {
            diagnostics.debug(COMPONENT, &format!("error analyzing sentiment: {}", e));
            NEUTRAL_SENTIMENT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::CuratorError;
    use crate::ports::diagnostics_port::NoDiagnostics;

    struct Fixed(f64);

    impl SentimentAnalyzer for Fixed {
        fn polarity(&self, _text: &str) -> Result<f64, CuratorError> {
            Ok(self.0)
        }
    }

    struct Failing;

    impl SentimentAnalyzer for Failing {
        fn polarity(&self, _text: &str) -> Result<f64, CuratorError> {
            Err(CuratorError::Sentiment {
                reason: "model unavailable".into(),
            })
        }
    }

    #[test]
    fn empty_text_is_neutral() {
        assert_eq!(sentiment(&Fixed(1.0), "", &NoDiagnostics), 0.5);
        assert_eq!(sentiment(&Fixed(1.0), "   ", &NoDiagnostics), 0.5);
    }

    #[test]
    fn failure_is_neutral() {
        assert_eq!(sentiment(&Failing, "Stocks soar", &NoDiagnostics), 0.5);
    }

    #[test]
    fn nan_is_neutral() {
        assert_eq!(sentiment(&Fixed(f64::NAN), "x", &NoDiagnostics), 0.5);
    }

    #[test]
    fn polarity_is_normalised() {
        assert_eq!(sentiment(&Fixed(1.0), "x", &NoDiagnostics), 1.0);
        assert_eq!(sentiment(&Fixed(-1.0), "x", &NoDiagnostics), 0.0);
        assert_eq!(sentiment(&Fixed(0.0), "x", &NoDiagnostics), 0.5);
        assert_eq!(sentiment(&Fixed(0.3333), "x", &NoDiagnostics), 0.667);
    }

    #[test]
    fn out_of_range_polarity_is_clamped() {
        assert_eq!(sentiment(&Fixed(4.0), "x", &NoDiagnostics), 1.0);
    }
}
