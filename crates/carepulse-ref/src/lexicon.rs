//! Lexicon-based sentiment polarity.
//!
//! A small, deterministic stand-in for a trained sentiment model. Each known
//! word carries a polarity; an intensifier just before a word scales it, and
//! a negator within the previous few tokens flips and halves it. The text's
//! polarity is the mean over matched words, clamped to `[-1, 1]`. Text with
//! no known words is neutral.

use std::collections::HashMap;

use carepulse_contracts::error::CarePulseResult;
use carepulse_core::traits::Sentiment;

/// Scale applied to a negated word's polarity.
const NEGATION_SCALE: f64 = -0.5;
/// How many tokens a negator stays in effect for.
const NEGATION_WINDOW: usize = 3;

const WORDS: &[(&str, f64)] = &[
    // positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("wonderful", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("fine", 0.4),
    ("okay", 0.3),
    ("ok", 0.3),
    ("happy", 0.8),
    ("glad", 0.5),
    ("relieved", 0.5),
    ("hopeful", 0.5),
    ("thankful", 0.6),
    ("comfortable", 0.4),
    ("calm", 0.3),
    ("stable", 0.2),
    ("improving", 0.4),
    ("improved", 0.4),
    // negative
    ("bad", -0.7),
    ("worse", -0.6),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("unbearable", -1.0),
    ("agony", -0.9),
    ("miserable", -0.9),
    ("desperate", -0.8),
    ("hopeless", -0.8),
    ("depressed", -0.7),
    ("frightened", -0.7),
    ("panic", -0.7),
    ("painful", -0.7),
    ("sick", -0.7),
    ("scared", -0.6),
    ("afraid", -0.6),
    ("angry", -0.6),
    ("severe", -0.6),
    ("worsening", -0.6),
    ("sad", -0.5),
    ("anxious", -0.5),
    ("worried", -0.5),
    ("lonely", -0.5),
    ("upset", -0.5),
    ("crying", -0.5),
    ("struggling", -0.5),
    ("exhausted", -0.5),
    ("hurts", -0.5),
    ("hurt", -0.5),
    ("weak", -0.4),
    ("tired", -0.3),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("very", 1.3),
    ("really", 1.2),
    ("so", 1.2),
    ("quite", 1.1),
    ("slightly", 0.7),
    ("somewhat", 0.7),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "cannot", "can't", "cant", "don't", "dont", "isn't", "won't", "without",
];

/// Deterministic word-lexicon `Sentiment`.
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    words: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl LexiconSentiment {
    pub fn new() -> Self {
        Self {
            words: WORDS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    /// Polarity of `text`; never fails.
    pub fn score(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let tokens = lower
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty());

        let mut total = 0.0;
        let mut matched = 0usize;
        let mut scale = 1.0;
        let mut negation_left = 0usize;

        for token in tokens {
            if NEGATORS.contains(&token) {
                negation_left = NEGATION_WINDOW;
                continue;
            }
            if let Some(&factor) = self.intensifiers.get(token) {
                scale *= factor;
                continue;
            }

            if let Some(&polarity) = self.words.get(token) {
                let mut value = polarity * scale;
                if negation_left > 0 {
                    value *= NEGATION_SCALE;
                    negation_left = 0;
                }
                total += value;
                matched += 1;
            } else {
                negation_left = negation_left.saturating_sub(1);
            }
            scale = 1.0;
        }

        if matched == 0 {
            return 0.0;
        }
        (total / matched as f64).clamp(-1.0, 1.0)
    }
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new()
    }
}

impl Sentiment for LexiconSentiment {
    fn polarity(&self, text: &str) -> CarePulseResult<f64> {
        Ok(self.score(text))
    }
}
