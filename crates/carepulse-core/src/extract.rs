//! Keyword and sentiment risk extraction.
//!
//! Keywords are matched as substrings of the lowercased raw text, not the
//! normalized text, so multi-word phrases survive surrounding punctuation.
//! A keyword listed in both tiers would be counted twice; the tables below
//! happen not to overlap, but the scoring does not deduplicate.

use serde_json::Value;
use tracing::{debug, warn};

use carepulse_contracts::patient::RiskAssessment;

use crate::{category::provisional_category, traits::Sentiment};

/// High-severity symptoms, each worth `HIGH_RISK_WEIGHT`.
pub const HIGH_RISK_SYMPTOMS: &[&str] = &[
    "chest pain",
    "shortness of breath",
    "difficulty breathing",
    "suicide",
    "suicidal",
    "heart attack",
    "stroke",
    "seizure",
    "unconscious",
    "bleeding",
    "severe pain",
    "crushing",
    "blue lips",
];

/// Medium-severity symptoms, each worth `MEDIUM_RISK_WEIGHT`.
pub const MEDIUM_RISK_SYMPTOMS: &[&str] = &[
    "fever",
    "migraine",
    "vomiting",
    "diarrhea",
    "infection",
    "cut",
    "injury",
    "dizzy",
    "asthma",
    "wheezing",
];

pub const HIGH_RISK_WEIGHT: f64 = 10.0;
pub const MEDIUM_RISK_WEIGHT: f64 = 5.0;

/// Score bump for a polarity below -0.5.
pub const STRONG_NEGATIVE_BUMP: f64 = 2.0;
/// Score bump for any other negative polarity.
pub const MILD_NEGATIVE_BUMP: f64 = 1.0;

/// Map a sentiment polarity to the score adjustment it earns.
pub fn sentiment_adjustment(polarity: f64) -> f64 {
    if polarity < -0.5 {
        STRONG_NEGATIVE_BUMP
    } else if polarity < 0.0 {
        MILD_NEGATIVE_BUMP
    } else {
        0.0
    }
}

/// Extract symptoms, score, and provisional category from `text`.
///
/// Total: a sentiment failure degrades to `RiskAssessment::fallback()`
/// instead of propagating.
pub fn extract(text: &str, sentiment: &dyn Sentiment) -> RiskAssessment {
    extract_with_tiers(text, sentiment, HIGH_RISK_SYMPTOMS, MEDIUM_RISK_SYMPTOMS)
}

/// Extract from a raw JSON cell. Non-string values yield the fallback.
pub fn extract_value(value: &Value, sentiment: &dyn Sentiment) -> RiskAssessment {
    match value.as_str() {
        Some(text) => extract(text, sentiment),
        None => RiskAssessment::fallback(),
    }
}

pub(crate) fn extract_with_tiers(
    text: &str,
    sentiment: &dyn Sentiment,
    high_tier: &[&str],
    medium_tier: &[&str],
) -> RiskAssessment {
    let polarity = match sentiment.polarity(text) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "sentiment scoring failed; using fallback assessment");
            return RiskAssessment::fallback();
        }
    };

    let text_lower = text.to_lowercase();
    let mut symptoms = Vec::new();
    let mut score = sentiment_adjustment(polarity);

    for (tier, weight) in [(high_tier, HIGH_RISK_WEIGHT), (medium_tier, MEDIUM_RISK_WEIGHT)] {
        for symptom in tier {
            if text_lower.contains(symptom) {
                symptoms.push((*symptom).to_string());
                score += weight;
            }
        }
    }

    let category = provisional_category(score);
    debug!(
        score,
        polarity,
        category = %category,
        matches = symptoms.len(),
        "extracted risk features"
    );

    RiskAssessment {
        category,
        score,
        symptoms,
    }
}
