//! Patient records and risk categories.
//!
//! A `PatientRecord` is produced once per conversation row by the ingestion
//! pipeline. Only `risk_score` is durable ground truth; the category shown to
//! operators is always recomputed from it at read time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Discrete urgency label derived from a risk score.
///
/// Variants are declared in severity order so `Low < Medium < High`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Medium => "Medium",
            RiskCategory::High => "High",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(RiskCategory::Low),
            "medium" => Ok(RiskCategory::Medium),
            "high" => Ok(RiskCategory::High),
            other => Err(format!("unknown risk category '{other}'")),
        }
    }
}

/// Output of the risk extractor for a single conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Provisional label computed with the fixed extraction-time boundaries.
    pub category: RiskCategory,
    /// Cumulative keyword weight plus sentiment adjustment. Never negative.
    pub score: f64,
    /// Matched keywords in tier-then-list order.
    pub symptoms: Vec<String>,
}

impl RiskAssessment {
    /// The assessment used for non-text input and failed enrichment.
    pub fn fallback() -> Self {
        Self {
            category: RiskCategory::Low,
            score: 0.0,
            symptoms: Vec::new(),
        }
    }
}

/// One row of raw input handed to the ingestion pipeline.
///
/// `conversation` is kept as a raw JSON value so that rows carrying a
/// non-string body still ingest with fallback values instead of failing the
/// whole batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationRow {
    /// Pre-existing identifier; a positional `P001`-style id is assigned when absent.
    #[serde(default, deserialize_with = "lenient_id")]
    pub patient_id: Option<String>,
    /// The free-text conversation body.
    #[serde(default)]
    pub conversation: Value,
    /// Any other source columns, carried through to the record untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConversationRow {
    /// Build a row from plain text with no identifier or extra columns.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            patient_id: None,
            conversation: Value::String(text.into()),
            extra: Map::new(),
        }
    }
}

/// A scored patient, as persisted after ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Stable, unique identifier.
    pub patient_id: String,
    /// Raw conversation text. `None` when the source row was not text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<String>,
    /// Matched symptom keywords; may contain duplicates.
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Persisted score. A missing, null, or non-numeric field loads as 0.0.
    #[serde(default, deserialize_with = "score_or_zero")]
    pub risk_score: f64,
    /// Extraction-time label. Advisory only; never shown as the live category.
    #[serde(default)]
    pub provisional_category: RiskCategory,
    /// Remaining source columns (e.g. `cleaned_text`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PatientRecord {
    /// Build a record with only an id and a score. Mostly useful in tests and fixtures.
    pub fn scored(patient_id: impl Into<String>, risk_score: f64) -> Self {
        Self {
            patient_id: patient_id.into(),
            conversation: None,
            symptoms: Vec::new(),
            risk_score,
            provisional_category: RiskCategory::Low,
            extra: Map::new(),
        }
    }
}

/// Field names owned by `PatientRecord` and `EnrichedPatient`. A source
/// column with one of these names would serialize as a duplicate key.
pub const RESERVED_FIELDS: &[&str] = &[
    "patient_id",
    "conversation",
    "symptoms",
    "risk_score",
    "provisional_category",
    "risk_category",
    "status",
];

/// Remove reserved names from a set of carried-through columns, returning
/// the names that were present.
pub fn strip_reserved(extra: &mut Map<String, Value>) -> Vec<&'static str> {
    RESERVED_FIELDS
        .iter()
        .copied()
        .filter(|field| extra.remove(*field).is_some())
        .collect()
}

/// Any score that is not a finite, non-negative number (or a string holding
/// one) loads as 0.0.
fn score_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let score = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(score.filter(|s| s.is_finite() && *s >= 0.0).unwrap_or(0.0))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
