//! Typed analysis results — one variant per task so the presenter's
//! exhaustiveness is enforced at compile time.

use serde::Deserialize;
use serde_json::{json, Value};

/// The three analysis workflows the service offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Score,
    Rewrite,
    Match,
}

/// Structured result of the score workflow. Deserialization fails unless all
/// four fields are present, which is the schema-conformance check.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreReport {
    /// Formatted as "<0-100> / 100".
    pub score: String,
    pub strengths: String,
    pub weaknesses: String,
    pub suggestions: String,
}

/// Structured result of the match workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchReport {
    #[serde(rename = "match")]
    pub matched: String,
    pub missing: String,
    /// Percentage-like string, e.g. "78%".
    pub score: String,
}

/// Outcome of one analysis request, constructed fresh per request.
#[derive(Debug)]
pub enum AnalysisReport {
    Score(ScoreReport),
    Rewrite(String),
    Match(MatchReport),
}

impl ScoreReport {
    /// Response schema declaration sent alongside the score prompt.
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "score": { "type": "STRING" },
                "strengths": { "type": "STRING" },
                "weaknesses": { "type": "STRING" },
                "suggestions": { "type": "STRING" }
            },
            "required": ["score", "strengths", "weaknesses", "suggestions"],
            "propertyOrdering": ["score", "strengths", "weaknesses", "suggestions"]
        })
    }
}

impl MatchReport {
    /// Response schema declaration sent alongside the match prompt.
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "match": { "type": "STRING" },
                "missing": { "type": "STRING" },
                "score": { "type": "STRING" }
            },
            "required": ["match", "missing", "score"],
            "propertyOrdering": ["match", "missing", "score"]
        })
    }
}
