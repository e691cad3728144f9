//! Result presentation: maps a pipeline outcome onto the view-model the page
//! layer renders. Exactly one of {result fields} or {error} is populated per
//! response — the constructors make a partial or mixed view unrepresentable
//! from the outside.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

use crate::analysis::report::{AnalysisReport, MatchReport, ScoreReport, TaskKind};
use crate::errors::AppError;

#[derive(Debug, Serialize)]
pub struct ScoreView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strengths: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weaknesses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RewriteView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchView {
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScoreView {
    pub fn success(report: ScoreReport) -> Self {
        Self {
            score: Some(report.score),
            strengths: Some(report.strengths),
            weaknesses: Some(report.weaknesses),
            suggestions: Some(report.suggestions),
            error: None,
        }
    }

    pub fn failure(error: &AppError) -> Self {
        Self {
            score: None,
            strengths: None,
            weaknesses: None,
            suggestions: None,
            error: Some(error.to_string()),
        }
    }
}

impl RewriteView {
    pub fn success(result: String) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: &AppError) -> Self {
        Self {
            result: None,
            error: Some(error.to_string()),
        }
    }
}

impl MatchView {
    pub fn success(report: MatchReport) -> Self {
        Self {
            matched: Some(report.matched),
            missing: Some(report.missing),
            score: Some(report.score),
            error: None,
        }
    }

    pub fn failure(error: &AppError) -> Self {
        Self {
            matched: None,
            missing: None,
            score: None,
            error: Some(error.to_string()),
        }
    }
}

/// Maps a pipeline outcome to the rendered response for its task. This is
/// the request boundary: no upstream failure escapes as a raw error page,
/// and the specific failure is logged here even though the user sees one
/// generic message per class.
pub fn present(kind: TaskKind, outcome: Result<AnalysisReport, AppError>) -> Response {
    match outcome {
        Ok(AnalysisReport::Score(report)) => Json(ScoreView::success(report)).into_response(),
        Ok(AnalysisReport::Rewrite(text)) => Json(RewriteView::success(text)).into_response(),
        Ok(AnalysisReport::Match(report)) => Json(MatchView::success(report)).into_response(),
        Err(err) => {
            match &err {
                AppError::Validation(msg) => debug!("rejected upload: {msg}"),
                AppError::EmptyExtraction => debug!("document contained no usable text"),
                AppError::Extract(e) => error!("document decode failed: {e}"),
                AppError::Llm(e) => error!("inference failed: {e:?}"),
                AppError::Multipart(e) => error!("multipart decode failed: {e}"),
            }
            match kind {
                TaskKind::Score => Json(ScoreView::failure(&err)).into_response(),
                TaskKind::Rewrite => Json(RewriteView::failure(&err)).into_response(),
                TaskKind::Match => Json(MatchView::failure(&err)).into_response(),
            }
        }
    }
}
