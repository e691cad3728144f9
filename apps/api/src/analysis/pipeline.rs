//! Per-request orchestration: Validator → Extractor → Prompt Builder →
//! Inference Client → report. Strictly sequential, no state retained across
//! requests; every failure maps to one `AppError` and is reported exactly
//! once, within the originating request.

use tracing::debug;

use crate::analysis::extract::extract_pdf_text;
use crate::analysis::postprocess::strip_emphasis_markers;
use crate::analysis::prompts;
use crate::analysis::report::{AnalysisReport, MatchReport, ScoreReport, TaskKind};
use crate::analysis::upload::{validate, AnalysisForm, ERR_NO_DESC};
use crate::errors::AppError;
use crate::llm_client::{InferenceBackend, LlmError};

/// Runs the full pipeline for one request: validate the form, extract text
/// from the document, then analyze the text.
pub async fn run(
    kind: TaskKind,
    form: &AnalysisForm,
    llm: &dyn InferenceBackend,
) -> Result<AnalysisReport, AppError> {
    let request = validate(kind, form)?;
    let text = extract_pdf_text(request.bytes)?;
    debug!("extracted {} characters from upload", text.len());
    run_on_text(kind, &text, request.desc, llm).await
}

/// Analysis over already-extracted text. The extractor never raises on an
/// empty document, so the usable-text check lives here, ahead of any
/// external call.
pub async fn run_on_text(
    kind: TaskKind,
    text: &str,
    desc: Option<&str>,
    llm: &dyn InferenceBackend,
) -> Result<AnalysisReport, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::EmptyExtraction);
    }

    match kind {
        TaskKind::Score => {
            let prompt = prompts::score_prompt(text);
            let value = llm
                .generate_json(&prompt, ScoreReport::response_schema())
                .await?;
            let report: ScoreReport =
                serde_json::from_value(value).map_err(|e| AppError::Llm(LlmError::Parse(e)))?;
            Ok(AnalysisReport::Score(report))
        }
        TaskKind::Rewrite => {
            let prompt = prompts::rewrite_prompt(text);
            let raw = llm.generate_text(&prompt).await?;
            Ok(AnalysisReport::Rewrite(strip_emphasis_markers(&raw)))
        }
        TaskKind::Match => {
            let desc = desc.ok_or_else(|| AppError::Validation(ERR_NO_DESC.to_string()))?;
            let prompt = prompts::match_prompt(text, desc);
            let value = llm
                .generate_json(&prompt, MatchReport::response_schema())
                .await?;
            let report: MatchReport =
                serde_json::from_value(value).map_err(|e| AppError::Llm(LlmError::Parse(e)))?;
            Ok(AnalysisReport::Match(report))
        }
    }
}
