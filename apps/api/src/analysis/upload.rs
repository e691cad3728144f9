//! Input validation for uploaded documents.
//!
//! The multipart stream is drained into an `AnalysisForm` first, so the
//! validator itself is a pure function over collected form state. Checks run
//! in a fixed order and stop at the first failure; each cause has its own
//! user-facing message.

use axum::extract::multipart::{Multipart, MultipartError};
use bytes::Bytes;

use crate::analysis::report::TaskKind;
use crate::errors::AppError;

/// Multipart field carrying the uploaded document.
pub const FILE_FIELD: &str = "resume";
/// Multipart field carrying the job description (match workflow only).
pub const DESC_FIELD: &str = "desc";

const PDF_EXTENSION: &str = ".pdf";

pub const ERR_NO_FILE: &str = "No file uploaded";
pub const ERR_NO_FILENAME: &str = "No file selected";
pub const ERR_NOT_PDF: &str = "Please upload a PDF file";
pub const ERR_NO_DESC: &str = "Please fill in the job description";

/// An uploaded file as received: declared filename plus raw payload.
/// Consumed by the extractor, never persisted.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Bytes,
}

/// Raw form state for one analysis request, before validation.
#[derive(Debug, Default)]
pub struct AnalysisForm {
    pub file: Option<UploadedFile>,
    pub desc: Option<String>,
}

/// A validated request: document bytes plus, when present, the description.
/// For `TaskKind::Match` the description is guaranteed present.
#[derive(Debug)]
pub struct ValidRequest<'a> {
    pub bytes: &'a [u8],
    pub desc: Option<&'a str>,
}

/// Drains the multipart stream into form state. A part named `resume` counts
/// as a file only when it carries a filename attribute; a bare text part
/// under that name is ignored, leaving the file slot empty.
pub async fn collect_form(mut multipart: Multipart) -> Result<AnalysisForm, MultipartError> {
    let mut form = AnalysisForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                if let Some(filename) = field.file_name().map(str::to_owned) {
                    let bytes = field.bytes().await?;
                    form.file = Some(UploadedFile { filename, bytes });
                }
            }
            Some(DESC_FIELD) => {
                form.desc = Some(field.text().await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Validates collected form state, in this exact order:
/// 1. the file part is present
/// 2. the selected filename is non-empty
/// 3. the filename carries the `.pdf` extension (case-insensitive)
/// 4. for the match workflow only, the description is present
///
/// Stops at the first failing check. No side effects.
pub fn validate(kind: TaskKind, form: &AnalysisForm) -> Result<ValidRequest<'_>, AppError> {
    let file = form
        .file
        .as_ref()
        .ok_or_else(|| AppError::Validation(ERR_NO_FILE.to_string()))?;

    if file.filename.is_empty() {
        return Err(AppError::Validation(ERR_NO_FILENAME.to_string()));
    }

    if !file.filename.to_lowercase().ends_with(PDF_EXTENSION) {
        return Err(AppError::Validation(ERR_NOT_PDF.to_string()));
    }

    if kind == TaskKind::Match && form.desc.is_none() {
        return Err(AppError::Validation(ERR_NO_DESC.to_string()));
    }

    Ok(ValidRequest {
        bytes: &file.bytes,
        desc: form.desc.as_deref(),
    })
}
