//! PDF text extraction.
//!
//! Pages are decoded in natural order and their text concatenated with no
//! page markers in the output. An empty result is NOT an error here: absence
//! of usable text is a request-level condition the pipeline reports
//! separately from a decode failure on corrupt bytes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Decode(#[from] pdf_extract::OutputError),
}

/// Decodes the byte stream as a PDF and returns the concatenated page text.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    Ok(pdf_extract::extract_text_from_mem(bytes)?)
}
