//! Axum route handlers for the three analysis endpoints.
//!
//! Each handler drains the multipart form, runs the pipeline for its task,
//! and presents the outcome. Pipeline failures land in the error slot of the
//! task's view; only a malformed multipart stream itself is answered through
//! `AppError`'s response conversion.

use axum::extract::{Multipart, State};
use axum::response::Response;

use crate::analysis::pipeline;
use crate::analysis::report::TaskKind;
use crate::analysis::upload::collect_form;
use crate::analysis::view::present;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/analyze
///
/// Scores the uploaded resume against generic quality criteria.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = collect_form(multipart).await?;
    let outcome = pipeline::run(TaskKind::Score, &form, state.llm.as_ref()).await;
    Ok(present(TaskKind::Score, outcome))
}

/// POST /api/v1/enhance
///
/// Rewrites the uploaded resume for applicant-tracking parsers.
pub async fn handle_enhance(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = collect_form(multipart).await?;
    let outcome = pipeline::run(TaskKind::Rewrite, &form, state.llm.as_ref()).await;
    Ok(present(TaskKind::Rewrite, outcome))
}

/// POST /api/v1/match
///
/// Compares the uploaded resume against a job description from the `desc`
/// form field.
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = collect_form(multipart).await?;
    let outcome = pipeline::run(TaskKind::Match, &form, state.llm.as_ref()).await;
    Ok(present(TaskKind::Match, outcome))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::llm_client::testing::FakeBackend;
    use crate::routes::build_router;
    use crate::state::AppState;

    const BOUNDARY: &str = "cvlens-test-boundary";

    fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn response_json(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn app_with(backend: FakeBackend) -> axum::Router {
        build_router(AppState {
            llm: Arc::new(backend),
        })
    }

    #[tokio::test]
    async fn test_analyze_without_file_reports_no_file_uploaded() {
        let app = app_with(FakeBackend::failing());
        let request = multipart_request("/api/v1/analyze", &[("desc", None, b"some text")]);
        let (status, json) = response_json(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["error"], "No file uploaded");
        assert!(json.get("score").is_none());
    }

    #[tokio::test]
    async fn test_analyze_rejects_wrong_extension() {
        let app = app_with(FakeBackend::failing());
        let request = multipart_request(
            "/api/v1/analyze",
            &[("resume", Some("resume.docx"), b"%PDF-1.4 actually a pdf")],
        );
        let (status, json) = response_json(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["error"], "Please upload a PDF file");
    }

    #[tokio::test]
    async fn test_analyze_corrupt_pdf_reports_processing_error() {
        let app = app_with(FakeBackend::json(json!({
            "score": "80 / 100",
            "strengths": "s",
            "weaknesses": "w",
            "suggestions": "g"
        })));
        let request = multipart_request(
            "/api/v1/analyze",
            &[("resume", Some("resume.pdf"), b"garbage bytes")],
        );
        let (status, json) = response_json(app, request).await;
        assert_eq!(status, StatusCode::OK);
        let error = json["error"].as_str().unwrap();
        assert!(error.starts_with("Error processing file:"), "got: {error}");
        assert!(json.get("score").is_none());
    }

    #[tokio::test]
    async fn test_match_without_description_reports_missing_description() {
        let app = app_with(FakeBackend::failing());
        let request = multipart_request(
            "/api/v1/match",
            &[("resume", Some("resume.pdf"), b"%PDF-1.4 fake")],
        );
        let (_, json) = response_json(app, request).await;
        assert_eq!(json["error"], "Please fill in the job description");
        assert!(json.get("match").is_none());
    }

    #[tokio::test]
    async fn test_enhance_without_file_reports_no_file_uploaded() {
        let app = app_with(FakeBackend::text("rewritten"));
        let request = multipart_request("/api/v1/enhance", &[]);
        let (_, json) = response_json(app, request).await;
        assert_eq!(json["error"], "No file uploaded");
        assert!(json.get("result").is_none());
    }

    #[tokio::test]
    async fn test_match_without_file_reports_no_file_uploaded() {
        let app = app_with(FakeBackend::failing());
        let request = multipart_request("/api/v1/match", &[("desc", None, b"some role")]);
        let (_, json) = response_json(app, request).await;
        assert_eq!(json["error"], "No file uploaded");
        assert!(json.get("match").is_none());
        assert!(json.get("score").is_none());
    }
}
