//! `/evaluations`: grade an uploaded answer sheet without saving it.

use crate::response::ApiResponse;
use crate::routes::common::{EvaluationView, error_response, marker_error};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use marker::EvaluationJob;
use marker::types::Document;
use util::config;

pub const MISSING_INPUT: &str = "Please fill out all fields and upload both PDF files.";

pub fn evaluation_routes() -> Router<AppState> {
    // Two PDFs plus the text fields.
    let body_limit = config::max_upload_bytes() * 2 + 64 * 1024;
    Router::new()
        .route("/", post(evaluate))
        .layer(DefaultBodyLimit::max(body_limit))
}

#[derive(Default)]
struct EvaluationForm {
    submission_id: String,
    student_name: String,
    roll_no: String,
    subject: String,
    custom_rules: String,
    question_paper: Option<Document>,
    answer_sheet: Option<Document>,
}

impl EvaluationForm {
    fn into_job(self) -> Option<EvaluationJob> {
        let required = [&self.submission_id, &self.student_name, &self.roll_no, &self.subject];
        if required.iter().any(|v| v.trim().is_empty()) {
            return None;
        }
        Some(EvaluationJob {
            submission_id: self.submission_id.trim().to_string(),
            student_name: self.student_name.trim().to_string(),
            roll_no: self.roll_no.trim().to_string(),
            subject: self.subject.trim().to_string(),
            question_paper: self.question_paper?,
            answer_sheet: self.answer_sheet?,
            custom_rules: self.custom_rules,
        })
    }
}

/// Validates an uploaded file: non-empty, within the size limit, PDF content type
/// and `%PDF` signature.
fn pdf_document(
    field_name: &str,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
) -> Result<Option<Document>, Response> {
    if bytes.is_empty() {
        return Ok(None);
    }
    if bytes.len() > config::max_upload_bytes() {
        return Err(error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("{field_name} exceeds the {} MB upload limit", config::max_upload_bytes() / (1024 * 1024)),
        ));
    }

    let document = Document::pdf(file_name.unwrap_or_else(|| format!("{field_name}.pdf")), bytes);
    if content_type.as_deref() != Some("application/pdf") || !document.looks_like_pdf() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("{field_name} must be a PDF file"),
        ));
    }
    Ok(Some(document))
}

/// POST /evaluations
///
/// Extracts text from both PDFs, checks the answer text for similarity to
/// published sources, and grades it question by question. The returned draft is
/// not stored; send it (optionally edited) to `POST /reports` to save it.
///
/// ### Request Body (Multipart Form Data)
/// - `submission_id`, `student_name`, `roll_no`, `subject` (required text)
/// - `custom_rules` (optional text)
/// - `question_paper`, `answer_sheet` (required PDF files)
///
/// ### Responses
/// - `200 OK` with the draft evaluation
/// - `400 Bad Request` (missing field, missing or non-PDF file)
/// - `413 Payload Too Large`
/// - `502 Bad Gateway` (grading service failure)
pub async fn evaluate(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut form = EvaluationForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed multipart body");
                return error_response(e.status(), format!("Invalid form data: {}", e.body_text()));
            }
        };

        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "question_paper" | "answer_sheet" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes.to_vec(),
                    Err(e) => return error_response(e.status(), format!("Invalid form data: {}", e.body_text())),
                };
                let document = match pdf_document(&name, file_name, content_type, bytes) {
                    Ok(document) => document,
                    Err(resp) => return resp,
                };
                if name == "question_paper" {
                    form.question_paper = document;
                } else {
                    form.answer_sheet = document;
                }
            }
            "submission_id" | "student_name" | "roll_no" | "subject" | "custom_rules" => {
                let value = match field.text().await {
                    Ok(value) => value,
                    Err(e) => return error_response(e.status(), format!("Invalid form data: {}", e.body_text())),
                };
                match name.as_str() {
                    "submission_id" => form.submission_id = value,
                    "student_name" => form.student_name = value,
                    "roll_no" => form.roll_no = value,
                    "subject" => form.subject = value,
                    _ => form.custom_rules = value,
                }
            }
            _ => continue,
        }
    }

    let Some(job) = form.into_job() else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_INPUT);
    };

    let submission_id = job.submission_id.clone();
    tracing::info!(submission_id = %submission_id, "Starting evaluation");

    match job.run(state.grader()).await {
        Ok(result) => {
            tracing::info!(
                submission_id = %submission_id,
                grade = %result.summary.final_grade,
                "Evaluation complete"
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    EvaluationView::from(result),
                    "Evaluation complete. Review the result and save it to keep it.",
                )),
            )
                .into_response()
        }
        Err(e) => marker_error(e),
    }
}
