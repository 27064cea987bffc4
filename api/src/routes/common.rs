use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::report;
use marker::error::MarkerError;
use marker::plagiarism::{self, TextSegment};
use marker::types::EvaluationResult;
use sea_orm::DbErr;
use serde::Serialize;
use validator::ValidationErrors;

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<Empty>::error(message))).into_response()
}

pub fn db_error(e: DbErr) -> Response {
    tracing::error!(error = %e, "Database error");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", e))
}

/// Unreadable JSON bodies get the usual envelope instead of axum's plain-text reply.
pub fn json_rejection(e: JsonRejection) -> Response {
    tracing::debug!(error = %e, "Rejected request body");
    error_response(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e.body_text()))
}

/// Maps grading failures: rejected input is the caller's fault, everything else
/// is an upstream failure.
pub fn marker_error(e: MarkerError) -> Response {
    match e {
        MarkerError::InvalidDocument(msg) | MarkerError::InvalidEdit(msg) => {
            error_response(StatusCode::BAD_REQUEST, msg)
        }
        other => {
            tracing::error!(error = %other, "Grading service failure");
            error_response(
                StatusCode::BAD_GATEWAY,
                format!("Failed to evaluate the answer sheet: {}", other),
            )
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// A full evaluation with its answer text split for plagiarism highlighting.
#[derive(Debug, Serialize)]
pub struct EvaluationView {
    #[serde(flatten)]
    pub result: EvaluationResult,
    pub highlighted_text: Vec<TextSegment>,
}

impl From<EvaluationResult> for EvaluationView {
    fn from(result: EvaluationResult) -> Self {
        let highlighted_text =
            plagiarism::highlight(&result.extracted_text, &result.plagiarism_report.matches);
        Self {
            result,
            highlighted_text,
        }
    }
}

/// A stored report as returned to its teacher.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    #[serde(flatten)]
    pub evaluation: EvaluationView,
    pub teacher_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ReportResponse {
    pub fn from_model(model: &report::Model) -> Result<Self, DbErr> {
        Ok(Self {
            evaluation: model.to_result()?.into(),
            teacher_name: model.teacher_name.clone(),
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        })
    }
}
