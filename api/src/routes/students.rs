//! `/students`: public result lookup for students.

use crate::response::ApiResponse;
use crate::routes::common::{EvaluationView, db_error, error_response};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use db::models::report::Model as ReportModel;
use marker::filters;
use marker::types::EvaluationResult;
use serde::{Deserialize, Serialize};

pub fn student_routes() -> Router<AppState> {
    Router::new().route("/results", get(student_results))
}

#[derive(Debug, Deserialize, Default)]
pub struct ResultsQuery {
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub roll_no: String,
    /// Subject filter; absent or `All` keeps every subject.
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StudentResults {
    /// Every subject the student has results in, sorted.
    pub subjects: Vec<String>,
    pub results: Vec<EvaluationView>,
}

/// GET /students/results?student_name=&roll_no=&subject=
///
/// ### Responses
/// - `200 OK` with `subjects` and the results for the selected subject
/// - `400 Bad Request` (name or roll number missing)
/// - `404 Not Found` (no results for that student)
pub async fn student_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Response {
    let name = query.student_name.trim();
    let roll_no = query.roll_no.trim();
    if name.is_empty() || roll_no.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Please enter both your full name and roll number.",
        );
    }

    let rows = match ReportModel::find_for_student(state.db(), name, roll_no).await {
        Ok(rows) => rows,
        Err(e) => return db_error(e),
    };
    if rows.is_empty() {
        return error_response(
            StatusCode::NOT_FOUND,
            "No submissions found for the provided details.",
        );
    }

    let results = match rows.iter().map(ReportModel::to_result).collect::<Result<Vec<EvaluationResult>, _>>() {
        Ok(results) => results,
        Err(e) => return db_error(e),
    };

    let subjects = filters::unique_subjects(&results);
    let selected: Vec<EvaluationView> = filters::by_subject(&results, query.subject.as_deref())
        .into_iter()
        .cloned()
        .map(EvaluationView::from)
        .collect();

    let message = format!("Found {} result(s)", selected.len());
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            StudentResults {
                subjects,
                results: selected,
            },
            message,
        )),
    )
        .into_response()
}
