use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{ReportResponse, db_error, error_response, json_rejection};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::report::{Model as ReportModel, SaveOutcome};
use db::models::teacher::Model as TeacherModel;
use marker::types::EvaluationResult;

/// POST /reports
///
/// Saves a reviewed evaluation (the draft from `POST /evaluations`, possibly
/// edited). Totals and grade are recomputed from the items; any summary values in
/// the body are ignored. Saving under an existing `submission_id` owned by the
/// caller overwrites that report.
///
/// ### Responses
/// - `201 Created` (new report) or `200 OK` (overwritten)
/// - `400 Bad Request` (unreadable body or blank identity fields)
/// - `401 Unauthorized` (teacher account no longer exists)
/// - `409 Conflict` (id belongs to another teacher's report)
pub async fn save_report(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    payload: Result<Json<EvaluationResult>, JsonRejection>,
) -> Response {
    let mut result = match payload {
        Ok(Json(result)) => result,
        Err(e) => return json_rejection(e),
    };
    for value in [
        &mut result.submission_id,
        &mut result.student_name,
        &mut result.roll_no,
        &mut result.subject,
    ] {
        *value = value.trim().to_string();
        if value.is_empty() {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Submission ID, student name, roll number and subject are required",
            );
        }
    }

    let db = state.db();
    let owner = match TeacherModel::find_by_id(db, claims.sub).await {
        Ok(Some(owner)) => owner,
        Ok(None) => return error_response(StatusCode::UNAUTHORIZED, "Teacher account not found"),
        Err(e) => return db_error(e),
    };

    let (status, message, saved) = match ReportModel::upsert(db, &owner, result).await {
        Ok(SaveOutcome::Created(saved)) => (StatusCode::CREATED, "Report saved", saved),
        Ok(SaveOutcome::Overwritten(saved)) => (StatusCode::OK, "Report overwritten", saved),
        Ok(SaveOutcome::OwnedByOther) => {
            return error_response(
                StatusCode::CONFLICT,
                "This submission ID is already used by another teacher's report",
            );
        }
        Err(e) => return db_error(e),
    };

    match ReportResponse::from_model(&saved) {
        Ok(body) => (status, Json(ApiResponse::success(body, message))).into_response(),
        Err(e) => db_error(e),
    }
}
