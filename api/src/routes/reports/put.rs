use super::owned_report;
use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{ReportResponse, db_error, error_response, json_rejection, marker_error};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::report::{Model as ReportModel, SaveOutcome};
use db::models::teacher::Model as TeacherModel;
use marker::reconcile::{self, EvaluationEdit};

/// PUT /reports/{submission_id}
///
/// Applies per-question edits. Marks are clamped to `[0, max_marks]` and the
/// totals and grade re-derived before saving. A `marks_awarded` that is not a
/// number counts as 0.
///
/// ### Request Body
/// ```json
/// {
///   "items": [ { "index": 0, "marks_awarded": 8, "feedback": "Good" } ],
///   "overall_feedback": "Revised"
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated report
/// - `400 Bad Request` (unreadable body or question index out of range)
/// - `404 Not Found`
pub async fn edit_report(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(submission_id): Path<String>,
    payload: Result<Json<EvaluationEdit>, JsonRejection>,
) -> Response {
    let edit = match payload {
        Ok(Json(edit)) => edit,
        Err(e) => return json_rejection(e),
    };
    let db = state.db();
    let report = match owned_report(db, &claims, &submission_id).await {
        Ok(report) => report,
        Err(resp) => return resp,
    };

    let mut result = match report.to_result() {
        Ok(result) => result,
        Err(e) => return db_error(e),
    };
    if let Err(e) = reconcile::apply_edits(&mut result, &edit) {
        return marker_error(e);
    }

    let owner = match TeacherModel::find_by_id(db, report.teacher_id).await {
        Ok(Some(owner)) => owner,
        Ok(None) => return error_response(StatusCode::UNAUTHORIZED, "Teacher account not found"),
        Err(e) => return db_error(e),
    };

    let saved = match ReportModel::upsert(db, &owner, result).await {
        Ok(SaveOutcome::Created(saved) | SaveOutcome::Overwritten(saved)) => saved,
        Ok(SaveOutcome::OwnedByOther) => {
            return error_response(StatusCode::NOT_FOUND, "Report not found");
        }
        Err(e) => return db_error(e),
    };

    match ReportResponse::from_model(&saved) {
        Ok(body) => (StatusCode::OK, Json(ApiResponse::success(body, "Report updated"))).into_response(),
        Err(e) => db_error(e),
    }
}
