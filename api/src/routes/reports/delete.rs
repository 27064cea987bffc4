use super::owned_report;
use crate::auth::claims::AuthUser;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::db_error;
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::report::Model as ReportModel;

/// DELETE /reports/{submission_id}
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found`
pub async fn delete_report(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(submission_id): Path<String>,
) -> Response {
    let db = state.db();
    if let Err(resp) = owned_report(db, &claims, &submission_id).await {
        return resp;
    }

    match ReportModel::delete_by_submission_id(db, &submission_id).await {
        Ok(_) => {
            tracing::info!(submission_id = %submission_id, teacher_id = claims.sub, "Deleted report");
            (
                StatusCode::OK,
                Json(ApiResponse::success(Empty, "Report deleted")),
            )
                .into_response()
        }
        Err(e) => db_error(e),
    }
}
