//! `/reports` routes: a teacher's saved evaluations.
//!
//! - `GET /reports?search=` → `list_reports`
//! - `POST /reports` → `save_report`
//! - `GET /reports/stats` → `report_stats`
//! - `GET /reports/{submission_id}` → `get_report`
//! - `PUT /reports/{submission_id}` → `edit_report`
//! - `DELETE /reports/{submission_id}` → `delete_report`

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use crate::auth::claims::Claims;
use crate::routes::common::{db_error, error_response};
use crate::state::AppState;
use axum::{
    Router,
    http::StatusCode,
    response::Response,
    routing::get,
};
use db::models::report::Model as ReportModel;
use sea_orm::DatabaseConnection;

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_reports).post(post::save_report))
        .route("/stats", get(get::report_stats))
        .route(
            "/{submission_id}",
            get(get::get_report)
                .put(put::edit_report)
                .delete(delete::delete_report),
        )
}

/// Loads a report owned by the caller. Reports owned by someone else are
/// reported as missing.
pub(crate) async fn owned_report(
    db: &DatabaseConnection,
    claims: &Claims,
    submission_id: &str,
) -> Result<ReportModel, Response> {
    match ReportModel::find_by_submission_id(db, submission_id).await {
        Ok(Some(report)) if report.teacher_id == claims.sub => Ok(report),
        Ok(_) => Err(error_response(StatusCode::NOT_FOUND, "Report not found")),
        Err(e) => Err(db_error(e)),
    }
}
