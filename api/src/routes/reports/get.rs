use super::owned_report;
use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{ReportResponse, db_error};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::report::Model as ReportModel;
use marker::filters;
use marker::stats::ScoreStats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// One row of the teacher's report list.
#[derive(Debug, Serialize)]
pub struct ReportListItem {
    pub submission_id: String,
    pub student_name: String,
    pub roll_no: String,
    pub subject: String,
    pub submission_date: String,
    pub total_marks_awarded: f64,
    pub total_max_marks: f64,
    pub final_grade: String,
    pub teacher_name: String,
    pub updated_at: String,
}

impl From<&ReportModel> for ReportListItem {
    fn from(m: &ReportModel) -> Self {
        Self {
            submission_id: m.submission_id.clone(),
            student_name: m.student_name.clone(),
            roll_no: m.roll_no.clone(),
            subject: m.subject.clone(),
            submission_date: m.submission_date.clone(),
            total_marks_awarded: m.total_marks_awarded,
            total_max_marks: m.total_max_marks,
            final_grade: m.final_grade.clone(),
            teacher_name: m.teacher_name.clone(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

/// GET /reports?search=
///
/// The caller's reports, most recently saved first. `search` is a
/// case-insensitive substring match on student name, roll number or submission id.
pub async fn list_reports(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Response {
    let reports = match ReportModel::list_for_teacher(state.db(), claims.sub).await {
        Ok(reports) => reports,
        Err(e) => return db_error(e),
    };

    let needle = query.search.unwrap_or_default();
    let items: Vec<ReportListItem> = filters::search(&reports, &needle)
        .into_iter()
        .map(ReportListItem::from)
        .collect();

    let message = format!("Found {} report(s)", items.len());
    (StatusCode::OK, Json(ApiResponse::success(items, message))).into_response()
}

/// GET /reports/stats
///
/// Count, average, highest and lowest total marks over the caller's reports.
pub async fn report_stats(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Response {
    let reports = match ReportModel::list_for_teacher(state.db(), claims.sub).await {
        Ok(reports) => reports,
        Err(e) => return db_error(e),
    };

    let scores: Vec<f64> = reports.iter().map(|r| r.total_marks_awarded).collect();
    let stats = ScoreStats::from_scores(&scores);
    (
        StatusCode::OK,
        Json(ApiResponse::success(stats, "Report statistics retrieved")),
    )
        .into_response()
}

/// GET /reports/{submission_id}
///
/// ### Responses
/// - `200 OK` with the full report
/// - `404 Not Found` (absent or owned by another teacher)
pub async fn get_report(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(submission_id): Path<String>,
) -> Response {
    let report = match owned_report(state.db(), &claims, &submission_id).await {
        Ok(report) => report,
        Err(resp) => return resp,
    };

    match ReportResponse::from_model(&report) {
        Ok(body) => (StatusCode::OK, Json(ApiResponse::success(body, "Report retrieved"))).into_response(),
        Err(e) => db_error(e),
    }
}
