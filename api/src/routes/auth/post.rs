use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, error_response, format_validation_errors, json_rejection};
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::teacher::Model as TeacherModel;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be 3 to 32 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 100, message = "Display name is required"))]
    pub display_name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct TeacherResponse {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub token: String,
    pub expires_at: String,
}

fn token_response(teacher: TeacherModel) -> Result<TeacherResponse, Response> {
    let (token, expires_at) = generate_jwt(teacher.id, &teacher.display_name).map_err(|e| {
        tracing::error!(error = %e, "Token encoding failed");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Token encoding failed")
    })?;

    Ok(TeacherResponse {
        id: teacher.id,
        username: teacher.username,
        display_name: teacher.display_name,
        token,
        expires_at,
    })
}

/// POST /auth/register
///
/// ### Request Body
/// ```json
/// { "username": "mrao", "display_name": "Meera Rao", "password": "strongpassword" }
/// ```
///
/// ### Responses
/// - `201 Created` with the teacher and a JWT
/// - `400 Bad Request` (unreadable body or validation failure)
/// - `409 Conflict` (username taken)
/// - `500 Internal Server Error`
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(e) => return json_rejection(e),
    };
    if let Err(validation_errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&validation_errors));
    }
    if req.display_name.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Display name is required");
    }

    let db = state.db();
    match TeacherModel::find_by_username(db, &req.username).await {
        Ok(Some(_)) => {
            return error_response(
                StatusCode::CONFLICT,
                "A teacher with this username already exists",
            );
        }
        Ok(None) => {}
        Err(e) => return db_error(e),
    }

    let teacher = match TeacherModel::create(db, &req.username, &req.display_name, &req.password).await {
        Ok(teacher) => teacher,
        Err(e) => return db_error(e),
    };

    tracing::info!(teacher_id = teacher.id, username = %teacher.username, "Registered teacher");

    match token_response(teacher) {
        Ok(body) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(body, "Teacher registered successfully")),
        )
            .into_response(),
        Err(resp) => resp,
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/login
///
/// ### Responses
/// - `200 OK` with the teacher and a JWT
/// - `400 Bad Request` (unreadable body)
/// - `401 Unauthorized` (unknown username or wrong password)
/// - `500 Internal Server Error`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(e) => return json_rejection(e),
    };
    let teacher = match TeacherModel::verify_credentials(state.db(), &req.username, &req.password).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            tracing::warn!(username = %req.username, "Failed login attempt");
            return error_response(StatusCode::UNAUTHORIZED, "Invalid username or password");
        }
        Err(e) => return db_error(e),
    };

    match token_response(teacher) {
        Ok(body) => (StatusCode::OK, Json(ApiResponse::success(body, "Login successful"))).into_response(),
        Err(resp) => resp,
    }
}
