//! `/auth` routes: teacher registration and login.

pub mod post;

use crate::state::AppState;
use axum::{Router, routing::post};
use post::{login, register};

/// - `POST /auth/register` → `register`
/// - `POST /auth/login` → `login`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
