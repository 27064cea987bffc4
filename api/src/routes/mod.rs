//! HTTP route entry point for `/api/...`.
//!
//! - `/health` → liveness (public)
//! - `/auth` → teacher registration and login (public)
//! - `/evaluations` → grade an uploaded sheet (teacher)
//! - `/reports` → saved reports, search, stats and edits (teacher)
//! - `/students` → result lookup by name and roll number (public)
//! - `/rules` → marking-scheme chat (teacher)

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;
use axum::{Router, middleware::from_fn};

pub mod auth;
pub mod common;
pub mod evaluations;
pub mod health;
pub mod reports;
pub mod rules;
pub mod students;

use auth::auth_routes;
use evaluations::evaluation_routes;
use health::health_routes;
use reports::report_routes;
use rules::rules_routes;
use students::student_routes;

/// Builds the router for every `/api` endpoint, with state applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/evaluations",
            evaluation_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/reports",
            report_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest("/students", student_routes())
        .nest(
            "/rules",
            rules_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
