use marker::traits::grader::Grader;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    grader: Arc<dyn Grader>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, grader: Arc<dyn Grader>) -> Self {
        Self { db, grader }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn grader(&self) -> &dyn Grader {
        self.grader.as_ref()
    }
}
