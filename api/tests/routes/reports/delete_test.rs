#[cfg(test)]
mod tests {
    use crate::helpers::{authed_json, create_teacher, get_json_body, make_app, sample_result};
    use axum::http::StatusCode;
    use db::{models::report::Model as ReportModel, test_utils::setup_test_db};
    use serial_test::serial;
    use tower::ServiceExt;

    /// Test Case: Delete Own Report
    #[tokio::test]
    #[serial]
    async fn test_delete_report() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app(db.clone());

        let body = sample_result("PHY-001", "Asha Verma", "42", "Physics", [8.0, 7.0]);
        app.clone()
            .oneshot(authed_json("POST", "/api/reports", &token, Some(body)))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(authed_json("DELETE", "/api/reports/PHY-001", &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Report deleted");

        assert!(ReportModel::find_by_submission_id(&db, "PHY-001")
            .await
            .unwrap()
            .is_none());

        let response = app
            .oneshot(authed_json("DELETE", "/api/reports/PHY-001", &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// Test Case: Cannot Delete Another Teacher's Report
    #[tokio::test]
    #[serial]
    async fn test_delete_other_teachers_report() {
        let db = setup_test_db().await;
        let (_, owner) = create_teacher(&db, "mrao").await;
        let (_, other) = create_teacher(&db, "jdoe").await;
        let app = make_app(db.clone());

        let body = sample_result("PHY-001", "Asha Verma", "42", "Physics", [8.0, 7.0]);
        app.clone()
            .oneshot(authed_json("POST", "/api/reports", &owner, Some(body)))
            .await
            .unwrap();

        let response = app
            .oneshot(authed_json("DELETE", "/api/reports/PHY-001", &other, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(ReportModel::find_by_submission_id(&db, "PHY-001")
            .await
            .unwrap()
            .is_some());
    }
}
