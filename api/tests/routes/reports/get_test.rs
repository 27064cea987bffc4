#[cfg(test)]
mod tests {
    use crate::helpers::{authed_json, create_teacher, get_json_body, make_app, sample_result};
    use axum::{Router, http::StatusCode};
    use db::test_utils::setup_test_db;
    use serial_test::serial;
    use tower::ServiceExt;

    async fn save(app: &Router, token: &str, id: &str, name: &str, roll: &str, subject: &str, marks: [f64; 2]) {
        let body = sample_result(id, name, roll, subject, marks);
        let response = app
            .clone()
            .oneshot(authed_json("POST", "/api/reports", token, Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    /// Test Case: List Only the Caller's Reports
    #[tokio::test]
    #[serial]
    async fn test_list_reports_scoped_to_teacher() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let (_, other) = create_teacher(&db, "jdoe").await;
        let app = make_app(db);

        save(&app, &token, "PHY-001", "Asha Verma", "42", "Physics", [8.0, 7.0]).await;
        save(&app, &token, "CHEM-001", "Ravi Kumar", "17", "Chemistry", [5.0, 5.0]).await;
        save(&app, &other, "BIO-001", "Nina Shah", "3", "Biology", [9.0, 9.0]).await;

        let response = app
            .oneshot(authed_json("GET", "/api/reports", &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        let items = json["data"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i["submission_id"] != "BIO-001"));
    }

    /// Test Case: Search by Name, Roll Number and ID
    #[tokio::test]
    #[serial]
    async fn test_list_reports_search() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app(db);

        save(&app, &token, "PHY-001", "Asha Verma", "42", "Physics", [8.0, 7.0]).await;
        save(&app, &token, "CHEM-001", "Ravi Kumar", "17", "Chemistry", [5.0, 5.0]).await;

        for (query, expected) in [("asha", "PHY-001"), ("17", "CHEM-001"), ("chem-", "CHEM-001")] {
            let uri = format!("/api/reports?search={query}");
            let response = app
                .clone()
                .oneshot(authed_json("GET", &uri, &token, None))
                .await
                .unwrap();
            let json = get_json_body(response).await;
            let items = json["data"].as_array().unwrap();
            assert_eq!(items.len(), 1, "query {query}");
            assert_eq!(items[0]["submission_id"], expected);
        }
    }

    /// Test Case: Statistics Over Total Marks
    #[tokio::test]
    #[serial]
    async fn test_report_stats() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app(db);

        let response = app
            .clone()
            .oneshot(authed_json("GET", "/api/reports/stats", &token, None))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["total"], 0);
        assert_eq!(json["data"]["avg_score"], 0.0);

        save(&app, &token, "PHY-001", "Asha Verma", "42", "Physics", [8.0, 7.0]).await;
        save(&app, &token, "CHEM-001", "Ravi Kumar", "17", "Chemistry", [5.0, 0.0]).await;

        let response = app
            .oneshot(authed_json("GET", "/api/reports/stats", &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["total"], 2);
        assert_eq!(json["data"]["avg_score"], 10.0);
        assert_eq!(json["data"]["max_score"], 15.0);
        assert_eq!(json["data"]["min_score"], 5.0);
    }

    /// Test Case: Get Report and Hide Other Teachers' Reports
    #[tokio::test]
    #[serial]
    async fn test_get_report() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let (_, other) = create_teacher(&db, "jdoe").await;
        let app = make_app(db);

        save(&app, &token, "PHY-001", "Asha Verma", "42", "Physics", [8.0, 7.0]).await;

        let response = app
            .clone()
            .oneshot(authed_json("GET", "/api/reports/PHY-001", &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["student_name"], "Asha Verma");
        assert_eq!(json["data"]["summary"]["final_grade"], "B+");

        let response = app
            .clone()
            .oneshot(authed_json("GET", "/api/reports/PHY-001", &other, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(authed_json("GET", "/api/reports/NOPE", &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Report not found");
    }
}
