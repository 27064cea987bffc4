#[cfg(test)]
mod tests {
    use crate::helpers::{authed_json, create_teacher, get_json_body, make_app, sample_result};
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use db::test_utils::setup_test_db;
    use serial_test::serial;
    use tower::ServiceExt;

    async fn seed(app: &Router, token: &str) {
        for (id, subject) in [("PHY-001", "Physics"), ("CHEM-001", "Chemistry"), ("PHY-002", "Physics")] {
            let body = sample_result(id, "Asha Verma", "42", subject, [8.0, 7.0]);
            let response = app
                .clone()
                .oneshot(authed_json("POST", "/api/reports", token, Some(body)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }
        let body = sample_result("PHY-003", "Ravi Kumar", "17", "Physics", [1.0, 1.0]);
        app.clone()
            .oneshot(authed_json("POST", "/api/reports", token, Some(body)))
            .await
            .unwrap();
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    /// Test Case: Lookup Without Token Returns Every Subject
    #[tokio::test]
    #[serial]
    async fn test_student_results_all_subjects() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app(db);
        seed(&app, &token).await;

        let response = app
            .oneshot(get("/api/students/results?student_name=%20Asha%20Verma%20&roll_no=42"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["subjects"], serde_json::json!(["Chemistry", "Physics"]));
        let results = json["data"]["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r["student_name"] == "Asha Verma"));
        assert!(results[0]["highlighted_text"].is_array());
    }

    /// Test Case: Subject Filter
    #[tokio::test]
    #[serial]
    async fn test_student_results_subject_filter() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app(db);
        seed(&app, &token).await;

        let response = app
            .clone()
            .oneshot(get("/api/students/results?student_name=Asha%20Verma&roll_no=42&subject=Physics"))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        let results = json["data"]["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r["subject"] == "Physics"));
        assert_eq!(json["data"]["subjects"].as_array().unwrap().len(), 2);

        let response = app
            .oneshot(get("/api/students/results?student_name=Asha%20Verma&roll_no=42&subject=All"))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["results"].as_array().unwrap().len(), 3);
    }

    /// Test Case: Missing Roll Number
    #[tokio::test]
    #[serial]
    async fn test_student_results_requires_both_fields() {
        let db = setup_test_db().await;
        let app = make_app(db);

        let response = app
            .oneshot(get("/api/students/results?student_name=Asha%20Verma&roll_no=%20"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Please enter both your full name and roll number.");
    }

    /// Test Case: Unknown Student
    #[tokio::test]
    #[serial]
    async fn test_student_results_not_found() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app(db);
        seed(&app, &token).await;

        // Roll number belongs to a different student.
        let response = app
            .oneshot(get("/api/students/results?student_name=Asha%20Verma&roll_no=17"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "No submissions found for the provided details.");
    }
}
