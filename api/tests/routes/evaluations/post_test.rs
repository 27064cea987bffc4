#[cfg(test)]
mod tests {
    use crate::helpers::{StubGrader, create_teacher, get_json_body, make_app, make_app_with};
    use api::routes::evaluations::MISSING_INPUT;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::{AUTHORIZATION, CONTENT_TYPE}},
    };
    use db::test_utils::setup_test_db;
    use serial_test::serial;
    use tower::ServiceExt;

    const BOUNDARY: &str = "----evalsheet-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a str, &'a [u8]),
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File(name, file_name, content_type, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload(token: &str, parts: &[Part]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/evaluations")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    const PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n%%EOF";

    fn full_form<'a>() -> Vec<Part<'a>> {
        vec![
            Part::Text("submission_id", "PHY-001"),
            Part::Text("student_name", "Asha Verma"),
            Part::Text("roll_no", "42"),
            Part::Text("subject", "Physics"),
            Part::Text("custom_rules", "1. Each question is worth 10 marks."),
            Part::File("question_paper", "questions.pdf", "application/pdf", PDF),
            Part::File("answer_sheet", "answers.pdf", "application/pdf", PDF),
        ]
    }

    /// Test Case: Successful Evaluation Draft
    #[tokio::test]
    #[serial]
    async fn test_evaluate_success_returns_clamped_draft() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app(db);

        let response = app.oneshot(upload(&token, &full_form())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        let data = &json["data"];
        assert_eq!(data["submission_id"], "PHY-001");
        assert_eq!(data["student_name"], "Asha Verma");
        assert_eq!(data["evaluation"].as_array().unwrap().len(), 2);
        // Q2 was over-awarded by the model and must be clamped.
        assert_eq!(data["evaluation"][1]["marks_awarded"], 10.0);
        assert_eq!(data["summary"]["total_marks_awarded"], 19.0);
        assert_eq!(data["summary"]["total_max_marks"], 20.0);
        assert_eq!(data["summary"]["final_grade"], "A+");
        assert_eq!(data["plagiarism_report"]["status"], "Clear");
        assert!(data["highlighted_text"].as_array().is_some());
    }

    /// Test Case: Plagiarism Above Threshold
    #[tokio::test]
    #[serial]
    async fn test_evaluate_flags_plagiarism() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let grader = StubGrader {
            plagiarism_percentage: 40.0,
            ..StubGrader::default()
        };
        let app = make_app_with(db, grader);

        let response = app.oneshot(upload(&token, &full_form())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["plagiarism_report"]["status"], "Plagiarism Detected");
        let segments = json["data"]["highlighted_text"].as_array().unwrap();
        assert!(segments.iter().any(|s| s["source"] == "Physics textbook"));
    }

    /// Test Case: Missing Answer Sheet
    #[tokio::test]
    #[serial]
    async fn test_evaluate_missing_file() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app(db);

        let mut parts = full_form();
        parts.pop();
        let response = app.oneshot(upload(&token, &parts)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], MISSING_INPUT);
    }

    /// Test Case: Blank Student Name
    #[tokio::test]
    #[serial]
    async fn test_evaluate_blank_field() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app(db);

        let mut parts = full_form();
        parts[1] = Part::Text("student_name", "   ");
        let response = app.oneshot(upload(&token, &parts)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], MISSING_INPUT);
    }

    /// Test Case: Non-PDF Upload
    #[tokio::test]
    #[serial]
    async fn test_evaluate_rejects_non_pdf() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app(db);

        let mut parts = full_form();
        parts[6] = Part::File("answer_sheet", "answers.txt", "text/plain", b"just text");
        let response = app.oneshot(upload(&token, &parts)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "answer_sheet must be a PDF file");
    }

    /// Test Case: Model Failure
    #[tokio::test]
    #[serial]
    async fn test_evaluate_model_failure_is_bad_gateway() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app_with(db, StubGrader::failing());

        let response = app.oneshot(upload(&token, &full_form())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
    }
}
