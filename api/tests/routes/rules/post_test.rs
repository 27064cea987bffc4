#[cfg(test)]
mod tests {
    use crate::helpers::{StubGrader, authed_json, create_teacher, get_json_body, make_app, make_app_with};
    use axum::http::StatusCode;
    use db::test_utils::setup_test_db;
    use marker::rules::{FAILURE_REPLY, GREETING};
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    /// Test Case: Empty Transcript Returns the Greeting
    #[tokio::test]
    #[serial]
    async fn test_chat_greeting() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app_with(db, StubGrader::failing());

        let body = json!({"messages": []});
        let response = app
            .oneshot(authed_json("POST", "/api/rules/chat", &token, Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["reply"], GREETING);
        assert_eq!(json["data"]["rules"], "");
    }

    /// Test Case: Model Reply Becomes the Rules
    #[tokio::test]
    #[serial]
    async fn test_chat_reply_sets_rules() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app(db);

        let body = json!({
            "messages": [
                {"role": "model", "text": GREETING},
                {"role": "user", "text": "Question 1 is worth 10 marks"}
            ]
        });
        let response = app
            .oneshot(authed_json("POST", "/api/rules/chat", &token, Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["reply"], "1. Question 1 is worth 10 marks");
        assert_eq!(json["data"]["rules"], "1. Question 1 is worth 10 marks");
    }

    /// Test Case: Transcript Must End With the Teacher
    #[tokio::test]
    #[serial]
    async fn test_chat_rejects_trailing_model_message() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app(db);

        let body = json!({"messages": [{"role": "model", "text": GREETING}]});
        let response = app
            .oneshot(authed_json("POST", "/api/rules/chat", &token, Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Test Case: Model Failure
    #[tokio::test]
    #[serial]
    async fn test_chat_model_failure() {
        let db = setup_test_db().await;
        let (_, token) = create_teacher(&db, "mrao").await;
        let app = make_app_with(db, StubGrader::failing());

        let body = json!({"messages": [{"role": "user", "text": "q1 is 5 marks"}]});
        let response = app
            .oneshot(authed_json("POST", "/api/rules/chat", &token, Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], FAILURE_REPLY);
    }
}
