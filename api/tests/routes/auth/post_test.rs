#[cfg(test)]
mod tests {
    use crate::helpers::{get_json_body, make_app};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use db::{models::teacher::Model as TeacherModel, test_utils::setup_test_db};
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    fn post_json(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap()
    }

    /// Test Case: Successful Teacher Registration
    #[tokio::test]
    #[serial]
    async fn test_register_success() {
        let db = setup_test_db().await;
        let app = make_app(db.clone());

        let payload = json!({"username": "mrao", "display_name": "Meera Rao", "password": "securepassword123"});
        let response = app.oneshot(post_json("/api/auth/register", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Teacher registered successfully");
        assert_eq!(json["data"]["username"], "mrao");
        assert_eq!(json["data"]["display_name"], "Meera Rao");
        assert!(json["data"]["token"].as_str().is_some());
        assert!(json["data"]["expires_at"].as_str().is_some());
        assert!(json["data"].get("password_hash").is_none());
    }

    /// Test Case: Registration with Short Password
    #[tokio::test]
    #[serial]
    async fn test_register_short_password() {
        let db = setup_test_db().await;
        let app = make_app(db);

        let payload = json!({"username": "mrao", "display_name": "Meera Rao", "password": "short"});
        let response = app.oneshot(post_json("/api/auth/register", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("Password must be at least 8 characters"));
    }

    /// Test Case: Registration with Duplicate Username
    #[tokio::test]
    #[serial]
    async fn test_register_duplicate_username() {
        let db = setup_test_db().await;
        TeacherModel::create(&db, "mrao", "Meera Rao", "password123")
            .await
            .unwrap();
        let app = make_app(db);

        let payload = json!({"username": "mrao", "display_name": "Other", "password": "password456"});
        let response = app.oneshot(post_json("/api/auth/register", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "A teacher with this username already exists");
    }

    /// Test Case: Login Without JSON Content Type
    #[tokio::test]
    #[serial]
    async fn test_login_without_json_content_type() {
        let db = setup_test_db().await;
        let app = make_app(db);

        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .body(Body::from(r#"{"username":"mrao","password":"x"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().starts_with("Invalid request body"));
    }

    /// Test Case: Successful Login
    #[tokio::test]
    #[serial]
    async fn test_login_success() {
        let db = setup_test_db().await;
        let teacher = TeacherModel::create(&db, "mrao", "Meera Rao", "password123")
            .await
            .unwrap();
        let app = make_app(db);

        let payload = json!({"username": "mrao", "password": "password123"});
        let response = app.oneshot(post_json("/api/auth/login", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Login successful");
        assert_eq!(json["data"]["id"], teacher.id);
    }

    /// Test Case: Login with Wrong Password
    #[tokio::test]
    #[serial]
    async fn test_login_wrong_password() {
        let db = setup_test_db().await;
        TeacherModel::create(&db, "mrao", "Meera Rao", "password123")
            .await
            .unwrap();
        let app = make_app(db);

        let payload = json!({"username": "mrao", "password": "wrongpassword"});
        let response = app.oneshot(post_json("/api/auth/login", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid username or password");
    }

    /// Test Case: Protected Route Without Token
    #[tokio::test]
    #[serial]
    async fn test_protected_route_requires_token() {
        let db = setup_test_db().await;
        let app = make_app(db);

        let req = Request::builder()
            .method("GET")
            .uri("/api/reports")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    /// Test Case: Protected Route With Forged Token
    #[tokio::test]
    #[serial]
    async fn test_protected_route_rejects_forged_token() {
        let db = setup_test_db().await;
        let app = make_app(db);

        let req = Request::builder()
            .method("GET")
            .uri("/api/reports")
            .header("Authorization", "Bearer not.a.jwt")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
