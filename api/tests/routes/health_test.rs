#[cfg(test)]
mod tests {
    use crate::helpers::{get_json_body, make_app};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::test_utils::setup_test_db;
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn test_health_check() {
        let db = setup_test_db().await;
        let app = make_app(db);

        let req = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
    }
}
