mod helpers;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use helpers::{body_bytes, body_json, header_str, TestApp};

#[tokio::test]
async fn test_health_on_empty_store() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await;
    assert_eq!(data["status"], "ok");
    assert_eq!(data["videos"], 0);
    assert!(data["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_counts_videos() {
    let app = TestApp::new().await;
    app.write_video("a.webm", b"a");
    app.write_video("b.mp4", b"b");
    app.write_video("c.txt", b"c");

    let data = body_json(app.get("/health").await).await;
    assert_eq!(data["videos"], 2);
}

#[tokio::test]
async fn test_health_reports_store_failure_in_body() {
    let app = TestApp::new().await;
    std::fs::remove_dir_all(&app.videos_dir).unwrap();

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let data = body_json(response).await;
    assert_eq!(data["status"], "error");
    assert!(data["error"].as_str().unwrap().contains("videos directory"));
    assert!(data["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_route_returns_json_with_path() {
    let app = TestApp::new().await;

    let response = app.get("/no/such/thing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let data = body_json(response).await;
    assert_eq!(data["error"], "Route not found");
    assert_eq!(data["path"], "/no/such/thing");
}

#[tokio::test]
async fn test_wrong_method_on_known_path_returns_json_not_found() {
    let app = TestApp::new().await;

    for (method, uri) in [
        (Method::DELETE, "/videos-list"),
        (Method::GET, "/upload"),
        (Method::PUT, "/videos/video_1_aaaaaaaaa.webm"),
    ] {
        let request = Request::builder()
            .method(method.clone())
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.send(request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{} {}", method, uri);

        let data = body_json(response).await;
        assert_eq!(data["error"], "Route not found");
        assert_eq!(data["path"], uri);
    }
}

#[tokio::test]
async fn test_pages_are_served_from_public_dir() {
    let app = TestApp::new().await;
    app.write_page("index.html", "<h1>record</h1>");
    app.write_page("admin.html", "<h1>admin</h1>");

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(header_str(&response, header::CONTENT_TYPE).starts_with("text/html"));
    assert_eq!(&body_bytes(response).await[..], b"<h1>record</h1>");

    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&body_bytes(response).await[..], b"<h1>admin</h1>");
}

#[tokio::test]
async fn test_missing_page_is_html_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(header_str(&response, header::CONTENT_TYPE).starts_with("text/html"));

    let body = body_bytes(response).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&body).is_err());
}
