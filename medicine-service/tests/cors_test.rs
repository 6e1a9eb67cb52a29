mod common;

use common::{TestApp, TEST_ORIGIN};
use reqwest::Method;

#[tokio::test]
async fn preflight_returns_204_with_cors_headers() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .request(Method::OPTIONS, app.url("/add-medicine"))
        .header("origin", TEST_ORIGIN)
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 204);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], TEST_ORIGIN);

    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    for method in ["GET", "POST", "PUT", "DELETE"] {
        assert!(methods.contains(method), "missing {} in {}", method, methods);
    }
    assert!(headers["access-control-allow-headers"]
        .to_str()
        .unwrap()
        .contains("content-type"));

    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn options_on_any_path_returns_empty_204() {
    let app = TestApp::spawn().await;

    for path in ["/medicines", "/not-a-route"] {
        let response = app
            .client
            .request(Method::OPTIONS, app.url(path))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status().as_u16(), 204, "path {}", path);
        assert!(response.text().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn allowed_origin_is_echoed_on_regular_requests() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/medicines"))
        .header("origin", TEST_ORIGIN)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], TEST_ORIGIN);
}

#[tokio::test]
async fn other_origins_are_never_echoed() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/medicines"))
        .header("origin", "http://evil.example")
        .send()
        .await
        .expect("Failed to execute request");

    // The policy names one fixed origin; the browser rejects the mismatch.
    let allowed = &response.headers()["access-control-allow-origin"];
    assert_eq!(allowed, TEST_ORIGIN);
    assert_ne!(allowed, "http://evil.example");
}
