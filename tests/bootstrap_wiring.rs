//! Test: full startup wiring exercised through the router
//!
//! Builds the wiring from deterministic profile sources, assembles the
//! router, and drives it with in-process requests to verify the dispatcher
//! mapping and the forced encoding filter.

use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use petclinic::server::{WebWiring, build_router};
use petclinic::{Bootstrapper, ProfileSources};
use tower::ServiceExt;

fn test_router() -> axum::Router {
    let sources = ProfileSources::new(Some("jdbc-test".to_string()), None);
    let wiring = Bootstrapper::new(sources).initialize();
    build_router(&wiring, WebWiring::default(), false)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read response body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

#[tokio::test]
async fn test_dispatcher_serves_root_path() {
    let router = test_router();

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .expect("Response should have a content type")
        .to_str()
        .unwrap()
        .to_string();
    assert!(
        content_type.contains("charset=UTF-8"),
        "Encoding filter should force the charset, got: {content_type}"
    );

    let body = body_text(response).await;
    assert!(body.contains("Welcome to the Pet Clinic"));
    assert!(body.contains("jdbc-test"), "Page should show the profile");
}

#[tokio::test]
async fn test_dispatcher_catches_every_path() {
    let router = test_router();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/owners/42/pets")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("Request should succeed");

    // Unmapped paths still flow through the dispatcher
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .expect("Response should have a content type")
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("charset=UTF-8"));

    let body = body_text(response).await;
    assert!(body.contains("/owners/42/pets"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = test_router();

    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_existing_charset_is_overridden() {
    let router = test_router();

    // A response charset would normally be negotiated from the request;
    // the filter forces UTF-8 regardless of what the client asked for
    let response = router
        .oneshot(
            Request::builder()
                .uri("/")
                .header(CONTENT_TYPE, "text/html; charset=iso-8859-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("Request should succeed");

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("charset=UTF-8"));
}
