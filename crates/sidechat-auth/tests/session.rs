//! Session fetch tests against a mock service.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sidechat_auth::{access_token, fetch_access_token, TokenCache, ACCESS_TOKEN_KEY};
use sidechat_core::{Endpoints, Error};

#[tokio::test]
async fn test_fetch_caches_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "accessToken": "tok-1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let endpoints = Endpoints::for_base(&server.uri());
    let cache = TokenCache::default();

    let token = fetch_access_token(&client, &endpoints, &cache).await.unwrap();
    assert_eq!(token, "tok-1");
    assert_eq!(cache.get(ACCESS_TOKEN_KEY), Some("tok-1".into()));

    // Second lookup is served from the cache; mock expects a single hit.
    let token = access_token(&client, &endpoints, &cache).await.unwrap();
    assert_eq!(token, "tok-1");
}

#[tokio::test]
async fn test_forbidden_maps_to_blocked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let endpoints = Endpoints::for_base(&server.uri());
    let cache = TokenCache::default();

    let err = fetch_access_token(&client, &endpoints, &cache).await.unwrap_err();
    assert!(matches!(err, Error::BlockedByProtection));
    assert_eq!(cache.get(ACCESS_TOKEN_KEY), None);
}

#[tokio::test]
async fn test_non_json_body_is_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let endpoints = Endpoints::for_base(&server.uri());
    let cache = TokenCache::default();

    let err = fetch_access_token(&client, &endpoints, &cache).await.unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));
}

#[tokio::test]
async fn test_missing_token_field_is_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "user": {} })))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let endpoints = Endpoints::for_base(&server.uri());
    let cache = TokenCache::default();

    let err = fetch_access_token(&client, &endpoints, &cache).await.unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));
}
