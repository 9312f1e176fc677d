//! Integration tests for the Spotify client against a mock provider

mod common;

use music_catalog_backend::spotify::{
    ClientCredentialsExchange, SpotifyClient, SpotifyError, TokenAcquisitionError, TokenExchange,
    TrackSearch,
};
use secrecy::ExposeSecret;
use std::time::Duration;
use wiremock::{
    matchers::{body_string_contains, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_exchange_posts_client_credentials_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=client-id"))
        .and(body_string_contains("client_secret=client-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "accessToken",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = common::spotify_config(&server.uri());
    let exchange = ClientCredentialsExchange::new(reqwest::Client::new(), &config);

    let response = exchange.exchange().await.unwrap();
    assert_eq!(response.access_token, "accessToken");
    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in, 3600);
}

#[tokio::test]
async fn test_exchange_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_client"))
        .mount(&server)
        .await;

    let config = common::spotify_config(&server.uri());
    let exchange = ClientCredentialsExchange::new(reqwest::Client::new(), &config);

    let err = exchange.exchange().await.unwrap_err();
    assert!(matches!(
        err,
        TokenAcquisitionError::Status { status: 400, ref body } if body == "invalid_client"
    ));
}

#[tokio::test]
async fn test_search_sends_query_and_authorization() {
    let server = MockServer::start().await;
    common::mount_token_endpoint(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "bohemian rhapsody"))
        .and(query_param("type", "track"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .and(header("Authorization", "Bearer accessToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::search_fixture(10, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let client = SpotifyClient::new(&common::spotify_config(&server.uri())).unwrap();

    let response = client.search("bohemian rhapsody", 10, 0).await.unwrap();
    assert_eq!(response.tracks.total, 905);
    assert_eq!(response.tracks.items[0].id, "3z8h0TU7ReDPLIbEnYhWZb");
}

#[tokio::test]
async fn test_token_is_reused_across_searches() {
    let server = MockServer::start().await;
    common::mount_token_endpoint(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::search_fixture(10, 0)))
        .expect(2)
        .mount(&server)
        .await;

    let client = SpotifyClient::new(&common::spotify_config(&server.uri())).unwrap();

    client.search("queen", 10, 0).await.unwrap();
    client.search("queen", 10, 0).await.unwrap();

    let cached = client.token_cache().cached().await.unwrap();
    assert_eq!(cached.access_token.expose_secret(), "accessToken");
}

#[tokio::test]
async fn test_search_error_status() {
    let server = MockServer::start().await;
    common::mount_token_endpoint(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal server ERROR"))
        .mount(&server)
        .await;

    let client = SpotifyClient::new(&common::spotify_config(&server.uri())).unwrap();

    let err = client.search("queen", 10, 0).await.unwrap_err();
    assert!(matches!(err, SpotifyError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_token_failure_skips_search() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::search_fixture(10, 0)))
        .expect(0)
        .mount(&server)
        .await;

    let client = SpotifyClient::new(&common::spotify_config(&server.uri())).unwrap();

    let err = client.search("queen", 10, 0).await.unwrap_err();
    assert!(matches!(
        err,
        SpotifyError::Token(TokenAcquisitionError::Status { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_slow_token_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "access_token": "accessToken",
                    "token_type": "Bearer",
                    "expires_in": 3600
                }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = common::spotify_config(&server.uri());
    config.request_timeout_secs = 1;
    let client = SpotifyClient::new(&config).unwrap();

    let err = client.search("queen", 10, 0).await.unwrap_err();
    assert!(matches!(
        err,
        SpotifyError::Token(TokenAcquisitionError::Timeout(_))
    ));
    assert!(client.token_cache().cached().await.is_none());
}
