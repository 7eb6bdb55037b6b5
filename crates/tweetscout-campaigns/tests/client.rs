//! Integration tests for `CampaignClient` using wiremock HTTP mocks.

use tweetscout_campaigns::CampaignClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> CampaignClient {
    CampaignClient::with_base_url(base_url, 10).expect("client construction should not fail")
}

#[tokio::test]
async fn active_campaigns_returns_parsed_campaigns() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "id": 1,
            "name": "Spring Sale",
            "status": "ACTIVE",
            "channel": "TWITTER",
            "hashtags": ["#sale", "#deal"],
            "keywords": ["bargain"],
            "config": { "minFollowers": 1000 }
        },
        {
            "id": 2,
            "name": "Winter Preview",
            "status": "ACTIVE",
            "hashtags": ["#winter"]
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .and(query_param("status", "ACTIVE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let campaigns = test_client(&server.uri())
        .active_campaigns()
        .await
        .expect("should parse campaigns");

    assert_eq!(campaigns.len(), 2);
    assert_eq!(campaigns[0].id, 1);
    assert_eq!(campaigns[0].hashtags, vec!["#sale", "#deal"]);
    assert_eq!(campaigns[0].effective_min_followers(150_000), 1000);
    assert_eq!(campaigns[1].name, "Winter Preview");
}

#[tokio::test]
async fn non_active_campaigns_are_filtered_out_locally() {
    let server = MockServer::start().await;

    // A backend that ignores ?status=ACTIVE and returns everything.
    let body = serde_json::json!([
        { "id": 1, "name": "Live", "status": "ACTIVE", "hashtags": ["#a"] },
        { "id": 2, "name": "Paused", "status": "PAUSED", "hashtags": ["#b"] },
        { "id": 3, "name": "Done", "status": "COMPLETED", "hashtags": ["#c"] },
        { "id": 4, "name": "Draft", "status": "DRAFT", "hashtags": ["#d"] }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let campaigns = test_client(&server.uri())
        .active_campaigns()
        .await
        .expect("should parse campaigns");

    assert_eq!(campaigns.len(), 1);
    assert_eq!(campaigns[0].id, 1);
}

#[tokio::test]
async fn server_error_surfaces_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).active_campaigns().await;
    assert!(result.is_err(), "expected an error for a 503 response");
}

#[tokio::test]
async fn malformed_body_surfaces_as_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).active_campaigns().await;
    assert!(
        matches!(
            result,
            Err(tweetscout_campaigns::CampaignClientError::Deserialize { .. })
        ),
        "expected Deserialize error, got: {result:?}"
    );
}

#[tokio::test]
async fn empty_list_yields_no_campaigns() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let campaigns = test_client(&server.uri())
        .active_campaigns()
        .await
        .expect("empty list should parse");
    assert!(campaigns.is_empty());
}
