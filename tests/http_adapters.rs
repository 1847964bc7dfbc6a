use serde_json::json;
use urban_mood::{
    emotions::{
        oracle::{parse_extraction, EmotionOracle, OpenAiOracle},
        record::Emotion,
        reddit::{PostSource, RedditClient},
    },
    error::ApiError,
    places::client::{GoogleMapsClient, PlacesApi},
};
use wiremock::{
    matchers::{body_partial_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-3.5-turbo",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

async fn oracle_replying(template: ResponseTemplate) -> (MockServer, OpenAiOracle) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(template)
        .mount(&server)
        .await;
    let oracle = OpenAiOracle::with_base_url("test-key", "gpt-3.5-turbo", &server.uri()).unwrap();
    (server, oracle)
}

#[tokio::test]
async fn oracle_sends_fixed_temperature_and_parses_schema() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": "gpt-3.5-turbo", "temperature": 0.3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"location": "Washington Square", "emotion": "peace", "intensity": 0.7, "reasoning": "calm"}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;
    let oracle = OpenAiOracle::with_base_url("test-key", "gpt-3.5-turbo", &server.uri()).unwrap();

    let extraction = oracle.extract("Reading under the arch").await.expect("extraction");
    assert_eq!(extraction.location.as_deref(), Some("Washington Square"));
    assert_eq!(extraction.emotion, Emotion::Peace);
    assert!((extraction.intensity - 0.7).abs() < 1e-9);
    assert_eq!(extraction.reasoning, "calm");
}

#[tokio::test]
async fn oracle_accepts_null_location() {
    let (_server, oracle) = oracle_replying(ResponseTemplate::new(200).set_body_json(completion(
        r#"{"location": null, "emotion": "neutral", "intensity": 0.1, "reasoning": "no place"}"#,
    )))
    .await;
    let extraction = oracle.extract("just thinking").await.expect("extraction");
    assert_eq!(extraction.location, None);
}

#[tokio::test]
async fn oracle_failures_yield_nothing() {
    let (_server, oracle) = oracle_replying(ResponseTemplate::new(500)).await;
    assert!(oracle.extract("anything").await.is_none());

    let (_server, oracle) =
        oracle_replying(ResponseTemplate::new(200).set_body_json(completion("Sorry, I can't help."))).await;
    assert!(oracle.extract("anything").await.is_none());

    let (_server, oracle) =
        oracle_replying(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] }))).await;
    assert!(oracle.extract("anything").await.is_none());
}

#[test]
fn extraction_schema_is_strict() {
    assert!(parse_extraction(r#"{"location": "SoHo", "emotion": "rage", "intensity": 0.5}"#).is_err());
    assert!(parse_extraction(r#"{"location": "SoHo", "emotion": "joy", "intensity": 1.5}"#).is_err());
    assert!(parse_extraction(r#"{"location": "SoHo", "emotion": "joy"}"#).is_err());

    let parsed = parse_extraction(r#" {"location": "SoHo", "emotion": "joy", "intensity": 1} "#)
        .expect("reasoning may be omitted");
    assert_eq!(parsed.reasoning, "");
    assert_eq!(parsed.emotion, Emotion::Joy);
}

#[tokio::test]
async fn places_client_queries_every_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .and(query_param("location", "40.75,-73.99"))
        .and(query_param("radius", "200"))
        .and(query_param("type", "cafe"))
        .and(query_param("key", "maps-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [
                { "place_id": "abc", "name": "Corner Cafe" },
                { "place_id": "def" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .and(query_param("place_id", "abc"))
        .and(query_param("fields", "reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": { "reviews": [ { "text": "Cozy corner" }, { "text": "Too packed" } ] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .and(query_param("place_id", "def"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {}
        })))
        .mount(&server)
        .await;

    let client = GoogleMapsClient::with_base_url("maps-key", &server.uri()).unwrap();
    let places = client
        .nearby(40.75, -73.99, 200, &["library", "cafe", "community_center", "park"])
        .await
        .unwrap();
    assert_eq!(places.len(), 2);
    assert_eq!(places[0].place_id, "abc");
    assert_eq!(places[1].place_id, "def");

    assert_eq!(
        client.reviews("abc").await.unwrap(),
        vec!["Cozy corner".to_string(), "Too packed".to_string()]
    );
    assert!(client.reviews("def").await.unwrap().is_empty());
}

#[tokio::test]
async fn places_client_surfaces_rejections() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = GoogleMapsClient::with_base_url("bad-key", &server.uri()).unwrap();
    match client.nearby(40.0, -73.0, 200, &["park"]).await {
        Err(ApiError::Rejected { status, message, .. }) => {
            assert_eq!(status, "REQUEST_DENIED");
            assert!(message.contains("invalid"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(matches!(
        client.reviews("abc").await,
        Err(ApiError::Status { .. })
    ));
}

#[tokio::test]
async fn places_client_treats_zero_results_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&server)
        .await;

    let client = GoogleMapsClient::with_base_url("maps-key", &server.uri()).unwrap();
    assert!(client.nearby(40.0, -73.0, 200, &["park"]).await.unwrap().is_empty());
}

#[tokio::test]
async fn reddit_client_authenticates_once_and_lists_posts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "token_type": "bearer",
            "expires_in": 86400
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/r/nyc/new"))
        .and(query_param("limit", "50"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "Listing",
            "data": {
                "children": [
                    { "kind": "t3", "data": {
                        "id": "1abc",
                        "title": "Morning in Bryant Park",
                        "selftext": "Coffee and chess",
                        "created_utc": 1714737600.0,
                        "permalink": "/r/nyc/comments/1abc/morning/"
                    } },
                    { "kind": "t3", "data": {
                        "id": "2def",
                        "title": "Link post",
                        "created_utc": 1714651200.0,
                        "permalink": "/r/nyc/comments/2def/link/"
                    } }
                ]
            }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client =
        RedditClient::with_base_urls("id", "secret", "test-agent/1.0", &server.uri(), &server.uri())
            .unwrap();
    let posts = client.recent_posts("nyc", 50).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, "1abc");
    assert_eq!(posts[0].channel, "nyc");
    assert_eq!(posts[0].created.to_rfc3339(), "2024-05-03T12:00:00+00:00");
    assert_eq!(posts[0].text(), "Morning in Bryant Park. Coffee and chess");
    assert_eq!(posts[0].url(), "https://reddit.com/r/nyc/comments/1abc/morning/");
    assert_eq!(posts[1].body, "");

    // Second listing reuses the cached token.
    client.recent_posts("nyc", 50).await.unwrap();
}

#[tokio::test]
async fn reddit_client_reports_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client =
        RedditClient::with_base_urls("id", "wrong", "test-agent/1.0", &server.uri(), &server.uri())
            .unwrap();
    assert!(matches!(
        client.recent_posts("nyc", 10).await,
        Err(ApiError::Status { .. })
    ));
}
