//! Integration tests for `DataForSeoClient` using wiremock HTTP mocks.

use devseo_core::{CompetitionLevel, SearchIntent};
use devseo_dataforseo::{
    DataForSeoClient, DataForSeoError, KeywordIdeasQuery, KeywordSuggestionsQuery,
    RelatedKeywordsQuery,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> DataForSeoClient {
    DataForSeoClient::with_base_url("dGVzdDp0ZXN0", 30, "devseo-test", base_url)
        .expect("client construction should not fail")
}

fn envelope(result: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "version": "0.1.20250101",
        "status_code": 20000,
        "status_message": "Ok.",
        "tasks_count": 1,
        "tasks_error": 0,
        "tasks": [{
            "id": "01011234-0000-0000-0000-000000000000",
            "status_code": 20000,
            "status_message": "Ok.",
            "cost": 0.0103,
            "result_count": 1,
            "result": result
        }]
    })
}

fn related_query() -> RelatedKeywordsQuery {
    RelatedKeywordsQuery {
        keyword: "seo tools".to_string(),
        location_name: "United States".to_string(),
        language_name: "English".to_string(),
        depth: 3,
        limit: 20,
    }
}

#[tokio::test]
async fn fetch_locations_returns_catalog() {
    let server = MockServer::start().await;

    let body = envelope(serde_json::json!([
        {
            "location_code": 2840,
            "location_name": "United States",
            "location_code_parent": null,
            "country_iso_code": "US",
            "location_type": "Country",
            "available_languages": [
                { "available_sources": ["google"], "language_name": "English", "language_code": "en", "keywords": 1, "serps": 1 },
                { "available_sources": ["google"], "language_name": "Spanish", "language_code": "es", "keywords": 1, "serps": 1 }
            ]
        },
        {
            "location_code": 2276,
            "location_name": "Germany",
            "location_code_parent": null,
            "country_iso_code": "DE",
            "location_type": "Country",
            "available_languages": [
                { "available_sources": ["google"], "language_name": "German", "language_code": "de", "keywords": 1, "serps": 1 }
            ]
        }
    ]));

    Mock::given(method("GET"))
        .and(path("/v3/dataforseo_labs/locations_and_languages"))
        .and(header("authorization", "Basic dGVzdDp0ZXN0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let catalog = client.fetch_locations().await.expect("should parse catalog");

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].location_name, "United States");
    assert_eq!(catalog[0].country_code, "US");
    assert_eq!(catalog[0].available_languages.len(), 2);
    assert_eq!(catalog[1].available_languages[0].language_name, "German");
}

#[tokio::test]
async fn related_keywords_posts_single_task_body() {
    let server = MockServer::start().await;

    let expected_body = serde_json::json!([{
        "keyword": "seo tools",
        "location_name": "United States",
        "language_name": "English",
        "depth": 3,
        "limit": 20
    }]);

    let body = envelope(serde_json::json!([{
        "se_type": "google",
        "seed_keyword": "seo tools",
        "seed_keyword_data": null,
        "location_code": 2840,
        "language_code": "en",
        "total_count": 1523,
        "items_count": 1,
        "items": [{
            "se_type": "google",
            "keyword_data": {
                "se_type": "google",
                "keyword": "free seo tools",
                "location_code": 2840,
                "language_code": "en",
                "keyword_info": {
                    "se_type": "google",
                    "last_updated_time": "2025-01-01 00:00:00 +00:00",
                    "competition": 0.31,
                    "competition_level": "LOW",
                    "cpc": 4.12,
                    "search_volume": 9900,
                    "categories": [10004],
                    "monthly_searches": [
                        { "year": 2024, "month": 12, "search_volume": 8100 },
                        { "year": 2024, "month": 11, "search_volume": 9900 }
                    ]
                },
                "keyword_properties": {
                    "se_type": "google",
                    "core_keyword": null,
                    "synonym_clustering_algorithm": "text_processing",
                    "keyword_difficulty": 72,
                    "detected_language": "en",
                    "is_another_language": false
                },
                "serp_info": {
                    "se_type": "google",
                    "check_url": "https://www.google.com/search?q=free+seo+tools",
                    "serp_item_types": ["organic"],
                    "se_results_count": 1240000000,
                    "last_updated_time": "2025-01-01 00:00:00 +00:00",
                    "previous_updated_time": "2024-12-01 00:00:00 +00:00"
                },
                "search_intent_info": {
                    "se_type": "google",
                    "main_intent": "commercial",
                    "foreign_intent": null,
                    "last_updated_time": "2025-01-01 00:00:00 +00:00"
                }
            },
            "depth": 1,
            "related_keywords": ["seo tools free", "best free seo tools"]
        }]
    }]));

    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/related_keywords/live"))
        .and(header("authorization", "Basic dGVzdDp0ZXN0"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .related_keywords(&related_query())
        .await
        .expect("should parse related keywords");

    assert_eq!(page.total_count, 1523);
    assert_eq!(page.records.len(), 1);
    let record = &page.records[0];
    assert_eq!(record.keyword, "free seo tools");
    assert_eq!(record.search_volume, Some(9900));
    assert_eq!(record.difficulty, Some(72));
    assert_eq!(record.competition_level, Some(CompetitionLevel::Low));
    assert_eq!(record.search_intent, Some(SearchIntent::Commercial));
    assert_eq!(record.serp_results_count, Some(1_240_000_000));
    assert_eq!(record.depth, Some(1));
    assert_eq!(record.monthly_series.len(), 2);
}

#[tokio::test]
async fn keyword_suggestions_sends_toggles() {
    let server = MockServer::start().await;

    let expected_body = serde_json::json!([{
        "keyword": "rust",
        "location_name": "Germany",
        "language_name": "German",
        "include_serp_info": false,
        "include_seed_keyword": true,
        "limit": 50
    }]);

    let body = envelope(serde_json::json!([{
        "se_type": "google",
        "seed_keyword": "rust",
        "total_count": 2,
        "items_count": 2,
        "items": [
            {
                "se_type": "google",
                "keyword": "rust lang",
                "keyword_info": { "search_volume": 2400, "cpc": null, "competition_level": null },
                "avg_backlinks_info": { "backlinks": 310.6, "referring_domains": 42.2 }
            },
            { "se_type": "google", "keyword": "rust game" }
        ]
    }]));

    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/keyword_suggestions/live"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .keyword_suggestions(&KeywordSuggestionsQuery {
            keyword: "rust".to_string(),
            location_name: "Germany".to_string(),
            language_name: "German".to_string(),
            include_serp_info: false,
            include_seed_keyword: true,
            limit: 50,
        })
        .await
        .expect("should parse suggestions");

    assert_eq!(page.records.len(), 2);
    let first = &page.records[0];
    assert_eq!(first.cost_per_click, None);
    let backlinks = first.backlinks.expect("backlinks present");
    assert_eq!(backlinks.backlinks, 311);
    assert_eq!(backlinks.referring_domains, 42);
    assert_eq!(page.records[1].search_volume, None);
}

#[tokio::test]
async fn keyword_ideas_sends_keyword_list() {
    let server = MockServer::start().await;

    let expected_body = serde_json::json!([{
        "keywords": ["coffee", "espresso"],
        "location_name": "United States",
        "language_name": "English",
        "include_serp_info": true,
        "limit": 20
    }]);

    let body = envelope(serde_json::json!([{
        "se_type": "google",
        "seed_keywords": ["coffee", "espresso"],
        "total_count": null,
        "items": [{ "se_type": "google", "keyword": "coffee beans" }]
    }]));

    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/keyword_ideas/live"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .keyword_ideas(&KeywordIdeasQuery {
            keywords: vec!["coffee".to_string(), "espresso".to_string()],
            location_name: "United States".to_string(),
            language_name: "English".to_string(),
            include_serp_info: true,
            limit: 20,
        })
        .await
        .expect("should parse ideas");

    assert_eq!(page.records.len(), 1);
    assert_eq!(page.total_count, 1, "missing total falls back to item count");
}

#[tokio::test]
async fn null_items_yield_empty_page() {
    let server = MockServer::start().await;

    let body = envelope(serde_json::json!([{
        "se_type": "google",
        "seed_keyword": "zzzzqx",
        "total_count": 0,
        "items_count": 0,
        "items": null
    }]));

    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/related_keywords/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .related_keywords(&related_query())
        .await
        .expect("empty items are a valid result");
    assert!(page.records.is_empty());
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn api_status_error_is_surfaced() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status_code": 40000,
        "status_message": "You can set only one task at a time.",
        "tasks": null
    });

    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/related_keywords/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .related_keywords(&related_query())
        .await
        .expect_err("status 40000 should fail");

    assert!(matches!(err, DataForSeoError::Api { code: 40000, .. }));
    assert!(err
        .to_string()
        .contains("You can set only one task at a time."));
}

#[tokio::test]
async fn task_level_error_is_surfaced() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status_code": 20000,
        "status_message": "Ok.",
        "tasks": [{
            "id": "x",
            "status_code": 40501,
            "status_message": "Invalid Field: 'location_name'.",
            "result": null
        }]
    });

    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/keyword_suggestions/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .keyword_suggestions(&KeywordSuggestionsQuery {
            keyword: "rust".to_string(),
            location_name: "Atlantis".to_string(),
            language_name: "English".to_string(),
            include_serp_info: true,
            include_seed_keyword: true,
            limit: 20,
        })
        .await
        .expect_err("task error should fail");
    assert!(matches!(err, DataForSeoError::Api { code: 40501, .. }));
}

#[tokio::test]
async fn empty_tasks_is_empty_result() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status_code": 20000,
        "status_message": "Ok.",
        "tasks": []
    });

    Mock::given(method("GET"))
        .and(path("/v3/dataforseo_labs/locations_and_languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_locations().await.expect_err("no tasks");
    assert!(matches!(err, DataForSeoError::EmptyResult));
    assert_eq!(err.to_string(), "No results returned from API");
}

#[tokio::test]
async fn absent_tasks_or_result_is_empty_result() {
    let server = MockServer::start().await;

    let no_tasks = serde_json::json!({
        "status_code": 20000,
        "status_message": "Ok."
    });
    let no_result = serde_json::json!({
        "status_code": 20000,
        "status_message": "Ok.",
        "tasks": [{ "status_code": 20000, "status_message": "Ok." }]
    });

    Mock::given(method("GET"))
        .and(path("/v3/dataforseo_labs/locations_and_languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&no_tasks))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/related_keywords/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&no_result))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_locations().await.expect_err("no tasks key");
    assert!(matches!(err, DataForSeoError::EmptyResult));

    let err = client
        .related_keywords(&related_query())
        .await
        .expect_err("no result key");
    assert!(matches!(err, DataForSeoError::EmptyResult));
}

#[tokio::test]
async fn http_error_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/related_keywords/live"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .related_keywords(&related_query())
        .await
        .expect_err("401 should fail");
    assert!(matches!(err, DataForSeoError::Status { status: 401, .. }));
    assert_eq!(err.to_string(), "Error fetching related keywords: 401");
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/keyword_ideas/live"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .keyword_ideas(&KeywordIdeasQuery {
            keywords: vec!["coffee".to_string()],
            location_name: "United States".to_string(),
            language_name: "English".to_string(),
            include_serp_info: true,
            limit: 20,
        })
        .await
        .expect_err("non-JSON should fail");
    assert!(matches!(err, DataForSeoError::Deserialize { .. }));
}

#[tokio::test]
async fn wrong_item_shape_is_deserialize_error() {
    let server = MockServer::start().await;

    let body = envelope(serde_json::json!([{
        "total_count": 1,
        "items": [{ "keyword": 42 }]
    }]));

    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/keyword_ideas/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .keyword_ideas(&KeywordIdeasQuery {
            keywords: vec!["coffee".to_string()],
            location_name: "United States".to_string(),
            language_name: "English".to_string(),
            include_serp_info: true,
            limit: 20,
        })
        .await
        .expect_err("keyword must be a string");
    assert!(matches!(err, DataForSeoError::Deserialize { .. }));
}
