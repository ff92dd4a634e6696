//! End-to-end orchestrator tests

use crate::{fast_retry, sitemap_index, test_client, test_config, urlset};
use serde_json::json;
use sumi_notify::config::{Config, ConfigSource};
use sumi_notify::submit::SubmissionMode;
use sumi_notify::{ConfigError, CrawlError, NotifyError, Pipeline, ValidationError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pipeline(config: Config) -> Pipeline<Config> {
    Pipeline::new(config, test_client()).with_retry_policy(fast_retry())
}

async fn accept_all(server: &MockServer, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_submit_entire_sitemap() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(sitemap_index(&["/posts.xml", "/pages.xml"])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&[
            "https://example.com/posts/1",
            "https://example.com/posts/2",
            "https://cdn.example.net/asset",
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pages.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&[
            "https://example.com/about",
            "https://example.com/posts/1",
        ])))
        .mount(&server)
        .await;
    accept_all(&server, 1).await;

    let config = test_config(
        &format!("{}/indexnow", base),
        &format!("{}/sitemap.xml", base),
    );
    let result = pipeline(config)
        .submit_entire_sitemap()
        .await
        .expect("Sitemap submission failed");

    assert_eq!(result.mode, SubmissionMode::Updated);
    assert_eq!(result.total, 4);
    assert_eq!(result.valid, 3);
    assert_eq!(result.invalid_urls, vec!["https://cdn.example.net/asset"]);
    assert_eq!(result.submitted, 3);
    assert_eq!(result.successful_batches, 1);
    assert!(!result.has_failures());
}

#[tokio::test]
async fn test_crawl_failure_aborts_before_submission() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    accept_all(&server, 0).await;

    let config = test_config(
        &format!("{}/indexnow", base),
        &format!("{}/sitemap.xml", base),
    );
    let err = pipeline(config).submit_entire_sitemap().await.unwrap_err();

    assert!(matches!(
        err,
        NotifyError::Crawl(CrawlError::Fetch { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_discover_sitemap_urls_does_not_submit() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&[
            "https://example.com/a",
            "https://other.org/b",
        ])))
        .mount(&server)
        .await;
    accept_all(&server, 0).await;

    let config = test_config(
        &format!("{}/indexnow", base),
        &format!("{}/sitemap.xml", base),
    );
    let urls = pipeline(config)
        .discover_sitemap_urls()
        .await
        .expect("Crawl failed");

    // Discovery returns everything; origin filtering happens at submission
    assert_eq!(urls, vec!["https://example.com/a", "https://other.org/b"]);
}

#[tokio::test]
async fn test_submit_explicit_urls_defaults_to_updated() {
    let server = MockServer::start().await;
    accept_all(&server, 1).await;

    let config = test_config(
        &format!("{}/indexnow", server.uri()),
        "https://example.com/sitemap.xml",
    );
    let result = pipeline(config)
        .submit_explicit_urls(&["https://example.com/new".to_string()], None)
        .await
        .expect("Submission failed");

    assert_eq!(result.mode, SubmissionMode::Updated);
    assert_eq!(result.submitted, 1);
}

#[tokio::test]
async fn test_invalid_mode_rejected_before_network() {
    let server = MockServer::start().await;
    accept_all(&server, 0).await;

    let config = test_config(
        &format!("{}/indexnow", server.uri()),
        "https://example.com/sitemap.xml",
    );
    let err = pipeline(config)
        .submit_explicit_urls(&["https://example.com/a".to_string()], Some("archived"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        NotifyError::Validation(ValidationError::InvalidMode(ref mode)) if mode == "archived"
    ));
}

#[tokio::test]
async fn test_missing_config_rejected_before_network() {
    let source = ConfigSource::from_pairs([("INDEXNOW_KEY", "abc123")]);
    let pipeline = Pipeline::new(source, test_client());

    let err = pipeline
        .submit_explicit_urls(&["https://example.com/a".to_string()], Some("created"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        NotifyError::Config(ConfigError::Missing(ref key)) if key == "SITE_URL"
    ));
    assert_eq!(err.to_string(), "Configuration error: SITE_URL is required");
}

#[tokio::test]
async fn test_submit_request_body() {
    let server = MockServer::start().await;
    accept_all(&server, 1).await;

    let config = test_config(
        &format!("{}/indexnow", server.uri()),
        "https://example.com/sitemap.xml",
    );
    let pipeline = pipeline(config);

    let result = pipeline
        .submit_request(&json!({
            "urls": ["https://example.com/gone", null, 7],
            "mode": "deleted",
        }))
        .await
        .expect("Submission failed");
    assert_eq!(result.mode, SubmissionMode::Deleted);
    assert_eq!(result.total, 3);
    assert_eq!(result.submitted, 1);
    assert_eq!(result.invalid, 2);

    let err = pipeline
        .submit_request(&json!({ "urls": "https://example.com/a" }))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        NotifyError::Validation(ValidationError::UrlsNotArray)
    ));
}

#[tokio::test]
async fn test_shared_key() {
    let config = test_config("https://api.example/indexnow", "https://example.com/sitemap.xml");
    assert_eq!(pipeline(config).shared_key().unwrap(), "abc123");

    let pipeline = Pipeline::new(ConfigSource::new(), test_client());
    assert!(matches!(
        pipeline.shared_key(),
        Err(NotifyError::Config(ConfigError::Missing(_)))
    ));
}

fn key_config(server: &MockServer) -> Config {
    Config {
        key_verification_url: format!("{}/abc123.txt", server.uri()),
        ..test_config("https://api.example/indexnow", "https://example.com/sitemap.xml")
    }
}

#[tokio::test]
async fn test_verify_key_location_matches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/abc123.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("abc123\n"))
        .expect(1)
        .mount(&server)
        .await;

    let check = pipeline(key_config(&server))
        .verify_key_location()
        .await
        .expect("Key check failed");

    assert!(check.matches);
    assert_eq!(check.status, 200);
    assert!(check.location.ends_with("/abc123.txt"));
}

#[tokio::test]
async fn test_verify_key_location_mismatch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/abc123.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("some-other-key"))
        .mount(&server)
        .await;

    let check = pipeline(key_config(&server))
        .verify_key_location()
        .await
        .expect("Key check failed");

    assert!(!check.matches);
}

#[tokio::test]
async fn test_verify_key_location_missing_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/abc123.txt"))
        .respond_with(ResponseTemplate::new(404).set_body_string("abc123"))
        .mount(&server)
        .await;

    let check = pipeline(key_config(&server))
        .verify_key_location()
        .await
        .expect("Key check failed");

    assert!(!check.matches);
    assert_eq!(check.status, 404);
}
