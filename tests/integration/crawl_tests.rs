use crate::common::{create_test_config, mount_bytes, mount_html, read_paths};
use campus_corpus::config::UserAgentConfig;
use campus_corpus::crawler::{build_http_client, fetch_url, Coordinator, CrawlControl, FetchResult};
use campus_corpus::PageOutcome;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a small site:
///
/// ```text
/// /        -> /about, /about#team, /docs/guide.pdf, /news/spring,
///             /files/photo.jpg, external link, mailto link
/// /about   -> /, /staff (404)
/// ```
async fn mount_site(server: &MockServer) {
    let base = server.uri();

    mount_html(
        server,
        "/",
        format!(
            r#"<html><body>
            <a href="/about">About</a>
            <a href="/about#team">Team</a>
            <a href="{base}/docs/guide.pdf?v=3">Guide</a>
            <a href="/news/spring">News</a>
            <a href="/files/photo.jpg">Photo</a>
            <a href="https://example.com/elsewhere">Elsewhere</a>
            <a href="mailto:info@tedu.edu.tr">Mail</a>
            </body></html>"#
        ),
    )
    .await;

    mount_html(
        server,
        "/about",
        r#"<html><body><a href="/">Home</a><a href="staff">Staff</a></body></html>"#.to_string(),
    )
    .await;

    mount_bytes(server, "/docs/guide.pdf", "application/pdf", b"%PDF-1.4 not really").await;
}

#[tokio::test]
async fn test_map_follows_admissible_links() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);
    let coordinator = Coordinator::new(config.clone(), CrawlControl::new()).unwrap();

    let report = coordinator.map().await.expect("Discovery should succeed");

    assert_eq!(
        read_paths(&config, &server),
        vec!["/", "/about", "/docs/guide.pdf", "/staff"]
    );
    assert_eq!(report.urls_mapped, 4);
    assert_eq!(report.queue_remaining, 0);
    assert!(!report.interrupted);
    assert_eq!(report.outcomes.get(PageOutcome::Mapped), 3);
    assert_eq!(report.outcomes.get(PageOutcome::HttpError), 1);
}

#[tokio::test]
async fn test_map_respects_url_cap() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server, &dir);
    config.crawler.max_urls = 2;
    let coordinator = Coordinator::new(config.clone(), CrawlControl::new()).unwrap();

    let report = coordinator.map().await.unwrap();

    assert_eq!(read_paths(&config, &server), vec!["/", "/about"]);
    assert_eq!(report.urls_mapped, 2);
}

#[tokio::test]
async fn test_map_with_parallel_workers() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server, &dir);
    config.crawler.max_concurrent_fetches = 4;
    let coordinator = Coordinator::new(config.clone(), CrawlControl::new()).unwrap();

    let report = coordinator.map().await.unwrap();

    assert_eq!(
        read_paths(&config, &server),
        vec!["/", "/about", "/docs/guide.pdf", "/staff"]
    );
    assert_eq!(report.outcomes.total(), 4);
}

#[tokio::test]
async fn test_interrupted_map_still_writes_url_map() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);
    let control = CrawlControl::new();
    control.cancel();
    let coordinator = Coordinator::new(config.clone(), control).unwrap();

    let report = coordinator.map().await.unwrap();

    assert!(report.interrupted);
    assert_eq!(report.urls_mapped, 0);
    assert!(config.output.url_map_path.exists());
    assert!(read_paths(&config, &server).is_empty());
}

#[tokio::test]
async fn test_unreachable_seed_is_mapped_but_failed() {
    let server = MockServer::start().await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server, &dir);
    config.crawler.seeds = vec!["http://127.0.0.1:9/".to_string()];
    let coordinator = Coordinator::new(config.clone(), CrawlControl::new()).unwrap();

    let report = coordinator.map().await.unwrap();

    assert_eq!(report.urls_mapped, 1);
    assert_eq!(report.outcomes.get(PageOutcome::NetworkError), 1);
}

/// Mounts `/` linking to a page that answers after `delay`
async fn mount_slow_site(server: &MockServer, delay: Duration) {
    mount_html(
        server,
        "/",
        r#"<html><body><a href="/slow">Slow</a><a href="/after">After</a></body></html>"#
            .to_string(),
    )
    .await;
    mount_html(
        server,
        "/after",
        "<html><body><p>Nothing slow here</p></body></html>".to_string(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(
                    "<html><body><p>The registrar publishes the academic calendar every spring semester.</p></body></html>"
                        .as_bytes()
                        .to_vec(),
                    "text/html",
                )
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_timeout_is_network_error() {
    let server = MockServer::start().await;
    mount_slow_site(&server, Duration::from_millis(600)).await;

    let client = build_http_client(&UserAgentConfig::default()).unwrap();
    let url = format!("{}/slow", server.uri());
    let result = fetch_url(&client, &url, Duration::from_millis(200)).await;

    assert!(matches!(
        result,
        FetchResult::NetworkError {
            timed_out: true,
            ..
        }
    ));
}

#[tokio::test]
async fn test_slow_page_times_out_and_crawl_continues() {
    let server = MockServer::start().await;
    mount_slow_site(&server, Duration::from_millis(600)).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server, &dir);
    config.crawler.discovery_timeout_ms = 200;
    config.crawler.extraction_timeout_ms = 3000;
    let coordinator = Coordinator::new(config.clone(), CrawlControl::new()).unwrap();

    let report = coordinator.map().await.unwrap();

    assert_eq!(read_paths(&config, &server), vec!["/", "/after", "/slow"]);
    assert_eq!(report.outcomes.get(PageOutcome::Mapped), 2);
    assert_eq!(report.outcomes.get(PageOutcome::NetworkError), 1);

    // The extraction pass has its own, longer timeout
    let report = coordinator.ingest().await.unwrap();
    assert_eq!(report.pages_processed, 3);
    assert_eq!(report.outcomes.get(PageOutcome::NetworkError), 0);
    assert_eq!(report.outcomes.get(PageOutcome::Extracted), 1);
}
