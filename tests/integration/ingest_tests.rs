use crate::common::{create_test_config, mount_bytes, mount_html};
use campus_corpus::config::Config;
use campus_corpus::corpus::{parse_corpus, write_url_map};
use campus_corpus::crawler::{Coordinator, CrawlControl};
use campus_corpus::{HarvestError, PageOutcome, SourceKind};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INTERNSHIP: &str = "The summer internship lasts twenty working days.Students submit a report afterwards.";

async fn mount_pages(server: &MockServer) {
    mount_html(
        server,
        "/internship",
        format!(
            r#"<html><body><nav>Menu</nav><p>{}</p><footer>Footer</footer></body></html>"#,
            INTERNSHIP
        ),
    )
    .await;
    mount_html(server, "/short", "<html><body><p>Hi</p></body></html>".to_string()).await;
    mount_bytes(server, "/logo.gif", "image/gif", b"GIF89a").await;
    mount_bytes(server, "/broken.pdf", "application/pdf", b"%PDF-1.4 truncated").await;
}

fn write_map(config: &Config, server: &MockServer, paths: &[&str]) {
    let urls: Vec<String> = paths
        .iter()
        .map(|path| format!("{}{}", server.uri(), path))
        .collect();
    write_url_map(&config.output.url_map_path, &urls).unwrap();
}

#[tokio::test]
async fn test_ingest_writes_accepted_blocks() {
    let server = MockServer::start().await;
    mount_pages(&server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);
    write_map(
        &config,
        &server,
        &["/broken.pdf", "/internship", "/logo.gif", "/missing", "/short"],
    );

    let coordinator = Coordinator::new(config.clone(), CrawlControl::new()).unwrap();
    let report = coordinator.ingest().await.expect("Ingestion should succeed");

    assert_eq!(report.urls_total, 5);
    assert_eq!(report.pages_processed, 5);
    assert_eq!(report.blocks_written, 1);
    assert_eq!(report.outcomes.get(PageOutcome::Extracted), 1);
    assert_eq!(report.outcomes.get(PageOutcome::TooShort), 1);
    assert_eq!(report.outcomes.get(PageOutcome::Unsupported), 1);
    assert_eq!(report.outcomes.get(PageOutcome::Empty), 1);
    assert_eq!(report.outcomes.get(PageOutcome::HttpError), 1);

    let raw = std::fs::read_to_string(&config.output.raw_corpus_path).unwrap();
    let blocks = parse_corpus(&raw);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, SourceKind::Web);
    assert_eq!(blocks[0].url, format!("{}/internship", server.uri()));
    assert_eq!(blocks[0].text, INTERNSHIP);
    assert!(raw.starts_with(&format!("--- WEB_SOURCE: {}/internship ---\n", server.uri())));
}

#[tokio::test]
async fn test_ingest_without_url_map_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);

    let coordinator = Coordinator::new(config.clone(), CrawlControl::new()).unwrap();
    let result = coordinator.ingest().await;

    assert!(matches!(result, Err(HarvestError::MissingInput { .. })));
    assert!(!config.output.raw_corpus_path.exists());
}

#[tokio::test]
async fn test_ingest_empty_map_writes_empty_corpus() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);
    write_map(&config, &server, &[]);

    let coordinator = Coordinator::new(config.clone(), CrawlControl::new()).unwrap();
    let report = coordinator.ingest().await.unwrap();

    assert_eq!(report.pages_processed, 0);
    assert_eq!(
        std::fs::read_to_string(&config.output.raw_corpus_path).unwrap(),
        ""
    );
}

const CALENDAR: &str = "The academic calendar lists registration weeks and final exam dates.";

#[tokio::test]
async fn test_interrupt_mid_pass_flushes_partial_corpus() {
    let server = MockServer::start().await;
    let page = format!("<html><body><p>{}</p></body></html>", CALENDAR);

    mount_html(&server, "/a", page.clone()).await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(page.clone().into_bytes(), "text/html")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    // Never requested once the pass is interrupted
    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page.into_bytes(), "text/html"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);
    write_map(&config, &server, &["/a", "/b", "/c"]);

    let control = CrawlControl::new();
    let coordinator = Coordinator::new(config.clone(), control.clone()).unwrap();

    // Cancel while /b is in flight
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        control.cancel();
    });

    let report = coordinator.ingest().await.unwrap();
    canceller.await.unwrap();

    assert!(report.interrupted);
    assert_eq!(report.urls_total, 3);
    assert_eq!(report.pages_processed, 2);
    assert_eq!(report.blocks_written, 2);

    let raw = std::fs::read_to_string(&config.output.raw_corpus_path).unwrap();
    let urls: Vec<_> = parse_corpus(&raw).into_iter().map(|block| block.url).collect();
    assert_eq!(
        urls,
        vec![format!("{}/a", server.uri()), format!("{}/b", server.uri())]
    );
}

#[tokio::test]
async fn test_sequential_ingest_spaces_fetches_across_hosts() {
    let server = MockServer::start().await;
    let page = format!("<html><body><p>{}</p></body></html>", CALENDAR);
    mount_html(&server, "/a", page.clone()).await;
    mount_html(&server, "/b", page).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server, &dir);
    config.crawler.request_delay_ms = 400;

    // Same server reached under two host names
    let port = server.address().port();
    let urls = vec![
        format!("http://127.0.0.1:{}/a", port),
        format!("http://localhost:{}/b", port),
    ];
    write_url_map(&config.output.url_map_path, &urls).unwrap();

    let coordinator = Coordinator::new(config.clone(), CrawlControl::new()).unwrap();
    let started = Instant::now();
    let report = coordinator.ingest().await.unwrap();

    assert_eq!(report.blocks_written, 2);
    assert!(started.elapsed() >= Duration::from_millis(400));
}
