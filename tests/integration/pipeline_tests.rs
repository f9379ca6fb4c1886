use crate::common::{create_test_config, mount_html};
use campus_corpus::corpus::parse_corpus;
use campus_corpus::crawler::{Coordinator, CrawlControl};
use campus_corpus::{HarvestError, Normalizer};
use tempfile::TempDir;
use wiremock::MockServer;

#[tokio::test]
async fn test_map_ingest_clean() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/",
        r#"<html><body>
        <a href="/en/summer-internship">Internship</a>
        <a href="/en/news/fair">Career fair</a>
        <p>Welcome to the department. Skip to main content</p>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_html(
        &server,
        "/en/summer-internship",
        "<html><body><main>Each student completes two internships.\
         The first one is done after the second year.</main>\
         <p>Copyright © TED University</p></body></html>"
            .to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);
    let coordinator = Coordinator::new(config.clone(), CrawlControl::new()).unwrap();

    let map = coordinator.map().await.unwrap();
    assert_eq!(map.urls_mapped, 2);

    let ingest = coordinator.ingest().await.unwrap();
    assert_eq!(ingest.blocks_written, 2);

    let normalizer = Normalizer::from_config(&config.normalizer).unwrap();
    let report = normalizer
        .clean_file(
            &config.output.raw_corpus_path,
            &config.output.final_corpus_path,
        )
        .unwrap();

    // The home page is mostly boilerplate once junk is stripped
    assert_eq!(report.processed, 2);
    assert_eq!(report.dropped, 1);
    assert_eq!(report.kept, 1);

    let cleaned = std::fs::read_to_string(&config.output.final_corpus_path).unwrap();
    let blocks = parse_corpus(&cleaned);
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].url,
        format!("{}/en/summer-internship", server.uri())
    );
    assert_eq!(
        blocks[0].text,
        "Each student completes two internships. The first one is done after the second year."
    );
}

#[test]
fn test_clean_without_raw_corpus_fails() {
    let dir = TempDir::new().unwrap();
    let result = Normalizer::default().clean_file(
        &dir.path().join("missing.txt"),
        &dir.path().join("final.txt"),
    );

    assert!(matches!(result, Err(HarvestError::MissingInput { .. })));
    assert!(!dir.path().join("final.txt").exists());
}
