use campus_corpus::config::Config;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
///
/// Stale-year filtering is disabled because the server port is random
/// and may contain a year token.
pub fn create_test_config(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();

    config.crawler.target_domain = "127.0.0.1".to_string();
    config.crawler.seeds = vec![format!("{}/", server.uri())];
    config.crawler.max_urls = 50;
    config.crawler.discovery_timeout_ms = 2000;
    config.crawler.extraction_timeout_ms = 2000;
    config.crawler.discovery_delay_ms = 0;
    config.crawler.request_delay_ms = 0;

    config.filter.stale_years.clear();

    config.output.url_map_path = dir.path().join("url_map.txt");
    config.output.raw_corpus_path = dir.path().join("raw_corpus.txt");
    config.output.final_corpus_path = dir.path().join("final_corpus.txt");

    config
}

/// Mounts an HTML page at `route`
pub async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Mounts a response with raw bytes and a given content type
pub async fn mount_bytes(server: &MockServer, route: &str, content_type: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.to_vec(), content_type),
        )
        .mount(server)
        .await;
}

/// Reads a URL map and strips the server prefix from every line
pub fn read_paths(config: &Config, server: &MockServer) -> Vec<String> {
    let content = std::fs::read_to_string(&config.output.url_map_path)
        .expect("URL map should exist");
    content
        .lines()
        .map(|line| line.trim_start_matches(&server.uri()).to_string())
        .collect()
}
