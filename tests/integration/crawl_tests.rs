//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real sockets.

use ripple_indexer::config::{Config, CrawlerConfig, ReportConfig, UserAgentConfig};
use ripple_indexer::crawler::Coordinator;
use ripple_indexer::{crawl, RippleError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with a short timeout and the given budget
fn create_test_config(max_pages: usize, workers: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_pages,
            workers,
            fetch_timeout_ms: 2_000,
            shutdown_grace_ms: 1_000,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: Some("https://example.com/contact".to_string()),
        },
        report: ReportConfig { top_words: 10 },
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

#[tokio::test]
async fn test_full_crawl_three_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"hello world <a href="/b">next</a> <a href="/c">next</a>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    // B links back to the seed; the cycle must not refetch it
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html(r#"hello again <a href="/">next</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(10, 4);
    let report = crawl(&config, &mock_server.uri())
        .await
        .expect("Crawl should succeed");

    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.pages_failed, 1);
    assert!(!report.budget_exhausted);
    assert!(report.drained_cleanly);

    let seed = format!("{}/", mock_server.uri());
    assert_eq!(report.visited.first(), Some(&seed));

    let top = &report.top_words[0];
    assert_eq!(top.word, "hello");
    assert_eq!(top.pages, 2);
    assert!(report
        .top_words
        .iter()
        .any(|ranked| ranked.word == "world" && ranked.pages == 1));
    assert!(report
        .top_words
        .iter()
        .any(|ranked| ranked.word == "again" && ranked.pages == 1));

    // "next" is link text on both fetched pages
    assert!(report
        .top_words
        .iter()
        .any(|ranked| ranked.word == "next" && ranked.pages == 2));
}

#[tokio::test]
async fn test_crawl_indexes_pages_by_address() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<p>Rust crawler</p><a href="/docs?page=2#top">docs</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(html("<p>Rust documentation</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(10, 2);
    let coordinator = Coordinator::new(&config).expect("Failed to build coordinator");
    let report = coordinator
        .run(&mock_server.uri())
        .await
        .expect("Crawl should succeed");

    assert_eq!(report.pages_visited, 2);

    let base = mock_server.uri();
    assert_eq!(
        coordinator.index().pages_for("rust"),
        vec![format!("{}/", base), format!("{}/docs", base)]
    );
    assert_eq!(
        coordinator.index().pages_for("documentation"),
        vec![format!("{}/docs", base)]
    );
    let docs = url::Url::parse(&format!("{}/docs", base)).expect("valid address");
    assert!(coordinator.frontier().contains(&docs));
    assert_eq!(coordinator.active_tasks(), 0);
}

#[tokio::test]
async fn test_crawl_respects_page_budget() {
    let mock_server = MockServer::start().await;

    let links: String = (1..=8)
        .map(|i| format!(r#"<a href="/p{}">page</a>"#, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&links))
        .mount(&mock_server)
        .await;

    for i in 1..=8 {
        Mock::given(method("GET"))
            .and(path(format!("/p{}", i)))
            .respond_with(html("leaf content"))
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config(4, 3);
    let report = crawl(&config, &mock_server.uri())
        .await
        .expect("Crawl should succeed");

    assert_eq!(report.pages_visited, 4);
    assert_eq!(report.visited.len(), 4);
    assert!(report.budget_exhausted);

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert_eq!(requests.len(), 4);
}

#[tokio::test]
async fn test_failed_seed_ends_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(10, 2);
    let report = crawl(&config, &mock_server.uri())
        .await
        .expect("A failed seed fetch is not fatal");

    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.pages_fetched, 0);
    assert_eq!(report.pages_failed, 1);
    assert_eq!(report.unique_words, 0);
    assert!(report.top_words.is_empty());
}

#[tokio::test]
async fn test_user_agent_header_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact)",
        ))
        .respond_with(html("identified"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(5, 1);
    let report = crawl(&config, &mock_server.uri())
        .await
        .expect("Crawl should succeed");

    // Without the expected header wiremock answers 404 and the page fails
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.top_words[0].word, "identified");
}

#[tokio::test]
async fn test_invalid_seed_is_rejected() {
    let config = create_test_config(5, 1);

    let result = crawl(&config, "not a url").await;
    assert!(matches!(result, Err(RippleError::InvalidSeed(_))));

    let result = crawl(&config, "ftp://example.com/file").await;
    assert!(matches!(result, Err(RippleError::InvalidSeed(_))));
}

#[tokio::test]
async fn test_unreachable_links_are_contained() {
    let mock_server = MockServer::start().await;

    // Port 9 (discard) is closed on test hosts, so this link fails to connect
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"start page <a href="http://127.0.0.1:9/gone">gone</a>"#,
        ))
        .mount(&mock_server)
        .await;

    let config = create_test_config(10, 2);
    let report = crawl(&config, &mock_server.uri())
        .await
        .expect("Crawl should succeed");

    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.pages_failed, 1);
    assert!(report.drained_cleanly);
}

#[tokio::test]
async fn test_links_resolve_against_redirect_target() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/final/", base).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/final/"))
        .respond_with(html(r#"landing <a href="leaf">leaf</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/final/leaf"))
        .respond_with(html("leafword"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(10, 2);
    let coordinator = Coordinator::new(&config).expect("Failed to build coordinator");
    let report = coordinator.run(&base).await.expect("Crawl should succeed");

    let seed = format!("{}/", base);
    let leaf = format!("{}/final/leaf", base);
    assert_eq!(report.visited, vec![seed.clone(), leaf.clone()]);
    assert_eq!(report.pages_fetched, 2);

    // The redirected page is indexed under the address that was admitted
    assert_eq!(coordinator.index().pages_for("landing"), vec![seed]);
    assert_eq!(coordinator.index().pages_for("leafword"), vec![leaf]);
}
