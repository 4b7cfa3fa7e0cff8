//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use std::path::Path;
use subtree_scribe::config::Config;
use subtree_scribe::crawler::Coordinator;
use subtree_scribe::output::{convert_directory, ConvertOptions};
use subtree_scribe::state::PageOutcome;
use subtree_scribe::storage::page_file_name;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing pages into `pages_dir`
fn create_test_config(pages_dir: &Path, max_depth: u32, max_duplicates: u32) -> Config {
    let mut config = Config::default();
    config.crawler.max_depth = max_depth;
    config.crawler.max_consecutive_duplicates = max_duplicates;
    config.crawler.request_delay = 0;
    config.crawler.request_timeout = 5;
    config.output.pages_dir = pages_dir.display().to_string();
    config.output.text_dir = pages_dir.join("markdown").display().to_string();
    config
}

/// Network location of the mock server, as used in page file names
fn server_domain(server: &MockServer) -> String {
    let url = url::Url::parse(&server.uri()).expect("Failed to parse mock server URI");
    subtree_scribe::url::extract_domain(&url).expect("Mock server URI has no host")
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html; charset=utf-8",
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_page(body))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_stays_in_subtree() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/guide/phone",
        &format!(
            r#"<a href="/guide/phone/setup">Setup</a>
               <a href="/guide/phone2">Phone 2</a>
               <a href="/guide">Guide index</a>
               <a href="https://other.example/guide/phone">Elsewhere</a>
               <a href="{}/guide/phone/setup">Setup again</a>
               <a>No target</a>"#,
            base
        ),
        1,
    )
    .await;
    mount_page(
        &server,
        "/guide/phone/setup",
        r#"<a href="/guide/phone">Back</a><a href="deep">Deep</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/guide/phone/deep", "<p>Deep page</p>", 1).await;
    mount_page(&server, "/guide/phone2", "<p>Sibling by prefix</p>", 1).await;
    mount_page(&server, "/guide", "<p>Out of scope</p>", 0).await;

    let temp = TempDir::new().unwrap();
    let config = create_test_config(temp.path(), 3, 10);
    let root = format!("{}/guide/phone", base);

    let mut coordinator = Coordinator::new(config, &root).expect("Failed to create coordinator");
    let report = coordinator.run().await;

    assert_eq!(report.count(PageOutcome::Saved), 4);
    assert_eq!(report.total_errors(), 0);
    assert_eq!(report.visited, 4);
    assert_eq!(report.out_of_scope_links, 2);
    assert_eq!(report.duplicate_attempts, 2);
    assert!(!report.halted_on_duplicates);

    // Every visited URL is inside the subtree
    let state = coordinator.visit_state();
    for url in state.visited() {
        assert!(coordinator.root().contains(url), "{} escaped the scope", url);
    }

    // Pages are stored under the root's domain, named from their URL, in
    // depth-first document order
    let domain = server_domain(&server);
    let expected_order: Vec<_> = [
        "/guide/phone",
        "/guide/phone/setup",
        "/guide/phone/deep",
        "/guide/phone2",
    ]
    .iter()
    .map(|page| {
        temp.path()
            .join(page_file_name(&domain, &format!("{}{}", base, page)))
    })
    .collect();

    for file in &expected_order {
        assert!(file.is_file(), "missing stored page {}", file.display());
    }
    assert_eq!(report.pages_saved, expected_order);
}

#[tokio::test]
async fn test_http_404_ends_only_its_branch() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/docs",
        r#"<a href="/docs/missing">Missing</a><a href="/docs/ok">Ok</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/docs/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/docs/ok", "<p>Still crawled</p>", 1).await;

    let temp = TempDir::new().unwrap();
    let config = create_test_config(temp.path(), 3, 10);
    let root = format!("{}/docs", server.uri());

    let mut coordinator = Coordinator::new(config, &root).unwrap();
    let report = coordinator.run().await;

    assert_eq!(report.count(PageOutcome::Saved), 2);
    assert_eq!(report.count(PageOutcome::NetworkError), 1);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].url.ends_with("/docs/missing"));
    assert!(report.failures[0].error.contains("404"));

    // A failed URL still counts as visited
    assert!(coordinator
        .visit_state()
        .is_visited(&format!("{}/docs/missing", server.uri())));
}

#[tokio::test]
async fn test_duplicate_streak_halts_crawl() {
    let server = MockServer::start().await;

    let mut anchors = r#"<a href="/docs">Home</a>"#.repeat(10);
    anchors.push_str(r#"<a href="/docs/never">Never</a>"#);

    mount_page(&server, "/docs", &anchors, 1).await;
    mount_page(&server, "/docs/never", "<p>Unreachable</p>", 0).await;

    let temp = TempDir::new().unwrap();
    let config = create_test_config(temp.path(), 3, 10);
    let root = format!("{}/docs", server.uri());

    let mut coordinator = Coordinator::new(config, &root).unwrap();
    let report = coordinator.run().await;

    assert!(report.halted_on_duplicates);
    assert_eq!(report.duplicate_attempts, 10);
    assert_eq!(report.count(PageOutcome::Saved), 1);
    assert_eq!(report.visited, 1);
}

#[tokio::test]
async fn test_novel_visit_resets_streak() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/docs",
        r#"<a href="/docs">1</a><a href="/docs">2</a>
           <a href="/docs/new">New</a>
           <a href="/docs">3</a><a href="/docs">4</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/docs/new", "<p>New</p>", 1).await;

    let temp = TempDir::new().unwrap();
    let config = create_test_config(temp.path(), 3, 3);
    let root = format!("{}/docs", server.uri());

    let mut coordinator = Coordinator::new(config, &root).unwrap();
    let report = coordinator.run().await;

    assert!(!report.halted_on_duplicates);
    assert_eq!(report.duplicate_attempts, 4);
    assert_eq!(report.count(PageOutcome::Saved), 2);
}

#[tokio::test]
async fn test_depth_limit() {
    let server = MockServer::start().await;

    mount_page(&server, "/d", r#"<a href="/d/a">A</a>"#, 1).await;
    mount_page(&server, "/d/a", r#"<a href="/d/a/b">B</a>"#, 1).await;
    mount_page(&server, "/d/a/b", "<p>Too deep</p>", 0).await;

    let temp = TempDir::new().unwrap();
    let config = create_test_config(temp.path(), 2, 10);
    let root = format!("{}/d", server.uri());

    let mut coordinator = Coordinator::new(config, &root).unwrap();
    let report = coordinator.run().await;

    assert_eq!(report.count(PageOutcome::Saved), 2);
    assert_eq!(report.depth_exhausted, 1);
    assert!(!coordinator
        .visit_state()
        .is_visited(&format!("{}/d/a/b", server.uri())));
}

#[tokio::test]
async fn test_sends_identity_header() {
    let server = MockServer::start().await;

    let temp = TempDir::new().unwrap();
    let config = create_test_config(temp.path(), 1, 10);
    let expected = config.user_agent.header_value();

    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", expected.as_str()))
        .respond_with(html_page("<p>Hello</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut coordinator = Coordinator::new(config, &format!("{}/ua", server.uri())).unwrap();
    let report = coordinator.run().await;

    assert_eq!(report.count(PageOutcome::Saved), 1);
}

#[tokio::test]
async fn test_detected_encoding_beats_declared_charset() {
    let server = MockServer::start().await;
    let text = "<html><body><p>iPhoneユーザガイドへようこそ。設定を確認してください。</p></body></html>";

    Mock::given(method("GET"))
        .and(path("/ja"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(text.as_bytes(), "text/html; charset=iso-8859-1"),
        )
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let config = create_test_config(temp.path(), 1, 10);

    let mut coordinator = Coordinator::new(config, &format!("{}/ja", server.uri())).unwrap();
    let report = coordinator.run().await;

    assert_eq!(report.pages_saved.len(), 1);
    let stored = std::fs::read_to_string(&report.pages_saved[0]).unwrap();
    assert_eq!(stored, text);
}

#[tokio::test]
async fn test_shift_jis_page_is_decoded() {
    let server = MockServer::start().await;
    let text = "<html><head><title>ユーザガイド</title></head><body>\
        <h1>はじめに</h1>\
        <p>このガイドでは、新しい電話の基本的な使い方について説明します。\
        まず、電源を入れて画面の指示に従ってください。</p>\
        <p>次に、ネットワークに接続して、アカウントを設定します。\
        わからないことがあれば、サポートページを参照してください。</p>\
        </body></html>";
    let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode(text);

    Mock::given(method("GET"))
        .and(path("/sjis"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(encoded.into_owned(), "text/html"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let config = create_test_config(temp.path(), 1, 10);

    let mut coordinator = Coordinator::new(config, &format!("{}/sjis", server.uri())).unwrap();
    let report = coordinator.run().await;

    assert_eq!(report.pages_saved.len(), 1);
    let stored = std::fs::read_to_string(&report.pages_saved[0]).unwrap();
    assert_eq!(stored, text);
}

#[tokio::test]
async fn test_crawl_then_convert() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/manual",
        r#"<script>window.analytics = true;</script>
           <style>p { margin: 0; }</style>
           <nav><a href="/manual/chapter">Chapter</a></nav>
           <h1>Manual</h1><p>Welcome to the manual.</p>"#,
        1,
    )
    .await;
    mount_page(&server, "/manual/chapter", "<h2>Chapter One</h2>", 1).await;

    let temp = TempDir::new().unwrap();
    let config = create_test_config(temp.path(), 2, 10);
    let text_dir = temp.path().join("markdown");

    let mut coordinator = Coordinator::new(config, &format!("{}/manual", server.uri())).unwrap();
    let report = coordinator.run().await;
    assert_eq!(report.pages_saved.len(), 2);

    let written = convert_directory(temp.path(), &text_dir, ConvertOptions::default()).unwrap();
    assert_eq!(written.len(), 2);

    for markdown_file in &written {
        let markdown = std::fs::read_to_string(markdown_file).unwrap();
        assert!(!markdown.trim().is_empty());
        assert!(!markdown.contains("analytics"));
        assert!(!markdown.contains("margin"));
    }

    let combined: String = written
        .iter()
        .map(|f| std::fs::read_to_string(f).unwrap())
        .collect();
    assert!(combined.contains("Welcome to the manual."));
    assert!(combined.contains("Chapter One"));
}

#[tokio::test]
async fn test_every_eligible_child_is_paced() {
    let server = MockServer::start().await;

    // Paced frames: /p/a (fetched), /p/a/leaf (no budget left), then /p and
    // /p/a again (duplicates). The root itself is not paced.
    mount_page(
        &server,
        "/p",
        r#"<a href="/p/a">A</a><a href="/p">Self</a><a href="/p/a">A again</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/p/a", r#"<a href="/p/a/leaf">Leaf</a>"#, 1).await;
    mount_page(&server, "/p/a/leaf", "<p>Too deep</p>", 0).await;

    let temp = TempDir::new().unwrap();
    let mut config = create_test_config(temp.path(), 2, 10);
    config.crawler.request_delay = 20;

    let mut coordinator = Coordinator::new(config, &format!("{}/p", server.uri())).unwrap();
    let start = std::time::Instant::now();
    let report = coordinator.run().await;
    let elapsed = start.elapsed();

    assert_eq!(report.count(PageOutcome::Saved), 2);
    assert_eq!(report.depth_exhausted, 1);
    assert_eq!(report.duplicate_attempts, 2);
    assert!(
        elapsed >= std::time::Duration::from_millis(80),
        "4 paced visits took only {:?}",
        elapsed
    );
}
