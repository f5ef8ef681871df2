//! Crawl-stage tests against a mock site

use crate::common::{crawler, file_names, mount_page, mount_probe};
use std::sync::Arc;
use tune_sieve::output::RunStatistics;
use tune_sieve::ConcurrencyMode;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_depth_one_visits_only_seeds() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
            <a href="a.mp3">A</a>
            <a href="sub/index.html">Sub</a>
            <a href="b.mp3">B</a>
        </body></html>"#,
    )
    .await;

    // Nothing below the seed may be touched at depth 1
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sub/index.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let stats = Arc::new(RunStatistics::new());
    let seeds = vec![format!("{}/", mock_server.uri())];
    let links = crawler(&stats)
        .crawl(&seeds, 1, ConcurrencyMode::Concurrent)
        .await;

    assert_eq!(file_names(&links), vec!["a.mp3", "b.mp3"]);
    assert_eq!(stats.snapshot().probes_issued, 0);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_depth_two_follows_html_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="a.mp3">A</a><a href="sub/index.html">Sub</a><a href="b.mp3">B</a>"#,
    )
    .await;
    mount_probe(&mock_server, "/sub/index.html", "text/html").await;
    mount_page(&mock_server, "/sub/index.html", r#"<a href="c.mp3">C</a>"#).await;

    let stats = Arc::new(RunStatistics::new());
    let links = crawler(&stats)
        .crawl(&[format!("{}/", base_url)], 2, ConcurrencyMode::Concurrent)
        .await;

    assert_eq!(file_names(&links), vec!["a.mp3", "b.mp3", "c.mp3"]);
    assert!(links.contains(&format!("{}/sub/c.mp3", base_url)));
}

#[tokio::test]
async fn test_shared_candidate_crawled_once() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/one.html", r#"<a href="shared.html">Shared</a>"#).await;
    mount_page(&mock_server, "/two.html", r#"<a href="shared.html">Shared</a>"#).await;

    Mock::given(method("HEAD"))
        .and(path("/shared.html"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/shared.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="song.mp3">Song</a>"#)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let stats = Arc::new(RunStatistics::new());
    let seeds = vec![
        format!("{}/one.html", mock_server.uri()),
        format!("{}/two.html", mock_server.uri()),
    ];
    let links = crawler(&stats)
        .crawl(&seeds, 3, ConcurrencyMode::Concurrent)
        .await;

    assert_eq!(file_names(&links), vec!["song.mp3"]);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_seed_without_trailing_slash_not_crawled_twice() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="a.mp3">A</a><a href="/page.html">Page</a>"#)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_probe(&mock_server, "/page.html", "text/html").await;
    mount_probe(&mock_server, "/", "text/html").await;
    mount_page(&mock_server, "/page.html", r#"<a href="/">Home</a>"#).await;

    let stats = Arc::new(RunStatistics::new());
    let seeds = vec![mock_server.uri()];
    let links = crawler(&stats)
        .crawl(&seeds, 3, ConcurrencyMode::Concurrent)
        .await;

    assert_eq!(links, vec![format!("{}/a.mp3", mock_server.uri())]);
    assert_eq!(stats.snapshot().pages_fetched, 2);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_content_type_decides_descent() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="listing">Listing</a><a href="archive.zip">Archive</a>"#,
    )
    .await;
    mount_probe(&mock_server, "/listing", "text/html; charset=utf-8").await;
    mount_probe(&mock_server, "/archive.zip", "application/zip").await;
    mount_page(&mock_server, "/listing", r#"<a href="deep.mp3">Deep</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/archive.zip"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let stats = Arc::new(RunStatistics::new());
    let links = crawler(&stats)
        .crawl(
            &[format!("{}/", mock_server.uri())],
            2,
            ConcurrencyMode::Concurrent,
        )
        .await;

    assert_eq!(file_names(&links), vec!["deep.mp3"]);
    assert_eq!(stats.snapshot().probes_issued, 2);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_failing_probe_does_not_stop_siblings() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="broken.html">Broken</a><a href="fine.html">Fine</a><a href="top.mp3">Top</a>"#,
    )
    .await;
    Mock::given(method("HEAD"))
        .and(path("/broken.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_probe(&mock_server, "/fine.html", "text/html").await;
    mount_page(&mock_server, "/fine.html", r#"<a href="fine.mp3">Fine</a>"#).await;

    let stats = Arc::new(RunStatistics::new());
    let links = crawler(&stats)
        .crawl(
            &[format!("{}/", mock_server.uri())],
            2,
            ConcurrencyMode::Concurrent,
        )
        .await;

    assert_eq!(file_names(&links), vec!["fine.mp3", "top.mp3"]);
    assert_eq!(stats.snapshot().probe_failures, 1);
}

#[tokio::test]
async fn test_http_error_page_yields_no_links() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"<a href="x.mp3">X</a>"#))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok.html", r#"<a href="ok.mp3">OK</a>"#).await;

    let stats = Arc::new(RunStatistics::new());
    let seeds = vec![
        format!("{}/", mock_server.uri()),
        format!("{}/ok.html", mock_server.uri()),
    ];
    let links = crawler(&stats)
        .crawl(&seeds, 2, ConcurrencyMode::Concurrent)
        .await;

    assert_eq!(file_names(&links), vec!["ok.mp3"]);
    let snapshot = stats.snapshot();
    assert_eq!(snapshot.page_failures, 1);
    assert_eq!(snapshot.pages_fetched, 1);
}

#[tokio::test]
async fn test_user_agent_sent_on_every_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="page.html">Page</a>"#)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/page.html"))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/page.html", "<p>empty</p>").await;

    let stats = Arc::new(RunStatistics::new());
    crawler(&stats)
        .crawl(
            &[format!("{}/", mock_server.uri())],
            2,
            ConcurrencyMode::Sequential,
        )
        .await;

    mock_server.verify().await;
}
