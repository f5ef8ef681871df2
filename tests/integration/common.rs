//! Shared fixtures for the integration tests

use id3::{Tag, TagLike, Version};
use std::sync::Arc;
use tune_sieve::config::Config;
use tune_sieve::crawler::{Crawler, HtmlLinkExtractor, HttpFetcher};
use tune_sieve::output::RunStatistics;
use tune_sieve::Pipeline;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Bytes of an MP3 file: an ID3v2.4 tag, one frame header, then silence
pub fn mp3_bytes(genre: Option<&str>, title: Option<&str>) -> Vec<u8> {
    let mut bytes = Vec::new();

    if genre.is_some() || title.is_some() {
        let mut tag = Tag::new();
        if let Some(genre) = genre {
            tag.set_genre(genre);
        }
        if let Some(title) = title {
            tag.set_title(title);
        }
        tag.write_to(&mut bytes, Version::Id3v24)
            .expect("Failed to encode ID3 tag");
    }

    bytes.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
    bytes.extend_from_slice(&[0u8; 8192]);
    bytes
}

/// Serves an HTML page on GET
pub async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Answers HEAD probes for a route with the given content type
pub async fn mount_probe(server: &MockServer, route: &str, content_type: &str) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", content_type))
        .mount(server)
        .await;
}

/// Serves an MP3 file on GET
pub async fn mount_track(server: &MockServer, route: &str, bytes: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(bytes)
                .insert_header("content-type", "audio/mpeg"),
        )
        .mount(server)
        .await;
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.request_timeout_secs = 5;
    config
}

pub fn pipeline() -> Pipeline {
    Pipeline::from_config(&test_config()).expect("Failed to build pipeline")
}

pub fn crawler(stats: &Arc<RunStatistics>) -> Crawler {
    let fetcher = HttpFetcher::from_config(&test_config()).expect("Failed to build client");
    Crawler::new(
        fetcher,
        Arc::new(HtmlLinkExtractor::new()),
        Arc::clone(stats),
    )
}

/// Sorted last path segments of a list of URLs
pub fn file_names(links: &[String]) -> Vec<String> {
    let mut names: Vec<String> = links
        .iter()
        .map(|l| l.rsplit('/').next().unwrap_or_default().to_string())
        .collect();
    names.sort();
    names
}

