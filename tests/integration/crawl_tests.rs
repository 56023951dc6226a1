//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for a Wikipedia edition and run the
//! full crawl against it, checking the files left in a temporary directory.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use wiki_category_crawler::config::{Config, LanguageEntry};
use wiki_category_crawler::crawler::{crawl, CrawlOptions, FailurePolicy, OutputMode};
use wiki_category_crawler::{CrawlError, ExtractionError, FetchError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Configuration whose `en` and `tr` editions both point at the mock server
fn mock_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    for (code, namespace) in [("en", "Category"), ("tr", "Kategori")] {
        config.languages.push(LanguageEntry {
            code: code.to_string(),
            base_url: server.uri(),
            category_namespace: namespace.to_string(),
        });
    }
    config
}

fn listing_page(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| format!(r#"<li><a href="{href}" title="t">t</a></li>"#))
        .collect();
    format!(
        r#"<html><head><title>Category:X - Wikipedia</title></head><body>
        <div id="mw-subcategories"><ul><li><a href="/wiki/Category:Y">Y</a></li></ul></div>
        <div id="mw-pages"><h2>Pages in category "X"</h2>
        <div class="mw-content-ltr"><div class="mw-category"><div class="mw-category-group">
        <ul>{items}</ul></div></div></div></div>
        <nav><ul><li><a href="/wiki/Main_Page">Main page</a></li></ul></nav>
        </body></html>"#
    )
}

fn article_page(title: &str, paragraphs: &[&str]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
    format!(
        r#"<html><head><title>{title}</title><style>p {{ margin: 0; }}</style></head><body>
        <nav><p>Navigation</p></nav>
        <div id="content">{body}</div>
        <div class="navbox"><p>Related articles</p></div>
        <footer><p>Text is available under a licence.</p></footer>
        </body></html>"#
    )
}

async fn mount_listing(server: &MockServer, route: &str, hrefs: &[&str]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(hrefs)))
        .mount(server)
        .await;
}

async fn mount_article(server: &MockServer, name: &str, paragraphs: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_page(name, paragraphs)))
        .mount(server)
        .await;
}

async fn mount_pdf(server: &MockServer, name: &str, status: u16, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/api/rest_v1/page/pdf/{name}")))
        .and(header("accept", "application/pdf"))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(bytes.to_vec()))
        .mount(server)
        .await;
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read output directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn options(category: &str, output: &Path) -> CrawlOptions {
    CrawlOptions::new(category, output)
}

#[tokio::test]
async fn test_text_crawl_writes_one_file_per_unique_article() {
    let server = MockServer::start().await;
    mount_listing(&server, "/wiki/Category:X", &["/wiki/A", "/wiki/B", "/wiki/A"]).await;
    mount_article(&server, "A", &["Alpha one.", "Alpha two."]).await;
    mount_article(&server, "B", &["Beta."]).await;

    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("out");

    let report = crawl(&mock_config(&server), options("X", &output))
        .await
        .expect("Crawl failed");

    assert_eq!(report.listed, 2);
    assert_eq!(report.written, vec![output.join("A.txt"), output.join("B.txt")]);
    assert!(report.is_complete());

    assert_eq!(file_names(&output), vec!["A.txt", "B.txt"]);
    assert!(!output.join("PDF").exists());

    assert_eq!(
        std::fs::read_to_string(output.join("A.txt")).unwrap(),
        "Alpha one.\n\nAlpha two."
    );
    assert_eq!(std::fs::read_to_string(output.join("B.txt")).unwrap(), "Beta.");
}

#[tokio::test]
async fn test_articles_fetched_in_listing_order() {
    let server = MockServer::start().await;
    mount_listing(&server, "/wiki/Category:X", &["/wiki/C", "/wiki/A", "/wiki/B"]).await;
    for name in ["A", "B", "C"] {
        mount_article(&server, name, &[name]).await;
    }

    let tmp = TempDir::new().unwrap();
    crawl(&mock_config(&server), options("X", tmp.path()))
        .await
        .expect("Crawl failed");

    let requested: Vec<String> = server
        .received_requests()
        .await
        .expect("Request recording is enabled")
        .iter()
        .map(|request| request.url.path().to_string())
        .collect();

    assert_eq!(
        requested,
        vec!["/wiki/Category:X", "/wiki/C", "/wiki/A", "/wiki/B"]
    );
}

#[tokio::test]
async fn test_pdf_crawl_writes_raw_bytes() {
    let server = MockServer::start().await;
    mount_listing(&server, "/wiki/Category:X", &["/wiki/A", "/wiki/B", "/wiki/A"]).await;
    mount_pdf(&server, "A", 200, b"%PDF-1.7\x00\xffA").await;
    mount_pdf(&server, "B", 200, b"%PDF-1.7\x00\xffB").await;

    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("output");
    let mut opts = options("X", &output);
    opts.mode = OutputMode::Pdf;

    let report = crawl(&mock_config(&server), opts)
        .await
        .expect("Crawl failed");

    assert_eq!(report.written.len(), 2);
    assert_eq!(file_names(&output), vec!["PDF"]);
    assert_eq!(file_names(&output.join("PDF")), vec!["A.pdf", "B.pdf"]);
    assert_eq!(
        std::fs::read(output.join("PDF").join("A.pdf")).unwrap(),
        b"%PDF-1.7\x00\xffA"
    );
    assert_eq!(
        std::fs::read(output.join("PDF").join("B.pdf")).unwrap(),
        b"%PDF-1.7\x00\xffB"
    );
}

/// The PDF endpoint's status is not checked: an error page is saved as the PDF.
#[tokio::test]
async fn test_pdf_error_page_is_written_unchecked() {
    let server = MockServer::start().await;
    mount_listing(&server, "/wiki/Category:X", &["/wiki/Missing"]).await;
    mount_pdf(&server, "Missing", 404, b"{\"title\":\"Not found.\"}").await;

    let tmp = TempDir::new().unwrap();
    let mut opts = options("X", tmp.path());
    opts.mode = OutputMode::Pdf;

    let report = crawl(&mock_config(&server), opts)
        .await
        .expect("PDF crawl must not fail on HTTP error pages");

    assert!(report.is_complete());
    assert_eq!(
        std::fs::read(tmp.path().join("PDF").join("Missing.pdf")).unwrap(),
        b"{\"title\":\"Not found.\"}"
    );
}

#[tokio::test]
async fn test_missing_listing_container_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/Category:Nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            "<html><head><title>Not found</title></head><body><p>No such category.</p></body></html>",
        ))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("out");

    let err = crawl(&mock_config(&server), options("Nope", &output))
        .await
        .unwrap_err();

    assert!(matches!(err, CrawlError::Structure { .. }), "got {:?}", err);
    assert!(output.is_dir());
    assert!(file_names(&output).is_empty());
}

#[tokio::test]
async fn test_first_failing_article_aborts_run() {
    let server = MockServer::start().await;
    mount_listing(&server, "/wiki/Category:X", &["/wiki/A", "/wiki/B", "/wiki/C"]).await;
    mount_article(&server, "A", &["Alpha."]).await;
    Mock::given(method("GET"))
        .and(path("/wiki/B"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_article(&server, "C", &["Gamma."]).await;

    let tmp = TempDir::new().unwrap();
    let err = crawl(&mock_config(&server), options("X", tmp.path()))
        .await
        .unwrap_err();

    match &err {
        CrawlError::Extraction(ExtractionError::Fetch(FetchError::Status { url, status })) => {
            assert!(url.ends_with("/wiki/B"));
            assert_eq!(status.as_u16(), 404);
        }
        other => panic!("expected extraction error, got {:?}", other),
    }

    // A was written before the failure and stays; C was never reached
    assert_eq!(file_names(tmp.path()), vec!["A.txt"]);
}

#[tokio::test]
async fn test_keep_going_records_failures() {
    let server = MockServer::start().await;
    mount_listing(&server, "/wiki/Category:X", &["/wiki/A", "/wiki/B", "/wiki/C"]).await;
    mount_article(&server, "A", &["Alpha."]).await;
    Mock::given(method("GET"))
        .and(path("/wiki/B"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>no title here</p>"))
        .mount(&server)
        .await;
    mount_article(&server, "C", &["Gamma."]).await;

    let tmp = TempDir::new().unwrap();
    let mut opts = options("X", tmp.path());
    opts.failure_policy = FailurePolicy::KeepGoing;

    let report = crawl(&mock_config(&server), opts)
        .await
        .expect("Keep-going crawl must not abort");

    assert_eq!(file_names(tmp.path()), vec!["A.txt", "C.txt"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].article, "/wiki/B");
    assert!(report.failures[0].message.contains("title"));
    assert!(!report.is_complete());
}

#[tokio::test]
async fn test_turkish_edition_uses_localized_namespace() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        "/wiki/Kategori:Filmler",
        &["/wiki/Alacakaranl%C4%B1k_(film)"],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/pdf/Alacakaranl%C4%B1k_(film)"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF tr".to_vec()))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let mut opts = options("Filmler", tmp.path());
    opts.language = "tr".to_string();
    opts.mode = OutputMode::Pdf;

    crawl(&mock_config(&server), opts)
        .await
        .expect("Crawl failed");

    assert_eq!(
        std::fs::read(tmp.path().join("PDF").join("Alacakaranlık_(film).pdf")).unwrap(),
        b"%PDF tr"
    );
}

#[tokio::test]
async fn test_configured_strip_classes_apply() {
    let server = MockServer::start().await;
    mount_listing(&server, "/wiki/Category:X", &["/wiki/Refs"]).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Refs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><title>Refs</title></head><body>
            <p>Body.</p><div class="reflist"><p>[1] Citation.</p></div>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    let mut config = mock_config(&server);
    config.extraction.strip_classes.push("reflist".to_string());

    let tmp = TempDir::new().unwrap();
    crawl(&config, options("X", tmp.path()))
        .await
        .expect("Crawl failed");

    assert_eq!(
        std::fs::read_to_string(tmp.path().join("Refs.txt")).unwrap(),
        "Body."
    );
}

#[tokio::test]
async fn test_cli_exit_codes() {
    let server = MockServer::start().await;
    mount_listing(&server, "/wiki/Category:X", &["/wiki/A"]).await;
    mount_article(&server, "A", &["Alpha."]).await;

    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("crawler.toml");
    std::fs::write(
        &config_path,
        format!(
            "[[language]]\ncode = \"en\"\nbase-url = \"{}\"\ncategory-namespace = \"Category\"\n",
            server.uri()
        ),
    )
    .unwrap();
    let output = tmp.path().join("out");

    let ok = {
        let config_path = config_path.clone();
        let output = output.clone();
        tokio::task::spawn_blocking(move || {
            Command::new(env!("CARGO_BIN_EXE_wiki-crawl"))
                .args(["-q", "-c", "X", "-o"])
                .arg(&output)
                .arg("--config")
                .arg(&config_path)
                .output()
                .unwrap()
        })
        .await
        .unwrap()
    };
    assert_eq!(ok.status.code(), Some(0));
    assert!(output.join("A.txt").is_file());

    let bad_config = tmp.path().join("broken.toml");
    std::fs::write(&bad_config, "this is not valid TOML {{{\n").unwrap();

    let failed = {
        let output = output.clone();
        tokio::task::spawn_blocking(move || {
            Command::new(env!("CARGO_BIN_EXE_wiki-crawl"))
                .args(["-q", "-c", "X", "-o"])
                .arg(&output)
                .arg("--config")
                .arg(&bad_config)
                .output()
                .unwrap()
        })
        .await
        .unwrap()
    };
    assert_eq!(failed.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&failed.stdout);
    assert_eq!(stdout.lines().count(), 1, "{stdout}");
    assert!(stdout.starts_with("Error: Configuration error: Failed to parse TOML"));

    let usage = tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_wiki-crawl"))
            .args(["-q", "-c", "X", "-o"])
            .arg(&output)
            .args(["--language", "xx"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();
    assert_eq!(usage.status.code(), Some(2));
    assert!(usage.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&usage.stderr);
    assert!(stderr.contains("invalid value 'xx' for '--language <LANGUAGE>'"), "{stderr}");
    assert!(stderr.contains("[possible values: en, tr]"), "{stderr}");
}
