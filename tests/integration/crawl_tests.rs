//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small catalog site and test the full
//! crawl cycle end-to-end over HTTP.

use rust_decimal::Decimal;
use shelf_scout::config::{ApiConfig, HttpConfig, UserAgentConfig};
use shelf_scout::crawler::{Coordinator, CrawlOptions, HttpFetcher};
use shelf_scout::output::{publish_records, OutputError};
use shelf_scout::{normalize_base_url, CategoryStatus, ListingRecord, ScrapeError};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRAVEL_PATH: &str = "/catalogue/category/books/travel_2/index.html";
const TRAVEL_PAGE_2_PATH: &str = "/catalogue/category/books/travel_2/page-2.html";
const MYSTERY_PATH: &str = "/catalogue/category/books/mystery_3/index.html";

const ROOT_PAGE: &str = r#"<html><body>
    <div class="side_categories"><ul>
        <li><a href="catalogue/category/books_1/index.html">Books</a>
            <ul>
                <li><a href="catalogue/category/books/travel_2/index.html"> Travel </a></li>
                <li><a href="catalogue/category/books/mystery_3/index.html">Mystery</a></li>
            </ul>
        </li>
    </ul></div>
</body></html>"#;

const TRAVEL_PAGE_1: &str = r#"<html><body><ol class="row">
    <li><article class="product_pod">
        <p class="star-rating Two"></p>
        <h3><a href="../../../its-only-the-himalayas_981/index.html" title="It's Only the Himalayas">It's Only...</a></h3>
        <p class="price_color">£45.17</p>
    </article></li>
    <li><article class="product_pod">
        <p class="star-rating Four"></p>
        <h3><a href="../../../full-moon-over-noahs-ark_811/index.html" title="Full Moon over Noah's Ark">Full Moon...</a></h3>
        <p class="price_color">£49.43</p>
    </article></li>
    <li><article class="product_pod">
        <h3><a href="../../../no-rating_1/index.html" title="No Rating">No Rating</a></h3>
        <p class="price_color">£10.00</p>
    </article></li>
</ol>
<ul class="pager"><li class="next"><a href="page-2.html">next</a></li></ul>
</body></html>"#;

const TRAVEL_PAGE_2: &str = r#"<html><body><ol class="row">
    <li><article class="product_pod">
        <p class="star-rating Five"></p>
        <h3><a href="../../../a-summer-in-europe_458/index.html" title="A Summer In Europe">A Summer...</a></h3>
        <p class="price_color">£1,044.34</p>
    </article></li>
</ol></body></html>"#;

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

async fn mount_site(server: &MockServer) {
    mount_page(server, "/", ROOT_PAGE).await;
    mount_page(server, TRAVEL_PATH, TRAVEL_PAGE_1).await;
    mount_page(server, TRAVEL_PAGE_2_PATH, TRAVEL_PAGE_2).await;
}

fn coordinator(server: &MockServer) -> Coordinator {
    let base_url = normalize_base_url(&server.uri()).unwrap();
    let fetcher =
        HttpFetcher::from_config(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
    Coordinator::new(base_url, fetcher)
}

#[tokio::test]
async fn test_full_crawl_follows_pagination() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let records = coordinator(&server).crawl(&["travel"]).await.unwrap();

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "It's Only the Himalayas",
            "Full Moon over Noah's Ark",
            "A Summer In Europe"
        ]
    );

    let first = &records[0];
    assert_eq!(first.price, Decimal::new(4517, 2));
    assert_eq!(first.rating, 2);
    assert_eq!(first.category, "travel");
    assert_eq!(
        first.url,
        format!("{}/catalogue/its-only-the-himalayas_981/index.html", server.uri())
    );

    assert_eq!(records[2].price, Decimal::new(104434, 2));
    assert_eq!(records[2].rating, 5);
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "shelf-scout/1.0"))
        .respond_with(html(ROOT_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let map = coordinator(&server).discover_categories().await.unwrap();

    assert_eq!(map.len(), 2);
    assert!(map.contains("MYSTERY"));
    assert!(!map.contains("Books"));
}

#[tokio::test]
async fn test_report_covers_every_requested_category() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    Mock::given(method("GET"))
        .and(path(MYSTERY_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let report = coordinator(&server)
        .crawl_report(&["Mystery", "Cooking", "Travel"])
        .await
        .unwrap();

    assert_eq!(report.records.len(), 3);
    assert!(report.records.iter().all(|r| r.category == "Travel"));

    let statuses: Vec<&CategoryStatus> = report.categories.iter().map(|c| &c.status).collect();
    assert!(matches!(
        statuses[0],
        CategoryStatus::FetchFailed { url, .. } if url.ends_with(MYSTERY_PATH)
    ));
    assert_eq!(statuses[1], &CategoryStatus::NotFound);
    assert_eq!(statuses[2], &CategoryStatus::Completed);

    let travel = &report.categories[2];
    assert_eq!(travel.pages_fetched, 2);
    assert_eq!(travel.skipped_entries, 1);
}

#[tokio::test]
async fn test_failure_on_later_page_keeps_earlier_records() {
    let server = MockServer::start().await;
    mount_page(&server, "/", ROOT_PAGE).await;
    mount_page(&server, TRAVEL_PATH, TRAVEL_PAGE_1).await;
    Mock::given(method("GET"))
        .and(path(TRAVEL_PAGE_2_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let report = coordinator(&server).crawl_report(&["Travel"]).await.unwrap();

    assert_eq!(report.records.len(), 2);
    assert!(matches!(
        report.categories[0].status,
        CategoryStatus::FetchFailed { .. }
    ));
}

#[tokio::test]
async fn test_root_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TRAVEL_PATH))
        .respond_with(html(TRAVEL_PAGE_1))
        .expect(0)
        .mount(&server)
        .await;

    let result = coordinator(&server).crawl(&["Travel"]).await;

    match result {
        Err(ScrapeError::Discovery { source, .. }) => assert_eq!(source.status(), Some(500)),
        other => panic!("expected discovery failure, got {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn test_page_limit_stops_category() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let report = coordinator(&server)
        .with_options(CrawlOptions {
            max_pages_per_category: 1,
        })
        .crawl_report(&["Travel"])
        .await
        .unwrap();

    assert_eq!(report.records.len(), 2);
    assert_eq!(
        report.categories[0].status,
        CategoryStatus::PageLimitReached { limit: 1 }
    );
}

fn sample_records() -> Vec<ListingRecord> {
    (1..=7)
        .map(|i| ListingRecord {
            title: format!("Book {}", i),
            price: Decimal::new(1000 + i, 2),
            rating: 3,
            category: "Travel".to_string(),
            url: format!("https://books.toscrape.com/catalogue/book_{}/index.html", i),
        })
        .collect()
}

fn api(server: &MockServer, timeout_seconds: u64) -> ApiConfig {
    ApiConfig {
        endpoint: format!("{}/ingest", server.uri()),
        timeout_seconds,
        enabled: true,
    }
}

#[tokio::test]
async fn test_publish_posts_json_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let records = sample_records();
    let receipt = publish_records(&reqwest::Client::new(), &api(&server, 5), &records)
        .await
        .unwrap();

    assert_eq!(receipt.status, 201);
    assert!(receipt.is_success());
    assert_eq!(receipt.count, 7);
    assert_eq!(
        receipt.sample_titles,
        vec!["Book 1", "Book 2", "Book 3", "Book 4", "Book 5"]
    );

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let sent = body.as_array().unwrap();
    assert_eq!(sent.len(), 7);
    assert_eq!(sent[0]["title"], "Book 1");
    assert_eq!(sent[0]["category"], "Travel");
}

#[tokio::test]
async fn test_publish_reports_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let receipt = publish_records(&reqwest::Client::new(), &api(&server, 5), &[])
        .await
        .unwrap();

    assert_eq!(receipt.status, 500);
    assert!(!receipt.is_success());
    assert!(receipt.sample_titles.is_empty());
}

#[tokio::test]
async fn test_publish_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let result = publish_records(&reqwest::Client::new(), &api(&server, 1), &sample_records()).await;

    assert!(matches!(result, Err(OutputError::Publish { .. })));
}
