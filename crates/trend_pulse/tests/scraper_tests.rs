use std::time::Duration;

use trend_pulse::{
    source::{
        scraper::{PageScraper, DEFAULT_USER_AGENT},
        PageFetcher,
    },
    Error, TrendingProcessorBuilder,
};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const TRENDING_HTML: &str = include_str!("fixtures/trending.html");

async fn serve(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trending"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_fetches_body_with_browser_user_agent() {
    // the `header` matcher splits values on commas, which the UA contains,
    // so the raw header is checked on the recorded request instead
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trending"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRENDING_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = PageScraper::with_defaults().unwrap();
    let doc = scraper
        .fetch_page(&format!("{}/trending", server.uri()))
        .await
        .expect("fetch should succeed");

    assert_eq!(doc.as_str(), TRENDING_HTML);

    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert_eq!(requests.len(), 1, "exactly one request, no retries");
    let user_agent = requests[0]
        .headers
        .get("user-agent")
        .and_then(|value| value.to_str().ok());
    assert_eq!(user_agent, Some(DEFAULT_USER_AGENT));
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = serve(ResponseTemplate::new(503)).await;

    let scraper = PageScraper::with_defaults().unwrap();
    let result = scraper
        .fetch_page(&format!("{}/trending", server.uri()))
        .await;

    match result {
        Err(Error::Status { status, .. }) => assert_eq!(status.as_u16(), 503),
        other => panic!("expected status error, got {:?}", other.map(|d| d.len())),
    }
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = serve(
        ResponseTemplate::new(200)
            .set_body_string(TRENDING_HTML)
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let scraper = PageScraper::new(Duration::from_millis(200), DEFAULT_USER_AGENT).unwrap();
    let result = scraper
        .fetch_page(&format!("{}/trending", server.uri()))
        .await;

    assert!(
        matches!(result, Err(Error::Timeout { .. })),
        "expected timeout, got {:?}",
        result.map(|d| d.len())
    );
}

#[tokio::test]
async fn test_unreachable_host_is_a_request_error() {
    let scraper = PageScraper::new(Duration::from_secs(2), DEFAULT_USER_AGENT).unwrap();
    let result = scraper.fetch_page("http://127.0.0.1:1/trending").await;

    assert!(matches!(result, Err(Error::Request { .. })));
}

#[tokio::test]
async fn test_pipeline_over_http() {
    let server = serve(ResponseTemplate::new(200).set_body_string(TRENDING_HTML)).await;
    let url = format!("{}/trending", server.uri());

    let state = TrendingProcessorBuilder::new(&url)
        .fetcher(PageScraper::with_defaults().unwrap())
        .build()
        .run()
        .await;

    assert!(state.error().is_none(), "Unexpected error: {:?}", state.error());
    assert_eq!(state.videos().len(), 19);
    assert!(state.videos()[0].video_url.starts_with(&server.uri()));
}

#[tokio::test]
async fn test_pipeline_reports_http_status_error() {
    let server = serve(ResponseTemplate::new(404)).await;
    let url = format!("{}/trending", server.uri());

    let state = TrendingProcessorBuilder::new(&url)
        .fetcher(PageScraper::with_defaults().unwrap())
        .build()
        .run()
        .await;

    let error = state.error().expect("status error should be recorded");
    assert!(error.contains("404"), "got: {error}");
    assert!(state.videos().is_empty());
    assert!(state.timestamp().is_some());
}
