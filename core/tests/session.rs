#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use pretty_assertions::assert_eq;
use typeahead_core::FetchStatus;
use typeahead_core::ResultSink;
use typeahead_core::SuggestConfig;
use typeahead_core::create_session;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

#[derive(Default)]
struct RecordingSink {
    statuses: Mutex<Vec<FetchStatus>>,
    results: Mutex<Vec<Vec<String>>>,
    chosen: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn statuses(&self) -> Vec<FetchStatus> {
        self.statuses.lock().unwrap().clone()
    }

    fn results(&self) -> Vec<Vec<String>> {
        self.results.lock().unwrap().clone()
    }

    fn chosen(&self) -> Vec<String> {
        self.chosen.lock().unwrap().clone()
    }

    async fn wait_for_results(&self, min_len: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.results().len() >= min_len {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl ResultSink for RecordingSink {
    fn on_status(&self, status: FetchStatus) {
        self.statuses.lock().unwrap().push(status);
    }

    fn on_results(&self, suggestions: &[String]) {
        self.results.lock().unwrap().push(suggestions.to_vec());
    }

    fn on_suggestion_chosen(&self, text: &str) {
        self.chosen.lock().unwrap().push(text.to_string());
    }
}

fn config_for(server: &MockServer) -> SuggestConfig {
    SuggestConfig {
        endpoint: format!("{}/complete/search", server.uri()),
        quiet_period: Duration::from_millis(50),
        ..Default::default()
    }
}

#[tokio::test]
async fn burst_of_input_produces_one_fetch_for_the_last_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/complete/search"))
        .and(query_param("q", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<toplevel><suggestion data="rust lang"/><suggestion data="rust book"/></toplevel>"#,
        ))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let session = create_session(config_for(&server), sink.clone()).expect("session");

    session.on_input("r");
    session.on_input("ru");
    session.on_input("rust");

    assert!(
        sink.wait_for_results(1, Duration::from_secs(3)).await,
        "timed out waiting for results"
    );
    assert_eq!(
        sink.results(),
        vec![vec!["rust lang".to_string(), "rust book".to_string()]]
    );
    assert_eq!(sink.statuses(), vec![FetchStatus::Working]);

    // Only the settled text was ever fetched.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn newer_input_suppresses_the_stale_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/complete/search"))
        .and(query_param("q", "first"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<suggestion data="alpha"/>"#)
                .set_delay(Duration::from_millis(1000)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/complete/search"))
        .and(query_param("q", "second"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<suggestion data="beta"/>"#))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let session = create_session(config_for(&server), sink.clone()).expect("session");

    session.on_input("first");
    // Let "first" settle and its slow fetch start, then supersede it.
    tokio::time::sleep(Duration::from_millis(200)).await;
    session.on_input("second");

    assert!(
        sink.wait_for_results(1, Duration::from_secs(5)).await,
        "timed out waiting for the fresh result"
    );
    assert_eq!(sink.results(), vec![vec!["beta".to_string()]]);

    // Even once the slow fetch finishes, its result must never surface.
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(sink.results(), vec![vec!["beta".to_string()]]);
}

#[tokio::test]
async fn blank_input_never_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<toplevel/>"))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let session = create_session(config_for(&server), sink.clone()).expect("session");

    session.on_input("");
    session.on_input("   ");
    tokio::time::sleep(Duration::from_millis(300)).await;

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "blank input must not hit the network");
    assert_eq!(sink.statuses(), Vec::new());
    assert_eq!(sink.results(), Vec::<Vec<String>>::new());
}

#[tokio::test]
async fn dropping_the_session_suppresses_a_fetch_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<suggestion data="late"/>"#)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let session = create_session(config_for(&server), sink.clone()).expect("session");

    session.on_input("rust");
    tokio::time::sleep(Duration::from_millis(200)).await;
    drop(session);

    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(sink.results(), Vec::<Vec<String>>::new());
}

#[tokio::test]
async fn choose_forwards_the_literal_text_to_the_sink() {
    let server = MockServer::start().await;
    let sink = Arc::new(RecordingSink::default());
    let session = create_session(config_for(&server), sink.clone()).expect("session");

    session.choose("rust lang");

    assert_eq!(sink.chosen(), vec!["rust lang".to_string()]);
}
