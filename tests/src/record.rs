use crate::harness::{configure_swapi, expect_status, mock_client, RECORD_DOMAIN};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::{
    path::Path,
    sync::{Arc, Mutex},
};
use swapi_mock::{
    markdown::load_markdown, Headers, HttpClient, InteractionMode, MockConfiguration, RequestData,
    ResponseData, TestSession,
};

/// Answers every forwarded request with the same response and keeps what it was sent.
#[derive(Debug)]
struct FakeUpstream {
    response: ResponseData,
    received: Mutex<Vec<(String, RequestData)>>,
}

impl FakeUpstream {
    fn new(status_code: u16, body: &str) -> Arc<Self> {
        let mut headers = Headers::new();
        headers.insert("content-type".into(), "application/json".into());
        headers.insert("date".into(), "Sun, 18 Oct 2026 10:00:00 GMT".into());
        headers.insert("etag".into(), "\"5d41402a\"".into());
        headers.insert("server".into(), "nginx/1.16.1".into());
        headers.insert("x-frame-options".into(), "SAMEORIGIN".into());

        Arc::new(Self {
            response: ResponseData {
                status_code,
                headers,
                body: body.into(),
            },
            received: Mutex::new(Vec::new()),
        })
    }

    fn received(&self) -> Vec<(String, RequestData)> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for FakeUpstream {
    async fn make_request(
        &self,
        domain_name: &str,
        request_data: &RequestData,
    ) -> Result<ResponseData, swapi_mock::Error> {
        self.received
            .lock()
            .unwrap()
            .push((domain_name.to_owned(), request_data.clone()));

        Ok(self.response.clone())
    }
}

fn record(path: &Path, upstream: &Arc<FakeUpstream>, fail_if_changed: bool) -> MockConfiguration {
    let mut config = MockConfiguration::with_markdown(InteractionMode::Record, path);
    configure_swapi(&mut config);
    config.set_http_client(upstream.clone());
    config.set_fail_if_markdown_changed(fail_if_changed);
    config
}

fn playback(path: &Path) -> MockConfiguration {
    let mut config = MockConfiguration::with_markdown(InteractionMode::Playback, path);
    configure_swapi(&mut config);
    config
}

#[test]
fn recorded_fixture_is_scrubbed_and_plays_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("person_not_found.md");
    let upstream = FakeUpstream::new(404, r#"{"detail":"Not found"}"#);

    let session = TestSession::before_test(record(&path, &upstream, false)).unwrap();
    expect_status(mock_client().get_person(12345), 404);
    session.finish().unwrap();

    let received = upstream.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, RECORD_DOMAIN);
    assert_eq!(received[0].1.method, "GET");
    assert_eq!(received[0].1.uri, "/api/people/12345/");
    assert!(!received[0].1.headers.contains_key("host"));

    let recorded = load_markdown(&path).unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].request_data.uri, "/api/people/12345/");
    assert!(!recorded[0].request_data.headers.contains_key("host"));
    assert_eq!(recorded[0].response_data.status_code, 404);
    assert_eq!(recorded[0].response_data.body, r#"{"detail":"Not found"}"#);
    let names: Vec<_> = recorded[0]
        .response_data
        .headers
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(names, vec!["content-type"]);

    let session = TestSession::before_test(playback(&path)).unwrap();
    expect_status(mock_client().get_person(12345), 404);
    session.finish().unwrap();

    assert_eq!(upstream.received().len(), 1);
}

#[test]
fn rerecording_checks_the_stored_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("person_not_found.md");
    let upstream = FakeUpstream::new(404, r#"{"detail":"Not found"}"#);

    let session = TestSession::before_test(record(&path, &upstream, false)).unwrap();
    expect_status(mock_client().get_person(12345), 404);
    session.finish().unwrap();

    let session = TestSession::before_test(record(&path, &upstream, true)).unwrap();
    expect_status(mock_client().get_person(12345), 404);
    session.finish().unwrap();

    let changed = FakeUpstream::new(404, r#"{"detail":"Gone"}"#);
    let session = TestSession::before_test(record(&path, &changed, true)).unwrap();
    expect_status(mock_client().get_person(12345), 404);

    match session.finish() {
        Err(error @ swapi_mock::Error::MarkdownDataChanged(_)) => assert!(error
            .to_string()
            .contains("Interaction 0: Response bodies differ at line 1, column 12")),
        other => panic!("Expected the fixture check to fail, got {:?}", other),
    }

    let stored = load_markdown(&path).unwrap();
    assert_eq!(stored[0].response_data.body, r#"{"detail":"Not found"}"#);
}

#[test]
fn post_forwards_its_json_body() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("post_people.md");
    let upstream = FakeUpstream::new(405, r#"{"detail":"Method \"POST\" not allowed."}"#);

    let mut config = record(&path, &upstream, false);
    config.add_record_request_mutations(|m| m.add_header("X-Recorded-By", "swapi-tests"));

    let session = TestSession::before_test(config).unwrap();
    expect_status(
        mock_client().post("/people/", serde_json::json!({ "name": "Grogu" })),
        405,
    );
    session.finish().unwrap();

    let received = upstream.received();
    assert_eq!(received.len(), 1);
    let forwarded = &received[0].1;
    assert_eq!(forwarded.method, "POST");
    assert_eq!(forwarded.body, r#"{"name":"Grogu"}"#);
    assert_eq!(forwarded.headers["content-type"], "application/json");
    assert_eq!(forwarded.headers["x-recorded-by"], "swapi-tests");

    let recorded = load_markdown(&path).unwrap();
    assert_eq!(recorded[0].request_data.body, r#"{"name":"Grogu"}"#);
    assert_eq!(recorded[0].request_data.headers["x-recorded-by"], "swapi-tests");
    assert_eq!(recorded[0].response_data.status_code, 405);
}
