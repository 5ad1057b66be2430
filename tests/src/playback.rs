use crate::harness::{configure_swapi, expect_status, mock_client};
use swapi_mock::{InteractionMode, MockConfiguration, MockRule, TestSession};

fn playback(markdown_path: &str) -> MockConfiguration {
    let mut config = MockConfiguration::with_markdown(InteractionMode::Playback, markdown_path);
    configure_swapi(&mut config);
    config
}

#[test]
fn mismatched_request_fails_the_session() {
    let session = TestSession::before_test(playback("playback_data/list_people.md")).unwrap();

    expect_status(mock_client().list_films(), 500);

    match session.finish() {
        Err(swapi_mock::Error::PlaybackMismatch {
            interaction_number,
            uri,
            recorded_uri,
            ..
        }) => {
            assert_eq!(interaction_number, 0);
            assert_eq!(uri, "/api/films/");
            assert_eq!(recorded_uri, "/api/people/");
        }
        other => panic!("Expected a playback mismatch, got {:?}", other),
    }
}

#[test]
fn extra_request_fails_the_session() {
    let session = TestSession::before_test(playback("playback_data/person_not_found.md")).unwrap();

    expect_status(mock_client().get_person(12345), 404);
    expect_status(mock_client().get_person(12345), 500);

    match session.finish() {
        Err(swapi_mock::Error::PlaybackExhausted { recorded, .. }) => assert_eq!(recorded, 1),
        other => panic!("Expected the playback to run out, got {:?}", other),
    }
}

#[test]
fn mock_rule_answers_before_the_fixture() {
    let session = TestSession::before_test(playback("playback_data/list_people.md")).unwrap();
    {
        let _forbidden = session
            .mock(MockRule::get("/api/people/").reply(403, "{}"))
            .unwrap();

        expect_status(mock_client().list_people(), 403);
    }

    assert!(mock_client().list_people().unwrap().count >= 1);
    session.finish().unwrap();
}

#[test]
fn playback_mutations_reach_the_client() {
    let mut config = playback("playback_data/search_luke_skywalker.md");
    config.add_playback_response_mutations(|m| {
        m.body_replace("https://swapi.dev/api", "http://swapi.test/api")
    });
    let session = TestSession::before_test(config).unwrap();

    let page = mock_client().search_people("Luke Skywalker").unwrap();

    let luke = page.first().unwrap();
    assert_eq!(luke.url, "http://swapi.test/api/people/1/");
    assert_eq!(luke.homeworld, "http://swapi.test/api/planets/1/");
    assert!(luke
        .films
        .iter()
        .all(|film| film.starts_with("http://swapi.test/api/films/")));
    session.finish().unwrap();
}

#[test]
fn missing_fixture_fails_the_session() {
    let session = TestSession::before_test(playback("playback_data/missing.md")).unwrap();

    expect_status(mock_client().list_people(), 500);

    assert!(matches!(
        session.finish(),
        Err(swapi_mock::Error::InteractionManager(_))
    ));
}
