use crate::harness::{configure_swapi, expect_status, live_client, mock_client};
use pretty_assertions::assert_eq;
use swapi_client::{Page, Person, SwapiClient};
use swapi_mock::{swapi_playback_test, swapi_record_test};

#[test]
#[cfg_attr(not(feature = "live"), ignore = "talks to the live service")]
fn lists_characters_direct() {
    lists_characters(live_client());
}

#[swapi_playback_test("playback_data/list_people.md", configure_swapi)]
fn lists_characters_playback() {
    lists_characters(mock_client());
}

#[swapi_record_test("playback_data/list_people.md", configure_swapi)]
fn lists_characters_record() {
    lists_characters(mock_client());
}

fn lists_characters(swapi: SwapiClient) {
    let response = swapi.get("/people/").unwrap();
    assert_eq!(response.status, 200);

    let page: Page<Person> = response.json().unwrap();
    assert!(!page.is_empty());
    assert!(page.count >= 1);
}

#[test]
#[cfg_attr(not(feature = "live"), ignore = "talks to the live service")]
fn finds_luke_skywalker_direct() {
    finds_luke_skywalker(live_client());
}

#[swapi_playback_test("playback_data/search_luke_skywalker.md", configure_swapi)]
fn finds_luke_skywalker_playback() {
    finds_luke_skywalker(mock_client());
}

#[swapi_record_test("playback_data/search_luke_skywalker.md", configure_swapi)]
fn finds_luke_skywalker_record() {
    finds_luke_skywalker(mock_client());
}

fn finds_luke_skywalker(swapi: SwapiClient) {
    let page = swapi.search_people("Luke Skywalker").unwrap();

    assert_eq!(page.count, 1);
    let luke = page.first().unwrap();
    assert_eq!(luke.name, "Luke Skywalker");
    assert_eq!(luke.films.len(), 4);
}

#[test]
#[cfg_attr(not(feature = "live"), ignore = "talks to the live service")]
fn unknown_character_search_is_empty_direct() {
    unknown_character_search_is_empty(live_client());
}

#[swapi_playback_test("playback_data/search_unknown_character.md", configure_swapi)]
fn unknown_character_search_is_empty_playback() {
    unknown_character_search_is_empty(mock_client());
}

#[swapi_record_test("playback_data/search_unknown_character.md", configure_swapi)]
fn unknown_character_search_is_empty_record() {
    unknown_character_search_is_empty(mock_client());
}

fn unknown_character_search_is_empty(swapi: SwapiClient) {
    let page = swapi.search_people("NonExistentCharacter123").unwrap();

    assert_eq!(page.count, 0);
    assert!(page.is_empty());
}

#[test]
#[cfg_attr(not(feature = "live"), ignore = "talks to the live service")]
fn invalid_endpoint_is_not_found_direct() {
    invalid_endpoint_is_not_found(live_client());
}

#[swapi_playback_test("playback_data/people_invalid_endpoint.md", configure_swapi)]
fn invalid_endpoint_is_not_found_playback() {
    invalid_endpoint_is_not_found(mock_client());
}

#[swapi_record_test("playback_data/people_invalid_endpoint.md", configure_swapi)]
fn invalid_endpoint_is_not_found_record() {
    invalid_endpoint_is_not_found(mock_client());
}

fn invalid_endpoint_is_not_found(swapi: SwapiClient) {
    expect_status(swapi.get("/invalid-endpoint"), 404);
}

#[test]
#[cfg_attr(not(feature = "live"), ignore = "talks to the live service")]
fn invalid_character_id_is_not_found_direct() {
    invalid_character_id_is_not_found(live_client());
}

#[swapi_playback_test("playback_data/person_not_found.md", configure_swapi)]
fn invalid_character_id_is_not_found_playback() {
    invalid_character_id_is_not_found(mock_client());
}

#[swapi_record_test("playback_data/person_not_found.md", configure_swapi)]
fn invalid_character_id_is_not_found_record() {
    invalid_character_id_is_not_found(mock_client());
}

fn invalid_character_id_is_not_found(swapi: SwapiClient) {
    expect_status(swapi.get_person(12345), 404);
}

#[test]
#[cfg_attr(not(feature = "live"), ignore = "talks to the live service")]
fn post_is_not_allowed_direct() {
    post_is_not_allowed(live_client());
}

#[swapi_playback_test("playback_data/post_people.md", configure_swapi)]
fn post_is_not_allowed_playback() {
    post_is_not_allowed(mock_client());
}

#[swapi_record_test("playback_data/post_people.md", configure_swapi)]
fn post_is_not_allowed_record() {
    post_is_not_allowed(mock_client());
}

fn post_is_not_allowed(swapi: SwapiClient) {
    expect_status(swapi.post("/people/", serde_json::json!({})), 405);
}
