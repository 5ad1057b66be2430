//! A local stand-in for the Star Wars API.
//!
//! The server answers from mock rules registered by the running test, replays
//! recorded markdown fixtures, or records live traffic into new fixtures.

mod data;
mod error;
mod http_client;
mod interaction_manager;
mod logging;
pub mod markdown;
mod mock_configuration;
mod mock_rule;
mod mock_server;
pub mod mutations;
mod runner;
mod test_session;
mod util;

pub use data::{Headers, InteractionData, RequestData, ResponseData};
pub use error::{BoxedError, Error};
pub use http_client::{HttpClient, HyperHttpClient};
pub use interaction_manager::InteractionManager;
pub use logging::init_test_logging;
pub use markdown::MarkdownInteractionManager;
pub use mock_configuration::{InteractionMode, MockConfiguration};
pub use mock_rule::MockRule;
pub use runner::{base_url, port, DEFAULT_PORT};
pub use swapi_mock_codegen::{swapi_playback_test, swapi_record_test};
pub use test_session::{MockGuard, SessionGuard, TestSession};
