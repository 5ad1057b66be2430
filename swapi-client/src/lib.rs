//! Blocking client for the Star Wars API (<https://swapi.dev>).

mod config;
mod data;
mod error;
mod request;
mod swapi_client;

pub use config::{SwapiConfig, BASE_URL_VAR, DEFAULT_BASE_URL};
pub use data::{Film, Page, Person};
pub use error::Error;
pub use request::{SwapiRequest, SwapiResponse};
pub use swapi_client::{SwapiClient, SwapiClientBuilder};
