use std::env;

pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";
pub const BASE_URL_VAR: &str = "SWAPI_BASE_URL";

/// Where the client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapiConfig {
    pub base_url: String,
}

impl SwapiConfig {
    /// Reads `SWAPI_BASE_URL`, loading a `.env` file first if there is one.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_var(env::var(BASE_URL_VAR).ok())
    }

    fn from_var(base_url: Option<String>) -> Self {
        match base_url {
            Some(base_url) if !base_url.trim().is_empty() => Self {
                base_url: base_url.trim().to_owned(),
            },
            _ => Self::default(),
        }
    }
}

impl Default for SwapiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}
