use crate::{
    config::SwapiConfig,
    data::{Film, Page, Person},
    error::Error,
    request::{SwapiRequest, SwapiResponse},
};
use serde::de::DeserializeOwned;
use tracing::debug;

type ReqwestClient = reqwest::blocking::Client;

/// Builder used to build a SwapiClient instance
#[derive(Debug, Clone, Default)]
pub struct SwapiClientBuilder {
    base_url: Option<String>,
    http_client: Option<ReqwestClient>,
}

impl SwapiClientBuilder {
    /// Create a new SwapiClientBuilder instance.
    pub fn new() -> Self {
        Self {
            base_url: None,
            http_client: None,
        }
    }

    /// Use the given base URL when building a SwapiClient instance.
    ///
    /// # Arguments
    /// `base_url` - the URL every request path is appended to, e.g. `https://swapi.dev/api`.
    ///
    /// # Returns
    /// This builder.
    pub fn with_base_url<T: Into<String>>(mut self, base_url: T) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Take the base URL from a loaded configuration.
    pub fn with_config(self, config: SwapiConfig) -> Self {
        self.with_base_url(config.base_url)
    }

    /// Use the given blocking reqwest client when building a SwapiClient instance.
    ///
    /// # Arguments
    /// `client` - a pre-configured blocking reqwest client.
    ///
    /// # Returns
    /// This builder.
    pub fn with_http_client(mut self, client: ReqwestClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Consume the builder and create a SwapiClient instance using all of the previously configured values or
    /// their defaults.
    ///
    /// # Returns
    /// A SwapiClient instance.
    pub fn build(mut self) -> SwapiClient {
        let base_url = self
            .base_url
            .take()
            .unwrap_or_else(|| SwapiConfig::default().base_url);

        SwapiClient {
            http: self.http_client.take().unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

/// Struct that represents a Star Wars API client.
///
/// Every call is a single attempt. Non-success statuses come back as
/// [`Error::Status`], whether the answer came from the real service or a mock.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    http: ReqwestClient,
    base_url: String,
}

impl SwapiClient {
    /// Create a SwapiClient for the default base URL with the default reqwest client.
    pub fn new() -> Self {
        SwapiClientBuilder::new().build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists the first page of characters.
    pub fn list_people(&self) -> Result<Page<Person>, Error> {
        self.fetch(&SwapiRequest::get("/people/"))
    }

    /// Searches characters by (partial) name.
    pub fn search_people<T: AsRef<str>>(&self, name: T) -> Result<Page<Person>, Error> {
        self.fetch(&SwapiRequest::get("/people/").query("search", name.as_ref()))
    }

    pub fn get_person(&self, id: u32) -> Result<Person, Error> {
        self.fetch(&SwapiRequest::get(format!("/people/{}/", id)))
    }

    /// Lists the first page of films.
    pub fn list_films(&self) -> Result<Page<Film>, Error> {
        self.fetch(&SwapiRequest::get("/films/"))
    }

    /// Searches films by (partial) title.
    pub fn search_films<T: AsRef<str>>(&self, title: T) -> Result<Page<Film>, Error> {
        self.fetch(&SwapiRequest::get("/films/").query("search", title.as_ref()))
    }

    pub fn get_film(&self, id: u32) -> Result<Film, Error> {
        self.fetch(&SwapiRequest::get(format!("/films/{}/", id)))
    }

    /// GETs an arbitrary path below the base URL.
    pub fn get<T: AsRef<str>>(&self, path: T) -> Result<SwapiResponse, Error> {
        self.execute(&SwapiRequest::get(path.as_ref()))
    }

    /// POSTs a JSON body to an arbitrary path below the base URL.
    pub fn post<T: AsRef<str>>(
        &self,
        path: T,
        body: serde_json::Value,
    ) -> Result<SwapiResponse, Error> {
        self.execute(&SwapiRequest::post(path.as_ref(), body))
    }

    /// Sends the request once and returns the response if its status is a success.
    pub fn execute(&self, request: &SwapiRequest) -> Result<SwapiResponse, Error> {
        let url = self.url(&request.path);
        let mut builder = self.http.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text()?;

        debug!(method = %request.method, %url, status = status.as_u16(), "swapi response");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url,
                body,
            });
        }

        Ok(SwapiResponse {
            status: status.as_u16(),
            body,
        })
    }

    fn fetch<T: DeserializeOwned>(&self, request: &SwapiRequest) -> Result<T, Error> {
        self.execute(request)?.json()
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for SwapiClient {
    fn default() -> Self {
        Self::new()
    }
}
