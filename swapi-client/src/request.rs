use crate::error::Error;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A single call to make: method, path below the base URL, query, optional
/// JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl SwapiRequest {
    pub fn new<P: Into<String>>(method: Method, path: P) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<P: Into<String>>(path: P) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post<P: Into<String>>(path: P, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn query<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A successful answer: status and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapiResponse {
    pub status: u16,
    pub body: String,
}

impl SwapiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
