use std::collections::BTreeMap;

pub type Headers = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionData {
    pub interaction_number: usize,
    pub request_data: RequestData,
    pub response_data: ResponseData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestData {
    pub uri: String,
    pub method: String,
    pub headers: Headers,
    pub body: String,
}

impl RequestData {
    /// The request path without its query string.
    pub fn path(&self) -> &str {
        self.uri.split('?').next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseData {
    pub status_code: u16,
    pub headers: Headers,
    pub body: String,
}
