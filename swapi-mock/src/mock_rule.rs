use crate::data::{Headers, RequestData, ResponseData};

/// A canned response for one method and path.
///
/// The query string of incoming requests is ignored unless the rule's own
/// path carries one, in which case the whole URI has to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRule {
    method: String,
    path: String,
    status_code: u16,
    headers: Headers,
    body: String,
}

impl MockRule {
    pub fn new<M: Into<String>, P: Into<String>>(method: M, path: P) -> Self {
        let mut headers = Headers::new();
        headers.insert("content-type".into(), "application/json".into());

        Self {
            method: method.into().to_uppercase(),
            path: path.into(),
            status_code: 200,
            headers,
            body: "{}".into(),
        }
    }

    pub fn get<P: Into<String>>(path: P) -> Self {
        Self::new("GET", path)
    }

    pub fn post<P: Into<String>>(path: P) -> Self {
        Self::new("POST", path)
    }

    pub fn reply<S: Into<String>>(mut self, status_code: u16, body: S) -> Self {
        self.status_code = status_code;
        self.body = body.into();
        self
    }

    pub fn with_header<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn matches(&self, request: &RequestData) -> bool {
        if !self.method.eq_ignore_ascii_case(&request.method) {
            return false;
        }

        if self.path.contains('?') {
            self.path == request.uri
        } else {
            self.path == request.path()
        }
    }

    pub(crate) fn response(&self) -> ResponseData {
        ResponseData {
            status_code: self.status_code,
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }
}
