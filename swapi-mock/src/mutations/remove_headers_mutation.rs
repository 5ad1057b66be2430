use super::HeadersMutation;
use crate::data::Headers;
use regex::Regex;

#[derive(Debug)]
pub struct RemoveHeadersMutation {
    headers: Vec<String>,
}

impl RemoveHeadersMutation {
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(headers: I) -> Self {
        Self {
            headers: headers
                .into_iter()
                .map(|e| e.into().to_lowercase())
                .collect(),
        }
    }
}

impl HeadersMutation for RemoveHeadersMutation {
    fn mutate(&self, headers: &mut Headers) {
        headers.retain(|name, _| !self.headers.contains(&name.to_lowercase()));
    }
}

/// Removes every header whose name matches one of the patterns.
#[derive(Debug)]
pub struct RemoveHeadersRegexMutation {
    patterns: Vec<Regex>,
}

impl RemoveHeadersRegexMutation {
    pub fn new<I: IntoIterator<Item = Regex>>(patterns: I) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }
}

impl HeadersMutation for RemoveHeadersRegexMutation {
    fn mutate(&self, headers: &mut Headers) {
        headers.retain(|name, _| !self.patterns.iter().any(|pattern| pattern.is_match(name)));
    }
}
