mod add_header_mutation;
mod body_replace_mutation;
mod remove_headers_mutation;

use crate::data::{Headers, RequestData, ResponseData};
use add_header_mutation::AddHeaderMutation;
use body_replace_mutation::BodyReplaceMutation;
use regex::Regex;
use remove_headers_mutation::{RemoveHeadersMutation, RemoveHeadersRegexMutation};
use std::fmt::Debug;

pub trait BodyMutation: Debug {
    fn mutate(&self, body: &mut String);
}

pub trait HeadersMutation: Debug {
    fn mutate(&self, headers: &mut Headers);
}

#[derive(Debug)]
enum Mutation {
    Body(Box<dyn BodyMutation + Send + Sync>),
    Headers(Box<dyn HeadersMutation + Send + Sync>),
}

impl Mutation {
    fn apply(&self, headers: &mut Headers, body: &mut String) {
        match self {
            Mutation::Headers(mutation) => mutation.mutate(headers),
            Mutation::Body(mutation) => mutation.mutate(body),
        }
    }
}

/// An ordered list of header and body rewrites.
#[derive(Debug, Default)]
pub struct Mutations {
    mutations: Vec<Mutation>,
}

impl Mutations {
    pub fn apply_to_request(&self, request_data: &mut RequestData) {
        for mutation in &self.mutations {
            mutation.apply(&mut request_data.headers, &mut request_data.body);
        }
    }

    pub fn apply_to_response(&self, response_data: &mut ResponseData) {
        for mutation in &self.mutations {
            mutation.apply(&mut response_data.headers, &mut response_data.body);
        }
    }

    fn extend(&mut self, builder: MutationsBuilder) {
        self.mutations.extend(builder.mutations);
    }
}

/// Collects header and body rewrites applied to recorded or replayed traffic.
#[derive(Debug, Default)]
pub struct MutationsBuilder {
    mutations: Vec<Mutation>,
}

impl MutationsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove_headers<S: Into<String>, I: IntoIterator<Item = S>>(
        &mut self,
        headers: I,
    ) -> &mut Self {
        self.add_headers_mutation(RemoveHeadersMutation::new(headers))
    }

    pub fn remove_headers_regex<I: IntoIterator<Item = Regex>>(
        &mut self,
        patterns: I,
    ) -> &mut Self {
        self.add_headers_mutation(RemoveHeadersRegexMutation::new(patterns))
    }

    pub fn add_header<S1: Into<String>, S2: Into<String>>(
        &mut self,
        header_name: S1,
        header_value: S2,
    ) -> &mut Self {
        self.add_headers_mutation(AddHeaderMutation::new(header_name, header_value))
    }

    pub fn body_replace<S1: Into<String>, S2: Into<String>>(
        &mut self,
        text: S1,
        replacement: S2,
    ) -> &mut Self {
        self.add_body_mutation(BodyReplaceMutation::text(text, replacement))
    }

    pub fn body_replace_regex<S: Into<String>>(
        &mut self,
        pattern: Regex,
        replacement: S,
    ) -> &mut Self {
        self.add_body_mutation(BodyReplaceMutation::regex(pattern, replacement))
    }

    pub fn add_headers_mutation<HM: HeadersMutation + Send + Sync + 'static>(
        &mut self,
        mutation: HM,
    ) -> &mut Self {
        self.mutations.push(Mutation::Headers(Box::new(mutation)));
        self
    }

    pub fn add_body_mutation<BM: BodyMutation + Send + Sync + 'static>(
        &mut self,
        mutation: BM,
    ) -> &mut Self {
        self.mutations.push(Mutation::Body(Box::new(mutation)));
        self
    }

    pub(crate) fn build_into(
        func: impl FnOnce(&mut MutationsBuilder) -> &mut MutationsBuilder,
        mutations: &mut Mutations,
    ) {
        let mut builder = MutationsBuilder::new();
        let _ = func(&mut builder);
        mutations.extend(builder);
    }
}
