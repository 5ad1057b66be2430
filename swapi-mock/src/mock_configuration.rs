use crate::{
    http_client::{HttpClient, HyperHttpClient},
    interaction_manager::InteractionManager,
    markdown::MarkdownInteractionManager,
    mutations::{Mutations, MutationsBuilder},
};
use std::{path::PathBuf, sync::Arc};

/// What the server does with a request no mock rule answered.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InteractionMode {
    /// Replay the next interaction from the stored fixture.
    Playback,
    /// Forward to the real service and store the interaction.
    Record,
    /// Answer `404` like an interceptor with no matching handler.
    RulesOnly,
}

#[derive(Debug)]
pub struct MockConfiguration {
    domain_name: Option<String>,
    interaction_mode: InteractionMode,
    fail_if_markdown_changed: bool,
    interaction_manager: Option<Arc<dyn InteractionManager + Send + Sync>>,
    http_client: Option<Arc<dyn HttpClient + Send + Sync>>,
    record_request_mutations: Mutations,
    record_response_mutations: Mutations,
    playback_response_mutations: Mutations,
}

impl MockConfiguration {
    pub fn new(
        mode: InteractionMode,
        interaction_manager: Box<dyn InteractionManager + Send + Sync>,
    ) -> Self {
        Self {
            interaction_manager: Some(interaction_manager.into()),
            ..Self::rules_only()
        }
        .with_mode(mode)
    }

    /// Plays back or records the markdown fixture at `markdown_path`.
    pub fn with_markdown<P: Into<PathBuf>>(mode: InteractionMode, markdown_path: P) -> Self {
        Self::new(mode, Box::new(MarkdownInteractionManager::new(markdown_path)))
    }

    /// Only answers from mock rules registered on the session.
    pub fn rules_only() -> Self {
        Self {
            interaction_mode: InteractionMode::RulesOnly,
            domain_name: None,
            fail_if_markdown_changed: false,
            interaction_manager: None,
            http_client: None,
            record_request_mutations: Mutations::default(),
            record_response_mutations: Mutations::default(),
            playback_response_mutations: Mutations::default(),
        }
    }

    fn with_mode(mut self, mode: InteractionMode) -> Self {
        self.interaction_mode = mode;
        self
    }

    pub fn set_fail_if_markdown_changed(&mut self, value: bool) {
        self.fail_if_markdown_changed = value;
    }

    pub fn fail_if_markdown_changed(&self) -> bool {
        self.fail_if_markdown_changed
    }

    pub fn set_domain_name<S: Into<String>>(&mut self, domain_name: S) {
        self.domain_name = Some(domain_name.into());
    }

    pub fn domain_name(&self) -> Option<&str> {
        self.domain_name.as_deref()
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction_mode
    }

    pub fn interaction_manager(&self) -> Option<Arc<dyn InteractionManager + Send + Sync>> {
        self.interaction_manager.clone()
    }

    pub fn http_client(&self) -> Arc<dyn HttpClient + Send + Sync> {
        self.http_client
            .clone()
            .unwrap_or_else(|| Arc::new(HyperHttpClient::new()))
    }

    pub fn set_http_client(&mut self, http_client: Arc<dyn HttpClient + Send + Sync>) {
        self.http_client = Some(http_client);
    }

    pub fn add_record_request_mutations<
        F: FnOnce(&mut MutationsBuilder) -> &mut MutationsBuilder,
    >(
        &mut self,
        func: F,
    ) {
        MutationsBuilder::build_into(func, &mut self.record_request_mutations);
    }

    pub fn add_record_response_mutations<
        F: FnOnce(&mut MutationsBuilder) -> &mut MutationsBuilder,
    >(
        &mut self,
        func: F,
    ) {
        MutationsBuilder::build_into(func, &mut self.record_response_mutations);
    }

    pub fn add_playback_response_mutations<
        F: FnOnce(&mut MutationsBuilder) -> &mut MutationsBuilder,
    >(
        &mut self,
        func: F,
    ) {
        MutationsBuilder::build_into(func, &mut self.playback_response_mutations);
    }

    pub fn record_request_mutations(&self) -> &Mutations {
        &self.record_request_mutations
    }

    pub fn record_response_mutations(&self) -> &Mutations {
        &self.record_response_mutations
    }

    pub fn playback_response_mutations(&self) -> &Mutations {
        &self.playback_response_mutations
    }
}
