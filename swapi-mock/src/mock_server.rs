use crate::{
    data::{Headers, InteractionData, RequestData, ResponseData},
    error::Error,
    mock_configuration::{InteractionMode, MockConfiguration},
    mock_rule::MockRule,
};
use lazy_static::lazy_static;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

lazy_static! {
    static ref MOCK_SERVER: Mutex<MockServer> = Mutex::new(MockServer::default());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RuleId(u64);

enum Action {
    Respond(ResponseData),
    Forward {
        configuration: Arc<MockConfiguration>,
        domain_name: String,
    },
}

/// State shared between the server thread and the test session.
#[derive(Debug, Default)]
pub(crate) struct MockServer {
    configuration: Option<Arc<MockConfiguration>>,
    rules: Vec<(RuleId, MockRule)>,
    // never reset, so a stale guard can't remove a newer rule
    next_rule_id: u64,
    error: Option<Error>,
    interactions: Vec<InteractionData>,
    markdown_data: Option<Vec<InteractionData>>,
    interaction_number: usize,
}

impl MockServer {
    fn instance() -> Result<MutexGuard<'static, MockServer>, Error> {
        Ok(MOCK_SERVER.lock()?)
    }

    pub(crate) fn configure(configuration: MockConfiguration) -> Result<(), Error> {
        let mut server = Self::instance()?;
        server.reset();
        server.configuration = Some(Arc::new(configuration));

        Ok(())
    }

    pub(crate) fn add_rule(rule: MockRule) -> Result<RuleId, Error> {
        let mut server = Self::instance()?;
        let id = RuleId(server.next_rule_id);
        server.next_rule_id += 1;

        debug!(method = rule.method(), path = rule.path(), "mock rule registered");
        server.rules.push((id, rule));

        Ok(id)
    }

    pub(crate) fn remove_rule(id: RuleId) {
        let mut server = MOCK_SERVER.lock().unwrap_or_else(PoisonError::into_inner);
        server.rules.retain(|(rule_id, _)| *rule_id != id);
    }

    pub(crate) fn set_error(error: Error) {
        let mut server = MOCK_SERVER.lock().unwrap_or_else(PoisonError::into_inner);
        if server.error.is_none() {
            server.error = Some(error);
        }
    }

    pub(crate) async fn handle_request(request_data: RequestData) -> Result<ResponseData, Error> {
        let action = Self::instance()?.plan(&request_data)?;

        match action {
            Action::Respond(response_data) => Ok(response_data),
            Action::Forward {
                configuration,
                domain_name,
            } => {
                let mut request_data = request_data;
                // the upstream gets its own host from the domain
                request_data.headers.remove("host");
                configuration
                    .record_request_mutations()
                    .apply_to_request(&mut request_data);

                let mut response_data = configuration
                    .http_client()
                    .make_request(&domain_name, &request_data)
                    .await?;
                configuration
                    .record_response_mutations()
                    .apply_to_response(&mut response_data);

                info!(
                    method = %request_data.method,
                    uri = %request_data.uri,
                    status = response_data.status_code,
                    "recorded interaction"
                );
                Self::instance()?.store_interaction(request_data, response_data.clone());

                Ok(response_data)
            }
        }
    }

    /// Ends the session: saves or checks recordings and reports handler errors.
    pub(crate) fn complete() -> Result<(), Error> {
        let mut server = Self::instance()?;
        let result = server.finish_session();
        server.reset();

        result
    }

    /// Ends the session without saving anything.
    pub(crate) fn discard() {
        MOCK_SERVER
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reset();
    }

    fn plan(&mut self, request: &RequestData) -> Result<Action, Error> {
        if let Some((_, rule)) = self.rules.iter().rev().find(|(_, rule)| rule.matches(request)) {
            info!(
                method = %request.method,
                uri = %request.uri,
                status = rule.status_code(),
                "answered from mock rule"
            );
            return Ok(Action::Respond(rule.response()));
        }

        let configuration = self.configuration.clone().ok_or(Error::NotConfigured)?;

        match configuration.interaction_mode() {
            InteractionMode::Playback => self
                .playback(&configuration, request)
                .map(Action::Respond),
            InteractionMode::Record => {
                let domain_name = configuration
                    .domain_name()
                    .ok_or(Error::NotConfigured)?
                    .to_owned();

                Ok(Action::Forward {
                    configuration,
                    domain_name,
                })
            }
            InteractionMode::RulesOnly => {
                warn!(method = %request.method, uri = %request.uri, "no mock rule matched");

                let mut headers = Headers::new();
                headers.insert("content-type".into(), "application/json".into());

                Ok(Action::Respond(ResponseData {
                    status_code: 404,
                    headers,
                    body: "{}".into(),
                }))
            }
        }
    }

    fn playback(
        &mut self,
        configuration: &MockConfiguration,
        request: &RequestData,
    ) -> Result<ResponseData, Error> {
        if self.markdown_data.is_none() {
            let interaction_manager = configuration
                .interaction_manager()
                .ok_or(Error::NotConfigured)?;
            self.markdown_data = Some(
                interaction_manager
                    .load_interactions()
                    .map_err(Error::InteractionManager)?,
            );
        }

        let interactions = self.markdown_data.as_deref().unwrap_or_default();
        let interaction =
            interactions
                .get(self.interaction_number)
                .ok_or_else(|| Error::PlaybackExhausted {
                    method: request.method.clone(),
                    uri: request.uri.clone(),
                    recorded: interactions.len(),
                })?;
        let recorded = &interaction.request_data;

        if recorded.method != request.method || recorded.uri != request.uri {
            return Err(Error::PlaybackMismatch {
                interaction_number: self.interaction_number,
                method: request.method.clone(),
                uri: request.uri.clone(),
                recorded_method: recorded.method.clone(),
                recorded_uri: recorded.uri.clone(),
            });
        }

        let mut response_data = interaction.response_data.clone();
        configuration
            .playback_response_mutations()
            .apply_to_response(&mut response_data);

        info!(
            interaction = self.interaction_number,
            method = %request.method,
            uri = %request.uri,
            status = response_data.status_code,
            "played back interaction"
        );
        self.interaction_number += 1;

        Ok(response_data)
    }

    fn store_interaction(&mut self, request_data: RequestData, response_data: ResponseData) {
        self.interactions.push(InteractionData {
            interaction_number: self.interactions.len(),
            request_data,
            response_data,
        });
    }

    fn finish_session(&mut self) -> Result<(), Error> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }

        let configuration = match &self.configuration {
            Some(configuration) if configuration.interaction_mode() == InteractionMode::Record => {
                configuration.clone()
            }
            _ => return Ok(()),
        };
        let interaction_manager = configuration
            .interaction_manager()
            .ok_or(Error::NotConfigured)?;

        if configuration.fail_if_markdown_changed() {
            interaction_manager
                .check_data_unchanged(&self.interactions)
                .map_err(Error::MarkdownDataChanged)
        } else {
            info!(count = self.interactions.len(), "saving recorded interactions");
            interaction_manager
                .save_interactions(&self.interactions)
                .map_err(Error::InteractionManager)
        }
    }

    fn reset(&mut self) {
        self.configuration = None;
        self.rules.clear();
        self.error = None;
        self.interactions.clear();
        self.markdown_data = None;
        self.interaction_number = 0;
    }
}
