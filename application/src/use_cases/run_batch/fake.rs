//! In-memory [`NlpService`] for use case tests.
//!
//! Records every call and simulates asynchronous processing: a submitted
//! request turns ready after a configurable number of status checks.

use crate::ports::nlp_service::{NlpService, ServiceError};
use askbatch_domain::{
    AccessToken, Credentials, DatasourceId, DatasourceInfo, RequestId, RequestState, RequestStatus,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Signin,
    Signout,
    CreateDatasource { model_id: String, name: String },
    DeleteDatasource(DatasourceId),
    ListDatasources,
    ClearConversation(DatasourceId),
    Ask { text: String, datasource_id: DatasourceId },
    Check,
    Cancel(Vec<RequestId>),
}

struct Submitted {
    id: RequestId,
    text: String,
    datasource_id: DatasourceId,
    checks_seen: u32,
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    submitted: Vec<Submitted>,
    next_datasource: i64,
    fail_signin: bool,
    fail_check: bool,
    fail_create: HashSet<String>,
    fail_delete: HashSet<DatasourceId>,
    fail_clear: HashSet<DatasourceId>,
    fail_ask: HashSet<String>,
    error_texts: HashSet<String>,
    max_outstanding: usize,
}

pub(crate) struct FakeNlpService {
    state: Mutex<State>,
    /// `None` means never ready
    ready_after: Option<u32>,
    listed: Vec<DatasourceInfo>,
    foreign: Vec<RequestState>,
}

impl FakeNlpService {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_datasource: 100,
                ..State::default()
            }),
            ready_after: Some(1),
            listed: Vec::new(),
            foreign: Vec::new(),
        }
    }

    // ==================== Scenario Setup ====================

    pub(crate) fn ready_after_checks(mut self, checks: u32) -> Self {
        self.ready_after = Some(checks);
        self
    }

    pub(crate) fn never_ready(mut self) -> Self {
        self.ready_after = None;
        self
    }

    pub(crate) fn with_listed_datasource(mut self, id: i64, model_id: &str) -> Self {
        self.listed.push(DatasourceInfo {
            id: DatasourceId::new(id),
            model_id: model_id.to_string(),
        });
        self
    }

    /// A ready state belonging to another client, returned by every check.
    pub(crate) fn with_foreign_ready_state(mut self, request_id: &str) -> Self {
        self.foreign.push(
            RequestState::new(request_id, DatasourceId::new(999), RequestStatus::Ready)
                .with_result("text", "not ours"),
        );
        self
    }

    pub(crate) fn fail_signin(&self) {
        self.lock().fail_signin = true;
    }

    pub(crate) fn fail_check(&self) {
        self.lock().fail_check = true;
    }

    pub(crate) fn fail_create(&self, model_id: &str) {
        self.lock().fail_create.insert(model_id.to_string());
    }

    pub(crate) fn fail_delete(&self, id: DatasourceId) {
        self.lock().fail_delete.insert(id);
    }

    pub(crate) fn fail_clear(&self, id: DatasourceId) {
        self.lock().fail_clear.insert(id);
    }

    pub(crate) fn fail_ask(&self, text: &str) {
        self.lock().fail_ask.insert(text.to_string());
    }

    /// The request for `text` becomes ready carrying an error instead of a result.
    pub(crate) fn error_for(&self, text: &str) {
        self.lock().error_texts.insert(text.to_string());
    }

    // ==================== Inspection ====================

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub(crate) fn calls_matching(&self, predicate: impl Fn(&Call) -> bool) -> Vec<Call> {
        self.lock().calls.iter().filter(|c| predicate(c)).cloned().collect()
    }

    pub(crate) fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| predicate(c)).count()
    }

    /// Highest number of submitted requests that were not yet reported ready
    /// at the moment of an ask.
    pub(crate) fn max_outstanding(&self) -> usize {
        self.lock().max_outstanding
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn is_ready(&self, submitted: &Submitted) -> bool {
        self.ready_after
            .is_some_and(|after| submitted.checks_seen >= after)
    }
}

#[async_trait]
impl NlpService for FakeNlpService {
    async fn signin(&self, _credentials: &Credentials) -> Result<AccessToken, ServiceError> {
        let mut state = self.lock();
        state.calls.push(Call::Signin);
        if state.fail_signin {
            return Err(ServiceError::Rejected("invalid credentials".into()));
        }
        Ok(AccessToken::new("token-1"))
    }

    async fn signout(&self, _token: &AccessToken) -> Result<(), ServiceError> {
        self.lock().calls.push(Call::Signout);
        Ok(())
    }

    async fn create_datasource(
        &self,
        _token: &AccessToken,
        model_id: &str,
        name: &str,
    ) -> Result<DatasourceId, ServiceError> {
        let mut state = self.lock();
        state.calls.push(Call::CreateDatasource {
            model_id: model_id.to_string(),
            name: name.to_string(),
        });
        if state.fail_create.contains(model_id) {
            return Err(ServiceError::Rejected(format!("unknown model {}", model_id)));
        }
        let id = DatasourceId::new(state.next_datasource);
        state.next_datasource += 1;
        Ok(id)
    }

    async fn delete_datasource(
        &self,
        _token: &AccessToken,
        datasource_id: DatasourceId,
    ) -> Result<(), ServiceError> {
        let mut state = self.lock();
        state.calls.push(Call::DeleteDatasource(datasource_id));
        if state.fail_delete.contains(&datasource_id) {
            return Err(ServiceError::Transport("connection reset".into()));
        }
        Ok(())
    }

    async fn list_datasources(
        &self,
        _token: &AccessToken,
    ) -> Result<Vec<DatasourceInfo>, ServiceError> {
        self.lock().calls.push(Call::ListDatasources);
        Ok(self.listed.clone())
    }

    async fn clear_conversation(
        &self,
        _token: &AccessToken,
        datasource_id: DatasourceId,
    ) -> Result<(), ServiceError> {
        let mut state = self.lock();
        state.calls.push(Call::ClearConversation(datasource_id));
        if state.fail_clear.contains(&datasource_id) {
            return Err(ServiceError::Rejected("unknown datasource".into()));
        }
        Ok(())
    }

    async fn ask(
        &self,
        _token: &AccessToken,
        text: &str,
        datasource_id: DatasourceId,
    ) -> Result<RequestId, ServiceError> {
        let ready_after = self.ready_after;
        let mut state = self.lock();
        state.calls.push(Call::Ask {
            text: text.to_string(),
            datasource_id,
        });
        if state.fail_ask.contains(text) {
            return Err(ServiceError::Rejected(format!("cannot process '{}'", text)));
        }

        let id = RequestId::new(format!("req-{}", state.submitted.len() + 1));
        state.submitted.push(Submitted {
            id: id.clone(),
            text: text.to_string(),
            datasource_id,
            checks_seen: 0,
        });

        let outstanding = state
            .submitted
            .iter()
            .filter(|s| ready_after.is_none_or(|after| s.checks_seen < after))
            .count();
        state.max_outstanding = state.max_outstanding.max(outstanding);

        Ok(id)
    }

    async fn check(&self, _token: &AccessToken) -> Result<Vec<RequestState>, ServiceError> {
        let mut state = self.lock();
        state.calls.push(Call::Check);
        if state.fail_check {
            return Err(ServiceError::Transport("status endpoint down".into()));
        }

        for submitted in state.submitted.iter_mut() {
            submitted.checks_seen += 1;
        }

        let mut states: Vec<RequestState> = state
            .submitted
            .iter()
            .map(|s| {
                let base = RequestState::new(
                    s.id.clone(),
                    s.datasource_id,
                    if self.is_ready(s) {
                        RequestStatus::Ready
                    } else {
                        RequestStatus::from("QRY_ENLISTED")
                    },
                )
                .with_timestamps(1_000, 1_000 + 10 * s.text.len() as i64);

                if !self.is_ready(s) {
                    base
                } else if state.error_texts.contains(&s.text) {
                    base.with_error(format!("cannot answer '{}'", s.text))
                } else {
                    base.with_result("text", format!("answer: {}", s.text))
                }
            })
            .collect();

        states.extend(self.foreign.iter().cloned());
        Ok(states)
    }

    async fn cancel(&self, _token: &AccessToken, ids: &[RequestId]) -> Result<(), ServiceError> {
        self.lock().calls.push(Call::Cancel(ids.to_vec()));
        Ok(())
    }
}
