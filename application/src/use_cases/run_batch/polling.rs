//! Submission & polling engine
//!
//! Submits one wave of sentences, then polls the status endpoint until every
//! submitted request is ready or the wait budget runs out:
//!
//! ```text
//! Submitting ──► Polling ──► Resolved
//!                   │
//!                   └──────► TimedOut
//! ```
//!
//! A poll cycle is one check call followed by one inter-poll sleep. The
//! first cycle always runs; a further cycle is only started when it can end
//! within the budget. Whatever the exit, requests still without a terminal
//! state get a single best-effort cancel.

use super::correlate::SentenceOutcome;
use super::error::RunBatchError;
use super::session::InFlight;
use crate::config::TestClientConfig;
use crate::ports::nlp_service::NlpService;
use crate::ports::progress::BatchProgressNotifier;
use askbatch_domain::{AccessToken, DatasourceId, RequestId, RequestState};
use futures::future::join_all;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, error, info, warn};

/// One sentence of a wave.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WaveItem<'s> {
    pub index: usize,
    pub text: &'s str,
    pub datasource_id: DatasourceId,
}

/// Submitted request awaiting a terminal state.
struct PendingRequest<'s> {
    index: usize,
    text: &'s str,
}

pub(crate) struct PollingEngine<'a, S: NlpService + ?Sized> {
    service: &'a S,
    token: &'a AccessToken,
    in_flight: &'a InFlight,
    check_interval: Duration,
    max_check_time: Duration,
}

impl<'a, S: NlpService + ?Sized> PollingEngine<'a, S> {
    pub(crate) fn new(
        service: &'a S,
        token: &'a AccessToken,
        in_flight: &'a InFlight,
        config: &TestClientConfig,
    ) -> Self {
        Self {
            service,
            token,
            in_flight,
            check_interval: config.check_interval,
            max_check_time: config.max_check_time,
        }
    }

    /// Submits and resolves one wave. Ask failures come back as
    /// [`SentenceOutcome::SubmissionFailed`] and never enter polling.
    pub(crate) async fn run_wave(
        &self,
        items: &[WaveItem<'_>],
        progress: &dyn BatchProgressNotifier,
    ) -> Result<Vec<(usize, SentenceOutcome)>, RunBatchError> {
        let mut outcomes = Vec::with_capacity(items.len());
        let pending = self.submit_all(items, &mut outcomes, progress).await;

        debug!("Sentences sent: {}", pending.len());

        if pending.is_empty() {
            return Ok(outcomes);
        }

        let submitted: Vec<RequestId> = pending.keys().cloned().collect();
        self.in_flight.track(submitted.iter().cloned());

        let mut resolved = HashMap::with_capacity(pending.len());
        let polled = self.poll(&pending, &mut resolved, progress).await;

        self.cancel_unresolved(&pending, &resolved).await;
        self.in_flight.settle(&submitted);
        polled?;

        for (id, state) in resolved {
            if let Some(request) = pending.get(&id) {
                outcomes.push((request.index, SentenceOutcome::Completed(state)));
            }
        }

        Ok(outcomes)
    }

    async fn submit_all<'s>(
        &self,
        items: &[WaveItem<'s>],
        outcomes: &mut Vec<(usize, SentenceOutcome)>,
        progress: &dyn BatchProgressNotifier,
    ) -> HashMap<RequestId, PendingRequest<'s>> {
        let submissions = join_all(items.iter().map(|item| async move {
            let submitted = self
                .service
                .ask(self.token, item.text, item.datasource_id)
                .await;
            (*item, submitted)
        }))
        .await;

        let mut pending = HashMap::with_capacity(items.len());

        for (item, submitted) in submissions {
            match submitted {
                Ok(id) => {
                    debug!("Sentence sent: {}", id);
                    pending.insert(
                        id,
                        PendingRequest {
                            index: item.index,
                            text: item.text,
                        },
                    );
                }
                Err(e) => {
                    warn!("Sentence '{}' could not be submitted: {}", item.text, e);
                    progress.on_sentence_resolved(item.index, item.text, false);
                    outcomes.push((item.index, SentenceOutcome::SubmissionFailed(e.to_string())));
                }
            }
        }

        pending
    }

    async fn poll(
        &self,
        pending: &HashMap<RequestId, PendingRequest<'_>>,
        resolved: &mut HashMap<RequestId, RequestState>,
        progress: &dyn BatchProgressNotifier,
    ) -> Result<(), RunBatchError> {
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let states = self
                .service
                .check(self.token)
                .await
                .map_err(RunBatchError::Check)?;

            sleep(self.check_interval).await;

            let before = resolved.len();
            for state in states.into_iter().filter(|s| s.is_ready()) {
                let Some(request) = pending.get(&state.request_id) else {
                    continue;
                };
                if !resolved.contains_key(&state.request_id) {
                    progress.on_sentence_resolved(request.index, request.text, state.error.is_none());
                    resolved.insert(state.request_id.clone(), state);
                }
            }

            debug!(
                "Poll #{}: {} request(s) processed, {}/{} ready",
                attempt,
                resolved.len() - before,
                resolved.len(),
                pending.len()
            );
            progress.on_poll(attempt, resolved.len(), pending.len());

            if resolved.len() == pending.len() {
                return Ok(());
            }

            if started.elapsed() + self.check_interval > self.max_check_time {
                let budget_ms = u64::try_from(self.max_check_time.as_millis()).unwrap_or(u64::MAX);
                return Err(RunBatchError::Timeout { budget_ms });
            }
        }
    }

    async fn cancel_unresolved(
        &self,
        pending: &HashMap<RequestId, PendingRequest<'_>>,
        resolved: &HashMap<RequestId, RequestState>,
    ) {
        let unresolved: Vec<RequestId> = pending
            .keys()
            .filter(|id| !resolved.contains_key(*id))
            .cloned()
            .collect();

        if unresolved.is_empty() {
            return;
        }

        info!("Cancelling {} unresolved request(s)", unresolved.len());

        if let Err(e) = self.service.cancel(self.token, &unresolved).await {
            error!("Tests request cancel error {:?}: {}", unresolved, e);
        }
    }
}
