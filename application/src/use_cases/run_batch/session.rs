//! Session coordinator
//!
//! Opens the authenticated session of one batch and owns everything the
//! batch acquires under it: the throwaway datasources and the requests still
//! in flight. [`Session::close`] releases them in order (cancel, delete,
//! sign out) and never fails from the caller's point of view.
//!
//! A session dropped without being closed, e.g. because the caller gave up
//! on the batch future, releases the same resources from a background task.

use super::error::RunBatchError;
use super::provision::EphemeralResources;
use crate::ports::nlp_service::NlpService;
use crate::ports::progress::BatchProgressNotifier;
use askbatch_domain::{AccessToken, Credentials, RequestId, TestSentence};
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

/// Requests submitted under a session and not yet ready or cancelled.
///
/// Uses `std::sync::Mutex` so the session's `Drop` can drain it synchronously.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    ids: Mutex<Vec<RequestId>>,
}

impl InFlight {
    pub(crate) fn track(&self, ids: impl IntoIterator<Item = RequestId>) {
        self.lock().extend(ids);
    }

    /// Forgets the given ids once they are resolved or cancelled.
    pub(crate) fn settle(&self, ids: &[RequestId]) {
        self.lock().retain(|id| !ids.contains(id));
    }

    pub(crate) fn take(&self) -> Vec<RequestId> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RequestId>> {
        self.ids.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// An open session. Released by [`Session::close`], or on drop.
pub(crate) struct Session<S: NlpService + 'static> {
    service: Arc<S>,
    token: AccessToken,
    resources: EphemeralResources,
    in_flight: InFlight,
    closed: bool,
}

impl<S: NlpService + 'static> Session<S> {
    pub(crate) async fn open(
        service: Arc<S>,
        credentials: &Credentials,
    ) -> Result<Self, RunBatchError> {
        let token = service
            .signin(credentials)
            .await
            .map_err(RunBatchError::Auth)?;

        info!("Session opened for {}", credentials.email);

        Ok(Self {
            service,
            token,
            resources: EphemeralResources::default(),
            in_flight: InFlight::default(),
            closed: false,
        })
    }

    pub(crate) fn service(&self) -> &S {
        self.service.as_ref()
    }

    pub(crate) fn token(&self) -> &AccessToken {
        &self.token
    }

    pub(crate) fn resources(&self) -> &EphemeralResources {
        &self.resources
    }

    pub(crate) fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// Creates the throwaway datasources of the batch under this session.
    pub(crate) async fn provision_all(
        &mut self,
        sentences: &[TestSentence],
        progress: &dyn BatchProgressNotifier,
    ) -> Result<(), RunBatchError> {
        self.resources
            .provision_all(self.service.as_ref(), &self.token, sentences, progress)
            .await
    }

    /// Cancels leftover requests, deletes the datasources and signs out.
    /// Errors are logged and dropped so they never mask the batch outcome.
    pub(crate) async fn close(mut self) {
        let in_flight = self.in_flight.take();
        release(self.service.as_ref(), &self.token, in_flight, &mut self.resources).await;
        self.closed = true;
    }
}

impl<S: NlpService + 'static> Drop for Session<S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }

        let in_flight = self.in_flight.take();
        let mut resources = std::mem::take(&mut self.resources);

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            error!(
                "Session dropped outside a runtime: {} datasource(s) and {} request(s) not released",
                resources.len(),
                in_flight.len()
            );
            return;
        };

        warn!(
            "Batch abandoned before completion, releasing {} datasource(s) and {} request(s)",
            resources.len(),
            in_flight.len()
        );

        let service = Arc::clone(&self.service);
        let token = self.token.clone();
        handle.spawn(async move {
            release(service.as_ref(), &token, in_flight, &mut resources).await;
        });
    }
}

async fn release<S: NlpService + ?Sized>(
    service: &S,
    token: &AccessToken,
    in_flight: Vec<RequestId>,
    resources: &mut EphemeralResources,
) {
    if !in_flight.is_empty() {
        info!("Cancelling {} unresolved request(s)", in_flight.len());
        if let Err(e) = service.cancel(token, &in_flight).await {
            error!("Tests request cancel error {:?}: {}", in_flight, e);
        }
    }

    resources.teardown(service, token).await;

    match service.signout(token).await {
        Ok(()) => info!("Session closed"),
        Err(e) => error!("Signout error: {}", e),
    }
}
