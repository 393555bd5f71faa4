//! The request gateway.
//!
//! # Design
//! `Gateway` is the thin effectful shell around the pure pieces:
//! [`Interceptor`] rewrites the request, a [`Transport`] executes it,
//! [`classify`] decides the outcome, and the effects owed by a failure are
//! handed to the injected notifier, navigator, and session before the error
//! is returned. One call is one dispatch; nothing is retried.

use std::future::{self, Future};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Notify;

use crate::classify;
use crate::config::GatewayConfig;
use crate::effects::{Effect, Navigator, Notifier, TracingUi};
use crate::envelope::Envelope;
use crate::error::{GatewayError, TransportError};
use crate::http::{HttpRequest, HttpResponse, UploadRequest};
use crate::interceptor::Interceptor;
use crate::session::SessionStore;
use crate::transport::Transport;

pub struct Gateway<T> {
    interceptor: Interceptor,
    transport: T,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl<T> std::fmt::Debug for Gateway<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("interceptor", &self.interceptor)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Gateway<T> {
    /// Build a gateway that reports effects through [`TracingUi`].
    pub fn new(config: GatewayConfig, transport: T, session: Arc<dyn SessionStore>) -> Self {
        Self {
            interceptor: Interceptor::new(config, session),
            transport,
            notifier: Arc::new(TracingUi),
            navigator: Arc::new(TracingUi),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        self.interceptor.config()
    }

    pub fn interceptor(&self) -> &Interceptor {
        &self.interceptor
    }

    pub async fn send<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<Envelope<R>, GatewayError> {
        self.send_until(request, future::pending()).await
    }

    /// Like [`Gateway::send`], but gives up with [`GatewayError::Cancelled`]
    /// once `token` is cancelled. A cancelled call shows nothing to the user.
    pub async fn send_cancellable<R: DeserializeOwned>(
        &self,
        request: HttpRequest,
        token: &CancelToken,
    ) -> Result<Envelope<R>, GatewayError> {
        self.send_until(request, token.cancelled()).await
    }

    pub async fn upload<R: DeserializeOwned>(&self, request: UploadRequest) -> Result<Envelope<R>, GatewayError> {
        self.upload_until(request, future::pending()).await
    }

    pub async fn upload_cancellable<R: DeserializeOwned>(
        &self,
        request: UploadRequest,
        token: &CancelToken,
    ) -> Result<Envelope<R>, GatewayError> {
        self.upload_until(request, token.cancelled()).await
    }

    async fn send_until<R, C>(&self, mut request: HttpRequest, cancel: C) -> Result<Envelope<R>, GatewayError>
    where
        R: DeserializeOwned,
        C: Future<Output = ()>,
    {
        self.interceptor.intercept(&mut request);
        tracing::debug!(method = %request.method, url = %request.url, "dispatch");
        let outcome = race(self.transport.request(request), cancel).await?;
        self.settle(outcome)
    }

    async fn upload_until<R, C>(&self, mut request: UploadRequest, cancel: C) -> Result<Envelope<R>, GatewayError>
    where
        R: DeserializeOwned,
        C: Future<Output = ()>,
    {
        self.interceptor.intercept(&mut request);
        tracing::debug!(url = %request.url, file = %request.file_path.display(), "upload");
        let outcome = race(self.transport.upload(request), cancel).await?;
        self.settle(outcome)
    }

    fn settle<R: DeserializeOwned>(
        &self,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Result<Envelope<R>, GatewayError> {
        let result = classify::classify(outcome).and_then(classify::decode);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "request failed");
            self.apply(err.effects(self.config()));
        }
        result
    }

    fn apply(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ClearSession => self.interceptor.session().clear(),
                Effect::NavigateTo(url) => self.navigator.navigate_to(&url),
                Effect::Toast { icon, title } => self.notifier.show_toast(icon, &title),
            }
        }
    }
}

async fn race<F, C>(dispatch: F, cancel: C) -> Result<Result<HttpResponse, TransportError>, GatewayError>
where
    F: Future<Output = Result<HttpResponse, TransportError>>,
    C: Future<Output = ()>,
{
    tokio::select! {
        biased;
        () = cancel => {
            tracing::debug!("dispatch cancelled");
            Err(GatewayError::Cancelled)
        }
        outcome = dispatch => Ok(outcome),
    }
}

/// Cancellation handle for [`Gateway::send_cancellable`]. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelState>,
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`CancelToken::cancel`] has been called.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
