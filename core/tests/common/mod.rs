//! Recording doubles shared by the gateway test suites.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mall_core::{
    HttpRequest, HttpResponse, MemorySession, Navigator, Notifier, Profile, SessionStore, ToastIcon,
    Transport, TransportError, UploadRequest,
};

/// Captures every toast and navigation in call order.
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub toasts: Mutex<Vec<(ToastIcon, String)>>,
    pub navigations: Mutex<Vec<String>>,
}

impl RecordingUi {
    pub fn toasts(&self) -> Vec<String> {
        self.toasts.lock().unwrap().iter().map(|(_, title)| title.clone()).collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

impl Notifier for RecordingUi {
    fn show_toast(&self, icon: ToastIcon, title: &str) {
        self.toasts.lock().unwrap().push((icon, title.to_string()));
    }
}

impl Navigator for RecordingUi {
    fn navigate_to(&self, url: &str) {
        self.navigations.lock().unwrap().push(url.to_string());
    }
}

/// [`MemorySession`] that counts how often it was cleared.
#[derive(Debug, Default)]
pub struct CountingSession {
    pub inner: MemorySession,
    clears: AtomicUsize,
}

impl CountingSession {
    pub fn logged_in(token: &str) -> Self {
        let session = Self::default();
        session.inner.set_profile(profile(token));
        session
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl SessionStore for CountingSession {
    fn token(&self) -> Option<String> {
        self.inner.token()
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear();
    }
}

pub fn profile(token: &str) -> Profile {
    Profile {
        id: 1,
        mobile: "13800000000".to_string(),
        token: token.to_string(),
        nickname: "tester".to_string(),
        avatar: String::new(),
        account: "tester".to_string(),
    }
}

pub enum Reply {
    Respond(HttpResponse),
    Fail(TransportError),
    /// Never settles; only cancellation ends the call.
    Hang,
}

/// Transport that replays scripted replies and records what it was given.
#[derive(Default, Clone)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    pub requests: Arc<Mutex<Vec<HttpRequest>>>,
    pub uploads: Arc<Mutex<Vec<UploadRequest>>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            ..Self::default()
        }
    }

    pub fn respond(status: u16, body: &str) -> Self {
        Self::new([Reply::Respond(HttpResponse::new(status, body))])
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<UploadRequest> {
        self.uploads.lock().unwrap().clone()
    }

    fn next(&self) -> Reply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left")
    }

    async fn play(reply: Reply) -> Result<HttpResponse, TransportError> {
        match reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(err) => Err(err),
            Reply::Hang => std::future::pending().await,
        }
    }
}

impl Transport for ScriptedTransport {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let reply = self.next();
        Self::play(reply).await
    }

    async fn upload(&self, request: UploadRequest) -> Result<HttpResponse, TransportError> {
        self.uploads.lock().unwrap().push(request);
        let reply = self.next();
        Self::play(reply).await
    }
}
