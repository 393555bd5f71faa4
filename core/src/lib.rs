//! Client core for the mall mini-program backend.
//!
//! # Overview
//! Every backend call goes through one [`Gateway`]: it rewrites the request
//! (base URL, timeout, `source-client`, bearer token), hands it to a
//! [`Transport`], and branches on the status: 2xx returns the
//! `{code, msg, result}` envelope, 401 clears the session and sends the user
//! to the login screen, anything else shows a toast. Every failure is
//! returned to the caller; a 2xx whose body does not decode fires no effect.
//!
//! # Design
//! - Decisions are pure: [`Interceptor`] and [`classify`] have no side
//!   effects beyond reading the session token, so they are shared verbatim
//!   with the C ABI in `mall-ffi`, where the host performs I/O.
//! - Effects (toast, navigation, session clearing) go through injected
//!   traits; the session is an explicit dependency, never a global.
//! - [`MallApi`] layers typed endpoint calls on top of the gateway.

pub mod classify;
pub mod config;
pub mod effects;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod http;
pub mod interceptor;
pub mod pager;
pub mod services;
pub mod session;
pub mod transport;
pub mod types;

pub use config::{ConfigError, GatewayConfig};
pub use effects::{Effect, Navigator, Notifier, ToastIcon, TracingUi};
pub use envelope::Envelope;
pub use error::{GatewayError, TransportError, TransportErrorKind};
pub use gateway::{CancelToken, Gateway};
pub use http::{HttpMethod, HttpRequest, HttpResponse, UploadRequest};
pub use interceptor::Interceptor;
pub use pager::Pager;
pub use services::{MallApi, DEFAULT_DISTRIBUTION_SITE};
pub use session::{MemorySession, Profile, SessionStore};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
