//! Typed calls for every backend endpoint the app uses.
//!
//! # Design
//! `MallApi` owns a [`Gateway`] and adds nothing but request construction:
//! each method builds an [`HttpRequest`] with a backend-relative path and
//! lets the gateway intercept, dispatch, and classify it. Envelope `code`
//! checks are left to the caller.

mod address;
mod cart;
mod category;
mod goods;
mod home;
mod hot;
mod login;
mod member;
mod order;

pub use home::DEFAULT_DISTRIBUTION_SITE;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::envelope::Envelope;
use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::http::HttpRequest;
use crate::transport::Transport;

#[derive(Debug)]
pub struct MallApi<T> {
    gateway: Gateway<T>,
}

impl<T: Transport> MallApi<T> {
    pub fn new(gateway: Gateway<T>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    async fn get<R: DeserializeOwned>(&self, path: String) -> Result<Envelope<R>, GatewayError> {
        self.gateway.send(HttpRequest::get(path)).await
    }

    async fn send_json<R, B>(&self, request: HttpRequest, body: &B) -> Result<Envelope<R>, GatewayError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.gateway.send(request.json(body)?).await
    }
}
