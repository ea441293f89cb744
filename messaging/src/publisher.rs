use crate::errors::MessagingError;
use async_trait::async_trait;
use opentelemetry::Context;
use serde::Serialize;

#[cfg(any(test, feature = "mocks"))]
use mockall::*;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A message ready to be sent: the target queue and the encoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishMessage {
    pub queue: String,
    pub content_type: String,
    pub data: Box<[u8]>,
}

impl PublishMessage {
    /// Encodes `payload` as JSON. Nothing touches the network here, so an
    /// encoding failure never leaves broker-side state behind.
    pub fn json<T>(queue: impl Into<String>, payload: &T) -> Result<Self, MessagingError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_vec(payload)
            .map_err(|err| MessagingError::EncodeError(err.to_string()))?
            .into_boxed_slice();

        Ok(PublishMessage {
            queue: queue.into(),
            content_type: JSON_CONTENT_TYPE.to_owned(),
            data,
        })
    }
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, ctx: &Context, msg: &PublishMessage) -> Result<(), MessagingError>;
}
