use crate::{
    channel::Session, client::RabbitMQClient, errors::AmqpError, otel, queue::QueueDefinition,
};
use async_trait::async_trait;
use configs::PublishMode;
use lapin::{options::BasicPublishOptions, types::ShortString, BasicProperties};
use messaging::{
    errors::MessagingError,
    publisher::{PublishMessage, Publisher},
};
use opentelemetry::{trace::FutureExt, Context};
use serde::Serialize;
use tracing::{debug, error};
use uuid::Uuid;

impl RabbitMQClient {
    /// Encodes `payload` as JSON and sends it to `queue` through the default
    /// exchange, declaring the queue first.
    ///
    /// The message is published with `mandatory = false`: if nothing is bound
    /// to the routing key the broker drops it and no error is reported here.
    pub async fn publish<T>(&self, ctx: &Context, queue: &str, payload: &T) -> Result<(), AmqpError>
    where
        T: Serialize + ?Sized,
    {
        let msg = PublishMessage::json(queue, payload).map_err(|err| {
            error!(error = err.to_string(), "failure to encode payload");
            match err {
                MessagingError::EncodeError(reason) => AmqpError::EncodeError(reason),
                _ => AmqpError::InternalError,
            }
        })?;

        self.send(ctx, &msg).await
    }

    /// Sends an already encoded message.
    pub async fn send(&self, ctx: &Context, msg: &PublishMessage) -> Result<(), AmqpError> {
        match self.mode {
            PublishMode::PerCall => self.send_per_call(ctx, msg).await,
            PublishMode::Pooled => self.send_pooled(ctx, msg).await,
        }
    }

    async fn send_per_call(&self, ctx: &Context, msg: &PublishMessage) -> Result<(), AmqpError> {
        let session = self.connector.open().await?;

        let result = publish_on(&session, ctx, msg).await;
        session.close().await;

        result
    }

    async fn send_pooled(&self, ctx: &Context, msg: &PublishMessage) -> Result<(), AmqpError> {
        let mut pooled = self.pooled.lock().await;

        let session = match pooled.take() {
            Some(session) if session.is_connected() => session,
            Some(stale) => {
                debug!("pooled session lost, reconnecting");
                stale.close().await;
                self.connector.open().await?
            }
            None => self.connector.open().await?,
        };

        let result = publish_on(&session, ctx, msg).await;

        // a failed declare closes the channel broker-side, start over next time
        if result.is_ok() {
            *pooled = Some(session);
        } else {
            session.close().await;
        }

        result
    }
}

async fn publish_on(session: &Session, ctx: &Context, msg: &PublishMessage) -> Result<(), AmqpError> {
    let queue = QueueDefinition::new(msg.queue.as_str())
        .declare(session.channel())
        .await?;

    session
        .channel()
        .basic_publish(
            "",
            &queue,
            BasicPublishOptions {
                mandatory: false,
                immediate: false,
            },
            &msg.data,
            BasicProperties::default()
                .with_content_type(ShortString::from(msg.content_type.clone()))
                .with_message_id(ShortString::from(Uuid::new_v4().to_string()))
                .with_headers(otel::inject_headers(ctx)),
        )
        .with_context(ctx.clone())
        .await
        .map_err(|err| {
            error!(error = err.to_string(), "error publishing message");
            AmqpError::PublishingError
        })?;

    debug!("sent {} bytes - queue: {}", msg.data.len(), queue);

    Ok(())
}

#[async_trait]
impl Publisher for RabbitMQClient {
    async fn publish(&self, ctx: &Context, msg: &PublishMessage) -> Result<(), MessagingError> {
        Ok(self.send(ctx, msg).await?)
    }
}
