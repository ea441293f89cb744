use crate::{
    channel::{Connector, Session},
    consumer::consume,
    errors::AmqpError,
    queue::QueueDefinition,
};
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use lapin::{
    options::BasicConsumeOptions, protocol::basic::AMQPProperties, types::FieldTable, Consumer,
};
use messaging::{dispatcher::Dispatcher, errors::MessagingError, handler::ConsumerHandler};
use opentelemetry::global;
use std::{fmt::Display, sync::Arc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Auto-ack subscription to one queue. Every delivery goes through the whole
/// handler chain before the next one is taken; nothing is ever requeued.
pub struct RabbitMQDispatcher {
    connector: Connector,
    queue_def: QueueDefinition,
    pub(crate) handlers: Vec<Arc<dyn ConsumerHandler>>,
}

impl RabbitMQDispatcher {
    pub fn new(connector: Connector, queue: impl Into<String>) -> RabbitMQDispatcher {
        RabbitMQDispatcher {
            connector,
            queue_def: QueueDefinition::new(queue),
            handlers: vec![],
        }
    }

    pub fn queue(&self) -> &str {
        self.queue_def.name()
    }

    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), AmqpError> {
        let session = self.connector.open().await?;

        let (queue, consumer) = match self.subscribe(&session).await {
            Ok(subscribed) => subscribed,
            Err(err) => {
                session.close().await;
                return Err(err);
            }
        };

        info!("waiting for messages on queue: {}", queue);

        // dropping this future stops the delivery task too
        let stop = shutdown.child_token();
        let _guard = stop.clone().drop_guard();

        let deliveries = consumer.map(|delivery| delivery.map(|d| (d.properties, d.data)));
        let handlers = self.handlers.clone();
        let spawned = tokio::spawn(async move {
            let result = delivery_loop(queue, handlers, deliveries, stop).await;
            session.close().await;
            result
        })
        .await;

        match spawned {
            Ok(result) => result,
            Err(err) => {
                error!(error = err.to_string(), "delivery task failure");
                Err(AmqpError::InternalError)
            }
        }
    }

    async fn subscribe(&self, session: &Session) -> Result<(String, Consumer), AmqpError> {
        let queue = self.queue_def.declare(session.channel()).await?;

        let consumer = session
            .channel()
            .basic_consume(
                &queue,
                "",
                BasicConsumeOptions {
                    no_local: false,
                    no_ack: true,
                    exclusive: false,
                    nowait: false,
                },
                FieldTable::default(),
            )
            .await
            .map_err(|err| {
                error!(error = err.to_string(), "error to create the consumer");
                AmqpError::BindingConsumerError(queue.clone())
            })?;

        debug!(
            consumer.tag = consumer.tag().as_str(),
            "consumer registered - queue: {}", queue
        );

        Ok((queue, consumer))
    }
}

#[async_trait]
impl Dispatcher for RabbitMQDispatcher {
    fn register(mut self, handler: Arc<dyn ConsumerHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    async fn consume_blocking(&self, shutdown: CancellationToken) -> Result<(), MessagingError> {
        Ok(self.run(shutdown).await?)
    }
}

async fn delivery_loop<S, E>(
    queue: String,
    handlers: Vec<Arc<dyn ConsumerHandler>>,
    mut deliveries: S,
    shutdown: CancellationToken,
) -> Result<(), AmqpError>
where
    S: Stream<Item = Result<(AMQPProperties, Vec<u8>), E>> + Unpin,
    E: Display,
{
    let tracer = global::tracer("rabbitmq consumer");

    loop {
        let next = tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                info!("stop consuming queue: {}", queue);
                return Ok(());
            }
            next = deliveries.next() => next,
        };

        match next {
            Some(Ok((props, data))) => {
                consume(&tracer, &queue, &handlers, &props, &data).await;
            }
            Some(Err(err)) => error!(error = err.to_string(), "errors consume msg"),
            None => {
                warn!("delivery stream closed - queue: {}", queue);
                return Err(AmqpError::ConsumerStreamClosed);
            }
        }
    }
}
