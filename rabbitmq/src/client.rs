use crate::{
    channel::{Connector, Session},
    dispatcher::RabbitMQDispatcher,
    errors::AmqpError,
};
use configs::{Configs, DynamicConfigs, PublishMode};
use messaging::{dispatcher::Dispatcher, handler::ConsumerHandler};
use std::sync::Arc;
use tokio::{runtime::Handle, sync::Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const DEFAULT_CONNECTION_NAME: &str = "rabbitmq-client";

/// Caller-facing handle bound to one broker address. Build it once at
/// startup and share it by `Arc` with whatever needs to publish or subscribe.
///
/// In pooled mode call [`RabbitMQClient::shutdown`] before dropping the
/// client. Dropping it without that closes the pooled session in the
/// background, and only when a tokio runtime is still around.
pub struct RabbitMQClient {
    pub(crate) connector: Connector,
    pub(crate) mode: PublishMode,
    pub(crate) pooled: Mutex<Option<Session>>,
}

impl RabbitMQClient {
    pub fn new(uri: impl Into<String>) -> RabbitMQClient {
        RabbitMQClient {
            connector: Connector::new(uri, DEFAULT_CONNECTION_NAME),
            mode: PublishMode::default(),
            pooled: Mutex::new(None),
        }
    }

    pub fn from_configs<T>(cfg: &Configs<T>) -> RabbitMQClient
    where
        T: DynamicConfigs,
    {
        RabbitMQClient {
            connector: Connector::new(cfg.rabbitmq_uri(), cfg.app.name.clone()),
            mode: cfg.rabbitmq.publish_mode,
            pooled: Mutex::new(None),
        }
    }

    pub fn publish_mode(mut self, mode: PublishMode) -> Self {
        self.mode = mode;
        self
    }

    /// Name shown by the broker for every connection this client opens.
    pub fn connection_name(mut self, name: impl Into<String>) -> Self {
        self.connector = self.connector.clone().with_connection_name(name);
        self
    }

    /// Number of connections opened by this client and not released yet,
    /// listeners included.
    pub fn live_sessions(&self) -> usize {
        self.connector.live_sessions()
    }

    /// Opens and closes a session to check the broker is reachable.
    pub async fn ping(&self) -> Result<(), AmqpError> {
        let session = self.connector.open().await?;
        session.close().await;
        Ok(())
    }

    /// A subscription to `queue` with an empty handler chain.
    pub fn dispatcher(&self, queue: impl Into<String>) -> RabbitMQDispatcher {
        RabbitMQDispatcher::new(self.connector.clone(), queue)
    }

    /// Subscribes `handlers` to `queue` and blocks until `shutdown` is
    /// cancelled or the broker closes the delivery stream.
    pub async fn listen(
        &self,
        queue: &str,
        handlers: Vec<Arc<dyn ConsumerHandler>>,
        shutdown: CancellationToken,
    ) -> Result<(), AmqpError> {
        handlers
            .into_iter()
            .fold(self.dispatcher(queue), |dispatcher, handler| {
                dispatcher.register(handler)
            })
            .run(shutdown)
            .await
    }

    /// Releases the long-lived publish session, if any.
    pub async fn shutdown(&self) {
        if let Some(session) = self.pooled.lock().await.take() {
            debug!("closing pooled publish session");
            session.close().await;
        }
    }
}

impl Drop for RabbitMQClient {
    fn drop(&mut self) {
        let Some(session) = self.pooled.get_mut().take() else {
            return;
        };

        match Handle::try_current() {
            Ok(handle) => {
                debug!("client dropped with a pooled session, closing it");
                handle.spawn(session.close());
            }
            Err(_) => warn!("client dropped outside a runtime, pooled session not closed"),
        }
    }
}
