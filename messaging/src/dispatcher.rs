use crate::{errors::MessagingError, handler::ConsumerHandler};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A subscription to a single queue feeding every delivery to a handler chain.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Appends a handler to the chain. Handlers run in registration order.
    fn register(self, handler: Arc<dyn ConsumerHandler>) -> Self
    where
        Self: Sized;

    /// Runs until `shutdown` is cancelled or the delivery stream ends.
    ///
    /// Setup failures (connection, channel, queue declaration, consumer
    /// registration) are returned before any message is consumed.
    async fn consume_blocking(&self, shutdown: CancellationToken) -> Result<(), MessagingError>;
}
