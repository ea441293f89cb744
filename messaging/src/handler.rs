use crate::errors::MessagingError;
use async_trait::async_trait;
use opentelemetry::Context;
use std::sync::Arc;

#[cfg(any(test, feature = "mocks"))]
use mockall::*;

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait ConsumerHandler: Send + Sync {
    /// Receives the raw body of one delivery. An error only marks this handler
    /// as failed, the message is already acknowledged.
    async fn exec(&self, ctx: &Context, data: &[u8]) -> Result<(), MessagingError>;
}

pub struct HandlerFn<F> {
    func: F,
}

#[async_trait]
impl<F> ConsumerHandler for HandlerFn<F>
where
    F: Fn(&[u8]) -> Result<(), MessagingError> + Send + Sync,
{
    async fn exec(&self, _ctx: &Context, data: &[u8]) -> Result<(), MessagingError> {
        (self.func)(data)
    }
}

/// Wraps a plain callback so it can be registered in a handler chain.
pub fn handler_fn<F>(func: F) -> Arc<dyn ConsumerHandler>
where
    F: Fn(&[u8]) -> Result<(), MessagingError> + Send + Sync + 'static,
{
    Arc::new(HandlerFn { func })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn should_forward_body_to_closure() {
        let received = Arc::new(Mutex::new(vec![]));
        let sink = received.clone();

        let handler = handler_fn(move |data| {
            sink.lock().unwrap().extend_from_slice(data);
            Ok(())
        });

        let res = handler.exec(&Context::new(), b"{\"id\":42}").await;

        assert!(res.is_ok());
        assert_eq!(received.lock().unwrap().as_slice(), b"{\"id\":42}");
    }

    #[tokio::test]
    async fn should_return_closure_error() {
        let handler = handler_fn(|_| Err(MessagingError::ConsumerError("boom".to_owned())));

        let res = handler.exec(&Context::new(), b"").await;

        assert_eq!(res, Err(MessagingError::ConsumerError("boom".to_owned())));
    }
}
