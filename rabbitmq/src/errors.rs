use messaging::errors::MessagingError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmqpError {
    #[error("internal error")]
    InternalError,

    #[error("failure to connect")]
    ConnectionError,

    #[error("failure to create a channel")]
    ChannelError,

    #[error("failure to declare a queue `{0}`")]
    DeclareQueueError(String),

    #[error("failure to encode payload `{0}`")]
    EncodeError(String),

    #[error("failure to publish")]
    PublishingError,

    #[error("failure to declare consumer for queue `{0}`")]
    BindingConsumerError(String),

    #[error("delivery stream closed by the broker")]
    ConsumerStreamClosed,
}

impl From<AmqpError> for MessagingError {
    fn from(err: AmqpError) -> Self {
        match err {
            AmqpError::InternalError => MessagingError::InternalError,
            AmqpError::ConnectionError => MessagingError::ConnectionError,
            AmqpError::ChannelError => MessagingError::ChannelError,
            AmqpError::DeclareQueueError(queue) => MessagingError::DeclareError(queue),
            AmqpError::EncodeError(reason) => MessagingError::EncodeError(reason),
            AmqpError::PublishingError => MessagingError::PublisherError,
            AmqpError::BindingConsumerError(_) => MessagingError::CreatingConsumerError,
            AmqpError::ConsumerStreamClosed => MessagingError::ConsumerStreamClosed,
        }
    }
}
