use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessagingError {
    #[error("internal error")]
    InternalError,

    #[error("failure to connect")]
    ConnectionError,

    #[error("failure to open a channel")]
    ChannelError,

    #[error("failure to declare queue `{0}`")]
    DeclareError(String),

    #[error("failure to encode payload `{0}`")]
    EncodeError(String),

    #[error("failure to publish message")]
    PublisherError,

    #[error("failure to create the consumer")]
    CreatingConsumerError,

    #[error("failure to consume message `{0}`")]
    ConsumerError(String),

    #[error("delivery stream closed by the broker")]
    ConsumerStreamClosed,
}
