mod consumer;
mod otel;

pub mod channel;
pub mod client;
pub mod dispatcher;
pub mod errors;
pub mod publisher;
pub mod queue;

pub use client::RabbitMQClient;
pub use dispatcher::RabbitMQDispatcher;
pub use errors::AmqpError;
