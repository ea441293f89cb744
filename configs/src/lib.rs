mod app;
mod configs;
mod environment;
mod rabbitmq;

pub use app::AppConfigs;
pub use configs::{Configs, DynamicConfigs, Empty};
pub use environment::Environment;
pub use rabbitmq::{PublishMode, RabbitMQConfigs};
