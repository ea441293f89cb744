use std::str::FromStr;

/// How the publisher manages broker connections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishMode {
    /// A fresh connection and channel for every publish, closed right after.
    #[default]
    PerCall,
    /// One long-lived connection and channel shared by every publish.
    Pooled,
}

impl FromStr for PublishMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "per-call" | "per_call" | "percall" => Ok(PublishMode::PerCall),
            "pooled" | "pool" | "long-lived" => Ok(PublishMode::Pooled),
            other => Err(format!("unknown publish mode `{}`", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RabbitMQConfigs {
    ///Default: localhost
    pub host: String,
    ///Default: 5672
    pub port: u64,
    ///Default: guest
    pub user: String,
    ///Default: guest
    pub password: String,
    ///Default: empty, the broker default vhost
    pub vhost: String,
    ///Default: PublishMode::PerCall
    pub publish_mode: PublishMode,
}

impl Default for RabbitMQConfigs {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 5672,
            user: "guest".to_owned(),
            password: "guest".to_owned(),
            vhost: Default::default(),
            publish_mode: PublishMode::default(),
        }
    }
}
