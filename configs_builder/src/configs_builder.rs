use crate::{
    env_keys::{
        APP_NAME_ENV_KEY, DEV_ENV_FILE_NAME, ENABLE_EXTERNAL_CRATES_LOGGING_ENV_KEY,
        LOCAL_ENV_FILE_NAME, LOG_LEVEL_ENV_KEY, PROD_FILE_NAME, RABBITMQ_HOST_ENV_KEY,
        RABBITMQ_PASSWORD_ENV_KEY, RABBITMQ_PORT_ENV_KEY, RABBITMQ_PUBLISH_MODE_ENV_KEY,
        RABBITMQ_USER_ENV_KEY, RABBITMQ_VHOST_ENV_KEY, STAGING_FILE_NAME,
    },
    errors::ConfigsError,
};
use configs::{Configs, DynamicConfigs, Environment, PublishMode};
use dotenvy::from_filename;
use std::{env, fmt::Display, str::FromStr};
use tracing::{debug, error};

#[derive(Default)]
pub struct ConfigBuilder {
    rabbitmq: bool,
    logging: bool,
}

impl ConfigBuilder {
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn rabbitmq(mut self) -> Self {
        self.rabbitmq = true;
        self
    }

    /// Installs the global tracing subscriber once the app section is loaded.
    pub fn logging(mut self) -> Self {
        self.logging = true;
        self
    }

    pub fn build<T>(&self) -> Result<Configs<T>, ConfigsError>
    where
        T: DynamicConfigs,
    {
        let env = Environment::from_rust_env();
        let file_name = match env {
            Environment::Prod => PROD_FILE_NAME,
            Environment::Staging => STAGING_FILE_NAME,
            Environment::Dev => DEV_ENV_FILE_NAME,
            Environment::Local => LOCAL_ENV_FILE_NAME,
        };

        if from_filename(file_name).is_err() {
            debug!(file = file_name, "env file not found, using process env only");
        }

        let mut cfg: Configs<T> = self.fill(env, env::vars());

        if self.logging {
            logging::setup(&cfg.app).map_err(|_| ConfigsError::LoggingSetupError)?;
        }

        cfg.dynamic.load();

        Ok(cfg)
    }
}

impl ConfigBuilder {
    pub(crate) fn fill<T, I>(&self, env: Environment, vars: I) -> Configs<T>
    where
        T: DynamicConfigs,
        I: IntoIterator<Item = (String, String)>,
    {
        let mut cfg = Configs::<T>::default();
        cfg.app.env = env;

        for (key, value) in vars {
            if self.fill_app(&mut cfg, &key, &value) {
                continue;
            }
            self.fill_rabbitmq(&mut cfg, &key, &value);
        }

        cfg.app.name = self.fmt_name(&env, &cfg.app.name);

        cfg
    }

    fn fill_app<T>(&self, cfg: &mut Configs<T>, key: &str, value: &str) -> bool
    where
        T: DynamicConfigs,
    {
        match key {
            APP_NAME_ENV_KEY => {
                cfg.app.name = value.to_owned();
                true
            }
            LOG_LEVEL_ENV_KEY => {
                cfg.app.log_level = value.to_owned();
                true
            }
            ENABLE_EXTERNAL_CRATES_LOGGING_ENV_KEY => {
                cfg.app.enable_external_crates_logging = self.parse_or(key, value, false);
                true
            }
            _ => false,
        }
    }

    fn fill_rabbitmq<T>(&self, cfg: &mut Configs<T>, key: &str, value: &str) -> bool
    where
        T: DynamicConfigs,
    {
        match key {
            RABBITMQ_HOST_ENV_KEY if self.rabbitmq => {
                cfg.rabbitmq.host = value.to_owned();
                true
            }
            RABBITMQ_PORT_ENV_KEY if self.rabbitmq => {
                cfg.rabbitmq.port = self.parse_or(key, value, 5672);
                true
            }
            RABBITMQ_USER_ENV_KEY if self.rabbitmq => {
                cfg.rabbitmq.user = value.to_owned();
                true
            }
            RABBITMQ_PASSWORD_ENV_KEY if self.rabbitmq => {
                cfg.rabbitmq.password = value.to_owned();
                true
            }
            RABBITMQ_VHOST_ENV_KEY if self.rabbitmq => {
                cfg.rabbitmq.vhost = value.to_owned();
                true
            }
            RABBITMQ_PUBLISH_MODE_ENV_KEY if self.rabbitmq => {
                cfg.rabbitmq.publish_mode = self.parse_or(key, value, PublishMode::PerCall);
                true
            }
            _ => false,
        }
    }

    fn parse_or<V>(&self, key: &str, value: &str, default: V) -> V
    where
        V: FromStr,
        V::Err: Display,
    {
        value.parse().unwrap_or_else(|err: V::Err| {
            error!(key = key, value = value, error = err.to_string(), "parse went wrong");
            default
        })
    }

    fn fmt_name(&self, env: &Environment, name: &str) -> String {
        let env_str = env.to_string();
        if name.starts_with(&env_str) {
            return name.to_owned();
        }

        format!("{}-{}", env_str, name)
    }
}
