use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigsError {
    #[error("failure to setup the logger")]
    LoggingSetupError,
}
