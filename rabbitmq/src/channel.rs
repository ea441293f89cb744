use crate::errors::AmqpError;
use lapin::{types::LongString, Channel, Connection, ConnectionProperties};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tracing::{debug, error, warn};

pub const REPLY_SUCCESS: u16 = 200;

/// Opens sessions against one broker address and counts the ones still alive.
#[derive(Debug, Clone)]
pub struct Connector {
    uri: String,
    connection_name: String,
    live: Arc<AtomicUsize>,
}

impl Connector {
    pub fn new(uri: impl Into<String>, connection_name: impl Into<String>) -> Connector {
        Connector {
            uri: uri.into(),
            connection_name: connection_name.into(),
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_connection_name(mut self, name: impl Into<String>) -> Connector {
        self.connection_name = name.into();
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn live_sessions(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Connects and opens the single channel of the session. No retry: the
    /// first failure is returned. A connection whose channel could not be
    /// opened is closed before returning.
    pub async fn open(&self) -> Result<Session, AmqpError> {
        debug!("creating amqp connection...");
        let options = ConnectionProperties::default()
            .with_connection_name(LongString::from(self.connection_name.clone()));

        let conn = match Connection::connect(&self.uri, options).await {
            Ok(c) => Ok(c),
            Err(err) => {
                error!(error = err.to_string(), "failure to connect");
                Err(AmqpError::ConnectionError)
            }
        }?;
        debug!("amqp connected");

        debug!("creating amqp channel...");
        let channel = match conn.create_channel().await {
            Ok(c) => c,
            Err(err) => {
                error!(error = err.to_string(), "error to create the channel");
                if let Err(err) = conn.close(REPLY_SUCCESS, "channel failure").await {
                    warn!(error = err.to_string(), "failure to close connection");
                }
                return Err(AmqpError::ChannelError);
            }
        };
        debug!("channel created");

        self.live.fetch_add(1, Ordering::SeqCst);

        Ok(Session {
            conn,
            channel,
            live: self.live.clone(),
        })
    }
}

/// A connection with exactly one channel.
pub struct Session {
    conn: Connection,
    channel: Channel,
    live: Arc<AtomicUsize>,
}

impl Session {
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn is_connected(&self) -> bool {
        self.conn.status().connected() && self.channel.status().connected()
    }

    /// Closes the channel then the connection. Close failures are only logged,
    /// the broker may already have torn the channel down.
    pub async fn close(self) {
        if self.channel.status().connected() {
            if let Err(err) = self.channel.close(REPLY_SUCCESS, "bye").await {
                warn!(error = err.to_string(), "failure to close channel");
            }
        }

        if let Err(err) = self.conn.close(REPLY_SUCCESS, "bye").await {
            warn!(error = err.to_string(), "failure to close connection");
        }
        debug!("amqp session closed");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}
