use crate::errors::AmqpError;
use lapin::{options::QueueDeclareOptions, types::FieldTable, Channel};
use tracing::{debug, error};

/// Declaration of a plain work queue: not durable, not exclusive, never
/// auto-deleted, no extra arguments. Declaring it again with the same
/// properties reuses the existing queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueDefinition {
    pub(crate) name: String,
    pub(crate) durable: bool,
    pub(crate) delete: bool,
    pub(crate) exclusive: bool,
    pub(crate) passive: bool,
    pub(crate) no_wait: bool,
}

impl QueueDefinition {
    pub fn new(name: impl Into<String>) -> QueueDefinition {
        QueueDefinition {
            name: name.into(),
            durable: false,
            delete: false,
            exclusive: false,
            passive: false,
            no_wait: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn options(&self) -> QueueDeclareOptions {
        QueueDeclareOptions {
            passive: self.passive,
            durable: self.durable,
            exclusive: self.exclusive,
            auto_delete: self.delete,
            nowait: self.no_wait,
        }
    }

    /// Returns the name the broker gave the queue. It differs from the
    /// requested one only for an empty name, where the broker generates one.
    pub async fn declare(&self, channel: &Channel) -> Result<String, AmqpError> {
        debug!("declaring queue: {:?}", self.name);

        let queue = channel
            .queue_declare(&self.name, self.options(), FieldTable::default())
            .await
            .map_err(|err| {
                error!(
                    error = err.to_string(),
                    queue = self.name,
                    "failure to declare queue"
                );
                AmqpError::DeclareQueueError(self.name.clone())
            })?;

        Ok(queue.name().as_str().to_owned())
    }
}
