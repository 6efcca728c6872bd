use thiserror::Error;

/// Failures that can occur while delivering a notification.
///
/// These never cross the public [`send`](crate::Notifier::send)
/// boundary; they are logged and swallowed, so the only way to observe
/// them is through the tracing channel.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The HTTP request could not be completed.
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The message payload could not be serialized.
    #[error("payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
