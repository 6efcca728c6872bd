//! A best-effort DingTalk notifier for CD pipeline events.
//!
//! This crate converts structured deployment and sync events into
//! markdown chat messages, signs the webhook call when a shared secret
//! is configured, resolves a mention-target policy for error alerts,
//! and posts the payload to a DingTalk robot endpoint.
//!
//! ## Guarantees
//! - One HTTP POST per actionable event, none otherwise
//! - Signed requests whenever a non-empty secret is configured
//! - `send` never fails or blocks the caller on delivery problems
//! - Concurrent `send` calls are safe without locking
//!
//! ## Non-Guarantees
//! - Delivery: the design is fire-and-forget; failures are logged,
//!   not surfaced
//! - Retry, backoff, or timeouts beyond the transport defaults
//! - HTTP status validation: a 4xx/5xx robot response is not
//!   distinguished from success
//!
//! Event production, exporter registries, and process configuration
//! loading live elsewhere; this crate is only the transformation and
//! delivery engine.

mod error;
mod mention;
mod message;
mod notifier;
mod signing;
mod types;

pub use error::DeliveryError;
pub use mention::{resolve, MentionTarget};
pub use message::{render, Markdown, Mention, RobotMessage};
pub use notifier::{Notifier, DEFAULT_WEBHOOK_URL};
pub use signing::sign;
pub use types::{Event, EventMetadata, ImageChange, RobotConfig, WorkloadId};
