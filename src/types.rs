use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a workload affected by an event.
///
/// This is a strongly-typed wrapper to avoid accidental mixing
/// of workload identifiers with other string values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkloadId(pub String);

impl std::fmt::Display for WorkloadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkloadId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for WorkloadId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One container image update inside an auto-release event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageChange {
    /// Workload whose container image changed.
    pub workload: WorkloadId,

    /// Image reference rolled out by the release.
    pub new_image: String,

    /// Image reference that was running before the release.
    pub old_image: String,
}

/// Kind-specific event payload.
///
/// Each event kind carries its own strongly-typed metadata, so the
/// formatter is an exhaustive match with no runtime downcasting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventMetadata {
    /// An automatic deployment triggered by an image update.
    AutoRelease { changes: Vec<ImageChange> },

    /// A reconciliation pass between desired and live state.
    /// A clean sync carries an empty error list.
    Sync { errors: Vec<String> },

    /// Any other event kind. Not notification-worthy; the kind tag is
    /// kept for logging only.
    Other { kind: String },
}

/// A deployment/sync event produced by the upstream pipeline.
///
/// Events are read-only to this crate; the producer owns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// When the pipeline started processing the event.
    pub started_at: DateTime<Utc>,

    /// When the pipeline finished processing the event.
    pub ended_at: DateTime<Utc>,

    /// Workloads affected by the event.
    pub workloads: Vec<WorkloadId>,

    /// Kind-specific payload.
    pub metadata: EventMetadata,
}

impl Event {
    pub fn new(
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        workloads: Vec<WorkloadId>,
        metadata: EventMetadata,
    ) -> Self {
        Self {
            started_at,
            ended_at,
            workloads,
            metadata,
        }
    }
}

/// Configuration for one DingTalk robot webhook.
///
/// A pure configuration object with no internal state: loaded once at
/// startup and immutable thereafter. Validating required settings is
/// the bootstrap layer's job; this crate only consumes the values.
#[derive(Debug, Clone)]
pub struct RobotConfig {
    /// Robot access token, always sent as the `access_token` query parameter.
    pub access_token: String,

    /// Optional shared secret. When set and non-empty, every request
    /// carries a `timestamp` and `sign` query parameter.
    pub secret: Option<String>,

    /// Raw mention directive: empty (mention nobody), `ALL` (mention
    /// everyone), or space-separated identifiers.
    pub mention_directive: String,

    /// Timezone offset used when rendering event timestamps.
    pub display_offset: FixedOffset,
}

impl RobotConfig {
    /// Create a configuration with the given access token.
    ///
    /// Defaults:
    /// - no secret (unsigned requests)
    /// - empty mention directive (mention nobody)
    /// - display offset UTC+08:00
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            secret: None,
            mention_directive: String::new(),
            display_offset: FixedOffset::east_opt(8 * 3600).expect("offset in range"),
        }
    }

    /// Set the shared secret used to sign requests.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set the mention directive applied to sync-error alerts.
    pub fn with_mention_directive(mut self, directive: impl Into<String>) -> Self {
        self.mention_directive = directive.into();
        self
    }

    /// Set the timezone offset used for timestamp rendering.
    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = offset;
        self
    }
}
