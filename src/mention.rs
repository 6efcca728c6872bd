use tracing::warn;

/// The set of chat recipients a message actively pages.
///
/// Exactly one variant is active. `Specific` is only produced from a
/// non-empty, single-space-delimited identifier list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionTarget {
    /// Mention nobody.
    None,
    /// Mention everyone in the channel.
    All,
    /// Mention the listed identifiers.
    Specific(Vec<String>),
}

/// Resolve a raw mention directive into a [`MentionTarget`].
///
/// Malformed directives degrade to `None` with a warning instead of
/// failing: a bad mention setting must never block delivery of the
/// underlying alert.
///
/// Rules, applied to the trimmed directive:
/// - empty: mention nobody
/// - `all` (any case): mention everyone; `all` is exclusive and must
///   not be combined with identifiers
/// - consecutive spaces between identifiers are ambiguous and rejected
/// - otherwise, single-space-separated identifiers
pub fn resolve(directive: &str) -> MentionTarget {
    let trimmed = directive.trim();
    if trimmed.is_empty() {
        return MentionTarget::None;
    }

    let upper = trimmed.to_uppercase();
    if upper == "ALL" {
        return MentionTarget::All;
    }
    if upper.contains("ALL") {
        warn!(
            directive = %directive,
            "mention directive mixes ALL with other tokens; ALL must be used alone"
        );
        return MentionTarget::None;
    }
    if trimmed.contains("  ") {
        warn!(
            directive = %directive,
            "mention directive contains consecutive spaces; identifiers must be separated by a single space"
        );
        return MentionTarget::None;
    }

    MentionTarget::Specific(trimmed.split(' ').map(str::to_string).collect())
}
