use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::mention::{resolve, MentionTarget};
use crate::types::{Event, EventMetadata};

/// JSON payload accepted by the DingTalk robot endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotMessage {
    /// Always `"markdown"`.
    pub msgtype: String,
    pub markdown: Markdown,
    pub at: Mention,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Markdown {
    pub title: String,
    pub text: String,
}

/// The `at` block of a robot message.
///
/// `at_user_ids` is carried for wire-format completeness; mention
/// directives only ever populate `at_mobiles` or `is_at_all`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mention {
    #[serde(rename = "atMobiles")]
    pub at_mobiles: Vec<String>,
    #[serde(rename = "atUserIds")]
    pub at_user_ids: Vec<String>,
    #[serde(rename = "isAtAll")]
    pub is_at_all: bool,
}

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn display_time(t: DateTime<Utc>, offset: FixedOffset) -> String {
    t.with_timezone(&offset).format(TIME_FORMAT).to_string()
}

/// Map an event to a robot message, or to nothing.
///
/// `None` means the event is not notification-worthy (a clean sync, an
/// unknown kind, an auto-release without changes); the dispatcher
/// treats it as a successful no-op.
pub fn render(
    event: &Event,
    mention_directive: &str,
    display_offset: FixedOffset,
) -> Option<RobotMessage> {
    match &event.metadata {
        EventMetadata::AutoRelease { changes } => {
            // Only the first change is reported, even when one event
            // updates several workloads.
            let Some(change) = changes.first() else {
                warn!("auto-release event carries no image changes; nothing to report");
                return None;
            };

            let workloads = event
                .workloads
                .iter()
                .map(|w| w.0.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");

            let text = format!(
                "<font color=#008000 size=5>Release notice</font>  \n\n \
                 **Started**: {} \n\n **Finished**: {} \n\n \
                 **Workloads**: \n\n {} \n\n \
                 **New image**: {} \n\n **Old image**: {}",
                display_time(event.started_at, display_offset),
                display_time(event.ended_at, display_offset),
                workloads,
                change.new_image,
                change.old_image,
            );

            Some(RobotMessage {
                msgtype: "markdown".to_string(),
                markdown: Markdown {
                    title: "EventAutoRelease".to_string(),
                    text,
                },
                at: Mention::default(),
            })
        }
        EventMetadata::Sync { errors } if !errors.is_empty() => {
            let mut at = Mention::default();
            let mut at_suffix = String::new();
            match resolve(mention_directive) {
                MentionTarget::None => {}
                MentionTarget::All => at.is_at_all = true,
                MentionTarget::Specific(ids) => {
                    // Mentions must also appear in the text or the
                    // robot will not highlight them.
                    at_suffix = ids
                        .iter()
                        .map(|id| format!("@{id}"))
                        .collect::<Vec<_>>()
                        .join(" ");
                    at.at_mobiles = ids;
                }
            }

            let text = format!(
                "<font color=#FF0000 size=5>Sync errors</font>  \n\n \
                 **Errors**: {} \n\n {}",
                errors.join("\n\n"),
                at_suffix,
            );

            Some(RobotMessage {
                msgtype: "markdown".to_string(),
                markdown: Markdown {
                    title: "Sync errors".to_string(),
                    text,
                },
                at,
            })
        }
        EventMetadata::Sync { .. } => None,
        EventMetadata::Other { kind } => {
            debug!(kind = %kind, "event kind is not notification-worthy");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImageChange, WorkloadId};
    use chrono::TimeZone;

    fn offset() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn release_event(changes: Vec<ImageChange>) -> Event {
        Event::new(
            Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap(),
            Utc.with_ymd_and_hms(2023, 11, 14, 22, 15, 0).unwrap(),
            vec![WorkloadId::from("default:deployment/api")],
            EventMetadata::AutoRelease { changes },
        )
    }

    fn sync_event(errors: Vec<&str>) -> Event {
        Event::new(
            Utc::now(),
            Utc::now(),
            vec![],
            EventMetadata::Sync {
                errors: errors.into_iter().map(str::to_string).collect(),
            },
        )
    }

    fn change(new_image: &str, old_image: &str) -> ImageChange {
        ImageChange {
            workload: WorkloadId::from("default:deployment/api"),
            new_image: new_image.to_string(),
            old_image: old_image.to_string(),
        }
    }

    #[test]
    fn auto_release_reports_only_the_first_change() {
        let event = release_event(vec![
            change("repo/api:v2", "repo/api:v1"),
            change("repo/worker:v9", "repo/worker:v8"),
        ]);

        let message = render(&event, "", offset()).unwrap();
        assert_eq!(message.msgtype, "markdown");
        assert_eq!(message.markdown.title, "EventAutoRelease");
        assert!(message.markdown.text.contains("repo/api:v2"));
        assert!(message.markdown.text.contains("repo/api:v1"));
        assert!(!message.markdown.text.contains("repo/worker:v9"));
    }

    #[test]
    fn auto_release_renders_timestamps_in_display_offset() {
        let event = release_event(vec![change("repo/api:v2", "repo/api:v1")]);

        let message = render(&event, "", offset()).unwrap();
        assert!(message.markdown.text.contains("2023-11-15 06:13:20"));
        assert!(message.markdown.text.contains("2023-11-15 06:15:00"));
    }

    #[test]
    fn auto_release_lists_workloads_and_mentions_nobody() {
        let event = release_event(vec![change("repo/api:v2", "repo/api:v1")]);

        let message = render(&event, "ALL", offset()).unwrap();
        assert!(message.markdown.text.contains("default:deployment/api"));
        assert!(!message.at.is_at_all);
        assert!(message.at.at_mobiles.is_empty());
    }

    #[test]
    fn auto_release_without_changes_is_suppressed() {
        assert!(render(&release_event(vec![]), "", offset()).is_none());
    }

    #[test]
    fn clean_sync_is_suppressed() {
        assert!(render(&sync_event(vec![]), "ALL", offset()).is_none());
    }

    #[test]
    fn sync_errors_appear_in_order() {
        let event = sync_event(vec!["first error", "second error"]);

        let message = render(&event, "", offset()).unwrap();
        assert_eq!(message.markdown.title, "Sync errors");
        let text = &message.markdown.text;
        assert!(text.contains("first error\n\nsecond error"));
    }

    #[test]
    fn sync_with_all_directive_mentions_everyone() {
        let message = render(&sync_event(vec!["boom"]), "ALL", offset()).unwrap();
        assert!(message.at.is_at_all);
        assert!(message.at.at_mobiles.is_empty());
    }

    #[test]
    fn sync_with_identifiers_mentions_them_in_block_and_text() {
        let message = render(&sync_event(vec!["boom"]), "135 136", offset()).unwrap();
        assert_eq!(message.at.at_mobiles, vec!["135", "136"]);
        assert!(!message.at.is_at_all);
        assert!(message.markdown.text.contains("@135 @136"));
    }

    #[test]
    fn malformed_directive_still_delivers_the_alert() {
        let message = render(&sync_event(vec!["boom"]), "135 all", offset()).unwrap();
        assert!(!message.at.is_at_all);
        assert!(message.at.at_mobiles.is_empty());
        assert!(message.markdown.text.contains("boom"));
    }

    #[test]
    fn unknown_kind_is_suppressed() {
        let event = Event::new(
            Utc::now(),
            Utc::now(),
            vec![],
            EventMetadata::Other {
                kind: "commit".to_string(),
            },
        );
        assert!(render(&event, "", offset()).is_none());
    }

    #[test]
    fn wire_format_uses_camel_case_names() {
        let message = render(&sync_event(vec!["boom"]), "ALL", offset()).unwrap();
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["msgtype"], "markdown");
        assert_eq!(json["at"]["isAtAll"], true);
        assert!(json["at"]["atMobiles"].as_array().unwrap().is_empty());
        assert!(json["at"]["atUserIds"].as_array().unwrap().is_empty());
    }
}
