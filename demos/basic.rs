use chrono::Utc;
use dingtalk_notifier::{Event, EventMetadata, ImageChange, Notifier, RobotConfig, WorkloadId};

#[tokio::main]
async fn main() {
    let config = RobotConfig::new("your-access-token")
        .with_secret("your-secret")
        .with_mention_directive("13512345678 13587654321");

    let notifier = Notifier::new(config);

    let event = Event::new(
        Utc::now(),
        Utc::now(),
        vec![WorkloadId::from("default:deployment/api")],
        EventMetadata::AutoRelease {
            changes: vec![ImageChange {
                workload: WorkloadId::from("default:deployment/api"),
                new_image: "registry.example.com/api:v2".to_string(),
                old_image: "registry.example.com/api:v1".to_string(),
            }],
        },
    );

    notifier.send(&event).await;
}
