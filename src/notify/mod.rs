//! Short lived, user visible notifications: fetch failures, swap results.
//!
//! Delivery is best effort. A notification that cannot be delivered is logged and
//! dropped, it never fails the operation that raised it.

pub mod slack;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use derive_more::Display;

use crate::config::Config;
pub use slack::SlackNotifier;

const DEFAULT_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NotificationStatus {
    #[display("success")]
    Success,
    #[display("error")]
    Error,
    #[display("info")]
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub status: NotificationStatus,
    /// How long a renderer should keep it on screen
    pub duration: Duration,
}

impl Notification {
    pub fn new(title: &str, status: NotificationStatus) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            status,
            duration: DEFAULT_DURATION,
        }
    }

    pub fn success(title: &str) -> Self {
        Self::new(title, NotificationStatus::Success)
    }

    pub fn error(title: &str) -> Self {
        Self::new(title, NotificationStatus::Error)
    }

    pub fn info(title: &str) -> Self {
        Self::new(title, NotificationStatus::Info)
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Where notifications go
#[derive(Debug, Clone)]
pub enum Notifier {
    /// Through the logger
    Console,
    Slack(SlackNotifier),
    /// Kept in memory, for tests and embedding
    Recording(Arc<Mutex<Vec<Notification>>>),
}

impl Notifier {
    /// Slack when a token is configured, console otherwise
    pub fn from_config(config: &Config) -> Self {
        let Some(token) = &config.slack_token else {
            return Self::Console;
        };
        match SlackNotifier::new(token, &config.slack_channel) {
            Ok(slack) => Self::Slack(slack),
            Err(e) => {
                log::warn!("notify: Slack disabled, falling back to console: {e}");
                Self::Console
            }
        }
    }

    pub fn recording() -> Self {
        Self::Recording(Arc::default())
    }

    /// Notifications captured by a `Recording` notifier
    pub fn recorded(&self) -> Vec<Notification> {
        match self {
            Self::Recording(sink) => sink.lock().unwrap_or_else(PoisonError::into_inner).clone(),
            _ => Vec::new(),
        }
    }

    pub async fn notify(&self, notification: Notification) {
        match self {
            Self::Console => log_notification(&notification),
            Self::Slack(slack) => {
                log_notification(&notification);
                if let Err(e) = slack.send(&notification).await {
                    log::error!("notify: failed to deliver to Slack: {e}");
                }
            }
            Self::Recording(sink) => sink
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(notification),
        }
    }
}

fn log_notification(notification: &Notification) {
    let text = notification.description.as_ref().map_or_else(
        || notification.title.clone(),
        |description| format!("{}: {description}", notification.title),
    );
    match notification.status {
        NotificationStatus::Error => log::error!("{text}"),
        NotificationStatus::Success | NotificationStatus::Info => log::info!("{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_defaults() {
        let n = Notification::error("Invalid amount");
        assert_eq!(n.status, NotificationStatus::Error);
        assert_eq!(n.duration, Duration::from_secs(3));
        assert_eq!(n.description, None);
        assert_eq!(n.status.to_string(), "error");
    }

    #[tokio::test]
    async fn test_recording_notifier_keeps_order() {
        let notifier = Notifier::recording();
        notifier.notify(Notification::info("first")).await;
        notifier.notify(Notification::success("second")).await;

        let titles: Vec<String> = notifier.recorded().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_recording_survives_poisoned_lock() {
        let notifier = Notifier::recording();
        notifier.notify(Notification::info("before")).await;

        let Notifier::Recording(sink) = &notifier else {
            unreachable!("recording notifier");
        };
        let sink = Arc::clone(sink);
        let poisoned = std::thread::spawn(move || {
            let _guard = sink.lock().unwrap();
            panic!("poison the sink");
        })
        .join();
        assert!(poisoned.is_err());

        notifier.notify(Notification::info("after")).await;

        let titles: Vec<String> = notifier.recorded().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["before", "after"]);
    }

    #[test]
    fn test_console_when_no_slack_token() {
        let config = Config::test_config();
        assert!(matches!(Notifier::from_config(&config), Notifier::Console));
    }
}
