use eyre::Result;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use super::{Notification, NotificationStatus};

const SLACK_POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

#[derive(Debug, Clone)]
pub struct SlackNotifier {
    token: String,
    channel: String,
    client: Client,
}

impl SlackNotifier {
    /// # Errors
    /// * If the HTTP client cannot be built
    pub fn new(token: &str, channel: &str) -> Result<Self> {
        // Create a client with a timeout
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            token: token.to_string(),
            channel: channel.to_string(),
            client,
        })
    }

    pub async fn send(&self, notification: &Notification) -> Result<()> {
        let payload = json!({
            "channel": self.channel,
            "text": format_message(notification),
            "username": "Tokenboard",
            "icon_emoji": ":currency_exchange:"
        });

        let response = self
            .client
            .post(SLACK_POST_MESSAGE_URL)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        // Check if Slack API returned success
        if !response["ok"].as_bool().unwrap_or(false) {
            return Err(eyre::eyre!(
                "Slack API error: {}",
                response["error"].as_str().unwrap_or("unknown error")
            ));
        }

        Ok(())
    }
}

fn format_message(notification: &Notification) -> String {
    let prefix = match notification.status {
        NotificationStatus::Success => ":white_check_mark:",
        NotificationStatus::Error => ":warning:",
        NotificationStatus::Info => ":information_source:",
    };
    match &notification.description {
        Some(description) => format!("{prefix} {}: {description}", notification.title),
        None => format!("{prefix} {}", notification.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(
            format_message(&Notification::error("Error fetching prices")),
            ":warning: Error fetching prices"
        );
        assert_eq!(
            format_message(&Notification::success("Swap successful!").with_description("10 ETH -> 16459.3 USD")),
            ":white_check_mark: Swap successful!: 10 ETH -> 16459.3 USD"
        );
    }
}
