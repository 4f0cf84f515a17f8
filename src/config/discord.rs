//! Discord notification configuration.

use serde::Deserialize;

/// Discord webhook configuration.
///
/// Notifications are enabled by setting `webhook_url`; without it only
/// the log notifier runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Webhook URL for the notification channel.
    pub webhook_url: Option<String>,
    /// Send a message when a trigger fires (in addition to the
    /// execution result message).
    pub notify_triggers: bool,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            notify_triggers: true,
        }
    }
}
