//! Discord webhook notifier.
//!
//! Implements the [`Notifier`] trait by queuing events to a background
//! worker that posts embeds to a webhook. Delivery is best-effort:
//! failures are logged and dropped, never retried into the engine's
//! state transitions.
//!
//! Requires the `discord` feature.

use reqwest::Client as HttpClient;
use tokio::sync::mpsc;
use tracing::warn;

use super::format::webhook_payload;
use crate::port::notifier::{Event, Notifier};

/// Configuration for the Discord notifier.
#[derive(Debug, Clone)]
pub struct DiscordSettings {
    /// Webhook URL for the channel receiving notifications.
    pub webhook_url: String,
    /// Send a message when an order's trigger fires (in addition to the
    /// execution result message).
    pub notify_triggers: bool,
}

/// Discord notifier that posts embeds to a webhook channel.
pub struct DiscordNotifier {
    /// Channel sender for queuing outbound notifications.
    sender: mpsc::UnboundedSender<Event>,
}

impl DiscordNotifier {
    /// Create a new Discord notifier and spawn the delivery worker.
    #[must_use]
    pub fn new(settings: DiscordSettings) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(deliver(settings, receiver));
        Self { sender }
    }
}

impl Notifier for DiscordNotifier {
    fn notify(&self, event: Event) {
        // Worker gone means shutdown is in progress; dropping the event
        // is the correct best-effort behavior.
        let _ = self.sender.send(event);
    }
}

async fn deliver(settings: DiscordSettings, mut receiver: mpsc::UnboundedReceiver<Event>) {
    let http = HttpClient::new();

    while let Some(event) = receiver.recv().await {
        if matches!(event, Event::Triggered(_)) && !settings.notify_triggers {
            continue;
        }

        let payload = webhook_payload(&event);
        let result = http
            .post(&settings.webhook_url)
            .json(&payload)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);

        if let Err(e) = result {
            warn!(error = %e, "Discord notification delivery failed");
        }
    }
}
