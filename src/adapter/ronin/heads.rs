//! Chain-head subscription over WebSocket.
//!
//! Subscribes to `newHeads` and forwards block numbers into an mpsc
//! channel the engine consumes. The connection resubscribes with capped
//! exponential backoff; missed heads during a reconnect are harmless
//! because the engine only cares that a new head arrived.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::port::ChainHead;

/// Initial reconnect delay.
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Cap on the reconnect delay.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// WebSocket chain-head source.
pub struct HeadStream {
    /// RPC WebSocket endpoint (e.g. `wss://api.roninchain.com/rpc/ws`).
    ws_url: String,
}

impl HeadStream {
    /// Create a head stream for the given WebSocket endpoint.
    #[must_use]
    pub const fn new(ws_url: String) -> Self {
        Self { ws_url }
    }

    /// Spawn the subscription worker and return the receiving end.
    ///
    /// The worker stops once the receiver is dropped.
    #[must_use]
    pub fn spawn(self, buffer: usize) -> mpsc::Receiver<ChainHead> {
        let (tx, rx) = mpsc::channel(buffer);
        tokio::spawn(async move {
            self.run(tx).await;
        });
        rx
    }

    async fn run(self, tx: mpsc::Sender<ChainHead>) {
        let mut backoff = INITIAL_BACKOFF;
        loop {
            match self.subscribe_once(&tx).await {
                Ok(()) => {
                    backoff = INITIAL_BACKOFF;
                    info!("Head subscription closed");
                }
                Err(e) => {
                    warn!(error = %e, "Head subscription failed");
                }
            }

            if tx.is_closed() {
                return;
            }

            debug!(delay_secs = backoff.as_secs(), "Reconnecting head stream");
            tokio::time::sleep(backoff).await;
            backoff = (backoff * 2).min(MAX_BACKOFF);
        }
    }

    async fn subscribe_once(&self, tx: &mpsc::Sender<ChainHead>) -> Result<()> {
        info!(url = %self.ws_url, "Connecting head stream");
        let (mut ws, _response) = connect_async(&self.ws_url).await?;

        let subscribe = json!({
            "id": 1,
            "jsonrpc": "2.0",
            "method": "eth_subscribe",
            "params": ["newHeads"],
        });
        ws.send(Message::Text(subscribe.to_string())).await?;

        while let Some(message) = ws.next().await {
            match message? {
                Message::Text(text) => {
                    if let Some(number) = parse_head_number(&text) {
                        if tx.send(ChainHead::new(number)).await.is_err() {
                            // Engine gone; stop cleanly.
                            return Ok(());
                        }
                    }
                }
                Message::Ping(payload) => ws.send(Message::Pong(payload)).await?,
                Message::Close(_) => break,
                _ => {}
            }
        }

        Ok(())
    }
}

/// Extract the block number from a `newHeads` notification, if the
/// message is one.
fn parse_head_number(text: &str) -> Option<u64> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let hex = value
        .get("params")?
        .get("result")?
        .get("number")?
        .as_str()?;
    u64::from_str_radix(hex.trim_start_matches("0x"), 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_new_heads_notification() {
        let text = r#"{
            "jsonrpc": "2.0",
            "method": "eth_subscription",
            "params": {
                "subscription": "0xabc",
                "result": { "number": "0x1b4", "hash": "0xdead" }
            }
        }"#;

        assert_eq!(parse_head_number(text), Some(436));
    }

    #[test]
    fn ignores_subscription_ack_and_garbage() {
        assert_eq!(parse_head_number(r#"{"id":1,"jsonrpc":"2.0","result":"0xsub"}"#), None);
        assert_eq!(parse_head_number("not json"), None);
    }
}
