//! Discord embed rendering for engine events.

use serde_json::{json, Value};

use crate::port::notifier::Event;

/// Embed accent colors.
const COLOR_TRIGGER: u32 = 0xF5A623;
const COLOR_SUCCESS: u32 = 0x2ECC71;
const COLOR_FAILURE: u32 = 0xE74C3C;
const COLOR_INFO: u32 = 0x3498DB;

/// Render an event as a Discord webhook payload.
///
/// The owner is mentioned in the message body so the requesting user is
/// pinged; everything else lives in the embed.
#[must_use]
pub fn webhook_payload(event: &Event) -> Value {
    match event {
        Event::Triggered(e) => json!({
            "content": format!("<@{}>", e.owner),
            "embeds": [{
                "title": "Trigger hit",
                "color": COLOR_TRIGGER,
                "description": format!(
                    "Asset #{} listed at {} (trigger {})",
                    e.asset_id, e.listing_price, e.trigger_price
                ),
                "footer": { "text": format!("order {}", e.order_id) },
            }],
        }),
        Event::ExecutionCompleted(e) => {
            let (title, color) = if e.success {
                ("Purchase confirmed", COLOR_SUCCESS)
            } else if e.compensated {
                ("Purchase failed - order re-armed", COLOR_FAILURE)
            } else {
                ("Purchase skipped", COLOR_INFO)
            };
            json!({
                "content": format!("<@{}>", e.owner),
                "embeds": [{
                    "title": title,
                    "color": color,
                    "description": format!("Asset #{}: {}", e.asset_id, e.details),
                    "footer": { "text": format!("order {}", e.order_id) },
                }],
            })
        }
        Event::FloorChanged(e) => {
            let previous = e
                .previous
                .map_or_else(|| "none".to_string(), |p| p.to_string());
            json!({
                "embeds": [{
                    "title": "Floor moved",
                    "color": COLOR_INFO,
                    "description": format!("{} -> {}", previous, e.floor),
                    "footer": { "text": format!("order {}", e.order_id) },
                }],
            })
        }
        Event::OrderDefect(e) => json!({
            "content": format!("<@{}>", e.owner),
            "embeds": [{
                "title": "Watch-order needs attention",
                "color": COLOR_FAILURE,
                "description": format!(
                    "Order {} has criteria that no longer compile: {}. \
                     It stays active but will never match until fixed.",
                    e.order_id, e.reason
                ),
            }],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetId, OrderId, OwnerId, Price};
    use crate::port::notifier::TriggerEvent;

    #[test]
    fn trigger_payload_mentions_owner_and_prices() {
        let event = Event::Triggered(TriggerEvent {
            order_id: OrderId::new(),
            owner: OwnerId::from("42"),
            asset_id: AssetId::from("1001"),
            listing_price: Price::from_coin_str("0.04").unwrap(),
            trigger_price: Price::from_coin_str("0.05").unwrap(),
        });

        let payload = webhook_payload(&event);

        assert_eq!(payload["content"], "<@42>");
        let description = payload["embeds"][0]["description"].as_str().unwrap();
        assert!(description.contains("0.04"));
        assert!(description.contains("0.05"));
    }
}
