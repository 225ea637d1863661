//! Inbound webhook delivery types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body field the provider uses to name the event.
pub const EVENT_NAME_FIELD: &str = "event_name";

/// One reshaped inbound webhook delivery.
///
/// The trigger wraps every POST the provider sends to the callback URL
/// into one of these: headers and body verbatim, the extracted event
/// type, the configured account, and a timestamp generated at receipt.
/// Deliveries are independent -- no deduplication and no ordering
/// guarantee across them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// HTTP headers of the delivery.
    pub headers: HashMap<String, String>,

    /// Raw JSON body as posted by the provider.
    pub body: Value,

    /// Event type from the body's `event_name` field; empty when absent.
    pub event: String,

    /// The Official Account this trigger is configured for.
    pub oa_id: String,

    /// When the delivery was received.
    pub timestamp: DateTime<Utc>,
}

impl WebhookEvent {
    /// Reshape a raw delivery, extracting the event type and stamping the
    /// receipt time.
    pub fn from_delivery(
        headers: HashMap<String, String>,
        body: Value,
        oa_id: impl Into<String>,
    ) -> Self {
        let event = body
            .get(EVENT_NAME_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        Self {
            headers,
            body,
            event,
            oa_id: oa_id.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_event_name() {
        let event = WebhookEvent::from_delivery(
            HashMap::new(),
            json!({"event_name": "user_send_text", "message": "hi"}),
            "oa-1",
        );
        assert_eq!(event.event, "user_send_text");
        assert_eq!(event.oa_id, "oa-1");
        assert_eq!(event.body["message"], "hi");
    }

    #[test]
    fn missing_event_name_is_empty() {
        let event = WebhookEvent::from_delivery(HashMap::new(), json!({"message": "hi"}), "oa-1");
        assert_eq!(event.event, "");
    }

    #[test]
    fn non_string_event_name_is_empty() {
        let event = WebhookEvent::from_delivery(HashMap::new(), json!({"event_name": 7}), "oa-1");
        assert_eq!(event.event, "");
    }

    #[test]
    fn headers_preserved() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_owned(), "abc".to_owned());
        let event = WebhookEvent::from_delivery(headers, json!({}), "oa-1");
        assert_eq!(event.headers.get("x-request-id").unwrap(), "abc");
    }
}
