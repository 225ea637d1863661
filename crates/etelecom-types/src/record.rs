//! Provider data model and per-item execution records.
//!
//! [`Account`] and [`Template`] mirror the arrays returned by the ListOA /
//! ListTemplates endpoints; they are fetched fresh on every dropdown
//! population and never cached. [`ExecutionRecord`] is the 1:1 per-item
//! output shape every action node produces.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A Zalo Official Account as returned by `shop.Zalo/ListOA`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Display name of the account.
    #[serde(default)]
    pub name: String,

    /// Provider identifier of the account.
    #[serde(default)]
    pub oa_id: String,

    /// Currently registered webhook callback URL, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    /// Remaining provider fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A ZNS template as returned by `shop.Zalo/ListTemplates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Display name of the template.
    #[serde(default)]
    pub name: String,

    /// Numeric template identifier.
    pub template_id: i64,
}

/// One entry in a selection dropdown.
///
/// `value` keeps the provider's own type: a string for account IDs, a
/// number for template IDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Label shown to the user.
    pub name: String,

    /// Value submitted when the option is chosen.
    pub value: Value,

    /// Secondary description line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldOption {
    /// Build an option from label, value, and description.
    pub fn new(name: impl Into<String>, value: Value, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            description: Some(description.into()),
        }
    }
}

/// Per-item output record.
///
/// Every input item maps to exactly one record, in input order. A record
/// is either a success payload (`success: true` plus echoed parameters and
/// the raw provider response) or a failure marker (`success: false` plus
/// the error message).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// The record body handed back to the host.
    pub json: Value,

    /// Index of the input item this record was produced from.
    pub source_item: usize,
}

impl ExecutionRecord {
    /// Build a success record.
    ///
    /// `body` must be a JSON object; `success: true` is merged into it.
    pub fn success(source_item: usize, body: Value) -> Self {
        let mut map = match body {
            Value::Object(map) => map,
            other => {
                // Non-object payloads are wrapped rather than dropped.
                let mut map = Map::new();
                map.insert("response".into(), other);
                map
            }
        };
        map.insert("success".into(), Value::Bool(true));
        Self {
            json: Value::Object(map),
            source_item,
        }
    }

    /// Build a failure record carrying the error message.
    pub fn failure(source_item: usize, error: &impl std::fmt::Display) -> Self {
        Self {
            json: json!({
                "success": false,
                "error": error.to_string(),
            }),
            source_item,
        }
    }

    /// Whether this record marks a successful item.
    pub fn is_success(&self) -> bool {
        self.json
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_deserializes_extra_fields() {
        let acc: Account = serde_json::from_str(
            r#"{"name":"Shop","oa_id":"oa-1","webhook_url":"https://cb.test/hook","plan":"pro"}"#,
        )
        .unwrap();
        assert_eq!(acc.name, "Shop");
        assert_eq!(acc.oa_id, "oa-1");
        assert_eq!(acc.webhook_url.as_deref(), Some("https://cb.test/hook"));
        assert_eq!(acc.extra.get("plan").and_then(Value::as_str), Some("pro"));
    }

    #[test]
    fn account_webhook_url_optional() {
        let acc: Account = serde_json::from_str(r#"{"name":"Shop","oa_id":"oa-1"}"#).unwrap();
        assert!(acc.webhook_url.is_none());
    }

    #[test]
    fn template_id_is_numeric() {
        let tpl: Template = serde_json::from_str(r#"{"name":"OTP","template_id":42}"#).unwrap();
        assert_eq!(tpl.template_id, 42);
    }

    #[test]
    fn success_record_merges_flag() {
        let rec = ExecutionRecord::success(3, json!({"oa_id": "oa-1", "response": {"ok": true}}));
        assert!(rec.is_success());
        assert_eq!(rec.source_item, 3);
        assert_eq!(rec.json["oa_id"], "oa-1");
        assert_eq!(rec.json["response"]["ok"], true);
    }

    #[test]
    fn success_record_wraps_non_object() {
        let rec = ExecutionRecord::success(0, json!("plain"));
        assert!(rec.is_success());
        assert_eq!(rec.json["response"], "plain");
    }

    #[test]
    fn failure_record_shape() {
        let rec = ExecutionRecord::failure(1, &"boom");
        assert!(!rec.is_success());
        assert_eq!(rec.json["error"], "boom");
        assert_eq!(rec.source_item, 1);
    }
}
