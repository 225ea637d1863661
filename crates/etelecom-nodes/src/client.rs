//! HTTP client for the eTelecom Zalo OA API.
//!
//! [`EtelecomClient`] wraps a [`reqwest::Client`] and an [`ApiCredential`]
//! to provide typed methods for the endpoints the nodes use. Every call is
//! a single `POST` with a JSON body and bearer auth -- no retry, no
//! backoff, one attempt per invocation.
//!
//! The provider sometimes answers with JSON and sometimes with JSON
//! encoded as a string; [`parse_body`] normalizes both into the same
//! [`Value`] so callers never see the difference.

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use etelecom_types::credential::CREDENTIAL_TEST_PATH;
use etelecom_types::{Account, ApiCredential, ApiError, Template};

/// `shop.Zalo/ListOA` -- list Official Accounts.
pub const LIST_OA_PATH: &str = "shop.Zalo/ListOA";
/// `shop.Zalo/ListTemplates` -- list ZNS templates.
pub const LIST_TEMPLATES_PATH: &str = "shop.Zalo/ListTemplates";
/// `shop.Zalo/CheckConsent` -- query consent state for a phone number.
pub const CHECK_CONSENT_PATH: &str = "shop.Zalo/CheckConsent";
/// `shop.Zalo/RequestConsent` -- ask a phone number for consent.
pub const REQUEST_CONSENT_PATH: &str = "shop.Zalo/RequestConsent";
/// `shop.Zalo/RequestUserInfo` -- ask a Zalo user to share their info.
pub const REQUEST_USER_INFO_PATH: &str = "shop.Zalo/RequestUserInfo";
/// `shop.Zalo/OASendText` -- send a text message to a user.
pub const SEND_TEXT_PATH: &str = "shop.Zalo/OASendText";
/// `shop.Zalo/SendZNS` -- send a templated ZNS notification.
pub const SEND_ZNS_PATH: &str = "shop.Zalo/SendZNS";
/// `shop.Zalo/UpdateShopOA` -- update account settings (webhook URL).
pub const UPDATE_SHOP_OA_PATH: &str = "shop.Zalo/UpdateShopOA";

/// Delivery mode for ZNS sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZnsMode {
    /// Sandbox delivery; the notification is not billed or delivered to
    /// real recipients.
    Development,
}

/// Request body for [`EtelecomClient::send_zns`].
#[derive(Debug, Clone, Serialize)]
pub struct SendZnsRequest {
    /// Sending Official Account.
    pub oa_id: String,
    /// Recipient phone number.
    pub phone: String,
    /// ZNS template to render.
    pub template_id: i64,
    /// Caller-supplied tracking identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    /// Template placeholder values, already parsed from JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_data: Option<Value>,
    /// Set to [`ZnsMode::Development`] for sandbox sends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ZnsMode>,
}

/// HTTP client for the eTelecom Zalo OA API.
///
/// The base URL comes from the credential's `domain`, so pointing a test
/// at a mock server only requires a credential with a local domain.
pub struct EtelecomClient {
    /// Shared HTTP client.
    http: Client,
    /// Credential supplying the bearer token and base URL.
    credential: ApiCredential,
}

impl EtelecomClient {
    /// Create a client from a host-supplied credential.
    pub fn new(credential: ApiCredential) -> Self {
        Self {
            http: Client::new(),
            credential,
        }
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        self.credential.base_url()
    }

    /// Issue one `POST {base_url}/{path}` with bearer auth.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.base_url(), path);

        debug!(url = %url, "calling eTelecom API");

        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.credential.authorization())
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_owned()
            } else {
                text
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        parse_body(&text)
    }

    /// List the Official Accounts the credential can operate on.
    ///
    /// The response must carry an `accounts` array; anything else is an
    /// [`ApiError::InvalidResponse`].
    pub async fn list_oa(&self) -> Result<Vec<Account>, ApiError> {
        let response = self.post(LIST_OA_PATH, &json!({})).await?;
        extract_array(&response, "accounts")
    }

    /// List the ZNS templates available to the credential.
    pub async fn list_templates(&self) -> Result<Vec<Template>, ApiError> {
        let response = self.post(LIST_TEMPLATES_PATH, &json!({})).await?;
        extract_array(&response, "templates")
    }

    /// Verify the credential by fetching the current account.
    pub async fn current_account(&self) -> Result<Value, ApiError> {
        self.post(CREDENTIAL_TEST_PATH, &json!({})).await
    }

    /// Query the consent state of a phone number.
    pub async fn check_consent(&self, oa_id: &str, phone: &str) -> Result<Value, ApiError> {
        self.post(
            CHECK_CONSENT_PATH,
            &json!({
                "oa_id": oa_id,
                "phone": phone,
            }),
        )
        .await
    }

    /// Ask a phone number for consent to a given call type.
    pub async fn request_consent(
        &self,
        oa_id: &str,
        phone: &str,
        call_type: &str,
        reason_code: &str,
    ) -> Result<Value, ApiError> {
        self.post(
            REQUEST_CONSENT_PATH,
            &json!({
                "oa_id": oa_id,
                "phone": phone,
                "call_type": call_type,
                "reason_code": reason_code,
            }),
        )
        .await
    }

    /// Ask a Zalo user to share their profile information.
    pub async fn request_user_info(
        &self,
        oa_id: &str,
        zl_user_id: &str,
    ) -> Result<Value, ApiError> {
        self.post(
            REQUEST_USER_INFO_PATH,
            &json!({
                "oa_id": oa_id,
                "zl_user_id": zl_user_id,
            }),
        )
        .await
    }

    /// Send a plain text message to a user.
    pub async fn send_text(
        &self,
        oa_id: &str,
        user_id: &str,
        text: &str,
    ) -> Result<Value, ApiError> {
        self.post(
            SEND_TEXT_PATH,
            &json!({
                "message": { "text": text },
                "oa_id": oa_id,
                "recipient": { "user_id": user_id },
            }),
        )
        .await
    }

    /// Send a templated ZNS notification.
    pub async fn send_zns(&self, request: &SendZnsRequest) -> Result<Value, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::InvalidResponse(format!("unserializable request: {e}")))?;
        self.post(SEND_ZNS_PATH, &body).await
    }

    /// Set (or, with an empty string, clear) the webhook URL of an account.
    pub async fn set_webhook_url(&self, oa_id: &str, url: &str) -> Result<Value, ApiError> {
        self.post(
            UPDATE_SHOP_OA_PATH,
            &json!({
                "oa_id": oa_id,
                "webhook_url": url,
            }),
        )
        .await
    }
}

/// Parse a response body that may be JSON or a string-encoded JSON payload.
///
/// An empty body becomes `Value::Null`. A top-level JSON string is parsed
/// a second time; both parse failures map to [`ApiError::Parse`].
fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    let value: Value = serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))?;
    match value {
        Value::String(inner) => {
            serde_json::from_str(&inner).map_err(|e| ApiError::Parse(e.to_string()))
        }
        other => Ok(other),
    }
}

/// Pull a named array out of a response and deserialize its elements.
fn extract_array<T: serde::de::DeserializeOwned>(
    response: &Value,
    field: &str,
) -> Result<Vec<T>, ApiError> {
    let items = response
        .get(field)
        .filter(|v| v.is_array())
        .ok_or_else(|| ApiError::InvalidResponse(format!("missing '{field}' array")))?;
    serde_json::from_value(items.clone())
        .map_err(|e| ApiError::InvalidResponse(format!("malformed '{field}' entry: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_body_native_object() {
        let value = parse_body(r#"{"ok": true}"#).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn parse_body_string_encoded_object() {
        let payload = r#"{"ok": true}"#;
        let encoded = serde_json::to_string(payload).unwrap();
        let value = parse_body(&encoded).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn parse_body_string_encoding_equivalence() {
        let payload = r#"{"accounts":[{"name":"A","oa_id":"1"}]}"#;
        let native = parse_body(payload).unwrap();
        let encoded = parse_body(&serde_json::to_string(payload).unwrap()).unwrap();
        assert_eq!(native, encoded);
    }

    #[test]
    fn parse_body_invalid_string_payload() {
        let encoded = serde_json::to_string("not json at all").unwrap();
        let err = parse_body(&encoded).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn parse_body_empty_is_null() {
        assert_eq!(parse_body("").unwrap(), Value::Null);
        assert_eq!(parse_body("  ").unwrap(), Value::Null);
    }

    #[test]
    fn extract_array_missing_field() {
        let err = extract_array::<Account>(&json!({"ok": true}), "accounts").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
        assert!(err.to_string().contains("accounts"));
    }

    #[test]
    fn extract_array_non_array_field() {
        let err = extract_array::<Account>(&json!({"accounts": "nope"}), "accounts").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn send_zns_request_skips_absent_fields() {
        let req = SendZnsRequest {
            oa_id: "oa-1".into(),
            phone: "0900000001".into(),
            template_id: 7,
            tracking_id: None,
            template_data: None,
            mode: None,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({"oa_id": "oa-1", "phone": "0900000001", "template_id": 7})
        );
    }

    #[test]
    fn send_zns_request_development_mode() {
        let req = SendZnsRequest {
            oa_id: "oa-1".into(),
            phone: "0900000001".into(),
            template_id: 7,
            tracking_id: Some("trk-9".into()),
            template_data: Some(json!({"otp": "1234"})),
            mode: Some(ZnsMode::Development),
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["mode"], "development");
        assert_eq!(body["tracking_id"], "trk-9");
        assert_eq!(body["template_data"]["otp"], "1234");
    }
}
