//! Webhook trigger for Zalo OA events.
//!
//! Three lifecycle operations against the provider, each one POST:
//! existence check (list accounts and compare the stored webhook URL),
//! register (set the callback URL via `shop.Zalo/UpdateShopOA`), and
//! unregister (clear it by sending an empty string). Inbound deliveries
//! are reshaped into one record each; there is no signature verification
//! and no deduplication.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use etelecom_types::{ApiError, ExecutionRecord, NodeError, WebhookEvent};

use crate::client::EtelecomClient;
use crate::definition::{NodeDefinition, NodeGroup, OptionLoader, Property};
use crate::traits::{HookContext, TriggerNode};

/// Handles Zalo OA webhook registration and inbound events.
pub struct ZaloOaTrigger;

impl ZaloOaTrigger {
    fn oa_id(ctx: &dyn HookContext) -> Result<String, NodeError> {
        match ctx.parameter("oaId") {
            Some(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Err(NodeError::invalid_parameter(
                "oaId",
                "required parameter is missing",
            )),
        }
    }

    fn client(ctx: &dyn HookContext) -> Result<EtelecomClient, NodeError> {
        let credential = ctx.credentials().ok_or(NodeError::MissingCredentials)?;
        Ok(EtelecomClient::new(credential))
    }
}

#[async_trait]
impl TriggerNode for ZaloOaTrigger {
    fn name(&self) -> &str {
        "etelecomZaloOaTrigger"
    }

    fn definition(&self) -> NodeDefinition {
        NodeDefinition {
            name: self.name().to_owned(),
            display_name: "eTelecom Zalo Oa Trigger".to_owned(),
            description: "Handle Zalo Oa webhook events".to_owned(),
            group: NodeGroup::Trigger,
            properties: vec![
                Property::hidden("resource", "trigger"),
                Property::dynamic_options(
                    "oaId",
                    "Zalo Official Account Name or ID",
                    OptionLoader::ZaloAccounts,
                )
                .required()
                .describe("Choose from the list, or specify an ID using an expression"),
            ],
        }
    }

    async fn webhook_exists(&self, ctx: &dyn HookContext) -> Result<bool, NodeError> {
        let webhook_url = ctx.webhook_url();
        let oa_id = Self::oa_id(ctx)?;
        let client = Self::client(ctx)?;

        // Best effort: any failure means "not registered".
        let accounts = match client.list_oa().await {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!(error = %err, "webhook existence check failed");
                return Ok(false);
            }
        };

        let exists = accounts
            .iter()
            .find(|account| account.oa_id == oa_id)
            .is_some_and(|account| account.webhook_url.as_deref() == Some(webhook_url.as_str()));

        if exists {
            info!(%oa_id, %webhook_url, "webhook already registered for this Oa");
        }
        Ok(exists)
    }

    async fn register_webhook(&self, ctx: &dyn HookContext) -> Result<(), NodeError> {
        let webhook_url = ctx.webhook_url();
        let oa_id = Self::oa_id(ctx)?;
        let client = Self::client(ctx)?;

        debug!(%oa_id, %webhook_url, "registering webhook");

        let response = client.set_webhook_url(&oa_id, &webhook_url).await?;

        // The provider echoes the account on success.
        if response.get("oa_id").is_none() {
            return Err(
                ApiError::InvalidResponse("webhook registration not confirmed".into()).into(),
            );
        }

        info!(%oa_id, %webhook_url, "webhook registered");
        Ok(())
    }

    async fn unregister_webhook(&self, ctx: &dyn HookContext) -> Result<(), NodeError> {
        let oa_id = Self::oa_id(ctx)?;
        let client = Self::client(ctx)?;

        debug!(%oa_id, "unregistering webhook");

        client.set_webhook_url(&oa_id, "").await?;

        info!(%oa_id, "webhook unregistered");
        Ok(())
    }

    fn handle_delivery(
        &self,
        ctx: &dyn HookContext,
        headers: HashMap<String, String>,
        body: Value,
    ) -> Result<ExecutionRecord, NodeError> {
        let oa_id = Self::oa_id(ctx)?;
        let event = WebhookEvent::from_delivery(headers, body, oa_id);

        debug!(event = %event.event, oa_id = %event.oa_id, "inbound webhook delivery");

        let json = serde_json::to_value(&event)
            .map_err(|e| ApiError::InvalidResponse(format!("unserializable event: {e}")))?;
        // Deliveries are not items; each one stands alone as item 0.
        Ok(ExecutionRecord {
            json,
            source_item: 0,
        })
    }
}
