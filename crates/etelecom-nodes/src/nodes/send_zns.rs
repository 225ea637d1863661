//! Send a templated ZNS notification.
//!
//! The only node with local parsing: the free-text template data field
//! must be valid JSON, validated before any network call is attempted.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use etelecom_types::{ExecutionRecord, NodeError};

use crate::client::{EtelecomClient, SendZnsRequest, ZnsMode};
use crate::definition::{NodeDefinition, NodeGroup, OptionLoader, Property};
use crate::nodes::{execute_per_item, oa_property};
use crate::traits::{
    bool_param, optional_string, required_credentials, required_i64, required_string,
    ExecuteContext, Node,
};

/// Calls `shop.Zalo/SendZNS` for each item.
pub struct SendZnsNode;

#[async_trait]
impl Node for SendZnsNode {
    fn name(&self) -> &str {
        "etelecomZaloOaSendZns"
    }

    fn definition(&self) -> NodeDefinition {
        NodeDefinition {
            name: self.name().to_owned(),
            display_name: "eTelecom Zalo Oa Send ZNS".to_owned(),
            description: "Send ZNS via eTelecom Zalo OA".to_owned(),
            group: NodeGroup::Transform,
            properties: vec![
                Property::hidden("resource", "zns"),
                Property::hidden("operation", "send"),
                Property::boolean("development", "Development Mode")
                    .describe("Whether to send in development mode"),
                oa_property(),
                Property::text("phone", "Phone")
                    .required()
                    .describe("Recipient phone number"),
                Property::dynamic_options(
                    "templateId",
                    "Template Name or ID",
                    OptionLoader::ZnsTemplates,
                )
                .required()
                .describe("Choose from the list, or specify an ID using an expression"),
                Property::text("trackingId", "Tracking ID").describe("Tracking identifier"),
                Property::multiline("templateData", "Template Data (JSON)")
                    .describe("Data for the template in JSON format"),
            ],
        }
    }

    async fn execute(&self, ctx: &dyn ExecuteContext) -> Result<Vec<ExecutionRecord>, NodeError> {
        execute_per_item(ctx, |item| self.run_item(ctx, item)).await
    }
}

impl SendZnsNode {
    async fn run_item(
        &self,
        ctx: &dyn ExecuteContext,
        item: usize,
    ) -> Result<ExecutionRecord, NodeError> {
        let oa_id = required_string(ctx, "oaId", item)?;
        let phone = required_string(ctx, "phone", item)?;
        let template_id = required_i64(ctx, "templateId", item)?;
        let tracking_id = optional_string(ctx, "trackingId", item);
        let development = bool_param(ctx, "development", item);

        // Local validation happens before the client is even built.
        let template_data = match optional_string(ctx, "templateData", item) {
            Some(text) => Some(serde_json::from_str(&text).map_err(|_| {
                NodeError::invalid_parameter("templateData", "invalid JSON in Template Data")
            })?),
            None => None,
        };

        let client = EtelecomClient::new(required_credentials(ctx)?);

        debug!(%oa_id, %phone, template_id, development, "sending ZNS");

        let request = SendZnsRequest {
            oa_id,
            phone,
            template_id,
            tracking_id,
            template_data,
            mode: development.then_some(ZnsMode::Development),
        };
        let response = client.send_zns(&request).await?;

        Ok(ExecutionRecord::success(item, json!({ "response": response })))
    }
}
