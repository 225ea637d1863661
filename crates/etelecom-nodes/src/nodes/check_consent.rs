//! Check the consent state of a phone number.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use etelecom_types::{ExecutionRecord, NodeError};

use crate::client::EtelecomClient;
use crate::definition::{NodeDefinition, NodeGroup, Property};
use crate::nodes::{execute_per_item, oa_property};
use crate::traits::{required_credentials, required_string, ExecuteContext, Node};

/// Queries `shop.Zalo/CheckConsent` for each item's phone number.
pub struct CheckConsentNode;

#[async_trait]
impl Node for CheckConsentNode {
    fn name(&self) -> &str {
        "etelecomZaloOaCheckConsent"
    }

    fn definition(&self) -> NodeDefinition {
        NodeDefinition {
            name: self.name().to_owned(),
            display_name: "eTelecom Zalo Oa Check Consent".to_owned(),
            description: "Check consent status via eTelecom Zalo Oa".to_owned(),
            group: NodeGroup::Transform,
            properties: vec![
                Property::hidden("resource", "consent"),
                Property::hidden("operation", "checkConsent"),
                oa_property(),
                Property::text("phone", "Phone")
                    .required()
                    .describe("The phone number to check consent status for"),
            ],
        }
    }

    async fn execute(&self, ctx: &dyn ExecuteContext) -> Result<Vec<ExecutionRecord>, NodeError> {
        execute_per_item(ctx, |item| self.run_item(ctx, item)).await
    }
}

impl CheckConsentNode {
    async fn run_item(
        &self,
        ctx: &dyn ExecuteContext,
        item: usize,
    ) -> Result<ExecutionRecord, NodeError> {
        let oa_id = required_string(ctx, "oaId", item)?;
        let phone = required_string(ctx, "phone", item)?;
        let client = EtelecomClient::new(required_credentials(ctx)?);

        debug!(%oa_id, %phone, "checking consent status");

        let response = client.check_consent(&oa_id, &phone).await?;

        Ok(ExecutionRecord::success(
            item,
            json!({
                "oa_id": oa_id,
                "phone": phone,
                "response": response,
            }),
        ))
    }
}
