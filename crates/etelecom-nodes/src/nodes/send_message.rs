//! Send a plain text message to a Zalo user.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use etelecom_types::{ExecutionRecord, NodeError};

use crate::client::EtelecomClient;
use crate::definition::{NodeDefinition, NodeGroup, Property};
use crate::nodes::{execute_per_item, oa_property};
use crate::traits::{required_credentials, required_string, ExecuteContext, Node};

/// Calls `shop.Zalo/OASendText` for each item.
pub struct SendMessageNode;

#[async_trait]
impl Node for SendMessageNode {
    fn name(&self) -> &str {
        "etelecomZaloOaSendMessage"
    }

    fn definition(&self) -> NodeDefinition {
        NodeDefinition {
            name: self.name().to_owned(),
            display_name: "eTelecom Zalo Oa Send Message".to_owned(),
            description: "Send a text message via eTelecom Zalo Oa".to_owned(),
            group: NodeGroup::Transform,
            properties: vec![
                Property::hidden("resource", "message"),
                Property::hidden("operation", "sendText"),
                oa_property(),
                Property::text("userId", "User ID")
                    .required()
                    .describe("The ID of the user to send the message to"),
                Property::multiline("message", "Message")
                    .required()
                    .describe("Text message to send to the user"),
            ],
        }
    }

    async fn execute(&self, ctx: &dyn ExecuteContext) -> Result<Vec<ExecutionRecord>, NodeError> {
        execute_per_item(ctx, |item| self.run_item(ctx, item)).await
    }
}

impl SendMessageNode {
    async fn run_item(
        &self,
        ctx: &dyn ExecuteContext,
        item: usize,
    ) -> Result<ExecutionRecord, NodeError> {
        let oa_id = required_string(ctx, "oaId", item)?;
        let user_id = required_string(ctx, "userId", item)?;
        let message = required_string(ctx, "message", item)?;
        let client = EtelecomClient::new(required_credentials(ctx)?);

        debug!(%oa_id, %user_id, length = message.len(), "sending text message");

        let response = client.send_text(&oa_id, &user_id, &message).await?;

        Ok(ExecutionRecord::success(
            item,
            json!({
                "oa_id": oa_id,
                "user_id": user_id,
                "response": response,
            }),
        ))
    }
}
