//! Ask a Zalo user to share their profile information.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use etelecom_types::{ExecutionRecord, NodeError};

use crate::client::EtelecomClient;
use crate::definition::{NodeDefinition, NodeGroup, Property};
use crate::nodes::{execute_per_item, oa_property};
use crate::traits::{required_credentials, required_string, ExecuteContext, Node};

/// Calls `shop.Zalo/RequestUserInfo` for each item's user.
pub struct RequestUserInfoNode;

#[async_trait]
impl Node for RequestUserInfoNode {
    fn name(&self) -> &str {
        "etelecomZaloOaRequestUserInfo"
    }

    fn definition(&self) -> NodeDefinition {
        NodeDefinition {
            name: self.name().to_owned(),
            display_name: "eTelecom Zalo Oa Request User Info".to_owned(),
            description: "Request user information via eTelecom Zalo Oa".to_owned(),
            group: NodeGroup::Transform,
            properties: vec![
                Property::hidden("resource", "user"),
                Property::hidden("operation", "requestUserInfo"),
                oa_property(),
                Property::text("zlUserId", "Zalo User ID")
                    .required()
                    .describe("The Zalo user to request information from"),
            ],
        }
    }

    async fn execute(&self, ctx: &dyn ExecuteContext) -> Result<Vec<ExecutionRecord>, NodeError> {
        execute_per_item(ctx, |item| self.run_item(ctx, item)).await
    }
}

impl RequestUserInfoNode {
    async fn run_item(
        &self,
        ctx: &dyn ExecuteContext,
        item: usize,
    ) -> Result<ExecutionRecord, NodeError> {
        let oa_id = required_string(ctx, "oaId", item)?;
        let zl_user_id = required_string(ctx, "zlUserId", item)?;
        let client = EtelecomClient::new(required_credentials(ctx)?);

        debug!(%oa_id, %zl_user_id, "requesting user information");

        let response = client.request_user_info(&oa_id, &zl_user_id).await?;

        Ok(ExecutionRecord::success(
            item,
            json!({
                "oa_id": oa_id,
                "zl_user_id": zl_user_id,
                "response": response,
            }),
        ))
    }
}
