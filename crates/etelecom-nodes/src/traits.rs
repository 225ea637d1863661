//! Node trait definitions and the host contract.
//!
//! The workflow host is an external collaborator: it stores credentials,
//! resolves declared parameters per item, runs the per-item loop's outer
//! lifecycle, and provisions webhook URLs. The nodes see it only through
//! two narrow traits:
//!
//! - [`ExecuteContext`] -- per-execution view for action nodes
//! - [`HookContext`] -- per-workflow view for the trigger's webhook
//!   lifecycle
//!
//! The adapters themselves implement [`Node`] (actions) or [`TriggerNode`]
//! (webhook trigger), which the host enumerates via
//! [`all_nodes`](crate::all_nodes) / [`trigger`](crate::trigger).

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use etelecom_types::{ApiCredential, ExecutionRecord, NodeError};

use crate::definition::NodeDefinition;

/// Host services available while an action node executes.
pub trait ExecuteContext: Send + Sync {
    /// Credential configured for this workflow, if any.
    fn credentials(&self) -> Option<ApiCredential>;

    /// Number of input items in this execution.
    fn item_count(&self) -> usize;

    /// Resolve a declared parameter for one item.
    ///
    /// Returns `None` when the parameter is not set; expression results
    /// are already evaluated by the host.
    fn parameter(&self, name: &str, item: usize) -> Option<Value>;

    /// Whether a failed item should yield a failure record instead of
    /// aborting the execution.
    fn continue_on_fail(&self) -> bool;
}

/// Host services available during the trigger's webhook lifecycle.
pub trait HookContext: Send + Sync {
    /// Credential configured for this workflow, if any.
    fn credentials(&self) -> Option<ApiCredential>;

    /// Resolve a workflow-level parameter (triggers have no items).
    fn parameter(&self, name: &str) -> Option<Value>;

    /// Callback URL the host provisioned for this trigger.
    fn webhook_url(&self) -> String;
}

/// An action node: declared parameters in, one record per item out.
#[async_trait]
pub trait Node: Send + Sync {
    /// Machine name (e.g. `"etelecomZaloOaCheckConsent"`).
    fn name(&self) -> &str;

    /// Declared form schema.
    fn definition(&self) -> NodeDefinition;

    /// Execute over all input items, strictly sequentially.
    ///
    /// Produces exactly one [`ExecutionRecord`] per item, in input order.
    /// When [`ExecuteContext::continue_on_fail`] is set, a failing item
    /// yields a failure record and its siblings still run; otherwise the
    /// first failure aborts the remaining items and escalates.
    async fn execute(&self, ctx: &dyn ExecuteContext) -> Result<Vec<ExecutionRecord>, NodeError>;
}

/// The webhook trigger: provider-side registration plus inbound reshaping.
#[async_trait]
pub trait TriggerNode: Send + Sync {
    /// Machine name (e.g. `"etelecomZaloOaTrigger"`).
    fn name(&self) -> &str;

    /// Declared form schema.
    fn definition(&self) -> NodeDefinition;

    /// Whether the provider already points at the host's callback URL.
    ///
    /// Best effort: any failure is reported as `Ok(false)`, never as an
    /// error.
    async fn webhook_exists(&self, ctx: &dyn HookContext) -> Result<bool, NodeError>;

    /// Register the host's callback URL with the provider.
    async fn register_webhook(&self, ctx: &dyn HookContext) -> Result<(), NodeError>;

    /// Clear the callback URL at the provider.
    async fn unregister_webhook(&self, ctx: &dyn HookContext) -> Result<(), NodeError>;

    /// Reshape one inbound delivery into an output record.
    fn handle_delivery(
        &self,
        ctx: &dyn HookContext,
        headers: HashMap<String, String>,
        body: Value,
    ) -> Result<ExecutionRecord, NodeError>;
}

/// Resolve a required string parameter.
///
/// Missing or empty values are local validation failures, raised before
/// any network call.
pub(crate) fn required_string(
    ctx: &dyn ExecuteContext,
    name: &str,
    item: usize,
) -> Result<String, NodeError> {
    match ctx.parameter(name, item) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        Some(Value::String(_)) | None => {
            Err(NodeError::invalid_parameter(name, "required parameter is missing"))
        }
        Some(other) => Err(NodeError::invalid_parameter(
            name,
            format!("expected a string, got {other}"),
        )),
    }
}

/// Resolve an optional string parameter; empty strings count as absent.
pub(crate) fn optional_string(ctx: &dyn ExecuteContext, name: &str, item: usize) -> Option<String> {
    match ctx.parameter(name, item) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Resolve a boolean parameter, defaulting to `false`.
pub(crate) fn bool_param(ctx: &dyn ExecuteContext, name: &str, item: usize) -> bool {
    matches!(ctx.parameter(name, item), Some(Value::Bool(true)))
}

/// Resolve a required integer parameter.
///
/// Dropdown values arrive as numbers, expression results may arrive as
/// numeric strings; both are accepted.
pub(crate) fn required_i64(
    ctx: &dyn ExecuteContext,
    name: &str,
    item: usize,
) -> Result<i64, NodeError> {
    match ctx.parameter(name, item) {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| NodeError::invalid_parameter(name, "expected an integer")),
        Some(Value::String(s)) if !s.is_empty() => s
            .parse()
            .map_err(|_| NodeError::invalid_parameter(name, format!("'{s}' is not an integer"))),
        _ => Err(NodeError::invalid_parameter(name, "required parameter is missing")),
    }
}

/// Resolve the credential or fail with [`NodeError::MissingCredentials`].
pub(crate) fn required_credentials(ctx: &dyn ExecuteContext) -> Result<ApiCredential, NodeError> {
    ctx.credentials().ok_or(NodeError::MissingCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticContext {
        params: Vec<(String, Value)>,
    }

    impl ExecuteContext for StaticContext {
        fn credentials(&self) -> Option<ApiCredential> {
            None
        }
        fn item_count(&self) -> usize {
            1
        }
        fn parameter(&self, name: &str, _item: usize) -> Option<Value> {
            self.params
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
        }
        fn continue_on_fail(&self) -> bool {
            false
        }
    }

    fn ctx(params: Vec<(&str, Value)>) -> StaticContext {
        StaticContext {
            params: params
                .into_iter()
                .map(|(n, v)| (n.to_owned(), v))
                .collect(),
        }
    }

    #[test]
    fn required_string_present() {
        let c = ctx(vec![("phone", json!("0900"))]);
        assert_eq!(required_string(&c, "phone", 0).unwrap(), "0900");
    }

    #[test]
    fn required_string_missing_or_empty() {
        let c = ctx(vec![("phone", json!(""))]);
        assert!(required_string(&c, "phone", 0).is_err());
        assert!(required_string(&c, "absent", 0).is_err());
    }

    #[test]
    fn required_i64_accepts_number_and_string() {
        let c = ctx(vec![("templateId", json!(42))]);
        assert_eq!(required_i64(&c, "templateId", 0).unwrap(), 42);

        let c = ctx(vec![("templateId", json!("42"))]);
        assert_eq!(required_i64(&c, "templateId", 0).unwrap(), 42);

        let c = ctx(vec![("templateId", json!("forty-two"))]);
        assert!(required_i64(&c, "templateId", 0).is_err());
    }

    #[test]
    fn bool_param_defaults_false() {
        let c = ctx(vec![]);
        assert!(!bool_param(&c, "development", 0));

        let c = ctx(vec![("development", json!(true))]);
        assert!(bool_param(&c, "development", 0));
    }

    #[test]
    fn optional_string_treats_empty_as_absent() {
        let c = ctx(vec![("trackingId", json!(""))]);
        assert_eq!(optional_string(&c, "trackingId", 0), None);

        let c = ctx(vec![("trackingId", json!("trk"))]);
        assert_eq!(optional_string(&c, "trackingId", 0).as_deref(), Some("trk"));
    }

    #[test]
    fn missing_credentials_error() {
        let c = ctx(vec![]);
        assert!(matches!(
            required_credentials(&c),
            Err(NodeError::MissingCredentials)
        ));
    }
}
