//! The five action node adapters.
//!
//! Each node declares its form schema, builds one JSON request per item,
//! issues a single POST, and emits one output record per input record.
//! The shared per-item loop lives in [`execute_per_item`].

pub mod check_consent;
pub mod request_consent;
pub mod request_user_info;
pub mod send_message;
pub mod send_zns;

pub use check_consent::CheckConsentNode;
pub use request_consent::{CallType, ReasonCode, RequestConsentNode};
pub use request_user_info::RequestUserInfoNode;
pub use send_message::SendMessageNode;
pub use send_zns::SendZnsNode;

use std::future::Future;

use tracing::warn;

use etelecom_types::{ExecutionRecord, NodeError};

use crate::traits::ExecuteContext;

/// Run `per_item` for every input item, strictly sequentially.
///
/// An item's failure never affects its siblings' records. With
/// continue-on-fail it becomes a failure record in place; without, it
/// aborts the loop and escalates, leaving later items unprocessed.
pub(crate) async fn execute_per_item<F, Fut>(
    ctx: &dyn ExecuteContext,
    mut per_item: F,
) -> Result<Vec<ExecutionRecord>, NodeError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<ExecutionRecord, NodeError>>,
{
    let mut records = Vec::with_capacity(ctx.item_count());
    for item in 0..ctx.item_count() {
        match per_item(item).await {
            Ok(record) => records.push(record),
            Err(err) if ctx.continue_on_fail() => {
                warn!(item, error = %err, "item failed, continuing");
                records.push(ExecutionRecord::failure(item, &err));
            }
            Err(err) => return Err(err),
        }
    }
    Ok(records)
}

/// Shared "Zalo Official Account Name or ID" dropdown property.
pub(crate) fn oa_property() -> crate::definition::Property {
    use crate::definition::{OptionLoader, Property};
    Property::dynamic_options("oaId", "Zalo Official Account Name or ID", OptionLoader::ZaloAccounts)
        .required()
        .describe("Choose from the list, or specify an ID using an expression")
}
