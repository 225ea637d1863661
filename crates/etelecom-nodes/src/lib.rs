//! Workflow node adapters for the eTelecom Zalo OA API.
//!
//! Each node is a thin adapter: declare a form schema, build one HTTP
//! request per item, forward the response. The workflow host supplies
//! credential storage, parameter resolution, the execution lifecycle, and
//! webhook URL provisioning through the traits in [`traits`].
//!
//! # Modules
//!
//! - [`client`] -- typed HTTP client for the eTelecom Zalo OA endpoints
//! - [`definition`] -- declarative form schemas
//! - [`traits`] -- [`Node`]/[`TriggerNode`] and the host contract
//! - [`lookup`] -- shared dropdown population (accounts, templates)
//! - [`nodes`] -- the five action nodes
//! - [`trigger`] -- the webhook trigger
//!
//! # Error handling
//!
//! Node operations return [`NodeError`](etelecom_types::NodeError); API
//! failures are wrapped as [`ApiError`](etelecom_types::ApiError). This
//! crate re-exports both for convenience.

use std::sync::Arc;

pub mod client;
pub mod definition;
pub mod lookup;
pub mod nodes;
pub mod traits;
pub mod trigger;

pub use client::{EtelecomClient, SendZnsRequest, ZnsMode};
pub use definition::{NodeDefinition, NodeGroup, OptionLoader, Property, PropertyKind};
pub use nodes::{
    CheckConsentNode, RequestConsentNode, RequestUserInfoNode, SendMessageNode, SendZnsNode,
};
pub use traits::{ExecuteContext, HookContext, Node, TriggerNode};
pub use trigger::ZaloOaTrigger;

// Re-export the canonical error types so hosts do not need to depend on
// etelecom-types directly.
pub use etelecom_types::{ApiError, NodeError};

/// All action nodes, for host registration.
pub fn all_nodes() -> Vec<Arc<dyn Node>> {
    vec![
        Arc::new(CheckConsentNode),
        Arc::new(RequestConsentNode),
        Arc::new(RequestUserInfoNode),
        Arc::new(SendMessageNode),
        Arc::new(SendZnsNode),
    ]
}

/// The webhook trigger, for host registration.
pub fn trigger() -> Arc<dyn TriggerNode> {
    Arc::new(ZaloOaTrigger)
}
