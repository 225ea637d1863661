//! # etelecom-types
//!
//! Core type definitions for the eTelecom Zalo OA workflow nodes.
//!
//! This crate is the foundation of the dependency graph -- the node
//! adapters in `etelecom-nodes` build on it. It contains:
//!
//! - **[`error`]** -- [`ApiError`] and [`NodeError`] error types
//! - **[`credential`]** -- the API credential descriptor
//! - **[`secret`]** -- redacting wrapper for token values
//! - **[`record`]** -- provider data model and per-item execution records
//! - **[`event`]** -- inbound webhook delivery types

pub mod credential;
pub mod error;
pub mod event;
pub mod record;
pub mod secret;

pub use credential::ApiCredential;
pub use error::{ApiError, NodeError, Result};
pub use event::WebhookEvent;
pub use record::{Account, ExecutionRecord, FieldOption, Template};
pub use secret::SecretString;
