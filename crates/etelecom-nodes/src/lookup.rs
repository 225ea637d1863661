//! Shared dropdown lookup helper.
//!
//! Every node that offers an account or template dropdown resolves it
//! through this module, against a fresh API call per display -- nothing is
//! cached. One option per array element, provider order preserved,
//! `value` equal to the element's id.

use tracing::debug;

use etelecom_types::{FieldOption, NodeError};

use crate::client::EtelecomClient;
use crate::definition::OptionLoader;

/// One option per Official Account, `value` = `oa_id`.
pub async fn load_oa_options(client: &EtelecomClient) -> Result<Vec<FieldOption>, NodeError> {
    let accounts = client.list_oa().await?;
    debug!(count = accounts.len(), "loaded OA options");
    Ok(accounts
        .into_iter()
        .map(|account| {
            let description = format!("Oa ID: {}", account.oa_id);
            FieldOption::new(account.name, account.oa_id.into(), description)
        })
        .collect())
}

/// One option per ZNS template, `value` = `template_id`.
pub async fn load_template_options(client: &EtelecomClient) -> Result<Vec<FieldOption>, NodeError> {
    let templates = client.list_templates().await?;
    debug!(count = templates.len(), "loaded template options");
    Ok(templates
        .into_iter()
        .map(|template| {
            let description = format!("Template ID: {}", template.template_id);
            FieldOption::new(template.name, template.template_id.into(), description)
        })
        .collect())
}

/// Resolve a declared [`OptionLoader`] to its option list.
pub async fn load_options(
    client: &EtelecomClient,
    loader: OptionLoader,
) -> Result<Vec<FieldOption>, NodeError> {
    match loader {
        OptionLoader::ZaloAccounts => load_oa_options(client).await,
        OptionLoader::ZnsTemplates => load_template_options(client).await,
    }
}
