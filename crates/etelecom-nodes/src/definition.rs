//! Declarative form schemas for node parameters.
//!
//! Each node publishes a [`NodeDefinition`] the host renders as a form:
//! typed fields, defaults, and -- for dropdowns -- either a fixed option
//! list or a named loader the host resolves through
//! [`load_options`](crate::lookup::load_options) at display time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where the host places a node in its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
    /// Per-item action node.
    Transform,
    /// Webhook-driven trigger node.
    Trigger,
}

/// Named dropdown loader, resolved fresh on every display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionLoader {
    /// Official Accounts via `shop.Zalo/ListOA`.
    ZaloAccounts,
    /// ZNS templates via `shop.Zalo/ListTemplates`.
    ZnsTemplates,
}

/// One fixed entry of an options field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticOption {
    /// Label shown to the user.
    pub name: String,
    /// Value submitted when chosen.
    pub value: String,
}

impl StaticOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The type of a declared parameter field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum PropertyKind {
    /// Free text; `multiline` requests a textarea.
    Text {
        #[serde(default)]
        multiline: bool,
    },
    /// Checkbox.
    Boolean,
    /// Fixed choice list.
    Options { options: Vec<StaticOption> },
    /// Dropdown populated by a named loader.
    DynamicOptions { loader: OptionLoader },
    /// Present in the schema but not shown to the user.
    Hidden,
}

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Parameter name used with
    /// [`ExecuteContext::parameter`](crate::traits::ExecuteContext::parameter).
    pub name: String,
    /// Label shown to the user.
    pub display_name: String,
    /// Help text.
    #[serde(default)]
    pub description: String,
    /// Whether the host must supply a value.
    #[serde(default)]
    pub required: bool,
    /// Field type.
    pub kind: PropertyKind,
    /// Default value.
    #[serde(default)]
    pub default: Value,
}

impl Property {
    /// New optional property with an empty default.
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        kind: PropertyKind,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: String::new(),
            required: false,
            kind,
            default: Value::String(String::new()),
        }
    }

    /// Single-line text field.
    pub fn text(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(name, display_name, PropertyKind::Text { multiline: false })
    }

    /// Multi-line text field.
    pub fn multiline(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(name, display_name, PropertyKind::Text { multiline: true })
    }

    /// Checkbox, defaulting to `false`.
    pub fn boolean(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        let mut p = Self::new(name, display_name, PropertyKind::Boolean);
        p.default = Value::Bool(false);
        p
    }

    /// Dropdown backed by a named loader.
    pub fn dynamic_options(
        name: impl Into<String>,
        display_name: impl Into<String>,
        loader: OptionLoader,
    ) -> Self {
        Self::new(name, display_name, PropertyKind::DynamicOptions { loader })
    }

    /// Dropdown with a fixed option list.
    pub fn options(
        name: impl Into<String>,
        display_name: impl Into<String>,
        options: Vec<StaticOption>,
    ) -> Self {
        Self::new(name, display_name, PropertyKind::Options { options })
    }

    /// Hidden field with a fixed default.
    pub fn hidden(name: impl Into<String>, default: impl Into<String>) -> Self {
        let mut p = Self::new(name.into(), String::new(), PropertyKind::Hidden);
        p.default = Value::String(default.into());
        p
    }

    /// Mark the property required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach help text.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = value;
        self
    }
}

/// The full declared schema of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    /// Machine name (e.g. `etelecomZaloOaCheckConsent`).
    pub name: String,
    /// Label shown in the host's palette.
    pub display_name: String,
    /// One-line description.
    pub description: String,
    /// Palette group.
    pub group: NodeGroup,
    /// Declared parameters, in display order.
    pub properties: Vec<Property>,
}

impl NodeDefinition {
    /// Find a declared property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_fields() {
        let p = Property::text("phone", "Phone")
            .required()
            .describe("The phone number");
        assert_eq!(p.name, "phone");
        assert!(p.required);
        assert_eq!(p.description, "The phone number");
        assert_eq!(p.kind, PropertyKind::Text { multiline: false });
    }

    #[test]
    fn boolean_defaults_false() {
        let p = Property::boolean("development", "Development Mode");
        assert_eq!(p.default, Value::Bool(false));
    }

    #[test]
    fn hidden_carries_default() {
        let p = Property::hidden("resource", "consent");
        assert_eq!(p.kind, PropertyKind::Hidden);
        assert_eq!(p.default, Value::String("consent".into()));
    }

    #[test]
    fn definition_property_lookup() {
        let def = NodeDefinition {
            name: "n".into(),
            display_name: "N".into(),
            description: String::new(),
            group: NodeGroup::Transform,
            properties: vec![Property::text("phone", "Phone")],
        };
        assert!(def.property("phone").is_some());
        assert!(def.property("missing").is_none());
    }

    #[test]
    fn option_loader_serializes_camel_case() {
        let v = serde_json::to_value(OptionLoader::ZaloAccounts).unwrap();
        assert_eq!(v, "zaloAccounts");
    }
}
