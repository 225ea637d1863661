//! Request consent from a phone number.
//!
//! Consent gates certain provider call types; this node asks the provider
//! to prompt the user, identified by phone number, for a given call type
//! and reason.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use etelecom_types::{ExecutionRecord, NodeError};

use crate::client::EtelecomClient;
use crate::definition::{NodeDefinition, NodeGroup, Property, StaticOption};
use crate::nodes::{execute_per_item, oa_property};
use crate::traits::{required_credentials, required_string, ExecuteContext, Node};

/// The kind of call the consent request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    Audio,
    Video,
    AudioAndVideo,
}

impl CallType {
    /// Wire value sent to the provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
            Self::AudioAndVideo => "audio_and_video",
        }
    }
}

/// Provider-defined reason the consent request cites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    DeliveryNotification,
    FlightAnnouncement,
    OrderAppointmentConfirmation,
    ProductServiceConsulting,
    UpdateOrder,
}

impl ReasonCode {
    /// Wire value sent to the provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeliveryNotification => "delivery_notification",
            Self::FlightAnnouncement => "flight_announcement",
            Self::OrderAppointmentConfirmation => "order_appointment_confirmation",
            Self::ProductServiceConsulting => "product_service_consulting",
            Self::UpdateOrder => "update_order",
        }
    }
}

/// Calls `shop.Zalo/RequestConsent` for each item.
pub struct RequestConsentNode;

#[async_trait]
impl Node for RequestConsentNode {
    fn name(&self) -> &str {
        "etelecomZaloOaRequestConsent"
    }

    fn definition(&self) -> NodeDefinition {
        NodeDefinition {
            name: self.name().to_owned(),
            display_name: "eTelecom Zalo Oa Request Consent".to_owned(),
            description: "Request consent via eTelecom Zalo Oa".to_owned(),
            group: NodeGroup::Transform,
            properties: vec![
                Property::hidden("resource", "consent"),
                Property::hidden("operation", "requestConsent"),
                oa_property(),
                Property::text("phone", "Phone")
                    .required()
                    .describe("The phone number to request consent from"),
                Property::options(
                    "callType",
                    "Call Type",
                    vec![
                        StaticOption::new("Audio", CallType::Audio.as_str()),
                        StaticOption::new("Video", CallType::Video.as_str()),
                        StaticOption::new("Audio and Video", CallType::AudioAndVideo.as_str()),
                    ],
                )
                .required()
                .with_default(json!(CallType::Audio.as_str()))
                .describe("The type of call for the consent request"),
                Property::options(
                    "reasonCode",
                    "Reason Code",
                    vec![
                        StaticOption::new(
                            "Delivery Notification",
                            ReasonCode::DeliveryNotification.as_str(),
                        ),
                        StaticOption::new(
                            "Flight Announcement",
                            ReasonCode::FlightAnnouncement.as_str(),
                        ),
                        StaticOption::new(
                            "Order/Appointment Confirmation",
                            ReasonCode::OrderAppointmentConfirmation.as_str(),
                        ),
                        StaticOption::new(
                            "Product/Service Consulting",
                            ReasonCode::ProductServiceConsulting.as_str(),
                        ),
                        StaticOption::new("Update Order", ReasonCode::UpdateOrder.as_str()),
                    ],
                )
                .required()
                .with_default(json!(ReasonCode::ProductServiceConsulting.as_str()))
                .describe("The reason code for the consent request"),
            ],
        }
    }

    async fn execute(&self, ctx: &dyn ExecuteContext) -> Result<Vec<ExecutionRecord>, NodeError> {
        execute_per_item(ctx, |item| self.run_item(ctx, item)).await
    }
}

impl RequestConsentNode {
    async fn run_item(
        &self,
        ctx: &dyn ExecuteContext,
        item: usize,
    ) -> Result<ExecutionRecord, NodeError> {
        let oa_id = required_string(ctx, "oaId", item)?;
        let phone = required_string(ctx, "phone", item)?;
        let call_type = required_string(ctx, "callType", item)?;
        let reason_code = required_string(ctx, "reasonCode", item)?;
        let client = EtelecomClient::new(required_credentials(ctx)?);

        debug!(%oa_id, %phone, %call_type, %reason_code, "requesting consent");

        let response = client
            .request_consent(&oa_id, &phone, &call_type, &reason_code)
            .await?;

        Ok(ExecutionRecord::success(
            item,
            json!({
                "oa_id": oa_id,
                "phone": phone,
                "call_type": call_type,
                "reason_code": reason_code,
                "response": response,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_type_wire_values() {
        assert_eq!(CallType::Audio.as_str(), "audio");
        assert_eq!(CallType::AudioAndVideo.as_str(), "audio_and_video");
        assert_eq!(
            serde_json::to_value(CallType::AudioAndVideo).unwrap(),
            "audio_and_video"
        );
    }

    #[test]
    fn reason_code_wire_values() {
        assert_eq!(
            ReasonCode::OrderAppointmentConfirmation.as_str(),
            "order_appointment_confirmation"
        );
        assert_eq!(
            serde_json::to_value(ReasonCode::UpdateOrder).unwrap(),
            "update_order"
        );
    }

    #[test]
    fn definition_lists_all_reason_codes() {
        let def = RequestConsentNode.definition();
        let prop = def.property("reasonCode").unwrap();
        match &prop.kind {
            crate::definition::PropertyKind::Options { options } => {
                assert_eq!(options.len(), 5);
            }
            other => panic!("expected fixed options, got {other:?}"),
        }
    }
}
