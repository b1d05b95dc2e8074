use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    #[default]
    Refund,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimReason {
    MissingItem,
    WrongItem,
    ProductionFailure,
    Other,
}

impl ClaimReason {
    pub const ALL: [ClaimReason; 4] = [
        ClaimReason::MissingItem,
        ClaimReason::WrongItem,
        ClaimReason::ProductionFailure,
        ClaimReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimReason::MissingItem => "missing_item",
            ClaimReason::WrongItem => "wrong_item",
            ClaimReason::ProductionFailure => "production_failure",
            ClaimReason::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClaimReason::MissingItem => "Missing item",
            ClaimReason::WrongItem => "Wrong item",
            ClaimReason::ProductionFailure => "Production failure",
            ClaimReason::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

/// Shipping option offered for a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub amount: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethodRequest {
    pub option_id: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimItemRequest {
    pub item_id: String,
    pub quantity: u32,
    pub reason: ClaimReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalItemRequest {
    pub variant_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AddressPayload {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub address_1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_2: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    pub postal_code: String,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body of `POST /admin/orders/{id}/claims`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateClaimRequest {
    #[serde(rename = "type")]
    pub claim_type: ClaimType,
    pub claim_items: Vec<ClaimItemRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_shipping: Option<ShippingMethodRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_items: Option<Vec<AdditionalItemRequest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_methods: Option<Vec<ShippingMethodRequest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<AddressPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<i64>,
    pub no_notification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_location_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_type_wire_format() {
        let req = CreateClaimRequest {
            claim_type: ClaimType::Replace,
            claim_items: vec![ClaimItemRequest {
                item_id: "li_1".to_string(),
                quantity: 1,
                reason: ClaimReason::WrongItem,
                note: None,
            }],
            return_shipping: None,
            additional_items: None,
            shipping_methods: None,
            shipping_address: None,
            refund_amount: None,
            no_notification: false,
            return_location_id: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "replace");
        assert_eq!(json["claim_items"][0]["reason"], "wrong_item");
        assert!(json.get("refund_amount").is_none());
        assert!(json["claim_items"][0].get("note").is_none());
    }

    #[test]
    fn test_claim_reason_parse() {
        assert_eq!(ClaimReason::parse("production_failure"), Some(ClaimReason::ProductionFailure));
        assert_eq!(ClaimReason::parse("broken"), None);
    }
}
