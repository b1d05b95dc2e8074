use serde::{Deserialize, Serialize};

/// Merchant-defined reason a customer can pick when returning an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnReason {
    pub id: String,
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnReasonsResponse {
    pub return_reasons: Vec<ReturnReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnItemRequest {
    pub item_id: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of `POST /admin/orders/{id}/return`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReturnRequest {
    pub items: Vec<ReturnItemRequest>,
    #[serde(default)]
    pub receive_now: bool,
    #[serde(default)]
    pub no_notification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}
