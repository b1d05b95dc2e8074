//! Value tree of the claim form and the request built from it.

use contracts::domain::orders::claim::{
    AdditionalItemRequest, AddressPayload, ClaimItemRequest, ClaimReason, ClaimType,
    CreateClaimRequest, ShippingMethodRequest,
};
use contracts::domain::orders::Order;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::shared::form::FormPath;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSection {
    pub send_notification: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReasonDetails {
    #[serde(default)]
    pub reason: Option<ClaimReason>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimReturnItem {
    pub item_id: String,
    pub title: String,
    #[serde(default)]
    pub variant_title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub quantity: u32,
    /// Returnable quantity when the form was opened
    pub original_quantity: u32,
    #[serde(default)]
    pub refundable: Option<i64>,
    #[serde(rename = "return", default)]
    pub selected: bool,
    #[serde(default)]
    pub return_reason_details: ReasonDetails,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnItemsSection {
    #[serde(default)]
    pub items: Vec<ClaimReturnItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimAdditionalItem {
    pub variant_id: String,
    #[serde(default)]
    pub title: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdditionalItemsSection {
    #[serde(default)]
    pub items: Vec<ClaimAdditionalItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingChoice {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShippingSection {
    #[serde(default)]
    pub option: Option<ShippingChoice>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClaimTypeSection {
    #[serde(rename = "type", default)]
    pub claim_type: ClaimType,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RefundAmountSection {
    #[serde(default)]
    pub amount: Option<i64>,
}

/// Text fields of the replacement shipping address
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AddressSection {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address_1: String,
    #[serde(default)]
    pub address_2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub phone: String,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl AddressSection {
    fn to_payload(&self) -> AddressPayload {
        AddressPayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            company: non_empty(&self.company),
            address_1: self.address_1.trim().to_string(),
            address_2: non_empty(&self.address_2),
            city: self.city.trim().to_string(),
            province: non_empty(&self.province),
            postal_code: self.postal_code.trim().to_string(),
            country_code: self.country_code.trim().to_lowercase(),
            phone: non_empty(&self.phone),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimFormValues {
    pub notification: NotificationSection,
    pub return_items: ReturnItemsSection,
    #[serde(default)]
    pub additional_items: AdditionalItemsSection,
    #[serde(default)]
    pub return_shipping: ShippingSection,
    #[serde(default)]
    pub replacement_shipping: ShippingSection,
    #[serde(default)]
    pub shipping_address: AddressSection,
    #[serde(default)]
    pub claim_type: ClaimTypeSection,
    #[serde(default)]
    pub refund_amount: RefundAmountSection,
    /// Stock location the returned items go back to
    #[serde(default)]
    pub selected_location: Option<String>,
}

pub const REASON_REQUIRED: &str = "Please select a reason";
pub const QUANTITY_REQUIRED: &str = "Quantity is required";
pub const WHOLE_QUANTITY: &str = "Quantity must be a whole number";
pub const REPLACEMENT_SHIPPING_REQUIRED: &str =
    "A shipping method for replacement items is required";

/// Every returnable item listed but not picked, notification on, refund claim.
pub fn default_claim_values(order: &Order) -> ClaimFormValues {
    let items = order
        .returnable_items()
        .into_iter()
        .map(|item| ClaimReturnItem {
            quantity: item.returnable_quantity(),
            original_quantity: item.returnable_quantity(),
            variant_title: item.variant.as_ref().and_then(|v| v.title.clone()),
            thumbnail: item.thumbnail.clone(),
            refundable: item.refundable,
            item_id: item.id,
            title: item.title,
            selected: false,
            return_reason_details: ReasonDetails::default(),
        })
        .collect();

    ClaimFormValues {
        notification: NotificationSection {
            send_notification: true,
        },
        return_items: ReturnItemsSection { items },
        additional_items: AdditionalItemsSection::default(),
        return_shipping: ShippingSection::default(),
        replacement_shipping: ShippingSection::default(),
        shipping_address: AddressSection::default(),
        claim_type: ClaimTypeSection::default(),
        refund_amount: RefundAmountSection::default(),
        selected_location: None,
    }
}

/// Builds the claim request, or the field errors that block it.
///
/// Errors are keyed by absolute form path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClaimValuesError {
    #[error("{} claim field(s) are invalid", .0.len())]
    Fields(Vec<(FormPath, String)>),

    #[error("claim form could not be read: {0}")]
    Malformed(String),
}

fn quantity_problem(value: Option<&Value>) -> Option<&'static str> {
    match value {
        None | Some(Value::Null) => Some(QUANTITY_REQUIRED),
        Some(v) if v.as_u64().is_some_and(|n| u32::try_from(n).is_ok()) => None,
        Some(_) => Some(WHOLE_QUANTITY),
    }
}

/// Reads the raw claim value tree.
///
/// Quantities the API cannot take are reported at their field. Rows that
/// are not picked for the claim fall back to their original quantity since
/// theirs is never sent.
pub fn decode_claim_values(mut values: Value) -> Result<ClaimFormValues, ClaimValuesError> {
    let mut errors = Vec::new();

    if let Some(rows) = values
        .pointer_mut("/return_items/items")
        .and_then(Value::as_array_mut)
    {
        for (index, row) in rows.iter_mut().enumerate() {
            let Some(problem) = quantity_problem(row.get("quantity")) else {
                continue;
            };
            let picked = row.get("return").and_then(Value::as_bool).unwrap_or(false);
            if picked {
                errors.push((
                    FormPath::parse("return_items.items").index(index).child("quantity"),
                    problem.to_string(),
                ));
            } else if let Some(obj) = row.as_object_mut() {
                let original = obj.get("original_quantity").cloned().unwrap_or(Value::from(0));
                obj.insert("quantity".to_string(), original);
            }
        }
    }

    if let Some(rows) = values
        .pointer("/additional_items/items")
        .and_then(Value::as_array)
    {
        for (index, row) in rows.iter().enumerate() {
            if let Some(problem) = quantity_problem(row.get("quantity")) {
                errors.push((
                    FormPath::parse("additional_items.items").index(index).child("quantity"),
                    problem.to_string(),
                ));
            }
        }
    }

    if !errors.is_empty() {
        return Err(ClaimValuesError::Fields(errors));
    }
    serde_json::from_value(values).map_err(|e| ClaimValuesError::Malformed(e.to_string()))
}

pub fn build_claim_request(values: &ClaimFormValues) -> Result<CreateClaimRequest, Vec<(FormPath, String)>> {
    let claim_type = values.claim_type.claim_type;

    let mut errors = Vec::new();
    let mut claim_items = Vec::new();
    for (index, item) in values.return_items.items.iter().enumerate() {
        if !item.selected {
            continue;
        }
        match item.return_reason_details.reason {
            Some(reason) => claim_items.push(ClaimItemRequest {
                item_id: item.item_id.clone(),
                quantity: item.quantity,
                reason,
                note: non_empty(&item.return_reason_details.note),
            }),
            None => errors.push((
                FormPath::parse("return_items.items")
                    .index(index)
                    .child("return_reason_details"),
                REASON_REQUIRED.to_string(),
            )),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let replacement = values.replacement_shipping.option.as_ref();
    if claim_type == ClaimType::Replace && replacement.is_none() {
        return Err(vec![(
            FormPath::parse("replacement_shipping.option"),
            REPLACEMENT_SHIPPING_REQUIRED.to_string(),
        )]);
    }

    let is_replace = claim_type == ClaimType::Replace;

    Ok(CreateClaimRequest {
        claim_type,
        claim_items,
        // Shipping is charged through the refund amount, never the method price.
        return_shipping: values
            .return_shipping
            .option
            .as_ref()
            .map(|option| ShippingMethodRequest {
                option_id: option.id.clone(),
                price: 0,
            }),
        additional_items: is_replace.then(|| {
            values
                .additional_items
                .items
                .iter()
                .map(|item| AdditionalItemRequest {
                    variant_id: item.variant_id.clone(),
                    quantity: item.quantity,
                })
                .collect()
        }),
        shipping_methods: replacement.filter(|_| is_replace).map(|option| {
            vec![ShippingMethodRequest {
                option_id: option.id.clone(),
                price: 0,
            }]
        }),
        shipping_address: is_replace.then(|| values.shipping_address.to_payload()),
        refund_amount: if claim_type == ClaimType::Refund {
            values.refund_amount.amount
        } else {
            None
        },
        no_notification: !values.notification.send_notification,
        return_location_id: values.selected_location.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use contracts::domain::orders::{LineItem, Order};

    fn order() -> Order {
        let line = |id: &str, quantity: u32, returned: u32| LineItem {
            id: id.to_string(),
            title: format!("Shirt {id}"),
            thumbnail: None,
            variant_id: Some(format!("variant_{id}")),
            variant: None,
            quantity,
            returned_quantity: returned,
            fulfilled_quantity: quantity,
            unit_price: 1500,
            refundable: Some(1500),
            swap_id: None,
            claim_order_id: None,
        };
        Order {
            id: "order_1".to_string(),
            display_id: 17,
            currency_code: "eur".to_string(),
            email: None,
            region_id: Some("reg_1".to_string()),
            items: vec![line("a", 3, 1), line("b", 1, 1), line("c", 2, 0)],
            swaps: Vec::new(),
            claims: Vec::new(),
        }
    }

    #[test]
    fn test_defaults_list_returnable_items() {
        let values = default_claim_values(&order());
        let ids: Vec<&str> = values
            .return_items
            .items
            .iter()
            .map(|i| i.item_id.as_str())
            .collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(values.return_items.items[0].quantity, 2);
        assert!(values.return_items.items.iter().all(|i| !i.selected));
        assert!(values.notification.send_notification);
        assert_eq!(values.claim_type.claim_type, ClaimType::Refund);
    }

    #[test]
    fn test_defaults_round_trip_through_json() {
        let values = default_claim_values(&order());
        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(json["return_items"]["items"][0]["return"], false);
        assert_eq!(json["claim_type"]["type"], "refund");
        let back: ClaimFormValues = serde_json::from_value(json).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn test_missing_reason_reports_item_path() {
        let mut values = default_claim_values(&order());
        values.return_items.items[1].selected = true;

        let errors = build_claim_request(&values).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].0.to_string(),
            "return_items.items.1.return_reason_details"
        );
        assert_eq!(errors[0].1, REASON_REQUIRED);
    }

    #[test]
    fn test_replace_requires_shipping_option() {
        let mut values = default_claim_values(&order());
        values.claim_type.claim_type = ClaimType::Replace;

        let errors = build_claim_request(&values).unwrap_err();
        assert_eq!(errors[0].0.to_string(), "replacement_shipping.option");
    }

    #[test]
    fn test_refund_claim_request() {
        let mut values = default_claim_values(&order());
        values.return_items.items[0].selected = true;
        values.return_items.items[0].return_reason_details.reason = Some(ClaimReason::WrongItem);
        values.refund_amount.amount = Some(1200);
        values.notification.send_notification = false;
        values.shipping_address.city = "Berlin".to_string();

        let request = build_claim_request(&values).unwrap();
        assert_eq!(request.claim_items.len(), 1);
        assert_eq!(request.claim_items[0].quantity, 2);
        assert_eq!(request.claim_items[0].note, None);
        assert_eq!(request.refund_amount, Some(1200));
        assert!(request.no_notification);
        assert!(request.shipping_address.is_none());
        assert!(request.additional_items.is_none());
        assert!(request.shipping_methods.is_none());
    }

    #[test]
    fn test_replace_claim_request() {
        let mut values = default_claim_values(&order());
        values.claim_type.claim_type = ClaimType::Replace;
        values.return_items.items[0].selected = true;
        values.return_items.items[0].return_reason_details = ReasonDetails {
            reason: Some(ClaimReason::ProductionFailure),
            note: " seam opened ".to_string(),
        };
        values.replacement_shipping.option = Some(ShippingChoice {
            id: "so_express".to_string(),
            name: "Express".to_string(),
        });
        values.additional_items.items.push(ClaimAdditionalItem {
            variant_id: "variant_a".to_string(),
            title: "Shirt a".to_string(),
            quantity: 2,
        });
        values.refund_amount.amount = Some(500);
        values.shipping_address.company = "  ".to_string();
        values.shipping_address.country_code = "DE".to_string();

        let request = build_claim_request(&values).unwrap();
        assert_eq!(request.claim_items[0].note.as_deref(), Some("seam opened"));
        assert_eq!(request.refund_amount, None);
        let methods = request.shipping_methods.unwrap();
        assert_eq!(methods[0].option_id, "so_express");
        assert_eq!(methods[0].price, 0);
        assert_eq!(request.additional_items.unwrap()[0].quantity, 2);
        let address = request.shipping_address.unwrap();
        assert_eq!(address.company, None);
        assert_eq!(address.country_code, "de");
    }

    #[test]
    fn test_fractional_quantity_reported_at_field() {
        let mut raw = serde_json::to_value(default_claim_values(&order())).unwrap();
        raw["return_items"]["items"][0]["return"] = json!(true);
        raw["return_items"]["items"][0]["quantity"] = json!(1.5);

        let errors = match decode_claim_values(raw) {
            Err(ClaimValuesError::Fields(errors)) => errors,
            other => panic!("expected field errors, got {other:?}"),
        };
        assert_eq!(
            errors,
            vec![(
                FormPath::parse("return_items.items.0.quantity"),
                WHOLE_QUANTITY.to_string()
            )]
        );
    }

    #[test]
    fn test_cleared_quantity_on_unpicked_row_is_ignored() {
        let mut raw = serde_json::to_value(default_claim_values(&order())).unwrap();
        raw["return_items"]["items"][1]["quantity"] = json!(null);
        raw["additional_items"]["items"] = json!([{ "variant_id": "v", "title": "T", "quantity": "" }]);

        match decode_claim_values(raw.clone()) {
            Err(ClaimValuesError::Fields(errors)) => assert_eq!(
                errors,
                vec![(
                    FormPath::parse("additional_items.items.0.quantity"),
                    WHOLE_QUANTITY.to_string()
                )]
            ),
            other => panic!("expected field errors, got {other:?}"),
        }

        raw["additional_items"]["items"] = json!([]);
        let values = decode_claim_values(raw).unwrap();
        let unpicked = &values.return_items.items[1];
        assert!(!unpicked.selected);
        assert_eq!(unpicked.quantity, unpicked.original_quantity);
    }
}
