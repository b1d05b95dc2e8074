use serde::{Deserialize, Serialize};

/// Variant reference embedded in a line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSummary {
    pub id: String,
    pub title: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
}

/// Order line as returned by the orders endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub variant_id: Option<String>,
    #[serde(default)]
    pub variant: Option<VariantSummary>,
    pub quantity: u32,
    #[serde(default)]
    pub returned_quantity: u32,
    #[serde(default)]
    pub fulfilled_quantity: u32,
    /// Amount in minor units
    pub unit_price: i64,
    /// Amount still refundable for the line, minor units
    #[serde(default)]
    pub refundable: Option<i64>,
    /// Set when the line was added by a swap
    #[serde(default)]
    pub swap_id: Option<String>,
    /// Set when the line was added by a claim
    #[serde(default)]
    pub claim_order_id: Option<String>,
}

impl LineItem {
    /// Units that have not been returned yet.
    pub fn returnable_quantity(&self) -> u32 {
        self.quantity.saturating_sub(self.returned_quantity)
    }

    /// Units that have not been fulfilled yet.
    pub fn fulfillable_quantity(&self) -> u32 {
        self.quantity.saturating_sub(self.fulfilled_quantity)
    }

    pub fn is_fully_returned(&self) -> bool {
        self.returned_quantity >= self.quantity
    }
}

/// Swap or claim header, only the fields needed to tell whether it is canceled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AfterSaleRef {
    pub id: String,
    #[serde(default)]
    pub canceled_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub display_id: i64,
    pub currency_code: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub swaps: Vec<AfterSaleRef>,
    #[serde(default)]
    pub claims: Vec<AfterSaleRef>,
}

impl Order {
    /// A line is canceled when the swap or claim that created it was canceled.
    pub fn is_line_item_canceled(&self, item: &LineItem) -> bool {
        let canceled = |refs: &[AfterSaleRef], id: &Option<String>| {
            id.as_ref().is_some_and(|id| {
                refs.iter()
                    .any(|r| &r.id == id && r.canceled_at.is_some())
            })
        };
        canceled(&self.swaps, &item.swap_id) || canceled(&self.claims, &item.claim_order_id)
    }

    /// Lines that can still be picked for a return or a claim.
    pub fn returnable_items(&self) -> Vec<LineItem> {
        self.items
            .iter()
            .filter(|item| !item.is_fully_returned() && !self.is_line_item_canceled(item))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, quantity: u32, returned: u32) -> LineItem {
        LineItem {
            id: id.to_string(),
            title: format!("Item {id}"),
            thumbnail: None,
            variant_id: None,
            variant: None,
            quantity,
            returned_quantity: returned,
            fulfilled_quantity: 0,
            unit_price: 1000,
            refundable: None,
            swap_id: None,
            claim_order_id: None,
        }
    }

    fn order(items: Vec<LineItem>) -> Order {
        Order {
            id: "order_1".to_string(),
            display_id: 1,
            currency_code: "eur".to_string(),
            email: None,
            region_id: None,
            items,
            swaps: Vec::new(),
            claims: Vec::new(),
        }
    }

    #[test]
    fn test_returnable_quantity() {
        assert_eq!(item("a", 3, 1).returnable_quantity(), 2);
        assert_eq!(item("b", 1, 1).returnable_quantity(), 0);
        assert_eq!(item("c", 1, 4).returnable_quantity(), 0);
    }

    #[test]
    fn test_returnable_items_skip_returned_and_canceled() {
        let mut from_swap = item("swapped", 2, 0);
        from_swap.swap_id = Some("swap_1".to_string());
        let mut from_claim = item("claimed", 2, 0);
        from_claim.claim_order_id = Some("claim_1".to_string());

        let mut o = order(vec![item("a", 3, 1), item("b", 1, 1), from_swap, from_claim]);
        o.swaps.push(AfterSaleRef {
            id: "swap_1".to_string(),
            canceled_at: Some("2024-03-15T14:02:26Z".to_string()),
        });
        o.claims.push(AfterSaleRef {
            id: "claim_1".to_string(),
            canceled_at: None,
        });

        let ids: Vec<String> = o.returnable_items().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["a".to_string(), "claimed".to_string()]);
    }

    #[test]
    fn test_line_item_defaults_from_json() {
        let raw = r#"{"id":"li_1","title":"Shirt","quantity":2,"unit_price":2500}"#;
        let parsed: LineItem = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.returned_quantity, 0);
        assert_eq!(parsed.returnable_quantity(), 2);
        assert!(parsed.variant.is_none());
    }
}
