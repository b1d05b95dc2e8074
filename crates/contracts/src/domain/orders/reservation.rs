use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLocation {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLocationsResponse {
    pub stock_locations: Vec<StockLocation>,
}

/// Body of `POST /admin/reservations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub line_item_id: String,
    pub inventory_item_id: String,
    pub location_id: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub line_item_id: Option<String>,
    pub inventory_item_id: String,
    pub location_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub reservation: Reservation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationLevel {
    pub location_id: String,
    pub stocked_quantity: i64,
    pub available_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    #[serde(default)]
    pub location_levels: Vec<LocationLevel>,
}

/// Inventory view of a single variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantInventory {
    pub id: String,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
}

impl VariantInventory {
    /// Units available at `location_id` for the first inventory item.
    pub fn available_at(&self, location_id: &str) -> Option<i64> {
        self.inventory
            .first()?
            .location_levels
            .iter()
            .find(|level| level.location_id == location_id)
            .map(|level| level.available_quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantInventoryResponse {
    pub variant: VariantInventory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_at_location() {
        let inv = VariantInventory {
            id: "variant_1".to_string(),
            inventory: vec![InventoryItem {
                id: "iitem_1".to_string(),
                location_levels: vec![LocationLevel {
                    location_id: "sloc_1".to_string(),
                    stocked_quantity: 10,
                    available_quantity: 7,
                }],
            }],
        };
        assert_eq!(inv.available_at("sloc_1"), Some(7));
        assert_eq!(inv.available_at("sloc_2"), None);
    }
}
