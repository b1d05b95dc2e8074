use contracts::domain::orders::reservation::{CreateReservationRequest, Reservation};
use contracts::domain::orders::LineItem;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One line of the reservation form, mounted at `items.<i>`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReserveLineForm {
    pub line_item_id: String,
    #[serde(default)]
    pub inventory_item_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReserveFormValues {
    #[serde(default)]
    pub location: Option<String>,
    /// Lines without inventory are never written and stay `null`
    #[serde(default)]
    pub items: Vec<Option<ReserveLineForm>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReserveError {
    #[error("Choose where you wish to allocate from")]
    LocationRequired,
}

/// Units of `item` that can still be reserved at a location with
/// `available` units on hand.
pub fn max_reservation(item: &LineItem, already_reserved: u32, available: Option<i64>) -> u32 {
    let line_capacity = i64::from(item.fulfillable_quantity()) - i64::from(already_reserved);
    let stock_capacity = available.unwrap_or(0);
    // line_capacity fits in u32, so the clamped minimum does too
    line_capacity.min(stock_capacity).max(0) as u32
}

/// Requests for every line with a positive quantity and an inventory item.
pub fn reservation_requests(values: &ReserveFormValues) -> Result<Vec<CreateReservationRequest>, ReserveError> {
    let location_id = values
        .location
        .clone()
        .filter(|l| !l.is_empty())
        .ok_or(ReserveError::LocationRequired)?;

    Ok(values
        .items
        .iter()
        .flatten()
        .filter_map(|line| {
            let quantity = line.quantity.filter(|q| *q > 0)?;
            let inventory_item_id = line.inventory_item_id.clone()?;
            Some(CreateReservationRequest {
                line_item_id: line.line_item_id.clone(),
                inventory_item_id,
                location_id: location_id.clone(),
                quantity,
                description: line.description.clone().filter(|d| !d.trim().is_empty()),
            })
        })
        .collect())
}

/// Outcome of creating a batch of reservations
#[derive(Debug, Default, PartialEq)]
pub struct ReserveOutcome {
    pub created: Vec<Reservation>,
    pub failures: Vec<String>,
}

impl ReserveOutcome {
    pub fn collect(results: Vec<Result<Reservation, String>>) -> Self {
        let mut outcome = Self::default();
        for result in results {
            match result {
                Ok(reservation) => outcome.created.push(reservation),
                Err(e) => outcome.failures.push(e),
            }
        }
        outcome
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Reservations to delete again when the batch failed as a whole
    pub fn rollback_ids(&self) -> Vec<String> {
        if self.is_success() {
            Vec::new()
        } else {
            self.created.iter().map(|r| r.id.clone()).collect()
        }
    }

    pub fn failure_message(&self) -> String {
        self.failures.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: Option<u32>, inventory: Option<&str>) -> Option<ReserveLineForm> {
        Some(ReserveLineForm {
            line_item_id: id.to_string(),
            inventory_item_id: inventory.map(str::to_string),
            quantity,
            description: Some(String::new()),
        })
    }

    fn reservation(id: &str) -> Reservation {
        Reservation {
            id: id.to_string(),
            line_item_id: None,
            inventory_item_id: "iitem_1".to_string(),
            location_id: "sloc_1".to_string(),
            quantity: 1,
        }
    }

    #[test]
    fn test_location_is_required() {
        let values = ReserveFormValues {
            location: Some(String::new()),
            items: vec![line("li_1", Some(1), Some("iitem_1"))],
        };
        assert_eq!(reservation_requests(&values), Err(ReserveError::LocationRequired));
    }

    #[test]
    fn test_zero_and_unstocked_lines_are_skipped() {
        let values = ReserveFormValues {
            location: Some("sloc_1".to_string()),
            items: vec![
                line("li_1", Some(0), Some("iitem_1")),
                None,
                line("li_2", Some(2), None),
                line("li_3", Some(3), Some("iitem_3")),
            ],
        };
        let requests = reservation_requests(&values).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].line_item_id, "li_3");
        assert_eq!(requests[0].location_id, "sloc_1");
        assert_eq!(requests[0].description, None);
    }

    #[test]
    fn test_max_reservation() {
        let item = LineItem {
            id: "li_1".to_string(),
            title: "Mug".to_string(),
            thumbnail: None,
            variant_id: None,
            variant: None,
            quantity: 5,
            returned_quantity: 0,
            fulfilled_quantity: 1,
            unit_price: 800,
            refundable: None,
            swap_id: None,
            claim_order_id: None,
        };
        assert_eq!(max_reservation(&item, 1, Some(10)), 3);
        assert_eq!(max_reservation(&item, 0, Some(2)), 2);
        assert_eq!(max_reservation(&item, 6, Some(10)), 0);
        assert_eq!(max_reservation(&item, 0, None), 0);
    }

    #[test]
    fn test_failed_batch_rolls_back_created() {
        let outcome = ReserveOutcome::collect(vec![
            Ok(reservation("resitem_1")),
            Err("Failed to reserve li_2: 400".to_string()),
            Ok(reservation("resitem_3")),
        ]);
        assert!(!outcome.is_success());
        assert_eq!(outcome.rollback_ids(), ["resitem_1", "resitem_3"]);
        assert_eq!(outcome.failure_message(), "Failed to reserve li_2: 400");

        let ok = ReserveOutcome::collect(vec![Ok(reservation("resitem_1"))]);
        assert!(ok.rollback_ids().is_empty());
    }
}
