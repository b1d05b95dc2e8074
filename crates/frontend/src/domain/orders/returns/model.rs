use contracts::domain::orders::returns::{CreateReturnRequest, ReturnItemRequest, ReturnReason};
use contracts::domain::orders::LineItem;
use thiserror::Error;

use crate::shared::layered_modal::LayeredScreen;
use crate::shared::selection::{
    QuantityBounds, ReturnItemSelection, Selectable, SelectionMap, SelectionRejected,
};

pub type ReturnSelection = SelectionMap<ReturnItemSelection>;

impl Selectable for LineItem {
    fn selection_id(&self) -> &str {
        &self.id
    }

    fn is_disabled(&self) -> bool {
        self.is_fully_returned()
    }
}

/// Screens layered over the return items table
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnScreen {
    Reason { item_id: String },
}

impl LayeredScreen for ReturnScreen {
    fn title(&self) -> String {
        match self {
            ReturnScreen::Reason { .. } => "Return Reasons".to_string(),
        }
    }
}

/// Images uploaded from a reason screen that are not in the selection yet.
///
/// Whatever was not handed over with `submit` is returned by `discard` so the
/// uploads can be deleted once the screen goes away.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingUploads {
    urls: Vec<String>,
    submitted: bool,
}

impl PendingUploads {
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn extend(&mut self, urls: impl IntoIterator<Item = String>) {
        self.urls.extend(urls);
    }

    /// Drops `url`; true when it was pending.
    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.urls.len();
        self.urls.retain(|u| u != url);
        self.urls.len() != before
    }

    pub fn submit(&mut self) -> Vec<String> {
        self.submitted = true;
        self.urls.clone()
    }

    /// Uploads left orphaned by leaving the screen without submitting.
    pub fn discard(&mut self) -> Vec<String> {
        if self.submitted {
            Vec::new()
        } else {
            std::mem::take(&mut self.urls)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnDraftError {
    #[error("Select at least one item to return")]
    NothingSelected,
}

pub fn bounds_for(item: &LineItem) -> QuantityBounds {
    QuantityBounds::returnable(item.quantity, item.returned_quantity)
}

pub fn toggle_item(selection: &ReturnSelection, item: &LineItem, images_on_returns: bool) -> ReturnSelection {
    selection.toggle_with(&item.id, || {
        ReturnItemSelection::for_line_item(item, images_on_returns)
    })
}

/// Applies a stepper click, keeping the old selection when it is out of bounds.
pub fn step_quantity(selection: &ReturnSelection, item: &LineItem, delta: i64) -> ReturnSelection {
    match selection.adjust_quantity(&item.id, delta, bounds_for(item)) {
        Ok(next) => next,
        Err(rejected) => {
            log::debug!("quantity change ignored: {}", rejected);
            selection.clone()
        }
    }
}

pub fn apply_reason(
    selection: &ReturnSelection,
    item_id: &str,
    reason: Option<ReturnReason>,
    note: String,
    uploaded: Vec<String>,
) -> Result<ReturnSelection, SelectionRejected> {
    selection.update(item_id, |record| record.set_reason(reason, note, uploaded))
}

/// "Damaged  box crushed  (2)" line shown under a selected row
pub fn reason_summary(record: &ReturnItemSelection) -> Option<String> {
    let reason = record.reason.as_ref()?;
    let mut summary = reason.label.clone();
    if !record.note.is_empty() {
        summary.push(' ');
        summary.push_str(&record.note);
    }
    let images = record.image_count();
    if images > 0 {
        summary.push_str(&format!(" ({images})"));
    }
    Some(summary)
}

pub fn build_return_request(selection: &ReturnSelection) -> Result<CreateReturnRequest, ReturnDraftError> {
    if selection.is_empty() {
        return Err(ReturnDraftError::NothingSelected);
    }

    let items = selection
        .iter()
        .map(|(id, record)| ReturnItemRequest {
            item_id: id.to_string(),
            quantity: record.quantity,
            reason_id: record.reason.as_ref().map(|r| r.id.clone()),
            note: (!record.note.is_empty()).then(|| record.note.clone()),
        })
        .collect();

    Ok(CreateReturnRequest {
        items,
        receive_now: false,
        no_notification: false,
        refund: None,
        location_id: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_uploads_discarded_unless_submitted() {
        let mut left = PendingUploads::default();
        left.extend(["a.png".to_string(), "b.png".to_string()]);
        assert!(left.remove("a.png"));
        assert!(!left.remove("a.png"));
        assert_eq!(left.discard(), vec!["b.png".to_string()]);
        assert!(left.urls().is_empty());
        assert!(left.discard().is_empty());

        let mut added = PendingUploads::default();
        added.extend(["c.png".to_string()]);
        assert_eq!(added.submit(), vec!["c.png".to_string()]);
        assert!(added.discard().is_empty());
    }

    fn item(id: &str, quantity: u32, returned: u32) -> LineItem {
        LineItem {
            id: id.to_string(),
            title: format!("Item {id}"),
            thumbnail: None,
            variant_id: None,
            variant: None,
            quantity,
            returned_quantity: returned,
            fulfilled_quantity: quantity,
            unit_price: 2500,
            refundable: Some(2500),
            swap_id: None,
            claim_order_id: None,
        }
    }

    fn damaged() -> ReturnReason {
        ReturnReason {
            id: "rr_1".to_string(),
            value: "damaged".to_string(),
            label: "Damaged".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_toggle_starts_with_returnable_quantity() {
        let a = item("a", 3, 1);
        let selection = toggle_item(&ReturnSelection::new(), &a, true);
        let record = selection.get("a").unwrap();
        assert_eq!(record.quantity, 2);
        assert_eq!(record.images, Some(Vec::new()));
    }

    #[test]
    fn test_step_out_of_bounds_keeps_selection() {
        let a = item("a", 3, 1);
        let selection = toggle_item(&ReturnSelection::new(), &a, false);

        let up = step_quantity(&selection, &a, 1);
        assert_eq!(up, selection);

        let down = step_quantity(&selection, &a, -1);
        assert_eq!(down.get("a").unwrap().quantity, 1);
        assert_eq!(step_quantity(&down, &a, -1), down);
    }

    #[test]
    fn test_reason_requires_selected_item() {
        let selection = ReturnSelection::new();
        let err = apply_reason(&selection, "a", Some(damaged()), String::new(), Vec::new()).unwrap_err();
        assert_eq!(err, SelectionRejected::NotSelected { id: "a".to_string() });
    }

    #[test]
    fn test_summary_lists_label_note_and_images() {
        let a = item("a", 1, 0);
        let selection = toggle_item(&ReturnSelection::new(), &a, true);
        let selection = apply_reason(
            &selection,
            "a",
            Some(damaged()),
            "box crushed".to_string(),
            vec!["https://cdn/1.png".to_string(), "https://cdn/2.png".to_string()],
        )
        .unwrap();
        assert_eq!(
            reason_summary(selection.get("a").unwrap()).as_deref(),
            Some("Damaged box crushed (2)")
        );
    }

    #[test]
    fn test_build_request() {
        assert_eq!(
            build_return_request(&ReturnSelection::new()),
            Err(ReturnDraftError::NothingSelected)
        );

        let a = item("a", 3, 1);
        let b = item("b", 1, 0);
        let selection = toggle_item(&ReturnSelection::new(), &a, false);
        let selection = toggle_item(&selection, &b, false);
        let selection = step_quantity(&selection, &a, -1);
        let selection = apply_reason(&selection, "b", Some(damaged()), String::new(), Vec::new()).unwrap();

        let request = build_return_request(&selection).unwrap();
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].item_id, "a");
        assert_eq!(request.items[0].quantity, 1);
        assert_eq!(request.items[0].reason_id, None);
        assert_eq!(request.items[1].reason_id.as_deref(), Some("rr_1"));
        assert_eq!(request.items[1].note, None);
    }
}
