use contracts::domain::orders::returns::ReturnReason;
use contracts::domain::orders::LineItem;

use super::HasQuantity;

/// What the user entered for one line item picked for a return or claim
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnItemSelection {
    pub quantity: u32,
    pub reason: Option<ReturnReason>,
    pub note: String,
    /// `None` when the flow does not collect images
    pub images: Option<Vec<String>>,
}

impl ReturnItemSelection {
    /// Starts with everything that is still returnable.
    pub fn for_line_item(item: &LineItem, images_on_returns: bool) -> Self {
        Self {
            quantity: item.returnable_quantity(),
            reason: None,
            note: String::new(),
            images: images_on_returns.then(Vec::new),
        }
    }

    /// Applies the outcome of the reason screen. Uploaded images are added
    /// to the ones already attached.
    pub fn set_reason(&mut self, reason: Option<ReturnReason>, note: String, uploaded: Vec<String>) {
        self.reason = reason;
        self.note = note;
        if !uploaded.is_empty() {
            self.images.get_or_insert_with(Vec::new).extend(uploaded);
        }
    }

    pub fn image_count(&self) -> usize {
        self.images.as_ref().map_or(0, Vec::len)
    }
}

impl HasQuantity for ReturnItemSelection {
    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(value: &str) -> ReturnReason {
        ReturnReason {
            id: format!("rr_{value}"),
            value: value.to_string(),
            label: value.to_uppercase(),
            description: None,
        }
    }

    #[test]
    fn test_set_reason_appends_images() {
        let mut record = ReturnItemSelection {
            quantity: 1,
            images: Some(vec!["https://cdn/a.png".to_string()]),
            ..Default::default()
        };
        record.set_reason(
            Some(reason("damaged")),
            "box crushed".to_string(),
            vec!["https://cdn/b.png".to_string()],
        );
        assert_eq!(record.image_count(), 2);
        assert_eq!(record.note, "box crushed");
        assert_eq!(record.reason.as_ref().unwrap().value, "damaged");
    }

    #[test]
    fn test_set_reason_without_uploads_keeps_images_off() {
        let mut record = ReturnItemSelection::default();
        record.set_reason(Some(reason("size")), String::new(), Vec::new());
        assert!(record.images.is_none());
        assert_eq!(record.image_count(), 0);
    }
}
