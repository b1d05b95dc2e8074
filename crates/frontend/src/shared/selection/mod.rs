//! Working selections over API entities.
//!
//! A selection is keyed by entity id. Presence of a key means "selected";
//! the record stored under it holds the per-entity data the user entered
//! (quantity, reason, note, images). Every operation leaves `self`
//! untouched and returns a new map, so a changed selection is always a new
//! value and an unchanged one is the old value.

mod ids;
mod return_item;

pub use ids::{HeaderCheckState, SelectedIds};
pub use return_item::ReturnItemSelection;

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionRejected {
    #[error("`{id}` is not selected")]
    NotSelected { id: String },

    #[error("quantity for `{id}` cannot go down to {attempted}")]
    BelowMinimum { id: String, attempted: i64 },

    #[error("quantity for `{id}` cannot exceed {max} (attempted {attempted})")]
    AboveMaximum { id: String, attempted: i64, max: u32 },
}

/// Entity that can appear in a selection table.
pub trait Selectable {
    fn selection_id(&self) -> &str;

    fn is_disabled(&self) -> bool {
        false
    }
}

/// Record with an adjustable quantity.
pub trait HasQuantity {
    fn quantity(&self) -> u32;
    fn set_quantity(&mut self, quantity: u32);
}

/// Inclusive `[1, max]` window for a selected quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityBounds {
    pub max: u32,
}

impl QuantityBounds {
    pub fn new(max: u32) -> Self {
        Self { max }
    }

    /// `total - already_processed`, e.g. ordered minus already returned.
    pub fn returnable(total: u32, already_processed: u32) -> Self {
        Self {
            max: total.saturating_sub(already_processed),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionMap<R> {
    entries: BTreeMap<String, R>,
}

impl<R> Default for SelectionMap<R> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<R: Clone> SelectionMap<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.entries.iter().map(|(id, record)| (id.as_str(), record))
    }

    /// Removes `id` (dropping its record) or inserts it with `initial`.
    pub fn toggle(&self, id: &str, initial: R) -> Self {
        self.toggle_with(id, || initial)
    }

    /// Like `toggle`, building the record only when inserting.
    pub fn toggle_with(&self, id: &str, init: impl FnOnce() -> R) -> Self {
        let mut next = self.clone();
        if next.entries.remove(id).is_none() {
            next.entries.insert(id.to_string(), init());
        }
        next
    }

    /// Edits the record of an already selected entity.
    pub fn update(&self, id: &str, f: impl FnOnce(&mut R)) -> Result<Self, SelectionRejected> {
        if !self.contains(id) {
            return Err(SelectionRejected::NotSelected { id: id.to_string() });
        }
        let mut next = self.clone();
        if let Some(record) = next.entries.get_mut(id) {
            f(record);
        }
        Ok(next)
    }

    /// Selects every entity not selected yet; records already present are
    /// kept as they are.
    pub fn select_all<E: Selectable>(
        &self,
        entities: &[E],
        exclude_disabled: bool,
        init: impl Fn(&E) -> R,
    ) -> Self {
        let mut next = self.clone();
        for entity in entities {
            if exclude_disabled && entity.is_disabled() {
                continue;
            }
            next.entries
                .entry(entity.selection_id().to_string())
                .or_insert_with(|| init(entity));
        }
        next
    }

    pub fn deselect_all(&self) -> Self {
        Self::default()
    }

    /// Header checkbox state over the enabled entities of a page.
    pub fn header_state<E: Selectable>(&self, entities: &[E]) -> HeaderCheckState {
        let mut total = 0;
        let mut selected = 0;
        for entity in entities.iter().filter(|e| !e.is_disabled()) {
            total += 1;
            if self.contains(entity.selection_id()) {
                selected += 1;
            }
        }
        match selected {
            0 => HeaderCheckState::Unchecked,
            n if n == total => HeaderCheckState::Checked,
            _ => HeaderCheckState::Indeterminate,
        }
    }
}

impl<R: Clone + HasQuantity> SelectionMap<R> {
    /// Moves the quantity of `id` by `delta`.
    ///
    /// A move that would leave `[1, bounds.max]` is rejected as a whole;
    /// the quantity is never clamped to the boundary.
    pub fn adjust_quantity(
        &self,
        id: &str,
        delta: i64,
        bounds: QuantityBounds,
    ) -> Result<Self, SelectionRejected> {
        let record = self
            .get(id)
            .ok_or_else(|| SelectionRejected::NotSelected { id: id.to_string() })?;
        let attempted = i64::from(record.quantity()) + delta;

        if attempted < 1 {
            return Err(SelectionRejected::BelowMinimum {
                id: id.to_string(),
                attempted,
            });
        }
        if attempted > i64::from(bounds.max) {
            return Err(SelectionRejected::AboveMaximum {
                id: id.to_string(),
                attempted,
                max: bounds.max,
            });
        }

        // attempted is within [1, max] so it fits u32
        let quantity = attempted as u32;
        self.update(id, |record| record.set_quantity(quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        quantity: u32,
        returned: u32,
        disabled: bool,
    }

    impl Selectable for Row {
        fn selection_id(&self) -> &str {
            self.id
        }

        fn is_disabled(&self) -> bool {
            self.disabled
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "a", quantity: 3, returned: 1, disabled: false },
            Row { id: "b", quantity: 1, returned: 0, disabled: false },
            Row { id: "c", quantity: 2, returned: 2, disabled: true },
        ]
    }

    fn record(quantity: u32) -> ReturnItemSelection {
        ReturnItemSelection {
            quantity,
            ..ReturnItemSelection::default()
        }
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let base = SelectionMap::new().toggle("b", record(1));
        for id in ["a", "zzz"] {
            let round_trip = base.toggle(id, record(2)).toggle(id, record(2));
            assert_eq!(round_trip, base, "toggle twice on {id}");
        }
    }

    #[test]
    fn test_toggle_twice_on_selected_id_starts_fresh() {
        let base = SelectionMap::new().toggle("b", record(1));
        let dropped = base.toggle("b", record(2));
        assert!(!dropped.contains("b"));

        // the old record is gone, re-selecting takes the new initial one
        let reselected = dropped.toggle("b", record(2));
        assert_eq!(reselected.get("b"), Some(&record(2)));
        assert_eq!(base.toggle("b", record(1)).toggle("b", record(1)), base);
    }

    #[test]
    fn test_header_state_skips_disabled_rows() {
        let empty: SelectionMap<()> = SelectionMap::new();
        assert_eq!(empty.header_state(&rows()), HeaderCheckState::Unchecked);
        let one = empty.toggle("a", ());
        assert_eq!(one.header_state(&rows()), HeaderCheckState::Indeterminate);
        let all = one.select_all(&rows(), true, |_| ());
        assert!(!all.contains("c"));
        assert_eq!(all.header_state(&rows()), HeaderCheckState::Checked);
    }

    #[test]
    fn test_toggle_does_not_mutate_input() {
        let empty: SelectionMap<ReturnItemSelection> = SelectionMap::new();
        let selected = empty.toggle("a", record(1));
        assert!(empty.is_empty());
        assert!(selected.contains("a"));
    }

    #[test]
    fn test_deselect_discards_record() {
        let selected = SelectionMap::new().toggle("a", record(1));
        let edited = selected
            .update("a", |r| r.note = "scratched".to_string())
            .unwrap();
        let reselected = edited.toggle("a", record(1)).toggle("a", record(1));
        assert_eq!(reselected.get("a").unwrap().note, "");
    }

    #[test]
    fn test_update_requires_selection() {
        let map: SelectionMap<ReturnItemSelection> = SelectionMap::new();
        assert_eq!(
            map.update("a", |r| r.quantity = 2),
            Err(SelectionRejected::NotSelected { id: "a".to_string() })
        );
    }

    #[test]
    fn test_adjust_quantity_over_max_is_rejected_not_clamped() {
        let items = rows();
        let a = &items[0];
        let map = SelectionMap::new().toggle(a.id, record(1));
        let bounds = QuantityBounds::returnable(a.quantity, a.returned);
        assert_eq!(bounds.max, 2);

        let result = map.adjust_quantity("a", 5, bounds);
        assert_eq!(
            result,
            Err(SelectionRejected::AboveMaximum { id: "a".to_string(), attempted: 6, max: 2 })
        );
        assert_eq!(map.get("a").unwrap().quantity, 1);
    }

    #[test]
    fn test_adjust_quantity_within_bounds() {
        let map = SelectionMap::new().toggle("a", record(1));
        let bounds = QuantityBounds::new(2);

        let up = map.adjust_quantity("a", 1, bounds).unwrap();
        assert_eq!(up.get("a").unwrap().quantity, 2);
        assert!(matches!(
            up.adjust_quantity("a", 1, bounds),
            Err(SelectionRejected::AboveMaximum { .. })
        ));

        let down = up.adjust_quantity("a", -1, bounds).unwrap();
        assert_eq!(down.get("a").unwrap().quantity, 1);
        assert_eq!(
            down.adjust_quantity("a", -1, bounds),
            Err(SelectionRejected::BelowMinimum { id: "a".to_string(), attempted: 0 })
        );
    }

    #[test]
    fn test_adjust_quantity_result_stays_in_range() {
        let bounds = QuantityBounds::new(4);
        for start in 1..=4u32 {
            for delta in -6i64..=6 {
                let map = SelectionMap::new().toggle("x", record(start));
                match map.adjust_quantity("x", delta, bounds) {
                    Ok(next) => {
                        let q = next.get("x").unwrap().quantity;
                        assert!((1..=4).contains(&q));
                        assert_eq!(i64::from(q), i64::from(start) + delta);
                    }
                    Err(_) => assert_eq!(map.get("x").unwrap().quantity, start),
                }
            }
        }
    }

    #[test]
    fn test_select_all_skips_disabled_and_keeps_records() {
        let items = rows();
        let map = SelectionMap::new()
            .toggle("a", record(1))
            .update("a", |r| r.note = "keep".to_string())
            .unwrap();

        let all = map.select_all(&items, true, |row| record(row.quantity - row.returned));
        let ids: Vec<&str> = all.ids().collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(all.get("a").unwrap().note, "keep");

        let with_disabled = map.select_all(&items, false, |_| record(1));
        assert!(with_disabled.contains("c"));
    }

    #[test]
    fn test_select_all_then_deselect_all_is_empty() {
        let all = SelectionMap::new().select_all(&rows(), true, |_| record(1));
        assert_eq!(all.len(), 2);
        assert!(all.deselect_all().is_empty());
    }
}
