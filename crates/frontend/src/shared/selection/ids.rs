use std::collections::BTreeSet;

/// State of a "select all on this page" header checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheckState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// Id-only selection, for tables whose rows carry no extra data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedIds(BTreeSet<String>);

impl SelectedIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    pub fn toggle(&self, id: &str) -> Self {
        let checked = !self.contains(id);
        self.set(id, checked)
    }

    pub fn set(&self, id: &str, checked: bool) -> Self {
        let mut next = self.clone();
        if checked {
            next.0.insert(id.to_string());
        } else {
            next.0.remove(id);
        }
        next
    }

    /// Header checkbox: selects every id of the page, or clears them all
    /// when `checked` is false. Ids from other pages are kept.
    pub fn select_page<'a>(&self, page: impl IntoIterator<Item = &'a str>, checked: bool) -> Self {
        let mut next = self.clone();
        for id in page {
            if checked {
                next.0.insert(id.to_string());
            } else {
                next.0.remove(id);
            }
        }
        next
    }

    pub fn clear(&self) -> Self {
        Self::default()
    }

    pub fn header_state<'a>(&self, page: impl IntoIterator<Item = &'a str>) -> HeaderCheckState {
        let mut total = 0;
        let mut selected = 0;
        for id in page {
            total += 1;
            if self.contains(id) {
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

impl FromIterator<String> for SelectedIds {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_set() {
        let ids = SelectedIds::new().toggle("cgrp_1").set("cgrp_2", true);
        assert_eq!(ids.ids(), vec!["cgrp_1".to_string(), "cgrp_2".to_string()]);
        assert!(!ids.toggle("cgrp_1").contains("cgrp_1"));
        assert_eq!(ids.set("cgrp_3", false), ids);
    }

    #[test]
    fn test_header_state() {
        let page = ["a", "b"];
        let none = SelectedIds::new();
        assert_eq!(none.header_state(page), HeaderCheckState::Unchecked);
        assert_eq!(none.toggle("a").header_state(page), HeaderCheckState::Indeterminate);

        let all = none.select_page(page, true);
        assert_eq!(all.header_state(page), HeaderCheckState::Checked);
        assert!(all.select_page(page, false).is_empty());
    }

    #[test]
    fn test_set_page_keeps_other_pages() {
        let ids = SelectedIds::new().toggle("other").select_page(["a", "b"], true);
        let cleared = ids.select_page(["a", "b"], false);
        assert_eq!(cleared.ids(), vec!["other".to_string()]);
    }

    #[test]
    fn test_empty_page_is_unchecked() {
        let ids = SelectedIds::new().toggle("a");
        assert_eq!(ids.header_state(std::iter::empty()), HeaderCheckState::Unchecked);
    }
}
