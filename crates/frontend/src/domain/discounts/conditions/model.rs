use contracts::domain::discounts::CustomerGroup;
use serde::Serialize;

use crate::shared::layered_modal::LayeredScreen;
use crate::shared::selection::Selectable;

pub const PAGE_SIZE: u32 = 10;

/// Screens layered over the edit-condition modal
#[derive(Debug, Clone, PartialEq)]
pub enum EditConditionScreen {
    AddCustomerGroups,
}

impl LayeredScreen for EditConditionScreen {
    fn title(&self) -> String {
        match self {
            EditConditionScreen::AddCustomerGroups => "Add customer groups".to_string(),
        }
    }
}

/// What happens after the chosen groups were added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Pop back to the resources table
    GoBack,
    /// Reset the stack and close the modal
    Close,
}

/// Customer group row of the add screen; groups already on the condition
/// stay visible but cannot be picked.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachableGroup {
    pub group: CustomerGroup,
    pub attached: bool,
}

impl Selectable for AttachableGroup {
    fn selection_id(&self) -> &str {
        &self.group.id
    }

    fn is_disabled(&self) -> bool {
        self.attached
    }
}

pub fn attachable_groups(groups: &[CustomerGroup], existing: &[String]) -> Vec<AttachableGroup> {
    groups
        .iter()
        .map(|group| AttachableGroup {
            attached: existing.contains(&group.id),
            group: group.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerGroupsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    pub offset: u32,
    pub limit: u32,
}

impl Default for CustomerGroupsQuery {
    fn default() -> Self {
        Self {
            q: None,
            offset: 0,
            limit: PAGE_SIZE,
        }
    }
}

impl CustomerGroupsQuery {
    /// New search term, back to the first page
    pub fn search(&self, term: &str) -> Self {
        let term = term.trim();
        Self {
            q: (!term.is_empty()).then(|| term.to_string()),
            offset: 0,
            limit: self.limit,
        }
    }

    pub fn next_page(&self, total: u32) -> Option<Self> {
        let offset = self.offset + self.limit;
        (offset < total).then(|| Self {
            offset,
            ..self.clone()
        })
    }

    pub fn prev_page(&self) -> Option<Self> {
        (self.offset > 0).then(|| Self {
            offset: self.offset.saturating_sub(self.limit),
            ..self.clone()
        })
    }

    /// "1 - 10 of 42"
    pub fn page_label(&self, shown: usize, total: u32) -> String {
        if shown == 0 {
            return format!("0 of {total}");
        }
        format!("{} - {} of {}", self.offset + 1, self.offset as usize + shown, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::selection::{HeaderCheckState, SelectionMap};

    fn group(id: &str) -> CustomerGroup {
        CustomerGroup {
            id: id.to_string(),
            name: id.to_uppercase(),
            customer_count: None,
        }
    }

    #[test]
    fn test_select_all_leaves_attached_groups_out() {
        let rows = attachable_groups(
            &[group("cgrp_1"), group("cgrp_2"), group("cgrp_3")],
            &["cgrp_2".to_string()],
        );
        assert!(rows[1].is_disabled());

        let picked = SelectionMap::new().select_all(&rows, true, |_| ());
        assert_eq!(picked.ids().collect::<Vec<_>>(), ["cgrp_1", "cgrp_3"]);
        assert_eq!(picked.header_state(&rows), HeaderCheckState::Checked);

        let cleared = picked.deselect_all();
        assert!(cleared.is_empty());
        assert_eq!(cleared.header_state(&rows), HeaderCheckState::Unchecked);
    }

    #[test]
    fn test_query_string() {
        let query = CustomerGroupsQuery::default().search("  vip ");
        assert_eq!(serde_qs::to_string(&query).unwrap(), "q=vip&offset=0&limit=10");
        let blank = query.search("");
        assert_eq!(serde_qs::to_string(&blank).unwrap(), "offset=0&limit=10");
    }

    #[test]
    fn test_paging() {
        let first = CustomerGroupsQuery::default();
        assert!(first.prev_page().is_none());
        let second = first.next_page(25).unwrap();
        assert_eq!(second.offset, 10);
        let third = second.next_page(25).unwrap();
        assert!(third.next_page(25).is_none());
        assert_eq!(third.page_label(5, 25), "21 - 25 of 25");
        assert_eq!(third.prev_page().unwrap().offset, 10);
    }
}
