//! Customer group resources of a discount condition.

mod add_customer_groups;
pub mod api;
mod modal;
pub mod model;

pub use add_customer_groups::AddCustomerGroupsScreen;
pub use modal::EditConditionModal;
