pub mod api;
pub mod claim;
mod panel;
pub mod reservation;
pub mod returns;

pub use panel::OrdersPanel;
