pub mod conditions;
mod panel;

pub use panel::DiscountsPanel;
