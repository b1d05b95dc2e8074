//! Orders and the after-sale documents created from them

pub mod claim;
pub mod order;
pub mod reservation;
pub mod returns;

pub use order::{LineItem, Order, VariantSummary};
