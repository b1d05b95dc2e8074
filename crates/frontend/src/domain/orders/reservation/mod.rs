pub mod modal;
pub mod model;

pub use modal::ReserveItemsModal;
