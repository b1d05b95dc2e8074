pub mod modal;
pub mod model;
pub mod reason_screen;
pub mod table;

pub use modal::RequestReturnModal;
pub use model::{ReturnScreen, ReturnSelection};
pub use table::ReturnItemsTable;
