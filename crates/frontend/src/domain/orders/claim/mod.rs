pub mod modal;
pub mod model;
pub mod sections;

pub use modal::RegisterClaimModal;
