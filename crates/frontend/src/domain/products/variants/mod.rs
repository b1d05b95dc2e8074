mod form;
pub mod model;
mod variant_modal;

pub use form::AddVariantsForm;
pub use variant_modal::VariantModal;
