pub mod api;
mod new_product;
pub mod variants;

pub use new_product::NewProductForm;
