pub mod header_checkbox;
pub mod quantity_stepper;
pub mod table_checkbox;

pub use header_checkbox::HeaderCheckbox;
pub use quantity_stepper::QuantityStepper;
pub use table_checkbox::TableCheckbox;
