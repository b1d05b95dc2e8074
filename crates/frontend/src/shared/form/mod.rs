//! Form composition: value tree, nested scopes, field arrays.

pub mod components;
pub mod error;
pub mod field_array;
pub mod path;
pub mod reactive;
pub mod scope;
pub mod state;

pub use components::{mount_failed, InputError, TextField};
pub use error::FormError;
pub use field_array::{FieldArray, FieldRow};
pub use path::{FormPath, Segment};
pub use reactive::{FormHandle, NestedForm};
pub use scope::{FormScope, Lens};
pub use state::{FieldError, FieldErrorKind, FieldRules, FormState};
