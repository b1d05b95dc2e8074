//! Nested form scopes and typed lenses.
//!
//! A `FormScope` lets a sub-form address its fields as if its sub-object
//! were the whole form: `scope.path("quantity")` yields the full path
//! `parent.key.quantity`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

use super::error::FormError;
use super::field_array::FieldArray;
use super::path::FormPath;
use super::state::{FieldError, FieldRules, FormState};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormScope {
    prefix: FormPath,
}

impl FormScope {
    /// Scope covering the whole form. Never registered as a mount.
    pub fn root() -> Self {
        Self {
            prefix: FormPath::root(),
        }
    }

    pub(super) fn at(prefix: FormPath) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> &FormPath {
        &self.prefix
    }

    pub fn path(&self, sub: impl Into<FormPath>) -> FormPath {
        self.prefix.join(&sub.into())
    }

    pub fn get<'a>(&self, state: &'a FormState, sub: impl Into<FormPath>) -> Option<&'a Value> {
        state.value(&self.path(sub))
    }

    pub fn set(&self, state: &mut FormState, sub: impl Into<FormPath>, value: Value) {
        state.set_value(&self.path(sub), value);
    }

    pub fn register(&self, state: &mut FormState, sub: impl Into<FormPath>, rules: FieldRules) {
        state.register(&self.path(sub), rules);
    }

    pub fn set_error(&self, state: &mut FormState, sub: impl Into<FormPath>, message: impl Into<String>) {
        state.set_error(&self.path(sub), FieldError::manual(message));
    }

    pub fn error<'a>(&self, state: &'a FormState, sub: impl Into<FormPath>) -> Option<&'a FieldError> {
        state.error(&self.path(sub))
    }

    /// Errors inside this scope, with paths relative to it.
    pub fn errors(&self, state: &FormState) -> Vec<(FormPath, FieldError)> {
        state.errors_under(&self.prefix)
    }

    pub fn lens<T>(&self, sub: impl Into<FormPath>) -> Lens<T> {
        Lens::new(self.path(sub))
    }

    pub fn field_array(&self, sub: impl Into<FormPath>) -> FieldArray {
        FieldArray::new(self.path(sub))
    }
}

/// Typed accessor pair for one field, bound to its full path at construction.
#[derive(Debug)]
pub struct Lens<T> {
    path: FormPath,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Lens<T> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<T> Lens<T> {
    pub fn new(path: FormPath) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &FormPath {
        &self.path
    }
}

impl<T: DeserializeOwned> Lens<T> {
    /// Missing fields decode from `null`, so `Lens<Option<_>>` reads absent
    /// values as `None`.
    pub fn get(&self, state: &FormState) -> Result<T, FormError> {
        let value = state.value(&self.path).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| FormError::Decode {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

impl<T: Serialize> Lens<T> {
    pub fn set(&self, state: &mut FormState, value: &T) -> Result<(), FormError> {
        let encoded = serde_json::to_value(value).map_err(|e| FormError::Encode {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        state.set_value(&self.path, encoded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Shipping {
        option: Option<String>,
        price: i64,
    }

    fn claim_state() -> FormState {
        FormState::new(json!({
            "return_items": { "items": [ { "item_id": "a", "quantity": 1 } ] },
            "additional_items": { "items": [ { "variant_id": "v", "quantity": 2 } ] },
        }))
    }

    #[test]
    fn test_path_prefixing() {
        let mut state = claim_state();
        let return_items = state.scope(&FormScope::root(), "return_items").unwrap();
        assert_eq!(return_items.path("items.0.quantity").to_string(), "return_items.items.0.quantity");

        let row = state.scope(&return_items, "items.0").unwrap();
        assert_eq!(row.path("quantity").to_string(), "return_items.items.0.quantity");
        assert_eq!(row.get(&state, "quantity"), Some(&json!(1)));
    }

    #[test]
    fn test_sibling_scopes_are_isolated() {
        let mut state = claim_state();
        let root = FormScope::root();
        let returns = state.scope(&root, "return_items").unwrap();
        let additional = state.scope(&root, "additional_items").unwrap();

        returns.set(&mut state, "items.0.quantity", json!(5));

        assert_eq!(returns.get(&state, "items.0.quantity"), Some(&json!(5)));
        assert_eq!(additional.get(&state, "items.0.quantity"), Some(&json!(2)));
    }

    #[test]
    fn test_same_key_collides_on_the_same_location() {
        let mut state = claim_state();
        let root = FormScope::root();
        let first = state.scope(&root, "items").unwrap();

        // The second mount would address exactly the same field; it is refused.
        match state.scope(&root, "items") {
            Err(FormError::DuplicateMount { path }) => {
                assert_eq!(path.join(&"quantity".into()), first.path("quantity"));
            }
            other => panic!("expected duplicate mount, got {other:?}"),
        }
    }

    #[test]
    fn test_scoped_errors() {
        let mut state = claim_state();
        let returns = state.scope(&FormScope::root(), "return_items").unwrap();
        returns.set_error(&mut state, "items.0.return_reason_details", "Please select a reason");

        let errors = returns.errors(&state);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0.to_string(), "items.0.return_reason_details");
        assert!(returns.error(&state, "items.0.return_reason_details").is_some());
        assert!(state
            .error(&FormPath::parse("return_items.items.0.return_reason_details"))
            .is_some());
    }

    #[test]
    fn test_lens_round_trip() {
        let mut state = FormState::new(json!({}));
        let shipping = state.scope(&FormScope::root(), "return_shipping").unwrap();
        let lens: Lens<Option<Shipping>> = shipping.lens("method");

        assert_eq!(lens.get(&state).unwrap(), None);

        let method = Shipping {
            option: Some("so_1".to_string()),
            price: 0,
        };
        lens.set(&mut state, &Some(method.clone())).unwrap();
        assert_eq!(lens.get(&state).unwrap(), Some(method));
        assert_eq!(
            state.value(&FormPath::parse("return_shipping.method.option")),
            Some(&json!("so_1"))
        );
    }

    #[test]
    fn test_lens_decode_error_names_path() {
        let state = FormState::new(json!({ "quantity": "many" }));
        let lens: Lens<u32> = FormScope::root().lens("quantity");
        match lens.get(&state) {
            Err(FormError::Decode { path, .. }) => assert_eq!(path.to_string(), "quantity"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
