//! Framework-independent form state.
//!
//! `FormState` owns the value tree of one form together with its field
//! errors, validation rules, field-array row keys and the registry of
//! mounted nested scopes. The reactive wrapper in `reactive.rs` keeps one
//! of these inside a signal.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::error::FormError;
use super::path::{insert_at, value_at, FormPath};
use super::scope::FormScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    Integer,
    Min,
    Max,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn manual(message: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::Manual,
            message: message.into(),
        }
    }
}

/// Validation rules attached to a registered field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRules {
    pub required: Option<String>,
    pub integer: Option<String>,
    pub min: Option<(f64, String)>,
    pub max: Option<(f64, String)>,
}

impl FieldRules {
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            required: Some(message.into()),
            ..Self::default()
        }
    }

    /// Rejects fractions and text that is not a number.
    pub fn integer(mut self, message: impl Into<String>) -> Self {
        self.integer = Some(message.into());
        self
    }

    pub fn min(mut self, bound: f64, message: impl Into<String>) -> Self {
        self.min = Some((bound, message.into()));
        self
    }

    pub fn max(mut self, bound: f64, message: impl Into<String>) -> Self {
        self.max = Some((bound, message.into()));
        self
    }

    fn check(&self, value: Option<&Value>) -> Option<FieldError> {
        if let Some(message) = &self.required {
            if is_blank(value) {
                return Some(FieldError {
                    kind: FieldErrorKind::Required,
                    message: message.clone(),
                });
            }
        }

        let number = value.and_then(as_number);
        if let Some(message) = &self.integer {
            let whole = match (value, number) {
                (None | Some(Value::Null), _) => true,
                (Some(Value::String(s)), _) if s.trim().is_empty() => true,
                (_, Some(n)) => n.fract() == 0.0,
                (_, None) => false,
            };
            if !whole {
                return Some(FieldError {
                    kind: FieldErrorKind::Integer,
                    message: message.clone(),
                });
            }
        }
        if let (Some(n), Some((bound, message))) = (number, &self.min) {
            if n < *bound {
                return Some(FieldError {
                    kind: FieldErrorKind::Min,
                    message: message.clone(),
                });
            }
        }
        if let (Some(n), Some((bound, message))) = (number, &self.max) {
            if n > *bound {
                return Some(FieldError {
                    kind: FieldErrorKind::Max,
                    message: message.clone(),
                });
            }
        }
        None
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: Value,
    defaults: Value,
    errors: BTreeMap<FormPath, FieldError>,
    rules: BTreeMap<FormPath, FieldRules>,
    pub(super) array_keys: BTreeMap<FormPath, Vec<String>>,
    mounts: BTreeSet<FormPath>,
    submit_count: u32,
}

impl FormState {
    pub fn new(defaults: Value) -> Self {
        Self {
            values: defaults.clone(),
            defaults,
            ..Self::default()
        }
    }

    pub fn values(&self) -> &Value {
        &self.values
    }

    pub(super) fn values_mut(&mut self) -> &mut Value {
        &mut self.values
    }

    pub fn value(&self, path: &FormPath) -> Option<&Value> {
        value_at(&self.values, path)
    }

    /// Writes a value and drops the errors reported for that field and for
    /// every field containing it.
    pub fn set_value(&mut self, path: &FormPath, value: Value) {
        insert_at(&mut self.values, path.segments(), value);
        let mut current = Some(path.clone());
        while let Some(path) = current {
            self.errors.remove(&path);
            current = path.parent();
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.defaults
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Replaces both values and defaults. Mounted scopes stay mounted.
    pub fn reset(&mut self, values: Value) {
        self.values = values.clone();
        self.defaults = values;
        self.errors.clear();
        self.array_keys.clear();
        self.submit_count = 0;
    }

    pub fn set_error(&mut self, path: &FormPath, error: FieldError) {
        self.errors.insert(path.clone(), error);
    }

    pub fn clear_error(&mut self, path: &FormPath) {
        self.errors.remove(path);
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub(super) fn clear_errors_under(&mut self, prefix: &FormPath) {
        self.errors.retain(|path, _| !path.starts_with(prefix));
    }

    pub fn error(&self, path: &FormPath) -> Option<&FieldError> {
        self.errors.get(path)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors at or below `prefix`, keyed by their path relative to it.
    pub fn errors_under(&self, prefix: &FormPath) -> Vec<(FormPath, FieldError)> {
        self.errors
            .iter()
            .filter_map(|(path, error)| {
                path.strip_prefix(prefix)
                    .map(|relative| (relative, error.clone()))
            })
            .collect()
    }

    pub fn register(&mut self, path: &FormPath, rules: FieldRules) {
        self.rules.insert(path.clone(), rules);
    }

    pub fn unregister(&mut self, path: &FormPath) {
        self.rules.remove(path);
        self.errors.remove(path);
    }

    /// Runs every registered rule. Previous errors, manual ones included,
    /// are replaced by the outcome of this run.
    pub fn validate(&mut self) -> bool {
        self.submit_count += 1;
        self.errors.clear();

        let failures: Vec<(FormPath, FieldError)> = self
            .rules
            .iter()
            .filter_map(|(path, rules)| {
                rules
                    .check(value_at(&self.values, path))
                    .map(|error| (path.clone(), error))
            })
            .collect();

        let valid = failures.is_empty();
        self.errors.extend(failures);
        valid
    }

    /// Mounts a nested scope at `parent.key`.
    ///
    /// Each path can be mounted once at a time; a second mount of the same
    /// path is rejected until the first one is released.
    pub fn scope(
        &mut self,
        parent: &FormScope,
        key: impl Into<FormPath>,
    ) -> Result<FormScope, FormError> {
        let key = key.into();
        if key.is_root() {
            return Err(FormError::EmptyKey);
        }
        let path = parent.prefix().join(&key);
        if !self.mounts.insert(path.clone()) {
            return Err(FormError::DuplicateMount { path });
        }
        Ok(FormScope::at(path))
    }

    /// Unmounts a scope. Its values stay in the tree.
    pub fn release(&mut self, scope: &FormScope) -> bool {
        self.mounts.remove(scope.prefix())
    }

    pub fn is_mounted(&self, path: &FormPath) -> bool {
        self.mounts.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dirty_tracking_and_reset() {
        let mut state = FormState::new(json!({ "notification": { "send_notification": true } }));
        assert!(!state.is_dirty());

        let path = FormPath::parse("notification.send_notification");
        state.set_value(&path, json!(false));
        assert!(state.is_dirty());

        state.reset(json!({ "notification": { "send_notification": false } }));
        assert!(!state.is_dirty());
        assert_eq!(state.value(&path), Some(&json!(false)));
    }

    #[test]
    fn test_validate_integer() {
        let mut state = FormState::new(json!({ "quantity": 1.5, "spare": null }));
        let rules = FieldRules::required("Quantity is required")
            .integer("Whole numbers only")
            .min(1.0, "At least one");
        state.register(&"quantity".into(), rules);
        state.register(&"spare".into(), FieldRules::default().integer("Whole numbers only"));

        assert!(!state.validate());
        assert_eq!(state.error(&"quantity".into()).unwrap().kind, FieldErrorKind::Integer);
        assert!(state.error(&"spare".into()).is_none());

        state.set_value(&"quantity".into(), json!("2x"));
        assert!(!state.validate());
        assert_eq!(state.error(&"quantity".into()).unwrap().kind, FieldErrorKind::Integer);

        state.set_value(&"quantity".into(), json!(2));
        assert!(state.validate());
    }

    #[test]
    fn test_validate_required_and_bounds() {
        let mut state = FormState::new(json!({ "amount": null, "quantity": 0 }));
        state.register(&"amount".into(), FieldRules::required("Amount is required"));
        state.register(
            &"quantity".into(),
            FieldRules::default().min(1.0, "At least one").max(5.0, "At most five"),
        );

        assert!(!state.validate());
        assert_eq!(state.error(&"amount".into()).unwrap().kind, FieldErrorKind::Required);
        assert_eq!(state.error(&"quantity".into()).unwrap().message, "At least one");

        state.set_value(&"amount".into(), json!(1200));
        state.set_value(&"quantity".into(), json!(6));
        assert!(!state.validate());
        assert!(state.error(&"amount".into()).is_none());
        assert_eq!(state.error(&"quantity".into()).unwrap().kind, FieldErrorKind::Max);

        state.set_value(&"quantity".into(), json!("3"));
        assert!(state.validate());
        assert_eq!(state.submit_count(), 3);
    }

    #[test]
    fn test_set_value_clears_field_error() {
        let mut state = FormState::new(json!({}));
        let path = FormPath::parse("replacement_shipping.option");
        state.set_error(&path, FieldError::manual("Required"));
        assert!(state.has_errors());
        state.set_value(&path, json!({ "id": "so_1" }));
        assert!(!state.has_errors());
    }

    #[test]
    fn test_set_value_clears_enclosing_field_error() {
        let mut state = FormState::new(json!({}));
        let details = FormPath::parse("return_items.items.1.return_reason_details");
        let sibling = FormPath::parse("return_items.items.0.return_reason_details");
        state.set_error(&details, FieldError::manual("Please select a reason"));
        state.set_error(&sibling, FieldError::manual("Please select a reason"));

        state.set_value(&details.child("reason"), json!("wrong_item"));

        assert!(state.error(&details).is_none());
        assert!(state.error(&sibling).is_some());
    }

    #[test]
    fn test_errors_under_prefix_are_relative() {
        let mut state = FormState::new(json!({}));
        state.set_error(
            &FormPath::parse("return_items.items.1.return_reason_details"),
            FieldError::manual("Please select a reason"),
        );
        state.set_error(&FormPath::parse("notification.send_notification"), FieldError::manual("x"));

        let errors = state.errors_under(&FormPath::parse("return_items"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0.to_string(), "items.1.return_reason_details");
    }

    #[test]
    fn test_scope_rejects_duplicate_mount_until_released() {
        let mut state = FormState::new(json!({}));
        let root = FormScope::root();

        let first = state.scope(&root, "items").unwrap();
        let second = state.scope(&root, "items");
        assert_eq!(
            second,
            Err(FormError::DuplicateMount {
                path: FormPath::parse("items")
            })
        );

        assert!(state.release(&first));
        assert!(state.scope(&root, "items").is_ok());
    }

    #[test]
    fn test_scope_rejects_empty_key() {
        let mut state = FormState::new(json!({}));
        assert_eq!(state.scope(&FormScope::root(), ""), Err(FormError::EmptyKey));
    }
}
