//! Reactive handles over `FormState`.
//!
//! `FormHandle` owns the signal; `NestedForm` is the capability a sub-form
//! component receives. Both are `Copy`, so they can be moved into any
//! number of event handlers.

use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::FormError;
use super::field_array::FieldRow;
use super::path::FormPath;
use super::scope::{FormScope, Lens};
use super::state::{FieldError, FieldRules, FormState};

#[derive(Clone, Copy)]
pub struct FormHandle {
    state: RwSignal<FormState>,
}

impl FormHandle {
    pub fn new(defaults: Value) -> Self {
        Self {
            state: RwSignal::new(FormState::new(defaults)),
        }
    }

    pub fn state(&self) -> RwSignal<FormState> {
        self.state
    }

    /// Handle addressing the whole form.
    pub fn root(&self) -> NestedForm {
        NestedForm {
            form: *self,
            scope: StoredValue::new(FormScope::root()),
        }
    }

    /// Shortcut for `root().nested(key)`.
    pub fn nested(&self, key: impl Into<FormPath>) -> Result<NestedForm, FormError> {
        self.root().nested(key)
    }

    pub fn values(&self) -> Value {
        self.state.with_untracked(|s| s.values().clone())
    }

    pub fn is_dirty(&self) -> bool {
        self.state.with(|s| s.is_dirty())
    }

    pub fn reset(&self, values: Value) {
        self.state.update(|s| s.reset(values));
    }

    pub fn validate(&self) -> bool {
        self.state.try_update(|s| s.validate()).unwrap_or(false)
    }

    /// Validates, then hands the current values to `on_valid`.
    pub fn handle_submit<F>(&self, on_valid: F) -> impl Fn() + Clone + 'static
    where
        F: Fn(Value) + Clone + 'static,
    {
        let form = *self;
        move || {
            if form.validate() {
                on_valid(form.values());
            } else {
                log::debug!("form submit blocked by validation errors");
            }
        }
    }
}

#[derive(Clone, Copy)]
pub struct NestedForm {
    form: FormHandle,
    scope: StoredValue<FormScope>,
}

impl NestedForm {
    pub fn form(&self) -> FormHandle {
        self.form
    }

    pub fn scope(&self) -> FormScope {
        self.scope.get_value()
    }

    pub fn path(&self, sub: impl Into<FormPath>) -> FormPath {
        self.scope.with_value(|scope| scope.path(sub))
    }

    /// Mounts a child form at `key` below this one.
    ///
    /// The mount is released when the calling component is cleaned up, so a
    /// remounted component can claim the same key again.
    pub fn nested(&self, key: impl Into<FormPath>) -> Result<NestedForm, FormError> {
        let parent = self.scope();
        let scope = self
            .form
            .state
            .try_update_untracked(|s| s.scope(&parent, key))
            .unwrap_or(Err(FormError::Disposed))?;

        let state = self.form.state;
        let mounted = scope.clone();
        on_cleanup(move || {
            state.try_update_untracked(|s| s.release(&mounted));
        });

        Ok(NestedForm {
            form: self.form,
            scope: StoredValue::new(scope),
        })
    }

    fn mutate<R>(
        &self,
        f: impl FnOnce(&mut FormState, &FormScope) -> Result<R, FormError>,
    ) -> Result<R, FormError> {
        let scope = self.scope();
        self.form
            .state
            .try_update(|s| f(s, &scope))
            .unwrap_or(Err(FormError::Disposed))
    }

    pub fn watch(&self, sub: impl Into<FormPath>) -> Signal<Value> {
        let path = self.path(sub);
        let state = self.form.state;
        Signal::derive(move || state.with(|s| s.value(&path).cloned().unwrap_or(Value::Null)))
    }

    pub fn lens<T>(&self, sub: impl Into<FormPath>) -> Lens<T> {
        Lens::new(self.path(sub))
    }

    /// Tracked typed read.
    pub fn get<T: DeserializeOwned>(&self, sub: impl Into<FormPath>) -> Result<T, FormError> {
        let lens = self.lens::<T>(sub);
        self.form.state.with(|s| lens.get(s))
    }

    pub fn get_untracked<T: DeserializeOwned>(&self, sub: impl Into<FormPath>) -> Result<T, FormError> {
        let lens = self.lens::<T>(sub);
        self.form.state.with_untracked(|s| lens.get(s))
    }

    pub fn set<T: Serialize>(&self, sub: impl Into<FormPath>, value: &T) -> Result<(), FormError> {
        let lens = self.lens::<T>(sub);
        self.mutate(|s, _| lens.set(s, value))
    }

    pub fn set_value(&self, sub: impl Into<FormPath>, value: Value) {
        let path = self.path(sub);
        self.form.state.update(|s| s.set_value(&path, value));
    }

    /// Field value rendered for a text input.
    pub fn text(&self, sub: impl Into<FormPath>) -> Signal<String> {
        let watched = self.watch(sub);
        Signal::derive(move || match watched.get() {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    pub fn set_text(&self, sub: impl Into<FormPath>, text: String) {
        self.set_value(sub, Value::String(text));
    }

    /// Stores numbers as numbers; unparsable input is kept as text so the
    /// field's rules can report it.
    pub fn set_number(&self, sub: impl Into<FormPath>, text: &str) {
        let trimmed = text.trim();
        let value = if trimmed.is_empty() {
            Value::Null
        } else if let Ok(n) = trimmed.parse::<i64>() {
            Value::from(n)
        } else if let Ok(n) = trimmed.parse::<f64>() {
            Value::from(n)
        } else {
            Value::String(text.to_string())
        };
        self.set_value(sub, value);
    }

    pub fn register(&self, sub: impl Into<FormPath>, rules: FieldRules) {
        let path = self.path(sub);
        self.form
            .state
            .update_untracked(|s| s.register(&path, rules));
    }

    /// Drops the rules and error of a field. Safe to call from cleanup.
    pub fn unregister(&self, sub: impl Into<FormPath>) {
        if let Some(path) = self.scope.try_with_value(|scope| scope.path(sub)) {
            self.form.state.try_update(|s| s.unregister(&path));
        }
    }

    pub fn set_error(&self, sub: impl Into<FormPath>, message: impl Into<String>) {
        let path = self.path(sub);
        let error = FieldError::manual(message);
        self.form.state.update(|s| s.set_error(&path, error));
    }

    pub fn error(&self, sub: impl Into<FormPath>) -> Signal<Option<String>> {
        let path = self.path(sub);
        let state = self.form.state;
        Signal::derive(move || state.with(|s| s.error(&path).map(|e| e.message.clone())))
    }

    /// Tracked list of errors inside this scope, relative paths.
    pub fn errors(&self) -> Vec<(FormPath, FieldError)> {
        let scope = self.scope();
        self.form.state.with(|s| scope.errors(s))
    }

    pub fn rows(&self, sub: impl Into<FormPath>) -> Signal<Vec<FieldRow>> {
        let array = self.scope.with_value(|scope| scope.field_array(sub));
        let state = self.form.state;
        Signal::derive(move || state.with(|s| array.rows(s)))
    }

    pub fn append(&self, sub: impl Into<FormPath>, row: Value) -> Result<String, FormError> {
        let sub: FormPath = sub.into();
        self.mutate(|s, scope| scope.field_array(sub).append(s, row))
    }

    pub fn insert(&self, sub: impl Into<FormPath>, index: usize, row: Value) -> Result<String, FormError> {
        let sub: FormPath = sub.into();
        self.mutate(|s, scope| scope.field_array(sub).insert(s, index, row))
    }

    pub fn remove(&self, sub: impl Into<FormPath>, index: usize) -> Result<Value, FormError> {
        let sub: FormPath = sub.into();
        self.mutate(|s, scope| scope.field_array(sub).remove(s, index))
    }

    pub fn update_row(&self, sub: impl Into<FormPath>, index: usize, row: Value) -> Result<(), FormError> {
        let sub: FormPath = sub.into();
        self.mutate(|s, scope| scope.field_array(sub).update(s, index, row))
    }

    pub fn move_row(&self, sub: impl Into<FormPath>, from: usize, to: usize) -> Result<(), FormError> {
        let sub: FormPath = sub.into();
        self.mutate(|s, scope| scope.field_array(sub).move_row(s, from, to))
    }

    pub fn replace_rows(&self, sub: impl Into<FormPath>, rows: Vec<Value>) -> Result<(), FormError> {
        let sub: FormPath = sub.into();
        self.mutate(|s, scope| scope.field_array(sub).replace(s, rows))
    }
}
