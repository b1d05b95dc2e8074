//! Ordered, re-orderable rows stored under one path of a form.
//!
//! Every row carries a key that survives moves, so list renderers can keep
//! row identity stable while the index changes.

use serde_json::Value;
use uuid::Uuid;

use super::error::FormError;
use super::path::{value_at_mut, FormPath};
use super::state::FormState;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub key: String,
    pub index: usize,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldArray {
    path: FormPath,
}

fn new_key() -> String {
    Uuid::new_v4().to_string()
}

impl FieldArray {
    pub fn new(path: FormPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &FormPath {
        &self.path
    }

    pub fn row_path(&self, index: usize) -> FormPath {
        self.path.index(index)
    }

    fn items<'a>(&self, state: &'a FormState) -> Result<&'a [Value], FormError> {
        match state.value(&self.path) {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(_) => Err(FormError::NotAnArray {
                path: self.path.clone(),
            }),
        }
    }

    pub fn len(&self, state: &FormState) -> usize {
        self.items(state).map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, state: &FormState) -> bool {
        self.len(state) == 0
    }

    /// Rows in display order. Rows whose key was never assigned (values set
    /// directly or through `reset`) get a positional fallback key.
    pub fn rows(&self, state: &FormState) -> Vec<FieldRow> {
        let items = self.items(state).unwrap_or(&[]);
        let keys = state
            .array_keys
            .get(&self.path)
            .filter(|keys| keys.len() == items.len());
        items
            .iter()
            .enumerate()
            .map(|(index, value)| FieldRow {
                key: keys
                    .and_then(|keys| keys.get(index).cloned())
                    .unwrap_or_else(|| format!("{}.{index}", self.path)),
                index,
                value: value.clone(),
            })
            .collect()
    }

    /// Brings the key list in line with the current number of rows.
    fn sync_keys(&self, state: &mut FormState) -> Result<usize, FormError> {
        let len = self.items(state)?.len();
        let keys = state.array_keys.entry(self.path.clone()).or_default();
        if keys.len() != len {
            *keys = (0..len).map(|_| new_key()).collect();
        }
        Ok(len)
    }

    fn with_array<R>(
        &self,
        state: &mut FormState,
        f: impl FnOnce(&mut Vec<Value>, &mut Vec<String>) -> R,
    ) -> Result<R, FormError> {
        self.sync_keys(state)?;
        if !matches!(state.value(&self.path), Some(Value::Array(_))) {
            state.set_value(&self.path, Value::Array(Vec::new()));
        }
        let mut keys = state.array_keys.remove(&self.path).unwrap_or_default();
        let result = match value_at_mut(state.values_mut(), &self.path) {
            Some(Value::Array(items)) => Ok(f(items, &mut keys)),
            _ => Err(FormError::NotAnArray {
                path: self.path.clone(),
            }),
        };
        state.array_keys.insert(self.path.clone(), keys);
        result
    }

    fn check_index(&self, index: usize, len: usize) -> Result<(), FormError> {
        if index < len {
            Ok(())
        } else {
            Err(FormError::IndexOutOfRange {
                path: self.path.clone(),
                index,
                len,
            })
        }
    }

    /// Appends a row and returns its key.
    pub fn append(&self, state: &mut FormState, row: Value) -> Result<String, FormError> {
        self.with_array(state, |items, keys| {
            let key = new_key();
            items.push(row);
            keys.push(key.clone());
            key
        })
    }

    pub fn insert(&self, state: &mut FormState, index: usize, row: Value) -> Result<String, FormError> {
        let len = self.len(state);
        if index > len {
            return Err(FormError::IndexOutOfRange {
                path: self.path.clone(),
                index,
                len,
            });
        }
        let key = self.with_array(state, |items, keys| {
            let key = new_key();
            items.insert(index, row);
            keys.insert(index, key.clone());
            key
        })?;
        state.clear_errors_under(&self.path);
        Ok(key)
    }

    pub fn remove(&self, state: &mut FormState, index: usize) -> Result<Value, FormError> {
        self.check_index(index, self.len(state))?;
        let removed = self.with_array(state, |items, keys| {
            keys.remove(index);
            items.remove(index)
        })?;
        state.clear_errors_under(&self.path);
        Ok(removed)
    }

    /// Replaces the row at `index`, keeping its key.
    pub fn update(&self, state: &mut FormState, index: usize, row: Value) -> Result<(), FormError> {
        self.check_index(index, self.len(state))?;
        self.with_array(state, |items, _| {
            items[index] = row;
        })?;
        state.clear_errors_under(&self.row_path(index));
        Ok(())
    }

    /// Moves the row at `from` so that it ends up at `to`.
    pub fn move_row(&self, state: &mut FormState, from: usize, to: usize) -> Result<(), FormError> {
        let len = self.len(state);
        self.check_index(from, len)?;
        self.check_index(to, len)?;
        if from == to {
            return Ok(());
        }
        self.with_array(state, |items, keys| {
            let item = items.remove(from);
            items.insert(to, item);
            let key = keys.remove(from);
            keys.insert(to, key);
        })?;
        state.clear_errors_under(&self.path);
        Ok(())
    }

    /// Replaces every row; all keys are regenerated.
    pub fn replace(&self, state: &mut FormState, rows: Vec<Value>) -> Result<(), FormError> {
        self.items(state)?;
        let keys = rows.iter().map(|_| new_key()).collect();
        state.set_value(&self.path, Value::Array(rows));
        state.array_keys.insert(self.path.clone(), keys);
        state.clear_errors_under(&self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::state::FieldError;
    use serde_json::json;

    fn variants() -> (FormState, FieldArray) {
        let mut state = FormState::new(json!({ "variants": { "entries": [] } }));
        let array = FieldArray::new(FormPath::parse("variants.entries"));
        for title in ["S", "M", "L"] {
            array.append(&mut state, json!({ "title": title })).unwrap();
        }
        (state, array)
    }

    fn titles(state: &FormState, array: &FieldArray) -> Vec<String> {
        array
            .rows(state)
            .into_iter()
            .map(|row| row.value["title"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_move_keeps_row_keys() {
        let (mut state, array) = variants();
        let before = array.rows(&state);

        array.move_row(&mut state, 0, 2).unwrap();

        assert_eq!(titles(&state, &array), vec!["M", "L", "S"]);
        let after = array.rows(&state);
        assert_eq!(after[2].key, before[0].key);
        assert_eq!(after[0].key, before[1].key);
    }

    #[test]
    fn test_update_keeps_key_and_remove_drops_it() {
        let (mut state, array) = variants();
        let keys: Vec<String> = array.rows(&state).into_iter().map(|r| r.key).collect();

        array.update(&mut state, 1, json!({ "title": "Medium" })).unwrap();
        assert_eq!(array.rows(&state)[1].key, keys[1]);

        let removed = array.remove(&mut state, 0).unwrap();
        assert_eq!(removed, json!({ "title": "S" }));
        let rows = array.rows(&state);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, keys[1]);
        assert_eq!(rows[0].index, 0);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let (mut state, array) = variants();
        assert_eq!(
            array.move_row(&mut state, 0, 3),
            Err(FormError::IndexOutOfRange {
                path: FormPath::parse("variants.entries"),
                index: 3,
                len: 3,
            })
        );
        assert!(array.remove(&mut state, 7).is_err());
        assert_eq!(array.len(&state), 3);
    }

    #[test]
    fn test_append_creates_missing_array() {
        let mut state = FormState::new(json!({}));
        let array = FieldArray::new(FormPath::parse("denominations"));
        assert!(array.is_empty(&state));
        array.append(&mut state, json!({ "amount": 1000 })).unwrap();
        assert_eq!(state.values(), &json!({ "denominations": [ { "amount": 1000 } ] }));
    }

    #[test]
    fn test_not_an_array() {
        let mut state = FormState::new(json!({ "options": "size" }));
        let array = FieldArray::new(FormPath::parse("options"));
        assert!(matches!(
            array.append(&mut state, json!({})),
            Err(FormError::NotAnArray { .. })
        ));
    }

    #[test]
    fn test_structural_change_clears_row_errors() {
        let (mut state, array) = variants();
        state.set_error(&array.row_path(1).child("title"), FieldError::manual("Required"));
        array.move_row(&mut state, 1, 0).unwrap();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_rows_ignore_stale_keys() {
        let (mut state, array) = variants();
        let keys: Vec<String> = array.rows(&state).into_iter().map(|r| r.key).collect();
        assert!(keys.iter().all(|key| !key.starts_with("variants.entries.")));

        state.set_value(
            array.path(),
            json!([{ "title": "S" }, { "title": "M" }, { "title": "L" }, { "title": "XL" }]),
        );
        let rows = array.rows(&state);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].key, "variants.entries.3");
        assert_eq!(rows[0].key, "variants.entries.0");
    }

    #[test]
    fn test_rows_fall_back_to_positional_keys() {
        let state = FormState::new(json!({ "items": [ { "quantity": 1 } ] }));
        let array = FieldArray::new(FormPath::parse("items"));
        assert_eq!(array.rows(&state)[0].key, "items.0");
    }
}
