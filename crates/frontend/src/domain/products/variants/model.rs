//! Values of the add-variants form and the rules keeping variant entries in
//! line with the product options.

use contracts::domain::products::{
    CreateProductOptionRequest, CreateVariantRequest, ProductVariantsPayload, VariantOptionRequest,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const DUPLICATE_VARIANT: &str = "A variant with these options already exists";
pub const VALUE_REQUIRED: &str = "Choose a value for every option";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionField {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Value a variant picked for one option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantOptionField {
    pub option_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantEntry {
    pub internal_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub inventory_quantity: u32,
    #[serde(default)]
    pub options: Vec<VariantOptionField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddVariantsValues {
    #[serde(default)]
    pub options: Vec<OptionField>,
    #[serde(default)]
    pub entries: Vec<VariantEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantsError {
    #[error("option {index} needs a title")]
    UntitledOption { index: usize },

    #[error("variant `{variant}` has no value for `{option}`")]
    MissingValue { variant: String, option: String },
}

pub fn empty_option() -> OptionField {
    OptionField {
        id: Uuid::new_v4().to_string(),
        title: String::new(),
        values: Vec::new(),
    }
}

pub fn empty_variant(options: &[OptionField]) -> VariantEntry {
    VariantEntry {
        internal_id: Uuid::new_v4().to_string(),
        title: String::new(),
        sku: String::new(),
        inventory_quantity: 0,
        options: options.iter().map(empty_value).collect(),
    }
}

fn empty_value(option: &OptionField) -> VariantOptionField {
    VariantOptionField {
        option_id: option.id.clone(),
        title: option.title.clone(),
        value: None,
    }
}

/// Aligns `entry` with the current product options.
///
/// Option values follow the order of `options`. Titles are refreshed, values
/// the option no longer offers are cleared, deleted options are dropped and
/// new ones are added without a value.
pub fn reconcile_entry(entry: &VariantEntry, options: &[OptionField]) -> VariantEntry {
    let aligned = options
        .iter()
        .map(|option| {
            let value = entry
                .options
                .iter()
                .find(|v| v.option_id == option.id)
                .and_then(|v| v.value.clone())
                .filter(|value| option.values.contains(value));
            VariantOptionField {
                option_id: option.id.clone(),
                title: option.title.clone(),
                value,
            }
        })
        .collect();

    VariantEntry {
        options: aligned,
        ..entry.clone()
    }
}

pub fn reconcile_entries(entries: &[VariantEntry], options: &[OptionField]) -> Vec<VariantEntry> {
    entries.iter().map(|e| reconcile_entry(e, options)).collect()
}

pub fn remove_option_from_entries(entries: &[VariantEntry], option_id: &str) -> Vec<VariantEntry> {
    entries
        .iter()
        .map(|entry| VariantEntry {
            options: entry
                .options
                .iter()
                .filter(|v| v.option_id != option_id)
                .cloned()
                .collect(),
            ..entry.clone()
        })
        .collect()
}

/// Whether another entry already has exactly the option values of `candidate`.
/// The entry being edited (same `internal_id`) does not count.
pub fn is_duplicate(entries: &[VariantEntry], candidate: &VariantEntry) -> bool {
    let picked = |entry: &VariantEntry| {
        let mut values: Vec<(String, Option<String>)> = entry
            .options
            .iter()
            .map(|v| (v.option_id.clone(), v.value.clone()))
            .collect();
        values.sort();
        values
    };
    let wanted = picked(candidate);
    entries
        .iter()
        .filter(|e| e.internal_id != candidate.internal_id)
        .any(|e| picked(e) == wanted)
}

/// "S / Red"
pub fn default_title(entry: &VariantEntry) -> String {
    entry
        .options
        .iter()
        .filter_map(|v| v.value.as_deref())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Variants can only be added once some option offers a value
pub fn variants_enabled(options: &[OptionField]) -> bool {
    options.iter().any(|o| !o.values.is_empty())
}

/// Appends a trimmed value unless it is blank or already offered.
pub fn add_option_value(option: &OptionField, value: &str) -> OptionField {
    let value = value.trim();
    let mut next = option.clone();
    if !value.is_empty() && !next.values.iter().any(|v| v == value) {
        next.values.push(value.to_string());
    }
    next
}

/// "S, M ,, L" -> ["S", "M", "L"]
pub fn parse_values(text: &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for value in text.split(',').map(str::trim) {
        if !value.is_empty() && !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
    values
}

pub fn build_payload(values: &AddVariantsValues) -> Result<ProductVariantsPayload, VariantsError> {
    let mut options = Vec::with_capacity(values.options.len());
    for (index, option) in values.options.iter().enumerate() {
        let title = option.title.trim();
        if title.is_empty() {
            return Err(VariantsError::UntitledOption { index });
        }
        options.push(CreateProductOptionRequest {
            title: title.to_string(),
        });
    }

    let mut variants = Vec::with_capacity(values.entries.len());
    for entry in &values.entries {
        let entry = reconcile_entry(entry, &values.options);
        let title = if entry.title.trim().is_empty() {
            default_title(&entry)
        } else {
            entry.title.trim().to_string()
        };
        let mut picked = Vec::with_capacity(entry.options.len());
        for option in &entry.options {
            let Some(value) = option.value.clone() else {
                return Err(VariantsError::MissingValue {
                    variant: title.clone(),
                    option: option.title.clone(),
                });
            };
            picked.push(VariantOptionRequest { value });
        }
        let sku = entry.sku.trim();
        variants.push(CreateVariantRequest {
            title,
            sku: (!sku.is_empty()).then(|| sku.to_string()),
            inventory_quantity: entry.inventory_quantity,
            options: picked,
        });
    }

    Ok(ProductVariantsPayload { options, variants })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str, title: &str, values: &[&str]) -> OptionField {
        OptionField {
            id: id.to_string(),
            title: title.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn entry(id: &str, picked: &[(&str, &str)]) -> VariantEntry {
        VariantEntry {
            internal_id: id.to_string(),
            title: String::new(),
            sku: String::new(),
            inventory_quantity: 0,
            options: picked
                .iter()
                .map(|(option_id, value)| VariantOptionField {
                    option_id: option_id.to_string(),
                    title: String::new(),
                    value: Some(value.to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn test_reconcile_entry() {
        let options = vec![
            option("size", "Size", &["S", "M"]),
            option("color", "Colour", &["Red"]),
            option("fit", "Fit", &["Slim"]),
        ];
        // "L" is no longer offered, "gone" was deleted, "fit" is new
        let stale = entry("v1", &[("gone", "x"), ("color", "Red"), ("size", "L")]);

        let fresh = reconcile_entry(&stale, &options);
        let ids: Vec<_> = fresh.options.iter().map(|v| v.option_id.as_str()).collect();
        assert_eq!(ids, vec!["size", "color", "fit"]);
        assert_eq!(fresh.options[0].value, None);
        assert_eq!(fresh.options[1].value.as_deref(), Some("Red"));
        assert_eq!(fresh.options[1].title, "Colour");
        assert_eq!(fresh.options[2].value, None);
        assert_eq!(fresh.internal_id, "v1");
    }

    #[test]
    fn test_reconcile_is_stable() {
        let options = vec![option("size", "Size", &["S"])];
        let entries = reconcile_entries(&[entry("v1", &[("size", "S")])], &options);
        assert_eq!(reconcile_entries(&entries, &options), entries);
    }

    #[test]
    fn test_remove_option_from_entries() {
        let entries = vec![
            entry("v1", &[("size", "S"), ("color", "Red")]),
            entry("v2", &[("size", "M"), ("color", "Blue")]),
        ];
        let trimmed = remove_option_from_entries(&entries, "color");
        assert!(trimmed
            .iter()
            .all(|e| e.options.len() == 1 && e.options[0].option_id == "size"));
    }

    #[test]
    fn test_is_duplicate() {
        let entries = vec![
            entry("v1", &[("size", "S"), ("color", "Red")]),
            entry("v2", &[("size", "M"), ("color", "Red")]),
        ];
        let clash = entry("new", &[("color", "Red"), ("size", "S")]);
        assert!(is_duplicate(&entries, &clash));

        // editing v1 without changing its values is fine
        let same = entry("v1", &[("size", "S"), ("color", "Red")]);
        assert!(!is_duplicate(&entries, &same));

        // but moving v1 onto v2's values is not
        let onto_v2 = entry("v1", &[("size", "M"), ("color", "Red")]);
        assert!(is_duplicate(&entries, &onto_v2));
    }

    #[test]
    fn test_default_title() {
        let mut e = entry("v1", &[("size", "S"), ("color", "Red")]);
        assert_eq!(default_title(&e), "S / Red");
        e.options[1].value = None;
        assert_eq!(default_title(&e), "S");
    }

    #[test]
    fn test_variants_enabled() {
        assert!(!variants_enabled(&[]));
        assert!(!variants_enabled(&[option("size", "Size", &[])]));
        assert!(variants_enabled(&[option("a", "A", &[]), option("b", "B", &["x"])]));
    }

    #[test]
    fn test_option_values() {
        let size = option("size", "Size", &["S"]);
        assert_eq!(add_option_value(&size, " M ").values, vec!["S", "M"]);
        assert_eq!(add_option_value(&size, "S").values, vec!["S"]);
        assert_eq!(add_option_value(&size, "  ").values, vec!["S"]);
        assert_eq!(parse_values("S, M ,, L, S"), vec!["S", "M", "L"]);
    }

    #[test]
    fn test_build_payload() {
        let values = AddVariantsValues {
            options: vec![option("size", "Size", &["S", "M"]), option("color", "Color", &["Red"])],
            entries: vec![
                VariantEntry {
                    sku: " TEE-S ".to_string(),
                    inventory_quantity: 3,
                    ..entry("v1", &[("size", "S"), ("color", "Red")])
                },
                VariantEntry {
                    title: "Medium".to_string(),
                    ..entry("v2", &[("color", "Red"), ("size", "M")])
                },
            ],
        };

        let payload = build_payload(&values).unwrap();
        assert_eq!(payload.options.len(), 2);
        assert_eq!(payload.variants[0].title, "S / Red");
        assert_eq!(payload.variants[0].sku.as_deref(), Some("TEE-S"));
        assert_eq!(payload.variants[0].inventory_quantity, 3);
        assert_eq!(payload.variants[1].title, "Medium");
        let v2: Vec<_> = payload.variants[1].options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(v2, vec!["M", "Red"]);
    }

    #[test]
    fn test_build_payload_errors() {
        let untitled = AddVariantsValues {
            options: vec![option("size", " ", &["S"])],
            entries: vec![],
        };
        assert_eq!(build_payload(&untitled), Err(VariantsError::UntitledOption { index: 0 }));

        let missing = AddVariantsValues {
            options: vec![option("size", "Size", &["S"]), option("color", "Color", &["Red"])],
            entries: vec![entry("v1", &[("size", "S")])],
        };
        assert_eq!(
            build_payload(&missing),
            Err(VariantsError::MissingValue {
                variant: "S".to_string(),
                option: "Color".to_string(),
            })
        );
    }
}
