use leptos::prelude::*;
use serde::Serialize;
use serde_json::Value;
use thaw::*;

use super::model::{
    default_title, empty_option, empty_variant, parse_values, reconcile_entry,
    remove_option_from_entries, variants_enabled, OptionField, VariantEntry,
};
use super::variant_modal::VariantModal;
use crate::shared::form::{FieldRow, FieldRules, NestedForm, TextField};

/// Variant being edited in the modal; `index` is `None` for a new one
#[derive(Debug, Clone)]
struct Editing {
    index: Option<usize>,
    entry: VariantEntry,
}

fn log_failure<T, E: std::fmt::Display>(result: Result<T, E>) {
    if let Err(e) = result {
        log::error!("{}", e);
    }
}

fn to_row<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value)
        .map_err(|e| log::error!("{}", e))
        .ok()
}

/// Writes back every entry that changed, keeping row keys.
fn store_entries(form: NestedForm, before: &[VariantEntry], after: &[VariantEntry]) {
    for (index, (old, new)) in before.iter().zip(after).enumerate() {
        if old != new {
            if let Some(row) = to_row(new) {
                log_failure(form.update_row("entries", index, row));
            }
        }
    }
}

/// Options and variants of a product, mounted where the values live as
/// `{ options: [...], entries: [...] }`.
#[component]
pub fn AddVariantsForm(form: NestedForm) -> impl IntoView {
    let option_rows = form.rows("options");
    let entry_rows = form.rows("entries");

    let watched_options = form.watch("options");
    let options = Memo::new(move |_| {
        serde_json::from_value::<Vec<OptionField>>(watched_options.get()).unwrap_or_default()
    });
    let enabled = Signal::derive(move || options.with(|o| variants_enabled(o)));

    // entries follow every change of the options
    Effect::new(move |_| {
        let current = options.get();
        let entries: Vec<VariantEntry> = form.get_untracked("entries").unwrap_or_default();
        let fresh: Vec<VariantEntry> = entries.iter().map(|e| reconcile_entry(e, &current)).collect();
        store_entries(form, &entries, &fresh);
    });

    let editing = RwSignal::new(None::<Editing>);

    let add_option = move |_| {
        if let Some(row) = to_row(&empty_option()) {
            log_failure(form.append("options", row));
        }
    };

    let remove_option = move |index: usize| {
        let removed = match form.remove("options", index) {
            Ok(removed) => removed,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };
        let Some(option_id) = removed.get("id").and_then(Value::as_str) else {
            return;
        };
        let entries: Vec<VariantEntry> = form.get_untracked("entries").unwrap_or_default();
        let trimmed = remove_option_from_entries(&entries, option_id);
        store_entries(form, &entries, &trimmed);
    };

    let new_variant = move |_| {
        let entry = options.with_untracked(|o| empty_variant(o));
        editing.set(Some(Editing { index: None, entry }));
    };

    let edit_variant = move |index: usize| {
        match form.get_untracked::<VariantEntry>(format!("entries.{index}").as_str()) {
            Ok(entry) => {
                let entry = options.with_untracked(|o| reconcile_entry(&entry, o));
                editing.set(Some(Editing { index: Some(index), entry }));
            }
            Err(e) => log::error!("{}", e),
        }
    };

    let save_variant = Callback::new(move |entry: VariantEntry| {
        let Some(current) = editing.get_untracked() else {
            return;
        };
        if let Some(row) = to_row(&entry) {
            match current.index {
                Some(index) => log_failure(form.update_row("entries", index, row)),
                None => log_failure(form.append("entries", row)),
            }
        }
        editing.set(None);
    });

    let entry_count = Signal::derive(move || entry_rows.with(|rows| rows.len()));

    view! {
        <section class="variants-form">
            <h3>"Options"</h3>
            <For
                each=move || option_rows.get()
                key=|row| (row.key.clone(), row.index)
                children=move |row: FieldRow| {
                    let index = row.index;
                    let values_path = format!("options.{index}.values");
                    let values = form.watch(values_path.as_str());
                    let shown = move || {
                        values
                            .get()
                            .as_array()
                            .map(|vs| vs.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(", "))
                            .unwrap_or_default()
                    };
                    view! {
                        <div class="variants-form__option">
                            <TextField
                                form=form
                                name=format!("options.{index}.title")
                                label="Option title"
                                placeholder="Color"
                                rules=FieldRules::required("Option title is required")
                            />
                            <div class="form-group">
                                <label>"Variations (comma separated)"</label>
                                <input
                                    type="text"
                                    placeholder="Blue, Red, Black"
                                    prop:value=shown
                                    on:change=move |ev| {
                                        let parsed = parse_values(&event_target_value(&ev));
                                        log_failure(form.set(values_path.as_str(), &parsed));
                                    }
                                />
                            </div>
                            <Button size=ButtonSize::Small on_click=move |_| remove_option(index)>
                                "Remove"
                            </Button>
                        </div>
                    }
                }
            />
            <Button size=ButtonSize::Small on_click=add_option>
                "Add an option"
            </Button>

            <h3>"Variants"</h3>
            <For
                each=move || entry_rows.get()
                key=|row| (row.key.clone(), row.index, row.value.to_string())
                children=move |row: FieldRow| {
                    let index = row.index;
                    let entry = serde_json::from_value::<VariantEntry>(row.value).ok();
                    let title = entry
                        .as_ref()
                        .map(|e| if e.title.is_empty() { default_title(e) } else { e.title.clone() })
                        .unwrap_or_default();
                    let inventory = entry.as_ref().map(|e| e.inventory_quantity).unwrap_or(0);
                    view! {
                        <div class="variants-form__entry">
                            <span class="variants-form__title">{title}</span>
                            <span class="variants-form__inventory">{format!("{} in stock", inventory)}</span>
                            <Button
                                size=ButtonSize::Small
                                disabled={index == 0}
                                on_click=move |_| log_failure(form.move_row("entries", index, index.saturating_sub(1)))
                            >
                                "Up"
                            </Button>
                            <Button
                                size=ButtonSize::Small
                                disabled=Signal::derive(move || index + 1 >= entry_count.get())
                                on_click=move |_| log_failure(form.move_row("entries", index, index + 1))
                            >
                                "Down"
                            </Button>
                            <Button size=ButtonSize::Small on_click=move |_| edit_variant(index)>
                                "Edit"
                            </Button>
                            <Button
                                size=ButtonSize::Small
                                on_click=move |_| log_failure(form.remove("entries", index))
                            >
                                "Remove"
                            </Button>
                        </div>
                    }
                }
            />
            <Button
                size=ButtonSize::Small
                disabled=Signal::derive(move || !enabled.get())
                on_click=new_variant
            >
                "Add a variant"
            </Button>

            {move || {
                editing
                    .get()
                    .map(|current| {
                        let entries: Vec<VariantEntry> = form.get_untracked("entries").unwrap_or_default();
                        let title = if current.index.is_some() { "Edit variant" } else { "Create variant" };
                        view! {
                            <VariantModal
                                options=options.get_untracked()
                                initial=current.entry
                                entries=entries
                                title=title
                                on_save=save_variant
                                on_close=Callback::new(move |_| editing.set(None))
                            />
                        }
                    })
            }}
        </section>
    }
}
