use leptos::prelude::*;
use serde_json::Value;
use thaw::*;

use super::model::{default_title, is_duplicate, OptionField, VariantEntry, DUPLICATE_VARIANT, VALUE_REQUIRED};
use crate::shared::form::{FieldRules, FormHandle, InputError, TextField};
use crate::shared::layered_modal::ModalFrame;
use crate::shared::notification::use_notifications;

/// Create or edit one variant entry.
///
/// The draft lives in its own form; `on_save` receives it only when no
/// other entry has the same option values.
#[component]
pub fn VariantModal(
    options: Vec<OptionField>,
    initial: VariantEntry,
    /// Every entry of the product, the edited one included
    entries: Vec<VariantEntry>,
    #[prop(into)] title: String,
    on_save: Callback<VariantEntry>,
    on_close: Callback<()>,
) -> impl IntoView {
    let notifications = use_notifications();
    let draft = match serde_json::to_value(&initial) {
        Ok(values) => FormHandle::new(values),
        Err(e) => {
            log::error!("variant draft: {}", e);
            FormHandle::new(Value::Null)
        }
    };
    let root = draft.root();
    let entries = StoredValue::new(entries);

    let submit = draft.handle_submit(move |values: Value| {
        let mut entry: VariantEntry = match serde_json::from_value(values) {
            Ok(entry) => entry,
            Err(e) => {
                notifications.error("Invalid variant", e.to_string());
                return;
            }
        };
        if entry.options.iter().any(|v| v.value.is_none()) {
            root.set_error("options", VALUE_REQUIRED);
            return;
        }
        if entries.with_value(|all| is_duplicate(all, &entry)) {
            root.set_error("options", DUPLICATE_VARIANT);
            return;
        }
        if entry.title.trim().is_empty() {
            entry.title = default_title(&entry);
        }
        on_save.run(entry);
    });

    let pickers = options
        .into_iter()
        .enumerate()
        .map(|(index, option)| {
            let path = format!("options.{index}.value");
            let current = root.text(path.as_str());
            view! {
                <div class="form-group">
                    <label>{option.title.clone()}</label>
                    <select
                        prop:value=move || current.get()
                        on:change=move |ev| {
                            let picked = event_target_value(&ev);
                            let value = if picked.is_empty() { Value::Null } else { Value::String(picked) };
                            root.set_value(path.as_str(), value);
                        }
                    >
                        <option value="">"Choose a value"</option>
                        {option
                            .values
                            .iter()
                            .map(|v| view! { <option value=v.clone()>{v.clone()}</option> })
                            .collect_view()}
                    </select>
                </div>
            }
        })
        .collect_view();

    view! {
        <ModalFrame on_close=on_close title=title show_back=false>
            <div class="variant-form">
                <TextField form=root name="title" label="Title" placeholder="Defaults to the option values" />
                <TextField form=root name="sku" label="SKU" />
                <TextField
                    form=root
                    name="inventory_quantity"
                    label="Inventory"
                    input_type="number"
                    rules=FieldRules::required("Inventory is required")
                        .integer("Inventory must be a whole number")
                        .min(0.0, "Inventory cannot be negative")
                />
                <fieldset class="variant-form__options">
                    <legend>"Options"</legend>
                    {pickers}
                    <InputError form=root name="options" />
                </fieldset>
                <div class="modal__footer">
                    <Button size=ButtonSize::Small on_click=move |_| on_close.run(())>
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        size=ButtonSize::Small
                        on_click=move |_| submit()
                    >
                        "Save"
                    </Button>
                </div>
            </div>
        </ModalFrame>
    }
}
