//! Sub-forms of the claim form. Each one only sees its own section of the
//! value tree through the `NestedForm` it is given.

use contracts::domain::orders::claim::{ClaimReason, ShippingOption};
use contracts::domain::orders::Order;
use leptos::prelude::*;
use serde_json::{json, Value};
use thaw::*;

use super::model::{ClaimAdditionalItem, ClaimReturnItem, QUANTITY_REQUIRED, WHOLE_QUANTITY};
use crate::shared::form::{mount_failed, FieldRow, FieldRules, FormPath, InputError, NestedForm, TextField};

/// Mounted at `return_items`
#[component]
pub fn ItemsToReturnSection(form: NestedForm) -> impl IntoView {
    let rows = form.rows("items");

    view! {
        <section class="claim-section">
            <h3>"Items to claim"</h3>
            <For
                each=move || rows.get()
                key=|row| row.key.clone()
                children=move |row: FieldRow| {
                    match form.nested(FormPath::from("items").index(row.index)) {
                        Ok(row_form) => view! { <ClaimItemRow form=row_form row=row /> }.into_any(),
                        Err(e) => mount_failed(e),
                    }
                }
            />
        </section>
    }
}

#[component]
fn ClaimItemRow(form: NestedForm, row: FieldRow) -> impl IntoView {
    let item: Option<ClaimReturnItem> = serde_json::from_value(row.value).ok();
    let Some(item) = item else {
        return view! { <div class="form-field__error">"Unreadable item"</div> }.into_any();
    };

    let picked = form.watch("return");
    let selected = Signal::derive(move || picked.get().as_bool().unwrap_or(false));
    let reason = Signal::derive(move || {
        form.get::<Option<ClaimReason>>("return_reason_details.reason")
            .ok()
            .flatten()
    });
    let max = item.original_quantity;

    view! {
        <div class="claim-item">
            <label class="claim-item__pick">
                <input
                    type="checkbox"
                    prop:checked=move || selected.get()
                    on:change=move |ev| form.set_value("return", Value::Bool(event_target_checked(&ev)))
                />
                <span class="claim-item__title">{item.title.clone()}</span>
                {item.variant_title.clone().map(|t| view! { <span class="text-muted">{t}</span> })}
            </label>
            <Show when=move || selected.get()>
                <TextField
                    form=form
                    name="quantity"
                    label=format!("Quantity (max {max})")
                    input_type="number"
                    rules=FieldRules::required(QUANTITY_REQUIRED)
                        .integer(WHOLE_QUANTITY)
                        .min(1.0, "At least one item")
                        .max(f64::from(max), format!("At most {max} can be claimed"))
                />
                <div class="form-group">
                    <label>"Reason"</label>
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev);
                        let reason = ClaimReason::parse(&value)
                            .map(|r| Value::String(r.as_str().to_string()))
                            .unwrap_or(Value::Null);
                        form.set_value("return_reason_details.reason", reason);
                    }>
                        <option value="" selected=move || reason.get().is_none()>"Select a reason"</option>
                        {ClaimReason::ALL
                            .into_iter()
                            .map(|r| view! {
                                <option value=r.as_str() selected=move || reason.get() == Some(r)>
                                    {r.label()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>
                <TextField form=form name="return_reason_details.note" label="Note" />
                <InputError form=form name="return_reason_details" />
            </Show>
        </div>
    }
    .into_any()
}

/// Mounted at `return_shipping` or `replacement_shipping`
#[component]
pub fn ShippingSection(
    form: NestedForm,
    #[prop(into)] title: String,
    #[prop(into)] options: Signal<Vec<ShippingOption>>,
) -> impl IntoView {
    let option = form.watch("option");
    let current = Signal::derive(move || {
        option
            .get()
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    view! {
        <section class="claim-section">
            <h3>{title}</h3>
            <select on:change=move |ev| {
                let id = event_target_value(&ev);
                let choice = options.with_untracked(|all| {
                    all.iter()
                        .find(|o| o.id == id)
                        .map(|o| json!({ "id": o.id, "name": o.name }))
                });
                form.set_value("option", choice.unwrap_or(Value::Null));
            }>
                <option value="" selected=move || current.get().is_none()>"Choose shipping method"</option>
                <For
                    each=move || options.get()
                    key=|option| option.id.clone()
                    children=move |option: ShippingOption| {
                        let id = option.id.clone();
                        view! {
                            <option
                                value=option.id.clone()
                                selected=move || current.get().as_deref() == Some(id.as_str())
                            >
                                {option.name}
                            </option>
                        }
                    }
                />
            </select>
            <InputError form=form name="option" />
        </section>
    }
}

/// Mounted at `claim_type`
#[component]
pub fn ClaimTypeSection(form: NestedForm) -> impl IntoView {
    let current = form.text("type");
    let choice = move |value: &'static str, label: &'static str| {
        view! {
            <label class="radio">
                <input
                    type="radio"
                    name="claim_type"
                    value=value
                    prop:checked=move || current.get() == value
                    on:change=move |_| form.set_text("type", value.to_string())
                />
                {label}
            </label>
        }
    };

    view! {
        <section class="claim-section">
            <h3>"Choose which type of claim you wish to create"</h3>
            {choice("refund", "Refund")}
            {choice("replace", "Replace")}
        </section>
    }
}

/// Mounted at `additional_items`; offers the order's variants
#[component]
pub fn ItemsToSendSection(form: NestedForm, order: Order) -> impl IntoView {
    let rows = form.rows("items");
    let candidates: Vec<(String, String)> = order
        .items
        .iter()
        .filter_map(|item| {
            let variant_id = item.variant_id.clone()?;
            let title = match item.variant.as_ref().and_then(|v| v.title.clone()) {
                Some(variant) => format!("{} ({})", item.title, variant),
                None => item.title.clone(),
            };
            Some((variant_id, title))
        })
        .collect();
    let candidates = StoredValue::new(candidates);
    let picked = RwSignal::new(String::new());

    let add = move |_| {
        let variant_id = picked.get_untracked();
        let Some(title) = candidates.with_value(|c| {
            c.iter().find(|(id, _)| id == &variant_id).map(|(_, t)| t.clone())
        }) else {
            return;
        };
        let entry = ClaimAdditionalItem {
            variant_id,
            title,
            quantity: 1,
        };
        match serde_json::to_value(&entry) {
            Ok(value) => {
                if let Err(e) = form.append("items", value) {
                    log::error!("{}", e);
                }
            }
            Err(e) => log::error!("{}", e),
        }
    };

    view! {
        <section class="claim-section">
            <h3>"Items to send"</h3>
            <For
                each=move || rows.get()
                key=|row| (row.key.clone(), row.index)
                children=move |row: FieldRow| {
                    let index = row.index;
                    let title = row.value.get("title").and_then(Value::as_str).unwrap_or_default().to_string();
                    view! {
                        <div class="claim-item">
                            <span class="claim-item__title">{title}</span>
                            <TextField
                                form=form
                                name=format!("items.{index}.quantity")
                                label="Quantity"
                                input_type="number"
                                rules=FieldRules::required(QUANTITY_REQUIRED).integer(WHOLE_QUANTITY).min(1.0, "At least one item")
                            />
                            <Button size=ButtonSize::Small on_click=move |_| {
                                if let Err(e) = form.remove("items", index) {
                                    log::error!("{}", e);
                                }
                            }>
                                "Remove"
                            </Button>
                        </div>
                    }
                }
            />
            <div class="claim-section__add">
                <select on:change=move |ev| picked.set(event_target_value(&ev))>
                    <option value="">"Choose a variant"</option>
                    {candidates.with_value(|c| {
                        c.iter()
                            .map(|(id, title)| view! { <option value=id.clone()>{title.clone()}</option> })
                            .collect_view()
                    })}
                </select>
                <Button size=ButtonSize::Small on_click=add>
                    "Add item"
                </Button>
            </div>
        </section>
    }
}

/// Mounted at `shipping_address`
#[component]
pub fn ShippingAddressSection(form: NestedForm) -> impl IntoView {
    view! {
        <section class="claim-section claim-section--grid">
            <h3>"Shipping address"</h3>
            <TextField form=form name="first_name" label="First name" rules=FieldRules::required("First name is required") />
            <TextField form=form name="last_name" label="Last name" rules=FieldRules::required("Last name is required") />
            <TextField form=form name="company" label="Company" />
            <TextField form=form name="address_1" label="Address" rules=FieldRules::required("Address is required") />
            <TextField form=form name="address_2" label="Apartment, suite, etc." />
            <TextField form=form name="postal_code" label="Postal code" rules=FieldRules::required("Postal code is required") />
            <TextField form=form name="city" label="City" rules=FieldRules::required("City is required") />
            <TextField form=form name="province" label="Province" />
            <TextField form=form name="country_code" label="Country code" rules=FieldRules::required("Country is required") />
            <TextField form=form name="phone" label="Phone" />
        </section>
    }
}

/// Mounted at `refund_amount`; amount in minor units
#[component]
pub fn RefundAmountSection(form: NestedForm) -> impl IntoView {
    view! {
        <section class="claim-section">
            <TextField
                form=form
                name="amount"
                label="Refund amount"
                input_type="number"
                rules=FieldRules::default()
                    .integer("Refund amount must be a whole number")
                    .min(0.0, "Refund amount cannot be negative")
            />
        </section>
    }
}

/// Mounted at `notification`
#[component]
pub fn SendNotificationSection(form: NestedForm) -> impl IntoView {
    let send = form.watch("send_notification");
    let checked = Signal::derive(move || send.get().as_bool().unwrap_or(true));

    view! {
        <label class="send-notification">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| form.set_value("send_notification", Value::Bool(event_target_checked(&ev)))
            />
            "Send notifications"
        </label>
    }
}
