use contracts::domain::orders::claim::{ClaimType, ShippingOption};
use contracts::domain::orders::reservation::StockLocation;
use contracts::domain::orders::Order;
use leptos::prelude::*;
use serde_json::Value;
use thaw::*;

use super::model::{
    build_claim_request, decode_claim_values, default_claim_values, ClaimValuesError,
};
use super::sections::{
    ClaimTypeSection, ItemsToReturnSection, ItemsToSendSection, RefundAmountSection,
    SendNotificationSection, ShippingAddressSection, ShippingSection,
};
use crate::domain::orders::api;
use crate::shared::commit::CommitScope;
use crate::shared::form::{mount_failed, FormHandle, NestedForm};
use crate::shared::layered_modal::ModalFrame;
use crate::shared::notification::use_notifications;

fn confirm_discard() -> bool {
    web_sys::window()
        .and_then(|w| {
            w.confirm_with_message("You have unsaved changes, are you sure you want to close?")
                .ok()
        })
        .unwrap_or(true)
}

/// Mounts `key` under `parent` and renders `section` with it.
fn section<V: IntoView + 'static>(parent: NestedForm, key: &str, section: impl FnOnce(NestedForm) -> V) -> AnyView {
    match parent.nested(key) {
        Ok(form) => section(form).into_any(),
        Err(e) => mount_failed(e),
    }
}

#[component]
pub fn RegisterClaimModal(order: Order, on_close: Callback<()>) -> impl IntoView {
    let notifications = use_notifications();
    let scope = CommitScope::for_owner("register claim");

    let defaults = match serde_json::to_value(default_claim_values(&order)) {
        Ok(values) => values,
        Err(e) => {
            log::error!("claim defaults: {}", e);
            Value::Null
        }
    };
    let form = FormHandle::new(defaults);
    let root = form.root();
    let submitting = RwSignal::new(false);

    let return_options = RwSignal::new(Vec::<ShippingOption>::new());
    let replacement_options = RwSignal::new(Vec::<ShippingOption>::new());
    let locations = RwSignal::new(Vec::<StockLocation>::new());

    if let Some(region_id) = order.region_id.clone() {
        let replacement_region = region_id.clone();
        scope.commit(
            async move { api::fetch_shipping_options(&region_id, true).await },
            move |result| match result {
                Ok(options) => return_options.set(options),
                Err(e) => notifications.error("Error loading shipping options", e),
            },
        );
        scope.commit(
            async move { api::fetch_shipping_options(&replacement_region, false).await },
            move |result| match result {
                Ok(options) => replacement_options.set(options),
                Err(e) => notifications.error("Error loading shipping options", e),
            },
        );
    }
    scope.commit(api::fetch_stock_locations(), move |result| match result {
        Ok(list) => locations.set(list),
        Err(e) => log::warn!("stock locations unavailable: {}", e),
    });

    let claim_type = root.watch("claim_type.type");
    let is_replace = Signal::derive(move || claim_type.get().as_str() == Some("replace"));
    let items = root.watch("return_items.items");
    let has_items = Signal::derive(move || items.with(|v| v.as_array().is_some_and(|a| !a.is_empty())));

    let order_id = StoredValue::new(order.id.clone());
    let display_id = order.display_id;
    let order = StoredValue::new(order);

    let close = Callback::new(move |_: ()| {
        if !form.is_dirty() || confirm_discard() {
            on_close.run(());
        }
    });

    let submit = {
        let scope = scope.clone();
        form.handle_submit(move |values: Value| {
            let values = match decode_claim_values(values) {
                Ok(values) => values,
                Err(ClaimValuesError::Fields(errors)) => {
                    for (path, message) in errors {
                        root.set_error(path, message);
                    }
                    return;
                }
                Err(e) => {
                    notifications.error("Error creating claim", e.to_string());
                    return;
                }
            };
            let request = match build_claim_request(&values) {
                Ok(request) => request,
                Err(errors) => {
                    for (path, message) in errors {
                        root.set_error(path, message);
                    }
                    return;
                }
            };

            submitting.set(true);
            let order_id = order_id.get_value();
            scope.commit(
                async move { api::create_claim(&order_id, &request).await },
                move |result| {
                    submitting.set(false);
                    match result {
                        Ok(()) => {
                            notifications.success(
                                "Successfully created claim",
                                format!("A claim for order #{} was successfully created", display_id),
                            );
                            on_close.run(());
                        }
                        Err(e) => notifications.error("Error creating claim", e),
                    }
                },
            );
        })
    };

    let location = root.text("selected_location");

    view! {
        <ModalFrame
            on_close=close
            title="Create Claim"
            show_back=false
            modal_class="claim-modal".to_string()
        >
            <div class="claim-form">
                {section(root, "return_items", |f| view! { <ItemsToReturnSection form=f /> })}
                {section(root, "return_shipping", |f| view! {
                    <ShippingSection form=f title="Shipping for return items" options=return_options />
                })}
                <Show when=move || locations.with(|l| !l.is_empty())>
                    <section class="claim-section">
                        <h3>"Location"</h3>
                        <p class="text-muted">"Choose which location you want to return the items to."</p>
                        <select on:change=move |ev| {
                            let id = event_target_value(&ev);
                            let value = if id.is_empty() { Value::Null } else { Value::String(id) };
                            root.set_value("selected_location", value);
                        }>
                            <option value="" selected=move || location.get().is_empty()>
                                "Select Location to Return to"
                            </option>
                            <For
                                each=move || locations.get()
                                key=|l| l.id.clone()
                                children=move |l: StockLocation| {
                                    let id = l.id.clone();
                                    view! {
                                        <option value=l.id.clone() selected=move || location.get() == id>
                                            {l.name}
                                        </option>
                                    }
                                }
                            />
                        </select>
                    </section>
                </Show>
                {section(root, "claim_type", |f| view! { <ClaimTypeSection form=f /> })}
                <Show
                    when=move || is_replace.get()
                    fallback=move || section(root, "refund_amount", |f| view! { <RefundAmountSection form=f /> })
                >
                    {section(root, "additional_items", |f| view! {
                        <ItemsToSendSection form=f order=order.get_value() />
                    })}
                    {section(root, "shipping_address", |f| view! { <ShippingAddressSection form=f /> })}
                    {section(root, "replacement_shipping", |f| view! {
                        <ShippingSection form=f title="Shipping for new items" options=replacement_options />
                    })}
                </Show>
                <ClaimSummary form=root />
            </div>
            <div class="modal__footer modal__footer--split">
                {section(root, "notification", |f| view! { <SendNotificationSection form=f /> })}
                <div class="modal__actions">
                    <Button size=ButtonSize::Small on_click=move |_| close.run(())>
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        size=ButtonSize::Small
                        disabled=Signal::derive(move || {
                            !form.is_dirty() || submitting.get() || !has_items.get()
                        })
                        on_click=move |_| submit()
                    >
                        "Submit and close"
                    </Button>
                </div>
            </div>
        </ModalFrame>
    }
}

/// Picked items and what happens to them
#[component]
fn ClaimSummary(form: NestedForm) -> impl IntoView {
    let picked = Signal::derive(move || {
        form.get::<Vec<Value>>("return_items.items")
            .unwrap_or_default()
            .iter()
            .filter(|item| item.get("return").and_then(Value::as_bool).unwrap_or(false))
            .count()
    });
    let claim_type = Signal::derive(move || form.get::<ClaimType>("claim_type.type").unwrap_or_default());

    view! {
        <div class="claim-summary">
            <span>{move || format!("{} item(s) claimed", picked.get())}</span>
            <span>
                {move || match claim_type.get() {
                    ClaimType::Refund => "Refund",
                    ClaimType::Replace => "Replace",
                }}
            </span>
        </div>
    }
}
