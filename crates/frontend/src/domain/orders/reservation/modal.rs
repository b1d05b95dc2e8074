use std::collections::HashMap;

use contracts::domain::orders::reservation::{StockLocation, VariantInventory};
use contracts::domain::orders::LineItem;
use leptos::prelude::*;
use serde_json::{json, Value};
use thaw::*;

use super::model::{max_reservation, reservation_requests, ReserveFormValues, ReserveOutcome};
use crate::domain::orders::api;
use crate::shared::commit::CommitScope;
use crate::shared::form::{mount_failed, FormHandle, FormPath, InputError, NestedForm};
use crate::shared::layered_modal::ModalFrame;
use crate::shared::notification::use_notifications;

/// Allocate order items from one stock location.
///
/// Either every line is reserved or none: reservations created before a
/// failure are deleted again.
#[component]
pub fn ReserveItemsModal(
    items: Vec<LineItem>,
    /// Quantity already reserved per line item id
    #[prop(optional)]
    reserved: HashMap<String, u32>,
    on_close: Callback<()>,
) -> impl IntoView {
    let notifications = use_notifications();
    let scope = CommitScope::for_owner("reserve items");

    let form = FormHandle::new(json!({ "location": null, "items": [] }));
    let root = form.root();
    let locations = RwSignal::new(Vec::<StockLocation>::new());
    let loading = RwSignal::new(true);
    let submitting = RwSignal::new(false);

    scope.commit(api::fetch_stock_locations(), move |result| {
        match result {
            Ok(list) => locations.set(list),
            Err(e) => notifications.error("Error loading stock locations", e),
        }
        loading.set(false);
    });

    let location_text = root.text("location");
    let location = Signal::derive(move || Some(location_text.get()).filter(|l| !l.is_empty()));

    let submit = {
        let scope = scope.clone();
        move |_| {
            let values: ReserveFormValues = match serde_json::from_value(form.values()) {
                Ok(values) => values,
                Err(e) => {
                    log::error!("reservation form: {}", e);
                    return;
                }
            };
            let requests = match reservation_requests(&values) {
                Ok(requests) => requests,
                Err(e) => {
                    root.set_error("location", e.to_string());
                    return;
                }
            };

            submitting.set(true);
            scope.commit(
                async move {
                    let mut results = Vec::with_capacity(requests.len());
                    for request in &requests {
                        results.push(api::create_reservation(request).await);
                    }
                    let outcome = ReserveOutcome::collect(results);
                    for id in outcome.rollback_ids() {
                        if let Err(e) = api::delete_reservation(&id).await {
                            log::error!("rollback of {} failed: {}", id, e);
                        }
                    }
                    outcome
                },
                move |outcome| {
                    submitting.set(false);
                    if outcome.is_success() {
                        notifications.success("Items allocated", "Items have been allocated successfully");
                        on_close.run(());
                    } else {
                        notifications.error("Couldn't allocate items", outcome.failure_message());
                    }
                },
            );
        }
    };

    let items = StoredValue::new(items.into_iter().enumerate().collect::<Vec<_>>());
    let reserved = StoredValue::new(reserved);

    view! {
        <ModalFrame on_close=on_close title="Allocate order items" show_back=false>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <div>"Loading..."</div> }
            >
                <div class="reserve-items">
                    <div class="reserve-items__location">
                        <div>
                            <p class="font-semibold">"Location"</p>
                            <p class="text-muted">"Choose where you wish to allocate from"</p>
                        </div>
                        <select on:change=move |ev| root.set_text("location", event_target_value(&ev))>
                            <option value="">"Select location"</option>
                            {move || {
                                locations
                                    .get()
                                    .into_iter()
                                    .map(|l| view! { <option value=l.id>{l.name}</option> })
                                    .collect_view()
                            }}
                        </select>
                        <InputError form=root name="location" />
                    </div>
                    <div class=move || {
                        if location.get().is_some() { "reserve-items__lines" } else { "reserve-items__lines is-disabled" }
                    }>
                        <p class="font-semibold">"Items to allocate"</p>
                        <p class="text-muted">"Select the number of items that you wish to allocate."</p>
                        {items
                            .get_value()
                            .into_iter()
                            .map(|(index, item)| {
                                let already = reserved.with_value(|r| r.get(&item.id).copied().unwrap_or(0));
                                match root.nested(FormPath::from("items").index(index)) {
                                    Ok(line_form) => view! {
                                        <ReservationLineItem
                                            form=line_form
                                            item=item
                                            location=location
                                            reserved_quantity=already
                                        />
                                    }
                                    .into_any(),
                                    Err(e) => mount_failed(e),
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </Show>
            <div class="modal__footer">
                <Button size=ButtonSize::Small on_click=move |_| on_close.run(())>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Small
                    disabled=Signal::derive(move || submitting.get())
                    on_click=submit
                >
                    "Save reservation"
                </Button>
            </div>
        </ModalFrame>
    }
}

/// One order line; renders nothing for variants without inventory.
#[component]
pub fn ReservationLineItem(
    form: NestedForm,
    item: LineItem,
    #[prop(into)] location: Signal<Option<String>>,
    #[prop(optional)] reserved_quantity: u32,
) -> impl IntoView {
    let scope = CommitScope::for_owner("reservation line");
    let inventory = RwSignal::new(None::<VariantInventory>);

    form.set_value("line_item_id", Value::String(item.id.clone()));
    if let Some(variant_id) = item.variant_id.clone() {
        scope.commit(
            async move { api::fetch_variant_inventory(&variant_id).await },
            move |result| match result {
                Ok(variant) => {
                    if let Some(first) = variant.inventory.first() {
                        form.set_value("inventory_item_id", Value::String(first.id.clone()));
                    }
                    inventory.set(Some(variant));
                }
                Err(e) => log::warn!("{}", e),
            },
        );
    }

    let levels = Signal::derive(move || {
        let location = location.get()?;
        inventory.with(|v| {
            let first = v.as_ref()?.inventory.first()?;
            first
                .location_levels
                .iter()
                .find(|l| l.location_id == location)
                .map(|l| (l.available_quantity, l.stocked_quantity))
        })
    });

    let item = StoredValue::new(item);
    let max = Signal::derive(move || {
        let available = levels.get().map(|(available, _)| available);
        item.with_value(|item| max_reservation(item, reserved_quantity, available))
    });
    let over_reserved = item.with_value(|i| reserved_quantity > i.fulfillable_quantity());
    let quantity = form.text("quantity");

    view! {
        <Show when=move || inventory.with(|v| v.as_ref().is_some_and(|v| !v.inventory.is_empty()))>
            <div class="reserve-line">
                <div class="reserve-line__item">
                    <span class="font-semibold">{item.with_value(|i| i.title.clone())}</span>
                    <span class="text-muted">
                        {item.with_value(|i| {
                            i.variant
                                .as_ref()
                                .and_then(|v| v.title.clone().or(v.sku.clone()))
                                .unwrap_or_else(|| "-".to_string())
                        })}
                    </span>
                </div>
                <div class="reserve-line__stock text-muted">
                    <p>{move || format!("{} available", levels.get().map(|(a, _)| a).unwrap_or(0))}</p>
                    <p>{move || format!("({} in stock)", levels.get().map(|(_, s)| s).unwrap_or(0))}</p>
                </div>
                <div class="reserve-line__quantity">
                    <input
                        type="number"
                        min="0"
                        prop:max=move || max.get().to_string()
                        prop:disabled=over_reserved
                        prop:value=move || quantity.get()
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            match text.trim().parse::<u32>() {
                                Ok(n) => form.set_value("quantity", Value::from(n.min(max.get_untracked()))),
                                Err(_) => form.set_value("quantity", Value::Null),
                            }
                        }
                    />
                    <span>{move || format!("/ {}", max.get())}</span>
                </div>
            </div>
        </Show>
    }
}
