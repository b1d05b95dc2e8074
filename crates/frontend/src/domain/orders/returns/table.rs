use contracts::domain::orders::{LineItem, Order};
use leptos::prelude::*;
use thaw::*;

use super::model::{bounds_for, reason_summary, step_quantity, toggle_item, ReturnSelection};
use crate::shared::components::{QuantityStepper, TableCheckbox};

fn format_amount(amount: i64, currency: &str) -> String {
    format!("{}.{:02} {}", amount / 100, (amount % 100).abs(), currency.to_uppercase())
}

/// Returnable items of an order with per-item quantity and reason.
///
/// `on_select_reason` receives the id of the item whose reason should be
/// edited; the owner decides how to show the reason screen.
#[component]
pub fn ReturnItemsTable(
    order: Order,
    selection: RwSignal<ReturnSelection>,
    #[prop(optional)] images_on_returns: bool,
    /// Claims and swaps collect reasons elsewhere
    #[prop(optional)]
    is_swap_or_claim: bool,
    on_select_reason: Callback<String>,
) -> impl IntoView {
    let currency = order.currency_code.clone();
    let items = order.returnable_items();

    view! {
        <table class="table return-items">
            <thead>
                <tr class="table__row--head">
                    <th colspan="2">"Product Details"</th>
                    <th class="table__cell--right">"Quantity"</th>
                    <th class="table__cell--right">"Refundable"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || items.clone()
                    key=|item| item.id.clone()
                    children=move |item: LineItem| {
                        view! {
                            <ReturnItemRow
                                item=item
                                currency=currency.clone()
                                selection=selection
                                images_on_returns=images_on_returns
                                is_swap_or_claim=is_swap_or_claim
                                on_select_reason=on_select_reason
                            />
                        }
                    }
                />
            </tbody>
        </table>
    }
}

#[component]
fn ReturnItemRow(
    item: LineItem,
    currency: String,
    selection: RwSignal<ReturnSelection>,
    images_on_returns: bool,
    is_swap_or_claim: bool,
    on_select_reason: Callback<String>,
) -> impl IntoView {
    let id = StoredValue::new(item.id.clone());
    let max = bounds_for(&item).max;
    let refundable = format_amount(item.refundable.unwrap_or(0), &currency);
    let variant_title = item.variant.as_ref().and_then(|v| v.title.clone());
    let sku = item.variant.as_ref().and_then(|v| v.sku.clone());
    let item = StoredValue::new(item);

    let checked = Signal::derive(move || selection.with(|s| s.contains(&id.get_value())));
    let quantity = Signal::derive(move || {
        selection.with(|s| s.get(&id.get_value()).map(|r| r.quantity).unwrap_or(0))
    });
    let summary = Signal::derive(move || {
        selection.with(|s| s.get(&id.get_value()).and_then(reason_summary))
    });

    let on_toggle = Callback::new(move |_checked: bool| {
        item.with_value(|item| {
            selection.update(|s| *s = toggle_item(s, item, images_on_returns));
        });
    });

    let on_adjust = Callback::new(move |delta: i64| {
        let next = item.with_value(|item| selection.with_untracked(|s| step_quantity(s, item, delta)));
        if selection.with_untracked(|s| s != &next) {
            selection.set(next);
        }
    });

    view! {
        <tr class="table__row">
            <TableCheckbox checked=checked on_change=on_toggle />
            <td class="table__cell">
                <div class="line-item">
                    {item.with_value(|i| i.thumbnail.clone()).map(|src| view! {
                        <img class="line-item__thumbnail" src=src />
                    })}
                    <div class="line-item__text">
                        <span class="line-item__title">{item.with_value(|i| i.title.clone())}</span>
                        {variant_title.map(|t| view! { <span class="line-item__variant">{t}</span> })}
                        {sku.map(|s| view! { <span class="line-item__sku">{s}</span> })}
                    </div>
                </div>
            </td>
            <td class="table__cell table__cell--right">
                <Show
                    when=move || checked.get()
                    fallback=move || view! { <span class="text-muted">{max}</span> }
                >
                    <QuantityStepper value=quantity max=max on_adjust=on_adjust />
                </Show>
            </td>
            <td class="table__cell table__cell--right">{refundable}</td>
            <td class="table__cell table__cell--right text-muted">{currency.to_uppercase()}</td>
        </tr>
        <Show when=move || checked.get() && !is_swap_or_claim>
            <tr class="table__row table__row--sub">
                <td></td>
                <td colspan="2" class="table__cell">
                    <span class="return-reason__summary">
                        {move || summary.get().unwrap_or_default()}
                    </span>
                </td>
                <td colspan="2" class="table__cell table__cell--right">
                    <Button
                        size=ButtonSize::Small
                        on_click=move |_| on_select_reason.run(id.get_value())
                    >
                        "Select Reason"
                    </Button>
                </td>
            </tr>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(2505, "eur"), "25.05 EUR");
        assert_eq!(format_amount(0, "usd"), "0.00 USD");
    }
}
