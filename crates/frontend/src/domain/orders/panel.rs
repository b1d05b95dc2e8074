use contracts::domain::orders::Order;
use leptos::prelude::*;
use thaw::*;

use super::api;
use super::claim::RegisterClaimModal;
use super::reservation::ReserveItemsModal;
use super::returns::RequestReturnModal;
use crate::shared::commit::CommitScope;
use crate::shared::notification::use_notifications;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrderAction {
    RequestReturn,
    RegisterClaim,
    ReserveItems,
}

/// Loads an order by id and opens the after-sale modals over it
#[component]
pub fn OrdersPanel() -> impl IntoView {
    let notifications = use_notifications();
    let scope = StoredValue::new(CommitScope::for_owner("orders panel"));
    let order_id = RwSignal::new(String::new());
    let order = RwSignal::new(None::<Order>);
    let loading = RwSignal::new(false);
    let open = RwSignal::new(None::<OrderAction>);

    let load = move |_| {
        let id = order_id.get_untracked().trim().to_string();
        if id.is_empty() {
            return;
        }
        loading.set(true);
        scope.get_value().commit(
            async move { api::fetch_order(&id).await },
            move |result| {
                loading.set(false);
                match result {
                    Ok(loaded) => order.set(Some(loaded)),
                    Err(e) => notifications.error("Error loading order", e),
                }
            },
        );
    };

    let close = Callback::new(move |_| open.set(None));

    let modal = move || {
        let current = order.get()?;
        let rendered = match open.get()? {
            OrderAction::RequestReturn => {
                view! { <RequestReturnModal order=current on_close=close /> }.into_any()
            }
            OrderAction::RegisterClaim => {
                view! { <RegisterClaimModal order=current on_close=close /> }.into_any()
            }
            OrderAction::ReserveItems => {
                view! { <ReserveItemsModal items=current.items on_close=close /> }.into_any()
            }
        };
        Some(rendered)
    };

    let no_order = Signal::derive(move || order.with(|o| o.is_none()));

    view! {
        <section class="dashboard-panel">
            <h2>"Orders"</h2>
            <div class="dashboard-panel__toolbar">
                <Input value=order_id placeholder="Order id" />
                <Button size=ButtonSize::Small disabled=loading on_click=load>
                    "Load"
                </Button>
            </div>
            {move || {
                order
                    .get()
                    .map(|o| {
                        view! {
                            <p class="dashboard-panel__summary">
                                {format!("Order #{} ({} items)", o.display_id, o.items.len())}
                            </p>
                        }
                    })
            }}
            <div class="dashboard-panel__actions">
                <Button
                    size=ButtonSize::Small
                    disabled=no_order
                    on_click=move |_| open.set(Some(OrderAction::RequestReturn))
                >
                    "Request return"
                </Button>
                <Button
                    size=ButtonSize::Small
                    disabled=no_order
                    on_click=move |_| open.set(Some(OrderAction::RegisterClaim))
                >
                    "Register claim"
                </Button>
                <Button
                    size=ButtonSize::Small
                    disabled=no_order
                    on_click=move |_| open.set(Some(OrderAction::ReserveItems))
                >
                    "Reserve items"
                </Button>
            </div>
            {modal}
        </section>
    }
}
