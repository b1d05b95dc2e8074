use contracts::domain::orders::returns::ReturnReason;
use contracts::domain::orders::Order;
use leptos::prelude::*;
use thaw::*;

use super::model::{apply_reason, build_return_request, ReturnScreen, ReturnSelection};
use super::reason_screen::ReturnReasonScreen;
use super::table::ReturnItemsTable;
use crate::domain::orders::api;
use crate::shared::commit::CommitScope;
use crate::shared::config::FrontendConfig;
use crate::shared::layered_modal::{LayeredModal, LayeredModalContext};
use crate::shared::notification::use_notifications;

/// Request a return for items of `order`.
///
/// The selection survives failed submissions so the user can retry.
#[component]
pub fn RequestReturnModal(
    order: Order,
    on_close: Callback<()>,
    /// Replaces the merchant's return reasons
    #[prop(optional)]
    custom_reasons: Option<Vec<ReturnReason>>,
) -> impl IntoView {
    let notifications = use_notifications();
    let images_on_returns = use_context::<FrontendConfig>()
        .map(|c| c.returns.images_on_returns)
        .unwrap_or(false);
    let scope = CommitScope::for_owner("request return");

    let layers = LayeredModalContext::<ReturnScreen>::new();
    let selection = RwSignal::new(ReturnSelection::new());
    let reasons = RwSignal::new(custom_reasons.clone().unwrap_or_default());
    let submitting = RwSignal::new(false);

    if custom_reasons.is_none() {
        scope.commit(api::fetch_return_reasons(), move |result| match result {
            Ok(list) => reasons.set(list),
            Err(e) => notifications.error("Error loading return reasons", e),
        });
    }

    let order_id = StoredValue::new(order.id.clone());
    let display_id = order.display_id;

    let on_select_reason = Callback::new(move |item_id: String| {
        layers.push(ReturnScreen::Reason { item_id });
    });

    let submit = {
        let scope = scope.clone();
        move |_| {
            let request = match selection.with_untracked(build_return_request) {
                Ok(request) => request,
                Err(e) => {
                    notifications.warning("Nothing to return", e.to_string());
                    return;
                }
            };

            submitting.set(true);
            let order_id = order_id.get_value();
            scope.commit(
                async move { api::request_return(&order_id, &request).await },
                move |result| {
                    submitting.set(false);
                    match result {
                        Ok(()) => {
                            notifications.success(
                                "Successfully returned order",
                                format!("Return requested for order #{}", display_id),
                            );
                            on_close.run(());
                        }
                        Err(e) => notifications.error("Failed to request return", e),
                    }
                },
            );
        }
    };

    let render_screen = move |screen: ReturnScreen| match screen {
        ReturnScreen::Reason { item_id } => {
            let target = item_id.clone();
            let on_submit = Callback::new(
                move |(reason, note, uploaded): (Option<ReturnReason>, String, Vec<String>)| {
                    let applied = selection
                        .with_untracked(|s| apply_reason(s, &target, reason, note, uploaded));
                    match applied {
                        Ok(next) => selection.set(next),
                        Err(rejected) => log::debug!("reason not applied: {}", rejected),
                    }
                    layers.pop();
                },
            );
            view! {
                <ReturnReasonScreen
                    item_id=item_id
                    selection=selection
                    reasons=reasons
                    images_on_returns=images_on_returns
                    on_submit=on_submit
                    on_back=Callback::new(move |_| {
                        layers.back();
                    })
                />
            }
        }
    };

    let order = StoredValue::new(order);

    view! {
        <LayeredModal
            context=layers
            render_screen=render_screen
            title="Request Return"
            on_close=on_close
        >
            <div class="request-return">
                <h3>"Items to return"</h3>
                <ReturnItemsTable
                    order=order.get_value()
                    selection=selection
                    images_on_returns=images_on_returns
                    on_select_reason=on_select_reason
                />
                <div class="modal__footer">
                    <Button size=ButtonSize::Small on_click=move |_| on_close.run(())>
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        size=ButtonSize::Small
                        disabled=Signal::derive(move || {
                            submitting.get() || selection.with(|s| s.is_empty())
                        })
                        on_click=submit.clone()
                    >
                        "Submit"
                    </Button>
                </div>
            </div>
        </LayeredModal>
    }
}
