use leptos::prelude::*;
use thaw::*;

use super::conditions::EditConditionModal;

/// Opens the condition editor for a discount/condition id pair
#[component]
pub fn DiscountsPanel() -> impl IntoView {
    let discount_id = RwSignal::new(String::new());
    let condition_id = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<(String, String)>);

    let open = move |_| {
        let discount = discount_id.get_untracked().trim().to_string();
        let condition = condition_id.get_untracked().trim().to_string();
        if !discount.is_empty() && !condition.is_empty() {
            editing.set(Some((discount, condition)));
        }
    };

    view! {
        <section class="dashboard-panel">
            <h2>"Discounts"</h2>
            <div class="dashboard-panel__toolbar">
                <Input value=discount_id placeholder="Discount id" />
                <Input value=condition_id placeholder="Condition id" />
                <Button size=ButtonSize::Small on_click=open>
                    "Edit condition"
                </Button>
            </div>
            {move || {
                editing
                    .get()
                    .map(|(discount_id, condition_id)| {
                        view! {
                            <EditConditionModal
                                discount_id=discount_id
                                condition_id=condition_id
                                on_close=Callback::new(move |_| editing.set(None))
                            />
                        }
                    })
            }}
        </section>
    }
}
