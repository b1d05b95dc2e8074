use leptos::prelude::*;
use thaw::*;

/// Minus / value / plus control.
///
/// Emits the requested delta only; the owner decides whether it applies.
#[component]
pub fn QuantityStepper(
    #[prop(into)] value: Signal<u32>,
    #[prop(into)] max: Signal<u32>,
    on_adjust: Callback<i64>,
) -> impl IntoView {
    view! {
        <div class="quantity-stepper">
            <Button
                size=ButtonSize::Small
                disabled=Signal::derive(move || value.get() <= 1)
                on_click=move |_| on_adjust.run(-1)
            >
                "−"
            </Button>
            <span class="quantity-stepper__value">{move || value.get()}</span>
            <Button
                size=ButtonSize::Small
                disabled=Signal::derive(move || value.get() >= max.get())
                on_click=move |_| on_adjust.run(1)
            >
                "+"
            </Button>
        </div>
    }
}
