use leptos::prelude::*;

/// Row checkbox cell.
///
/// Clicking the checkbox does not propagate to the row.
///
/// # BEM classes
/// - `.table__cell--checkbox` - td wrapper
/// - `.table__checkbox` - input element
#[component]
pub fn TableCheckbox(
    #[prop(into)] checked: Signal<bool>,
    on_change: Callback<bool>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    view! {
        <td class="table__cell table__cell--checkbox" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                prop:disabled=move || disabled.get().unwrap_or(false)
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </td>
    }
}
