use crate::shared::selection::HeaderCheckState;
use leptos::prelude::*;

/// Select-all checkbox for a table header.
///
/// Shows the indeterminate mark while only part of the page is selected.
/// `on_change(true)` asks for the whole page, `false` for none of it.
#[component]
pub fn HeaderCheckbox(
    #[prop(into)] state: Signal<HeaderCheckState>,
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        let indeterminate = state.get() == HeaderCheckState::Indeterminate;
        if let Some(input) = checkbox_ref.get() {
            input.set_indeterminate(indeterminate);
        }
    });

    view! {
        <th class="table__cell table__cell--checkbox">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || state.get() == HeaderCheckState::Checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </th>
    }
}
