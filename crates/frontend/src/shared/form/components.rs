use leptos::prelude::*;

use super::error::FormError;
use super::reactive::NestedForm;
use super::state::FieldRules;

/// Inline message for the field at `name`, hidden while the field is valid.
#[component]
pub fn InputError(form: NestedForm, #[prop(into)] name: String) -> impl IntoView {
    let error = form.error(name.as_str());

    view! {
        <Show when=move || error.get().is_some()>
            <span class="form-field__error">{move || error.get().unwrap_or_default()}</span>
        </Show>
    }
}

/// Labelled text/number input bound to one field of a nested form.
///
/// Rules are registered while the input is mounted.
#[component]
pub fn TextField(
    form: NestedForm,
    #[prop(into)] name: String,
    #[prop(into)] label: String,
    /// Registered on mount
    #[prop(optional)]
    rules: Option<FieldRules>,
    /// `"text"` (default) or `"number"`
    #[prop(optional)]
    input_type: Option<&'static str>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let input_type = input_type.unwrap_or("text");
    if let Some(rules) = rules {
        form.register(name.as_str(), rules);
        let registered = form.path(name.as_str());
        let state = form.form().state();
        on_cleanup(move || {
            state.try_update(|s| s.unregister(&registered));
        });
    }

    let value = form.text(name.as_str());
    let field_id = form.path(name.as_str()).to_string();
    let field_name = name.clone();

    view! {
        <div class="form-group">
            <label for=field_id.clone()>{label}</label>
            <input
                id=field_id
                type=input_type
                placeholder=placeholder.unwrap_or_default()
                prop:value=move || value.get()
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    if input_type == "number" {
                        form.set_number(field_name.as_str(), &text);
                    } else {
                        form.set_text(field_name.as_str(), text);
                    }
                }
            />
            <InputError form=form name=name />
        </div>
    }
}

/// Rendered in place of a sub-form whose mount was refused.
pub fn mount_failed(error: FormError) -> AnyView {
    log::error!("nested form not mounted: {}", error);
    view! { <div class="form-field__error">{error.to_string()}</div> }.into_any()
}
