use contracts::domain::orders::returns::ReturnReason;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use super::model::{PendingUploads, ReturnSelection};
use crate::domain::orders::api;
use crate::shared::commit::CommitScope;
use crate::shared::notification::use_notifications;

fn delete_upload(url: String) {
    spawn_local(async move {
        if let Err(e) = api::delete_upload(&url).await {
            log::warn!("{}", e);
        }
    });
}

/// Reason, note and images of one item picked for return.
///
/// "Add" hands the result to `on_submit`; the owner applies it and pops the
/// screen. Images are uploaded as soon as they are chosen; uploads that were
/// not submitted are deleted when the screen is unmounted, whichever way it
/// was left.
#[component]
pub fn ReturnReasonScreen(
    item_id: String,
    selection: RwSignal<ReturnSelection>,
    #[prop(into)] reasons: Signal<Vec<ReturnReason>>,
    #[prop(optional)] images_on_returns: bool,
    on_submit: Callback<(Option<ReturnReason>, String, Vec<String>)>,
    on_back: Callback<()>,
) -> impl IntoView {
    let notifications = use_notifications();
    let scope = CommitScope::for_owner("return reason");

    let existing = selection.with_untracked(|s| s.get(&item_id).cloned());
    let selected_reason = RwSignal::new(existing.as_ref().and_then(|r| r.reason.clone()));
    let note = RwSignal::new(existing.as_ref().map(|r| r.note.clone()).unwrap_or_default());
    let attached = existing.and_then(|r| r.images).unwrap_or_default();
    let pending = RwSignal::new(PendingUploads::default());
    let uploading = RwSignal::new(false);

    let on_reason_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let reason = reasons.with_untracked(|all| all.iter().find(|r| r.id == value).cloned());
        selected_reason.set(reason);
    };

    let on_files = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(list) = input.files() else {
            return;
        };
        let files: Vec<web_sys::File> = (0..list.length()).filter_map(|i| list.get(i)).collect();
        if files.is_empty() {
            return;
        }

        uploading.set(true);
        scope.commit(api::upload_images(files), move |result| {
            uploading.set(false);
            match result {
                Ok(urls) => pending.update(|p| p.extend(urls)),
                Err(e) => notifications.error("Error uploading images", e),
            }
        });
    };

    let remove_pending = move |url: String| {
        if pending.try_update(|p| p.remove(&url)).unwrap_or(false) {
            delete_upload(url);
        }
    };

    on_cleanup(move || {
        for url in pending.try_update_untracked(|p| p.discard()).unwrap_or_default() {
            delete_upload(url);
        }
    });

    let go_back = move |_| on_back.run(());

    let add = move |_| {
        let uploaded = pending.try_update(|p| p.submit()).unwrap_or_default();
        on_submit.run((selected_reason.get_untracked(), note.get_untracked(), uploaded));
    };

    view! {
        <div class="return-reason">
            <h3 class="return-reason__heading">"Reason for Return"</h3>
            <div class="form-group">
                <label>"Reason"</label>
                <select on:change=on_reason_change>
                    <option value="" selected=move || selected_reason.with(Option::is_none)>
                        "Choose a reason"
                    </option>
                    <For
                        each=move || reasons.get()
                        key=|reason| reason.id.clone()
                        children=move |reason: ReturnReason| {
                            let id = reason.id.clone();
                            let is_selected = move || {
                                selected_reason.with(|r| r.as_ref().is_some_and(|r| r.id == id))
                            };
                            view! {
                                <option value=reason.id.clone() selected=is_selected>
                                    {reason.label}
                                </option>
                            }
                        }
                    />
                </select>
            </div>
            <div class="form-group">
                <label>"Note"</label>
                <Input value=note />
            </div>
            <Show when=move || images_on_returns>
                <div class="return-reason__images">
                    {attached
                        .iter()
                        .map(|url| view! { <div class="image-row"><img src=url.clone() /></div> })
                        .collect_view()}
                    <For
                        each=move || pending.with(|p| p.urls().to_vec())
                        key=|url| url.clone()
                        children=move |url: String| {
                            let target = url.clone();
                            view! {
                                <div class="image-row">
                                    <img src=url />
                                    <button
                                        class="image-row__delete"
                                        on:click=move |_| remove_pending(target.clone())
                                    >
                                        "🗑"
                                    </button>
                                </div>
                            }
                        }
                    />
                    <input
                        type="file"
                        accept="image/png,image/jpeg"
                        multiple=true
                        prop:disabled=move || uploading.get()
                        on:change=on_files.clone()
                    />
                </div>
            </Show>
            <div class="modal__footer">
                <Button size=ButtonSize::Small on_click=go_back>
                    "Back"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Small
                    disabled=Signal::derive(move || {
                        selected_reason.with(Option::is_none) || uploading.get()
                    })
                    on_click=add
                >
                    "Add"
                </Button>
            </div>
        </div>
    }
}
