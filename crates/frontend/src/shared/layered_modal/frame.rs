use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Runs `f` on the next tick.
///
/// Removing the element that dispatched the current DOM event synchronously
/// leaves Leptos' delegated handler pointing at a dropped closure.
pub(crate) fn next_tick(f: impl FnOnce() + 'static) {
    spawn_local(async move {
        TimeoutFuture::new(0).await;
        f();
    });
}

/// Overlay plus positioned surface with a compact header.
///
/// The header shows a back arrow only while `show_back` is true.
#[component]
pub fn ModalFrame(
    /// Dismisses the whole modal (overlay click, close button).
    on_close: Callback<()>,
    /// Back arrow handler.
    #[prop(optional)]
    on_back: Option<Callback<()>>,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] show_back: Signal<bool>,
    /// Close when clicking on the overlay (default: true).
    #[prop(optional)]
    close_on_overlay: Option<bool>,
    /// Extra class for the modal surface (`div.modal`).
    #[prop(optional)]
    modal_class: Option<String>,
    children: Children,
) -> impl IntoView {
    let close_on_overlay = close_on_overlay.unwrap_or(true);
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Press and release must both land on the overlay, otherwise a text
    // selection dragged outside the surface would dismiss the modal.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close =
            close_on_overlay && overlay_mouse_down.get_untracked() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            next_tick(move || on_close.run(()));
        }
    };

    let surface_class = match modal_class {
        Some(cls) => format!("modal {cls}"),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class=surface_class on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal__header">
                    <Show when=move || show_back.get()>
                        <button
                            class="modal__back"
                            title="Back"
                            on:click=move |_| {
                                if let Some(on_back) = on_back {
                                    next_tick(move || on_back.run(()));
                                }
                            }
                        >
                            "←"
                        </button>
                    </Show>
                    <h2 class="modal__title">{move || title.get()}</h2>
                    <button
                        class="modal__close"
                        title="Close"
                        on:click=move |_| next_tick(move || on_close.run(()))
                    >
                        "×"
                    </button>
                </div>
                <div class="modal__body">{children()}</div>
            </div>
        </div>
    }
}
