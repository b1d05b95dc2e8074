//! Modal whose body can be replaced by a stack of secondary screens.
//!
//! The root content is shown while the stack is empty. Pushing a screen
//! replaces the body with that screen and adds a back arrow; popping the last
//! one brings the root content back.

mod frame;
mod stack;

pub(crate) use frame::next_tick;
pub use frame::ModalFrame;
pub use stack::{LayeredScreen, LayeredStack, PopOutcome};

use leptos::ev;
use leptos::prelude::*;

/// Reactive handle to one modal's screen stack.
///
/// Created by the modal's owner and handed to every screen that needs to
/// push or pop, so the stack is only changed through these methods.
pub struct LayeredModalContext<S: LayeredScreen> {
    stack: RwSignal<LayeredStack<S>>,
}

impl<S: LayeredScreen> Clone for LayeredModalContext<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: LayeredScreen> Copy for LayeredModalContext<S> {}

impl<S: LayeredScreen> LayeredModalContext<S> {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(LayeredStack::new()),
        }
    }

    pub fn push(&self, screen: S) {
        log::debug!("layered modal: push '{}'", screen.title());
        self.stack.update(|stack| stack.push(screen));
    }

    pub fn pop(&self) -> PopOutcome<S> {
        self.stack
            .try_update(|stack| stack.pop())
            .unwrap_or(PopOutcome::AlreadyEmpty)
    }

    pub fn back(&self) -> Option<S> {
        self.pop().popped()
    }

    pub fn reset(&self) {
        let removed = self
            .stack
            .try_update(|stack| stack.reset())
            .unwrap_or_default();
        if removed > 0 {
            log::debug!("layered modal: reset {removed} screen(s)");
        }
    }

    /// Visible layered screen, tracked.
    pub fn top(&self) -> Option<S> {
        self.stack.with(|stack| stack.top().cloned())
    }

    pub fn is_layered(&self) -> bool {
        self.stack.with(|stack| !stack.is_empty())
    }

    pub fn len(&self) -> usize {
        self.stack.with(|stack| stack.len())
    }
}

impl<S: LayeredScreen> Default for LayeredModalContext<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Modal that renders `children` as root content and the top of
/// `context`'s stack above it.
///
/// Escape steps back one screen, or dismisses the modal when only root
/// content is visible. Dismissal always clears the stack.
#[component]
pub fn LayeredModal<S, F, V>(
    context: LayeredModalContext<S>,
    /// Renders a layered screen.
    render_screen: F,
    /// Title shown over root content.
    #[prop(into)]
    title: String,
    on_close: Callback<()>,
    #[prop(optional)] modal_class: Option<String>,
    children: ChildrenFn,
) -> impl IntoView
where
    S: LayeredScreen,
    F: Fn(S) -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    let dismiss = Callback::new(move |_: ()| {
        context.reset();
        on_close.run(());
    });

    // Screens react to being left through their own cleanup, so every exit
    // path (header arrow, Escape, dismissal) behaves the same.
    let go_back = Callback::new(move |_: ()| {
        if let Some(screen) = context.back() {
            log::debug!("left layered screen `{}`", screen.title());
        }
    });

    let escape = window_event_listener(ev::keydown, move |event: ev::KeyboardEvent| {
        if event.key() != "Escape" {
            return;
        }
        if context.stack.with_untracked(|stack| stack.is_empty()) {
            next_tick(move || dismiss.run(()));
        } else {
            next_tick(move || go_back.run(()));
        }
    });
    on_cleanup(move || {
        escape.remove();
        context.reset();
    });

    let title = Signal::derive(move || {
        context
            .top()
            .map(|screen| screen.title())
            .unwrap_or_else(|| title.clone())
    });

    view! {
        <ModalFrame
            on_close=dismiss
            on_back=go_back
            title=title
            show_back=Signal::derive(move || context.is_layered())
            modal_class=modal_class.unwrap_or_else(|| "layered-modal".to_string())
        >
            {move || match context.top() {
                Some(screen) => render_screen(screen).into_any(),
                None => children().into_any(),
            }}
        </ModalFrame>
    }
}
