use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
}

impl NotificationKind {
    fn class(self) -> &'static str {
        match self {
            NotificationKind::Success => "notification notification--success",
            NotificationKind::Error => "notification notification--error",
            NotificationKind::Warning => "notification notification--warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Notice {
    id: u64,
    kind: NotificationKind,
    title: String,
    message: String,
}

/// App-wide transient messages, dismissed after `timeout_ms`.
#[derive(Clone, Copy)]
pub struct NotificationService {
    notices: RwSignal<Vec<Notice>>,
    next_id: RwSignal<u64>,
    timeout_ms: u32,
}

impl NotificationService {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
            timeout_ms,
        }
    }

    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) {
        self.show(NotificationKind::Success, title.into(), message.into());
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) {
        let message = message.into();
        log::error!("{}", message);
        self.show(NotificationKind::Error, title.into(), message);
    }

    pub fn warning(&self, title: impl Into<String>, message: impl Into<String>) {
        self.show(NotificationKind::Warning, title.into(), message.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|n| n.retain(|notice| notice.id != id));
    }

    fn show(&self, kind: NotificationKind, title: String, message: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.notices.update(|n| {
            n.push(Notice {
                id,
                kind,
                title,
                message,
            })
        });

        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(svc.timeout_ms).await;
            svc.dismiss(id);
        });
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>()
        .expect("NotificationService not provided in context (provide it in app root)")
}

/// Renders active notifications. Mounted once at the app root.
#[component]
pub fn NotificationHost() -> impl IntoView {
    let svc = use_notifications();

    view! {
        <div class="notification-host">
            <For
                each=move || svc.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.class() on:click=move |_| svc.dismiss(id)>
                            <div class="notification__title">{notice.title}</div>
                            <div class="notification__message">{notice.message}</div>
                        </div>
                    }
                }
            />
        </div>
    }
}
