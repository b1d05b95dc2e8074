use crate::domain::discounts::DiscountsPanel;
use crate::domain::orders::OrdersPanel;
use crate::domain::products::NewProductForm;
use crate::shared::config::{default_config, load_config, set_active_api};
use crate::shared::notification::{NotificationHost, NotificationService};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config().unwrap_or_else(|e| {
        log::warn!("config override ignored: {:#}", e);
        default_config()
    });

    // Services shared by every flow
    set_active_api(config.api.clone());
    provide_context(config.api.clone());
    provide_context(NotificationService::new(config.notifications.timeout_ms));
    provide_context(config);

    view! {
        <main class="dashboard">
            <OrdersPanel />
            <DiscountsPanel />
            <section class="dashboard-panel">
                <h2>"Products"</h2>
                <NewProductForm />
            </section>
        </main>
        <NotificationHost />
    }
}
