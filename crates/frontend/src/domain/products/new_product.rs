use contracts::domain::products::CreateProductRequest;
use leptos::prelude::*;
use serde_json::{json, Value};
use thaw::*;

use super::api;
use super::variants::model::{build_payload, AddVariantsValues};
use super::variants::AddVariantsForm;
use crate::shared::commit::CommitScope;
use crate::shared::form::{mount_failed, FieldRules, FormHandle, TextField};
use crate::shared::notification::use_notifications;

fn blank_product() -> Value {
    json!({
        "title": "",
        "variants": { "options": [], "entries": [] }
    })
}

/// Product title plus its options and variants
#[component]
pub fn NewProductForm() -> impl IntoView {
    let notifications = use_notifications();
    let scope = StoredValue::new(CommitScope::for_owner("new product"));
    let form = FormHandle::new(blank_product());
    let root = form.root();
    let saving = RwSignal::new(false);

    let submit = form.handle_submit(move |values: Value| {
        let title = values
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();
        let variants = values
            .get("variants")
            .cloned()
            .map(serde_json::from_value::<AddVariantsValues>)
            .unwrap_or_else(|| Ok(AddVariantsValues::default()));
        let payload = match variants.map_err(|e| e.to_string()).and_then(|v| {
            build_payload(&v).map_err(|e| e.to_string())
        }) {
            Ok(payload) => payload,
            Err(e) => {
                notifications.warning("Variants are incomplete", e);
                return;
            }
        };

        let request = CreateProductRequest { title, variants: payload };
        saving.set(true);
        scope.get_value().commit(
            async move { api::create_product(&request).await },
            move |result| {
                saving.set(false);
                match result {
                    Ok(product) => {
                        notifications.success("Product created", product.title);
                        form.reset(blank_product());
                    }
                    Err(e) => notifications.error("Error creating product", e),
                }
            },
        );
    });

    view! {
        <div class="new-product">
            <TextField
                form=root
                name="title"
                label="Title"
                rules=FieldRules::required("Title is required")
            />
            {match root.nested("variants") {
                Ok(variants) => view! { <AddVariantsForm form=variants /> }.into_any(),
                Err(e) => mount_failed(e),
            }}
            <div class="new-product__footer">
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Small
                    disabled=saving
                    on_click=move |_| submit()
                >
                    "Create product"
                </Button>
            </div>
        </div>
    }
}
