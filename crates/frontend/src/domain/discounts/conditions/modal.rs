use contracts::domain::discounts::{ConditionOperator, CustomerGroup, DiscountCondition};
use leptos::prelude::*;
use thaw::*;

use super::add_customer_groups::AddCustomerGroupsScreen;
use super::api;
use super::model::{EditConditionScreen, SaveMode};
use crate::shared::commit::CommitScope;
use crate::shared::components::{HeaderCheckbox, TableCheckbox};
use crate::shared::layered_modal::{LayeredModal, LayeredModalContext};
use crate::shared::notification::use_notifications;
use crate::shared::selection::SelectedIds;

/// Edit the customer groups of a discount condition
#[component]
pub fn EditConditionModal(
    discount_id: String,
    condition_id: String,
    on_close: Callback<()>,
) -> impl IntoView {
    let notifications = use_notifications();
    let scope = StoredValue::new(CommitScope::for_owner("edit condition"));
    let ids = StoredValue::new((discount_id, condition_id));

    let layers = LayeredModalContext::<EditConditionScreen>::new();
    let condition = RwSignal::new(None::<DiscountCondition>);
    let selected = RwSignal::new(SelectedIds::new());
    let busy = RwSignal::new(false);

    let refetch = move || {
        let (discount_id, condition_id) = ids.get_value();
        scope.get_value().commit(
            async move { api::fetch_condition(&discount_id, &condition_id).await },
            move |result| match result {
                Ok(fetched) => condition.set(Some(fetched)),
                Err(e) => notifications.error("Error loading condition", e),
            },
        );
    };
    refetch();

    let groups = Memo::new(move |_| {
        condition.with(|c| c.as_ref().map(|c| c.customer_groups.clone()).unwrap_or_default())
    });
    let existing_ids = Signal::derive(move || {
        groups.with(|g| g.iter().map(|g| g.id.clone()).collect::<Vec<_>>())
    });

    let header_state = Signal::derive(move || {
        groups.with(|g| selected.with(|s| s.header_state(g.iter().map(|g| g.id.as_str()))))
    });
    let on_header_change = Callback::new(move |checked: bool| {
        let page = existing_ids.get_untracked();
        selected.update(|s| *s = s.select_page(page.iter().map(String::as_str), checked));
    });

    let deselect = move |_| selected.update(|s| *s = s.clear());

    let remove = move |_| {
        let doomed = selected.get_untracked().ids();
        if doomed.is_empty() {
            return;
        }
        busy.set(true);
        let (discount_id, condition_id) = ids.get_value();
        scope.get_value().commit(
            async move { api::remove_resources(&discount_id, &condition_id, doomed).await },
            move |result| {
                busy.set(false);
                match result {
                    Ok(()) => {
                        selected.update(|s| *s = s.clear());
                        notifications.success("Success", "Resources removed");
                        refetch();
                    }
                    Err(e) => notifications.error("Failed to remove resources", e),
                }
            },
        );
    };

    let on_save = Callback::new(move |(added, mode): (Vec<String>, SaveMode)| {
        busy.set(true);
        let (discount_id, condition_id) = ids.get_value();
        scope.get_value().commit(
            async move { api::add_resources(&discount_id, &condition_id, added).await },
            move |result| {
                busy.set(false);
                match result {
                    Ok(()) => {
                        notifications.success("Success", "Resources added");
                        match mode {
                            SaveMode::GoBack => {
                                refetch();
                                layers.pop();
                            }
                            SaveMode::Close => {
                                layers.reset();
                                on_close.run(());
                            }
                        }
                    }
                    Err(e) => notifications.error("Failed to add resources", e),
                }
            },
        );
    });

    let render_screen = move |screen: EditConditionScreen| match screen {
        EditConditionScreen::AddCustomerGroups => view! {
            <AddCustomerGroupsScreen
                existing=existing_ids
                saving=busy
                on_save=on_save
                on_cancel=Callback::new(move |_| {
                    layers.back();
                })
            />
        },
    };

    let operator_label = move || {
        condition.with(|c| match c.as_ref().map(|c| c.operator) {
            Some(ConditionOperator::In) => "Applies to these customer groups",
            Some(ConditionOperator::NotIn) => "Applies to all customer groups except these",
            None => "",
        })
    };

    view! {
        <LayeredModal
            context=layers
            render_screen=render_screen
            title="Edit condition"
            on_close=on_close
        >
            <div class="edit-condition">
                <p class="edit-condition__operator">{operator_label}</p>
                <div class="edit-condition__actions">
                    <span>{move || format!("{} selected", selected.with(|s| s.len()))}</span>
                    <Button
                        size=ButtonSize::Small
                        disabled=Signal::derive(move || selected.with(|s| s.is_empty()))
                        on_click=deselect
                    >
                        "Deselect"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        disabled=Signal::derive(move || busy.get() || selected.with(|s| s.is_empty()))
                        on_click=remove
                    >
                        "Remove"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        on_click=move |_| layers.push(EditConditionScreen::AddCustomerGroups)
                    >
                        "Add"
                    </Button>
                </div>
                <Show
                    when=move || groups.with(|g| !g.is_empty())
                    fallback=|| view! { <p class="edit-condition__empty">"No customer groups yet"</p> }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <HeaderCheckbox state=header_state on_change=on_header_change />
                                <th class="table__cell">"Name"</th>
                                <th class="table__cell">"Members"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || groups.get()
                                key=|group: &CustomerGroup| group.id.clone()
                                children=move |group: CustomerGroup| {
                                    let id = group.id.clone();
                                    let id_for_check = id.clone();
                                    view! {
                                        <tr class="table__row">
                                            <TableCheckbox
                                                checked=Signal::derive(move || {
                                                    selected.with(|s| s.contains(&id_for_check))
                                                })
                                                on_change=Callback::new(move |checked: bool| {
                                                    selected.update(|s| *s = s.set(&id, checked));
                                                })
                                            />
                                            <td class="table__cell">{group.name}</td>
                                            <td class="table__cell">
                                                {group.customer_count.map(|c| c.to_string()).unwrap_or_default()}
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
                <div class="modal__footer">
                    <Button
                        appearance=ButtonAppearance::Primary
                        size=ButtonSize::Small
                        on_click=move |_| on_close.run(())
                    >
                        "Done"
                    </Button>
                </div>
            </div>
        </LayeredModal>
    }
}
