use contracts::domain::discounts::CustomerGroupsResponse;
use leptos::prelude::*;
use thaw::*;

use super::api;
use super::model::{attachable_groups, AttachableGroup, CustomerGroupsQuery, SaveMode};
use crate::shared::commit::CommitScope;
use crate::shared::components::{HeaderCheckbox, TableCheckbox};
use crate::shared::notification::use_notifications;
use crate::shared::selection::SelectionMap;

/// Paged customer group picker layered over the edit-condition modal.
///
/// Groups already attached to the condition are shown but cannot be picked.
#[component]
pub fn AddCustomerGroupsScreen(
    /// Ids already attached to the condition
    #[prop(into)]
    existing: Signal<Vec<String>>,
    #[prop(into)] saving: Signal<bool>,
    on_save: Callback<(Vec<String>, SaveMode)>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let notifications = use_notifications();
    let scope = StoredValue::new(CommitScope::for_owner("add customer groups"));

    let query = RwSignal::new(CustomerGroupsQuery::default());
    let page = RwSignal::new(None::<CustomerGroupsResponse>);
    let loading = RwSignal::new(false);
    let search = RwSignal::new(String::new());
    let selected = RwSignal::new(SelectionMap::<()>::new());

    Effect::new(move |_| {
        let requested = query.get();
        loading.set(true);
        let sent = requested.clone();
        scope.get_value().commit(
            async move { api::fetch_customer_groups(&sent).await },
            move |result| {
                // a newer query owns the table now
                if query.get_untracked() != requested {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(response) => page.set(Some(response)),
                    Err(e) => notifications.error("Error loading customer groups", e),
                }
            },
        );
    });

    let rows = Memo::new(move |_| {
        let existing = existing.get();
        page.with(|p| {
            p.as_ref()
                .map(|p| attachable_groups(&p.customer_groups, &existing))
                .unwrap_or_default()
        })
    });
    let total = Signal::derive(move || page.with(|p| p.as_ref().map(|p| p.count).unwrap_or(0)));

    let header_state =
        Signal::derive(move || rows.with(|rows| selected.with(|s| s.header_state(rows))));
    let on_header_change = Callback::new(move |checked: bool| {
        if checked {
            rows.with_untracked(|rows| selected.update(|s| *s = s.select_all(rows, true, |_| ())));
        } else {
            selected.update(|s| *s = s.deselect_all());
        }
    });

    let run_search = move |_| {
        let term = search.get_untracked();
        query.update(|q| *q = q.search(&term));
    };
    let prev_page = move |_| {
        if let Some(prev) = query.with_untracked(|q| q.prev_page()) {
            query.set(prev);
        }
    };
    let next_page = move |_| {
        let total = total.get_untracked();
        if let Some(next) = query.with_untracked(|q| q.next_page(total)) {
            query.set(next);
        }
    };

    let save = move |mode: SaveMode| {
        let ids: Vec<String> = selected.with_untracked(|s| s.ids().map(str::to_string).collect());
        if ids.is_empty() {
            notifications.warning("Nothing selected", "Pick at least one customer group");
            return;
        }
        on_save.run((ids, mode));
    };

    let nothing_selected = Signal::derive(move || saving.get() || selected.with(|s| s.is_empty()));

    view! {
        <div class="add-customer-groups">
            <div class="add-customer-groups__search">
                <Input value=search placeholder="Search groups" />
                <Button size=ButtonSize::Small on_click=run_search>
                    "Search"
                </Button>
            </div>
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
                        each=move || rows.get()
                        key=|row: &AttachableGroup| (row.group.id.clone(), row.attached)
                        children=move |row: AttachableGroup| {
                            let AttachableGroup { group, attached } = row;
                            let id = group.id.clone();
                            let id_for_check = id.clone();
                            view! {
                                <tr class="table__row">
                                    <TableCheckbox
                                        checked=Signal::derive(move || {
                                            attached || selected.with(|s| s.contains(&id_for_check))
                                        })
                                        disabled=attached
                                        on_change=Callback::new(move |checked: bool| {
                                            selected.update(|s| {
                                                if s.contains(&id) != checked {
                                                    *s = s.toggle(&id, ());
                                                }
                                            });
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
            <div class="add-customer-groups__paging">
                <span>
                    {move || {
                        let shown = rows.with(|r| r.len());
                        query.with(|q| q.page_label(shown, total.get()))
                    }}
                </span>
                <Show when=move || loading.get()>
                    <span class="add-customer-groups__loading">"Loading..."</span>
                </Show>
                <Button
                    size=ButtonSize::Small
                    disabled=Signal::derive(move || query.with(|q| q.prev_page().is_none()))
                    on_click=prev_page
                >
                    "Prev"
                </Button>
                <Button
                    size=ButtonSize::Small
                    disabled=Signal::derive(move || {
                        let total = total.get();
                        query.with(|q| q.next_page(total).is_none())
                    })
                    on_click=next_page
                >
                    "Next"
                </Button>
            </div>
            <div class="modal__footer">
                <Button size=ButtonSize::Small on_click=move |_| on_cancel.run(())>
                    "Cancel"
                </Button>
                <Button
                    size=ButtonSize::Small
                    disabled=nothing_selected
                    on_click=move |_| save(SaveMode::GoBack)
                >
                    "Save and go back"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Small
                    disabled=nothing_selected
                    on_click=move |_| save(SaveMode::Close)
                >
                    "Save and close"
                </Button>
            </div>
        </div>
    }
}
