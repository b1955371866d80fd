//! Sites Page
//!
//! Service locations per customer. The detail panel lists a site's
//! geofences; activating one is confirmed first since the API switches
//! off whichever fence was active.

use leptos::prelude::*;

use crate::api;
use crate::components::{
    list_phase, optional_id, optional_text, DeleteConfirmButton, EmptyState, FilterSelect, FormActions, ListBody,
    Modal, NumberField, PageHeader, SearchBar, SelectField, SortHeader, StatusBadge, TextArea, TextField,
};
use crate::listing::{self, ListQuery, SortSpec};
use crate::models::{Customer, Geofence, GeofenceDraft, Site, SiteDraft, SiteStatus};
use crate::resource::{confirm_then, dispatch, use_collection, use_collection_with};
use crate::totals::parse_amount;

#[derive(Clone, Copy)]
struct SiteForm {
    editing: RwSignal<Option<u32>>,
    name: RwSignal<String>,
    customer_id: RwSignal<String>,
    address: RwSignal<String>,
    status: RwSignal<String>,
    notes: RwSignal<String>,
}

impl SiteForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            customer_id: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            status: RwSignal::new(String::new()),
            notes: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, site: Option<&Site>) {
        let blank = Site { status: SiteStatus::Active, ..Default::default() };
        let s = site.unwrap_or(&blank);
        self.editing.set(site.map(|s| s.id));
        self.name.set(s.name.clone());
        self.customer_id.set(s.customer_id.map(|id| id.to_string()).unwrap_or_default());
        self.address.set(s.address.clone());
        self.status.set(s.status.as_str().to_string());
        self.notes.set(s.notes.clone().unwrap_or_default());
    }

    fn draft(&self) -> SiteDraft {
        SiteDraft {
            name: self.name.get_untracked().trim().to_string(),
            customer_id: optional_id(&self.customer_id.get_untracked()),
            address: self.address.get_untracked().trim().to_string(),
            status: SiteStatus::parse(&self.status.get_untracked()),
            notes: optional_text(&self.notes.get_untracked()),
        }
    }
}

fn customer_options(customers: &[Customer]) -> Vec<(String, String)> {
    let mut options: Vec<(String, String)> = customers.iter().map(|c| (c.id.to_string(), c.name.clone())).collect();
    options.sort_by_key(|(_, name)| name.to_lowercase());
    options
}

#[component]
pub fn SitesPage() -> impl IntoView {
    let sites = use_collection::<Site>();
    let customers = use_collection::<Customer>();
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let customer = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::asc("name")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get())
            .filter("status", status.get())
            .filter("customer", customer.get())
            .sorted(sort.get());
        sites.items.with(|items| listing::apply(items, &query))
    });
    let customer_choices = Signal::derive(move || customers.items.with(|c| customer_options(c)));
    let phase = Signal::derive(move || {
        list_phase(sites.loading.get(), sites.items.with(|i| i.len()), visible.with(|v| v.len()))
    });

    let form = SiteForm::new();
    let form_open = RwSignal::new(false);
    let open_form = move |site: Option<Site>| {
        form.fill(site.as_ref());
        form_open.set(true);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        if draft.name.is_empty() {
            crate::notify::alert("Site name is required.");
            return;
        }
        let after = move || {
            form_open.set(false);
            sites.reload();
        };
        match form.editing.get_untracked() {
            Some(id) => dispatch(
                "Could not update site",
                "Site updated",
                async move { api::update::<Site, _>(id, &draft).await },
                after,
            ),
            None => dispatch(
                "Could not create site",
                "Site created",
                async move { api::create::<Site, _>(&draft).await },
                after,
            ),
        }
    };

    let delete = move |id: u32| {
        dispatch("Could not delete site", "Site deleted", api::remove::<Site>(id), move || sites.reload());
    };

    // Geofence panel
    let selected = RwSignal::new(None::<Site>);
    let detail_open = RwSignal::new(false);
    let geofences = use_collection_with("geofences", move || {
        let site_id = selected.with(|s| s.as_ref().map(|s| s.id));
        async move {
            match site_id {
                Some(id) => api::list_geofences(id).await,
                None => Ok(Vec::new()),
            }
        }
    });
    let fence_name = RwSignal::new(String::new());
    let fence_radius = RwSignal::new(String::from("50"));

    let open_detail = move |site: Site| {
        selected.set(Some(site));
        fence_name.set(String::new());
        detail_open.set(true);
    };

    let add_geofence = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(site_id) = selected.with_untracked(|s| s.as_ref().map(|s| s.id)) else { return };
        let draft = GeofenceDraft {
            name: fence_name.get_untracked().trim().to_string(),
            radius_m: parse_amount(&fence_radius.get_untracked()),
        };
        if draft.name.is_empty() || draft.radius_m <= 0.0 {
            crate::notify::alert("A geofence needs a name and a positive radius.");
            return;
        }
        dispatch(
            "Could not add geofence",
            "Geofence added",
            async move { api::create_geofence(site_id, &draft).await },
            move || {
                fence_name.set(String::new());
                geofences.reload();
                sites.reload();
            },
        );
    };

    let activate = move |fence: Geofence| {
        confirm_then(
            &format!("Make \"{}\" the active geofence? The current one will be deactivated.", fence.name),
            "Could not activate geofence",
            "Geofence activated",
            || api::activate_geofence(fence.site_id, fence.id),
            move || {
                geofences.reload();
                sites.reload();
            },
        );
    };

    view! {
        <section class="page sites-page">
            <PageHeader title="Sites" count=Signal::derive(move || visible.with(|v| v.len()))>
                <button class="btn primary" on:click=move |_| open_form(None)>"+ New site"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search site, address, customer" />
                <FilterSelect label="Customer" value=customer options=customer_choices />
                <FilterSelect label="Status" value=status options=Signal::stored(SiteStatus::options()) />
            </div>

            <ListBody phase=phase noun="sites">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Site" key="name" sort=sort />
                            <SortHeader label="Customer" key="customer" sort=sort />
                            <SortHeader label="Address" key="address" sort=sort />
                            <th>"Geofence"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|site| {
                            let id = site.id;
                            let fence = site.active_geofence().map(|g| g.name.clone()).unwrap_or_else(|| "None".to_string());
                            let for_edit = site.clone();
                            let for_detail = site.clone();
                            view! {
                                <tr>
                                    <td class="clickable" on:click=move |_| open_form(Some(for_edit.clone()))>{site.name.clone()}</td>
                                    <td>{site.customer_name.clone()}</td>
                                    <td>{site.address.clone()}</td>
                                    <td>
                                        <button class="link" on:click=move |_| open_detail(for_detail.clone())>{fence}</button>
                                    </td>
                                    <td><StatusBadge label=site.status.label() tone=site.status.tone() /></td>
                                    <td class="row-actions">
                                        <DeleteConfirmButton button_class="row-delete" on_confirm=move |_| delete(id) />
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </ListBody>

            <Modal
                title=Signal::derive(move || if form.editing.get().is_some() { "Edit site".to_string() } else { "New site".to_string() })
                open=form_open
            >
                <form class="record-form" on:submit=on_submit>
                    <TextField label="Name" value=form.name required=true />
                    <SelectField label="Customer" value=form.customer_id options=customer_choices blank="No customer" />
                    <TextField label="Address" value=form.address />
                    <SelectField label="Status" value=form.status options=Signal::stored(SiteStatus::options()) />
                    <TextArea label="Notes" value=form.notes />
                    <FormActions on_cancel=Callback::new(move |_| form_open.set(false)) />
                </form>
            </Modal>

            <Modal
                title=Signal::derive(move || selected.with(|s| s.as_ref().map(|s| format!("Geofences · {}", s.name)).unwrap_or_default()))
                open=detail_open
            >
                {move || if geofences.is_empty() {
                    view! { <EmptyState message="No geofences for this site." /> }.into_any()
                } else {
                    view! {
                        <ul class="geofence-list">
                            {geofences.get().into_iter().map(|fence| {
                                let active = fence.active;
                                let label = format!("{} · {} m", fence.name, fence.radius_m);
                                view! {
                                    <li class:active=active>
                                        <span>{label}</span>
                                        {if active {
                                            view! { <span class="badge success">"Active"</span> }.into_any()
                                        } else {
                                            view! {
                                                <button class="btn small" on:click=move |_| activate(fence.clone())>"Activate"</button>
                                            }.into_any()
                                        }}
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    }.into_any()
                }}
                <form class="inline-form" on:submit=add_geofence>
                    <TextField label="New geofence" value=fence_name placeholder="Main lot" />
                    <NumberField label="Radius (m)" value=fence_radius step="1" />
                    <button type="submit" class="btn">"Add"</button>
                </form>
            </Modal>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_options_sorted_by_name() {
        let customers = vec![
            Customer { id: 2, name: "northgate HOA".into(), ..Default::default() },
            Customer { id: 9, name: "Acme Plaza".into(), ..Default::default() },
        ];
        assert_eq!(
            customer_options(&customers),
            vec![("9".to_string(), "Acme Plaza".to_string()), ("2".to_string(), "northgate HOA".to_string())]
        );
    }
}
