//! Vendors Page

use leptos::prelude::*;

use crate::api;
use crate::components::{
    list_phase, plain_options, DeleteConfirmButton, FilterSelect, FormActions, ListBody, Modal, PageHeader,
    SearchBar, SortHeader, TextField,
};
use crate::listing::{self, ListQuery, SortSpec};
use crate::models::{Vendor, VendorDraft};
use crate::resource::{dispatch, use_collection};

#[derive(Clone, Copy)]
struct VendorForm {
    editing: RwSignal<Option<u32>>,
    name: RwSignal<String>,
    contact: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    category: RwSignal<String>,
}

impl VendorForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            contact: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, vendor: Option<&Vendor>) {
        let blank = Vendor::default();
        let v = vendor.unwrap_or(&blank);
        self.editing.set(vendor.map(|v| v.id));
        self.name.set(v.name.clone());
        self.contact.set(v.contact.clone());
        self.email.set(v.email.clone());
        self.phone.set(v.phone.clone());
        self.category.set(v.category.clone());
    }

    fn draft(&self) -> VendorDraft {
        VendorDraft {
            name: self.name.get_untracked().trim().to_string(),
            contact: self.contact.get_untracked().trim().to_string(),
            email: self.email.get_untracked().trim().to_string(),
            phone: self.phone.get_untracked().trim().to_string(),
            category: self.category.get_untracked().trim().to_string(),
        }
    }
}

#[component]
pub fn VendorsPage() -> impl IntoView {
    let vendors = use_collection::<Vendor>();
    let search = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::asc("name")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get()).filter("category", category.get()).sorted(sort.get());
        vendors.items.with(|items| listing::apply(items, &query))
    });
    let categories = Signal::derive(move || {
        plain_options(vendors.items.with(|items| listing::distinct_values(items, "category")))
    });
    let phase = Signal::derive(move || {
        list_phase(vendors.loading.get(), vendors.items.with(|i| i.len()), visible.with(|v| v.len()))
    });

    let form = VendorForm::new();
    let form_open = RwSignal::new(false);
    let open_form = move |vendor: Option<Vendor>| {
        form.fill(vendor.as_ref());
        form_open.set(true);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        if draft.name.is_empty() {
            crate::notify::alert("Vendor name is required.");
            return;
        }
        let after = move || {
            form_open.set(false);
            vendors.reload();
        };
        match form.editing.get_untracked() {
            Some(id) => dispatch(
                "Could not update vendor",
                "Vendor updated",
                async move { api::update::<Vendor, _>(id, &draft).await },
                after,
            ),
            None => dispatch(
                "Could not create vendor",
                "Vendor created",
                async move { api::create::<Vendor, _>(&draft).await },
                after,
            ),
        }
    };

    let delete = move |id: u32| {
        dispatch("Could not delete vendor", "Vendor deleted", api::remove::<Vendor>(id), move || vendors.reload());
    };

    view! {
        <section class="page vendors-page">
            <PageHeader title="Vendors" count=Signal::derive(move || visible.with(|v| v.len()))>
                <button class="btn primary" on:click=move |_| open_form(None)>"+ New vendor"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search name, contact, email" />
                <FilterSelect label="Category" value=category options=categories />
            </div>

            <ListBody phase=phase noun="vendors">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Name" key="name" sort=sort />
                            <th>"Contact"</th>
                            <th>"Email"</th>
                            <th>"Phone"</th>
                            <SortHeader label="Category" key="category" sort=sort />
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|vendor| {
                            let id = vendor.id;
                            let row = vendor.clone();
                            view! {
                                <tr class="clickable" on:click=move |_| open_form(Some(row.clone()))>
                                    <td>{vendor.name}</td>
                                    <td>{vendor.contact}</td>
                                    <td>{vendor.email}</td>
                                    <td>{vendor.phone}</td>
                                    <td>{vendor.category}</td>
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
                title=Signal::derive(move || if form.editing.get().is_some() { "Edit vendor".to_string() } else { "New vendor".to_string() })
                open=form_open
            >
                <form class="record-form" on:submit=on_submit>
                    <TextField label="Name" value=form.name required=true />
                    <TextField label="Contact" value=form.contact />
                    <TextField label="Email" value=form.email kind="email" />
                    <TextField label="Phone" value=form.phone kind="tel" />
                    <TextField label="Category" value=form.category placeholder="fuel, salt, repairs…" />
                    <FormActions on_cancel=Callback::new(move |_| form_open.set(false)) />
                </form>
            </Modal>
        </section>
    }
}
