//! Customers Page
//!
//! Customer directory: search, status filter, sortable columns,
//! create/edit form and inline delete.

use leptos::prelude::*;

use crate::api;
use crate::components::{
    list_phase, optional_text, DeleteConfirmButton, FilterSelect, FormActions, ListBody, Modal, PageHeader,
    SearchBar, SelectField, SortHeader, StatusBadge, TextArea, TextField,
};
use crate::listing::{self, format_date, ListQuery, SortSpec};
use crate::models::{Customer, CustomerDraft, CustomerStatus};
use crate::resource::{dispatch, use_collection};

/// Form fields of the create/edit modal
#[derive(Clone, Copy)]
struct CustomerForm {
    editing: RwSignal<Option<u32>>,
    name: RwSignal<String>,
    company: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    address: RwSignal<String>,
    status: RwSignal<String>,
    notes: RwSignal<String>,
}

impl CustomerForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            company: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            status: RwSignal::new(CustomerStatus::Lead.as_str().to_string()),
            notes: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, customer: Option<&Customer>) {
        let blank = Customer { status: CustomerStatus::Lead, ..Default::default() };
        let c = customer.unwrap_or(&blank);
        self.editing.set(customer.map(|c| c.id));
        self.name.set(c.name.clone());
        self.company.set(c.company.clone().unwrap_or_default());
        self.email.set(c.email.clone());
        self.phone.set(c.phone.clone());
        self.address.set(c.address.clone());
        self.status.set(c.status.as_str().to_string());
        self.notes.set(c.notes.clone().unwrap_or_default());
    }

    fn draft(&self) -> CustomerDraft {
        CustomerDraft {
            name: self.name.get_untracked().trim().to_string(),
            company: optional_text(&self.company.get_untracked()),
            email: self.email.get_untracked().trim().to_string(),
            phone: self.phone.get_untracked().trim().to_string(),
            address: self.address.get_untracked().trim().to_string(),
            status: CustomerStatus::parse(&self.status.get_untracked()),
            notes: optional_text(&self.notes.get_untracked()),
        }
    }
}

#[component]
pub fn CustomersPage() -> impl IntoView {
    let customers = use_collection::<Customer>();
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::asc("name")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get()).filter("status", status.get()).sorted(sort.get());
        customers.items.with(|items| listing::apply(items, &query))
    });
    let phase = Signal::derive(move || {
        list_phase(customers.loading.get(), customers.items.with(|i| i.len()), visible.with(|v| v.len()))
    });

    let form = CustomerForm::new();
    let form_open = RwSignal::new(false);
    let open_form = move |customer: Option<Customer>| {
        form.fill(customer.as_ref());
        form_open.set(true);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        if draft.name.is_empty() {
            crate::notify::alert("Customer name is required.");
            return;
        }
        let after = move || {
            form_open.set(false);
            customers.reload();
        };
        match form.editing.get_untracked() {
            Some(id) => dispatch(
                "Could not update customer",
                "Customer updated",
                async move { api::update::<Customer, _>(id, &draft).await },
                after,
            ),
            None => dispatch(
                "Could not create customer",
                "Customer created",
                async move { api::create::<Customer, _>(&draft).await },
                after,
            ),
        }
    };

    let delete = move |id: u32| {
        dispatch(
            "Could not delete customer",
            "Customer deleted",
            api::remove::<Customer>(id),
            move || customers.reload(),
        );
    };

    view! {
        <section class="page customers-page">
            <PageHeader title="Customers" count=Signal::derive(move || visible.with(|v| v.len()))>
                <button class="btn primary" on:click=move |_| open_form(None)>"+ New customer"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search name, company, email, phone, address" />
                <FilterSelect label="Status" value=status options=Signal::stored(CustomerStatus::options()) />
            </div>

            <ListBody phase=phase noun="customers">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Name" key="name" sort=sort />
                            <SortHeader label="Company" key="company" sort=sort />
                            <th>"Contact"</th>
                            <th>"Status"</th>
                            <SortHeader label="Created" key="created_at" sort=sort />
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|customer| {
                            let id = customer.id;
                            let row = customer.clone();
                            view! {
                                <tr class="clickable" on:click=move |_| open_form(Some(row.clone()))>
                                    <td>{customer.name.clone()}</td>
                                    <td>{customer.company.clone().unwrap_or_default()}</td>
                                    <td>
                                        <div>{customer.email.clone()}</div>
                                        <div class="muted">{customer.phone.clone()}</div>
                                    </td>
                                    <td><StatusBadge label=customer.status.label() tone=customer.status.tone() /></td>
                                    <td>{format_date(customer.created_at.as_deref())}</td>
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
                title=Signal::derive(move || if form.editing.get().is_some() { "Edit customer".to_string() } else { "New customer".to_string() })
                open=form_open
            >
                <form class="record-form" on:submit=on_submit>
                    <TextField label="Name" value=form.name required=true />
                    <TextField label="Company" value=form.company />
                    <TextField label="Email" value=form.email kind="email" />
                    <TextField label="Phone" value=form.phone kind="tel" />
                    <TextField label="Address" value=form.address />
                    <SelectField label="Status" value=form.status options=Signal::stored(CustomerStatus::options()) />
                    <TextArea label="Notes" value=form.notes />
                    <FormActions on_cancel=Callback::new(move |_| form_open.set(false)) />
                </form>
            </Modal>
        </section>
    }
}
