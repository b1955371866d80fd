//! Employees Page
//!
//! HR roster with department and status filters.

use leptos::prelude::*;

use crate::api;
use crate::components::{
    list_phase, optional_text, plain_options, DeleteConfirmButton, FilterSelect, FormActions, ListBody, Modal,
    PageHeader, SearchBar, SelectField, SortHeader, StatusBadge, TextField,
};
use crate::listing::{self, format_date, ListQuery, SortSpec};
use crate::models::{Employee, EmployeeDraft, EmployeeStatus};
use crate::resource::{dispatch, use_collection};

#[derive(Clone, Copy)]
struct EmployeeForm {
    editing: RwSignal<Option<u32>>,
    name: RwSignal<String>,
    title: RwSignal<String>,
    department: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    hire_date: RwSignal<String>,
    status: RwSignal<String>,
}

impl EmployeeForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            title: RwSignal::new(String::new()),
            department: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            hire_date: RwSignal::new(String::new()),
            status: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, employee: Option<&Employee>) {
        let blank = Employee { status: EmployeeStatus::Active, ..Default::default() };
        let e = employee.unwrap_or(&blank);
        self.editing.set(employee.map(|e| e.id));
        self.name.set(e.name.clone());
        self.title.set(e.title.clone());
        self.department.set(e.department.clone());
        self.email.set(e.email.clone());
        self.phone.set(e.phone.clone());
        self.hire_date.set(e.hire_date.as_deref().map(|d| format_date(Some(d))).unwrap_or_default());
        self.status.set(e.status.as_str().to_string());
    }

    fn draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.get_untracked().trim().to_string(),
            title: self.title.get_untracked().trim().to_string(),
            department: self.department.get_untracked().trim().to_string(),
            email: self.email.get_untracked().trim().to_string(),
            phone: self.phone.get_untracked().trim().to_string(),
            hire_date: optional_text(&self.hire_date.get_untracked()),
            status: EmployeeStatus::parse(&self.status.get_untracked()),
        }
    }
}

#[component]
pub fn EmployeesPage() -> impl IntoView {
    let employees = use_collection::<Employee>();
    let search = RwSignal::new(String::new());
    let department = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::asc("name")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get())
            .filter("department", department.get())
            .filter("status", status.get())
            .sorted(sort.get());
        employees.items.with(|items| listing::apply(items, &query))
    });
    let departments = Signal::derive(move || {
        plain_options(employees.items.with(|items| listing::distinct_values(items, "department")))
    });
    let phase = Signal::derive(move || {
        list_phase(employees.loading.get(), employees.items.with(|i| i.len()), visible.with(|v| v.len()))
    });

    let form = EmployeeForm::new();
    let form_open = RwSignal::new(false);
    let open_form = move |employee: Option<Employee>| {
        form.fill(employee.as_ref());
        form_open.set(true);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        if draft.name.is_empty() {
            crate::notify::alert("Employee name is required.");
            return;
        }
        let after = move || {
            form_open.set(false);
            employees.reload();
        };
        match form.editing.get_untracked() {
            Some(id) => dispatch(
                "Could not update employee",
                "Employee updated",
                async move { api::update::<Employee, _>(id, &draft).await },
                after,
            ),
            None => dispatch(
                "Could not add employee",
                "Employee added",
                async move { api::create::<Employee, _>(&draft).await },
                after,
            ),
        }
    };

    let delete = move |id: u32| {
        dispatch("Could not remove employee", "Employee removed", api::remove::<Employee>(id), move || {
            employees.reload()
        });
    };

    view! {
        <section class="page employees-page">
            <PageHeader title="Employees" count=Signal::derive(move || visible.with(|v| v.len()))>
                <button class="btn primary" on:click=move |_| open_form(None)>"+ Add employee"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search name, title, email, phone" />
                <FilterSelect label="Department" value=department options=departments />
                <FilterSelect label="Status" value=status options=Signal::stored(EmployeeStatus::options()) />
            </div>

            <ListBody phase=phase noun="employees">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Name" key="name" sort=sort />
                            <SortHeader label="Title" key="title" sort=sort />
                            <SortHeader label="Department" key="department" sort=sort />
                            <th>"Contact"</th>
                            <SortHeader label="Hired" key="hire_date" sort=sort />
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|employee| {
                            let id = employee.id;
                            let row = employee.clone();
                            view! {
                                <tr class="clickable" on:click=move |_| open_form(Some(row.clone()))>
                                    <td>{employee.name.clone()}</td>
                                    <td>{employee.title.clone()}</td>
                                    <td>{employee.department.clone()}</td>
                                    <td>
                                        <div>{employee.email.clone()}</div>
                                        <div class="muted">{employee.phone.clone()}</div>
                                    </td>
                                    <td>{format_date(employee.hire_date.as_deref())}</td>
                                    <td><StatusBadge label=employee.status.label() tone=employee.status.tone() /></td>
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
                title=Signal::derive(move || if form.editing.get().is_some() { "Edit employee".to_string() } else { "Add employee".to_string() })
                open=form_open
            >
                <form class="record-form" on:submit=on_submit>
                    <TextField label="Name" value=form.name required=true />
                    <TextField label="Job title" value=form.title />
                    <TextField label="Department" value=form.department />
                    <TextField label="Email" value=form.email kind="email" />
                    <TextField label="Phone" value=form.phone kind="tel" />
                    <TextField label="Hire date" value=form.hire_date kind="date" />
                    <SelectField label="Status" value=form.status options=Signal::stored(EmployeeStatus::options()) />
                    <FormActions on_cancel=Callback::new(move |_| form_open.set(false)) />
                </form>
            </Modal>
        </section>
    }
}
