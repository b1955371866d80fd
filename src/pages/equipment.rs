//! Equipment Page
//!
//! Fleet inventory. Status changes go straight to `PATCH /equipment/{id}`
//! from the row's dropdown.

use leptos::prelude::*;

use crate::api;
use crate::components::{
    list_phase, optional_text, plain_options, DeleteConfirmButton, FilterSelect, FormActions, ListBody, Modal,
    PageHeader, SearchBar, SelectField, SortHeader, TextField,
};
use crate::listing::{self, format_date, ListQuery, SortSpec};
use crate::models::{Equipment, EquipmentDraft, EquipmentStatus};
use crate::resource::{dispatch, use_collection};

#[derive(Clone, Copy)]
struct EquipmentForm {
    editing: RwSignal<Option<u32>>,
    name: RwSignal<String>,
    kind: RwSignal<String>,
    serial_number: RwSignal<String>,
    status: RwSignal<String>,
    assigned_to: RwSignal<String>,
}

impl EquipmentForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            kind: RwSignal::new(String::new()),
            serial_number: RwSignal::new(String::new()),
            status: RwSignal::new(String::new()),
            assigned_to: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, asset: Option<&Equipment>) {
        let blank = Equipment { status: EquipmentStatus::Available, ..Default::default() };
        let a = asset.unwrap_or(&blank);
        self.editing.set(asset.map(|a| a.id));
        self.name.set(a.name.clone());
        self.kind.set(a.kind.clone());
        self.serial_number.set(a.serial_number.clone());
        self.status.set(a.status.as_str().to_string());
        self.assigned_to.set(a.assigned_to.clone().unwrap_or_default());
    }

    fn draft(&self) -> EquipmentDraft {
        EquipmentDraft {
            name: self.name.get_untracked().trim().to_string(),
            kind: self.kind.get_untracked().trim().to_string(),
            serial_number: self.serial_number.get_untracked().trim().to_string(),
            status: EquipmentStatus::parse(&self.status.get_untracked()),
            assigned_to: optional_text(&self.assigned_to.get_untracked()),
        }
    }
}

#[component]
pub fn EquipmentPage() -> impl IntoView {
    let equipment = use_collection::<Equipment>();
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let kind = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::asc("name")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get())
            .filter("status", status.get())
            .filter("kind", kind.get())
            .sorted(sort.get());
        equipment.items.with(|items| listing::apply(items, &query))
    });
    let kinds = Signal::derive(move || plain_options(equipment.items.with(|items| listing::distinct_values(items, "kind"))));
    let phase = Signal::derive(move || {
        list_phase(equipment.loading.get(), equipment.items.with(|i| i.len()), visible.with(|v| v.len()))
    });

    let form = EquipmentForm::new();
    let form_open = RwSignal::new(false);
    let open_form = move |asset: Option<Equipment>| {
        form.fill(asset.as_ref());
        form_open.set(true);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        if draft.name.is_empty() {
            crate::notify::alert("Equipment name is required.");
            return;
        }
        let after = move || {
            form_open.set(false);
            equipment.reload();
        };
        match form.editing.get_untracked() {
            Some(id) => dispatch(
                "Could not update equipment",
                "Equipment updated",
                async move { api::update::<Equipment, _>(id, &draft).await },
                after,
            ),
            None => dispatch(
                "Could not add equipment",
                "Equipment added",
                async move { api::create::<Equipment, _>(&draft).await },
                after,
            ),
        }
    };

    let change_status = move |id: u32, raw: String| {
        let next = EquipmentStatus::parse(&raw);
        if next == EquipmentStatus::Unknown {
            return;
        }
        dispatch(
            "Could not change equipment status",
            format!("Marked {}", next.label().to_lowercase()),
            api::set_equipment_status(id, next),
            move || equipment.reload(),
        );
    };

    let delete = move |id: u32| {
        dispatch("Could not delete equipment", "Equipment deleted", api::remove::<Equipment>(id), move || {
            equipment.reload()
        });
    };

    view! {
        <section class="page equipment-page">
            <PageHeader title="Equipment" count=Signal::derive(move || visible.with(|v| v.len()))>
                <button class="btn primary" on:click=move |_| open_form(None)>"+ Add equipment"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search name, serial, type, operator" />
                <FilterSelect label="Type" value=kind options=kinds />
                <FilterSelect label="Status" value=status options=Signal::stored(EquipmentStatus::options()) />
            </div>

            <ListBody phase=phase noun="equipment">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Name" key="name" sort=sort />
                            <SortHeader label="Type" key="kind" sort=sort />
                            <th>"Serial"</th>
                            <th>"Assigned to"</th>
                            <SortHeader label="Last service" key="last_service" sort=sort />
                            <SortHeader label="Status" key="status" sort=sort />
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|asset| {
                            let id = asset.id;
                            let current = asset.status;
                            let row = asset.clone();
                            view! {
                                <tr>
                                    <td class="clickable" on:click=move |_| open_form(Some(row.clone()))>{asset.name.clone()}</td>
                                    <td>{asset.kind.clone()}</td>
                                    <td class="mono">{asset.serial_number.clone()}</td>
                                    <td>{asset.assigned_to.clone().unwrap_or_else(|| "—".to_string())}</td>
                                    <td>{format_date(asset.last_service.as_deref())}</td>
                                    <td>
                                        <select
                                            class=current.tone().class()
                                            on:change=move |ev| change_status(id, event_target_value(&ev))
                                        >
                                            {EquipmentStatus::ALL.iter().map(|s| view! {
                                                <option value=s.as_str() selected={*s == current}>{s.label()}</option>
                                            }).collect_view()}
                                        </select>
                                    </td>
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
                title=Signal::derive(move || if form.editing.get().is_some() { "Edit equipment".to_string() } else { "Add equipment".to_string() })
                open=form_open
            >
                <form class="record-form" on:submit=on_submit>
                    <TextField label="Name" value=form.name required=true />
                    <TextField label="Type" value=form.kind placeholder="plow, salter, loader…" />
                    <TextField label="Serial number" value=form.serial_number />
                    <SelectField label="Status" value=form.status options=Signal::stored(EquipmentStatus::options()) />
                    <TextField label="Assigned to" value=form.assigned_to />
                    <FormActions on_cancel=Callback::new(move |_| form_open.set(false)) />
                </form>
            </Modal>
        </section>
    }
}
