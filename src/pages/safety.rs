//! Safety Page
//!
//! Incident log. Each incident moves open → investigating → resolved.

use leptos::prelude::*;

use crate::api;
use crate::components::{
    list_phase, optional_text, FilterSelect, FormActions, ListBody, Modal, PageHeader, SearchBar, SelectField,
    SortHeader, StatusBadge, TextArea, TextField,
};
use crate::listing::{self, format_date, ListQuery, SortSpec};
use crate::models::{IncidentDraft, IncidentStatus, SafetyIncident, Severity};
use crate::resource::{confirm_then, dispatch, use_collection};

#[derive(Clone, Copy)]
struct IncidentForm {
    title: RwSignal<String>,
    description: RwSignal<String>,
    site_name: RwSignal<String>,
    reported_by: RwSignal<String>,
    severity: RwSignal<String>,
    occurred_at: RwSignal<String>,
}

impl IncidentForm {
    fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            site_name: RwSignal::new(String::new()),
            reported_by: RwSignal::new(String::new()),
            severity: RwSignal::new(Severity::Low.as_str().to_string()),
            occurred_at: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.title.set(String::new());
        self.description.set(String::new());
        self.site_name.set(String::new());
        self.reported_by.set(String::new());
        self.severity.set(Severity::Low.as_str().to_string());
        self.occurred_at.set(String::new());
    }

    fn draft(&self) -> IncidentDraft {
        IncidentDraft {
            title: self.title.get_untracked().trim().to_string(),
            description: self.description.get_untracked().trim().to_string(),
            site_name: self.site_name.get_untracked().trim().to_string(),
            reported_by: self.reported_by.get_untracked().trim().to_string(),
            severity: Severity::parse(&self.severity.get_untracked()),
            occurred_at: optional_text(&self.occurred_at.get_untracked()),
        }
    }
}

#[component]
pub fn SafetyPage() -> impl IntoView {
    let incidents = use_collection::<SafetyIncident>();
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let severity = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::desc("occurred_at")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get())
            .filter("status", status.get())
            .filter("severity", severity.get())
            .sorted(sort.get());
        incidents.items.with(|items| listing::apply(items, &query))
    });
    let open_count = Signal::derive(move || {
        incidents.items.with(|items| items.iter().filter(|i| i.status != IncidentStatus::Resolved).count())
    });
    let phase = Signal::derive(move || {
        list_phase(incidents.loading.get(), incidents.items.with(|i| i.len()), visible.with(|v| v.len()))
    });

    let form = IncidentForm::new();
    let form_open = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        if draft.title.is_empty() {
            crate::notify::alert("Describe the incident in the title.");
            return;
        }
        dispatch(
            "Could not report incident",
            "Incident reported",
            async move { api::create::<SafetyIncident, _>(&draft).await },
            move || {
                form_open.set(false);
                incidents.reload();
            },
        );
    };

    let advance = move |id: u32, title: String, next: IncidentStatus| {
        confirm_then(
            &format!("Mark \"{}\" as {}?", title, next.label().to_lowercase()),
            "Could not update incident",
            format!("Incident {}", next.label().to_lowercase()),
            || api::set_incident_status(id, next),
            move || incidents.reload(),
        );
    };

    view! {
        <section class="page safety-page">
            <PageHeader title="Safety incidents" count=Signal::derive(move || visible.with(|v| v.len()))>
                <span class="header-stat">{move || format!("{} unresolved", open_count.get())}</span>
                <button class="btn primary" on:click=move |_| { form.reset(); form_open.set(true); }>"+ Report incident"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search title, site, reporter, details" />
                <FilterSelect label="Severity" value=severity options=Signal::stored(Severity::options()) />
                <FilterSelect label="Status" value=status options=Signal::stored(IncidentStatus::options()) />
            </div>

            <ListBody phase=phase noun="incidents">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Incident" key="title" sort=sort />
                            <th>"Site"</th>
                            <th>"Reported by"</th>
                            <SortHeader label="Severity" key="severity" sort=sort />
                            <SortHeader label="Occurred" key="occurred_at" sort=sort />
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|incident| {
                            let id = incident.id;
                            let title = incident.title.clone();
                            view! {
                                <tr>
                                    <td>
                                        <div>{incident.title.clone()}</div>
                                        <div class="muted">{incident.description.clone()}</div>
                                    </td>
                                    <td>{incident.site_name.clone()}</td>
                                    <td>{incident.reported_by.clone()}</td>
                                    <td><StatusBadge label=incident.severity.label() tone=incident.severity.tone() /></td>
                                    <td>{format_date(incident.occurred_at.as_deref())}</td>
                                    <td><StatusBadge label=incident.status.label() tone=incident.status.tone() /></td>
                                    <td class="row-actions">
                                        {incident.status.next().map(|next| view! {
                                            <button class="btn small" on:click=move |_| advance(id, title.clone(), next)>
                                                {format!("Mark {}", next.label().to_lowercase())}
                                            </button>
                                        })}
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </ListBody>

            <Modal title=Signal::derive(|| "Report incident".to_string()) open=form_open>
                <form class="record-form" on:submit=on_submit>
                    <TextField label="Title" value=form.title required=true />
                    <TextField label="Site" value=form.site_name />
                    <TextField label="Reported by" value=form.reported_by />
                    <SelectField label="Severity" value=form.severity options=Signal::stored(Severity::options()) />
                    <TextField label="Occurred" value=form.occurred_at kind="datetime-local" />
                    <TextArea label="Details" value=form.description />
                    <FormActions submit_label="Report" on_cancel=Callback::new(move |_| form_open.set(false)) />
                </form>
            </Modal>
        </section>
    }
}
