//! Workflows Page
//!
//! Automations: a trigger event plus an ordered list of steps. Steps are
//! reordered with up/down buttons; workflows can be paused without
//! deleting them.

use leptos::prelude::*;

use crate::api;
use crate::components::{
    list_phase, DeleteConfirmButton, FilterSelect, FormActions, ListBody, Modal, PageHeader, SearchBar,
    SelectField, SortHeader, StatusBadge, TextField,
};
use crate::listing::{self, format_date, ListQuery, SortSpec};
use crate::models::{shift_action, Tone, Workflow, WorkflowAction, WorkflowActionKind, WorkflowDraft, WorkflowTrigger};
use crate::notify;
use crate::resource::{confirm_then, dispatch, use_collection};

fn active_options() -> Vec<(String, String)> {
    vec![
        ("active".to_string(), "Active".to_string()),
        ("paused".to_string(), "Paused".to_string()),
    ]
}

/// "Send email → Wait → Assign crew"
pub fn step_summary(actions: &[WorkflowAction]) -> String {
    if actions.is_empty() {
        return "No steps".to_string();
    }
    actions.iter().map(|a| a.kind.label()).collect::<Vec<_>>().join(" → ")
}

#[derive(Clone, Copy)]
struct WorkflowForm {
    editing: RwSignal<Option<u32>>,
    name: RwSignal<String>,
    trigger: RwSignal<String>,
    actions: RwSignal<Vec<WorkflowAction>>,
    active: RwSignal<bool>,
}

impl WorkflowForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            trigger: RwSignal::new(WorkflowTrigger::ALL[0].as_str().to_string()),
            actions: RwSignal::new(Vec::new()),
            active: RwSignal::new(true),
        }
    }

    fn fill(&self, workflow: Option<&Workflow>) {
        match workflow {
            Some(w) => {
                self.editing.set(Some(w.id));
                self.name.set(w.name.clone());
                self.trigger.set(w.trigger.as_str().to_string());
                self.actions.set(w.actions.clone());
                self.active.set(w.active);
            }
            None => {
                self.editing.set(None);
                self.name.set(String::new());
                self.trigger.set(WorkflowTrigger::ALL[0].as_str().to_string());
                self.actions.set(vec![WorkflowAction::default()]);
                self.active.set(true);
            }
        }
    }

    fn draft(&self) -> WorkflowDraft {
        WorkflowDraft {
            name: self.name.get_untracked().trim().to_string(),
            trigger: WorkflowTrigger::parse(&self.trigger.get_untracked()),
            actions: self
                .actions
                .get_untracked()
                .into_iter()
                .map(|a| WorkflowAction { config: a.config.trim().to_string(), ..a })
                .collect(),
            active: self.active.get_untracked(),
        }
    }
}

#[component]
fn ActionStepsEditor(actions: RwSignal<Vec<WorkflowAction>>) -> impl IntoView {
    let step_count = Memo::new(move |_| actions.with(|steps| steps.len()));
    let kinds = Signal::stored(WorkflowActionKind::options());

    view! {
        <div class="workflow-steps">
            <span class="form-label">"Steps"</span>
            <ol>
                {move || (0..step_count.get()).map(|index| {
                    view! {
                        <li class="workflow-step">
                            <select
                                prop:value=move || actions.with(|steps| steps.get(index).map(|s| s.kind.as_str()).unwrap_or_default())
                                on:change=move |ev| {
                                    let chosen = WorkflowActionKind::parse(&event_target_value(&ev));
                                    actions.update(|steps| {
                                        if let Some(step) = steps.get_mut(index) {
                                            step.kind = chosen;
                                        }
                                    });
                                }
                            >
                                {move || kinds.get().into_iter().map(|(value, label)| view! {
                                    <option value=value>{label}</option>
                                }).collect_view()}
                            </select>
                            <input
                                type="text"
                                placeholder="Template, delay, crew…"
                                prop:value=move || actions.with(|steps| steps.get(index).map(|s| s.config.clone()).unwrap_or_default())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    actions.update(|steps| {
                                        if let Some(step) = steps.get_mut(index) {
                                            step.config = value;
                                        }
                                    });
                                }
                            />
                            <button type="button" class="btn small" title="Move up" disabled=move || index == 0
                                on:click=move |_| actions.update(|steps| shift_action(steps, index, -1))>"↑"</button>
                            <button type="button" class="btn small" title="Move down" disabled=move || index + 1 >= step_count.get()
                                on:click=move |_| actions.update(|steps| shift_action(steps, index, 1))>"↓"</button>
                            <button type="button" class="row-remove" title="Remove step"
                                on:click=move |_| actions.update(|steps| {
                                    if index < steps.len() {
                                        steps.remove(index);
                                    }
                                })>"×"</button>
                        </li>
                    }
                }).collect_view()}
            </ol>
            <button type="button" class="btn small" on:click=move |_| actions.update(|steps| steps.push(WorkflowAction::default()))>
                "+ Add step"
            </button>
        </div>
    }
}

#[component]
pub fn WorkflowsPage() -> impl IntoView {
    let workflows = use_collection::<Workflow>();
    let search = RwSignal::new(String::new());
    let trigger = RwSignal::new(String::new());
    let active = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::asc("name")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get())
            .filter("trigger", trigger.get())
            .filter("active", active.get())
            .sorted(sort.get());
        workflows.items.with(|items| listing::apply(items, &query))
    });
    let phase = Signal::derive(move || {
        list_phase(workflows.loading.get(), workflows.items.with(|w| w.len()), visible.with(|v| v.len()))
    });

    let form = WorkflowForm::new();
    let form_open = RwSignal::new(false);
    let open_form = move |workflow: Option<Workflow>| {
        form.fill(workflow.as_ref());
        form_open.set(true);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        if draft.name.is_empty() {
            notify::alert("Name is required.");
            return;
        }
        if draft.actions.is_empty() {
            notify::alert("Add at least one step.");
            return;
        }
        let after = move || {
            form_open.set(false);
            workflows.reload();
        };
        match form.editing.get_untracked() {
            Some(id) => dispatch(
                "Could not save workflow",
                "Workflow saved",
                async move { api::update::<Workflow, _>(id, &draft).await },
                after,
            ),
            None => dispatch(
                "Could not create workflow",
                "Workflow created",
                async move { api::create::<Workflow, _>(&draft).await },
                after,
            ),
        }
    };

    let toggle_active = move |id: u32, name: String, now_active: bool| {
        if now_active {
            confirm_then(
                &format!("Pause \"{}\"? It will stop running until resumed.", name),
                "Could not pause workflow",
                "Workflow paused",
                || api::set_workflow_active(id, false),
                move || workflows.reload(),
            );
        } else {
            dispatch("Could not resume workflow", "Workflow resumed", api::set_workflow_active(id, true), move || {
                workflows.reload()
            });
        }
    };
    let delete = move |id: u32| {
        dispatch("Could not delete workflow", "Workflow deleted", api::remove::<Workflow>(id), move || workflows.reload());
    };

    view! {
        <section class="page workflows-page">
            <PageHeader title="Workflows" count=Signal::derive(move || visible.with(|v| v.len()))>
                <button class="btn primary" on:click=move |_| open_form(None)>"+ New workflow"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search />
                <FilterSelect label="Trigger" value=trigger options=Signal::stored(WorkflowTrigger::options()) />
                <FilterSelect label="State" value=active options=Signal::stored(active_options()) />
            </div>

            <ListBody phase=phase noun="workflows">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Name" key="name" sort=sort />
                            <SortHeader label="Trigger" key="trigger" sort=sort />
                            <SortHeader label="Steps" key="steps" sort=sort />
                            <SortHeader label="Updated" key="updated_at" sort=sort />
                            <th>"State"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|workflow| {
                            let id = workflow.id;
                            let is_active = workflow.active;
                            let name = workflow.name.clone();
                            let for_edit = workflow.clone();
                            view! {
                                <tr>
                                    <td>{workflow.name.clone()}</td>
                                    <td><StatusBadge label=workflow.trigger.label() tone=workflow.trigger.tone() /></td>
                                    <td class="muted">{step_summary(&workflow.actions)}</td>
                                    <td>{format_date(workflow.updated_at.as_deref())}</td>
                                    <td>
                                        <StatusBadge
                                            label=if is_active { "Active" } else { "Paused" }
                                            tone=if is_active { Tone::Success } else { Tone::Neutral }
                                        />
                                    </td>
                                    <td class="row-actions">
                                        <button class="btn small" on:click=move |_| toggle_active(id, name.clone(), is_active)>
                                            {if is_active { "Pause" } else { "Resume" }}
                                        </button>
                                        <button class="btn small" on:click=move |_| open_form(Some(for_edit.clone()))>"Edit"</button>
                                        <DeleteConfirmButton button_class="row-delete" on_confirm=move |_| delete(id) />
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </ListBody>

            <Modal
                title=Signal::derive(move || if form.editing.get().is_some() { "Edit workflow".to_string() } else { "New workflow".to_string() })
                open=form_open
                wide=true
            >
                <form class="record-form" on:submit=on_submit>
                    <TextField label="Name" value=form.name required=true />
                    <SelectField label="Trigger" value=form.trigger options=Signal::stored(WorkflowTrigger::options()) />
                    <ActionStepsEditor actions=form.actions />
                    <label class="form-field checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || form.active.get()
                            on:change=move |ev| form.active.set(event_target_checked(&ev))
                        />
                        <span>"Active"</span>
                    </label>
                    <FormActions on_cancel=Callback::new(move |_| form_open.set(false)) />
                </form>
            </Modal>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_summary() {
        assert_eq!(step_summary(&[]), "No steps");
        let steps = vec![
            WorkflowAction { kind: WorkflowActionKind::SendEmail, config: "welcome".into() },
            WorkflowAction { kind: WorkflowActionKind::Wait, config: "2d".into() },
        ];
        assert_eq!(step_summary(&steps), "Send email → Wait");
    }
}
