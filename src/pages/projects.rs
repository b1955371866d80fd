//! Projects Page
//!
//! Jobs with task checklists. Progress is done tasks over all tasks; the
//! detail panel loads `/projects/{id}/tasks` and edits them in place.

use leptos::prelude::*;

use crate::api;
use crate::components::{
    list_phase, optional_text, DeleteConfirmButton, EmptyState, FilterSelect, FormActions, ListBody, Modal,
    NumberField, PageHeader, SearchBar, SelectField, SortHeader, StatusBadge, TextField,
};
use crate::listing::{self, format_date, ListQuery, SortSpec};
use crate::models::{Project, ProjectDraft, ProjectStatus, Task, TaskDraft, TaskStatus};
use crate::resource::{dispatch, use_collection, use_collection_with};
use crate::totals::{format_money, parse_amount, percent};

#[derive(Clone, Copy)]
struct ProjectForm {
    editing: RwSignal<Option<u32>>,
    name: RwSignal<String>,
    customer_name: RwSignal<String>,
    site_name: RwSignal<String>,
    start_date: RwSignal<String>,
    due_date: RwSignal<String>,
    status: RwSignal<String>,
    budget: RwSignal<String>,
}

impl ProjectForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            customer_name: RwSignal::new(String::new()),
            site_name: RwSignal::new(String::new()),
            start_date: RwSignal::new(String::new()),
            due_date: RwSignal::new(String::new()),
            status: RwSignal::new(String::new()),
            budget: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, project: Option<&Project>) {
        let blank = Project { status: ProjectStatus::Planning, ..Default::default() };
        let p = project.unwrap_or(&blank);
        self.editing.set(project.map(|p| p.id));
        self.name.set(p.name.clone());
        self.customer_name.set(p.customer_name.clone());
        self.site_name.set(p.site_name.clone().unwrap_or_default());
        self.start_date.set(p.start_date.clone().unwrap_or_default());
        self.due_date.set(p.due_date.clone().unwrap_or_default());
        self.status.set(p.status.as_str().to_string());
        self.budget.set(p.budget.map(|b| b.to_string()).unwrap_or_default());
    }

    fn draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.get_untracked().trim().to_string(),
            customer_name: self.customer_name.get_untracked().trim().to_string(),
            site_name: optional_text(&self.site_name.get_untracked()),
            start_date: optional_text(&self.start_date.get_untracked()),
            due_date: optional_text(&self.due_date.get_untracked()),
            status: ProjectStatus::parse(&self.status.get_untracked()),
            budget: optional_text(&self.budget.get_untracked()).map(|b| parse_amount(&b)),
        }
    }
}

fn task_progress(tasks: &[Task]) -> u32 {
    percent(tasks.iter().filter(|t| t.status == TaskStatus::Done).count(), tasks.len())
}

#[component]
fn ProgressBar(#[prop(into)] value: Signal<u32>) -> impl IntoView {
    view! {
        <div class="progress">
            <div class="progress-fill" style:width=move || format!("{}%", value.get())></div>
            <span class="progress-label">{move || format!("{}%", value.get())}</span>
        </div>
    }
}

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let projects = use_collection::<Project>();
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::asc("due_date")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get()).filter("status", status.get()).sorted(sort.get());
        projects.items.with(|items| listing::apply(items, &query))
    });
    let phase = Signal::derive(move || {
        list_phase(projects.loading.get(), projects.items.with(|i| i.len()), visible.with(|v| v.len()))
    });

    let form = ProjectForm::new();
    let form_open = RwSignal::new(false);
    let open_form = move |project: Option<Project>| {
        form.fill(project.as_ref());
        form_open.set(true);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        if draft.name.is_empty() {
            crate::notify::alert("Project name is required.");
            return;
        }
        let after = move || {
            form_open.set(false);
            projects.reload();
        };
        match form.editing.get_untracked() {
            Some(id) => dispatch(
                "Could not update project",
                "Project updated",
                async move { api::update::<Project, _>(id, &draft).await },
                after,
            ),
            None => dispatch(
                "Could not create project",
                "Project created",
                async move { api::create::<Project, _>(&draft).await },
                after,
            ),
        }
    };

    let delete = move |id: u32| {
        dispatch("Could not delete project", "Project deleted", api::remove::<Project>(id), move || {
            projects.reload()
        });
    };

    // Task panel
    let selected = RwSignal::new(None::<(u32, String)>);
    let tasks_open = RwSignal::new(false);
    let tasks = use_collection_with("tasks", move || {
        let project_id = selected.with(|s| s.as_ref().map(|(id, _)| *id));
        async move {
            match project_id {
                Some(id) => api::list_tasks(id).await,
                None => Ok(Vec::new()),
            }
        }
    });
    let new_task = RwSignal::new(String::new());
    let new_assignee = RwSignal::new(String::new());
    let new_due = RwSignal::new(String::new());

    let open_tasks = move |project: &Project| {
        selected.set(Some((project.id, project.name.clone())));
        new_task.set(String::new());
        tasks_open.set(true);
    };
    let after_task_change = move || {
        tasks.reload();
        projects.reload();
    };

    let add_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(project_id) = selected.with_untracked(|s| s.as_ref().map(|(id, _)| *id)) else { return };
        let draft = TaskDraft {
            title: new_task.get_untracked().trim().to_string(),
            assignee: optional_text(&new_assignee.get_untracked()),
            due_date: optional_text(&new_due.get_untracked()),
            status: TaskStatus::Todo,
        };
        if draft.title.is_empty() {
            return;
        }
        dispatch("Could not add task", "", async move { api::create_task(project_id, &draft).await }, move || {
            new_task.set(String::new());
            new_assignee.set(String::new());
            new_due.set(String::new());
            after_task_change();
        });
    };

    let toggle_task = move |task: &Task| {
        let (project_id, task_id, next) = (task.project_id, task.id, task.status.toggled());
        let project_id = selected.with_untracked(|s| s.as_ref().map(|(id, _)| *id)).unwrap_or(project_id);
        dispatch("Could not update task", "", api::set_task_status(project_id, task_id, next), after_task_change);
    };

    let remove_task = move |task_id: u32| {
        let Some(project_id) = selected.with_untracked(|s| s.as_ref().map(|(id, _)| *id)) else { return };
        dispatch("Could not delete task", "Task deleted", api::delete_task(project_id, task_id), after_task_change);
    };

    view! {
        <section class="page projects-page">
            <PageHeader title="Projects" count=Signal::derive(move || visible.with(|v| v.len()))>
                <button class="btn primary" on:click=move |_| open_form(None)>"+ New project"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search project, customer, site" />
                <FilterSelect label="Status" value=status options=Signal::stored(ProjectStatus::options()) />
            </div>

            <ListBody phase=phase noun="projects">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Project" key="name" sort=sort />
                            <SortHeader label="Customer" key="customer" sort=sort />
                            <th>"Budget"</th>
                            <SortHeader label="Due" key="due_date" sort=sort />
                            <SortHeader label="Progress" key="progress" sort=sort />
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|project| {
                            let id = project.id;
                            let progress = project.progress();
                            let for_edit = project.clone();
                            let for_tasks = project.clone();
                            view! {
                                <tr>
                                    <td>
                                        <button class="link" on:click=move |_| open_form(Some(for_edit.clone()))>{project.name.clone()}</button>
                                        <div class="muted">{project.site_name.clone().unwrap_or_default()}</div>
                                    </td>
                                    <td>{project.customer_name.clone()}</td>
                                    <td class="num">{project.budget.map(format_money).unwrap_or_else(|| "—".to_string())}</td>
                                    <td>{format_date(project.due_date.as_deref())}</td>
                                    <td class="clickable" on:click=move |_| open_tasks(&for_tasks)>
                                        <ProgressBar value=progress />
                                    </td>
                                    <td><StatusBadge label=project.status.label() tone=project.status.tone() /></td>
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
                title=Signal::derive(move || if form.editing.get().is_some() { "Edit project".to_string() } else { "New project".to_string() })
                open=form_open
            >
                <form class="record-form" on:submit=on_submit>
                    <TextField label="Name" value=form.name required=true />
                    <TextField label="Customer" value=form.customer_name />
                    <TextField label="Site" value=form.site_name />
                    <TextField label="Start date" value=form.start_date kind="date" />
                    <TextField label="Due date" value=form.due_date kind="date" />
                    <SelectField label="Status" value=form.status options=Signal::stored(ProjectStatus::options()) />
                    <NumberField label="Budget ($)" value=form.budget />
                    <FormActions on_cancel=Callback::new(move |_| form_open.set(false)) />
                </form>
            </Modal>

            <Modal
                title=Signal::derive(move || selected.with(|s| s.as_ref().map(|(_, name)| format!("Tasks · {}", name)).unwrap_or_default()))
                open=tasks_open
                wide=true
            >
                <ProgressBar value=Signal::derive(move || tasks.items.with(|t| task_progress(t))) />
                {move || if tasks.is_empty() {
                    view! { <EmptyState message="No tasks yet." /> }.into_any()
                } else {
                    view! {
                        <ul class="task-list">
                            {tasks.get().into_iter().map(|task| {
                                let done = task.status == TaskStatus::Done;
                                let task_id = task.id;
                                let for_toggle = task.clone();
                                view! {
                                    <li class:done=done>
                                        <input type="checkbox" prop:checked=done on:change=move |_| toggle_task(&for_toggle) />
                                        <span class="task-title">{task.title.clone()}</span>
                                        <span class="muted">{task.assignee.clone().unwrap_or_default()}</span>
                                        <span class="muted">{format_date(task.due_date.as_deref())}</span>
                                        <StatusBadge label=task.status.label() tone=task.status.tone() />
                                        <DeleteConfirmButton button_class="row-delete" on_confirm=move |_| remove_task(task_id) />
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    }.into_any()
                }}
                <form class="inline-form" on:submit=add_task>
                    <TextField label="New task" value=new_task placeholder="Pre-treat walkways" />
                    <TextField label="Assignee" value=new_assignee />
                    <TextField label="Due" value=new_due kind="date" />
                    <button type="submit" class="btn">"Add"</button>
                </form>
            </Modal>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: TaskStatus) -> Task {
        Task { status, ..Default::default() }
    }

    #[test]
    fn test_task_progress() {
        assert_eq!(task_progress(&[]), 0);
        assert_eq!(task_progress(&[task(TaskStatus::Done), task(TaskStatus::Todo)]), 50);
        assert_eq!(task_progress(&[task(TaskStatus::Done), task(TaskStatus::InProgress), task(TaskStatus::Todo)]), 33);
    }
}
