//! Field operations: sites, equipment, projects, safety

use serde::{Deserialize, Serialize};

use crate::api::Resource;
use crate::listing::{Listable, SortKey};
use crate::totals;
use super::{EquipmentStatus, IncidentStatus, ProjectStatus, Severity, SiteStatus, TaskStatus};

/// Service location belonging to a customer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub id: u32,
    pub customer_id: Option<u32>,
    pub customer_name: String,
    pub name: String,
    pub address: String,
    pub status: SiteStatus,
    pub notes: Option<String>,
    pub geofences: Vec<Geofence>,
}

impl Site {
    pub fn active_geofence(&self) -> Option<&Geofence> {
        self.geofences.iter().find(|g| g.active)
    }
}

impl Resource for Site {
    const PATH: &'static str = "sites";
    const ENVELOPE: &'static str = "sites";
    const SINGULAR: &'static str = "site";
    const LABEL: &'static str = "sites";
}

impl Listable for Site {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.address.as_str(), self.customer_name.as_str()]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "customer" => self.customer_id.map(|id| id.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "name" => SortKey::text(&self.name),
            "customer" => SortKey::text(&self.customer_name),
            "address" => SortKey::text(&self.address),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteDraft {
    pub name: String,
    pub customer_id: Option<u32>,
    pub address: String,
    pub status: SiteStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Check-in boundary around a site; the API keeps at most one active
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Geofence {
    pub id: u32,
    pub site_id: u32,
    pub name: String,
    pub radius_m: f64,
    pub active: bool,
}

impl Resource for Geofence {
    const PATH: &'static str = "geofences";
    const ENVELOPE: &'static str = "geofences";
    const SINGULAR: &'static str = "geofence";
    const LABEL: &'static str = "geofences";
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GeofenceDraft {
    pub name: String,
    pub radius_m: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub id: u32,
    pub name: String,
    /// plow, salter, loader, truck, ...
    pub kind: String,
    pub serial_number: String,
    pub status: EquipmentStatus,
    pub assigned_to: Option<String>,
    pub last_service: Option<String>,
}

impl Resource for Equipment {
    const PATH: &'static str = "equipment";
    const ENVELOPE: &'static str = "equipment";
    const SINGULAR: &'static str = "asset";
    const LABEL: &'static str = "equipment";
}

impl Listable for Equipment {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.serial_number.as_str(),
            self.kind.as_str(),
            self.assigned_to.as_deref().unwrap_or(""),
        ]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "kind" => Some(self.kind.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "name" => SortKey::text(&self.name),
            "kind" => SortKey::text(&self.kind),
            "status" => SortKey::text(self.status.label()),
            "last_service" => SortKey::date(self.last_service.as_deref()),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EquipmentDraft {
    pub name: String,
    pub kind: String,
    pub serial_number: String,
    pub status: EquipmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusPatch<S: Serialize> {
    pub status: S,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub customer_name: String,
    pub site_name: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub status: ProjectStatus,
    pub budget: Option<f64>,
    pub tasks: Vec<Task>,
    /// Counts some list endpoints send instead of embedding tasks
    pub tasks_total: Option<usize>,
    pub tasks_done: Option<usize>,
}

impl Project {
    pub fn progress(&self) -> u32 {
        if !self.tasks.is_empty() {
            let done = self.tasks.iter().filter(|t| t.status == TaskStatus::Done).count();
            return totals::percent(done, self.tasks.len());
        }
        totals::percent(self.tasks_done.unwrap_or(0), self.tasks_total.unwrap_or(0))
    }
}

impl Resource for Project {
    const PATH: &'static str = "projects";
    const ENVELOPE: &'static str = "projects";
    const SINGULAR: &'static str = "project";
    const LABEL: &'static str = "projects";
}

impl Listable for Project {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.customer_name.as_str(),
            self.site_name.as_deref().unwrap_or(""),
        ]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "name" => SortKey::text(&self.name),
            "customer" => SortKey::text(&self.customer_name),
            "due_date" => SortKey::date(self.due_date.as_deref()),
            "progress" => SortKey::Number(self.progress() as f64),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectDraft {
    pub name: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: u32,
    pub project_id: u32,
    pub title: String,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub status: TaskStatus,
}

impl Resource for Task {
    const PATH: &'static str = "tasks";
    const ENVELOPE: &'static str = "tasks";
    const SINGULAR: &'static str = "task";
    const LABEL: &'static str = "tasks";
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyIncident {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub site_name: String,
    pub reported_by: String,
    pub severity: Severity,
    pub occurred_at: Option<String>,
    pub status: IncidentStatus,
}

impl Resource for SafetyIncident {
    const PATH: &'static str = "safety/incidents";
    const ENVELOPE: &'static str = "incidents";
    const SINGULAR: &'static str = "incident";
    const LABEL: &'static str = "safety incidents";
}

impl Listable for SafetyIncident {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.site_name.as_str(),
            self.reported_by.as_str(),
            self.description.as_str(),
        ]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "severity" => Some(self.severity.as_str().to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "title" => SortKey::text(&self.title),
            "occurred_at" => SortKey::date(self.occurred_at.as_deref()),
            "severity" => SortKey::Number(
                Severity::ALL.iter().position(|s| *s == self.severity).map(|p| p as f64).unwrap_or(-1.0),
            ),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IncidentDraft {
    pub title: String,
    pub description: String,
    pub site_name: String,
    pub reported_by: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_decode_to_defaults() {
        let sites: Vec<Site> = crate::api::unwrap_collection(
            serde_json::json!({"sites": [{"id": 1, "name": "Lot 4", "customer_name": null, "address": null,
                "geofences": [{"id": 7, "site_id": 1, "name": null, "radius_m": null, "active": true}]}]}),
            Site::ENVELOPE,
        )
        .unwrap();
        assert_eq!(sites[0].customer_name, "");
        assert_eq!(sites[0].geofences[0].radius_m, 0.0);

        let equipment: Vec<Equipment> = crate::api::unwrap_collection(
            serde_json::json!([{"id": 2, "name": "Plow 1", "kind": null, "serial_number": null, "status": null}]),
            Equipment::ENVELOPE,
        )
        .unwrap();
        assert_eq!(equipment[0].status, EquipmentStatus::Unknown);

        let projects: Vec<Project> = crate::api::unwrap_collection(
            serde_json::json!({"projects": [{"id": 3, "name": "Spring cleanup", "customer_name": null, "tasks": null,
                "budget": null}]}),
            Project::ENVELOPE,
        )
        .unwrap();
        assert!(projects[0].tasks.is_empty());
        assert_eq!(projects[0].budget, None);

        let tasks: Vec<Task> = crate::api::unwrap_collection(
            serde_json::json!([{"id": 4, "project_id": null, "title": null, "status": "done"}]),
            Task::ENVELOPE,
        )
        .unwrap();
        assert_eq!((tasks[0].project_id, tasks[0].status), (0, TaskStatus::Done));

        let incidents: Vec<SafetyIncident> = crate::api::unwrap_collection(
            serde_json::json!({"incidents": [{"id": 5, "title": "Slip", "description": null, "site_name": null,
                "reported_by": null, "severity": null, "status": "open"}]}),
            SafetyIncident::ENVELOPE,
        )
        .unwrap();
        assert_eq!(incidents[0].severity, Severity::Unknown);
    }

    fn task(id: u32, status: TaskStatus) -> Task {
        Task { id, project_id: 1, title: format!("Task {}", id), status, ..Default::default() }
    }

    #[test]
    fn test_progress_from_embedded_tasks() {
        let project = Project {
            tasks: vec![task(1, TaskStatus::Done), task(2, TaskStatus::Todo), task(3, TaskStatus::InProgress), task(4, TaskStatus::Done)],
            ..Default::default()
        };
        assert_eq!(project.progress(), 50);
    }

    #[test]
    fn test_progress_from_counts_and_empty() {
        let counted = Project { tasks_total: Some(8), tasks_done: Some(2), ..Default::default() };
        assert_eq!(counted.progress(), 25);
        assert_eq!(Project::default().progress(), 0);
    }

    #[test]
    fn test_active_geofence() {
        let site = Site {
            geofences: vec![
                Geofence { id: 1, active: false, ..Default::default() },
                Geofence { id: 2, active: true, ..Default::default() },
            ],
            ..Default::default()
        };
        assert_eq!(site.active_geofence().map(|g| g.id), Some(2));
    }

    #[test]
    fn test_severity_sorts_by_rank() {
        let low = SafetyIncident { severity: Severity::Low, ..Default::default() };
        let critical = SafetyIncident { severity: Severity::Critical, ..Default::default() };
        assert_eq!(low.sort_key("severity"), SortKey::Number(0.0));
        assert_eq!(critical.sort_key("severity"), SortKey::Number(3.0));
    }
}
