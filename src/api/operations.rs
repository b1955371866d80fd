//! Site, Equipment, Project & Safety Endpoints

use super::{client, create_nested, list_nested, nested_path, patch, patch_nested, remove_nested, ApiError};
use crate::models::{
    Equipment, EquipmentStatus, Geofence, GeofenceDraft, IncidentStatus, Project, SafetyIncident,
    Site, StatusPatch, Task, TaskDraft, TaskStatus,
};

// ========================
// Sites & geofences
// ========================

pub async fn list_geofences(site_id: u32) -> Result<Vec<Geofence>, ApiError> {
    list_nested::<Site, Geofence>(site_id).await
}

pub async fn create_geofence(site_id: u32, draft: &GeofenceDraft) -> Result<(), ApiError> {
    create_nested::<Site, Geofence, _>(site_id, draft).await
}

/// The API deactivates whichever geofence was active before
pub async fn activate_geofence(site_id: u32, geofence_id: u32) -> Result<(), ApiError> {
    let path = format!("{}/{}/activate", nested_path::<Site, Geofence>(site_id), geofence_id);
    client::post_empty(&path).await.map(|_| ())
}

// ========================
// Equipment
// ========================

pub async fn set_equipment_status(id: u32, status: EquipmentStatus) -> Result<(), ApiError> {
    patch::<Equipment, _>(id, &StatusPatch { status }).await
}

// ========================
// Projects & tasks
// ========================

pub async fn list_tasks(project_id: u32) -> Result<Vec<Task>, ApiError> {
    list_nested::<Project, Task>(project_id).await
}

pub async fn create_task(project_id: u32, draft: &TaskDraft) -> Result<(), ApiError> {
    create_nested::<Project, Task, _>(project_id, draft).await
}

pub async fn set_task_status(project_id: u32, task_id: u32, status: TaskStatus) -> Result<(), ApiError> {
    patch_nested::<Project, Task, _>(project_id, task_id, &StatusPatch { status }).await
}

pub async fn delete_task(project_id: u32, task_id: u32) -> Result<(), ApiError> {
    remove_nested::<Project, Task>(project_id, task_id).await
}

// ========================
// Safety
// ========================

pub async fn set_incident_status(id: u32, status: IncidentStatus) -> Result<(), ApiError> {
    patch::<SafetyIncident, _>(id, &StatusPatch { status }).await
}
