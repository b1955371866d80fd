//! Message & Workflow Endpoints

use super::{list_where, patch, ApiError};
use crate::models::{ActivePatch, Message, ReadPatch, Workflow};

/// `inbox` or `sent`
pub async fn list_messages(folder: &str) -> Result<Vec<Message>, ApiError> {
    list_where::<Message>(&[("folder", folder)]).await
}

pub async fn mark_message_read(id: u32, read: bool) -> Result<(), ApiError> {
    patch::<Message, _>(id, &ReadPatch { read }).await
}

pub async fn set_workflow_active(id: u32, active: bool) -> Result<(), ApiError> {
    patch::<Workflow, _>(id, &ActivePatch { active }).await
}
