//! User Access Endpoints

use super::{create, patch, ApiError};
use crate::models::{Role, User, UserInvite, UserPatch};

pub async fn invite_user(invite: &UserInvite) -> Result<(), ApiError> {
    create::<User, _>(invite).await
}

pub async fn set_user_active(id: u32, active: bool) -> Result<(), ApiError> {
    patch::<User, _>(id, &UserPatch { active: Some(active), role: None }).await
}

pub async fn set_user_role(id: u32, role: Role) -> Result<(), ApiError> {
    patch::<User, _>(id, &UserPatch { active: None, role: Some(role) }).await
}
