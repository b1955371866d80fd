//! REST API Bindings
//!
//! Frontend bindings to the backend, organized by domain. Generic CRUD
//! works on any `Resource`; the domain modules add the action and
//! nested-collection endpoints.

mod client;
mod envelope;
mod error;
mod finance;
mod messaging;
mod navigation;
mod operations;
mod people;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use envelope::{unwrap_collection, unwrap_record};
pub use error::ApiError;

// Re-export all domain endpoints
pub use finance::*;
pub use messaging::*;
pub use navigation::*;
pub use operations::*;
pub use people::*;

/// A REST collection exposed by the backend
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path under the API base, e.g. `customers`
    const PATH: &'static str;
    /// Key some endpoints wrap the collection in
    const ENVELOPE: &'static str;
    /// Key some endpoints wrap a single record in
    const SINGULAR: &'static str;
    /// Plural noun used in messages
    const LABEL: &'static str;
}

pub fn record_path<T: Resource>(id: u32) -> String {
    format!("{}/{}", T::PATH, id)
}

pub fn action_path<T: Resource>(id: u32, action: &str) -> String {
    format!("{}/{}/{}", T::PATH, id, action)
}

pub fn nested_path<P: Resource, C: Resource>(parent_id: u32) -> String {
    format!("{}/{}/{}", P::PATH, parent_id, C::PATH)
}

// ========================
// Generic CRUD
// ========================

pub async fn list<T: Resource>() -> Result<Vec<T>, ApiError> {
    let body = client::get(T::PATH).await?;
    unwrap_collection(body, T::ENVELOPE)
}

/// List with query parameters (`/messages?folder=sent`)
pub async fn list_where<T: Resource>(params: &[(&str, &str)]) -> Result<Vec<T>, ApiError> {
    let body = client::get(&crate::config::with_query(T::PATH, params)).await?;
    unwrap_collection(body, T::ENVELOPE)
}

pub async fn fetch<T: Resource>(id: u32) -> Result<T, ApiError> {
    let body = client::get(&record_path::<T>(id)).await?;
    unwrap_record(body, T::SINGULAR)
}

pub async fn create<T: Resource, D: Serialize>(draft: &D) -> Result<(), ApiError> {
    client::post(T::PATH, draft).await.map(|_| ())
}

pub async fn update<T: Resource, D: Serialize>(id: u32, draft: &D) -> Result<(), ApiError> {
    client::put(&record_path::<T>(id), draft).await.map(|_| ())
}

pub async fn patch<T: Resource, B: Serialize>(id: u32, body: &B) -> Result<(), ApiError> {
    client::patch(&record_path::<T>(id), body).await.map(|_| ())
}

pub async fn remove<T: Resource>(id: u32) -> Result<(), ApiError> {
    client::delete(&record_path::<T>(id)).await.map(|_| ())
}

/// `POST /{resource}/{id}/{action}` with no body
pub async fn action<T: Resource>(id: u32, action: &str) -> Result<(), ApiError> {
    client::post_empty(&action_path::<T>(id, action)).await.map(|_| ())
}

pub async fn action_with<T: Resource, B: Serialize>(id: u32, action: &str, body: &B) -> Result<(), ApiError> {
    client::post(&action_path::<T>(id, action), body).await.map(|_| ())
}

// ========================
// Nested collections
// ========================

pub async fn list_nested<P: Resource, C: Resource>(parent_id: u32) -> Result<Vec<C>, ApiError> {
    let body = client::get(&nested_path::<P, C>(parent_id)).await?;
    unwrap_collection(body, C::ENVELOPE)
}

pub async fn create_nested<P: Resource, C: Resource, D: Serialize>(parent_id: u32, draft: &D) -> Result<(), ApiError> {
    client::post(&nested_path::<P, C>(parent_id), draft).await.map(|_| ())
}

pub async fn patch_nested<P: Resource, C: Resource, B: Serialize>(parent_id: u32, child_id: u32, body: &B) -> Result<(), ApiError> {
    let path = format!("{}/{}", nested_path::<P, C>(parent_id), child_id);
    client::patch(&path, body).await.map(|_| ())
}

pub async fn remove_nested<P: Resource, C: Resource>(parent_id: u32, child_id: u32) -> Result<(), ApiError> {
    let path = format!("{}/{}", nested_path::<P, C>(parent_id), child_id);
    client::delete(&path).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Estimate, Invoice, Payment, Project, SafetyIncident, Task};

    #[test]
    fn test_paths() {
        assert_eq!(record_path::<Invoice>(12), "invoices/12");
        assert_eq!(action_path::<Estimate>(3, "sign"), "estimates/3/sign");
        assert_eq!(nested_path::<Project, Task>(8), "projects/8/tasks");
        assert_eq!(nested_path::<Invoice, Payment>(5), "invoices/5/payments");
        assert_eq!(record_path::<SafetyIncident>(2), "safety/incidents/2");
    }
}
