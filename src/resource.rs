//! Collection Loader & Mutation Dispatcher
//!
//! The load → filter → mutate → reload loop every list page runs.
//! A `Collection` re-fetches wholesale whenever `reload` is called or a
//! signal read by its fetch closure changes.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError, Resource};
use crate::logging;
use crate::notify;

/// Reactive list state for one resource
pub struct Collection<T: Send + Sync + 'static> {
    pub items: ReadSignal<Vec<T>>,
    pub loading: ReadSignal<bool>,
    set_version: WriteSignal<u32>,
}

impl<T: Send + Sync + 'static> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Collection<T> {}

impl<T: Clone + Send + Sync + 'static> Collection<T> {
    /// Re-run the loader; every mutation ends with this
    pub fn reload(&self) {
        self.set_version.update(|v| *v += 1);
    }

    pub fn get(&self) -> Vec<T> {
        self.items.get()
    }

    pub fn is_empty(&self) -> bool {
        self.items.with(|items| items.is_empty())
    }
}

/// `GET /{resource}` on mount and on every reload
pub fn use_collection<T: Resource>() -> Collection<T> {
    use_collection_with(T::LABEL, api::list::<T>)
}

/// Loader with a custom fetch; signals read synchronously inside `fetch`
/// are tracked, so changing them re-fetches
pub fn use_collection_with<T, F, Fut>(label: &'static str, fetch: F) -> Collection<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let (items, set_items) = signal(Vec::<T>::new());
    let (loading, set_loading) = signal(true);
    let (version, set_version) = signal(0u32);

    Effect::new(move |_| {
        let trigger = version.get();
        let request = fetch();
        set_loading.set(true);
        logging::info("LOAD", format!("loading {}, trigger={}", label, trigger));
        spawn_local(async move {
            let (loaded, failure) = settle(request.await);
            logging::info("LOAD", format!("loaded {} {}", loaded.len(), label));
            set_items.set(loaded);
            set_loading.set(false);
            if let Some(err) = failure {
                notify::report_error(&format!("Could not load {}", label), &err);
            }
        });
    });

    Collection { items, loading, set_version }
}

/// A failed load degrades to an empty list plus the error to report
pub fn settle<T>(result: Result<Vec<T>, ApiError>) -> (Vec<T>, Option<ApiError>) {
    match result {
        Ok(items) => (items, None),
        Err(err) => (Vec::new(), Some(err)),
    }
}

/// Single record loaded by id; `None` id clears it
pub fn use_record<T, F, Fut>(label: &'static str, fetch: F) -> (ReadSignal<Option<T>>, WriteSignal<u32>)
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Option<Fut> + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let (record, set_record) = signal(None::<T>);
    let (version, set_version) = signal(0u32);

    Effect::new(move |_| {
        let _ = version.get();
        match fetch() {
            Some(request) => spawn_local(async move {
                match request.await {
                    Ok(loaded) => set_record.set(Some(loaded)),
                    Err(err) => {
                        set_record.set(None);
                        notify::report_error(&format!("Could not load {}", label), &err);
                    }
                }
            }),
            None => set_record.set(None),
        }
    });

    (record, set_version)
}

/// Run a mutation, toast on success and call `after` (usually a reload);
/// alert on failure
pub fn dispatch<Fut>(
    failure: impl Into<String>,
    success: impl Into<String>,
    request: Fut,
    after: impl FnOnce() + 'static,
) where
    Fut: Future<Output = Result<(), ApiError>> + 'static,
{
    let failure = failure.into();
    let success = success.into();
    spawn_local(async move {
        match request.await {
            Ok(()) => {
                if !success.is_empty() {
                    notify::toast(&success);
                }
                after();
            }
            Err(err) => notify::report_error(&failure, &err),
        }
    });
}

/// `dispatch` guarded by a confirmation dialog
pub fn confirm_then<F, Fut>(
    question: &str,
    failure: impl Into<String>,
    success: impl Into<String>,
    request: F,
    after: impl FnOnce() + 'static,
) where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), ApiError>> + 'static,
{
    if notify::confirm(question) {
        dispatch(failure, success, request(), after);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_load_settles_to_empty_vec() {
        let (items, failure) = settle::<u32>(Err(ApiError::Network("offline".into())));
        assert!(items.is_empty());
        assert_eq!(failure, Some(ApiError::Network("offline".into())));
    }

    #[test]
    fn test_successful_load_passes_through() {
        let (items, failure) = settle(Ok(vec![1, 2, 3]));
        assert_eq!(items, vec![1, 2, 3]);
        assert!(failure.is_none());
    }
}
