//! Collaborator Contracts
//!
//! Abstract interfaces the controllers depend on. The UI crate supplies a
//! REST implementation of [`DataSource`], a toast [`Notifier`] and a browser
//! [`Confirmer`].

use async_trait::async_trait;

use crate::entity::Entity;
use crate::error::CoreResult;
use crate::page::{PageRequest, PageResult};
use crate::payload::Payload;

/// Remote CRUD access for one resource type.
///
/// Futures are not `Send`: the browser event loop is single-threaded.
#[async_trait(?Send)]
pub trait DataSource<T: Entity> {
    /// Paginated read
    async fn fetch_page(&self, request: &PageRequest) -> CoreResult<PageResult<T>>;

    /// Ad hoc lookup by free text
    async fn search(&self, query: &str) -> CoreResult<Vec<T>>;

    /// Single record; `Ok(None)` when the record no longer exists
    async fn get(&self, id: T::Id) -> CoreResult<Option<T>>;

    async fn create(&self, payload: &Payload) -> CoreResult<T>;

    async fn update(&self, id: T::Id, payload: &Payload) -> CoreResult<T>;

    async fn delete(&self, id: T::Id) -> CoreResult<()>;
}

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotifyLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotifyLevel::Info => "toast toast-info",
            NotifyLevel::Success => "toast toast-success",
            NotifyLevel::Warning => "toast toast-warning",
            NotifyLevel::Error => "toast toast-error",
        }
    }
}

/// Fire-and-forget user notification (toast, alert)
pub trait Notifier {
    fn notify(&self, level: NotifyLevel, message: &str);
}

/// Blocking confirmation for destructive actions
pub trait Confirmer {
    fn confirm(&self, message: &str) -> bool;
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, level: NotifyLevel, message: &str) {
        (**self).notify(level, message)
    }
}

impl<C: Confirmer + ?Sized> Confirmer for &C {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}
