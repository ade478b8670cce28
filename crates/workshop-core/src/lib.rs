//! Workshop Admin Core
//!
//! Framework-agnostic state for the admin screens: the paginated list
//! controller, the master-detail view router, the entity form controller,
//! plus the formatters, status mapping and domain models they work on.
//! Nothing here touches the DOM; the UI crate binds these controllers to
//! signals and supplies the collaborators in [`source`].

pub mod calendar;
pub mod config;
pub mod display;
pub mod entity;
pub mod error;
pub mod form;
pub mod format;
pub mod line_item;
pub mod list;
pub mod lookup;
pub mod models;
pub mod page;
pub mod payload;
pub mod router;
pub mod source;
pub mod status;

#[cfg(test)]
mod testing;

pub use config::AppConfig;
pub use display::{Cell, Tabular};
pub use entity::{Entity, Listable, LocalFilter};
pub use error::{CoreError, CoreResult};
pub use form::{Editable, FieldErrors, FormController, FormMode, SubmitTicket};
pub use line_item::{LineItem, LineItemField, LineItemKind, ReferenceCatalog};
pub use list::{ApplyOutcome, FetchTicket, ListController};
pub use lookup::{LookupController, LookupTicket};
pub use page::{PageRequest, PageResult, PaginationView};
pub use payload::{FieldValue, Payload};
pub use router::{Transition, ViewEvent, ViewRouter, ViewState};
pub use source::{Confirmer, DataSource, Notifier, NotifyLevel};
pub use status::{BadgeCategory, Status};
