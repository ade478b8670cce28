//! Master-Detail View Router
//!
//! State machine cycling a resource screen between its list, form, detail
//! and calendar views. Children talk to it only through [`ViewEvent`]s.

use log::debug;

use crate::entity::Entity;
use crate::error::{CoreError, CoreResult};
use crate::form::Editable;
use crate::source::{Notifier, NotifyLevel};

/// Current screen mode of a resource
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    List,
    /// `None` is create mode
    Form { editing: Option<T> },
    Detail { item: T },
    Calendar,
}

impl<T> ViewState<T> {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::List => "list",
            ViewState::Form { .. } => "form",
            ViewState::Detail { .. } => "detail",
            ViewState::Calendar => "calendar",
        }
    }
}

/// Typed message from a child view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent<T: Entity> {
    /// Open a record read-only
    View(T),
    Create,
    /// Edit a record from the list
    Edit(T),
    /// Edit the record shown in the detail view
    EditSelected,
    ShowCalendar,
    Back,
    /// The form saved successfully
    Saved(T),
    Cancel,
    /// A record picked from the calendar
    SelectFromCalendar(T),
    /// A record was deleted
    Deleted(T::Id),
}

impl<T: Entity> ViewEvent<T> {
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::View(_) => "view",
            ViewEvent::Create => "create",
            ViewEvent::Edit(_) => "edit",
            ViewEvent::EditSelected => "edit",
            ViewEvent::ShowCalendar => "show the calendar",
            ViewEvent::Back => "go back",
            ViewEvent::Saved(_) => "save",
            ViewEvent::Cancel => "cancel",
            ViewEvent::SelectFromCalendar(_) => "select",
            ViewEvent::Deleted(_) => "delete",
        }
    }
}

/// Result of an accepted event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: &'static str,
    pub to: &'static str,
    /// The list should fetch its current page again
    pub refresh_list: bool,
}

/// Per-screen view state
#[derive(Debug, Clone)]
pub struct ViewRouter<T: Editable> {
    state: ViewState<T>,
    calendar: bool,
}

impl<T: Editable> ViewRouter<T> {
    pub fn new() -> Self {
        Self {
            state: ViewState::List,
            calendar: false,
        }
    }

    /// Router for resources that also have a calendar view
    pub fn with_calendar() -> Self {
        Self {
            state: ViewState::List,
            calendar: true,
        }
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn supports_calendar(&self) -> bool {
        self.calendar
    }

    /// Record shown in the detail view
    pub fn selected(&self) -> Option<&T> {
        match &self.state {
            ViewState::Detail { item } => Some(item),
            _ => None,
        }
    }

    /// Record loaded in the form (`None` in create mode or outside the form)
    pub fn editing(&self) -> Option<&T> {
        match &self.state {
            ViewState::Form { editing } => editing.as_ref(),
            _ => None,
        }
    }

    /// Apply one event. Rejected events leave the state untouched.
    pub fn dispatch(&mut self, event: ViewEvent<T>, notifier: &impl Notifier) -> CoreResult<Transition> {
        let from = self.state.name();
        let event_name = event.name();
        let invalid = || CoreError::InvalidTransition { from, event: event_name };

        let (next, refresh_list) = match (&self.state, event) {
            (ViewState::List, ViewEvent::View(item)) => (ViewState::Detail { item }, false),
            (ViewState::List, ViewEvent::Create) => (ViewState::Form { editing: None }, false),
            (ViewState::List, ViewEvent::Edit(item)) => {
                Self::check_editable(&item, notifier)?;
                (ViewState::Form { editing: Some(item) }, false)
            }
            (ViewState::List, ViewEvent::ShowCalendar) if self.calendar => (ViewState::Calendar, false),
            (ViewState::Detail { item }, ViewEvent::EditSelected) => {
                Self::check_editable(item, notifier)?;
                (ViewState::Form { editing: Some(item.clone()) }, false)
            }
            (ViewState::Detail { .. }, ViewEvent::Back) => (ViewState::List, false),
            (ViewState::Detail { item }, ViewEvent::Deleted(id)) if item.id() == id => (ViewState::List, true),
            (ViewState::Form { .. }, ViewEvent::Saved(_)) => (ViewState::List, true),
            (ViewState::Form { .. }, ViewEvent::Cancel) => (ViewState::List, false),
            (ViewState::Calendar, ViewEvent::SelectFromCalendar(item)) => (ViewState::Detail { item }, false),
            (ViewState::Calendar, ViewEvent::Back) => (ViewState::List, false),
            _ => return Err(invalid()),
        };

        self.state = next;
        let transition = Transition {
            from,
            to: self.state.name(),
            refresh_list,
        };
        debug!(
            "[ROUTER:{}] {} -> {} on {}",
            T::schema().resource,
            transition.from,
            transition.to,
            event_name
        );
        Ok(transition)
    }

    fn check_editable(item: &T, notifier: &impl Notifier) -> CoreResult<()> {
        if let Some(status) = item.edit_block() {
            notifier.notify(
                NotifyLevel::Warning,
                &format!(
                    "{} cannot be edited because the {} is {}.",
                    item.title(),
                    T::schema().resource,
                    status.label().to_lowercase()
                ),
            );
            return Err(CoreError::Conflict { status });
        }
        Ok(())
    }

    /// Apply a re-fetch of the selected record. A record that no longer
    /// exists sends the router back to the list with a notice.
    pub fn refresh_selected(&mut self, fresh: CoreResult<Option<T>>, notifier: &impl Notifier) -> Option<Transition> {
        let ViewState::Detail { item } = &mut self.state else {
            return None;
        };
        match fresh {
            Ok(Some(updated)) if updated.id() == item.id() => {
                *item = updated;
                None
            }
            Ok(_) | Err(CoreError::NotFound(_)) => {
                notifier.notify(
                    NotifyLevel::Info,
                    &format!("{} no longer exists.", item.title()),
                );
                self.state = ViewState::List;
                Some(Transition {
                    from: "detail",
                    to: "list",
                    refresh_list: true,
                })
            }
            Err(err) => {
                notifier.notify(NotifyLevel::Error, &format!("Could not refresh {}: {}", item.title(), err));
                None
            }
        }
    }
}

impl<T: Editable> Default for ViewRouter<T> {
    fn default() -> Self {
        Self::new()
    }
}
