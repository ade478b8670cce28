//! Paginated List Controller
//!
//! Drives a server-paginated resource list with local search, status and
//! category filtering.
//!
//! The controller never awaits. Every change that needs data returns a
//! [`FetchTicket`]; the caller runs the fetch and hands the result back to
//! [`ListController::apply`]. Tickets carry a generation number and only the
//! most recently issued one may update state, so a slow response to an older
//! search never overwrites a newer one.

use log::{debug, warn};

use crate::entity::{Listable, LocalFilter};
use crate::error::CoreResult;
use crate::page::{self, PageRequest, PageResult, PaginationView};
use crate::source::{Confirmer, Notifier, NotifyLevel};

/// Handle for one issued fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub request: PageRequest,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`ListController::apply`] did with a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer ticket was issued since; the result was discarded
    Stale,
    /// Fetch failed; the previous page stays visible
    Failed,
    /// The page index fell past the last page; fetch again with this ticket
    Refetch(FetchTicket),
}

/// Per-screen list state
#[derive(Debug, Clone)]
pub struct ListController<T: Listable> {
    /// Plural resource name for messages ("parts")
    resource: &'static str,
    request: PageRequest,
    page: Option<PageResult<T>>,
    /// Request that produced `page`
    shown: Option<PageRequest>,
    issued: u64,
    loading: bool,
    failed: bool,
}

impl<T: Listable> ListController<T> {
    pub fn new(resource: &'static str, page_size: usize) -> Self {
        Self {
            resource,
            request: PageRequest::first(page_size),
            page: None,
            shown: None,
            issued: 0,
            loading: false,
            failed: false,
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn page_index(&self) -> usize {
        self.request.page_index
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn total_pages(&self) -> Option<usize> {
        self.page.as_ref().map(|p| p.total_pages)
    }

    pub fn total_elements(&self) -> usize {
        self.page.as_ref().map(|p| p.total_elements).unwrap_or(0)
    }

    /// Records of the current page, unfiltered
    pub fn items(&self) -> &[T] {
        self.page.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[])
    }

    // ========================
    // Triggers
    // ========================

    /// Initial load
    pub fn mount(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Reload the current page (e.g. after a save)
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Change the search term; resets to the first page
    pub fn set_search(&mut self, term: &str) -> Option<FetchTicket> {
        if self.request.search_term == term {
            return None;
        }
        self.request.search_term = term.to_string();
        self.request.page_index = 0;
        Some(self.issue())
    }

    /// Change the status filter; resets to the first page
    pub fn set_status_filter(&mut self, status: Option<String>) -> Option<FetchTicket> {
        let status = status.filter(|s| !s.trim().is_empty());
        if self.request.status_filter == status {
            return None;
        }
        self.request.status_filter = status;
        self.request.page_index = 0;
        Some(self.issue())
    }

    /// Change the category filter; resets to the first page
    pub fn set_category_filter(&mut self, category: Option<String>) -> Option<FetchTicket> {
        let category = category.filter(|s| !s.trim().is_empty());
        if self.request.category_filter == category {
            return None;
        }
        self.request.category_filter = category;
        self.request.page_index = 0;
        Some(self.issue())
    }

    /// Jump to a page. Refused (no request) for the current page and for
    /// indices past the last known page.
    pub fn goto_page(&mut self, index: usize) -> Option<FetchTicket> {
        if index == self.request.page_index {
            return None;
        }
        if !page::is_navigable(index, self.total_pages()) {
            debug!(
                "[LIST:{}] refusing page {} of {:?}",
                self.resource,
                index,
                self.total_pages()
            );
            return None;
        }
        self.request.page_index = index;
        Some(self.issue())
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        self.goto_page(self.request.page_index + 1)
    }

    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        let index = self.request.page_index.checked_sub(1)?;
        self.goto_page(index)
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        debug!(
            "[LIST:{}] fetch #{} page={} search={:?} status={:?}",
            self.resource,
            self.issued,
            self.request.page_index,
            self.request.search_term,
            self.request.status_filter
        );
        FetchTicket {
            generation: self.issued,
            request: self.request.clone(),
        }
    }

    // ========================
    // Results
    // ========================

    /// Apply a fetch result. Only the latest ticket may change state.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: CoreResult<PageResult<T>>,
        notifier: &impl Notifier,
    ) -> ApplyOutcome {
        if ticket.generation != self.issued {
            debug!(
                "[LIST:{}] discarding stale fetch #{} (latest #{})",
                self.resource, ticket.generation, self.issued
            );
            return ApplyOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(mut page) => {
                if page.items.len() > ticket.request.page_size {
                    warn!(
                        "[LIST:{}] page holds {} records, more than the page size {}",
                        self.resource,
                        page.items.len(),
                        ticket.request.page_size
                    );
                    page.items.truncate(ticket.request.page_size);
                }
                let past_end = page.total_pages > 0 && ticket.request.page_index >= page.total_pages;
                let last = page.total_pages.saturating_sub(1);
                self.page = Some(page);
                self.shown = Some(ticket.request);
                self.failed = false;
                if past_end {
                    self.request.page_index = last;
                    return ApplyOutcome::Refetch(self.issue());
                }
                ApplyOutcome::Applied
            }
            Err(err) => {
                warn!("[LIST:{}] fetch failed: {}", self.resource, err);
                self.failed = true;
                // Request follows the rows still on screen
                if let Some(shown) = &self.shown {
                    self.request = shown.clone();
                }
                notifier.notify(
                    NotifyLevel::Error,
                    &format!("Failed to load {}: {}", self.resource, err),
                );
                ApplyOutcome::Failed
            }
        }
    }

    // ========================
    // Deletion
    // ========================

    /// Ask the user to confirm deleting `item`
    pub fn confirm_delete(&self, item: &T, confirmer: &impl Confirmer) -> bool {
        confirmer.confirm(&format!("Delete {}? This cannot be undone.", item.title()))
    }

    /// Apply the outcome of a delete call. On success the record is removed
    /// from the current page; no refetch is issued.
    pub fn apply_delete(
        &mut self,
        id: T::Id,
        result: CoreResult<()>,
        notifier: &impl Notifier,
    ) -> bool {
        match result {
            Ok(()) => {
                let mut title = None;
                if let Some(page) = self.page.as_mut() {
                    if let Some(pos) = page.items.iter().position(|item| item.id() == id) {
                        title = Some(page.items.remove(pos).title());
                        page.total_elements = page.total_elements.saturating_sub(1);
                    }
                }
                let title = title.unwrap_or_else(|| format!("Record {}", id));
                notifier.notify(NotifyLevel::Success, &format!("{} deleted", title));
                true
            }
            Err(err) => {
                warn!("[LIST:{}] delete {} failed: {}", self.resource, id, err);
                notifier.notify(NotifyLevel::Error, &format!("Delete failed: {}", err));
                false
            }
        }
    }

    // ========================
    // View model
    // ========================

    pub fn filter(&self) -> LocalFilter {
        LocalFilter {
            search_term: self.request.search_term.clone(),
            status: self.request.status_filter.clone(),
            category: self.request.category_filter.clone(),
        }
    }

    /// Current page after local filters
    pub fn visible_items(&self) -> Vec<&T> {
        let filter = self.filter();
        self.items().iter().filter(|item| filter.matches(*item)).collect()
    }

    pub fn pagination(&self) -> Option<PaginationView> {
        PaginationView::new(self.request.page_index, self.total_pages().unwrap_or(0))
    }

    /// Message to show instead of rows, if any
    pub fn empty_message(&self) -> Option<String> {
        if self.page.is_none() {
            if self.failed {
                return Some(format!("Could not load {}.", self.resource));
            }
            if self.loading {
                return None;
            }
        }
        self.visible_items()
            .is_empty()
            .then(|| format!("No {} found.", self.resource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::source::DataSource;
    use crate::testing::{named, MemorySource, Named, RecordingNotifier, ScriptedConfirm};

    fn controller() -> ListController<Named> {
        ListController::new("customers", 10)
    }

    fn page_of(names: &[&str], total_pages: usize) -> PageResult<Named> {
        PageResult {
            items: names.iter().enumerate().map(|(i, n)| named(i as u32 + 1, n)).collect(),
            total_pages,
            total_elements: names.len(),
        }
    }

    #[test]
    fn test_search_john_filters_locally() {
        let notifier = RecordingNotifier::default();
        let mut ctl = controller();
        let first = ctl.mount();
        ctl.apply(first, Ok(page_of(&["John Doe", "Jane Smith"], 1)), &notifier);

        let ticket = ctl.set_search("John").unwrap();
        ctl.apply(ticket, Ok(page_of(&["John Doe", "Jane Smith"], 1)), &notifier);

        let names: Vec<_> = ctl.visible_items().iter().map(|n| n.name.clone()).collect();
        assert_eq!(names, vec!["John Doe"]);
    }

    #[test]
    fn test_empty_list_shows_message_and_no_pagination() {
        let notifier = RecordingNotifier::default();
        let mut ctl = controller();
        let ticket = ctl.mount();
        assert_eq!(ctl.apply(ticket, Ok(PageResult::empty()), &notifier), ApplyOutcome::Applied);
        assert_eq!(ctl.pagination(), None);
        assert_eq!(ctl.empty_message().as_deref(), Some("No customers found."));
    }

    #[test]
    fn test_last_page_controls() {
        let notifier = RecordingNotifier::default();
        let mut ctl = controller();
        let t = ctl.mount();
        ctl.apply(t, Ok(page_of(&["a"], 3)), &notifier);
        let t = ctl.goto_page(2).unwrap();
        assert_eq!(t.request.page_index, 2);
        ctl.apply(t, Ok(page_of(&["z"], 3)), &notifier);

        let view = ctl.pagination().unwrap();
        assert!(!view.next_enabled);
        assert!(view.previous_enabled);
        assert!(ctl.next_page().is_none());
        assert!(ctl.goto_page(7).is_none());
        assert_eq!(ctl.page_index(), 2);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let notifier = RecordingNotifier::default();
        let mut ctl = controller();
        let t = ctl.mount();
        ctl.apply(t, Ok(page_of(&["a"], 5)), &notifier);
        ctl.goto_page(3).unwrap();

        let t = ctl.set_status_filter(Some("completed".into())).unwrap();
        assert_eq!(t.request.page_index, 0);
        assert!(ctl.set_status_filter(Some("completed".into())).is_none());

        ctl.goto_page(1);
        let t = ctl.set_search("x").unwrap();
        assert_eq!(t.request.page_index, 0);
    }

    #[test]
    fn test_previous_page_at_start_is_refused() {
        let mut ctl = controller();
        assert!(ctl.previous_page().is_none());
    }

    #[test]
    fn test_only_latest_ticket_applies() {
        let notifier = RecordingNotifier::default();
        let mut ctl = controller();
        let t1 = ctl.set_search("J").unwrap();
        let t2 = ctl.set_search("Jo").unwrap();
        let t3 = ctl.set_search("Joh").unwrap();

        assert_eq!(ctl.apply(t3, Ok(page_of(&["John Doe"], 1)), &notifier), ApplyOutcome::Applied);
        assert_eq!(ctl.apply(t1, Ok(page_of(&["Jack", "Jill"], 1)), &notifier), ApplyOutcome::Stale);
        assert_eq!(ctl.apply(t2, Err(CoreError::network("reset")), &notifier), ApplyOutcome::Stale);

        assert_eq!(ctl.items().len(), 1);
        assert_eq!(ctl.items()[0].name, "John Doe");
        assert!(notifier.messages().is_empty());
        assert!(!ctl.is_loading());
    }

    #[test]
    fn test_failure_keeps_previous_page() {
        let notifier = RecordingNotifier::default();
        let mut ctl = controller();
        let t = ctl.mount();
        ctl.apply(t, Ok(page_of(&["John Doe"], 2)), &notifier);

        let t = ctl.next_page().unwrap();
        assert_eq!(ctl.apply(t, Err(CoreError::network("offline")), &notifier), ApplyOutcome::Failed);
        assert_eq!(ctl.items().len(), 1);
        assert_eq!(notifier.count(NotifyLevel::Error), 1);
        assert_eq!(ctl.empty_message(), None);
    }

    #[test]
    fn test_failed_navigation_can_be_retried() {
        let notifier = RecordingNotifier::default();
        let mut ctl = controller();
        let t = ctl.mount();
        ctl.apply(t, Ok(page_of(&["page zero"], 3)), &notifier);

        let t = ctl.goto_page(1).unwrap();
        ctl.apply(t, Err(CoreError::network("offline")), &notifier);
        assert_eq!(ctl.items()[0].name, "page zero");
        assert_eq!(ctl.page_index(), 0);
        assert_eq!(ctl.pagination().map(|p| p.current), Some(0));

        let retry = ctl.goto_page(1).unwrap();
        assert_eq!(retry.request.page_index, 1);
        ctl.apply(retry, Ok(page_of(&["page one"], 3)), &notifier);
        assert_eq!(ctl.items()[0].name, "page one");
        assert_eq!(ctl.pagination().map(|p| p.current), Some(1));
    }

    #[test]
    fn test_failed_search_can_be_retried() {
        let notifier = RecordingNotifier::default();
        let mut ctl = controller();
        let t = ctl.mount();
        ctl.apply(t, Ok(page_of(&["John Doe", "Jane Smith"], 1)), &notifier);

        let t = ctl.set_search("Jane").unwrap();
        ctl.apply(t, Err(CoreError::network("offline")), &notifier);
        assert_eq!(ctl.request().search_term, "");
        assert_eq!(ctl.visible_items().len(), 2);
        assert!(ctl.set_search("Jane").is_some());
    }

    #[test]
    fn test_failure_without_data_shows_empty_state() {
        let notifier = RecordingNotifier::default();
        let mut ctl = controller();
        let t = ctl.mount();
        ctl.apply(t, Err(CoreError::network("offline")), &notifier);
        assert_eq!(ctl.empty_message().as_deref(), Some("Could not load customers."));
    }

    #[test]
    fn test_oversized_page_is_truncated() {
        let notifier = RecordingNotifier::default();
        let mut ctl: ListController<Named> = ListController::new("customers", 2);
        let t = ctl.mount();
        ctl.apply(t, Ok(page_of(&["a", "b", "c"], 2)), &notifier);
        assert_eq!(ctl.items().len(), 2);
    }

    #[test]
    fn test_page_past_end_is_clamped() {
        let notifier = RecordingNotifier::default();
        let mut ctl = controller();
        let t = ctl.mount();
        ctl.apply(t, Ok(page_of(&["a"], 4)), &notifier);
        let t = ctl.goto_page(3).unwrap();

        match ctl.apply(t, Ok(page_of(&[], 2)), &notifier) {
            ApplyOutcome::Refetch(next) => assert_eq!(next.request.page_index, 1),
            other => panic!("expected refetch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_removes_row_without_refetch() {
        let notifier = RecordingNotifier::default();
        let source = MemorySource::with_names(&["John Doe", "Jane Smith"]);
        let mut ctl = controller();

        let t = ctl.mount();
        let result = source.fetch_page(&t.request).await;
        ctl.apply(t, result, &notifier);
        let fetches = source.fetch_count();

        let target = ctl.items()[0].clone();
        assert!(ctl.confirm_delete(&target, &ScriptedConfirm::yes()));
        let result = source.delete(target.id).await;
        assert!(ctl.apply_delete(target.id, result, &notifier));

        assert_eq!(ctl.items().len(), 1);
        assert_eq!(ctl.total_elements(), 1);
        assert_eq!(source.fetch_count(), fetches);
        assert_eq!(notifier.count(NotifyLevel::Success), 1);
    }

    #[tokio::test]
    async fn test_declined_delete_issues_no_call() {
        let source = MemorySource::with_names(&["John Doe"]);
        let ctl = controller();
        let target = named(1, "John Doe");
        let confirm = ScriptedConfirm::no();
        assert!(!ctl.confirm_delete(&target, &confirm));
        assert_eq!(confirm.prompts(), vec!["Delete John Doe? This cannot be undone.".to_string()]);
        assert_eq!(source.delete_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_row() {
        let notifier = RecordingNotifier::default();
        let source = MemorySource::with_names(&["John Doe"]);
        let mut ctl = controller();
        let t = ctl.mount();
        let result = source.fetch_page(&t.request).await;
        ctl.apply(t, result, &notifier);

        source.fail_next("server unavailable");
        let result = source.delete(1).await;
        assert!(!ctl.apply_delete(1, result, &notifier));
        assert_eq!(ctl.items().len(), 1);
        assert_eq!(notifier.count(NotifyLevel::Error), 1);
    }
}
