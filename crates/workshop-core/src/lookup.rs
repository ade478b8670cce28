//! Ad Hoc Lookup Controller
//!
//! Type-ahead search over a resource (customer by name, phone or email).
//! Same ticket discipline as the list: only the latest query may land.

use log::debug;

use crate::entity::Entity;
use crate::error::CoreResult;
use crate::source::{Notifier, NotifyLevel};

/// Shortest query that is sent to the server
pub const MIN_QUERY_LEN: usize = 2;

/// Handle for one issued search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct LookupController<T: Entity> {
    query: String,
    results: Vec<T>,
    issued: u64,
    searching: bool,
}

impl<T: Entity> Default for LookupController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> LookupController<T> {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            issued: 0,
            searching: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Start a search for `query`. Too-short queries clear the results and
    /// invalidate any search in flight.
    pub fn begin(&mut self, query: &str) -> Option<LookupTicket> {
        let query = query.trim();
        self.query = query.to_string();
        self.issued += 1;
        if query.chars().count() < MIN_QUERY_LEN {
            self.results.clear();
            self.searching = false;
            return None;
        }
        self.searching = true;
        Some(LookupTicket {
            generation: self.issued,
            query: self.query.clone(),
        })
    }

    /// Apply a search result; returns false when the ticket is stale
    pub fn complete(&mut self, ticket: LookupTicket, result: CoreResult<Vec<T>>, notifier: &impl Notifier) -> bool {
        if ticket.generation != self.issued {
            debug!("[LOOKUP] discarding stale results for {:?}", ticket.query);
            return false;
        }
        self.searching = false;
        match result {
            Ok(found) => self.results = found,
            Err(err) => notifier.notify(NotifyLevel::Error, &format!("Search failed: {}", err)),
        }
        true
    }

    /// Pick one result and reset the lookup
    pub fn choose(&mut self, id: T::Id) -> Option<T> {
        let chosen = self.results.iter().find(|r| r.id() == id).cloned()?;
        self.query.clear();
        self.results.clear();
        self.issued += 1;
        Some(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DataSource;
    use crate::testing::{named, MemorySource, Named, RecordingNotifier};

    #[test]
    fn test_short_query_clears_without_request() {
        let n = RecordingNotifier::default();
        let mut lookup = LookupController::<Named>::new();
        let t = lookup.begin("jo").unwrap();
        lookup.complete(t, Ok(vec![named(1, "John Doe")]), &n);
        assert_eq!(lookup.results().len(), 1);

        assert!(lookup.begin(" j ").is_none());
        assert!(lookup.results().is_empty());
        assert!(!lookup.is_searching());
    }

    #[test]
    fn test_only_latest_query_lands() {
        let n = RecordingNotifier::default();
        let mut lookup = LookupController::<Named>::new();
        let old = lookup.begin("ja").unwrap();
        let new = lookup.begin("jane").unwrap();

        assert!(lookup.complete(new, Ok(vec![named(2, "Jane Smith")]), &n));
        assert!(!lookup.complete(old, Ok(vec![named(9, "Jack")]), &n));
        assert_eq!(lookup.results(), &[named(2, "Jane Smith")]);
    }

    #[test]
    fn test_clearing_query_invalidates_flight() {
        let n = RecordingNotifier::default();
        let mut lookup = LookupController::<Named>::new();
        let t = lookup.begin("smith").unwrap();
        lookup.begin("");
        assert!(!lookup.complete(t, Ok(vec![named(2, "Jane Smith")]), &n));
        assert!(lookup.results().is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_results() {
        let n = RecordingNotifier::default();
        let mut lookup = LookupController::<Named>::new();
        let t = lookup.begin("jo").unwrap();
        lookup.complete(t, Ok(vec![named(1, "John Doe")]), &n);
        let t = lookup.begin("joh").unwrap();
        lookup.complete(t, Err(crate::error::CoreError::network("timeout")), &n);
        assert_eq!(lookup.results().len(), 1);
        assert_eq!(n.count(NotifyLevel::Error), 1);
    }

    #[tokio::test]
    async fn test_search_through_source() {
        let n = RecordingNotifier::default();
        let source = MemorySource::with_names(&["John Doe", "Jane Smith", "Johnny Cash"]);
        let mut lookup = LookupController::<Named>::new();

        let ticket = lookup.begin("john").unwrap();
        let result = source.search(&ticket.query).await;
        lookup.complete(ticket, result, &n);
        assert_eq!(lookup.results().len(), 2);

        assert_eq!(lookup.choose(3), Some(named(3, "Johnny Cash")));
        assert!(lookup.results().is_empty());
        assert_eq!(lookup.query(), "");
    }
}
