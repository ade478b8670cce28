//! Core Entity Traits
//!
//! Every resource screen is generic over a record type implementing
//! [`Entity`]; lists additionally need [`Listable`] for local filtering.

use std::fmt;
use std::hash::Hash;

use crate::status::{self, Status};

/// Core trait for all records managed by the admin screens
pub trait Entity: Sized + Clone + PartialEq + 'static {
    /// The type of the record's unique identifier
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display + 'static;

    /// Returns the record's unique identifier
    fn id(&self) -> Self::Id;

    /// Short human label used in notifications and headings
    fn title(&self) -> String;
}

/// Records that can be shown in a filtered list
pub trait Listable: Entity {
    /// Text fields matched by the search box
    fn search_fields(&self) -> Vec<&str>;

    fn status(&self) -> Option<Status> {
        None
    }

    fn category(&self) -> Option<&str> {
        None
    }
}

/// Local filter applied to the records of the current page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalFilter {
    pub search_term: String,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl LocalFilter {
    /// Case-insensitive substring search AND status AND category
    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        self.matches_search(item) && self.matches_status(item) && self.matches_category(item)
    }

    fn matches_search<T: Listable>(&self, item: &T) -> bool {
        let needle = self.search_term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        item.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_status<T: Listable>(&self, item: &T) -> bool {
        if status::is_unfiltered(self.status.as_deref()) {
            return true;
        }
        let filter = self.status.as_deref().unwrap_or_default();
        item.status().is_some_and(|s| s.matches_filter(filter))
    }

    fn matches_category<T: Listable>(&self, item: &T) -> bool {
        if status::is_unfiltered(self.category.as_deref()) {
            return true;
        }
        let filter = self.category.as_deref().unwrap_or_default().trim();
        item.category()
            .is_some_and(|c| c.trim().eq_ignore_ascii_case(filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: &'static str,
        status: Option<Status>,
        category: Option<&'static str>,
    }

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn title(&self) -> String {
            self.name.to_string()
        }
    }

    impl Listable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name]
        }

        fn status(&self) -> Option<Status> {
            self.status
        }

        fn category(&self) -> Option<&str> {
            self.category
        }
    }

    fn row(id: u32, name: &'static str, status: Option<Status>, category: Option<&'static str>) -> Row {
        Row { id, name, status, category }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = LocalFilter { search_term: "john".into(), ..Default::default() };
        assert!(filter.matches(&row(1, "John Doe", None, None)));
        assert!(!filter.matches(&row(2, "Jane Smith", None, None)));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let filter = LocalFilter {
            search_term: "pad".into(),
            status: Some("LOW_STOCK".into()),
            category: Some("brakes".into()),
        };
        assert!(filter.matches(&row(1, "Brake pad", Some(Status::LowStock), Some("Brakes"))));
        assert!(!filter.matches(&row(2, "Brake pad", Some(Status::InStock), Some("Brakes"))));
        assert!(!filter.matches(&row(3, "Brake pad", Some(Status::LowStock), Some("Engine"))));
        assert!(!filter.matches(&row(4, "Rotor", Some(Status::LowStock), Some("Brakes"))));
    }

    #[test]
    fn test_all_disables_status_filter() {
        let filter = LocalFilter { status: Some("all".into()), ..Default::default() };
        assert!(filter.matches(&row(1, "x", None, None)));
    }
}
