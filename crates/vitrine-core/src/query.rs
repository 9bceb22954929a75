//! Query pipeline: search filter and sort over the raw record set.
//!
//! `QuerySpec::apply` is a pure function from the record set to the view
//! the pagination window consumes: filter first, then sort.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::record::Record;

/// Sortable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    Title,
    Price,
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The active sort column and direction.
///
/// Exposed from [`QuerySpec`] so a renderer can mark the active header
/// and its arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    /// Order two records under this key.
    ///
    /// Price compares numerically, title compares lowercased. `Desc`
    /// reverses the comparator's sense; ties carry no ordering promise.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ord = match self.field {
            SortField::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// The active search term plus sort key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Case-insensitive substring match on the record title.
    pub search: String,
    pub sort: Option<SortKey>,
}

impl QuerySpec {
    /// Whether this spec matches everything and imposes no order.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.sort.is_none()
    }

    /// Whether a single record passes the search filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.search.is_empty()
            || record
                .title
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }

    /// Click-a-header semantics: the same field flips direction, a new
    /// field starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort = Some(match self.sort {
            Some(key) if key.field == field => SortKey {
                field,
                direction: key.direction.flipped(),
            },
            _ => SortKey {
                field,
                direction: SortDirection::Asc,
            },
        });
    }

    /// Filter then sort, producing the derived view.
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        let needle = self.search.to_lowercase();
        let mut view: Vec<Record> = records
            .iter()
            .filter(|r| needle.is_empty() || r.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        if let Some(key) = self.sort {
            view.sort_by(|a, b| key.compare(a, b));
        }
        view
    }
}
