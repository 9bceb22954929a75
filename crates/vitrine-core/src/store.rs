//! Catalog store: the single owned state behind the table.
//!
//! `CatalogState` holds the source-of-truth record set, the derived view,
//! and the active query and page state. The view is never mutated
//! independently; it is recomputed through the query pipeline whenever
//! the query changes, and patched positionally on update.

use thiserror::Error;

use crate::page::{page_links, paginate, PageMeta, PageState};
use crate::query::{QuerySpec, SortField};
use crate::record::{Record, RecordId};
use crate::render::ViewSink;

/// Errors from catalog store operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Load input contained a record the table cannot represent; the
    /// store is left untouched.
    #[error("malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: &'static str },

    /// Update target is not in the store. Callers log this as a desync
    /// rather than surfacing it.
    #[error("record not found: {0}")]
    NotFound(RecordId),
}

/// The catalog state machine.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    records: Vec<Record>,
    view: Vec<Record>,
    query: QuerySpec,
    page: PageState,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole record set. All-or-nothing: nothing changes when
    /// any record is malformed. Resets search, sort, and page position,
    /// then rebuilds the view.
    pub fn load(&mut self, records: Vec<Record>) -> Result<usize, CatalogError> {
        for (index, record) in records.iter().enumerate() {
            if record.id <= 0 {
                return Err(CatalogError::MalformedRecord {
                    index,
                    reason: "missing or non-positive id",
                });
            }
            if record.title.is_empty() {
                return Err(CatalogError::MalformedRecord {
                    index,
                    reason: "empty title",
                });
            }
        }
        let count = records.len();
        self.records = records;
        self.query = QuerySpec::default();
        self.recompute();
        Ok(count)
    }

    /// Replace the stored record matching `record.id`, patching the view
    /// in place. The view keeps its current order; no re-sort.
    pub fn apply_update(&mut self, record: Record) -> Result<(), CatalogError> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or(CatalogError::NotFound(record.id))?;
        *slot = record.clone();
        if let Some(shown) = self.view.iter_mut().find(|r| r.id == record.id) {
            *shown = record;
        }
        Ok(())
    }

    /// Prepend a newly created record, then rebuild the view so it
    /// participates in the active filter and sort.
    pub fn apply_create(&mut self, record: Record) {
        self.records.insert(0, record);
        self.recompute();
    }

    /// Set the search term and rebuild the view.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
        self.recompute();
    }

    /// Toggle the sort column (the same column flips direction) and
    /// rebuild the view.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.query.toggle_sort(field);
        self.recompute();
    }

    /// Change the page size and return to page 1. Zero is ignored.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.page.set_per_page(per_page);
    }

    /// A filter or sort change invalidates the page position, so every
    /// recompute returns to page 1.
    fn recompute(&mut self) {
        self.view = self.query.apply(&self.records);
        self.page.reset();
    }

    pub fn next_page(&mut self) {
        let total = self.meta().total_pages;
        self.page.advance(total);
    }

    pub fn previous_page(&mut self) {
        self.page.back();
    }

    pub fn go_to(&mut self, page: usize) {
        let total = self.meta().total_pages;
        self.page.go_to(page, total);
    }

    /// The visible slice and its pagination metadata.
    pub fn visible(&self) -> (&[Record], PageMeta) {
        paginate(&self.view, &self.page)
    }

    pub fn meta(&self) -> PageMeta {
        self.visible().1
    }

    /// Project the current page into a rendering collaborator. Pure with
    /// respect to this state; call after every transition.
    pub fn present_to(&self, sink: &mut dyn ViewSink) {
        let (rows, meta) = self.visible();
        sink.present(rows, &meta, &page_links(&meta));
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn view(&self) -> &[Record] {
        &self.view
    }

    pub fn query(&self) -> &QuerySpec {
        &self.query
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortDirection;

    fn record(id: i64, title: &str, price: f64) -> Record {
        Record {
            id,
            title: title.into(),
            price,
            description: String::new(),
            category: None,
            images: vec![],
        }
    }

    fn loaded(records: Vec<Record>) -> CatalogState {
        let mut catalog = CatalogState::new();
        catalog.load(records).unwrap();
        catalog
    }

    #[test]
    fn load_resets_query_and_page() {
        let mut catalog = loaded(vec![record(1, "Mug", 4.0), record(2, "Lamp", 20.0)]);
        catalog.set_search("mug");
        catalog.toggle_sort(SortField::Price);
        catalog.load(vec![record(3, "Desk", 100.0)]).unwrap();
        assert!(catalog.query().is_empty());
        assert_eq!(catalog.meta().current_page, 1);
        assert_eq!(catalog.view().len(), 1);
    }

    #[test]
    fn malformed_load_is_all_or_nothing() {
        let mut catalog = loaded(vec![record(1, "Mug", 4.0)]);
        let err = catalog
            .load(vec![record(2, "Lamp", 20.0), record(0, "Ghost", 1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MalformedRecord { index: 1, .. }
        ));
        // Previous contents survive.
        assert_eq!(catalog.records().len(), 1);
        assert_eq!(catalog.records()[0].id, 1);
    }

    #[test]
    fn empty_title_is_malformed() {
        let mut catalog = CatalogState::new();
        let err = catalog.load(vec![record(1, "", 4.0)]).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { index: 0, .. }));
    }

    #[test]
    fn update_patches_view_in_place_without_resorting() {
        let mut catalog = loaded(vec![
            record(1, "banana", 3.0),
            record(2, "apple", 2.0),
            record(3, "cherry", 9.0),
        ]);
        catalog.toggle_sort(SortField::Title);
        assert_eq!(catalog.view()[0].id, 2);

        // Rename apple past banana; its slot must not move.
        catalog.apply_update(record(2, "zucchini", 2.0)).unwrap();
        assert_eq!(catalog.view()[0].title, "zucchini");
        assert_eq!(catalog.view()[1].title, "banana");
        assert_eq!(catalog.records()[1].title, "zucchini");
    }

    #[test]
    fn update_of_missing_record_is_not_found() {
        let mut catalog = loaded(vec![record(1, "Mug", 4.0)]);
        let err = catalog.apply_update(record(9, "Ghost", 1.0)).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(9)));
        assert_eq!(catalog.records().len(), 1);
    }

    #[test]
    fn update_keeps_page_position() {
        let mut catalog = loaded(
            (1..=25i64)
                .map(|i| record(i, &format!("item {i}"), i as f64))
                .collect(),
        );
        catalog.go_to(3);
        catalog.apply_update(record(24, "renamed", 1.0)).unwrap();
        assert_eq!(catalog.meta().current_page, 3);
    }

    #[test]
    fn create_prepends_and_reruns_the_pipeline() {
        let mut catalog = loaded(vec![record(1, "Red mug", 8.0), record(2, "Lamp", 20.0)]);
        catalog.set_search("mug");
        catalog.apply_create(record(99, "Blue mug", 3.0));

        // Front of the source of truth.
        assert_eq!(catalog.records()[0].id, 99);
        // Participates in the active filter.
        assert_eq!(catalog.view().len(), 2);
        assert_eq!(catalog.view()[0].id, 99);
    }

    #[test]
    fn created_record_respects_active_filter() {
        let mut catalog = loaded(vec![record(1, "Red mug", 8.0)]);
        catalog.set_search("mug");
        catalog.apply_create(record(99, "Desk", 100.0));
        assert_eq!(catalog.records()[0].id, 99);
        assert!(catalog.view().iter().all(|r| r.id != 99));
    }

    #[test]
    fn search_resets_page() {
        let mut catalog = loaded(
            (1..=30i64)
                .map(|i| record(i, &format!("item {i}"), i as f64))
                .collect(),
        );
        catalog.next_page();
        assert_eq!(catalog.meta().current_page, 2);
        catalog.set_search("item");
        assert_eq!(catalog.meta().current_page, 1);
    }

    #[test]
    fn view_is_a_subset_of_records() {
        let mut catalog = loaded(vec![
            record(1, "Mug", 4.0),
            record(2, "Lamp", 20.0),
            record(3, "Mug rack", 14.0),
        ]);
        catalog.set_search("mug");
        for shown in catalog.view() {
            assert!(catalog.get(shown.id).is_some());
        }
    }
}
