//! Rendering seam.
//!
//! The state machine never draws; it projects each computed page into a
//! [`ViewSink`] collaborator. Implementations render a table, a TUI list,
//! or a test recorder; they must not mutate catalog state.

use crate::page::{PageLink, PageMeta};
use crate::record::Record;

/// Consumer of a fully computed page.
pub trait ViewSink {
    /// Present the visible rows, their pagination metadata, and the
    /// page-number strip. An empty `rows` with empty `links` means
    /// "no results": hide the table and the pagination chrome.
    fn present(&mut self, rows: &[Record], meta: &PageMeta, links: &[PageLink]);
}
