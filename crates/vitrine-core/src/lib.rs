//! vitrine-core: catalog state machine for the vitrine product viewer.
//!
//! Pure data transformations only:
//! - Record/Category domain model and edit/create drafts
//! - Catalog store (source-of-truth record set + derived view)
//! - Search/sort query pipeline
//! - Pagination window and page-link strip
//! - Draft validation
//! - CSV export of the visible page
//!
//! Network I/O lives in vitrine-client; rendering lives behind the
//! [`ViewSink`] seam.

pub mod export;
pub mod page;
pub mod query;
pub mod record;
pub mod render;
pub mod store;
pub mod validate;

pub use export::{export_filename, render_csv, timestamped_filename, ExportError};
pub use page::{page_links, paginate, PageLink, PageMeta, PageState, DEFAULT_PER_PAGE};
pub use query::{QuerySpec, SortDirection, SortField, SortKey};
pub use record::{Category, EditPatch, NewRecord, Record, RecordId};
pub use render::ViewSink;
pub use store::{CatalogError, CatalogState};
pub use validate::{validate_new, validate_patch, FieldError};
