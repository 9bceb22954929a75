//! vitrine-client: remote sync for the vitrine product catalog.
//!
//! Talks to the product service (bulk load, replace-style update, create)
//! and reconciles confirmed records back into
//! [`vitrine_core::CatalogState`] — one in-flight call per logical
//! action, stale responses dropped by generation.

pub mod api;
pub mod load;
pub mod sync;

pub use api::{ApiClient, ApiConfig, ApiError, DEFAULT_BASE_URL};
pub use load::{load_catalog, load_catalog_from_str, parse_catalog, LoadError};
pub use sync::{
    Notice, SubmitError, SyncAction, SyncEngine, SyncPhase, SyncTicket, CREATE_NOTICE_TTL,
    UPDATE_NOTICE_TTL,
};
