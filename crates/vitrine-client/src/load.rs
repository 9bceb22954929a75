//! Bulk catalog load: fetch, parse, and all-or-nothing store replace.

use thiserror::Error;
use tracing::debug;

use vitrine_core::{CatalogError, CatalogState, Record};

use crate::api::{ApiClient, ApiError};

/// Errors fatal to the initial render; the table stays hidden and the
/// user reloads.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] ApiError),

    #[error("could not parse catalog: {message}")]
    Parse { message: String },

    #[error(transparent)]
    Malformed(#[from] CatalogError),

    /// The service answered with zero records; treated as an error state
    /// rather than an empty table.
    #[error("no products found")]
    Empty,
}

/// Parse a raw catalog document (a service response or a local
/// `db.json`).
pub fn parse_catalog(json: &str) -> Result<Vec<Record>, LoadError> {
    serde_json::from_str(json).map_err(|e| LoadError::Parse {
        message: e.to_string(),
    })
}

/// Load a pre-fetched document into the store.
pub fn load_catalog_from_str(json: &str, catalog: &mut CatalogState) -> Result<usize, LoadError> {
    finish_load(parse_catalog(json)?, catalog)
}

/// Fetch the catalog from the service and replace the store contents.
pub async fn load_catalog(
    api: &ApiClient,
    catalog: &mut CatalogState,
) -> Result<usize, LoadError> {
    finish_load(api.fetch_catalog().await?, catalog)
}

fn finish_load(records: Vec<Record>, catalog: &mut CatalogState) -> Result<usize, LoadError> {
    if records.is_empty() {
        return Err(LoadError::Empty);
    }
    let count = catalog.load(records)?;
    debug!(count, "catalog loaded");
    Ok(count)
}
