//! Load → browse → edit → export, end to end against a canned document.

use vitrine_client::{load_catalog_from_str, LoadError};
use vitrine_core::{render_csv, CatalogState, EditPatch, ExportError, SortField, validate_patch};

fn document(n: usize) -> String {
    let records: Vec<String> = (1..=n)
        .map(|id| {
            format!(
                r#"{{"id": {id}, "title": "Product {id}", "price": {price},
                    "description": "Item number {id}",
                    "category": {{"id": 1, "name": "General"}},
                    "images": ["https://example.com/{id}.jpg"]}}"#,
                price = (n + 1 - id) as f64
            )
        })
        .collect();
    format!("[{}]", records.join(","))
}

#[test]
fn the_first_page_renders_after_load() {
    let mut catalog = CatalogState::new();
    let count = load_catalog_from_str(&document(12), &mut catalog).unwrap();
    assert_eq!(count, 12);

    let (rows, meta) = catalog.visible();
    assert_eq!(rows.len(), 10);
    assert_eq!(meta.total_pages, 2);
    assert_eq!(rows[0].title, "Product 1");
}

#[test]
fn browsing_filters_sorts_and_pages() {
    let mut catalog = CatalogState::new();
    load_catalog_from_str(&document(12), &mut catalog).unwrap();

    catalog.set_search("product 1");
    // Product 1, 10, 11, 12.
    assert_eq!(catalog.view().len(), 4);

    catalog.toggle_sort(SortField::Price);
    let prices: Vec<f64> = catalog.view().iter().map(|r| r.price).collect();
    assert!(prices.windows(2).all(|p| p[0] <= p[1]));
    assert_eq!(catalog.meta().current_page, 1);
}

#[test]
fn a_rejected_draft_never_reaches_the_store() {
    let mut catalog = CatalogState::new();
    load_catalog_from_str(&document(3), &mut catalog).unwrap();

    let mut patch = EditPatch::for_record(&catalog.records()[0]);
    patch.price = -5.0;
    let errors = validate_patch(&patch);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "price");
    assert_eq!(catalog.get(1).unwrap().price, 3.0);
}

#[test]
fn the_visible_page_exports_as_csv() {
    let mut catalog = CatalogState::new();
    load_catalog_from_str(&document(12), &mut catalog).unwrap();
    catalog.next_page();

    let (rows, _) = catalog.visible();
    let csv = render_csv(rows).unwrap();
    assert!(csv.contains("Product 11"));
    assert!(csv.contains("Product 12"));
    assert!(!csv.contains("Product 5,"));
}

#[test]
fn an_empty_view_has_nothing_to_export() {
    let mut catalog = CatalogState::new();
    load_catalog_from_str(&document(3), &mut catalog).unwrap();
    catalog.set_search("nothing matches this");

    let (rows, _) = catalog.visible();
    assert!(matches!(render_csv(rows), Err(ExportError::EmptyPage)));
}

#[test]
fn an_unparseable_document_keeps_the_store_empty() {
    let mut catalog = CatalogState::new();
    let err = load_catalog_from_str("{\"not\": \"an array\"}", &mut catalog).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(catalog.is_empty());
}
