//! Keyword research pipeline: reference data, search forms, execution,
//! rendering and CSV export.

pub mod catalog;
pub mod csv;
pub mod executor;
pub mod form;
pub mod render;
pub mod source;
pub mod store;
pub mod trend;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{default_language, CatalogState, ReferenceDataStore};
pub use csv::{export_csv, export_file_name, CSV_CONTENT_TYPE};
pub use executor::{QueryExecutor, QueryOutcome};
pub use form::{
    Depth, FormError, QueryForm, QueryParams, QueryRequest, ResultLimit, SearchInput,
};
pub use render::{render_row, KeywordRow, ResultView};
pub use source::{CatalogSource, KeywordSource};
pub use store::Store;
pub use trend::{sparkline, Sparkline};
