//! `stockroom-export` — catalog export and schema-mapped import.
//!
//! The export side serializes the catalog (or a filtered subset) with a
//! stable column order; the import side reads CSV or JSON back through an
//! explicit header-alias table, applying documented defaults for missing
//! fields. Round-tripping an export through import reconstructs equivalent
//! items (same SKU, stock numbers and supplier fields). A serialized status
//! column is ignored on import: status is always derived from stock.

pub mod csv;
pub mod error;
pub mod json;
pub mod record;

pub use csv::{export_csv, export_tsv, import_csv};
pub use error::ImportError;
pub use json::{export_json, import_json};
pub use record::ItemRecord;
