//! `stockroom-catalog` — the item catalog domain.
//!
//! Holds the `InventoryItem` aggregate, the pure stock-status classifier and
//! the read-side catalog queries (search, category filtering).

pub mod item;
pub mod query;
pub mod status;

pub use item::{
    CatalogCommand, CatalogEvent, DeductStock, FlagReorderPending, InventoryItem, ItemId,
    ItemRegistered, RegisterItem, ReceiveStock, ReorderFlagged, StatusOverride, StockDeducted,
    StockReceived,
};
pub use query::{categories, filter_items};
pub use status::{StockStatus, classify};
