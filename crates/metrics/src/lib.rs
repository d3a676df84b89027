//! `stockroom-metrics` — derived read-only summaries.
//!
//! Every function recomputes from the collections it is handed. Nothing is
//! cached: mutation frequency is low and the collections are bounded by
//! catalog size, so recompute-on-read can never serve a stale count.

pub mod summary;

pub use summary::{
    StockOverview, active_transfers, low_stock_items, out_of_stock_items, pending_reorders,
    total_value,
};
