//! Stock status classification.

use serde::{Deserialize, Serialize};

/// Stock status of a catalog item.
///
/// Wire spellings match the dashboard contract (`in-stock`, `low-stock`,
/// `out-of-stock`, `overstocked`, `reorder-pending`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
    Overstocked,
    ReorderPending,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
            StockStatus::Overstocked => "overstocked",
            StockStatus::ReorderPending => "reorder-pending",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a stock level against its thresholds.
///
/// Total over non-negative stock counts. Checks are answered in order, so
/// disordered thresholds (`min_stock > max_stock`, possible with imported
/// data) still yield an answer, falling back to `InStock` when nothing
/// matches. Never returns `ReorderPending`: that is an override imposed by
/// the reorder workflow, not a computed status.
pub fn classify(current_stock: i64, min_stock: i64, max_stock: i64) -> StockStatus {
    if current_stock <= 0 {
        StockStatus::OutOfStock
    } else if current_stock < min_stock {
        StockStatus::LowStock
    } else if current_stock > max_stock {
        StockStatus::Overstocked
    } else {
        StockStatus::InStock
    }
}
