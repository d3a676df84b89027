//! The interchange record and its field defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_catalog::{InventoryItem, ItemId, RegisterItem};
use stockroom_core::{AggregateId, Money};

/// Defaults applied when an import omits a field.
pub(crate) mod defaults {
    pub fn category() -> String {
        "Imported".to_string()
    }

    pub fn location() -> String {
        "Imported Location".to_string()
    }

    pub fn supplier() -> String {
        "Unknown Supplier".to_string()
    }

    pub fn min_stock() -> i64 {
        10
    }

    pub fn max_stock() -> i64 {
        100
    }

    pub fn reorder_point() -> i64 {
        20
    }

    pub fn reorder_quantity() -> i64 {
        50
    }

    pub fn lead_time() -> u32 {
        3
    }
}

/// One catalog item on the wire.
///
/// Field names follow the dashboard's JSON contract (camelCase, `leadTime`
/// in days). `status` is written on export for human readers and ignored on
/// import. Prices travel as decimal dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    /// Carried by JSON exports; CSV has no id column. Absent ids are minted
    /// fresh on import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "defaults::category")]
    pub category: String,
    #[serde(default)]
    pub current_stock: i64,
    #[serde(default = "defaults::min_stock")]
    pub min_stock: i64,
    #[serde(default = "defaults::max_stock")]
    pub max_stock: i64,
    #[serde(default = "defaults::reorder_point")]
    pub reorder_point: i64,
    #[serde(default = "defaults::reorder_quantity")]
    pub reorder_quantity: i64,
    #[serde(default = "defaults::location")]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "defaults::supplier")]
    pub supplier: String,
    #[serde(default)]
    pub supplier_contact: String,
    #[serde(rename = "leadTime", default = "defaults::lead_time")]
    pub lead_time_days: u32,
}

impl ItemRecord {
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            id: Some(item.id_typed()),
            sku: item.sku().to_string(),
            name: item.name().to_string(),
            category: item.category().to_string(),
            current_stock: item.current_stock(),
            min_stock: item.min_stock(),
            max_stock: item.max_stock(),
            reorder_point: item.reorder_point(),
            reorder_quantity: item.reorder_quantity(),
            location: item.location().to_string(),
            status: Some(item.status().as_str().to_string()),
            price: item.price().cents() as f64 / 100.0,
            supplier: item.supplier().to_string(),
            supplier_contact: item.supplier_contact().to_string(),
            lead_time_days: item.lead_time_days(),
        }
    }

    /// Convert to a registration command, filling per-row fallbacks.
    ///
    /// `seq` is the 1-based position in the imported batch, used for the
    /// `Imported Item {n}` / `IMP-{n}` fallbacks when name or SKU is absent.
    /// The record's own id is kept when it has one (JSON round-trips);
    /// otherwise a fresh id is minted.
    pub fn to_register(&self, seq: usize, occurred_at: DateTime<Utc>) -> RegisterItem {
        let name = if self.name.trim().is_empty() {
            format!("Imported Item {seq}")
        } else {
            self.name.clone()
        };
        let sku = if self.sku.trim().is_empty() {
            format!("IMP-{seq}")
        } else {
            self.sku.clone()
        };
        let price_cents = (self.price * 100.0).round().max(0.0) as u64;

        RegisterItem {
            item_id: self
                .id
                .unwrap_or_else(|| ItemId::new(AggregateId::new())),
            sku,
            name,
            category: self.category.clone(),
            location: self.location.clone(),
            supplier: self.supplier.clone(),
            supplier_contact: self.supplier_contact.clone(),
            current_stock: self.current_stock,
            min_stock: self.min_stock,
            max_stock: self.max_stock,
            reorder_point: self.reorder_point,
            reorder_quantity: self.reorder_quantity,
            price: Money::from_cents(price_cents),
            lead_time_days: self.lead_time_days,
            last_order_date: None,
            occurred_at,
        }
    }
}
