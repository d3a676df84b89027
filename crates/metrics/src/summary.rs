use serde::{Deserialize, Serialize};

use stockroom_catalog::{InventoryItem, StockStatus};
use stockroom_core::Money;
use stockroom_reorders::{ReorderRequest, ReorderStatus};
use stockroom_transfers::TransferRequest;

/// Items whose effective status is out-of-stock.
pub fn out_of_stock_items(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items
        .iter()
        .filter(|item| item.status() == StockStatus::OutOfStock)
        .collect()
}

/// Items needing restocking: effective status low-stock or out-of-stock.
///
/// Filters on the effective status, so an item pinned to reorder-pending
/// drops out of this list until the override clears.
pub fn low_stock_items(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items
        .iter()
        .filter(|item| {
            matches!(
                item.status(),
                StockStatus::LowStock | StockStatus::OutOfStock
            )
        })
        .collect()
}

/// Total catalog value: Σ current stock × unit price.
pub fn total_value(items: &[InventoryItem]) -> Money {
    items.iter().fold(Money::ZERO, |total, item| {
        total.saturating_add(item.price().total(item.current_stock()))
    })
}

/// Reorders awaiting fulfilment: pending or approved.
pub fn pending_reorders(reorders: &[ReorderRequest]) -> Vec<&ReorderRequest> {
    reorders
        .iter()
        .filter(|reorder| {
            matches!(
                reorder.status(),
                ReorderStatus::Pending | ReorderStatus::Approved
            )
        })
        .collect()
}

/// Transfers still moving: neither completed nor cancelled.
pub fn active_transfers(transfers: &[TransferRequest]) -> Vec<&TransferRequest> {
    transfers
        .iter()
        .filter(|transfer| !transfer.status().is_terminal())
        .collect()
}

/// One-shot summary across the catalog and both workflow queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOverview {
    pub total_items: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub pending_reorders: usize,
    pub active_transfers: usize,
    pub total_value: Money,
}

impl StockOverview {
    pub fn compute(
        items: &[InventoryItem],
        transfers: &[TransferRequest],
        reorders: &[ReorderRequest],
    ) -> Self {
        Self {
            total_items: items.len(),
            out_of_stock: out_of_stock_items(items).len(),
            low_stock: low_stock_items(items).len(),
            pending_reorders: pending_reorders(reorders).len(),
            active_transfers: active_transfers(transfers).len(),
            total_value: total_value(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use stockroom_core::{Aggregate, AggregateId};

    use stockroom_catalog::{CatalogCommand, FlagReorderPending, ItemId, RegisterItem};
    use stockroom_reorders::{OpenReorder, ReorderCommand, ReorderId, ReorderUrgency};

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn item(sku: &str, current_stock: i64, price_cents: u64) -> InventoryItem {
        let item_id = ItemId::new(AggregateId::new());
        let mut item = InventoryItem::empty(item_id);
        let events = item
            .handle(&CatalogCommand::RegisterItem(RegisterItem {
                item_id,
                sku: sku.to_string(),
                name: format!("Item {sku}"),
                category: "Beverages".to_string(),
                location: "Store #001".to_string(),
                supplier: "Coffee Co.".to_string(),
                supplier_contact: "orders@coffeeco.com".to_string(),
                current_stock,
                min_stock: 10,
                max_stock: 100,
                reorder_point: 15,
                reorder_quantity: 50,
                price: Money::from_cents(price_cents),
                lead_time_days: 3,
                last_order_date: None,
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            item.apply(event);
        }
        item
    }

    fn reorder(status_steps: usize) -> ReorderRequest {
        let reorder_id = ReorderId::new(AggregateId::new());
        let mut reorder = ReorderRequest::empty(reorder_id);
        let events = reorder
            .handle(&ReorderCommand::OpenReorder(OpenReorder {
                reorder_id,
                item_id: ItemId::new(AggregateId::new()),
                item_name: "Artisan Bread".to_string(),
                supplier: "Local Bakery".to_string(),
                quantity: 25,
                unit_price: Money::from_cents(699),
                urgency: ReorderUrgency::High,
                requested_by: "Store Manager".to_string(),
                notes: None,
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            reorder.apply(event);
        }

        use stockroom_reorders::{ApproveReorder, MarkDelivered, PlaceOrder};
        let steps = [
            ReorderCommand::ApproveReorder(ApproveReorder {
                reorder_id,
                occurred_at: test_time(),
            }),
            ReorderCommand::PlaceOrder(PlaceOrder {
                reorder_id,
                occurred_at: test_time(),
            }),
            ReorderCommand::MarkDelivered(MarkDelivered {
                reorder_id,
                occurred_at: test_time(),
            }),
        ];
        for cmd in steps.into_iter().take(status_steps) {
            let events = reorder.handle(&cmd).unwrap();
            for event in &events {
                reorder.apply(event);
            }
        }
        reorder
    }

    #[test]
    fn filters_split_out_of_stock_and_low_stock() {
        let items = vec![item("A", 0, 100), item("B", 5, 100), item("C", 50, 100)];

        assert_eq!(out_of_stock_items(&items).len(), 1);
        assert_eq!(low_stock_items(&items).len(), 2);
    }

    #[test]
    fn reorder_pending_items_leave_the_low_stock_list() {
        let mut flagged = item("A", 0, 100);
        let events = flagged
            .handle(&CatalogCommand::FlagReorderPending(FlagReorderPending {
                item_id: flagged.id_typed(),
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            flagged.apply(event);
        }
        let items = vec![flagged, item("B", 5, 100)];

        assert!(out_of_stock_items(&items).is_empty());
        assert_eq!(low_stock_items(&items).len(), 1);
    }

    #[test]
    fn total_value_sums_stock_times_price() {
        // 45 × $12.99 + 8 × $4.99 = $584.55 + $39.92 = $624.47
        let items = vec![item("A", 45, 1299), item("B", 8, 499)];
        assert_eq!(total_value(&items), Money::from_cents(62447));
    }

    #[test]
    fn pending_reorders_count_pending_and_approved_only() {
        let reorders = vec![reorder(0), reorder(1), reorder(2), reorder(3)];
        assert_eq!(pending_reorders(&reorders).len(), 2);
    }

    #[test]
    fn overview_reflects_current_collections_exactly() {
        let items = vec![item("A", 0, 699), item("B", 8, 499), item("C", 45, 1299)];
        let reorders = vec![reorder(0)];

        let overview = StockOverview::compute(&items, &[], &reorders);
        assert_eq!(overview.total_items, 3);
        assert_eq!(overview.out_of_stock, 1);
        assert_eq!(overview.low_stock, 2);
        assert_eq!(overview.pending_reorders, 1);
        assert_eq!(overview.active_transfers, 0);
        // 8 × $4.99 + 45 × $12.99 = $39.92 + $584.55 = $624.47
        assert_eq!(overview.total_value, Money::from_cents(62447));
    }
}
