//! The owned operations store.
//!
//! Execution pipeline for every workflow operation:
//!
//! ```text
//! operation arguments
//!   ↓
//! 1. Locate the records involved (unknown ids are NotFound)
//!   ↓
//! 2. Handle commands on the aggregates (pure decision logic, produces events)
//!   ↓
//! 3. Apply events to the owned collections
//!   ↓
//! 4. Publish each applied event on the bus (observers, audit, tests)
//! ```
//!
//! Step 2 runs for *every* aggregate an operation touches before step 3
//! applies anything, so a rejection leaves the store untouched
//! (all-or-nothing per operation). There is no locking discipline because
//! there is no concurrent access: the store has a single logical owner.
//! Adapting this to a multi-user context would require per-item locking
//! around `execute_transfer` and the reorder creation paths.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_catalog::{
    CatalogCommand, DeductStock, FlagReorderPending, InventoryItem, ItemId, ReceiveStock,
    RegisterItem,
};
use stockroom_core::{Aggregate, AggregateId, DomainError, DomainResult};
use stockroom_events::{EventBus, InMemoryEventBus, Subscription};
use stockroom_metrics::StockOverview;
use stockroom_reorders::{
    CancelReorder, OpenReorder, ReorderCommand, ReorderId, ReorderRequest, ReorderUrgency,
};
use stockroom_transfers::{
    RequestTransfer, TransferCommand, TransferId, TransferPriority, TransferRequest,
};

use crate::ops_event::OpsEvent;

/// Operation: execute an inter-location transfer.
///
/// The source location is the item's own; the stock decrement happens
/// immediately at creation, with no hold or reservation phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteTransfer {
    pub transfer_id: TransferId,
    pub item_id: ItemId,
    pub to_location: String,
    pub quantity: i64,
    pub priority: TransferPriority,
    pub estimated_arrival: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

/// Operation: open a manual reorder request.
///
/// Supplier, item name and unit price are taken from the catalog item; the
/// requester is free text identifying the human (or system) asking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReorder {
    pub reorder_id: ReorderId,
    pub item_id: ItemId,
    pub quantity: i64,
    pub urgency: ReorderUrgency,
    pub requested_by: String,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// The single owned catalog/workflow context for a session.
///
/// Holds the three collections the dashboard works over (items, transfers,
/// reorders) plus the bus that accepted events are published on.
pub struct OperationsStore {
    items: Vec<InventoryItem>,
    transfers: Vec<TransferRequest>,
    reorders: Vec<ReorderRequest>,
    bus: Arc<InMemoryEventBus<OpsEvent>>,
}

impl OperationsStore {
    pub fn new() -> Self {
        Self::with_bus(Arc::new(InMemoryEventBus::new()))
    }

    pub fn with_bus(bus: Arc<InMemoryEventBus<OpsEvent>>) -> Self {
        Self {
            items: Vec::new(),
            transfers: Vec::new(),
            reorders: Vec::new(),
            bus,
        }
    }

    /// Subscribe to every event this store applies from now on.
    pub fn subscribe(&self) -> Subscription<OpsEvent> {
        self.bus.subscribe()
    }

    // ---- catalog -------------------------------------------------------

    /// Register an item in the catalog (load or import).
    ///
    /// SKUs are unique across the catalog.
    pub fn register_item(&mut self, cmd: RegisterItem) -> DomainResult<ItemId> {
        if self.items.iter().any(|i| i.id_typed() == cmd.item_id) {
            return Err(DomainError::conflict("item id already registered"));
        }
        if self.items.iter().any(|i| i.sku() == cmd.sku) {
            return Err(DomainError::conflict(format!(
                "sku already registered: {}",
                cmd.sku
            )));
        }

        let mut item = InventoryItem::empty(cmd.item_id);
        let events = item.handle(&CatalogCommand::RegisterItem(cmd))?;
        for event in &events {
            item.apply(event);
        }
        let item_id = item.id_typed();
        tracing::debug!(item = %item_id, sku = item.sku(), "item registered");
        self.items.push(item);
        for event in events {
            self.publish(event.into());
        }
        Ok(item_id)
    }

    /// Record a goods-received replenishment.
    ///
    /// This is the explicit external event that lifts a reorder-pending
    /// override; the effective status reverts to the classifier's output.
    pub fn receive_stock(
        &mut self,
        item_id: ItemId,
        quantity: i64,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<i64> {
        let idx = self.item_index(item_id)?;
        let events = self.items[idx].handle(&CatalogCommand::ReceiveStock(ReceiveStock {
            item_id,
            quantity,
            occurred_at,
        }))?;
        for event in &events {
            self.items[idx].apply(event);
        }
        let stock = self.items[idx].current_stock();
        for event in events {
            self.publish(event.into());
        }
        Ok(stock)
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn item(&self, item_id: ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.id_typed() == item_id)
    }

    pub fn find_by_sku(&self, sku: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.sku() == sku)
    }

    // ---- transfers -----------------------------------------------------

    /// Create an inter-location transfer, decrementing the source stock.
    ///
    /// Both decisions (the transfer request and the stock deduction) are
    /// validated before either is applied.
    pub fn execute_transfer(&mut self, cmd: ExecuteTransfer) -> DomainResult<TransferId> {
        if self.transfer(cmd.transfer_id).is_some() {
            return Err(DomainError::conflict("transfer id already in use"));
        }
        let idx = self.item_index(cmd.item_id)?;

        let request = {
            let item = &self.items[idx];
            RequestTransfer {
                transfer_id: cmd.transfer_id,
                item_id: cmd.item_id,
                item_name: item.name().to_string(),
                from_location: item.location().to_string(),
                to_location: cmd.to_location.clone(),
                quantity: cmd.quantity,
                priority: cmd.priority,
                estimated_arrival: cmd.estimated_arrival,
                occurred_at: cmd.occurred_at,
            }
        };

        let mut transfer = TransferRequest::empty(cmd.transfer_id);
        let transfer_events = transfer.handle(&TransferCommand::RequestTransfer(request))?;
        let item_events = self.items[idx].handle(&CatalogCommand::DeductStock(DeductStock {
            item_id: cmd.item_id,
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        }))?;

        for event in &transfer_events {
            transfer.apply(event);
        }
        for event in &item_events {
            self.items[idx].apply(event);
        }

        tracing::info!(
            transfer = %cmd.transfer_id,
            item = %cmd.item_id,
            quantity = cmd.quantity,
            to = cmd.to_location.as_str(),
            "transfer requested"
        );

        self.transfers.push(transfer);
        for event in transfer_events {
            self.publish(event.into());
        }
        for event in item_events {
            self.publish(event.into());
        }
        Ok(cmd.transfer_id)
    }

    /// Advance a pending transfer to in-transit. Stock is untouched.
    pub fn start_transfer(
        &mut self,
        transfer_id: TransferId,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        use stockroom_transfers::StartTransfer;
        self.advance_transfer(
            transfer_id,
            TransferCommand::StartTransfer(StartTransfer {
                transfer_id,
                occurred_at,
            }),
        )
    }

    /// Mark an in-transit transfer delivered. Stock is untouched.
    pub fn complete_transfer(
        &mut self,
        transfer_id: TransferId,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        use stockroom_transfers::MarkDelivered;
        self.advance_transfer(
            transfer_id,
            TransferCommand::MarkDelivered(MarkDelivered {
                transfer_id,
                occurred_at,
            }),
        )
    }

    /// Cancel a pending or in-transit transfer.
    ///
    /// The source item's stock is not restored.
    pub fn cancel_transfer(
        &mut self,
        transfer_id: TransferId,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        use stockroom_transfers::CancelTransfer;
        self.advance_transfer(
            transfer_id,
            TransferCommand::CancelTransfer(CancelTransfer {
                transfer_id,
                occurred_at,
            }),
        )
    }

    pub fn transfers(&self) -> &[TransferRequest] {
        &self.transfers
    }

    pub fn transfer(&self, transfer_id: TransferId) -> Option<&TransferRequest> {
        self.transfers.iter().find(|t| t.id_typed() == transfer_id)
    }

    // ---- reorders ------------------------------------------------------

    /// Open a manual reorder request and flag the item reorder-pending.
    pub fn create_reorder(&mut self, cmd: CreateReorder) -> DomainResult<ReorderId> {
        let idx = self.item_index(cmd.item_id)?;
        let open = {
            let item = &self.items[idx];
            OpenReorder {
                reorder_id: cmd.reorder_id,
                item_id: cmd.item_id,
                item_name: item.name().to_string(),
                supplier: item.supplier().to_string(),
                quantity: cmd.quantity,
                unit_price: item.price(),
                urgency: cmd.urgency,
                requested_by: cmd.requested_by,
                notes: cmd.notes,
                occurred_at: cmd.occurred_at,
            }
        };
        self.open_reorder(idx, open)
    }

    /// System-triggered reorder for one item (no human input).
    pub fn auto_reorder(
        &mut self,
        reorder_id: ReorderId,
        item_id: ItemId,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<ReorderId> {
        let idx = self.item_index(item_id)?;
        let open = OpenReorder::automatic(reorder_id, &self.items[idx], occurred_at);
        self.open_reorder(idx, open)
    }

    /// Bulk auto-reorder over every item that currently needs restocking
    /// (effective status out-of-stock or low-stock).
    ///
    /// Items flagged by an earlier pass no longer qualify, so running this
    /// twice in a row creates nothing the second time. This is the only
    /// "automatic" trigger in the core; nothing watches stock mutations.
    pub fn auto_reorder_low_stock(
        &mut self,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Vec<ReorderId>> {
        use stockroom_catalog::StockStatus;

        let needing_restock: Vec<ItemId> = self
            .items
            .iter()
            .filter(|item| {
                matches!(
                    item.status(),
                    StockStatus::OutOfStock | StockStatus::LowStock
                )
            })
            .map(|item| item.id_typed())
            .collect();

        let mut opened = Vec::with_capacity(needing_restock.len());
        for item_id in needing_restock {
            let reorder_id = ReorderId::new(AggregateId::new());
            opened.push(self.auto_reorder(reorder_id, item_id, occurred_at)?);
        }
        tracing::info!(count = opened.len(), "bulk auto-reorder finished");
        Ok(opened)
    }

    /// Approve a pending reorder.
    pub fn approve_reorder(
        &mut self,
        reorder_id: ReorderId,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        use stockroom_reorders::ApproveReorder;
        self.advance_reorder(
            reorder_id,
            ReorderCommand::ApproveReorder(ApproveReorder {
                reorder_id,
                occurred_at,
            }),
        )
    }

    /// Place an approved reorder with the supplier.
    pub fn place_order(
        &mut self,
        reorder_id: ReorderId,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        use stockroom_reorders::PlaceOrder;
        self.advance_reorder(
            reorder_id,
            ReorderCommand::PlaceOrder(PlaceOrder {
                reorder_id,
                occurred_at,
            }),
        )
    }

    /// Mark an ordered reorder delivered (terminal).
    ///
    /// The stock itself arrives through `receive_stock`, a separate and
    /// explicit replenishment event.
    pub fn complete_reorder(
        &mut self,
        reorder_id: ReorderId,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        use stockroom_reorders::MarkDelivered;
        self.advance_reorder(
            reorder_id,
            ReorderCommand::MarkDelivered(MarkDelivered {
                reorder_id,
                occurred_at,
            }),
        )
    }

    /// Cancel a pending reorder, removing it from the queue.
    pub fn cancel_reorder(
        &mut self,
        reorder_id: ReorderId,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.advance_reorder(
            reorder_id,
            ReorderCommand::CancelReorder(CancelReorder {
                reorder_id,
                occurred_at,
            }),
        )?;
        self.reorders.retain(|r| !r.is_cancelled());
        Ok(())
    }

    pub fn reorders(&self) -> &[ReorderRequest] {
        &self.reorders
    }

    pub fn reorder(&self, reorder_id: ReorderId) -> Option<&ReorderRequest> {
        self.reorders.iter().find(|r| r.id_typed() == reorder_id)
    }

    // ---- metrics -------------------------------------------------------

    /// Snapshot summary, recomputed from the current collections.
    pub fn overview(&self) -> StockOverview {
        StockOverview::compute(&self.items, &self.transfers, &self.reorders)
    }

    // ---- internals -----------------------------------------------------

    fn item_index(&self, item_id: ItemId) -> DomainResult<usize> {
        self.items
            .iter()
            .position(|i| i.id_typed() == item_id)
            .ok_or(DomainError::NotFound)
    }

    fn open_reorder(&mut self, item_idx: usize, open: OpenReorder) -> DomainResult<ReorderId> {
        let reorder_id = open.reorder_id;
        if self.reorder(reorder_id).is_some() {
            return Err(DomainError::conflict("reorder id already in use"));
        }

        let item_id = open.item_id;
        let occurred_at = open.occurred_at;
        let mut reorder = ReorderRequest::empty(reorder_id);
        let reorder_events = reorder.handle(&ReorderCommand::OpenReorder(open))?;
        let item_events =
            self.items[item_idx].handle(&CatalogCommand::FlagReorderPending(FlagReorderPending {
                item_id,
                occurred_at,
            }))?;

        for event in &reorder_events {
            reorder.apply(event);
        }
        for event in &item_events {
            self.items[item_idx].apply(event);
        }

        tracing::info!(
            reorder = %reorder_id,
            item = %item_id,
            quantity = reorder.quantity(),
            requested_by = reorder.requested_by(),
            "reorder opened"
        );

        self.reorders.push(reorder);
        for event in reorder_events {
            self.publish(event.into());
        }
        for event in item_events {
            self.publish(event.into());
        }
        Ok(reorder_id)
    }

    fn advance_transfer(
        &mut self,
        transfer_id: TransferId,
        command: TransferCommand,
    ) -> DomainResult<()> {
        let idx = self
            .transfers
            .iter()
            .position(|t| t.id_typed() == transfer_id)
            .ok_or(DomainError::NotFound)?;

        let events = self.transfers[idx].handle(&command)?;
        for event in &events {
            self.transfers[idx].apply(event);
        }
        for event in events {
            self.publish(event.into());
        }
        Ok(())
    }

    fn advance_reorder(
        &mut self,
        reorder_id: ReorderId,
        command: ReorderCommand,
    ) -> DomainResult<()> {
        let idx = self
            .reorders
            .iter()
            .position(|r| r.id_typed() == reorder_id)
            .ok_or(DomainError::NotFound)?;

        let events = self.reorders[idx].handle(&command)?;
        for event in &events {
            self.reorders[idx].apply(event);
        }
        for event in events {
            self.publish(event.into());
        }
        Ok(())
    }

    fn publish(&self, event: OpsEvent) {
        // The event is already applied; publication is distribution only.
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!("event publish failed: {err:?}");
        }
    }
}

impl Default for OperationsStore {
    fn default() -> Self {
        Self::new()
    }
}
