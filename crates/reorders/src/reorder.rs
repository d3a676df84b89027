use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_catalog::{InventoryItem, ItemId, StockStatus};
use stockroom_core::{Aggregate, AggregateId, AggregateRoot, DomainError, Money};
use stockroom_events::Event;

/// `requested_by` value stamped on system-triggered reorders.
pub const AUTO_REORDER_REQUESTER: &str = "Auto-Reorder System";

/// Reorder request identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReorderId(pub AggregateId);

impl ReorderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ReorderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Human triage urgency; guides approval order, nothing is scheduled off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderUrgency {
    Low,
    Medium,
    High,
    Critical,
}

/// Reorder lifecycle.
///
/// pending → approved → ordered → delivered; a pending request may instead be
/// cancelled, which removes it from the queue entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderStatus {
    Pending,
    Approved,
    Ordered,
    Delivered,
}

impl ReorderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReorderStatus::Pending => "pending",
            ReorderStatus::Approved => "approved",
            ReorderStatus::Ordered => "ordered",
            ReorderStatus::Delivered => "delivered",
        }
    }
}

impl core::fmt::Display for ReorderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate root: ReorderRequest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderRequest {
    id: ReorderId,
    item_id: Option<ItemId>,
    item_name: String,
    supplier: String,
    quantity: i64,
    estimated_cost: Money,
    urgency: ReorderUrgency,
    requested_by: String,
    requested_at: DateTime<Utc>,
    status: ReorderStatus,
    notes: Option<String>,
    cancelled: bool,
    version: u64,
    created: bool,
}

impl ReorderRequest {
    /// Create an empty, not-yet-opened aggregate instance.
    pub fn empty(id: ReorderId) -> Self {
        Self {
            id,
            item_id: None,
            item_name: String::new(),
            supplier: String::new(),
            quantity: 0,
            estimated_cost: Money::ZERO,
            urgency: ReorderUrgency::Medium,
            requested_by: String::new(),
            requested_at: DateTime::<Utc>::UNIX_EPOCH,
            status: ReorderStatus::Pending,
            notes: None,
            cancelled: false,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ReorderId {
        self.id
    }

    pub fn item_id(&self) -> Option<ItemId> {
        self.item_id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn estimated_cost(&self) -> Money {
        self.estimated_cost
    }

    pub fn urgency(&self) -> ReorderUrgency {
        self.urgency
    }

    pub fn requested_by(&self) -> &str {
        &self.requested_by
    }

    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    pub fn status(&self) -> ReorderStatus {
        self.status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// True once a `ReorderCancelled` event was applied; the owning store
    /// drops such records from its queue.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl AggregateRoot for ReorderRequest {
    type Id = ReorderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: OpenReorder.
///
/// `unit_price` comes from the catalog item; the estimated cost is computed
/// at decision time so it is exactly `quantity × unit_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenReorder {
    pub reorder_id: ReorderId,
    pub item_id: ItemId,
    pub item_name: String,
    pub supplier: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub urgency: ReorderUrgency,
    pub requested_by: String,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl OpenReorder {
    /// System-triggered variant with no human input.
    ///
    /// Quantity comes from the item's configured reorder quantity; urgency is
    /// critical for an out-of-stock item and high otherwise; the notes record
    /// the stock level and reorder point that triggered it.
    pub fn automatic(reorder_id: ReorderId, item: &InventoryItem, occurred_at: DateTime<Utc>) -> Self {
        let urgency = if item.status() == StockStatus::OutOfStock {
            ReorderUrgency::Critical
        } else {
            ReorderUrgency::High
        };

        Self {
            reorder_id,
            item_id: item.id_typed(),
            item_name: item.name().to_string(),
            supplier: item.supplier().to_string(),
            quantity: item.reorder_quantity(),
            unit_price: item.price(),
            urgency,
            requested_by: AUTO_REORDER_REQUESTER.to_string(),
            notes: Some(format!(
                "Automatic reorder triggered. Stock level: {}, Reorder point: {}",
                item.current_stock(),
                item.reorder_point()
            )),
            occurred_at,
        }
    }
}

/// Command: ApproveReorder (pending → approved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveReorder {
    pub reorder_id: ReorderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: PlaceOrder (approved → ordered).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub reorder_id: ReorderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: MarkDelivered (ordered → delivered, terminal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkDelivered {
    pub reorder_id: ReorderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CancelReorder (pending only; the record is removed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelReorder {
    pub reorder_id: ReorderId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReorderCommand {
    OpenReorder(OpenReorder),
    ApproveReorder(ApproveReorder),
    PlaceOrder(PlaceOrder),
    MarkDelivered(MarkDelivered),
    CancelReorder(CancelReorder),
}

/// Event: ReorderOpened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderOpened {
    pub reorder_id: ReorderId,
    pub item_id: ItemId,
    pub item_name: String,
    pub supplier: String,
    pub quantity: i64,
    pub estimated_cost: Money,
    pub urgency: ReorderUrgency,
    pub requested_by: String,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ReorderApproved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderApproved {
    pub reorder_id: ReorderId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ReorderPlaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderPlaced {
    pub reorder_id: ReorderId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ReorderDelivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderDelivered {
    pub reorder_id: ReorderId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ReorderCancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderCancelled {
    pub reorder_id: ReorderId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReorderEvent {
    ReorderOpened(ReorderOpened),
    ReorderApproved(ReorderApproved),
    ReorderPlaced(ReorderPlaced),
    ReorderDelivered(ReorderDelivered),
    ReorderCancelled(ReorderCancelled),
}

impl Event for ReorderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ReorderEvent::ReorderOpened(_) => "reorders.request.opened",
            ReorderEvent::ReorderApproved(_) => "reorders.request.approved",
            ReorderEvent::ReorderPlaced(_) => "reorders.request.placed",
            ReorderEvent::ReorderDelivered(_) => "reorders.request.delivered",
            ReorderEvent::ReorderCancelled(_) => "reorders.request.cancelled",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ReorderEvent::ReorderOpened(e) => e.occurred_at,
            ReorderEvent::ReorderApproved(e) => e.occurred_at,
            ReorderEvent::ReorderPlaced(e) => e.occurred_at,
            ReorderEvent::ReorderDelivered(e) => e.occurred_at,
            ReorderEvent::ReorderCancelled(e) => e.occurred_at,
        }
    }
}

impl Aggregate for ReorderRequest {
    type Command = ReorderCommand;
    type Event = ReorderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ReorderEvent::ReorderOpened(e) => {
                self.id = e.reorder_id;
                self.item_id = Some(e.item_id);
                self.item_name = e.item_name.clone();
                self.supplier = e.supplier.clone();
                self.quantity = e.quantity;
                self.estimated_cost = e.estimated_cost;
                self.urgency = e.urgency;
                self.requested_by = e.requested_by.clone();
                self.requested_at = e.occurred_at;
                self.status = ReorderStatus::Pending;
                self.notes = e.notes.clone();
                self.created = true;
            }
            ReorderEvent::ReorderApproved(_) => {
                self.status = ReorderStatus::Approved;
            }
            ReorderEvent::ReorderPlaced(_) => {
                self.status = ReorderStatus::Ordered;
            }
            ReorderEvent::ReorderDelivered(_) => {
                self.status = ReorderStatus::Delivered;
            }
            ReorderEvent::ReorderCancelled(_) => {
                self.cancelled = true;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ReorderCommand::OpenReorder(cmd) => self.handle_open(cmd),
            ReorderCommand::ApproveReorder(cmd) => self.handle_approve(cmd),
            ReorderCommand::PlaceOrder(cmd) => self.handle_place(cmd),
            ReorderCommand::MarkDelivered(cmd) => self.handle_deliver(cmd),
            ReorderCommand::CancelReorder(cmd) => self.handle_cancel(cmd),
        }
    }
}

impl ReorderRequest {
    fn ensure_reorder_id(&self, reorder_id: ReorderId) -> Result<(), DomainError> {
        if self.id != reorder_id {
            return Err(DomainError::invariant("reorder_id mismatch"));
        }
        Ok(())
    }

    fn handle_open(&self, cmd: &OpenReorder) -> Result<Vec<ReorderEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("reorder already exists"));
        }
        if cmd.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        Ok(vec![ReorderEvent::ReorderOpened(ReorderOpened {
            reorder_id: cmd.reorder_id,
            item_id: cmd.item_id,
            item_name: cmd.item_name.clone(),
            supplier: cmd.supplier.clone(),
            quantity: cmd.quantity,
            estimated_cost: cmd.unit_price.total(cmd.quantity),
            urgency: cmd.urgency,
            requested_by: cmd.requested_by.clone(),
            notes: cmd.notes.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_approve(&self, cmd: &ApproveReorder) -> Result<Vec<ReorderEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_reorder_id(cmd.reorder_id)?;

        if self.status != ReorderStatus::Pending {
            return Err(DomainError::invariant(
                "only pending reorders can be approved",
            ));
        }

        Ok(vec![ReorderEvent::ReorderApproved(ReorderApproved {
            reorder_id: cmd.reorder_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_place(&self, cmd: &PlaceOrder) -> Result<Vec<ReorderEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_reorder_id(cmd.reorder_id)?;

        if self.status != ReorderStatus::Approved {
            return Err(DomainError::invariant(
                "only approved reorders can be placed",
            ));
        }

        Ok(vec![ReorderEvent::ReorderPlaced(ReorderPlaced {
            reorder_id: cmd.reorder_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deliver(&self, cmd: &MarkDelivered) -> Result<Vec<ReorderEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_reorder_id(cmd.reorder_id)?;

        if self.status != ReorderStatus::Ordered {
            return Err(DomainError::invariant(
                "only ordered reorders can be delivered",
            ));
        }

        Ok(vec![ReorderEvent::ReorderDelivered(ReorderDelivered {
            reorder_id: cmd.reorder_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_cancel(&self, cmd: &CancelReorder) -> Result<Vec<ReorderEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_reorder_id(cmd.reorder_id)?;

        if self.status != ReorderStatus::Pending {
            return Err(DomainError::invariant(
                "only pending reorders can be cancelled",
            ));
        }

        Ok(vec![ReorderEvent::ReorderCancelled(ReorderCancelled {
            reorder_id: cmd.reorder_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_catalog::{CatalogCommand, RegisterItem};

    fn test_reorder_id() -> ReorderId {
        ReorderId::new(AggregateId::new())
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn catalog_item(current_stock: i64) -> InventoryItem {
        let item_id = ItemId::new(AggregateId::new());
        let mut item = InventoryItem::empty(item_id);
        let events = item
            .handle(&CatalogCommand::RegisterItem(RegisterItem {
                item_id,
                sku: "AB-003".to_string(),
                name: "Artisan Bread".to_string(),
                category: "Bakery".to_string(),
                location: "Store #002".to_string(),
                supplier: "Local Bakery".to_string(),
                supplier_contact: "orders@localbakery.com".to_string(),
                current_stock,
                min_stock: 10,
                max_stock: 30,
                reorder_point: 15,
                reorder_quantity: 25,
                price: Money::from_cents(699),
                lead_time_days: 1,
                last_order_date: None,
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            item.apply(event);
        }
        item
    }

    fn open_cmd(reorder_id: ReorderId, quantity: i64) -> OpenReorder {
        let item = catalog_item(0);
        OpenReorder {
            reorder_id,
            item_id: item.id_typed(),
            item_name: item.name().to_string(),
            supplier: item.supplier().to_string(),
            quantity,
            unit_price: item.price(),
            urgency: ReorderUrgency::Critical,
            requested_by: "Store Manager".to_string(),
            notes: None,
            occurred_at: test_time(),
        }
    }

    fn pending_reorder(quantity: i64) -> ReorderRequest {
        let reorder_id = test_reorder_id();
        let mut reorder = ReorderRequest::empty(reorder_id);
        let events = reorder
            .handle(&ReorderCommand::OpenReorder(open_cmd(reorder_id, quantity)))
            .unwrap();
        for event in &events {
            reorder.apply(event);
        }
        reorder
    }

    #[test]
    fn open_computes_exact_estimated_cost() {
        // 25 × $6.99 = $174.75
        let reorder = pending_reorder(25);
        assert_eq!(reorder.estimated_cost(), Money::from_cents(17475));
        assert_eq!(reorder.status(), ReorderStatus::Pending);
    }

    #[test]
    fn open_rejects_non_positive_quantity() {
        let reorder_id = test_reorder_id();
        let reorder = ReorderRequest::empty(reorder_id);
        let err = reorder
            .handle(&ReorderCommand::OpenReorder(open_cmd(reorder_id, 0)))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn automatic_reorder_on_out_of_stock_item_is_critical() {
        let item = catalog_item(0);
        let cmd = OpenReorder::automatic(test_reorder_id(), &item, test_time());

        assert_eq!(cmd.urgency, ReorderUrgency::Critical);
        assert_eq!(cmd.quantity, 25);
        assert_eq!(cmd.requested_by, AUTO_REORDER_REQUESTER);
        assert_eq!(
            cmd.notes.as_deref(),
            Some("Automatic reorder triggered. Stock level: 0, Reorder point: 15")
        );
    }

    #[test]
    fn automatic_reorder_on_low_stock_item_is_high() {
        let item = catalog_item(4);
        let cmd = OpenReorder::automatic(test_reorder_id(), &item, test_time());
        assert_eq!(cmd.urgency, ReorderUrgency::High);
    }

    #[test]
    fn lifecycle_advances_pending_approved_ordered_delivered() {
        let mut reorder = pending_reorder(25);

        for (cmd, expected) in [
            (
                ReorderCommand::ApproveReorder(ApproveReorder {
                    reorder_id: reorder.id_typed(),
                    occurred_at: test_time(),
                }),
                ReorderStatus::Approved,
            ),
            (
                ReorderCommand::PlaceOrder(PlaceOrder {
                    reorder_id: reorder.id_typed(),
                    occurred_at: test_time(),
                }),
                ReorderStatus::Ordered,
            ),
            (
                ReorderCommand::MarkDelivered(MarkDelivered {
                    reorder_id: reorder.id_typed(),
                    occurred_at: test_time(),
                }),
                ReorderStatus::Delivered,
            ),
        ] {
            let events = reorder.handle(&cmd).unwrap();
            for event in &events {
                reorder.apply(event);
            }
            assert_eq!(reorder.status(), expected);
        }
    }

    #[test]
    fn approval_is_required_before_placing() {
        let reorder = pending_reorder(25);
        let err = reorder
            .handle(&ReorderCommand::PlaceOrder(PlaceOrder {
                reorder_id: reorder.id_typed(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn only_pending_reorders_can_be_cancelled() {
        let mut reorder = pending_reorder(25);

        let events = reorder
            .handle(&ReorderCommand::ApproveReorder(ApproveReorder {
                reorder_id: reorder.id_typed(),
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            reorder.apply(event);
        }

        let err = reorder
            .handle(&ReorderCommand::CancelReorder(CancelReorder {
                reorder_id: reorder.id_typed(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn cancelling_a_pending_reorder_marks_it_for_removal() {
        let mut reorder = pending_reorder(25);
        let events = reorder
            .handle(&ReorderCommand::CancelReorder(CancelReorder {
                reorder_id: reorder.id_typed(),
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            reorder.apply(event);
        }
        assert!(reorder.is_cancelled());
    }
}
