use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Aggregate, AggregateId, AggregateRoot, DomainError, Money};
use stockroom_events::Event;

use crate::status::{StockStatus, classify};

/// Inventory item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub AggregateId);

impl ItemId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Externally-imposed status override.
///
/// The classifier derives a status from stock numbers; workflows may pin a
/// different one on top. Precedence is explicit: an active override wins
/// until it is cleared by a replenishment event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusOverride {
    /// Set by the reorder workflow when a restock request is opened.
    ReorderPending,
}

impl From<StatusOverride> for StockStatus {
    fn from(value: StatusOverride) -> Self {
        match value {
            StatusOverride::ReorderPending => StockStatus::ReorderPending,
        }
    }
}

/// Aggregate root: InventoryItem.
///
/// `status()` is always derived: the classifier output, overridden by an
/// active `StatusOverride`. It is never stored independently of the stock
/// numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    id: ItemId,
    sku: String,
    name: String,
    category: String,
    location: String,
    supplier: String,
    supplier_contact: String,
    current_stock: i64,
    min_stock: i64,
    max_stock: i64,
    reorder_point: i64,
    reorder_quantity: i64,
    price: Money,
    lead_time_days: u32,
    last_order_date: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
    status_override: Option<StatusOverride>,
    version: u64,
    created: bool,
}

impl InventoryItem {
    /// Create an empty, not-yet-registered aggregate instance.
    pub fn empty(id: ItemId) -> Self {
        Self {
            id,
            sku: String::new(),
            name: String::new(),
            category: String::new(),
            location: String::new(),
            supplier: String::new(),
            supplier_contact: String::new(),
            current_stock: 0,
            min_stock: 0,
            max_stock: 0,
            reorder_point: 0,
            reorder_quantity: 0,
            price: Money::ZERO,
            lead_time_days: 0,
            last_order_date: None,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
            status_override: None,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn supplier_contact(&self) -> &str {
        &self.supplier_contact
    }

    pub fn current_stock(&self) -> i64 {
        self.current_stock
    }

    pub fn min_stock(&self) -> i64 {
        self.min_stock
    }

    pub fn max_stock(&self) -> i64 {
        self.max_stock
    }

    pub fn reorder_point(&self) -> i64 {
        self.reorder_point
    }

    pub fn reorder_quantity(&self) -> i64 {
        self.reorder_quantity
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn lead_time_days(&self) -> u32 {
        self.lead_time_days
    }

    pub fn last_order_date(&self) -> Option<DateTime<Utc>> {
        self.last_order_date
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn status_override(&self) -> Option<StatusOverride> {
        self.status_override
    }

    /// Effective status: the active override, else the classifier output.
    pub fn status(&self) -> StockStatus {
        match self.status_override {
            Some(override_status) => override_status.into(),
            None => classify(self.current_stock, self.min_stock, self.max_stock),
        }
    }
}

impl AggregateRoot for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RegisterItem (catalog load or import).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterItem {
    pub item_id: ItemId,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub supplier: String,
    pub supplier_contact: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub reorder_point: i64,
    pub reorder_quantity: i64,
    pub price: Money,
    pub lead_time_days: u32,
    pub last_order_date: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReceiveStock (goods received / explicit replenishment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveStock {
    pub item_id: ItemId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeductStock (issued by the transfer workflow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductStock {
    pub item_id: ItemId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: FlagReorderPending (imposed by the reorder workflow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagReorderPending {
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogCommand {
    RegisterItem(RegisterItem),
    ReceiveStock(ReceiveStock),
    DeductStock(DeductStock),
    FlagReorderPending(FlagReorderPending),
}

/// Event: ItemRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRegistered {
    pub item_id: ItemId,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub supplier: String,
    pub supplier_contact: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub reorder_point: i64,
    pub reorder_quantity: i64,
    pub price: Money,
    pub lead_time_days: u32,
    pub last_order_date: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockReceived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReceived {
    pub item_id: ItemId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockDeducted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDeducted {
    pub item_id: ItemId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ReorderFlagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderFlagged {
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ItemRegistered(ItemRegistered),
    StockReceived(StockReceived),
    StockDeducted(StockDeducted),
    ReorderFlagged(ReorderFlagged),
}

impl Event for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ItemRegistered(_) => "catalog.item.registered",
            CatalogEvent::StockReceived(_) => "catalog.item.stock_received",
            CatalogEvent::StockDeducted(_) => "catalog.item.stock_deducted",
            CatalogEvent::ReorderFlagged(_) => "catalog.item.reorder_flagged",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::ItemRegistered(e) => e.occurred_at,
            CatalogEvent::StockReceived(e) => e.occurred_at,
            CatalogEvent::StockDeducted(e) => e.occurred_at,
            CatalogEvent::ReorderFlagged(e) => e.occurred_at,
        }
    }
}

impl Aggregate for InventoryItem {
    type Command = CatalogCommand;
    type Event = CatalogEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CatalogEvent::ItemRegistered(e) => {
                self.id = e.item_id;
                self.sku = e.sku.clone();
                self.name = e.name.clone();
                self.category = e.category.clone();
                self.location = e.location.clone();
                self.supplier = e.supplier.clone();
                self.supplier_contact = e.supplier_contact.clone();
                self.current_stock = e.current_stock;
                self.min_stock = e.min_stock;
                self.max_stock = e.max_stock;
                self.reorder_point = e.reorder_point;
                self.reorder_quantity = e.reorder_quantity;
                self.price = e.price;
                self.lead_time_days = e.lead_time_days;
                self.last_order_date = e.last_order_date;
                self.updated_at = e.occurred_at;
                self.status_override = None;
                self.created = true;
            }
            CatalogEvent::StockReceived(e) => {
                self.current_stock += e.quantity;
                // Replenishment is the explicit event that lifts a
                // reorder-pending override.
                self.status_override = None;
                self.updated_at = e.occurred_at;
            }
            CatalogEvent::StockDeducted(e) => {
                self.current_stock -= e.quantity;
                self.updated_at = e.occurred_at;
            }
            CatalogEvent::ReorderFlagged(e) => {
                self.status_override = Some(StatusOverride::ReorderPending);
                self.updated_at = e.occurred_at;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CatalogCommand::RegisterItem(cmd) => self.handle_register(cmd),
            CatalogCommand::ReceiveStock(cmd) => self.handle_receive(cmd),
            CatalogCommand::DeductStock(cmd) => self.handle_deduct(cmd),
            CatalogCommand::FlagReorderPending(cmd) => self.handle_flag(cmd),
        }
    }
}

impl InventoryItem {
    fn ensure_item_id(&self, item_id: ItemId) -> Result<(), DomainError> {
        if self.id != item_id {
            return Err(DomainError::invariant("item_id mismatch"));
        }
        Ok(())
    }

    fn handle_register(&self, cmd: &RegisterItem) -> Result<Vec<CatalogEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("item already registered"));
        }
        if cmd.sku.trim().is_empty() {
            return Err(DomainError::validation("sku cannot be empty"));
        }
        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if cmd.current_stock < 0 {
            return Err(DomainError::validation("current stock cannot be negative"));
        }
        if cmd.reorder_quantity <= 0 {
            return Err(DomainError::validation("reorder quantity must be positive"));
        }
        // Disordered thresholds (min_stock > max_stock) are tolerated here:
        // imported data can carry them and the classifier falls back.

        Ok(vec![CatalogEvent::ItemRegistered(ItemRegistered {
            item_id: cmd.item_id,
            sku: cmd.sku.clone(),
            name: cmd.name.clone(),
            category: cmd.category.clone(),
            location: cmd.location.clone(),
            supplier: cmd.supplier.clone(),
            supplier_contact: cmd.supplier_contact.clone(),
            current_stock: cmd.current_stock,
            min_stock: cmd.min_stock,
            max_stock: cmd.max_stock,
            reorder_point: cmd.reorder_point,
            reorder_quantity: cmd.reorder_quantity,
            price: cmd.price,
            lead_time_days: cmd.lead_time_days,
            last_order_date: cmd.last_order_date,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_receive(&self, cmd: &ReceiveStock) -> Result<Vec<CatalogEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_item_id(cmd.item_id)?;

        if cmd.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        Ok(vec![CatalogEvent::StockReceived(StockReceived {
            item_id: cmd.item_id,
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deduct(&self, cmd: &DeductStock) -> Result<Vec<CatalogEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_item_id(cmd.item_id)?;

        if cmd.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if cmd.quantity > self.current_stock {
            return Err(DomainError::validation("quantity exceeds current stock"));
        }

        Ok(vec![CatalogEvent::StockDeducted(StockDeducted {
            item_id: cmd.item_id,
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_flag(&self, cmd: &FlagReorderPending) -> Result<Vec<CatalogEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_item_id(cmd.item_id)?;

        Ok(vec![CatalogEvent::ReorderFlagged(ReorderFlagged {
            item_id: cmd.item_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
