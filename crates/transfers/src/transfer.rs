use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_catalog::ItemId;
use stockroom_core::{Aggregate, AggregateId, AggregateRoot, DomainError};
use stockroom_events::Event;

/// Transfer request identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferId(pub AggregateId);

impl TransferId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for TransferId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Human triage priority; not enforced scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferPriority {
    Low,
    Medium,
    High,
}

/// Transfer lifecycle.
///
/// pending → in-transit → completed; pending/in-transit may be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferStatus {
    Pending,
    InTransit,
    Completed,
    Cancelled,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "pending",
            TransferStatus::InTransit => "in-transit",
            TransferStatus::Completed => "completed",
            TransferStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferStatus::Completed | TransferStatus::Cancelled)
    }
}

impl core::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate root: TransferRequest.
///
/// The source item's stock is decremented when the request is created, not
/// reserved: advancing or cancelling a transfer never touches stock again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    id: TransferId,
    item_id: Option<ItemId>,
    item_name: String,
    from_location: String,
    to_location: String,
    quantity: i64,
    priority: TransferPriority,
    status: TransferStatus,
    requested_at: DateTime<Utc>,
    estimated_arrival: Option<DateTime<Utc>>,
    version: u64,
    created: bool,
}

impl TransferRequest {
    /// Create an empty, not-yet-requested aggregate instance.
    pub fn empty(id: TransferId) -> Self {
        Self {
            id,
            item_id: None,
            item_name: String::new(),
            from_location: String::new(),
            to_location: String::new(),
            quantity: 0,
            priority: TransferPriority::Medium,
            status: TransferStatus::Pending,
            requested_at: DateTime::<Utc>::UNIX_EPOCH,
            estimated_arrival: None,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> TransferId {
        self.id
    }

    pub fn item_id(&self) -> Option<ItemId> {
        self.item_id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn from_location(&self) -> &str {
        &self.from_location
    }

    pub fn to_location(&self) -> &str {
        &self.to_location
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn priority(&self) -> TransferPriority {
        self.priority
    }

    pub fn status(&self) -> TransferStatus {
        self.status
    }

    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    pub fn estimated_arrival(&self) -> Option<DateTime<Utc>> {
        self.estimated_arrival
    }
}

impl AggregateRoot for TransferRequest {
    type Id = TransferId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RequestTransfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTransfer {
    pub transfer_id: TransferId,
    pub item_id: ItemId,
    pub item_name: String,
    pub from_location: String,
    pub to_location: String,
    pub quantity: i64,
    pub priority: TransferPriority,
    pub estimated_arrival: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: StartTransfer (pending → in-transit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartTransfer {
    pub transfer_id: TransferId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: MarkDelivered (in-transit → completed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkDelivered {
    pub transfer_id: TransferId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CancelTransfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelTransfer {
    pub transfer_id: TransferId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferCommand {
    RequestTransfer(RequestTransfer),
    StartTransfer(StartTransfer),
    MarkDelivered(MarkDelivered),
    CancelTransfer(CancelTransfer),
}

/// Event: TransferRequested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequested {
    pub transfer_id: TransferId,
    pub item_id: ItemId,
    pub item_name: String,
    pub from_location: String,
    pub to_location: String,
    pub quantity: i64,
    pub priority: TransferPriority,
    pub estimated_arrival: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TransferStarted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferStarted {
    pub transfer_id: TransferId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TransferDelivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferDelivered {
    pub transfer_id: TransferId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TransferCancelled.
///
/// Cancellation does not restore the source item's stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCancelled {
    pub transfer_id: TransferId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferEvent {
    TransferRequested(TransferRequested),
    TransferStarted(TransferStarted),
    TransferDelivered(TransferDelivered),
    TransferCancelled(TransferCancelled),
}

impl Event for TransferEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TransferEvent::TransferRequested(_) => "transfers.request.requested",
            TransferEvent::TransferStarted(_) => "transfers.request.started",
            TransferEvent::TransferDelivered(_) => "transfers.request.delivered",
            TransferEvent::TransferCancelled(_) => "transfers.request.cancelled",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            TransferEvent::TransferRequested(e) => e.occurred_at,
            TransferEvent::TransferStarted(e) => e.occurred_at,
            TransferEvent::TransferDelivered(e) => e.occurred_at,
            TransferEvent::TransferCancelled(e) => e.occurred_at,
        }
    }
}

impl Aggregate for TransferRequest {
    type Command = TransferCommand;
    type Event = TransferEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            TransferEvent::TransferRequested(e) => {
                self.id = e.transfer_id;
                self.item_id = Some(e.item_id);
                self.item_name = e.item_name.clone();
                self.from_location = e.from_location.clone();
                self.to_location = e.to_location.clone();
                self.quantity = e.quantity;
                self.priority = e.priority;
                self.status = TransferStatus::Pending;
                self.requested_at = e.occurred_at;
                self.estimated_arrival = e.estimated_arrival;
                self.created = true;
            }
            TransferEvent::TransferStarted(_) => {
                self.status = TransferStatus::InTransit;
            }
            TransferEvent::TransferDelivered(_) => {
                self.status = TransferStatus::Completed;
            }
            TransferEvent::TransferCancelled(_) => {
                self.status = TransferStatus::Cancelled;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            TransferCommand::RequestTransfer(cmd) => self.handle_request(cmd),
            TransferCommand::StartTransfer(cmd) => self.handle_start(cmd),
            TransferCommand::MarkDelivered(cmd) => self.handle_deliver(cmd),
            TransferCommand::CancelTransfer(cmd) => self.handle_cancel(cmd),
        }
    }
}

impl TransferRequest {
    fn ensure_transfer_id(&self, transfer_id: TransferId) -> Result<(), DomainError> {
        if self.id != transfer_id {
            return Err(DomainError::invariant("transfer_id mismatch"));
        }
        Ok(())
    }

    fn handle_request(&self, cmd: &RequestTransfer) -> Result<Vec<TransferEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("transfer already exists"));
        }
        if cmd.to_location.trim().is_empty() {
            return Err(DomainError::validation("destination cannot be empty"));
        }
        if cmd.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        Ok(vec![TransferEvent::TransferRequested(TransferRequested {
            transfer_id: cmd.transfer_id,
            item_id: cmd.item_id,
            item_name: cmd.item_name.clone(),
            from_location: cmd.from_location.clone(),
            to_location: cmd.to_location.clone(),
            quantity: cmd.quantity,
            priority: cmd.priority,
            estimated_arrival: cmd.estimated_arrival,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_start(&self, cmd: &StartTransfer) -> Result<Vec<TransferEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_transfer_id(cmd.transfer_id)?;

        if self.status != TransferStatus::Pending {
            return Err(DomainError::invariant(
                "only pending transfers can be started",
            ));
        }

        Ok(vec![TransferEvent::TransferStarted(TransferStarted {
            transfer_id: cmd.transfer_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deliver(&self, cmd: &MarkDelivered) -> Result<Vec<TransferEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_transfer_id(cmd.transfer_id)?;

        if self.status != TransferStatus::InTransit {
            return Err(DomainError::invariant(
                "only in-transit transfers can be delivered",
            ));
        }

        Ok(vec![TransferEvent::TransferDelivered(TransferDelivered {
            transfer_id: cmd.transfer_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_cancel(&self, cmd: &CancelTransfer) -> Result<Vec<TransferEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_transfer_id(cmd.transfer_id)?;

        if self.status.is_terminal() {
            return Err(DomainError::invariant(
                "completed or cancelled transfers cannot be cancelled",
            ));
        }

        Ok(vec![TransferEvent::TransferCancelled(TransferCancelled {
            transfer_id: cmd.transfer_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
