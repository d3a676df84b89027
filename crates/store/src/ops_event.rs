use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_catalog::CatalogEvent;
use stockroom_events::Event;
use stockroom_reorders::ReorderEvent;
use stockroom_transfers::TransferEvent;

/// Store-level event: anything an operation applied.
///
/// Wraps the per-domain event enums so one bus carries the whole session's
/// activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpsEvent {
    Catalog(CatalogEvent),
    Transfer(TransferEvent),
    Reorder(ReorderEvent),
}

impl From<CatalogEvent> for OpsEvent {
    fn from(event: CatalogEvent) -> Self {
        OpsEvent::Catalog(event)
    }
}

impl From<TransferEvent> for OpsEvent {
    fn from(event: TransferEvent) -> Self {
        OpsEvent::Transfer(event)
    }
}

impl From<ReorderEvent> for OpsEvent {
    fn from(event: ReorderEvent) -> Self {
        OpsEvent::Reorder(event)
    }
}

impl Event for OpsEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OpsEvent::Catalog(e) => e.event_type(),
            OpsEvent::Transfer(e) => e.event_type(),
            OpsEvent::Reorder(e) => e.event_type(),
        }
    }

    fn version(&self) -> u32 {
        match self {
            OpsEvent::Catalog(e) => e.version(),
            OpsEvent::Transfer(e) => e.version(),
            OpsEvent::Reorder(e) => e.version(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OpsEvent::Catalog(e) => e.occurred_at(),
            OpsEvent::Transfer(e) => e.occurred_at(),
            OpsEvent::Reorder(e) => e.occurred_at(),
        }
    }
}
