//! `stockroom-store` — the single owned catalog/workflow context.
//!
//! One `OperationsStore` holds the item catalog and both workflow queues for
//! the session. Every operation validates through the pure aggregate
//! decision logic first, then applies the resulting events and publishes
//! them, so a rejected operation mutates nothing and every accepted one is
//! observable on the bus.

pub mod ops_event;
pub mod store;


pub use ops_event::OpsEvent;
pub use store::{CreateReorder, ExecuteTransfer, OperationsStore};
