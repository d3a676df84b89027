//! `stockroom-notifications` — staff and supplier notification dispatch.
//!
//! An independent side channel: sending touches no domain state. The
//! contract is "fire, report success"; the underlying channel's latency and
//! failure modes are out of scope.

pub mod dispatch;
pub mod request;

pub use dispatch::{LogNotifier, Notifier};
pub use request::{DeliveryMethod, NotificationRequest, restock_request};
