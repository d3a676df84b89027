//! `stockroom-reorders` — supplier restock workflow.

pub mod reorder;

pub use reorder::{
    AUTO_REORDER_REQUESTER, ApproveReorder, CancelReorder, MarkDelivered, OpenReorder, PlaceOrder,
    ReorderApproved, ReorderCancelled, ReorderCommand, ReorderDelivered, ReorderEvent, ReorderId,
    ReorderOpened, ReorderPlaced, ReorderRequest, ReorderStatus, ReorderUrgency,
};
