//! `stockroom-transfers` — inter-location transfer workflow.

pub mod transfer;

pub use transfer::{
    CancelTransfer, MarkDelivered, RequestTransfer, StartTransfer, TransferCommand,
    TransferCancelled, TransferDelivered, TransferEvent, TransferId, TransferPriority,
    TransferRequest, TransferRequested, TransferStarted, TransferStatus,
};
