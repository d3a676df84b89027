use serde::{Deserialize, Serialize};

use stockroom_catalog::InventoryItem;
use stockroom_core::{DomainError, DomainResult};

/// How a notification should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Email,
    Sms,
    Both,
}

impl DeliveryMethod {
    pub fn describe(&self) -> &'static str {
        match self {
            DeliveryMethod::Email => "email",
            DeliveryMethod::Sms => "sms",
            DeliveryMethod::Both => "email and sms",
        }
    }
}

/// A notification to send. Ephemeral: nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub recipients: String,
    pub subject: String,
    pub message: String,
    pub method: DeliveryMethod,
}

impl NotificationRequest {
    /// All three text fields must be non-empty; each failure names its field.
    pub fn validate(&self) -> DomainResult<()> {
        if self.recipients.trim().is_empty() {
            return Err(DomainError::validation("recipients cannot be empty"));
        }
        if self.subject.trim().is_empty() {
            return Err(DomainError::validation("subject cannot be empty"));
        }
        if self.message.trim().is_empty() {
            return Err(DomainError::validation("message cannot be empty"));
        }
        Ok(())
    }
}

/// Compose the supplier restock notice for an item.
///
/// Addressed to the item's supplier contact, naming the SKU, current stock
/// and configured reorder quantity.
pub fn restock_request(item: &InventoryItem) -> NotificationRequest {
    NotificationRequest {
        recipients: item.supplier_contact().to_string(),
        subject: format!("Urgent: Restock Required - {}", item.name()),
        message: format!(
            "Dear {supplier},\n\n\
             We urgently need to restock {name} (SKU: {sku}).\n\
             Current stock: {stock}\n\
             Reorder quantity: {reorder_quantity}\n\n\
             Please confirm availability and delivery timeline.\n\n\
             Best regards,\nInventory Management Team",
            supplier = item.supplier(),
            name = item.name(),
            sku = item.sku(),
            stock = item.current_stock(),
            reorder_quantity = item.reorder_quantity(),
        ),
        method: DeliveryMethod::Email,
    }
}
