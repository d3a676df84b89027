//! JSON export and import.

use stockroom_catalog::InventoryItem;

use crate::error::ImportError;
use crate::record::ItemRecord;

/// Serialize items as a pretty-printed JSON array of records.
pub fn export_json(items: &[InventoryItem]) -> serde_json::Result<String> {
    let records: Vec<ItemRecord> = items.iter().map(ItemRecord::from_item).collect();
    serde_json::to_string_pretty(&records)
}

/// Parse a JSON import (an array of records).
///
/// Unknown keys are ignored; missing keys take the documented defaults. Any
/// serialized `status` value is dropped; status is derived, never imported.
pub fn import_json(content: &str) -> Result<Vec<ItemRecord>, ImportError> {
    if content.trim().is_empty() {
        return Err(ImportError::Empty);
    }
    let mut records: Vec<ItemRecord> = serde_json::from_str(content)?;
    for record in &mut records {
        record.status = None;
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_catalog::{CatalogCommand, ItemId, RegisterItem};
    use stockroom_core::{Aggregate, AggregateId, Money};

    fn item(sku: &str, stock: i64, price_cents: u64) -> InventoryItem {
        let item_id = ItemId::new(AggregateId::new());
        let mut item = InventoryItem::empty(item_id);
        let events = item
            .handle(&CatalogCommand::RegisterItem(RegisterItem {
                item_id,
                sku: sku.to_string(),
                name: "Artisan Bread".to_string(),
                category: "Bakery".to_string(),
                location: "Store #002".to_string(),
                supplier: "Local Bakery".to_string(),
                supplier_contact: "orders@localbakery.com".to_string(),
                current_stock: stock,
                min_stock: 10,
                max_stock: 30,
                reorder_point: 15,
                reorder_quantity: 25,
                price: Money::from_cents(price_cents),
                lead_time_days: 1,
                last_order_date: None,
                occurred_at: Utc::now(),
            }))
            .unwrap();
        for event in &events {
            item.apply(event);
        }
        item
    }

    #[test]
    fn json_round_trip_reconstructs_equivalent_registrations() {
        let original = item("AB-003", 12, 699);
        let json = export_json(std::slice::from_ref(&original)).unwrap();
        let records = import_json(&json).unwrap();

        assert_eq!(records.len(), 1);
        let register = records[0].to_register(1, Utc::now());
        assert_eq!(register.item_id, original.id_typed());
        assert_eq!(register.sku, "AB-003");
        assert_eq!(register.current_stock, 12);
        assert_eq!(register.min_stock, 10);
        assert_eq!(register.price, Money::from_cents(699));
        assert_eq!(register.supplier, "Local Bakery");
        assert_eq!(register.supplier_contact, "orders@localbakery.com");
        assert_eq!(register.lead_time_days, 1);
    }

    #[test]
    fn exported_json_uses_the_camel_case_contract() {
        let json = export_json(&[item("AB-003", 0, 699)]).unwrap();
        assert!(json.contains("\"currentStock\": 0"));
        assert!(json.contains("\"reorderQuantity\": 25"));
        assert!(json.contains("\"leadTime\": 1"));
        assert!(json.contains("\"status\": \"out-of-stock\""));
        assert!(json.contains("\"price\": 6.99"));
    }

    #[test]
    fn sparse_records_take_defaults_and_row_fallbacks() {
        let records = import_json(r#"[{"currentStock": 4}, {"name": "Named"}]"#).unwrap();

        let first = records[0].to_register(1, Utc::now());
        assert_eq!(first.name, "Imported Item 1");
        assert_eq!(first.sku, "IMP-1");
        assert_eq!(first.current_stock, 4);
        assert_eq!(first.min_stock, 10);
        assert_eq!(first.reorder_quantity, 50);
        assert_eq!(first.supplier, "Unknown Supplier");

        let second = records[1].to_register(2, Utc::now());
        assert_eq!(second.name, "Named");
        assert_eq!(second.sku, "IMP-2");
    }

    #[test]
    fn imported_status_values_are_discarded() {
        let records = import_json(r#"[{"sku": "X", "status": "reorder-pending"}]"#).unwrap();
        assert_eq!(records[0].status, None);
    }

    #[test]
    fn malformed_json_surfaces_the_parser_error() {
        assert!(matches!(
            import_json("{not json"),
            Err(ImportError::Json(_))
        ));
        assert!(matches!(import_json("  "), Err(ImportError::Empty)));
    }
}
