//! Read-side catalog queries.
//!
//! Recomputed on every call over the current item slice; nothing here is
//! cached or indexed, matching the bounded catalog sizes this core serves.

use crate::item::InventoryItem;

/// Filter items by a free-text search term and an optional category.
///
/// The term matches the name or SKU, case-insensitively; an empty term
/// matches everything. `category` compares exactly when present.
pub fn filter_items<'a>(
    items: &'a [InventoryItem],
    search: &str,
    category: Option<&str>,
) -> Vec<&'a InventoryItem> {
    let term = search.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            term.is_empty()
                || item.name().to_lowercase().contains(&term)
                || item.sku().to_lowercase().contains(&term)
        })
        .filter(|item| category.is_none_or(|c| item.category() == c))
        .collect()
}

/// Distinct categories present in the catalog, sorted.
pub fn categories(items: &[InventoryItem]) -> Vec<String> {
    let mut categories: Vec<String> = items.iter().map(|i| i.category().to_string()).collect();
    categories.sort();
    categories.dedup();
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_core::{Aggregate, AggregateId, Money};

    use crate::item::{CatalogCommand, ItemId, RegisterItem};

    fn item(name: &str, sku: &str, category: &str) -> InventoryItem {
        let item_id = ItemId::new(AggregateId::new());
        let mut item = InventoryItem::empty(item_id);
        let events = item
            .handle(&CatalogCommand::RegisterItem(RegisterItem {
                item_id,
                sku: sku.to_string(),
                name: name.to_string(),
                category: category.to_string(),
                location: "Store #001".to_string(),
                supplier: "Coffee Co.".to_string(),
                supplier_contact: "orders@coffeeco.com".to_string(),
                current_stock: 10,
                min_stock: 5,
                max_stock: 50,
                reorder_point: 8,
                reorder_quantity: 20,
                price: Money::from_cents(100),
                lead_time_days: 2,
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
    fn search_matches_name_and_sku_case_insensitively() {
        let items = vec![
            item("Premium Coffee Beans", "PCB-001", "Beverages"),
            item("Organic Milk", "OM-002", "Dairy"),
        ];

        let by_name = filter_items(&items, "coffee", None);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].sku(), "PCB-001");

        let by_sku = filter_items(&items, "om-00", None);
        assert_eq!(by_sku.len(), 1);
        assert_eq!(by_sku[0].name(), "Organic Milk");
    }

    #[test]
    fn category_filter_composes_with_search() {
        let items = vec![
            item("Premium Coffee Beans", "PCB-001", "Beverages"),
            item("Energy Drinks", "ED-004", "Beverages"),
            item("Organic Milk", "OM-002", "Dairy"),
        ];

        assert_eq!(filter_items(&items, "", Some("Beverages")).len(), 2);
        assert_eq!(filter_items(&items, "energy", Some("Beverages")).len(), 1);
        assert!(filter_items(&items, "energy", Some("Dairy")).is_empty());
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        let items = vec![
            item("Organic Milk", "OM-002", "Dairy"),
            item("Premium Coffee Beans", "PCB-001", "Beverages"),
            item("Energy Drinks", "ED-004", "Beverages"),
        ];

        assert_eq!(categories(&items), vec!["Beverages", "Dairy"]);
    }
}
