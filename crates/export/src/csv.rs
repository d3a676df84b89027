//! CSV/TSV export and CSV import.
//!
//! Column order is stable and matches the dashboard's export exactly. The
//! import side resolves headers through a fixed alias table (spreadsheet
//! headings and camelCase keys both map onto the same fields) and applies
//! the documented defaults for anything absent.

use stockroom_catalog::InventoryItem;
use stockroom_core::Money;

use crate::error::ImportError;
use crate::record::{ItemRecord, defaults};

/// Export column order. Stable: consumers key on positions as well as names.
pub const CSV_COLUMNS: &[&str] = &[
    "SKU",
    "Name",
    "Category",
    "Current Stock",
    "Min Stock",
    "Max Stock",
    "Status",
    "Price",
    "Supplier",
    "Location",
];

// Header alias table: every accepted spelling for each imported field.
const SKU_KEYS: &[&str] = &["SKU", "sku"];
const NAME_KEYS: &[&str] = &["Name", "name"];
const CATEGORY_KEYS: &[&str] = &["Category", "category"];
const CURRENT_STOCK_KEYS: &[&str] = &["Current Stock", "currentStock"];
const MIN_STOCK_KEYS: &[&str] = &["Min Stock", "minStock"];
const MAX_STOCK_KEYS: &[&str] = &["Max Stock", "maxStock"];
const REORDER_POINT_KEYS: &[&str] = &["Reorder Point", "reorderPoint"];
const REORDER_QUANTITY_KEYS: &[&str] = &["Reorder Quantity", "reorderQuantity"];
const LOCATION_KEYS: &[&str] = &["Location", "location"];
const PRICE_KEYS: &[&str] = &["Price", "price"];
const SUPPLIER_KEYS: &[&str] = &["Supplier", "supplier"];
const SUPPLIER_CONTACT_KEYS: &[&str] = &["Supplier Contact", "supplierContact"];
const LEAD_TIME_KEYS: &[&str] = &["Lead Time", "leadTime"];

/// Serialize items as CSV in the stable column order.
pub fn export_csv(items: &[InventoryItem]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_COLUMNS.join(","));
    out.push('\n');
    for item in items {
        let row = [
            item.sku().to_string(),
            quote(item.name()),
            item.category().to_string(),
            item.current_stock().to_string(),
            item.min_stock().to_string(),
            item.max_stock().to_string(),
            item.status().to_string(),
            item.price().to_string(),
            quote(item.supplier()),
            quote(item.location()),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Serialize items as tab-separated values (same columns, no quoting).
pub fn export_tsv(items: &[InventoryItem]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_COLUMNS.join("\t"));
    out.push('\n');
    for item in items {
        let row = [
            item.sku().to_string(),
            item.name().to_string(),
            item.category().to_string(),
            item.current_stock().to_string(),
            item.min_stock().to_string(),
            item.max_stock().to_string(),
            item.status().to_string(),
            item.price().to_string(),
            item.supplier().to_string(),
            item.location().to_string(),
        ];
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

/// Parse a CSV import into records, applying defaults for missing fields.
///
/// Rows whose cells are all empty are skipped (trailing blank lines from
/// spreadsheet exports). A serialized status column is ignored.
pub fn import_csv(content: &str) -> Result<Vec<ItemRecord>, ImportError> {
    let mut lines = content.lines().map(str::trim_end);
    let header_line = lines
        .by_ref()
        .find(|line| !line.trim().is_empty())
        .ok_or(ImportError::Empty)?;
    let headers = split_line(header_line);

    let mut records = Vec::new();
    for (offset, line) in lines.enumerate() {
        // 1-based data row number for error messages.
        let row = offset + 1;
        let cells = split_line(line);
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }

        records.push(ItemRecord {
            id: None,
            sku: text(&headers, &cells, SKU_KEYS).unwrap_or_default(),
            name: text(&headers, &cells, NAME_KEYS).unwrap_or_default(),
            category: text(&headers, &cells, CATEGORY_KEYS).unwrap_or_else(defaults::category),
            current_stock: integer(&headers, &cells, CURRENT_STOCK_KEYS, 0, row)?,
            min_stock: integer(&headers, &cells, MIN_STOCK_KEYS, defaults::min_stock(), row)?,
            max_stock: integer(&headers, &cells, MAX_STOCK_KEYS, defaults::max_stock(), row)?,
            reorder_point: integer(
                &headers,
                &cells,
                REORDER_POINT_KEYS,
                defaults::reorder_point(),
                row,
            )?,
            reorder_quantity: integer(
                &headers,
                &cells,
                REORDER_QUANTITY_KEYS,
                defaults::reorder_quantity(),
                row,
            )?,
            location: text(&headers, &cells, LOCATION_KEYS).unwrap_or_else(defaults::location),
            status: None,
            price: price(&headers, &cells, row)?,
            supplier: text(&headers, &cells, SUPPLIER_KEYS).unwrap_or_else(defaults::supplier),
            supplier_contact: text(&headers, &cells, SUPPLIER_CONTACT_KEYS).unwrap_or_default(),
            lead_time_days: integer(
                &headers,
                &cells,
                LEAD_TIME_KEYS,
                i64::from(defaults::lead_time()),
                row,
            )?
            .max(0) as u32,
        });
    }
    Ok(records)
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Split one CSV line, honouring quoted cells and doubled quotes.
fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                cells.push(std::mem::take(&mut cell));
            }
            _ => cell.push(c),
        }
    }
    cells.push(cell);
    cells
}

fn lookup<'a>(headers: &[String], cells: &'a [String], aliases: &[&str]) -> Option<&'a str> {
    let position = headers
        .iter()
        .position(|header| aliases.iter().any(|alias| *alias == header.trim()))?;
    let value = cells.get(position)?.trim();
    if value.is_empty() { None } else { Some(value) }
}

fn text(headers: &[String], cells: &[String], aliases: &[&str]) -> Option<String> {
    lookup(headers, cells, aliases).map(str::to_string)
}

fn integer(
    headers: &[String],
    cells: &[String],
    aliases: &[&str],
    default: i64,
    row: usize,
) -> Result<i64, ImportError> {
    match lookup(headers, cells, aliases) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ImportError::Row {
            row,
            message: format!("{} is not a whole number: {value:?}", aliases[0]),
        }),
    }
}

fn price(headers: &[String], cells: &[String], row: usize) -> Result<f64, ImportError> {
    match lookup(headers, cells, PRICE_KEYS) {
        None => Ok(0.0),
        Some(value) => match Money::from_decimal_str(value) {
            Ok(money) => Ok(money.cents() as f64 / 100.0),
            Err(_) => Err(ImportError::Row {
                row,
                message: format!("Price is not a decimal amount: {value:?}"),
            }),
        },
    }
}
