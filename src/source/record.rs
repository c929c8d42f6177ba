//! Raw order record validation
//!
//! Converts loosely typed JSON order documents into [`Order`] values.
//! Structurally invalid records are rejected with a [`RecordError`];
//! optional item fields fall back to defaults instead.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::consts::UNKNOWN_ITEM;
use crate::core::{LineItem, Order, OrderStatus};
use crate::error::RecordError;

const ID_KEYS: &[&str] = &["id", "orderId"];
const TIMESTAMP_KEYS: &[&str] = &["createdAt", "timestamp"];

fn first<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key)).filter(|v| !v.is_null())
}

fn parse_id(obj: &Map<String, Value>, fallback: Option<&str>) -> Result<String, RecordError> {
    match first(obj, ID_KEYS) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(RecordError::MissingId),
        None => fallback
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or(RecordError::MissingId),
    }
}

/// Accepts RFC 3339 strings, epoch milliseconds, or `{seconds, nanoseconds}` objects
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::Object(obj) => {
            let seconds = first(obj, &["seconds", "_seconds"])?.as_i64()?;
            let nanos = first(obj, &["nanoseconds", "_nanoseconds"])
                .and_then(Value::as_i64)
                .unwrap_or(0);
            let millis = seconds.checked_mul(1000)?.checked_add(nanos / 1_000_000)?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

fn parse_quantity(value: Option<&Value>) -> u64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.unwrap_or(0)
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn parse_price(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    };
    parsed
        .filter(|price| !price.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}

fn parse_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Whether a JSON object is itself an order rather than a container of orders
pub(crate) fn looks_like_order(obj: &Map<String, Value>) -> bool {
    ["items", "status"]
        .iter()
        .chain(ID_KEYS)
        .chain(TIMESTAMP_KEYS)
        .any(|key| obj.contains_key(*key))
}

/// Build a line item, defaulting every field that is absent or of the wrong type
pub(crate) fn parse_line_item(obj: &Map<String, Value>) -> LineItem {
    LineItem {
        restaurant_name: parse_text(obj.get("miniResName")).unwrap_or_default(),
        item_name: parse_text(obj.get("itemName")).unwrap_or_else(|| UNKNOWN_ITEM.to_string()),
        quantity: parse_quantity(obj.get("quantity")),
        price: parse_price(obj.get("price")),
    }
}

/// Validate one order record. `key` is the document key when the export is an id-keyed map.
pub(crate) fn parse_order(value: &Value, key: Option<&str>) -> Result<Order, RecordError> {
    let obj = value.as_object().ok_or(RecordError::NotAnObject)?;

    let id = parse_id(obj, key)?;

    let items = obj
        .get("items")
        .and_then(Value::as_array)
        .ok_or(RecordError::MissingItems)?
        .iter()
        .filter_map(Value::as_object)
        .map(parse_line_item)
        .collect();

    let status = match obj.get("status") {
        Some(Value::String(raw)) => {
            OrderStatus::from_wire(raw).ok_or_else(|| RecordError::UnknownStatus(raw.clone()))?
        }
        Some(other) => return Err(RecordError::UnknownStatus(other.to_string())),
        None => return Err(RecordError::UnknownStatus(String::new())),
    };

    let created_at = first(obj, TIMESTAMP_KEYS)
        .and_then(parse_timestamp)
        .ok_or(RecordError::InvalidTimestamp)?;

    Ok(Order {
        id,
        items,
        status,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "id": "ord-1",
            "status": "On the way",
            "createdAt": "2025-03-01T09:15:30.250Z",
            "items": [
                {"miniResName": "Cafe A", "itemName": "Tea", "quantity": 2, "price": 12.5}
            ]
        })
    }

    #[test]
    fn parses_complete_record() {
        let order = parse_order(&valid(), None).unwrap();
        assert_eq!(order.id, "ord-1");
        assert_eq!(order.status, OrderStatus::OnTheWay);
        assert_eq!(order.created_at.timestamp_millis(), 1_740_820_530_250);
        assert_eq!(
            order.items,
            vec![LineItem {
                restaurant_name: "Cafe A".to_string(),
                item_name: "Tea".to_string(),
                quantity: 2,
                price: Decimal::new(125, 1),
            }]
        );
    }

    #[test]
    fn item_fields_fall_back_to_defaults() {
        let item = parse_line_item(
            json!({"quantity": "lots", "price": {"amount": 3}})
                .as_object()
                .unwrap(),
        );
        assert_eq!(item.restaurant_name, "");
        assert_eq!(item.item_name, "Unknown Item");
        assert_eq!(item.quantity, 0);
        assert_eq!(item.price, Decimal::ZERO);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let item = parse_line_item(
            json!({"miniResName": "Cafe A", "itemName": "Tea", "quantity": " 3 ", "price": "19.99"})
                .as_object()
                .unwrap(),
        );
        assert_eq!(item.quantity, 3);
        assert_eq!(item.price, Decimal::new(1999, 2));
    }

    #[test]
    fn negative_or_fractional_values_default_to_zero() {
        let item = parse_line_item(
            json!({"quantity": -2, "price": -5}).as_object().unwrap(),
        );
        assert_eq!(item.quantity, 0);
        assert_eq!(item.price, Decimal::ZERO);

        let item = parse_line_item(json!({"quantity": 1.5}).as_object().unwrap());
        assert_eq!(item.quantity, 0);

        let item = parse_line_item(json!({"quantity": 4.0}).as_object().unwrap());
        assert_eq!(item.quantity, 4);
    }

    #[test]
    fn non_object_items_are_dropped() {
        let mut record = valid();
        record["items"] = json!(["Tea", 3, {"itemName": "Bun", "miniResName": "Cafe A"}]);
        let order = parse_order(&record, None).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].item_name, "Bun");
    }

    #[test]
    fn alternate_keys_and_timestamp_forms() {
        let order = parse_order(
            &json!({
                "orderId": 42,
                "status": "Pending",
                "timestamp": 1_740_820_530_250_i64,
                "items": []
            }),
            None,
        )
        .unwrap();
        assert_eq!(order.id, "42");
        assert_eq!(order.created_at.timestamp_millis(), 1_740_820_530_250);

        let order = parse_order(
            &json!({
                "status": "Delivered",
                "createdAt": {"_seconds": 1_740_820_530_i64, "_nanoseconds": 250_000_000},
                "items": []
            }),
            Some("doc-7"),
        )
        .unwrap();
        assert_eq!(order.id, "doc-7");
        assert_eq!(order.created_at.timestamp_millis(), 1_740_820_530_250);
    }

    #[test]
    fn order_shaped_objects_are_recognised() {
        let order = json!({
            "id": "x",
            "status": "Pending",
            "createdAt": "2025-03-01T09:00:00Z"
        });
        assert!(looks_like_order(order.as_object().unwrap()));
        let keyed = json!({"k1": {"items": []}, "k2": {"items": []}});
        assert!(!looks_like_order(keyed.as_object().unwrap()));
    }

    #[test]
    fn structural_problems_reject_the_record() {
        assert_eq!(parse_order(&json!([1, 2]), None), Err(RecordError::NotAnObject));

        let mut record = valid();
        record.as_object_mut().unwrap().remove("id");
        assert_eq!(parse_order(&record, None), Err(RecordError::MissingId));

        let mut record = valid();
        record["items"] = json!("Tea x2");
        assert_eq!(parse_order(&record, None), Err(RecordError::MissingItems));

        let mut record = valid();
        record["status"] = json!("Cancelled");
        assert_eq!(
            parse_order(&record, None),
            Err(RecordError::UnknownStatus("Cancelled".to_string()))
        );

        let mut record = valid();
        record["createdAt"] = json!("yesterday");
        assert_eq!(parse_order(&record, None), Err(RecordError::InvalidTimestamp));
    }
}
