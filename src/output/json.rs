use serde_json::{Map, Value, json};

use crate::cli::View;
use crate::core::Snapshot;

/// JSON document for a published snapshot, shaped by the selected view
pub(crate) fn output_report_json(restaurant: &str, snapshot: &Snapshot, view: View) -> String {
    let mut root = Map::new();
    root.insert("restaurant".to_string(), json!(restaurant));
    root.insert("filters".to_string(), json!(snapshot.filters));
    if view.items {
        root.insert("itemStats".to_string(), json!(snapshot.analytics.item_stats));
    }
    if view.summary {
        root.insert("summary".to_string(), json!(snapshot.analytics.summary));
    }
    root.insert(
        "source".to_string(),
        json!({
            "validOrders": snapshot.valid,
            "skippedRecords": snapshot.skipped,
        }),
    );

    serde_json::to_string_pretty(&Value::Object(root)).unwrap_or_else(|_| "{}".to_string())
}
