use std::fmt::Write;

use crate::cli::View;
use crate::core::{Analytics, ItemStats, OrderSummary};

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn write_item_rows(out: &mut String, items: &[ItemStats]) {
    out.push_str(
        "item_name,total_quantity,total_revenue,pending_count,accepted_count,delivered_count\n",
    );
    for item in items {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            csv_escape(&item.item_name),
            item.total_quantity,
            item.total_revenue,
            item.pending_count,
            item.accepted_count,
            item.delivered_count,
        );
    }
}

fn write_summary_rows(out: &mut String, summary: &OrderSummary) {
    out.push_str(
        "total_orders,total_items,total_revenue,pending_orders,accepted_orders,delivered_orders\n",
    );
    let _ = writeln!(
        out,
        "{},{},{},{},{},{}",
        summary.total_orders,
        summary.total_items,
        summary.total_revenue,
        summary.pending_orders,
        summary.accepted_orders,
        summary.delivered_orders,
    );
}

/// Item rows and/or the summary row. A report emits both sections separated by a blank line.
pub(crate) fn output_report_csv(analytics: &Analytics, view: View) -> String {
    let mut out = String::new();
    if view.items {
        write_item_rows(&mut out, &analytics.item_stats);
    }
    if view.items && view.summary {
        out.push('\n');
    }
    if view.summary {
        write_summary_rows(&mut out, &analytics.summary);
    }
    out
}
