use comfy_table::{Cell, Color};

use crate::core::{ItemStats, OrderSummary, Snapshot};
use crate::output::format::{
    create_styled_table, format_money, format_number, header_cell, right_cell, styled_cell,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
}

/// Print the load summary line with timing
pub(crate) fn print_load_line(snapshot: &Snapshot, use_color: bool) {
    let stats_text = format!(
        "{} orders loaded ({} malformed records skipped)",
        format_number(snapshot.valid as u64),
        format_number(snapshot.skipped as u64)
    );
    if use_color {
        println!("\n  {} | \x1b[36m{:.0}ms\x1b[0m\n", stats_text, snapshot.elapsed_ms);
    } else {
        println!("\n  {} | {:.0}ms\n", stats_text, snapshot.elapsed_ms);
    }
}

pub(crate) fn print_item_table(
    restaurant: &str,
    items: &[ItemStats],
    summary: &OrderSummary,
    options: TableOptions,
) {
    let use_color = options.use_color;
    let cyan = use_color.then_some(Color::Cyan);
    let green = use_color.then_some(Color::Green);

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("#", use_color),
        header_cell("Item", use_color),
        header_cell("Qty", use_color),
        header_cell("Revenue", use_color),
        header_cell("Pending", use_color),
        header_cell("Accepted", use_color),
        header_cell("Delivered", use_color),
    ]);

    let (mut pending, mut accepted, mut delivered) = (0_u64, 0_u64, 0_u64);
    for (rank, item) in items.iter().enumerate() {
        pending = pending.saturating_add(item.pending_count);
        accepted = accepted.saturating_add(item.accepted_count);
        delivered = delivered.saturating_add(item.delivered_count);
        table.add_row(vec![
            right_cell(&(rank + 1).to_string(), None, false),
            Cell::new(&item.item_name),
            right_cell(&format_number(item.total_quantity), None, false),
            right_cell(&format_money(item.total_revenue), green, false),
            right_cell(&format_number(item.pending_count), None, false),
            right_cell(&format_number(item.accepted_count), None, false),
            right_cell(&format_number(item.delivered_count), None, false),
        ]);
    }

    table.add_row(vec![
        Cell::new(""),
        styled_cell("TOTAL", cyan, true),
        right_cell(&format_number(summary.total_items), cyan, true),
        right_cell(&format_money(summary.total_revenue), green, true),
        right_cell(&format_number(pending), cyan, true),
        right_cell(&format_number(accepted), cyan, true),
        right_cell(&format_number(delivered), cyan, true),
    ]);

    println!("\n  Item sales for {restaurant}\n");
    println!("{table}");
}

pub(crate) fn print_summary_table(restaurant: &str, summary: &OrderSummary, options: TableOptions) {
    let use_color = options.use_color;
    let green = use_color.then_some(Color::Green);
    let yellow = use_color.then_some(Color::Yellow);
    let blue = use_color.then_some(Color::Blue);

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Orders", use_color),
        header_cell("Items", use_color),
        header_cell("Revenue", use_color),
        header_cell("Pending", use_color),
        header_cell("Accepted", use_color),
        header_cell("Delivered", use_color),
    ]);
    table.add_row(vec![
        right_cell(&format_number(summary.total_orders as u64), None, true),
        right_cell(&format_number(summary.total_items), None, false),
        right_cell(&format_money(summary.total_revenue), green, true),
        right_cell(&format_number(summary.pending_orders as u64), yellow, false),
        right_cell(&format_number(summary.accepted_orders as u64), blue, false),
        right_cell(&format_number(summary.delivered_orders as u64), green, false),
    ]);

    println!("\n  Order summary for {restaurant}\n");
    println!("{table}");
}
