mod csv;
mod format;
mod json;
mod table;

pub(crate) use csv::output_report_csv;
pub(crate) use json::output_report_json;
pub(crate) use table::{TableOptions, print_item_table, print_load_line, print_summary_table};
