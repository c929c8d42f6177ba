use crate::cli::{Cli, View};
use crate::consts::TIME_FORMAT;
use crate::core::{AnalyticsSession, Snapshot};
use crate::error::AppError;
use crate::output::{
    TableOptions, output_report_csv, output_report_json, print_item_table, print_load_line,
    print_summary_table,
};
use crate::source::open_source;
use crate::utils::{Timezone, filter_json, parse_date, parse_time};

/// Print JSON output, optionally filtering through jq
fn print_json(json: &str, jq_filter: Option<&str>) -> Result<(), AppError> {
    match jq_filter {
        Some(filter) => print!("{}", filter_json(json, filter)?),
        None => println!("{json}"),
    }
    Ok(())
}

/// Build a session for the restaurant and apply the filters given on the command line
fn build_session(cli: &Cli, timezone: Timezone) -> Result<AnalyticsSession, AppError> {
    let restaurant = cli
        .restaurant
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(AppError::MissingRestaurant)?;

    let date = cli
        .date
        .as_deref()
        .map(|raw| parse_date(raw, timezone))
        .transpose()?;
    let start = cli.from.as_deref().map(parse_time).transpose()?;
    let end = cli.to.as_deref().map(parse_time).transpose()?;
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        tracing::warn!(
            from = %start.format(TIME_FORMAT),
            to = %end.format(TIME_FORMAT),
            "Time window does not wrap past midnight; no orders can match"
        );
    }

    let mut session = AnalyticsSession::new(restaurant, timezone);
    session.set_date(date);
    session.set_time_range(start, end);
    session.set_status(cli.status.and_then(|s| s.bucket()));
    Ok(session)
}

fn render(cli: &Cli, restaurant: &str, snapshot: &Snapshot, view: View) -> Result<(), AppError> {
    if cli.wants_json() {
        let json = output_report_json(restaurant, snapshot, view);
        return print_json(&json, cli.jq.as_deref());
    }
    if cli.csv {
        print!("{}", output_report_csv(&snapshot.analytics, view));
        return Ok(());
    }

    let use_color = cli.use_color();
    let analytics = &snapshot.analytics;
    if analytics.summary.total_orders == 0 {
        println!(
            "No orders for {restaurant} match the current filters ({}).",
            snapshot.filters.describe()
        );
        return Ok(());
    }

    println!("\n  Filters: {}", snapshot.filters.describe());
    let options = TableOptions { use_color };
    if view.items {
        print_item_table(restaurant, &analytics.item_stats, &analytics.summary, options);
    }
    if view.summary {
        print_summary_table(restaurant, &analytics.summary, options);
    }
    print_load_line(snapshot, use_color);
    Ok(())
}

/// Load orders, compute analytics for the requested filters and print them
pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let session = build_session(cli, timezone)?;
    let source = open_source(cli.input());

    tracing::debug!(
        restaurant = session.restaurant(),
        source = %source.name(),
        filters = %session.filters().describe(),
        "Computing order analytics"
    );

    session.refresh(source.as_ref())?;
    let Some(snapshot) = session.latest() else {
        return Ok(());
    };

    render(cli, session.restaurant(), &snapshot, View::from_command(cli.command))
}
