use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

const ORDERS: &str = r#"[
  {"id":"o1","status":"Delivered","createdAt":"2025-03-01T09:00:00Z",
   "items":[{"miniResName":"Cafe A","itemName":"Tea","quantity":2,"price":50}]},
  {"id":"o2","status":"Pending","createdAt":"2025-03-01T12:30:00Z",
   "items":[{"miniResName":"cafe a","itemName":"Tea","quantity":1,"price":50},
            {"miniResName":"Cafe A","itemName":"Bun","quantity":3,"price":20},
            {"miniResName":"Cafe B","itemName":"Soup","quantity":1,"price":80}]},
  {"id":"o3","status":"Preparing","createdAt":"2025-03-02T08:00:00Z",
   "items":[{"miniResName":"Cafe A","itemName":"Bun","quantity":1,"price":20}]},
  {"id":"o4","status":"Delivered","createdAt":"2025-03-01T10:00:00Z",
   "items":[{"miniResName":"Cafe B","itemName":"Soup","quantity":2,"price":80}]},
  {"id":"bad-status","status":"Cancelled","createdAt":"2025-03-01T10:00:00Z","items":[]},
  {"id":"no-items","status":"Pending","createdAt":"2025-03-01T10:00:00Z"}
]"#;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "orderstats-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write test file");
}

fn bin() -> String {
    std::env::var("CARGO_BIN_EXE_orderstats").unwrap_or_else(|_| {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        if cfg!(windows) {
            path.push("orderstats.exe");
        } else {
            path.push("orderstats");
        }
        path.to_string_lossy().into_owned()
    })
}

/// Command isolated from any user config: empty config file, temp HOME, UTC
fn command(root: &Path, args: &[&str]) -> Command {
    let config = root.join("config.toml");
    if !config.exists() {
        write_file(&config, "");
    }
    let mut cmd = Command::new(bin());
    cmd.arg("--config")
        .arg(&config)
        .args(["--timezone", "UTC"])
        .args(args)
        .env("HOME", root)
        .env_remove("RUST_LOG");
    cmd
}

fn run_orderstats(root: &Path, args: &[&str]) -> (bool, Vec<u8>, Vec<u8>) {
    let output = command(root, args).output().expect("run orderstats");
    (output.status.success(), output.stdout, output.stderr)
}

fn run_json(root: &Path, args: &[&str]) -> Value {
    let (ok, stdout, stderr) = run_orderstats(root, args);
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
    serde_json::from_slice(&stdout).expect("json")
}

fn orders_fixture(prefix: &str) -> (PathBuf, String) {
    let root = unique_temp_dir(prefix);
    let orders = root.join("orders.json");
    write_file(&orders, ORDERS);
    let input = orders.to_string_lossy().into_owned();
    (root, input)
}

fn money(value: &Value) -> f64 {
    value
        .as_str()
        .expect("money serialized as string")
        .parse()
        .expect("decimal string")
}

#[test]
fn report_json_for_single_delivered_order() {
    let root = unique_temp_dir("single");
    let input = root.join("orders.json");
    write_file(
        &input,
        r#"[{"id":"o1","status":"Delivered","createdAt":"2025-03-01T09:00:00Z",
             "items":[{"miniResName":"Cafe A","itemName":"Tea","quantity":2,"price":50}]}]"#,
    );
    let input = input.to_string_lossy().into_owned();

    let json = run_json(&root, &["-r", "Cafe A", "-i", &input, "-j"]);
    let items = json["itemStats"].as_array().expect("itemStats array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["itemName"], "Tea");
    assert_eq!(items[0]["totalQuantity"], 2);
    assert_eq!(money(&items[0]["totalRevenue"]), 100.0);
    assert_eq!(items[0]["pendingCount"], 0);
    assert_eq!(items[0]["acceptedCount"], 0);
    assert_eq!(items[0]["deliveredCount"], 2);

    let summary = &json["summary"];
    assert_eq!(summary["totalOrders"], 1);
    assert_eq!(summary["totalItems"], 2);
    assert_eq!(money(&summary["totalRevenue"]), 100.0);
    assert_eq!(summary["deliveredOrders"], 1);

    let json = run_json(&root, &["-r", "Cafe B", "-i", &input, "-j"]);
    assert_eq!(json["itemStats"].as_array().map(Vec::len), Some(0));
    assert_eq!(json["summary"]["totalOrders"], 0);
    assert_eq!(json["summary"]["totalItems"], 0);
    assert_eq!(money(&json["summary"]["totalRevenue"]), 0.0);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn report_merges_items_across_orders_and_skips_malformed_records() {
    let (root, input) = orders_fixture("report");

    let json = run_json(&root, &["report", "-r", "CAFE A", "-i", &input, "-j"]);
    let items = json["itemStats"].as_array().expect("itemStats array");
    let names: Vec<&str> = items.iter().filter_map(|i| i["itemName"].as_str()).collect();
    assert_eq!(names, vec!["Tea", "Bun"]);

    assert_eq!(items[0]["totalQuantity"], 3);
    assert_eq!(money(&items[0]["totalRevenue"]), 150.0);
    assert_eq!(items[0]["pendingCount"], 1);
    assert_eq!(items[0]["deliveredCount"], 2);

    assert_eq!(items[1]["totalQuantity"], 4);
    assert_eq!(money(&items[1]["totalRevenue"]), 80.0);
    assert_eq!(items[1]["pendingCount"], 3);
    assert_eq!(items[1]["acceptedCount"], 1);

    let summary = &json["summary"];
    assert_eq!(summary["totalOrders"], 3);
    assert_eq!(summary["totalItems"], 7);
    assert_eq!(money(&summary["totalRevenue"]), 230.0);
    assert_eq!(summary["pendingOrders"], 1);
    assert_eq!(summary["acceptedOrders"], 1);
    assert_eq!(summary["deliveredOrders"], 1);

    assert_eq!(json["source"]["validOrders"], 4);
    assert_eq!(json["source"]["skippedRecords"], 2);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn date_time_and_status_filters_narrow_the_report() {
    let (root, input) = orders_fixture("filters");

    let json = run_json(&root, &["-r", "Cafe A", "-i", &input, "-d", "2025-03-01", "-j"]);
    assert_eq!(json["filters"]["date"], "2025-03-01");
    assert_eq!(json["summary"]["totalOrders"], 2);
    assert_eq!(json["summary"]["acceptedOrders"], 0);

    let json = run_json(
        &root,
        &[
            "-r", "Cafe A", "-i", &input, "-d", "20250301", "--from", "12:00", "--to", "13:00",
            "-j",
        ],
    );
    assert_eq!(json["summary"]["totalOrders"], 1);
    assert_eq!(json["summary"]["pendingOrders"], 1);

    let json = run_json(&root, &["-r", "Cafe A", "-i", &input, "-s", "accepted", "-j"]);
    assert_eq!(json["filters"]["status"], "accepted");
    assert_eq!(json["summary"]["totalOrders"], 1);
    assert_eq!(json["itemStats"][0]["itemName"], "Bun");
    assert_eq!(json["itemStats"][0]["acceptedCount"], 1);

    let json = run_json(&root, &["-r", "Cafe A", "-i", &input, "-s", "delivered", "-j"]);
    let items = json["itemStats"].as_array().expect("itemStats array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["itemName"], "Tea");
    assert_eq!(money(&json["summary"]["totalRevenue"]), 100.0);

    let json = run_json(&root, &["-r", "Cafe A", "-i", &input, "-s", "all", "-j"]);
    assert!(json["filters"]["status"].is_null());
    assert_eq!(json["summary"]["totalOrders"], 3);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn summary_and_items_subcommands_select_sections() {
    let (root, input) = orders_fixture("views");

    let json = run_json(&root, &["summary", "-r", "Cafe A", "-i", &input, "-j"]);
    assert!(json.get("itemStats").is_none());
    assert_eq!(json["summary"]["totalOrders"], 3);

    let json = run_json(&root, &["items", "-r", "Cafe A", "-i", &input, "-j"]);
    assert!(json.get("summary").is_none());
    assert_eq!(json["itemStats"].as_array().map(Vec::len), Some(2));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn csv_output_lists_items_then_summary() {
    let (root, input) = orders_fixture("csv");

    let (ok, stdout, stderr) = run_orderstats(&root, &["-r", "Cafe A", "-i", &input, "--csv"]);
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
    let text = String::from_utf8(stdout).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("item_name,total_quantity,total_revenue"));
    assert!(lines[1].starts_with("Tea,3,"));
    assert!(lines[2].starts_with("Bun,4,"));
    assert!(lines.iter().any(|l| l.starts_with("total_orders,")));
    assert!(lines.iter().any(|l| l.starts_with("3,7,")));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn table_output_mentions_items_and_load_counts() {
    let (root, input) = orders_fixture("table");

    let (ok, stdout, stderr) =
        run_orderstats(&root, &["-r", "Cafe A", "-i", &input, "--no-color"]);
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
    let text = String::from_utf8_lossy(&stdout);
    assert!(text.contains("Tea"));
    assert!(text.contains("Bun"));
    assert!(text.contains("230.00"));
    assert!(text.contains("4 orders loaded (2 malformed records skipped)"));

    let (ok, stdout, _) = run_orderstats(&root, &["-r", "Cafe Z", "-i", &input, "--no-color"]);
    assert!(ok);
    assert!(String::from_utf8_lossy(&stdout).contains("No orders for Cafe Z"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn directory_input_reads_json_and_jsonl_files() {
    let root = unique_temp_dir("dir");
    let dir = root.join("exports");
    write_file(
        &dir.join("a.json"),
        r#"{"orders":[{"id":"o1","status":"Accepted","createdAt":1740819600000,
             "items":[{"miniResName":"Cafe A","itemName":"Tea","quantity":1,"price":"12.50"}]}]}"#,
    );
    write_file(
        &dir.join("nested").join("b.jsonl"),
        "{\"id\":\"o2\",\"status\":\"On the way\",\"createdAt\":{\"_seconds\":1740823200,\"_nanoseconds\":0},\"items\":[{\"miniResName\":\"Cafe A\",\"itemName\":\"Tea\",\"quantity\":1,\"price\":12.5}]}\nnot json\n",
    );
    let input = dir.to_string_lossy().into_owned();

    let json = run_json(&root, &["-r", "Cafe A", "-i", &input, "-j"]);
    assert_eq!(json["summary"]["totalOrders"], 2);
    assert_eq!(json["summary"]["acceptedOrders"], 2);
    assert_eq!(json["itemStats"][0]["totalQuantity"], 2);
    assert_eq!(money(&json["itemStats"][0]["totalRevenue"]), 25.0);
    assert_eq!(json["source"]["skippedRecords"], 1);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn stdin_input_is_read_with_dash() {
    let root = unique_temp_dir("stdin");
    let mut child = command(&root, &["-r", "Cafe A", "-i", "-", "-j"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn orderstats");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(ORDERS.as_bytes())
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait orderstats");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["summary"]["totalOrders"], 3);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn restaurant_can_come_from_config() {
    let (root, input) = orders_fixture("config");
    write_file(
        &root.join("config.toml"),
        &format!("restaurant = \"Cafe B\"\ninput = {input:?}\nstatus = \"delivered\"\n"),
    );

    let json = run_json(&root, &["-j"]);
    assert_eq!(json["restaurant"], "Cafe B");
    assert_eq!(json["summary"]["totalOrders"], 1);
    assert_eq!(json["itemStats"][0]["itemName"], "Soup");

    let json = run_json(&root, &["-r", "Cafe A", "-s", "all", "-j"]);
    assert_eq!(json["restaurant"], "Cafe A");
    assert_eq!(json["summary"]["totalOrders"], 3);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn missing_input_fails_without_output() {
    let root = unique_temp_dir("missing");
    let missing = root.join("nope.json").to_string_lossy().into_owned();

    let (ok, stdout, stderr) = run_orderstats(&root, &["-r", "Cafe A", "-i", &missing, "-j"]);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(String::from_utf8_lossy(&stderr).contains("Failed to read orders"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn missing_restaurant_and_bad_arguments_are_errors() {
    let (root, input) = orders_fixture("errors");

    let (ok, _, stderr) = run_orderstats(&root, &["-i", &input, "-j"]);
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("No restaurant given"));

    let (ok, _, stderr) = run_orderstats(&root, &["-r", "Cafe A", "-i", &input, "-d", "March 1"]);
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("Invalid date"));

    let (ok, _, stderr) = run_orderstats(&root, &["-r", "Cafe A", "-i", &input, "--from", "25:00"]);
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("Invalid time"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn inverted_time_window_matches_nothing() {
    let (root, input) = orders_fixture("inverted");

    let json = run_json(
        &root,
        &["-r", "Cafe A", "-i", &input, "--from", "18:00", "--to", "08:00", "-j"],
    );
    assert_eq!(json["summary"]["totalOrders"], 0);
    assert_eq!(json["itemStats"].as_array().map(Vec::len), Some(0));

    let _ = fs::remove_dir_all(root);
}
