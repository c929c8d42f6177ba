use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::JqError;

/// Run `jq <filter>` over a JSON document and return its stdout
pub(crate) fn filter_json(json: &str, filter: &str) -> Result<String, JqError> {
    let mut child = Command::new("jq")
        .arg(filter)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => JqError::NotFound,
            _ => JqError::Spawn(e),
        })?;

    // dropping stdin closes the pipe so jq sees EOF
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(json.as_bytes()).map_err(JqError::Stdin)?;
    }

    let output = child.wait_with_output().map_err(JqError::Wait)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(JqError::Filter(stderr.trim().to_string()));
    }
    String::from_utf8(output.stdout).map_err(JqError::Utf8)
}
