use std::process::Command;

use fluxcli_api::{ModuleError, Value, json};
use regex::Regex;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub ip: String,
    pub hostname: String,
    pub mac: String,
}

impl From<Host> for Value {
    fn from(host: Host) -> Self {
        json!({
            "ip": host.ip,
            "hostname": host.hostname,
            "mac": host.mac,
        })
    }
}

/// Runs nmap and returns its stdout. A non-zero exit is logged but its
/// output is still parsed, matching how nmap reports partial results.
pub(crate) fn run_nmap(args: &[&str]) -> Result<String, ModuleError> {
    let output = Command::new("nmap").args(args).output()?;

    if !output.status.success() {
        warn!(
            status = ?output.status.code(),
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "nmap exited with failure status"
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

pub fn parse_ping_sweep(pattern: &Regex, output: &str) -> Vec<Value> {
    pattern
        .captures_iter(output)
        .map(|caps| {
            Host {
                hostname: caps[1].to_string(),
                ip: caps[2].to_string(),
                mac: caps[3].to_string(),
            }
            .into()
        })
        .collect()
}

pub fn parse_open_ports(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.contains("/tcp") && line.contains(" open "))
        .map(|line| line.trim().to_string())
        .collect()
}
