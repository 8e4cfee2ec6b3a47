//! Nmap wrapper module for FluxCLI.
//!
//! Exposes `pingsweep <subnet>` and `portscan <target> [ports]`. Both shell
//! out to the `nmap` binary and return a JSON summary of its output.

mod scan;

use fluxcli_api::{Args, Module, ModuleError, OperationTable, json};
use regex::Regex;
use tracing::debug;

pub use scan::{Host, parse_open_ports, parse_ping_sweep};

pub const DEFAULT_PORTS: &str = "1-1000";

const HOST_PATTERN: &str =
    r"(?s)Nmap scan report for ([^ ]+) \(([\d\.]+)\).*?MAC Address: ([\w:]+)";

const PORTS_PATTERN: &str = r"^\d+(-\d+)?(,\d+(-\d+)?)*$";

#[derive(Debug, Default)]
pub struct NmapModule;

impl NmapModule {
    pub fn new() -> Self {
        Self
    }
}

impl Module for NmapModule {
    fn name(&self) -> &'static str {
        "nmap"
    }

    fn description(&self) -> &'static str {
        "Network discovery and port scanning through nmap"
    }

    fn register(&self, table: &mut OperationTable) -> Result<(), ModuleError> {
        let host_pattern = host_pattern().map_err(|e| ModuleError::init(e.to_string()))?;
        let ports_pattern =
            Regex::new(PORTS_PATTERN).map_err(|e| ModuleError::init(e.to_string()))?;

        table.insert("pingsweep", move |args| {
            let args = Args::new(args);
            args.ensure_max(1)?;
            let subnet = args.required(0, "subnet")?;

            debug!(subnet, "Running nmap ping sweep");
            let output = scan::run_nmap(&["-sn", subnet])?;
            let hosts = scan::parse_ping_sweep(&host_pattern, &output);
            Ok(json!({ "hosts": hosts }))
        });

        table.insert("portscan", move |args| {
            let args = Args::new(args);
            args.ensure_max(2)?;
            let target = args.required(0, "target")?;
            let ports = args.or_default(1, DEFAULT_PORTS);
            if !ports_pattern.is_match(ports) {
                return Err(ModuleError::InvalidArgument {
                    name: "ports".to_string(),
                    reason: format!("'{}' is not a port list such as 22,80 or 1-1000", ports),
                });
            }

            debug!(target, ports, "Running nmap port scan");
            let output = scan::run_nmap(&["-p", ports, target])?;
            Ok(json!({ "ports_open": scan::parse_open_ports(&output) }))
        });

        Ok(())
    }
}

/// Pattern used by `pingsweep` to pick hosts out of nmap's report.
pub fn host_pattern() -> Result<Regex, regex::Error> {
    Regex::new(HOST_PATTERN)
}
