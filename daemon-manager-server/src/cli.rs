//! Command-line arguments
//!
//! Accepts both the long form (`--name nginx`) and the single-dash form
//! (`-name nginx`). Every option may also come from the environment.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use daemon_manager_core::ServiceRecord;

/// Printed when a required option is missing
pub const USAGE_HINT: &str = "Problems with arguments when launching the application.\n Example: sudo daemon-manager -port 8080 -name apache2 -path /lib/systemd/system/";

/// Options spelled with a single dash by existing deployments
const SINGLE_DASH_OPTIONS: &[&str] = &["-name", "-path", "-port", "-systemctl"];

#[derive(Parser, Debug)]
#[command(name = "daemon-manager")]
#[command(about = "HTTP start/stop/restart/status endpoints for one systemd service", long_about = None)]
pub struct Cli {
    /// Service name without the .service suffix
    #[arg(long, env = "DAEMON_MANAGER_NAME")]
    pub name: Option<String>,

    /// Directory holding the unit file (e.g. /lib/systemd/system/)
    #[arg(long, env = "DAEMON_MANAGER_PATH")]
    pub path: Option<PathBuf>,

    /// Port to listen on, or a full host:port address
    #[arg(long, env = "DAEMON_MANAGER_PORT")]
    pub port: Option<String>,

    /// Supervisor binary
    #[arg(long, env = "DAEMON_MANAGER_SYSTEMCTL", default_value = "systemctl")]
    pub systemctl: String,
}

/// Resolved startup configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub record: ServiceRecord,

    /// Port exactly as given on the command line
    pub port: String,

    /// Socket address handed to the listener
    pub bind_addr: String,

    pub systemctl: String,
}

impl Cli {
    /// Parses arguments, rewriting single-dash long options first
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// Checks that every required option is present and non-empty
    pub fn into_config(self) -> Result<Config> {
        let name = non_empty(self.name).context("missing required argument: name")?;
        let path = self
            .path
            .filter(|p| !p.to_string_lossy().trim().is_empty())
            .context("missing required argument: path")?;
        let port = non_empty(self.port).context("missing required argument: port")?;

        let record = ServiceRecord::new(name, path)?;
        let bind_addr = bind_address(&port);

        Ok(Config {
            record,
            port,
            bind_addr,
            systemctl: self.systemctl,
        })
    }
}

/// Prints the usage example and logs why startup was refused
pub fn report_invalid(err: &anyhow::Error, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{USAGE_HINT}")?;
    tracing::error!(
        "Problems with arguments when launching the application: {:#}",
        err
    );
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some(s) if SINGLE_DASH_OPTIONS.contains(&s) => OsString::from(format!("-{s}")),
            _ => arg,
        })
        .collect()
}

/// Turns a bare port (`8080` or `:8080`) into a wildcard address
pub fn bind_address(port: &str) -> String {
    if port.parse::<u16>().is_ok() {
        format!("0.0.0.0:{port}")
    } else if let Some(rest) = port.strip_prefix(':') {
        format!("0.0.0.0:{rest}")
    } else {
        port.to_string()
    }
}
