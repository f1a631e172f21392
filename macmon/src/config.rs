//! Runtime configuration: environment knobs and command-line flags.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CPU_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_PROC_CPU_DELAY_MS: u64 = 100;
/// Upper bound on the process refresh delay; larger settings are clamped.
pub const MAX_PROC_CPU_DELAY_MS: u64 = 500;
pub const DEFAULT_DISK_MOUNT: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Window used for interval-based CPU percentages (MACMON_CPU_INTERVAL_MS).
    pub cpu_interval: Duration,
    /// Delay between the two process refreshes (MACMON_PROC_CPU_DELAY_MS), at most 500 ms.
    pub proc_cpu_delay: Duration,
    /// Filesystem reported under "Storage" (MACMON_DISK_MOUNT).
    pub disk_mount: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cpu_interval: Duration::from_millis(DEFAULT_CPU_INTERVAL_MS),
            proc_cpu_delay: Duration::from_millis(DEFAULT_PROC_CPU_DELAY_MS),
            disk_mount: PathBuf::from(DEFAULT_DISK_MOUNT),
        }
    }
}

fn env_millis(key: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}

impl Config {
    pub fn from_env() -> Self {
        let disk_mount = std::env::var_os("MACMON_DISK_MOUNT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DISK_MOUNT));
        Self {
            cpu_interval: env_millis("MACMON_CPU_INTERVAL_MS", DEFAULT_CPU_INTERVAL_MS),
            proc_cpu_delay: env_millis("MACMON_PROC_CPU_DELAY_MS", DEFAULT_PROC_CPU_DELAY_MS)
                .min(Duration::from_millis(MAX_PROC_CPU_DELAY_MS)),
            disk_mount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Serve MCP over stdio (default).
    Serve,
    /// Run every tool once and print the output.
    SelfTest,
    Help,
    Version,
}

pub fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--test] [-h|--help] [-V|--version]\n\
         \n\
         Without flags, serves MCP tools over stdio.\n\
         \n\
         Environment:\n\
         \x20 MACMON_CPU_INTERVAL_MS    CPU sampling window in ms (default {DEFAULT_CPU_INTERVAL_MS})\n\
         \x20 MACMON_PROC_CPU_DELAY_MS  delay between process refreshes in ms (default {DEFAULT_PROC_CPU_DELAY_MS}, max {MAX_PROC_CPU_DELAY_MS})\n\
         \x20 MACMON_DISK_MOUNT         mount point reported under Storage (default {DEFAULT_DISK_MOUNT})\n\
         \x20 RUST_LOG                  log filter, logs go to stderr (default macmon=info)"
    )
}

/// First recognised flag wins; unknown flags are an error carrying the usage text.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Mode, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "macmon".into());
    for arg in it {
        match arg.as_str() {
            "--test" => return Ok(Mode::SelfTest),
            "-h" | "--help" => return Ok(Mode::Help),
            "-V" | "--version" => return Ok(Mode::Version),
            other => {
                return Err(format!("Unexpected argument '{other}'.\n{}", usage(&prog)));
            }
        }
    }
    Ok(Mode::Serve)
}
