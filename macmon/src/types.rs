//! Point-in-time samples handed from the provider to the reporter.
//! Every struct here is a plain snapshot: built per request, formatted, dropped.

use serde::Serialize;
use std::net::IpAddr;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct CpuFrequency {
    pub current_mhz: f64,
    // not every platform exposes a ceiling; 0 is treated like absent
    pub max_mhz: Option<f64>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct MemoryUsage {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub percent: f32,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct SwapUsage {
    pub total: u64,
    pub used: u64,
    pub percent: f32,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f32,
}

/// Everything `get_system_status` prints.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StatusSample {
    pub cpu_percent: f32,
    pub logical_cores: usize,
    pub load_avg: LoadAverage,
    pub memory: MemoryUsage,
    pub swap: SwapUsage,
    // None when the configured mount point (and every fallback) is missing
    pub disk: Option<DiskUsage>,
    /// Seconds since the Unix epoch.
    pub boot_time: i64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CpuSample {
    pub per_core_percents: Vec<f32>,
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    pub frequency: Option<CpuFrequency>,
    pub load_avg: LoadAverage,
}

/// Cumulative counters summed over every interface.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct NetworkCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errors_in: u64,
    pub errors_out: u64,
    // only Linux exposes drop counters to us
    pub drops: Option<u64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct InterfaceAddress {
    pub interface: String,
    pub addr: IpAddr,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NetworkSample {
    pub counters: NetworkCounters,
    pub interfaces: Vec<InterfaceAddress>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub resident_bytes: u64,
}

/// The four usage figures the alert table looks at.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct UsageSample {
    pub cpu: f32,
    pub memory: f32,
    pub disk: f32,
    pub swap: f32,
}

/// Percentage helper that tolerates a zero total (e.g. no swap configured).
pub fn percent_of(part: u64, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    ((part as f64 / total as f64) * 100.0) as f32
}
