//! Metrics collection using sysinfo.
//!
//! Every call builds fresh sysinfo handles, so nothing carries over between requests.
//! Interval-based figures (CPU%, per-process CPU%) block the calling thread for the
//! configured window; callers on an async runtime should run these on the blocking pool.

use anyhow::Result;
use std::thread;
use std::time::Duration;
use sysinfo::{
    CpuRefreshKind, Disks, MemoryRefreshKind, Networks, ProcessRefreshKind, ProcessesToUpdate,
    RefreshKind, System, MINIMUM_CPU_UPDATE_INTERVAL,
};
#[cfg(target_os = "linux")]
use std::fs;
use tracing::{debug, warn};

use crate::config::{Config, MAX_PROC_CPU_DELAY_MS};
use crate::types::{
    percent_of, CpuFrequency, CpuSample, DiskUsage, InterfaceAddress, LoadAverage, MemoryUsage,
    NetworkCounters, NetworkSample, ProcessEntry, StatusSample, SwapUsage, UsageSample,
};

/// Source of raw samples for the report builders.
pub trait MetricsProvider: Send + Sync {
    fn status(&self) -> Result<StatusSample>;
    fn processes(&self) -> Result<Vec<ProcessEntry>>;
    fn network(&self) -> Result<NetworkSample>;
    fn cpu(&self) -> Result<CpuSample>;
    fn usage(&self) -> Result<UsageSample>;
}

pub struct SysinfoProvider {
    config: Config,
}

impl SysinfoProvider {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn cpu_window(&self) -> Duration {
        self.config.cpu_interval.max(MINIMUM_CPU_UPDATE_INTERVAL)
    }

    // Two CPU refreshes separated by the sampling window.
    fn measured_cpu(&self) -> System {
        let mut sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()),
        );
        thread::sleep(self.cpu_window());
        sys.refresh_cpu_specifics(CpuRefreshKind::everything());
        sys
    }

    fn disk(&self) -> Option<DiskUsage> {
        let disks = Disks::new_with_refreshed_list();
        let list = disks.list();
        let wanted = self.config.disk_mount.as_path();
        let disk = match list.iter().find(|d| d.mount_point() == wanted) {
            Some(d) => d,
            None => {
                // e.g. "C:\" on Windows or a container without a "/" entry
                let d = list.iter().max_by_key(|d| d.total_space())?;
                debug!(
                    "mount point {} not found, using {}",
                    wanted.display(),
                    d.mount_point().display()
                );
                d
            }
        };
        let total = disk.total_space();
        let free = disk.available_space();
        let used = total.saturating_sub(free);
        Some(DiskUsage {
            total,
            used,
            free,
            percent: percent_of(used, total),
        })
    }
}

fn memory_usage(sys: &System) -> (MemoryUsage, SwapUsage) {
    let total = sys.total_memory();
    let available = sys.available_memory();
    let used = total.saturating_sub(available);
    let swap_total = sys.total_swap();
    let swap_used = sys.used_swap();
    (
        MemoryUsage {
            total,
            used,
            available,
            percent: percent_of(used, total),
        },
        SwapUsage {
            total: swap_total,
            used: swap_used,
            percent: percent_of(swap_used, swap_total),
        },
    )
}

fn load_average() -> LoadAverage {
    let l = System::load_average();
    LoadAverage {
        one: l.one,
        five: l.five,
        fifteen: l.fifteen,
    }
}

fn cpu_frequency(sys: &System) -> Option<CpuFrequency> {
    let current = sys.cpus().first().map(|c| c.frequency()).unwrap_or(0);
    if current == 0 {
        return None;
    }
    Some(CpuFrequency {
        current_mhz: current as f64,
        max_mhz: read_max_frequency_mhz(),
    })
}

#[cfg(target_os = "linux")]
fn read_max_frequency_mhz() -> Option<f64> {
    let s = fs::read_to_string("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq").ok()?;
    let khz: u64 = s.trim().parse().ok()?;
    (khz > 0).then(|| khz as f64 / 1000.0)
}

#[cfg(not(target_os = "linux"))]
fn read_max_frequency_mhz() -> Option<f64> {
    None
}

/// Sum of rx_drop + tx_drop over every interface in a `/proc/net/dev` dump.
pub fn parse_net_dev_drops(contents: &str) -> Option<u64> {
    let mut total: u64 = 0;
    let mut seen = false;
    // two header lines, then "iface: rx_bytes rx_packets rx_errs rx_drop ... tx_bytes tx_packets tx_errs tx_drop ..."
    for line in contents.lines().skip(2) {
        let Some((_, rest)) = line.split_once(':') else {
            continue;
        };
        let fields: Vec<u64> = rest
            .split_whitespace()
            .filter_map(|f| f.parse().ok())
            .collect();
        if fields.len() < 12 {
            continue;
        }
        total = total.saturating_add(fields[3]).saturating_add(fields[11]);
        seen = true;
    }
    seen.then_some(total)
}

#[cfg(target_os = "linux")]
fn read_drops() -> Option<u64> {
    let s = fs::read_to_string("/proc/net/dev").ok()?;
    parse_net_dev_drops(&s)
}

#[cfg(not(target_os = "linux"))]
fn read_drops() -> Option<u64> {
    None
}

impl MetricsProvider for SysinfoProvider {
    fn status(&self) -> Result<StatusSample> {
        let mut sys = self.measured_cpu();
        sys.refresh_memory_specifics(MemoryRefreshKind::everything());
        let (memory, swap) = memory_usage(&sys);
        let disk = self.disk();
        if disk.is_none() {
            warn!("no disks reported, storage section omitted");
        }
        Ok(StatusSample {
            cpu_percent: sys.global_cpu_usage(),
            logical_cores: sys.cpus().len(),
            load_avg: load_average(),
            memory,
            swap,
            disk,
            boot_time: System::boot_time() as i64,
        })
    }

    fn processes(&self) -> Result<Vec<ProcessEntry>> {
        // without tasks, Linux threads are not listed as separate processes
        let kind = ProcessRefreshKind::nothing()
            .with_cpu()
            .with_memory()
            .without_tasks();
        let mut sys = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        // first pass only establishes the CPU-time baseline
        sys.refresh_processes_specifics(ProcessesToUpdate::All, true, kind);
        thread::sleep(
            self.config
                .proc_cpu_delay
                .min(Duration::from_millis(MAX_PROC_CPU_DELAY_MS)),
        );
        // dead processes are dropped here; anything that vanished mid-scan is simply absent
        sys.refresh_processes_specifics(ProcessesToUpdate::All, true, kind);

        let total_mem = sys.total_memory();
        let mut entries: Vec<ProcessEntry> = sys
            .processes()
            .values()
            .filter(|p| p.thread_kind().is_none())
            .map(|p| ProcessEntry {
                pid: p.pid().as_u32(),
                name: p.name().to_string_lossy().into_owned(),
                cpu_percent: p.cpu_usage(),
                memory_percent: percent_of(p.memory(), total_mem),
                resident_bytes: p.memory(),
            })
            .collect();
        // the process table is a hash map; pid order gives a stable provider order
        entries.sort_by_key(|e| e.pid);
        debug!("enumerated {} processes", entries.len());
        Ok(entries)
    }

    fn network(&self) -> Result<NetworkSample> {
        let networks = Networks::new_with_refreshed_list();
        let mut counters = NetworkCounters::default();
        let mut by_name: Vec<_> = networks.list().iter().collect();
        by_name.sort_by(|a, b| a.0.cmp(b.0));

        let mut interfaces = Vec::new();
        for (name, data) in by_name {
            counters.bytes_sent = counters.bytes_sent.saturating_add(data.total_transmitted());
            counters.bytes_recv = counters.bytes_recv.saturating_add(data.total_received());
            counters.packets_sent = counters
                .packets_sent
                .saturating_add(data.total_packets_transmitted());
            counters.packets_recv = counters
                .packets_recv
                .saturating_add(data.total_packets_received());
            counters.errors_in = counters
                .errors_in
                .saturating_add(data.total_errors_on_received());
            counters.errors_out = counters
                .errors_out
                .saturating_add(data.total_errors_on_transmitted());
            interfaces.extend(data.ip_networks().iter().map(|ip| InterfaceAddress {
                interface: name.clone(),
                addr: ip.addr,
            }));
        }
        counters.drops = read_drops();
        Ok(NetworkSample {
            counters,
            interfaces,
        })
    }

    fn cpu(&self) -> Result<CpuSample> {
        let sys = self.measured_cpu();
        Ok(CpuSample {
            per_core_percents: sys.cpus().iter().map(|c| c.cpu_usage()).collect(),
            physical_cores: System::physical_core_count(),
            logical_cores: sys.cpus().len(),
            frequency: cpu_frequency(&sys),
            load_avg: load_average(),
        })
    }

    fn usage(&self) -> Result<UsageSample> {
        let mut sys = self.measured_cpu();
        sys.refresh_memory_specifics(MemoryRefreshKind::everything());
        let (memory, swap) = memory_usage(&sys);
        Ok(UsageSample {
            cpu: sys.global_cpu_usage(),
            memory: memory.percent,
            disk: self.disk().map(|d| d.percent).unwrap_or(0.0),
            swap: swap.percent,
        })
    }
}
