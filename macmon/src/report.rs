//! Report builders: turn samples into the markdown-ish text returned to the agent.
//! Pure functions only; anything the provider could not read arrives as `None`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::alerts::{Alert, Severity};
use crate::format::{
    boot_instant, format_byte_count, format_local_timestamp, format_uptime, group_thousands,
};
use crate::types::{
    CpuFrequency, DiskUsage, InterfaceAddress, LoadAverage, NetworkCounters, ProcessEntry, StatusSample,
};
use chrono::{DateTime, Utc};

pub const NO_ALERTS: &str = "✅ All systems normal - no alerts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Cpu,
    Memory,
}

impl SortKey {
    pub fn as_upper(self) -> &'static str {
        match self {
            SortKey::Cpu => "CPU",
            SortKey::Memory => "MEMORY",
        }
    }
}

fn join_load(l: &LoadAverage) -> String {
    format!("{:.2}, {:.2}, {:.2}", l.one, l.five, l.fifteen)
}

fn storage_section(disk: Option<&DiskUsage>) -> String {
    match disk {
        Some(d) => format!(
            "**Storage**\n- Disk Usage: {:.1}% used\n- Used: {} / {}\n- Free: {}",
            d.percent,
            format_byte_count(d.used),
            format_byte_count(d.total),
            format_byte_count(d.free),
        ),
        None => "**Storage**\n- Disk Usage: unavailable".to_string(),
    }
}

/// Fixed section order: CPU, Memory, Storage, System.
pub fn build_status_report(s: &StatusSample, now: DateTime<Utc>) -> String {
    let boot = boot_instant(s.boot_time);
    format!(
        "🖥️ **MacMon System Status**

**CPU**
- Usage: {cpu:.1}% ({cores} cores)
- Load Average: {load}

**Memory**
- RAM: {mem_pct:.1}% used ({mem_used} / {mem_total})
- Swap: {swap_pct:.1}% used ({swap_used} / {swap_total})
- Available: {mem_avail}

{storage}

**System**
- Uptime: {uptime}
- Boot Time: {boot_at}",
        cpu = s.cpu_percent,
        cores = s.logical_cores,
        load = join_load(&s.load_avg),
        mem_pct = s.memory.percent,
        mem_used = format_byte_count(s.memory.used),
        mem_total = format_byte_count(s.memory.total),
        swap_pct = s.swap.percent,
        swap_used = format_byte_count(s.swap.used),
        swap_total = format_byte_count(s.swap.total),
        mem_avail = format_byte_count(s.memory.available),
        storage = storage_section(s.disk.as_ref()),
        uptime = format_uptime(boot, now),
        boot_at = format_local_timestamp(boot),
    )
}

/// Numbered top-N list. The sort is stable, so equal values keep provider order.
pub fn build_process_report(processes: &[ProcessEntry], limit: usize, sort_by: SortKey) -> String {
    let mut rows: Vec<&ProcessEntry> = processes.iter().collect();
    let key = |p: &ProcessEntry| match sort_by {
        SortKey::Cpu => p.cpu_percent,
        SortKey::Memory => p.memory_percent,
    };
    rows.sort_by(|a, b| key(*b).total_cmp(&key(*a)));

    let mut out = format!("🔝 **Top {limit} Processes by {}**\n\n", sort_by.as_upper());
    for (i, p) in rows.into_iter().take(limit).enumerate() {
        let mb = p.resident_bytes as f64 / 1024.0 / 1024.0;
        let _ = write!(
            out,
            "{n}. **{name}** (PID: {pid})\n   • CPU: {cpu:.1}%\n   • Memory: {mem:.1}% ({mb:.1} MB)\n\n",
            n = i + 1,
            name = p.name,
            pid = p.pid,
            cpu = p.cpu_percent,
            mem = p.memory_percent,
        );
    }
    out
}

pub fn build_network_report(c: &NetworkCounters, interfaces: &[InterfaceAddress]) -> String {
    let mut out = format!(
        "🌐 **Network Statistics**

**Data Transfer**
- Sent: {}
- Received: {}

**Packets**
- Sent: {}
- Received: {}
- Errors: {}",
        format_byte_count(c.bytes_sent),
        format_byte_count(c.bytes_recv),
        group_thousands(c.packets_sent),
        group_thousands(c.packets_recv),
        group_thousands(c.errors_in.saturating_add(c.errors_out)),
    );
    if let Some(drops) = c.drops {
        let _ = write!(out, "\n- Dropped: {}", group_thousands(drops));
    }

    let active: Vec<String> = interfaces
        .iter()
        .filter(|i| i.addr.is_ipv4())
        .map(|i| format!("• {}: {}", i.interface, i.addr))
        .collect();
    if !active.is_empty() {
        out.push_str("\n\n**Active Interfaces**\n");
        out.push_str(&active.join("\n"));
    }
    out
}

pub fn build_cpu_report(
    per_core_percents: &[f32],
    physical_cores: Option<usize>,
    logical_cores: usize,
    frequency: Option<&CpuFrequency>,
    load_avg: &LoadAverage,
) -> String {
    let physical = physical_cores
        .map(|n| n.to_string())
        .unwrap_or_else(|| "n/a".into());
    let mut out = format!(
        "🔧 **Detailed CPU Information**\n\n**Overall**\n- Physical Cores: {physical}\n- Logical Cores: {logical_cores}\n"
    );

    if let Some(f) = frequency {
        let _ = writeln!(out, "• Current Frequency: {:.2} MHz", f.current_mhz);
        if let Some(max) = f.max_mhz.filter(|m| *m > 0.0) {
            let _ = writeln!(out, "• Max Frequency: {max:.2} MHz");
        }
    }

    out.push_str("\n**Per-Core Usage**\n");
    for (i, pct) in per_core_percents.iter().enumerate() {
        let _ = writeln!(out, "• Core {i}: {pct:.1}%");
    }

    out.push_str("\n**Load Average**\n");
    let _ = writeln!(out, "• 1 min: {:.2}", load_avg.one);
    let _ = writeln!(out, "• 5 min: {:.2}", load_avg.five);
    let _ = write!(out, "• 15 min: {:.2}", load_avg.fifteen);
    out
}

pub fn build_alert_summary(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return NO_ALERTS.to_string();
    }
    let mut out = String::from("⚠️ **System Alerts**\n\n");
    for a in alerts {
        let icon = match a.severity {
            Severity::High => "🔴",
            Severity::Medium => "🟡",
        };
        let _ = writeln!(out, "{icon} **{}**: {}", a.domain.label(), a.message);
    }
    out
}
