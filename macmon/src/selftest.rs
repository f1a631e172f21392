//! `--test` mode: run every tool once and print the output, continuing past failures.

use std::io::{self, Write};

use crate::alerts::evaluate_alerts;
use crate::report::SortKey;
use crate::sampler::MetricsProvider;
use crate::tools::{self, ToolCall, TopProcessesArgs};

struct Check {
    title: &'static str,
    call: ToolCall,
    failure: &'static str,
}

const CHECKS: [Check; 4] = [
    Check {
        title: "1. System Status:",
        call: ToolCall::SystemStatus,
        failure: "Error getting system status",
    },
    Check {
        title: "2. Top 5 Processes:",
        call: ToolCall::TopProcesses(TopProcessesArgs {
            limit: 5,
            sort_by: SortKey::Cpu,
        }),
        failure: "Error getting processes",
    },
    Check {
        title: "3. Network Stats:",
        call: ToolCall::NetworkStats,
        failure: "Error getting network stats",
    },
    Check {
        title: "4. CPU Details:",
        call: ToolCall::CpuDetails,
        failure: "Error getting CPU details",
    },
];

/// Writes the whole run to `out`; only I/O errors on `out` itself are returned.
pub fn run_self_test<P, W>(provider: &P, out: &mut W) -> io::Result<()>
where
    P: MetricsProvider + ?Sized,
    W: Write,
{
    writeln!(out, "🧪 MacMon Test Mode\n")?;
    for (i, check) in CHECKS.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", check.title)?;
        match tools::run(provider, check.call) {
            Ok(text) => writeln!(out, "{text}")?,
            Err(e) => writeln!(out, "{}: {e}", check.failure)?,
        }
    }

    writeln!(out, "\n5. Checking Alerts:")?;
    match provider.usage() {
        Ok(usage) => {
            let alerts = evaluate_alerts(&usage);
            if alerts.is_empty() {
                writeln!(out, "No alerts")?;
            }
            for a in &alerts {
                writeln!(out, "- {}: {}", a.domain.label(), a.message)?;
            }
        }
        Err(e) => writeln!(out, "Error checking alerts: {e}")?,
    }
    writeln!(out, "\n✅ MacMon testing complete!")?;
    out.flush()
}
