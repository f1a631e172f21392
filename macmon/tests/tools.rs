//! Tool table and dispatch, driven by a canned provider.
use anyhow::{anyhow, Result};
use macmon::report::{SortKey, NO_ALERTS};
use macmon::sampler::MetricsProvider;
use macmon::server::tool_listing;
use macmon::tools::{dispatch, resolve, Tool, ToolCall, ToolError, TopProcessesArgs};
use macmon::types::{
    CpuSample, LoadAverage, MemoryUsage, NetworkCounters, NetworkSample, ProcessEntry,
    StatusSample, SwapUsage, UsageSample,
};
use serde_json::{json, Map, Value};

struct Canned {
    usage: UsageSample,
    fail_network: bool,
}

impl Canned {
    fn calm() -> Self {
        Self {
            usage: UsageSample {
                cpu: 10.0,
                memory: 20.0,
                disk: 30.0,
                swap: 0.0,
            },
            fail_network: false,
        }
    }
}

fn load() -> LoadAverage {
    LoadAverage {
        one: 0.1,
        five: 0.2,
        fifteen: 0.3,
    }
}

impl MetricsProvider for Canned {
    fn status(&self) -> Result<StatusSample> {
        Ok(StatusSample {
            cpu_percent: self.usage.cpu,
            logical_cores: 4,
            load_avg: load(),
            memory: MemoryUsage {
                total: 1024,
                used: 512,
                available: 512,
                percent: 50.0,
            },
            swap: SwapUsage {
                total: 0,
                used: 0,
                percent: 0.0,
            },
            disk: None,
            boot_time: 0,
        })
    }

    fn processes(&self) -> Result<Vec<ProcessEntry>> {
        Ok((1..=15)
            .map(|i| ProcessEntry {
                pid: i,
                name: format!("p{i}"),
                cpu_percent: i as f32,
                memory_percent: (16 - i) as f32,
                resident_bytes: 1024 * 1024,
            })
            .collect())
    }

    fn network(&self) -> Result<NetworkSample> {
        if self.fail_network {
            return Err(anyhow!("network counters unavailable"));
        }
        Ok(NetworkSample {
            counters: NetworkCounters::default(),
            interfaces: vec![],
        })
    }

    fn cpu(&self) -> Result<CpuSample> {
        Ok(CpuSample {
            per_core_percents: vec![1.0, 2.0],
            physical_cores: Some(1),
            logical_cores: 2,
            frequency: None,
            load_avg: load(),
        })
    }

    fn usage(&self) -> Result<UsageSample> {
        Ok(self.usage)
    }
}

fn args(v: Value) -> Option<Map<String, Value>> {
    match v {
        Value::Object(m) => Some(m),
        _ => None,
    }
}

#[test]
fn names_round_trip_through_the_table() {
    let names: Vec<&str> = Tool::ALL.iter().map(|t| t.name()).collect();
    assert_eq!(
        names,
        vec![
            "get_system_status",
            "get_top_processes",
            "get_network_stats",
            "get_cpu_details",
            "check_alerts"
        ]
    );
    for t in Tool::ALL {
        assert_eq!(Tool::from_name(t.name()), Some(t));
    }
    assert_eq!(Tool::from_name("reboot"), None);
}

#[test]
fn top_processes_defaults() {
    assert_eq!(
        resolve("get_top_processes", None).unwrap(),
        ToolCall::TopProcesses(TopProcessesArgs {
            limit: 10,
            sort_by: SortKey::Cpu
        })
    );
    assert_eq!(
        resolve("get_top_processes", args(json!({}))).unwrap(),
        ToolCall::TopProcesses(TopProcessesArgs::default())
    );
    assert_eq!(
        resolve(
            "get_top_processes",
            args(json!({"limit": 3, "sort_by": "memory"}))
        )
        .unwrap(),
        ToolCall::TopProcesses(TopProcessesArgs {
            limit: 3,
            sort_by: SortKey::Memory
        })
    );
}

#[test]
fn bad_arguments_are_rejected() {
    let neg = resolve("get_top_processes", args(json!({"limit": -1})));
    assert!(matches!(
        neg,
        Err(ToolError::InvalidArguments {
            tool: "get_top_processes",
            ..
        })
    ));
    let bad_key = resolve("get_top_processes", args(json!({"sort_by": "disk"})));
    assert!(matches!(bad_key, Err(ToolError::InvalidArguments { .. })));
}

#[test]
fn unknown_tool_is_unsupported() {
    let err = dispatch(&Canned::calm(), "format_disk", None).unwrap_err();
    assert!(matches!(err, ToolError::UnsupportedTool(ref n) if n == "format_disk"));
    assert_eq!(err.to_string(), "Unknown tool: format_disk");
}

#[test]
fn dispatch_renders_each_tool() {
    let p = Canned::calm();
    let status = dispatch(&p, "get_system_status", None).unwrap();
    assert!(status.contains("- Usage: 10.0% (4 cores)"));

    let top = dispatch(&p, "get_top_processes", args(json!({"limit": 2}))).unwrap();
    assert!(top.starts_with("🔝 **Top 2 Processes by CPU**"));
    assert!(top.contains("1. **p15** (PID: 15)"));
    assert!(top.contains("2. **p14** (PID: 14)"));
    assert!(!top.contains("3. "));

    let by_mem = dispatch(
        &p,
        "get_top_processes",
        args(json!({"sort_by": "memory"})),
    )
    .unwrap();
    assert!(by_mem.contains("1. **p1** (PID: 1)"));
    assert!(by_mem.contains("10. **p10** (PID: 10)"));
    assert!(!by_mem.contains("11. "));

    let net = dispatch(&p, "get_network_stats", args(json!({}))).unwrap();
    assert!(net.starts_with("🌐 **Network Statistics**"));

    let cpu = dispatch(&p, "get_cpu_details", None).unwrap();
    assert!(cpu.contains("• Core 1: 2.0%"));
    assert!(!cpu.contains("Frequency"));

    assert_eq!(dispatch(&p, "check_alerts", None).unwrap(), NO_ALERTS);
}

#[test]
fn check_alerts_lists_alerts_in_order() {
    let p = Canned {
        usage: UsageSample {
            cpu: 95.0,
            memory: 97.0,
            disk: 96.0,
            swap: 80.0,
        },
        fail_network: false,
    };
    let text = dispatch(&p, "check_alerts", None).unwrap();
    let lines: Vec<&str> = text.lines().skip(2).filter(|l| !l.is_empty()).collect();
    assert_eq!(
        lines,
        vec![
            "🔴 **CPU**: CPU usage is 95.0%",
            "🔴 **Memory**: Memory usage is 97.0%",
            "🔴 **Disk**: Disk usage is 96.0%",
            "🟡 **Swap**: Swap usage is 80.0%",
        ]
    );
}

#[test]
fn provider_failure_surfaces_as_error() {
    let p = Canned {
        fail_network: true,
        ..Canned::calm()
    };
    let err = dispatch(&p, "get_network_stats", None).unwrap_err();
    assert!(matches!(err, ToolError::Provider(_)));
    assert!(err.to_string().contains("network counters unavailable"));
}

#[test]
fn listing_advertises_schemas() {
    let tools = tool_listing();
    assert_eq!(tools.len(), 5);
    let top = tools
        .iter()
        .find(|t| t.name == "get_top_processes")
        .expect("listed");
    let props = top.input_schema.get("properties").expect("properties");
    assert!(props.get("limit").is_some());
    assert!(props.get("sort_by").is_some());
    for t in &tools {
        assert_eq!(t.input_schema.get("type"), Some(&json!("object")));
    }
}
