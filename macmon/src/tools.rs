//! The fixed tool table: name -> handler variant, each with its own argument schema.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::alerts::evaluate_alerts;
use crate::report::{
    build_alert_summary, build_cpu_report, build_network_report, build_process_report,
    build_status_report, SortKey,
};
use crate::sampler::MetricsProvider;

pub const DEFAULT_PROCESS_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnsupportedTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to sample system metrics: {0}")]
    Provider(#[from] anyhow::Error),

    #[error("Tool task failed: {0}")]
    Join(String),
}

/// Arguments of the tools that take none. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoArgs {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct TopProcessesArgs {
    /// Number of processes to show (default: 10)
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Sort by 'cpu' or 'memory' (default: 'cpu')
    #[serde(default)]
    pub sort_by: SortKey,
}

fn default_limit() -> usize {
    DEFAULT_PROCESS_LIMIT
}

impl Default for TopProcessesArgs {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PROCESS_LIMIT,
            sort_by: SortKey::Cpu,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    SystemStatus,
    TopProcesses,
    NetworkStats,
    CpuDetails,
    CheckAlerts,
}

/// A decoded request, ready to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCall {
    SystemStatus,
    TopProcesses(TopProcessesArgs),
    NetworkStats,
    CpuDetails,
    CheckAlerts,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::SystemStatus,
        Tool::TopProcesses,
        Tool::NetworkStats,
        Tool::CpuDetails,
        Tool::CheckAlerts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::SystemStatus => "get_system_status",
            Tool::TopProcesses => "get_top_processes",
            Tool::NetworkStats => "get_network_stats",
            Tool::CpuDetails => "get_cpu_details",
            Tool::CheckAlerts => "check_alerts",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::SystemStatus => {
                "Get current system status including CPU, memory, and disk usage"
            }
            Tool::TopProcesses => "Get the top processes by CPU or memory usage",
            Tool::NetworkStats => {
                "Get network statistics including data transfer and active interfaces"
            }
            Tool::CpuDetails => {
                "Get detailed CPU information including per-core usage and frequency"
            }
            Tool::CheckAlerts => {
                "Check system metrics and report any alerts for high resource usage"
            }
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|t| t.name() == name)
    }

    /// JSON schema of the tool's arguments, as an object map for the tool listing.
    pub fn input_schema(self) -> Map<String, Value> {
        let schema = match self {
            Tool::TopProcesses => schemars::schema_for!(TopProcessesArgs),
            _ => schemars::schema_for!(NoArgs),
        };
        match serde_json::to_value(schema) {
            Ok(Value::Object(mut obj)) => {
                obj.entry("type").or_insert_with(|| Value::from("object"));
                obj.entry("properties")
                    .or_insert_with(|| Value::Object(Map::new()));
                obj
            }
            _ => {
                let mut obj = Map::new();
                obj.insert("type".into(), Value::from("object"));
                obj.insert("properties".into(), Value::Object(Map::new()));
                obj
            }
        }
    }

    /// Decode the raw argument object; a missing object means "all defaults".
    pub fn decode(self, args: Option<Map<String, Value>>) -> Result<ToolCall, ToolError> {
        Ok(match self {
            Tool::SystemStatus => {
                decode_args::<NoArgs>(self, args)?;
                ToolCall::SystemStatus
            }
            Tool::TopProcesses => ToolCall::TopProcesses(decode_args(self, args)?),
            Tool::NetworkStats => {
                decode_args::<NoArgs>(self, args)?;
                ToolCall::NetworkStats
            }
            Tool::CpuDetails => {
                decode_args::<NoArgs>(self, args)?;
                ToolCall::CpuDetails
            }
            Tool::CheckAlerts => {
                decode_args::<NoArgs>(self, args)?;
                ToolCall::CheckAlerts
            }
        })
    }
}

fn decode_args<T: DeserializeOwned + Default>(
    tool: Tool,
    args: Option<Map<String, Value>>,
) -> Result<T, ToolError> {
    match args {
        None => Ok(T::default()),
        Some(map) => serde_json::from_value(Value::Object(map)).map_err(|source| {
            ToolError::InvalidArguments {
                tool: tool.name(),
                source,
            }
        }),
    }
}

/// Look up `name` and decode its arguments.
pub fn resolve(name: &str, args: Option<Map<String, Value>>) -> Result<ToolCall, ToolError> {
    let tool = Tool::from_name(name).ok_or_else(|| ToolError::UnsupportedTool(name.to_string()))?;
    tool.decode(args)
}

/// Sample through `provider` and render the report text for `call`.
pub fn run<P: MetricsProvider + ?Sized>(provider: &P, call: ToolCall) -> Result<String, ToolError> {
    let text = match call {
        ToolCall::SystemStatus => build_status_report(&provider.status()?, chrono::Utc::now()),
        ToolCall::TopProcesses(args) => {
            build_process_report(&provider.processes()?, args.limit, args.sort_by)
        }
        ToolCall::NetworkStats => {
            let net = provider.network()?;
            build_network_report(&net.counters, &net.interfaces)
        }
        ToolCall::CpuDetails => {
            let cpu = provider.cpu()?;
            build_cpu_report(
                &cpu.per_core_percents,
                cpu.physical_cores,
                cpu.logical_cores,
                cpu.frequency.as_ref(),
                &cpu.load_avg,
            )
        }
        ToolCall::CheckAlerts => build_alert_summary(&evaluate_alerts(&provider.usage()?)),
    };
    Ok(text)
}

/// `resolve` + `run` in one step.
pub fn dispatch<P: MetricsProvider + ?Sized>(
    provider: &P,
    name: &str,
    args: Option<Map<String, Value>>,
) -> Result<String, ToolError> {
    run(provider, resolve(name, args)?)
}
