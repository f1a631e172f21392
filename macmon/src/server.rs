//! MCP server over stdio: advertises the tool table and runs calls on the blocking pool.

use anyhow::Result;
use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool as McpTool,
    },
    service::RequestContext,
    transport::stdio,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::sampler::MetricsProvider;
use crate::tools::{self, Tool, ToolError};

pub const SERVER_NAME: &str = "macmon";

#[derive(Clone)]
pub struct MacmonServer {
    provider: Arc<dyn MetricsProvider>,
}

impl MacmonServer {
    pub fn new(provider: Arc<dyn MetricsProvider>) -> Self {
        Self { provider }
    }

    /// Serve until the client closes stdin.
    pub async fn serve_stdio(self) -> Result<()> {
        info!(
            "Starting {SERVER_NAME} MCP server v{}",
            env!("CARGO_PKG_VERSION")
        );
        let service = self.serve(stdio()).await.inspect_err(|e| {
            error!("serving error: {e:?}");
        })?;
        service.waiting().await?;
        info!("{SERVER_NAME} server stopped");
        Ok(())
    }

    /// Decode, sample and render one call. Sampling blocks, so it runs off the reactor.
    pub async fn handle_call(
        &self,
        name: &str,
        args: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Result<String, ToolError> {
        let call = tools::resolve(name, args)?;
        let provider = Arc::clone(&self.provider);
        tokio::task::spawn_blocking(move || tools::run(provider.as_ref(), call))
            .await
            .map_err(|e| ToolError::Join(e.to_string()))?
    }
}

pub fn tool_listing() -> Vec<McpTool> {
    Tool::ALL
        .into_iter()
        .map(|t| McpTool::new(t.name(), t.description(), Arc::new(t.input_schema())))
        .collect()
}

fn to_mcp_error(err: ToolError) -> McpError {
    match err {
        ToolError::UnsupportedTool(_) | ToolError::InvalidArguments { .. } => {
            McpError::invalid_params(err.to_string(), None)
        }
        ToolError::Provider(_) | ToolError::Join(_) => {
            McpError::internal_error(err.to_string(), None)
        }
    }
}

impl ServerHandler for MacmonServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "System monitoring tools: get_system_status, get_top_processes, \
                 get_network_stats, get_cpu_details and check_alerts. Every tool returns \
                 a formatted text report."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(tool_listing()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!("tool call '{}'", request.name);
        match self.handle_call(&request.name, request.arguments).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => {
                warn!("tool '{}' failed: {e}", request.name);
                Err(to_mcp_error(e))
            }
        }
    }
}
