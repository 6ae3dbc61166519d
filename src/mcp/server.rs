use colored::*;
use jsonschema::JSONSchema;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::types::{
    InitializeResult, McpTool, McpToolResult, ServerCapabilities, ServerInfo, ToolListResponse,
    ToolsCapability,
};
use crate::api::DocsApi;
use crate::error::Result;
use crate::session::ConversationStore;
use crate::tools::{tool_specs, DocTools, ToolSpec};

const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "docask";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stdio JSON-RPC server exposing the four documentation tools to an MCP
/// host. One request per line in, one response per line out; tool failures
/// become error results, never a dead process.
pub struct McpServer<C: DocsApi, S: ConversationStore> {
    tools: DocTools<C, S>,
    specs: Vec<ToolSpec>,
    verbose: bool,
}

impl<C: DocsApi, S: ConversationStore> McpServer<C, S> {
    pub fn new(tools: DocTools<C, S>, verbose: bool) -> Self {
        Self {
            tools,
            specs: tool_specs(),
            verbose,
        }
    }

    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let request: Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(e) => {
                    if self.verbose {
                        eprintln!("{}", format!("[docask] bad request line: {}", e).dimmed());
                    }
                    continue;
                }
            };

            // Requests without an id are notifications; nothing to answer.
            let Some(id) = request.get("id").cloned() else {
                continue;
            };

            let method = request
                .get("method")
                .and_then(|m| m.as_str())
                .unwrap_or_default()
                .to_string();
            let params = request.get("params").cloned().unwrap_or(json!({}));

            let response = match method.as_str() {
                "initialize" => Self::rpc_result(&id, self.initialize()),
                "tools/list" => Self::rpc_result(&id, self.list_tools()),
                "tools/call" => Self::rpc_result(&id, self.call_tool(&params).await),
                "ping" => json!({ "jsonrpc": "2.0", "id": id, "result": {} }),
                other => json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": { "code": -32601, "message": format!("Method not found: {}", other) }
                }),
            };

            let mut out = serde_json::to_vec(&response)?;
            out.push(b'\n');
            writer.write_all(&out).await?;
            writer.flush().await?;
        }

        Ok(())
    }

    fn rpc_result<T: serde::Serialize>(id: &Value, result: T) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": serde_json::to_value(result).unwrap_or(Value::Null),
        })
    }

    fn initialize(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: None }),
            },
        }
    }

    fn list_tools(&self) -> ToolListResponse {
        ToolListResponse {
            tools: self
                .specs
                .iter()
                .map(|spec| McpTool {
                    name: spec.name.to_string(),
                    description: Some(spec.description.to_string()),
                    input_schema: spec.input_schema.clone(),
                })
                .collect(),
        }
    }

    async fn call_tool(&self, params: &Value) -> McpToolResult {
        let name = params
            .get("name")
            .and_then(|n| n.as_str())
            .unwrap_or_default();
        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        let Some(spec) = self.specs.iter().find(|spec| spec.name == name) else {
            return McpToolResult::text(format!("Unknown tool '{}'", name), true);
        };

        if let Err(message) = validate_arguments(spec, &arguments) {
            return McpToolResult::text(
                format!("Tool '{}' argument validation failed: {}", name, message),
                true,
            );
        }

        let result = self.tools.call(name, &arguments).await;
        let is_error = result.get("error").is_some();
        McpToolResult::text(result.to_string(), is_error)
    }
}

fn validate_arguments(spec: &ToolSpec, arguments: &Value) -> std::result::Result<(), String> {
    let schema = match JSONSchema::compile(&spec.input_schema) {
        Ok(s) => s,
        Err(e) => return Err(format!("Invalid tool schema: {}", e)),
    };

    if let Err(errors) = schema.validate(arguments) {
        let messages: Vec<String> = errors
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect();
        return Err(messages.join("; "));
    }

    Ok(())
}
