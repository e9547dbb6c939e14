//! MCP server over stdin/stdout.
//!
//! Requests arrive line-delimited on stdin; responses leave line-delimited on
//! stdout. Logging goes to stderr so it never corrupts the protocol stream.
//! Each request is processed to completion before the next line is read, so
//! tool invocations never run concurrently against the signing identity.

use anyhow::Result;
use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt};
use tracing::{debug, error, info};

use crate::mcp::protocol::{error_codes, Request, Response};
use crate::tools::dispatch::Dispatcher;

pub struct McpServer {
    dispatcher: Dispatcher,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Routes one request. Returns `None` for notifications.
    pub async fn handle_request(&self, req: Request) -> Option<Response> {
        debug!(method = %req.method, "handling request");

        if req.is_notification() {
            return None;
        }

        let response = match req.method.as_str() {
            "initialize" => self.handle_initialize(&req),
            "tools/list" => self.handle_tools_list(&req),
            "tools/call" => self.handle_tool_call(req).await,
            _ => Response::error(
                req.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", req.method),
            ),
        };

        Some(response)
    }

    fn handle_initialize(&self, req: &Request) -> Response {
        Response::success(
            req.id.clone(),
            json!({
                "serverInfo": {
                    "name": "monad-mcp",
                    "version": env!("CARGO_PKG_VERSION"),
                },
                "protocolVersion": "2025-06-18",
                "capabilities": { "tools": { "listChanged": false } },
                "instructions": "Monad bridge MCP server: wallet address and balance lookups \
                                 plus Sepolia wMON <-> Monad MON bridging over Wormhole.",
            }),
        )
    }

    /// The capability listing is derived from the registry, so it always
    /// equals the set of registered tools.
    fn handle_tools_list(&self, req: &Request) -> Response {
        Response::success(req.id.clone(), json!({ "tools": self.dispatcher.list_tools() }))
    }

    /// Unwraps `tools/call` params and dispatches. Malformed params are
    /// protocol errors; everything past that point is delivered in-band.
    async fn handle_tool_call(&self, req: Request) -> Response {
        let params = match req.params.as_ref() {
            Some(p) => p,
            None => {
                return Response::error(
                    req.id,
                    error_codes::INVALID_PARAMS,
                    "Missing 'params' object".into(),
                )
            }
        };

        let tool_name = match params.get("name").and_then(|n| n.as_str()) {
            Some(name) => name.to_string(),
            None => {
                return Response::error(
                    req.id,
                    error_codes::INVALID_PARAMS,
                    "Missing 'name' field in params".into(),
                )
            }
        };

        let empty_args = json!({});
        let args = params.get("arguments").unwrap_or(&empty_args);

        let result = self.dispatcher.dispatch(&tool_name, args).await;
        match serde_json::to_value(&result) {
            Ok(value) => Response::success(req.id, value),
            Err(e) => Response::error(
                req.id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to serialize tool result: {e}"),
            ),
        }
    }

    /// Reads requests from stdin until EOF.
    pub async fn serve_stdio(&self) -> Result<()> {
        info!("🚀 MCP server running on stdin/stdout");

        let mut stdin = io::BufReader::new(io::stdin());
        let mut stdout = io::stdout();

        loop {
            let mut line = String::new();
            match stdin.read_line(&mut line).await {
                Ok(0) => {
                    info!("EOF received, shutting down MCP server");
                    break;
                }
                Ok(_) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    debug!("received: {line}");

                    let response = match serde_json::from_str::<Request>(line) {
                        Ok(request) => self.handle_request(request).await,
                        Err(parse_error) => {
                            error!("JSON parse error: {parse_error}");
                            Some(Response::error(
                                Value::Null,
                                error_codes::PARSE_ERROR,
                                format!("Parse error: {parse_error}"),
                            ))
                        }
                    };

                    if let Some(response) = response {
                        let response_json = serde_json::to_string(&response)?;
                        debug!("sending: {response_json}");
                        stdout
                            .write_all(format!("{response_json}\n").as_bytes())
                            .await?;
                        stdout.flush().await?;
                    }
                }
                Err(e) => {
                    error!("failed to read from stdin: {e}");
                    break;
                }
            }
        }

        info!("MCP server shutting down");
        Ok(())
    }
}
