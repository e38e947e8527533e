//! MCP server exposing the memory bank to agents.

mod types;

pub use types::*;

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};

use crate::models::*;
use crate::store::{DocumentStore, StoreError};

#[derive(Clone)]
pub struct McpServer {
    store: DocumentStore,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            tool_router: Self::tool_router(),
        }
    }

    fn store_err(e: StoreError) -> McpError {
        match e {
            StoreError::Validation(msg) => McpError::invalid_params(msg, None),
            e => McpError::internal_error(e.to_string(), None),
        }
    }

    fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
        serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    fn list_or_read_inner(
        &self,
        file_names: Option<Vec<String>>,
    ) -> Result<ListOrReadResponse, McpError> {
        let names = file_names.unwrap_or_default();
        let files = self.store.read_documents(&names).map_err(Self::store_err)?;
        Ok(ListOrReadResponse { files })
    }

    fn append_inner(&self, req: AppendRequest) -> AppendResponse {
        let target = AppendTarget {
            file_name: Some(req.file_name),
            entry: Some(req.entry),
            section_header: req.section_header,
        };
        self.store.append_target(&target).into()
    }

    fn append_many_inner(&self, entries: Vec<AppendTargetInput>) -> AppendManyResponse {
        let targets: Vec<AppendTarget> = entries.into_iter().map(Into::into).collect();
        AppendManyResponse {
            results: self.store.append_many(&targets),
        }
    }

    // ============================================================
    // Test helpers - expose tool logic for testing
    // ============================================================

    pub fn test_list_or_read(
        &self,
        file_names: Option<Vec<String>>,
    ) -> Result<ListOrReadResponse, McpError> {
        self.list_or_read_inner(file_names)
    }

    pub fn test_append(
        &self,
        file_name: &str,
        entry: &str,
        section_header: Option<&str>,
    ) -> AppendResponse {
        self.append_inner(AppendRequest {
            file_name: file_name.to_string(),
            entry: entry.to_string(),
            section_header: section_header.map(|s| s.to_string()),
        })
    }

    pub fn test_append_many(&self, entries: Vec<AppendTargetInput>) -> AppendManyResponse {
        self.append_many_inner(entries)
    }
}

#[tool_router]
impl McpServer {
    #[tool(
        description = "List or read memory bank documents. Without file_names (or with an empty list), returns {files: [names]} for every document in the memory bank. With file_names, returns {files: {name: content}}; documents that do not exist come back as null instead of failing the call. Creates the memory bank with its bootstrap documents on first use."
    )]
    async fn list_or_read(
        &self,
        params: Parameters<ListOrReadRequest>,
    ) -> Result<CallToolResult, McpError> {
        let response = self.list_or_read_inner(params.0.file_names)?;
        let json = Self::to_json(&response)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(
        description = "Append a timestamped entry ('[YYYY-MM-DD HH:MM:SS] - entry') to a memory bank document. With section_header (e.g. '## Decision'), the entry is inserted at the end of that section, before the next '##' header; if the header is missing it is appended to the document together with the entry. Without section_header the entry goes to the end of the document. Returns {status, message}."
    )]
    async fn append(&self, params: Parameters<AppendRequest>) -> Result<CallToolResult, McpError> {
        let response = self.append_inner(params.0);
        let json = Self::to_json(&response)?;

        match response.status {
            AppendStatus::Success => Ok(CallToolResult::success(vec![Content::text(json)])),
            AppendStatus::Error => Ok(CallToolResult::error(vec![Content::text(json)])),
        }
    }

    #[tool(
        description = "Append several entries in one call. Each entry has file_name, entry and an optional section_header, with the same placement rules as append. Targets are processed independently: one failing target does not stop the others. Returns {results: [{file, status, message}]} in input order."
    )]
    async fn append_many(
        &self,
        params: Parameters<AppendManyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let response = self.append_many_inner(params.0.entries);
        let json = Self::to_json(&response)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "memory-bank".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            instructions: Some(
                r#"The memory bank keeps a project's running context as markdown documents.

DOCUMENTS:
- productContext.md: project goal, key features, overall architecture
- activeContext.md: current focus, recent changes, open questions
- progress.md: completed tasks, current tasks, next steps
- decisionLog.md: decisions, rationale, implementation details
- systemPatterns.md: coding, architectural and testing patterns

WORKFLOW:
1. At the start of a session call list_or_read without arguments to see what exists
2. Call list_or_read with file_names to load the documents you need
3. Record progress and decisions with append (or append_many for several at once)

APPENDING:
- Entries are stored as '[YYYY-MM-DD HH:MM:SS] - <entry>'
- Pass section_header (e.g. '## Current Focus') to place the entry at the end of that section
- Header matching is an exact text match; use the header line exactly as it appears
- History is append-only: entries are never edited or removed"#
                    .into(),
            ),
            ..Default::default()
        }
    }
}

pub async fn run_stdio_server(store: DocumentStore) -> anyhow::Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!(
        "Starting MCP server via stdio (memory bank at {})",
        store.root().display()
    );

    let service = McpServer::new(store);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}
