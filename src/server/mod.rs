//! MCP server surface
//!
//! Exposes the lookup pipeline as a single `get-related-address` tool over
//! two transports: stdio (this module) and streamable HTTP ([`http`]).
//! Per-lookup failures are always `isError` tool results; the handler never
//! surfaces them as protocol-level errors.

pub mod http;

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use serde::Deserialize;

use crate::lookup::LookupService;

/// Name of the exposed tool
pub const TOOL_NAME: &str = "get-related-address";

/// Arguments for `get-related-address`
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRelatedAddressRequest {
    /// Platform namespace of the identity
    #[schemars(
        description = "The platform of a specific identity, e.g.: Ethereum, Farcaster, lens, ens"
    )]
    pub platform: String,

    /// Identity to resolve
    #[schemars(description = "User's identity")]
    pub identity: String,
}

/// MCP service wrapping the lookup pipeline
#[derive(Clone)]
pub struct RelateAccountServer {
    service: Arc<LookupService>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RelateAccountServer {
    pub fn new(service: Arc<LookupService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "get-related-address",
        description = "Retrieves all related identities associated with a specific platform identity. This tool helps discover cross-platform connections for the same person or entity. Use cases include: 1) Finding all accounts (Lens, Farcaster, ENS, etc.) belonging to the same person, 2) Resolving domain names to their underlying addresses (ENS domains, Lens handles, etc.)"
    )]
    async fn get_related_address(
        &self,
        Parameters(request): Parameters<GetRelatedAddressRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self
            .service
            .lookup(&request.platform, &request.identity)
            .await)
    }

    /// Serve over stdin/stdout until the client disconnects
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        let running = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        running.waiting().await?;
        Ok(())
    }
}

#[tool_handler]
impl ServerHandler for RelateAccountServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Resolves cross-platform identity graphs via web3.bio. Call get-related-address \
                 with a platform (e.g. ethereum, ens, farcaster) and an identity to discover all \
                 linked accounts and addresses for the same entity."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}
