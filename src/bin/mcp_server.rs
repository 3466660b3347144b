//! Pokédex Viewer MCP Server
//!
//! A Model Context Protocol server using the official Rust SDK (rmcp) that
//! exposes the info and evolution views as tools over stdio.

use std::sync::Arc;

use pokedex_viewer::mcp_interface::*;
use pokedex_viewer::{init_logging, ApiClient, ApiConfig, PokeApi, PokedexSession};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tracing::info;

#[derive(Debug, Clone)]
pub struct PokedexService {
    tool_router: ToolRouter<PokedexService>,
    session: Arc<PokedexSession<ApiClient>>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    #[schemars(description = "Name of the Pokémon to look up, e.g. 'pikachu'")]
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CurrentViewRequest {
    #[schemars(description = "Which view to show: 'info' or 'evolution'")]
    pub view: String,
}

#[tool_router]
impl PokedexService {
    pub fn new(session: PokedexSession<ApiClient>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            session: Arc::new(session),
        }
    }

    #[tool(description = "Show a Pokémon's types, abilities, height, weight and base stats")]
    async fn search_pokemon(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = handle_search_pokemon(&self.session, &request.name).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Show the evolution chain of a Pokémon species and how each stage is reached")]
    async fn search_evolution(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = handle_search_evolution(&self.session, &request.name).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Show the current state of the info or evolution view without searching")]
    async fn current_view(
        &self,
        Parameters(request): Parameters<CurrentViewRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = handle_current_view(&self.session, &request.view);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for PokedexService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = ApiConfig::from_env();
    info!(base_url = config.base_url(), "Pokédex MCP server starting");

    let session = PokedexSession::new(PokeApi::new(ApiClient::new()?, config));
    let service = PokedexService::new(session);
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    info!("server running, waiting for shutdown");

    let quit_reason = server.waiting().await?;
    info!(?quit_reason, "Pokédex MCP server exiting");
    Ok(())
}
