use axum::Json;
use serde::Serialize;

use crate::tools::prompts::CATALOG_VERSION;
use crate::tools::{ToolInfo, ToolKind};

#[derive(Debug, Serialize)]
pub struct ToolCatalog {
    pub version: &'static str,
    pub tools: Vec<ToolInfo>,
}

/// GET /api/v1/tools
pub async fn handle_list_tools() -> Json<ToolCatalog> {
    Json(ToolCatalog {
        version: CATALOG_VERSION,
        tools: ToolKind::ALL.into_iter().map(ToolInfo::from).collect(),
    })
}
