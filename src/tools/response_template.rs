//! Knowledge-base template lookup tool.

use super::traits::{Tool, ToolResult};
use crate::knowledge::KnowledgeBase;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Fetch the canned response template for a query category. Unknown
/// categories silently resolve to the `default` entry.
pub struct ResponseTemplateTool {
    knowledge: Arc<KnowledgeBase>,
}

impl ResponseTemplateTool {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }
}

#[async_trait]
impl Tool for ResponseTemplateTool {
    fn name(&self) -> &str {
        "get_response_template"
    }

    fn description(&self) -> &str {
        "Gets the response template for a given query type from the knowledge base."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query_type": {
                    "type": "string",
                    "description": "The type of query (greeting, weather, help, or default)"
                }
            },
            "required": ["query_type"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let query_type = args
            .get("query_type")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Missing 'query_type' parameter"))?;

        let template = self.knowledge.lookup(query_type);
        tracing::debug!(template, "Using knowledge base response");
        Ok(ToolResult::ok(template))
    }
}
