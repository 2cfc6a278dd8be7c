//! Query classification tool, delegated to a secondary model invocation.

use super::traits::{Tool, ToolResult};
use crate::knowledge::{Category, KnowledgeBase};
use crate::providers::Provider;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

const CLASSIFIER_INSTRUCTIONS: &str = "You are a query classification assistant. \
Your task is to analyze the user's query and classify it into the most appropriate category.

You will be given:
1. The user's query
2. A list of available categories with descriptions

Respond ONLY with the category name that best matches the query. \
Do not include any explanations or additional text in your response.";

/// Classify a free-text query into one of the knowledge-base categories by
/// delegating to a classifier model. Output outside the closed set is coerced
/// to `default`.
pub struct ClassifyQueryTool {
    classifier: Arc<dyn Provider>,
    knowledge: Arc<KnowledgeBase>,
    model: String,
    temperature: f64,
}

impl ClassifyQueryTool {
    pub fn new(
        classifier: Arc<dyn Provider>,
        knowledge: Arc<KnowledgeBase>,
        model: &str,
        temperature: f64,
    ) -> Self {
        Self {
            classifier,
            knowledge,
            model: model.to_string(),
            temperature,
        }
    }

    fn classification_prompt(&self, query: &str) -> String {
        format!(
            "User query: \"{query}\"\n\n\
             Available categories:\n{}\n\n\
             Classify this query into exactly one of the above categories. \
             Respond with ONLY the category name.",
            self.knowledge.category_lines()
        )
    }

    /// Validate raw classifier output against the closed category set.
    fn coerce(raw: &str) -> Category {
        match Category::parse(raw) {
            Some(category) => {
                tracing::debug!(category = %category, "Query classified");
                category
            }
            None => {
                tracing::debug!(
                    raw = raw.trim(),
                    "Invalid classification, falling back to 'default'"
                );
                Category::Default
            }
        }
    }
}

#[async_trait]
impl Tool for ClassifyQueryTool {
    fn name(&self) -> &str {
        "classify_query"
    }

    fn description(&self) -> &str {
        "Classifies a user query into one of the predefined categories: greeting, weather, help, or default."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The user's input query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' parameter"))?;

        let prompt = self.classification_prompt(query);

        match self
            .classifier
            .chat_with_system(
                Some(CLASSIFIER_INSTRUCTIONS),
                &prompt,
                &self.model,
                self.temperature,
            )
            .await
        {
            Ok(raw) => Ok(ToolResult::ok(Self::coerce(&raw).as_str())),
            Err(e) => Ok(ToolResult::err(format!("Classifier unavailable: {e}"))),
        }
    }
}
