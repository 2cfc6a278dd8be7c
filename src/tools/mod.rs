//! Tool subsystem for agent-callable capabilities.
//!
//! This module implements the tool execution surface exposed to the LLM during
//! agentic loops. Each tool implements the [`Tool`] trait defined in [`traits`],
//! which requires a name, description, JSON parameter schema, and an async
//! `execute` method returning a structured [`ToolResult`].
//!
//! Tools are assembled into a registry by [`default_tools`] (query
//! classification and knowledge-base template lookup). The classifier's
//! delegated model call is injected via [`Provider`] at construction time.

pub mod classify_query;
pub mod response_template;
pub mod traits;

pub use classify_query::ClassifyQueryTool;
pub use response_template::ResponseTemplateTool;
pub use traits::Tool;
#[allow(unused_imports)]
pub use traits::{ToolResult, ToolSpec};

use crate::knowledge::KnowledgeBase;
use crate::providers::Provider;
use std::sync::Arc;

/// Create the default tool registry (classification + template lookup).
pub fn default_tools(
    classifier: Arc<dyn Provider>,
    knowledge: Arc<KnowledgeBase>,
    model: &str,
    temperature: f64,
) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(ClassifyQueryTool::new(
            classifier,
            knowledge.clone(),
            model,
            temperature,
        )),
        Box::new(ResponseTemplateTool::new(knowledge)),
    ]
}

/// Find a tool by name in a registry.
pub fn find_tool<'a>(tools: &'a [Box<dyn Tool>], name: &str) -> Option<&'a dyn Tool> {
    tools
        .iter()
        .find(|tool| tool.name() == name)
        .map(|tool| tool.as_ref())
}
