//! Static knowledge base of canned response templates.
//!
//! The category set is closed and known at process start. The base is built
//! once by [`KnowledgeBase::builtin`] and shared read-only for the process
//! lifetime; lookups never fail — unrecognized categories fall back to the
//! [`Category::Default`] entry.

use std::collections::HashMap;
use std::fmt::Write;

/// One of the fixed classification tags the assistant recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Greeting,
    Weather,
    Help,
    Default,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::Greeting,
        Category::Weather,
        Category::Help,
        Category::Default,
    ];

    /// Canonical tag string used in prompts and tool arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Greeting => "greeting",
            Category::Weather => "weather",
            Category::Help => "help",
            Category::Default => "default",
        }
    }

    /// Parse a tag against the closed set. Trims whitespace and ignores
    /// letter case; anything outside the set is `None`.
    pub fn parse(input: &str) -> Option<Category> {
        match input.trim().to_lowercase().as_str() {
            "greeting" => Some(Category::Greeting),
            "weather" => Some(Category::Weather),
            "help" => Some(Category::Help),
            "default" => Some(Category::Default),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable category → response template mapping.
pub struct KnowledgeBase {
    entries: HashMap<Category, String>,
}

impl KnowledgeBase {
    /// Build the fixed knowledge base shipped with the assistant.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            Category::Greeting,
            "Hello! I'm an advanced OpenAI agent. How can I help you today?".to_string(),
        );
        entries.insert(
            Category::Weather,
            "I don't have real-time weather data, but I can help you find weather information."
                .to_string(),
        );
        entries.insert(
            Category::Help,
            "I can help with greetings, weather queries, and general information. Just ask!"
                .to_string(),
        );
        entries.insert(
            Category::Default,
            "I'm not sure how to respond to that. Try asking about weather, or say hello!"
                .to_string(),
        );
        Self { entries }
    }

    /// Template for a recognized category.
    pub fn template(&self, category: Category) -> &str {
        self.entries
            .get(&category)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Look up the template for a category tag, falling back to the default
    /// entry for anything outside the closed set. Never errors.
    pub fn lookup(&self, category: &str) -> &str {
        match Category::parse(category) {
            Some(cat) => self.template(cat),
            None => {
                tracing::debug!(
                    requested = category,
                    "Unknown category, falling back to 'default'"
                );
                self.template(Category::Default)
            }
        }
    }

    /// Number of entries in the base.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render `- category: template` lines for classifier prompts.
    pub fn category_lines(&self) -> String {
        let mut lines = String::new();
        for category in Category::ALL {
            let _ = writeln!(lines, "- {}: {}", category, self.template(category));
        }
        lines.trim_end().to_string()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}
