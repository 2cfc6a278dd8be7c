//! End-to-end agent loop tests with deterministic provider stand-ins.

use crate::agent::loop_::{is_exit_keyword, process_message};
use crate::agent::prompt;
use crate::config::Config;
use crate::knowledge::{Category, KnowledgeBase};
use crate::providers::{ChatMessage, ChatResponse, Provider, ToolCall};
use crate::tools::{self, Tool, ToolSpec};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Primary-agent stand-in that replays a scripted sequence of responses and
/// counts invocations.
struct ScriptedProvider {
    script: Mutex<VecDeque<ChatResponse>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn new(script: Vec<ChatResponse>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn chat_with_system(
        &self,
        _system_prompt: Option<&str>,
        _message: &str,
        _model: &str,
        _temperature: f64,
    ) -> anyhow::Result<String> {
        anyhow::bail!("scripted provider only supports chat_with_tools")
    }

    async fn chat_with_tools(
        &self,
        _messages: &[ChatMessage],
        _tools: &[ToolSpec],
        _model: &str,
        _temperature: f64,
    ) -> anyhow::Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Classifier stand-in with a fixed single-token answer.
struct FixedClassifier(&'static str);

#[async_trait]
impl Provider for FixedClassifier {
    async fn chat_with_system(
        &self,
        _system_prompt: Option<&str>,
        _message: &str,
        _model: &str,
        _temperature: f64,
    ) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }

    async fn chat_with_tools(
        &self,
        _messages: &[ChatMessage],
        _tools: &[ToolSpec],
        _model: &str,
        _temperature: f64,
    ) -> anyhow::Result<ChatResponse> {
        anyhow::bail!("classifier is one-shot only")
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

fn registry_with_classifier(answer: &'static str) -> Vec<Box<dyn Tool>> {
    tools::default_tools(
        Arc::new(FixedClassifier(answer)),
        Arc::new(KnowledgeBase::builtin()),
        "gpt-4o-mini",
        0.7,
    )
}

fn tool_call(id: &str, name: &str, arguments: &str) -> ToolCall {
    ToolCall {
        id: id.into(),
        name: name.into(),
        arguments: arguments.into(),
    }
}

fn text_response(text: &str) -> ChatResponse {
    ChatResponse {
        text: Some(text.into()),
        tool_calls: vec![],
    }
}

fn tool_call_response(calls: Vec<ToolCall>) -> ChatResponse {
    ChatResponse {
        text: None,
        tool_calls: calls,
    }
}

#[tokio::test]
async fn hello_turn_classifies_then_fetches_template() {
    // Model script: classify, then fetch the template, then compose.
    let provider = ScriptedProvider::new(vec![
        tool_call_response(vec![tool_call(
            "call_1",
            "classify_query",
            r#"{"query":"hello"}"#,
        )]),
        tool_call_response(vec![tool_call(
            "call_2",
            "get_response_template",
            r#"{"query_type":"greeting"}"#,
        )]),
        text_response("Hello! I'm an advanced OpenAI agent. How can I help you today?"),
    ]);

    let tools_registry = registry_with_classifier("greeting");
    let response = process_message(
        &provider,
        &tools_registry,
        &prompt::build_system_prompt(),
        "hello",
        "gpt-4o-mini",
        0.7,
    )
    .await
    .unwrap();

    assert!(response.contains("How can I help you today?"));
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn tool_results_feed_back_into_history() {
    let provider = ScriptedProvider::new(vec![
        tool_call_response(vec![tool_call(
            "call_1",
            "classify_query",
            r#"{"query":"hello"}"#,
        )]),
        text_response("done"),
    ]);

    let tools_registry = registry_with_classifier("greeting");
    let mut history = vec![
        ChatMessage::system(prompt::build_system_prompt()),
        ChatMessage::user("hello"),
    ];
    super::loop_::run_tool_call_loop(&provider, &mut history, &tools_registry, "gpt-4o-mini", 0.7)
        .await
        .unwrap();

    // system, user, assistant tool-call turn, tool result, final assistant
    assert_eq!(history.len(), 5);
    assert_eq!(history[2].role, "assistant");
    assert_eq!(history[3].role, "tool");
    let result: serde_json::Value = serde_json::from_str(&history[3].content).unwrap();
    assert_eq!(result["tool_call_id"], "call_1");
    assert_eq!(result["content"], "greeting");
    assert_eq!(history[4].content, "done");
}

#[tokio::test]
async fn invalid_classifier_output_flows_through_as_default() {
    // Classifier answers outside the closed set; the wrapper coerces to
    // "default" and the template lookup yields the default text.
    let provider = ScriptedProvider::new(vec![
        tool_call_response(vec![tool_call(
            "call_1",
            "classify_query",
            r#"{"query":"???"}"#,
        )]),
        tool_call_response(vec![tool_call(
            "call_2",
            "get_response_template",
            r#"{"query_type":"default"}"#,
        )]),
        text_response("I'm not sure how to respond to that."),
    ]);

    let tools_registry = registry_with_classifier("xyz");
    let mut history = vec![
        ChatMessage::system(prompt::build_system_prompt()),
        ChatMessage::user("???"),
    ];
    super::loop_::run_tool_call_loop(&provider, &mut history, &tools_registry, "gpt-4o-mini", 0.7)
        .await
        .unwrap();

    let classify_result: serde_json::Value = serde_json::from_str(&history[3].content).unwrap();
    assert_eq!(classify_result["content"], "default");

    let template_result: serde_json::Value = serde_json::from_str(&history[5].content).unwrap();
    assert_eq!(
        template_result["content"],
        KnowledgeBase::builtin().template(Category::Default)
    );
}

#[tokio::test]
async fn unknown_tool_name_reports_error_to_model() {
    let provider = ScriptedProvider::new(vec![
        tool_call_response(vec![tool_call("call_1", "shell", r#"{"command":"ls"}"#)]),
        text_response("ok"),
    ]);

    let tools_registry = registry_with_classifier("greeting");
    let mut history = vec![ChatMessage::user("hello")];
    super::loop_::run_tool_call_loop(&provider, &mut history, &tools_registry, "gpt-4o-mini", 0.7)
        .await
        .unwrap();

    let result: serde_json::Value = serde_json::from_str(&history[2].content).unwrap();
    assert_eq!(result["content"], "Unknown tool: shell");
}

#[tokio::test]
async fn runaway_tool_loop_hits_iteration_cap() {
    let endless: Vec<ChatResponse> = (0..20)
        .map(|i| {
            tool_call_response(vec![tool_call(
                &format!("call_{i}"),
                "classify_query",
                r#"{"query":"hello"}"#,
            )])
        })
        .collect();
    let provider = ScriptedProvider::new(endless);

    let tools_registry = registry_with_classifier("greeting");
    let mut history = vec![ChatMessage::user("hello")];
    let result =
        super::loop_::run_tool_call_loop(&provider, &mut history, &tools_registry, "gpt-4o-mini", 0.7)
            .await;

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("maximum tool iterations"));
}

#[tokio::test]
async fn provider_failure_surfaces_to_caller() {
    let provider = ScriptedProvider::new(vec![]);
    let tools_registry = registry_with_classifier("greeting");
    let result = process_message(
        &provider,
        &tools_registry,
        "sys",
        "hello",
        "gpt-4o-mini",
        0.7,
    )
    .await;
    assert!(result.is_err());
}

#[test]
fn exit_keywords_match_any_case() {
    for input in ["exit", "EXIT", "Quit", "bye", " BYE ", "qUiT"] {
        assert!(is_exit_keyword(input), "should exit on {input:?}");
    }
    for input in ["hello", "exits", "goodbye", "", "quit now"] {
        assert!(!is_exit_keyword(input), "should not exit on {input:?}");
    }
}

#[tokio::test]
async fn missing_credential_is_fatal_before_loop() {
    let config = Config {
        api_key: None,
        ..Config::default()
    };
    let result = super::run(config, Some("hello".into()), None, None, 0.7).await;
    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("OPENAI_API_KEY environment variable not set"));
    assert!(message.contains("export OPENAI_API_KEY"));
}
