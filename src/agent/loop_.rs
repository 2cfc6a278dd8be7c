//! Conversational loop: sequential turns, tool dispatch, exit handling.

use crate::agent::prompt;
use crate::config::Config;
use crate::knowledge::KnowledgeBase;
use crate::providers::{self, ChatMessage, Provider};
use crate::tools::{self, Tool, ToolSpec};
use anyhow::Result;
use std::io::Write as _;
use std::sync::Arc;

/// Maximum agentic tool-use iterations per user message to prevent runaway loops.
const MAX_TOOL_ITERATIONS: usize = 10;

/// Keywords that end the interactive session (matched case-insensitively).
const EXIT_KEYWORDS: [&str; 3] = ["exit", "quit", "bye"];

/// True when the user asked to end the session.
pub fn is_exit_keyword(input: &str) -> bool {
    EXIT_KEYWORDS
        .iter()
        .any(|k| input.trim().eq_ignore_ascii_case(k))
}

/// Drive one agent turn: send history plus tool specs, execute any tool calls
/// the model requests, feed results back, and repeat until the model answers
/// with plain text. The model controls tool choice and ordering; this loop
/// only enforces the iteration cap.
pub(crate) async fn run_tool_call_loop(
    provider: &dyn Provider,
    history: &mut Vec<ChatMessage>,
    tools_registry: &[Box<dyn Tool>],
    model: &str,
    temperature: f64,
) -> Result<String> {
    let specs: Vec<ToolSpec> = tools_registry.iter().map(|tool| tool.spec()).collect();

    for _iteration in 0..MAX_TOOL_ITERATIONS {
        let response = provider
            .chat_with_tools(history, &specs, model, temperature)
            .await?;

        if !response.has_tool_calls() {
            // No tool calls — this is the final response
            let text = response.text.unwrap_or_default();
            history.push(ChatMessage::assistant(&text));
            return Ok(text);
        }

        history.push(ChatMessage::assistant_tool_calls(
            response.text.as_deref(),
            &response.tool_calls,
        ));

        for call in &response.tool_calls {
            tracing::debug!(tool = %call.name, "Executing tool call");
            let output = if let Some(tool) = tools::find_tool(tools_registry, &call.name) {
                let args: serde_json::Value = serde_json::from_str(&call.arguments)
                    .unwrap_or_else(|_| serde_json::json!({}));
                match tool.execute(args).await {
                    Ok(result) if result.success => result.output,
                    Ok(result) => {
                        format!("Error: {}", result.error.unwrap_or(result.output))
                    }
                    Err(e) => format!("Error executing {}: {e}", call.name),
                }
            } else {
                format!("Unknown tool: {}", call.name)
            };

            history.push(ChatMessage::tool_result(&call.id, &output));
        }
    }

    anyhow::bail!("Agent exceeded maximum tool iterations ({MAX_TOOL_ITERATIONS})")
}

/// Process a single user message through the agent. Each turn is ephemeral:
/// a fresh history of system prompt plus the user utterance.
pub async fn process_message(
    provider: &dyn Provider,
    tools_registry: &[Box<dyn Tool>],
    system_prompt: &str,
    message: &str,
    model: &str,
    temperature: f64,
) -> Result<String> {
    let mut history = vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user(message),
    ];
    run_tool_call_loop(provider, &mut history, tools_registry, model, temperature).await
}

/// Wire up the knowledge base, tools, and providers, then run either a
/// single-shot turn or the interactive conversation loop.
pub async fn run(
    config: Config,
    message: Option<String>,
    provider_override: Option<String>,
    model_override: Option<String>,
    temperature: f64,
) -> Result<String> {
    // Missing credential is a fatal startup condition: fail with remediation
    // before any loop state is built.
    let Some(api_key) = config.api_key.clone() else {
        anyhow::bail!(
            "OPENAI_API_KEY environment variable not set.\n\
             Set it with: export OPENAI_API_KEY=your-api-key"
        );
    };

    let provider_name = provider_override.as_deref().unwrap_or(&config.provider);
    let model_name = model_override.as_deref().unwrap_or(&config.model);

    let knowledge = Arc::new(KnowledgeBase::builtin());
    tracing::info!(entries = knowledge.len(), "Knowledge base loaded");

    // The classifier is its own delegated agent invocation behind the same
    // provider seam the primary agent uses.
    let classifier: Arc<dyn Provider> = Arc::from(providers::create_provider_with_url(
        provider_name,
        Some(&api_key),
        config.api_url.as_deref(),
    )?);
    let tools_registry = tools::default_tools(classifier, knowledge, model_name, temperature);

    let provider = providers::create_provider_with_url(
        provider_name,
        Some(&api_key),
        config.api_url.as_deref(),
    )?;
    tracing::info!(provider = provider_name, model = model_name, "Agent ready");

    let system_prompt = prompt::build_system_prompt();

    if let Some(msg) = message {
        let response = process_message(
            provider.as_ref(),
            &tools_registry,
            &system_prompt,
            &msg,
            model_name,
            temperature,
        )
        .await?;
        println!("Agent: {response}");
        return Ok(response);
    }

    println!("Starting deskmate...");
    println!("Type 'exit' to quit the conversation.");

    let mut final_output = String::new();

    loop {
        print!("\nYou: ");
        let _ = std::io::stdout().flush();

        let mut input = String::new();
        match std::io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("\nError reading input: {e}\n");
                break;
            }
        }

        let user_input = input.trim().to_string();
        if user_input.is_empty() {
            continue;
        }
        if is_exit_keyword(&user_input) {
            println!("\nGoodbye! Thanks for chatting.");
            break;
        }

        // Any turn failure is reported and the loop continues; no retry.
        match process_message(
            provider.as_ref(),
            &tools_registry,
            &system_prompt,
            &user_input,
            model_name,
            temperature,
        )
        .await
        {
            Ok(response) => {
                println!("Agent: {response}");
                final_output = response;
            }
            Err(e) => {
                eprintln!("Error: {e}");
            }
        }
    }

    Ok(final_output)
}
