//! One interaction cycle: settings snapshot → model handle → tools → agent → transcript.

use serde::Serialize;
use tracing::{error, info};

use crate::agent::{AgentError, AgentOptions, ReactAgent, ReasoningLoop};
use crate::conversation::{Conversation, Turn};
use crate::errors::AppError;
use crate::llm_client::ModelFactory;
use crate::session::SessionContext;
use crate::tools::registry::ToolRegistry;
use crate::tools::Tool;

const FAILURE_PREFIX: &str = "Oops, something went wrong";

#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub reply: String,
    /// True when `reply` is a diagnostic rather than an agent answer.
    pub failed: bool,
    pub transcript: Vec<Turn>,
}

/// User-visible text substituted for a failed agent run.
pub fn diagnostic(err: &AgentError) -> String {
    format!("{FAILURE_PREFIX}: {err}")
}

/// Runs the agent for one utterance and records the result.
///
/// Never fails: agent errors become a diagnostic assistant turn, so the
/// session keeps accepting input afterwards.
pub async fn respond(
    conversation: &mut Conversation,
    agent: &dyn ReasoningLoop,
    tools: &[Tool],
    utterance: &str,
) -> (String, bool) {
    conversation.push_user(utterance);

    let result = agent
        .run(utterance, conversation.memory().as_context(), tools)
        .await;

    match result {
        Ok(reply) => {
            conversation.record_exchange(utterance, &reply);
            (reply, false)
        }
        Err(e) => {
            error!("Agent run failed: {e}");
            let reply = diagnostic(&e);
            conversation.record_failure(&reply);
            (reply, true)
        }
    }
}

/// Full cycle for a session. Rejects the call with `Conflict` if another
/// turn for the same session is still running.
pub async fn run_turn(
    session: &SessionContext,
    models: &dyn ModelFactory,
    options: AgentOptions,
    utterance: &str,
) -> Result<TurnOutcome, AppError> {
    let mut conversation = session.try_conversation().ok_or_else(|| {
        AppError::Conflict("A message is already being processed for this session".to_string())
    })?;

    // Read once; later settings changes apply to the next turn.
    let settings = session.settings().await;
    let model = models.build(&settings.model);
    let tools = ToolRegistry::build(model.clone()).select(settings.enabled_tools.as_slice());
    let agent = ReactAgent::new(model, options);

    info!(
        session_id = %session.id,
        model = %settings.model.model,
        temperature = settings.model.temperature,
        tools = tools.len(),
        "Starting turn"
    );

    let (reply, failed) = respond(&mut conversation, &agent, &tools, utterance).await;

    Ok(TurnOutcome {
        reply,
        failed,
        transcript: conversation.transcript().to_vec(),
    })
}
