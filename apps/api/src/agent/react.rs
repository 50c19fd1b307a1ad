//! Zero-shot reason/act loop.
//!
//! Each iteration asks the model for the next step given the enabled tools,
//! the prior conversation and the scratchpad of earlier steps in this turn:
//!
//! 1. `Final Answer:` → return it
//! 2. `Action:` + `Action Input:` → invoke the named tool, feed the output
//!    back as an observation
//! 3. malformed output → feed back an `Invalid Format` observation and retry
//!
//! Tools run one at a time. A failing tool call ends the turn with an error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::agent::parser::{parse_step, truncate_at_observation, AgentStep, ParseError};
use crate::agent::prompts::*;
use crate::agent::{AgentError, ReasoningLoop};
use crate::conversation::{ConversationMemory, Turn};
use crate::llm_client::LanguageModel;
use crate::tools::Tool;

pub const DEFAULT_MAX_ITERATIONS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentOptions {
    pub max_iterations: usize,
    /// When false, a malformed step ends the turn with `AgentError::OutputParsing`.
    pub handle_parsing_errors: bool,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            handle_parsing_errors: true,
        }
    }
}

pub struct ReactAgent {
    model: Arc<dyn LanguageModel>,
    options: AgentOptions,
}

impl ReactAgent {
    pub fn new(model: Arc<dyn LanguageModel>, options: AgentOptions) -> Self {
        Self { model, options }
    }
}

/// Assembles the full prompt for one iteration.
pub fn build_prompt(
    utterance: &str,
    context: &[Turn],
    tools: &[Tool],
    scratchpad: &str,
) -> String {
    let mut sections = Vec::with_capacity(4);

    if tools.is_empty() {
        sections.push(NO_TOOLS_PREFIX.to_string());
        sections.push(NO_TOOLS_FORMAT_INSTRUCTIONS.to_string());
    } else {
        let tool_lines = tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("{PREFIX}\n\n{tool_lines}"));
        sections.push(FORMAT_INSTRUCTIONS.replace("{tool_names}", &tool_names(tools)));
    }

    if !context.is_empty() {
        let history = ConversationMemory::render(context);
        sections.push(HISTORY_SECTION.replace("{chat_history}", &history));
    }

    sections.push(
        SUFFIX
            .replace("{input}", utterance)
            .replace("{agent_scratchpad}", scratchpad),
    );

    sections.join("\n\n")
}

fn tool_names(tools: &[Tool]) -> String {
    tools.iter().map(Tool::name).collect::<Vec<_>>().join(", ")
}

fn push_step(scratchpad: &mut String, log: &str, observation: &str) {
    scratchpad.push_str(log);
    scratchpad.push('\n');
    scratchpad.push_str(OBSERVATION_PREFIX);
    scratchpad.push_str(observation);
    scratchpad.push('\n');
    scratchpad.push_str(THOUGHT_PREFIX);
}

#[async_trait]
impl ReasoningLoop for ReactAgent {
    async fn run(
        &self,
        utterance: &str,
        context: &[Turn],
        tools: &[Tool],
    ) -> Result<String, AgentError> {
        let mut scratchpad = String::new();

        for iteration in 0..self.options.max_iterations.max(1) {
            let prompt = build_prompt(utterance, context, tools, &scratchpad);
            let raw = self.model.complete(&prompt, &[OBSERVATION_STOP]).await?;
            let output = truncate_at_observation(&raw);
            debug!(iteration, "Agent step:\n{output}");

            match parse_step(output) {
                Ok(AgentStep::Finish { output }) => {
                    info!(iterations = iteration + 1, "Agent finished");
                    return Ok(output);
                }
                Ok(AgentStep::Action { tool, input }) => {
                    let observation = match tools.iter().find(|t| t.name() == tool) {
                        Some(selected) => selected.invoke(&input).await?,
                        None => format!(
                            "{tool} is not a valid tool, try one of [{}].",
                            tool_names(tools)
                        ),
                    };
                    debug!(iteration, tool = %tool, "Observation:\n{observation}");
                    push_step(&mut scratchpad, output, &observation);
                }
                // Without tools a plain reply is the answer.
                Err(ParseError::MissingAction) if tools.is_empty() => {
                    return Ok(output.trim().to_string());
                }
                Err(e) if self.options.handle_parsing_errors => {
                    warn!(iteration, "Recovering from malformed agent step: {e}");
                    push_step(&mut scratchpad, output, &e.observation());
                }
                Err(e) => return Err(AgentError::OutputParsing(e.to_string())),
            }
        }

        warn!(
            max_iterations = self.options.max_iterations,
            "Agent hit iteration limit"
        );
        Ok(ITERATION_LIMIT_REPLY.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use crate::llm_client::testing::ScriptedModel;
    use crate::tools::registry::ToolRegistry;
    use crate::tools::ToolKind;

    fn all_tools(model: Arc<ScriptedModel>) -> Vec<Tool> {
        ToolRegistry::build(model).select(&ToolKind::ALL.map(ToolKind::label))
    }

    #[tokio::test]
    async fn test_direct_final_answer() {
        let model = Arc::new(ScriptedModel::new([
            " I know this.\nFinal Answer: Practice SQL.",
        ]));
        let agent = ReactAgent::new(model.clone(), AgentOptions::default());

        let reply = agent
            .run("What should I learn?", &[], &all_tools(model.clone()))
            .await
            .unwrap();

        assert_eq!(reply, "Practice SQL.");
        assert_eq!(model.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_tool_call_then_answer() {
        let model = Arc::new(ScriptedModel::new([
            " I should estimate salary.\n\
             Action: salary_estimator\n\
             Action Input: Job Title: SRE\nLocation: Berlin",
            "EUR 70k-95k (approximate)",
            " I now know the final answer\nFinal Answer: Roughly EUR 70k-95k.",
        ]));
        let agent = ReactAgent::new(model.clone(), AgentOptions::default());

        let reply = agent
            .run("What would an SRE earn in Berlin?", &[], &all_tools(model.clone()))
            .await
            .unwrap();

        assert_eq!(reply, "Roughly EUR 70k-95k.");
        let prompts = model.prompts();
        assert_eq!(prompts.len(), 3);
        assert_eq!(
            prompts[1],
            ToolKind::SalaryEstimate.render("Job Title: SRE\nLocation: Berlin")
        );
        assert!(prompts[2].contains("Observation: EUR 70k-95k (approximate)\nThought:"));
    }

    #[tokio::test]
    async fn test_unknown_tool_becomes_observation() {
        let model = Arc::new(ScriptedModel::new([
            "Action: cover_letter_writer\nAction Input: hi",
            "Final Answer: I can't write cover letters.",
        ]));
        let agent = ReactAgent::new(model.clone(), AgentOptions::default());
        let tools = ToolRegistry::build(model.clone()).select(&["Resume Scorer"]);

        let reply = agent.run("cover letter?", &[], &tools).await.unwrap();

        assert_eq!(reply, "I can't write cover letters.");
        assert!(model.prompts()[1]
            .contains("cover_letter_writer is not a valid tool, try one of [resume_scorer]."));
    }

    #[tokio::test]
    async fn test_parsing_error_is_recovered() {
        let model = Arc::new(ScriptedModel::new([
            "I think you should apply!",
            "Final Answer: Apply broadly.",
        ]));
        let agent = ReactAgent::new(model.clone(), AgentOptions::default());

        let reply = agent
            .run("Tips?", &[], &all_tools(model.clone()))
            .await
            .unwrap();

        assert_eq!(reply, "Apply broadly.");
        assert!(model.prompts()[1]
            .contains("Observation: Invalid Format: Missing 'Action:' after 'Thought:'"));
    }

    #[tokio::test]
    async fn test_parsing_error_propagates_when_not_handled() {
        let model = Arc::new(ScriptedModel::new(["no format here"]));
        let agent = ReactAgent::new(
            model.clone(),
            AgentOptions {
                handle_parsing_errors: false,
                ..AgentOptions::default()
            },
        );

        let err = agent
            .run("Tips?", &[], &all_tools(model.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::OutputParsing(_)));
    }

    #[tokio::test]
    async fn test_iteration_limit_reply() {
        let model = Arc::new(ScriptedModel::new(["gibberish", "more gibberish"]));
        let agent = ReactAgent::new(
            model.clone(),
            AgentOptions {
                max_iterations: 2,
                ..AgentOptions::default()
            },
        );

        let reply = agent.run("?", &[], &all_tools(model.clone())).await.unwrap();
        assert_eq!(reply, ITERATION_LIMIT_REPLY);
    }

    #[tokio::test]
    async fn test_tool_failure_aborts_turn() {
        let model = Arc::new(ScriptedModel::new([
            "Action: resume_scorer\nAction Input: my cv",
        ]));
        let agent = ReactAgent::new(model.clone(), AgentOptions::default());

        let err = agent
            .run("Score my CV", &[], &all_tools(model.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Model(_)));
    }

    #[tokio::test]
    async fn test_no_tools_plain_reply_is_answer() {
        let model = Arc::new(ScriptedModel::new(["Hello! How can I help your career?"]));
        let agent = ReactAgent::new(model.clone(), AgentOptions::default());

        let reply = agent.run("hi", &[], &[]).await.unwrap();

        assert_eq!(reply, "Hello! How can I help your career?");
        let prompt = &model.prompts()[0];
        assert!(prompt.starts_with(NO_TOOLS_PREFIX));
        assert!(!prompt.contains("Action:"));
    }

    #[tokio::test]
    async fn test_no_tools_never_invokes() {
        let model = Arc::new(ScriptedModel::new([
            "Action: resume_scorer\nAction Input: cv",
            "Final Answer: Share your CV and I'll comment.",
        ]));
        let agent = ReactAgent::new(model.clone(), AgentOptions::default());

        let reply = agent.run("review my cv", &[], &[]).await.unwrap();

        assert_eq!(reply, "Share your CV and I'll comment.");
        let prompts = model.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("resume_scorer is not a valid tool, try one of []."));
    }

    #[test]
    fn test_prompt_lists_tools_and_history() {
        let model = Arc::new(ScriptedModel::default());
        let tools =
            ToolRegistry::build(model).select(&["Salary Estimator", "Skills Gap Analyzer"]);
        let context = vec![
            Turn::new(Role::User, "I'm a data analyst"),
            Turn::new(Role::Assistant, "Nice!"),
        ];

        let prompt = build_prompt("Now what?", &context, &tools, "");

        assert!(prompt.contains(&format!(
            "skills_gap_analyzer: {}",
            ToolKind::SkillsGap.description()
        )));
        assert!(prompt.contains("should be one of [skills_gap_analyzer, salary_estimator]"));
        assert!(prompt.contains("Previous conversation:\nHuman: I'm a data analyst\nAI: Nice!"));
        assert!(prompt.ends_with("Question: Now what?\nThought:"));
    }

    #[test]
    fn test_prompt_omits_history_when_empty() {
        let prompt = build_prompt("hi", &[], &[], "");
        assert!(!prompt.contains("Previous conversation"));
    }
}
