//! Parses one model step into a tool action or a final answer.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

const FINAL_ANSWER: &str = "Final Answer:";

#[derive(Debug, Clone, PartialEq)]
pub enum AgentStep {
    Action { tool: String, input: String },
    Finish { output: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Invalid Format: Missing 'Action:' after 'Thought:'")]
    MissingAction,

    #[error("Invalid Format: Missing 'Action Input:' after 'Action:'")]
    MissingActionInput,

    #[error("Parsing LLM output produced both a final answer and a parse-able action: {0}")]
    AnswerAndAction(String),
}

impl ParseError {
    /// Text fed back to the model as the observation for a malformed step.
    pub fn observation(&self) -> String {
        match self {
            ParseError::MissingAction | ParseError::MissingActionInput => self.to_string(),
            ParseError::AnswerAndAction(_) => "Invalid or incomplete response".to_string(),
        }
    }
}

fn action_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)[\s]*Action\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)")
            .expect("action regex is valid")
    })
}

fn action_only_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Action\s*\d*\s*:").expect("action-only regex is valid"))
}

pub fn parse_step(text: &str) -> Result<AgentStep, ParseError> {
    let includes_answer = text.contains(FINAL_ANSWER);

    if let Some(caps) = action_re().captures(text) {
        if includes_answer {
            return Err(ParseError::AnswerAndAction(text.to_string()));
        }
        let tool = caps[1].trim().to_string();
        let input = caps[2].trim().trim_matches('"').to_string();
        return Ok(AgentStep::Action { tool, input });
    }

    if includes_answer {
        let output = text
            .rsplit(FINAL_ANSWER)
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        return Ok(AgentStep::Finish { output });
    }

    if action_only_re().is_match(text) {
        Err(ParseError::MissingActionInput)
    } else {
        Err(ParseError::MissingAction)
    }
}

/// Drops anything the model wrote after a stray observation marker.
pub fn truncate_at_observation(text: &str) -> &str {
    match text.find(crate::agent::prompts::OBSERVATION_STOP) {
        Some(idx) => &text[..idx],
        None => text,
    }
}
