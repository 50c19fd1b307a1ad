// Prompt fragments for the reason/act loop.
// Replace {tool_names}, {chat_history}, {input}, {agent_scratchpad} before sending.

pub const PREFIX: &str = "You are a career counseling assistant. \
Answer the following questions as best you can. You have access to the following tools:";

pub const NO_TOOLS_PREFIX: &str = "You are a career counseling assistant. \
Answer the following questions as best you can. No tools are available, so answer directly.";

pub const FORMAT_INSTRUCTIONS: &str = "Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question";

pub const NO_TOOLS_FORMAT_INSTRUCTIONS: &str = "Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Final Answer: the final answer to the original input question";

pub const HISTORY_SECTION: &str = "Previous conversation:
{chat_history}";

pub const SUFFIX: &str = "Begin!

Question: {input}
Thought:{agent_scratchpad}";

/// Passed to the model as a stop sequence so it cannot invent tool output.
pub const OBSERVATION_STOP: &str = "\nObservation:";

pub const OBSERVATION_PREFIX: &str = "Observation: ";
pub const THOUGHT_PREFIX: &str = "Thought:";

/// Reply returned when the loop runs out of iterations.
pub const ITERATION_LIMIT_REPLY: &str = "Agent stopped due to iteration limit or time limit.";
