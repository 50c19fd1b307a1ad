//! Coaching tools — one prompt template per task, one model call per invocation.
//!
//! The set of tools is closed: `ToolKind` enumerates every task the agent can
//! delegate to. A `Tool` binds a kind to the model handle of the current
//! interaction cycle and exposes the uniform `invoke(text) -> text` contract.

pub mod handlers;
pub mod prompts;
pub mod registry;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::llm_client::{LanguageModel, LlmError};
use crate::tools::prompts::*;

/// The four coaching tasks, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    SkillsGap,
    ResumeScore,
    SalaryEstimate,
    InterviewQuestions,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::SkillsGap,
        ToolKind::ResumeScore,
        ToolKind::SalaryEstimate,
        ToolKind::InterviewQuestions,
    ];

    /// Identifier the reasoning loop writes after `Action:`.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::SkillsGap => "skills_gap_analyzer",
            ToolKind::ResumeScore => "resume_scorer",
            ToolKind::SalaryEstimate => "salary_estimator",
            ToolKind::InterviewQuestions => "interview_question_generator",
        }
    }

    /// Human-readable label shown in the enabled-tools selector.
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::SkillsGap => "Skills Gap Analyzer",
            ToolKind::ResumeScore => "Resume Scorer",
            ToolKind::SalaryEstimate => "Salary Estimator",
            ToolKind::InterviewQuestions => "Interview Question Generator",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::SkillsGap => SKILLS_GAP_DESCRIPTION,
            ToolKind::ResumeScore => RESUME_SCORER_DESCRIPTION,
            ToolKind::SalaryEstimate => SALARY_ESTIMATOR_DESCRIPTION,
            ToolKind::InterviewQuestions => INTERVIEW_QUESTIONS_DESCRIPTION,
        }
    }

    /// Recommended input layout. Documentation only, never parsed.
    pub fn input_hint(self) -> &'static str {
        match self {
            ToolKind::SkillsGap => SKILLS_GAP_INPUT_HINT,
            ToolKind::ResumeScore => RESUME_SCORER_INPUT_HINT,
            ToolKind::SalaryEstimate => SALARY_ESTIMATOR_INPUT_HINT,
            ToolKind::InterviewQuestions => INTERVIEW_QUESTIONS_INPUT_HINT,
        }
    }

    fn template(self) -> &'static str {
        match self {
            ToolKind::SkillsGap => SKILLS_GAP_TEMPLATE,
            ToolKind::ResumeScore => RESUME_SCORER_TEMPLATE,
            ToolKind::SalaryEstimate => SALARY_ESTIMATOR_TEMPLATE,
            ToolKind::InterviewQuestions => INTERVIEW_QUESTIONS_TEMPLATE,
        }
    }

    /// Wraps `input` in this task's instruction template. Pure and total.
    pub fn render(self, input: &str) -> String {
        self.template().replace(INPUT_PLACEHOLDER, input)
    }

    /// Resolves either a label ("Resume Scorer") or a tool name ("resume_scorer").
    pub fn lookup(name: &str) -> Option<ToolKind> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.label() == name || k.name() == name)
    }
}

/// A tool bound to the model handle of one interaction cycle.
#[derive(Clone)]
pub struct Tool {
    kind: ToolKind,
    model: Arc<dyn LanguageModel>,
}

impl Tool {
    pub fn new(kind: ToolKind, model: Arc<dyn LanguageModel>) -> Self {
        Self { kind, model }
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    /// Renders the template and returns the model's raw reply.
    /// Model failures propagate unchanged.
    pub async fn invoke(&self, input: &str) -> Result<String, LlmError> {
        let prompt = self.kind.render(input);
        info!(tool = self.name(), input_len = input.len(), "Invoking tool");
        self.model.complete(&prompt, &[]).await
    }
}

/// Catalog entry served to the chat shell.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub kind: ToolKind,
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub input_hint: &'static str,
}

impl From<ToolKind> for ToolInfo {
    fn from(kind: ToolKind) -> Self {
        Self {
            kind,
            name: kind.name(),
            label: kind.label(),
            description: kind.description(),
            input_hint: kind.input_hint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;

    const SCENARIO_A: &str =
        "Target Role: Backend Engineer\nUser Skills:\n- Python\n- SQL\n\
         Target Job Description:\nBuild scalable APIs";

    #[test]
    fn test_render_is_deterministic_for_every_tool() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.render("Role: SRE"), kind.render("Role: SRE"));
        }
    }

    #[test]
    fn test_render_accepts_empty_and_unstructured_input() {
        for kind in ToolKind::ALL {
            let rendered = kind.render("");
            assert!(!rendered.contains(INPUT_PLACEHOLDER));
            assert!(rendered.ends_with(":\n\n"));

            let rendered = kind.render("just help me {please}");
            assert!(rendered.contains("just help me {please}"));
        }
    }

    #[test]
    fn test_skills_gap_scenario_contains_five_steps_and_input_at_end() {
        let rendered = ToolKind::SkillsGap.render(SCENARIO_A);

        for step in [
            "1. Strong matches",
            "2. Partial matches",
            "3. Clear gaps",
            "4. A step-by-step learning path (ordered roadmap) to close the gaps.",
            "5. Recommended resources or practice project ideas.",
        ] {
            assert!(rendered.contains(step), "missing step: {step}");
        }
        assert!(rendered.ends_with(&format!("User & Job Info:\n{SCENARIO_A}\n")));
    }

    #[test]
    fn test_salary_template_carries_disclaimer() {
        let rendered = ToolKind::SalaryEstimate.render("Job Title: Data Analyst");
        assert!(rendered.contains("approximate estimate, not official or guaranteed"));
    }

    #[test]
    fn test_resume_template_scores_out_of_ten() {
        let rendered = ToolKind::ResumeScore.render("Resume:\n- shipped things");
        assert!(rendered.contains("Score the resume out of 10"));
        assert!(rendered.ends_with("Input:\nResume:\n- shipped things\n"));
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = ToolKind::ALL.iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ToolKind::ALL.len());
    }

    #[test]
    fn test_lookup_by_label_or_name() {
        assert_eq!(
            ToolKind::lookup("Salary Estimator"),
            Some(ToolKind::SalaryEstimate)
        );
        assert_eq!(
            ToolKind::lookup("interview_question_generator"),
            Some(ToolKind::InterviewQuestions)
        );
        assert_eq!(ToolKind::lookup("Cover Letter Writer"), None);
    }

    #[test]
    fn test_descriptions_are_multi_sentence_routing_hints() {
        assert!(SKILLS_GAP_DESCRIPTION.contains("requirements and generate"));
        for kind in ToolKind::ALL {
            assert!(kind.description().contains("Use when user"));
        }
    }

    #[tokio::test]
    async fn test_invoke_sends_rendered_prompt_and_returns_raw_reply() {
        let model = Arc::new(ScriptedModel::new(["Score: 7/10\nsome feedback"]));
        let tool = Tool::new(ToolKind::ResumeScore, model.clone());

        let reply = tool.invoke("Target Role: PM").await.unwrap();

        assert_eq!(reply, "Score: 7/10\nsome feedback");
        assert_eq!(
            model.prompts(),
            vec![ToolKind::ResumeScore.render("Target Role: PM")]
        );
    }

    #[tokio::test]
    async fn test_invoke_propagates_model_failure() {
        let model = Arc::new(ScriptedModel::failing("connection refused"));
        let tool = Tool::new(ToolKind::SkillsGap, model);

        let err = tool.invoke("anything").await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
