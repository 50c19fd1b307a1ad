//! Tool registry — filters the full tool set down to what the operator enabled.

use std::sync::Arc;

use tracing::debug;

use crate::llm_client::LanguageModel;
use crate::tools::{Tool, ToolKind};

/// All four tools bound to one model handle, in declaration order.
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    pub fn build(model: Arc<dyn LanguageModel>) -> Self {
        let tools = ToolKind::ALL
            .into_iter()
            .map(|kind| Tool::new(kind, model.clone()))
            .collect();
        Self { tools }
    }

    /// Returns the enabled subset in declaration order.
    ///
    /// Accepts labels or tool names. Unknown names are ignored, duplicates
    /// collapse, and the order of `enabled` has no effect on the result.
    pub fn select<S: AsRef<str>>(&self, enabled: &[S]) -> Vec<Tool> {
        let wanted: Vec<ToolKind> = enabled
            .iter()
            .filter_map(|name| {
                let kind = ToolKind::lookup(name.as_ref());
                if kind.is_none() {
                    debug!(name = name.as_ref(), "Ignoring unknown tool name");
                }
                kind
            })
            .collect();

        self.tools
            .iter()
            .filter(|tool| wanted.contains(&tool.kind()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;

    fn registry() -> ToolRegistry {
        ToolRegistry::build(Arc::new(ScriptedModel::default()))
    }

    fn kinds(tools: &[Tool]) -> Vec<ToolKind> {
        tools.iter().map(Tool::kind).collect()
    }

    #[test]
    fn test_select_all_labels_returns_declaration_order() {
        let selected = registry().select(&[
            "Interview Question Generator",
            "Salary Estimator",
            "Resume Scorer",
            "Skills Gap Analyzer",
        ]);
        assert_eq!(kinds(&selected), ToolKind::ALL.to_vec());
    }

    #[test]
    fn test_select_order_is_independent_of_input_order() {
        let a = registry().select(&["Salary Estimator", "Skills Gap Analyzer"]);
        let b = registry().select(&["Skills Gap Analyzer", "Salary Estimator"]);
        assert_eq!(kinds(&a), kinds(&b));
        assert_eq!(
            kinds(&a),
            vec![ToolKind::SkillsGap, ToolKind::SalaryEstimate]
        );
    }

    #[test]
    fn test_select_drops_unknown_names() {
        let selected = registry().select(&["Cover Letter Writer", "resume_scorer", ""]);
        assert_eq!(kinds(&selected), vec![ToolKind::ResumeScore]);
    }

    #[test]
    fn test_select_collapses_duplicates() {
        let selected = registry().select(&["Resume Scorer", "resume_scorer"]);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_select_nothing() {
        let none: [&str; 0] = [];
        assert!(registry().select(&none).is_empty());
    }
}
