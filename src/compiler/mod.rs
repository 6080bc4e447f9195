use crate::block::Category;
use crate::flow::{Edge, Node};
use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

mod paths;
mod sections;

pub use paths::{FLOW_ARROW, PathEnumerator, flow_paths};
use sections::Buckets;

/// System document used when no block has content and no flow exists.
pub const DEFAULT_PLACEHOLDER: &str = "Add instruction blocks and fill in their content to build your prompt.";

pub const HUMAN_GUIDELINE: &str =
    "Please respond to my requests following the context and guidelines described above.";
pub const FORMAT_GUIDELINE: &str = "I will follow the specified output format.";
pub const STYLE_GUIDELINE: &str = "I will maintain the specified communication style.";

/// The compiled three-part prompt. Always defined; `human` and `assistant` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreviewDocument {
    pub system: String,
    pub human: String,
    pub assistant: String,
}

impl PreviewDocument {
    /// Renders the document as one block of text, skipping empty human/assistant parts.
    pub fn render(&self) -> String {
        let mut parts = vec![format!("System:\n{}", self.system)];
        if !self.human.is_empty() {
            parts.push(format!("Human:\n{}", self.human));
        }
        if !self.assistant.is_empty() {
            parts.push(format!("Assistant:\n{}", self.assistant));
        }
        parts.join("\n\n")
    }
}

/// Compiles block content and wiring into a [`PreviewDocument`].
///
/// Compilation is pure: the same nodes and edges always produce the same document.
pub struct PromptCompiler<'a> {
    rules: &'a RuleSet,
    placeholder: &'a str,
}

impl<'a> PromptCompiler<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn compile(&self, nodes: &[Node], edges: &[Edge]) -> PreviewDocument {
        let buckets = Buckets::collect(nodes, self.rules);
        let flows = flow_paths(nodes, edges);

        let mut system = buckets.render();
        if let Some(narrative) = narrate(&flows) {
            if !system.is_empty() {
                system.push_str("\n\n");
            }
            system.push_str(&narrative);
        }
        if system.is_empty() {
            system = self.placeholder.to_string();
        }

        let document = PreviewDocument {
            system,
            human: human_guideline(&buckets),
            assistant: assistant_guideline(&buckets),
        };
        debug!(
            nodes = nodes.len(),
            flows = flows.len(),
            system_len = document.system.len(),
            "compiled prompt preview"
        );
        document
    }
}

fn narrate(flows: &[String]) -> Option<String> {
    match flows {
        [] => None,
        [only] => Some(format!("Logical flow: {}", only)),
        many => Some(format!(
            "Logical flows:\n{}",
            many.iter()
                .map(|flow| format!("• {}", flow))
                .collect::<Vec<_>>()
                .join("\n")
        )),
    }
}

fn human_guideline(buckets: &Buckets) -> String {
    let mentions_user = buckets
        .get(Category::Context)
        .iter()
        .any(|line| line.contains("user") || line.contains("User"));
    if mentions_user {
        HUMAN_GUIDELINE.to_string()
    } else {
        String::new()
    }
}

fn assistant_guideline(buckets: &Buckets) -> String {
    let mut lines = Vec::new();
    if buckets.has(Category::Format) {
        lines.push(FORMAT_GUIDELINE);
    }
    if buckets.has(Category::Behavior) {
        lines.push(STYLE_GUIDELINE);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::flow::Position;

    fn node(id: &str, block_type: BlockType, content: &str) -> Node {
        Node {
            id: id.to_string(),
            label: block_type.default_label(),
            block_type,
            content: content.to_string(),
            position: Position::default(),
        }
    }

    #[test]
    fn empty_flow_compiles_to_placeholder() {
        let rules = RuleSet::standard();
        let doc = PromptCompiler::new(&rules).compile(&[], &[]);
        assert_eq!(doc.system, DEFAULT_PLACEHOLDER);
        assert!(doc.human.is_empty());
        assert!(doc.assistant.is_empty());
    }

    #[test]
    fn blank_content_is_skipped() {
        let rules = RuleSet::standard();
        let nodes = vec![node("role_definition-1", BlockType::RoleDefinition, "   \n")];
        let doc = PromptCompiler::new(&rules)
            .with_placeholder("nothing yet")
            .compile(&nodes, &[]);
        assert_eq!(doc.system, "nothing yet");
    }

    #[test]
    fn unknown_types_compile_as_bare_core_lines() {
        let rules = RuleSet::standard();
        let nodes = vec![node("persona-1", BlockType::from_tag("persona"), "Be curious.")];
        let doc = PromptCompiler::new(&rules).compile(&nodes, &[]);
        assert_eq!(doc.system, "## Core Definition\nBe curious.");
    }

    #[test]
    fn human_line_needs_a_user_mention_in_context() {
        let rules = RuleSet::standard();
        let nodes = vec![
            node("role_definition-1", BlockType::RoleDefinition, "Assist the user."),
            node("context_setting-2", BlockType::ContextSetting, "A support desk."),
        ];
        let compiler = PromptCompiler::new(&rules);
        assert!(compiler.compile(&nodes, &[]).human.is_empty());

        let nodes = vec![node(
            "context_setting-1",
            BlockType::ContextSetting,
            "The User is a beginner.",
        )];
        assert_eq!(compiler.compile(&nodes, &[]).human, HUMAN_GUIDELINE);
    }

    #[test]
    fn assistant_lines_follow_format_and_behavior_buckets() {
        let rules = RuleSet::standard();
        let nodes = vec![
            node("communication_style-1", BlockType::CommunicationStyle, "Friendly."),
            node("output_format-2", BlockType::OutputFormat, "Markdown."),
        ];
        let doc = PromptCompiler::new(&rules).compile(&nodes, &[]);
        assert_eq!(doc.assistant, format!("{}\n{}", FORMAT_GUIDELINE, STYLE_GUIDELINE));
    }

    #[test]
    fn multiple_flows_are_bulleted() {
        let rules = RuleSet::standard();
        let nodes = vec![
            node("a-1", BlockType::from_tag("a"), ""),
            node("b-2", BlockType::from_tag("b"), ""),
            node("c-3", BlockType::from_tag("c"), ""),
        ];
        let edges = vec![Edge::manual("a-1", "b-2"), Edge::manual("a-1", "c-3")];
        let doc = PromptCompiler::new(&rules).compile(&nodes, &edges);
        assert_eq!(doc.system, "Logical flows:\n• A → B\n• A → C");
    }

    #[test]
    fn render_omits_empty_parts() {
        let doc = PreviewDocument {
            system: "## Context\nContext: x".to_string(),
            human: String::new(),
            assistant: FORMAT_GUIDELINE.to_string(),
        };
        assert_eq!(
            doc.render(),
            format!("System:\n## Context\nContext: x\n\nAssistant:\n{}", FORMAT_GUIDELINE)
        );
    }
}
