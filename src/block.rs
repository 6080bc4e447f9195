use serde::{Deserialize, Serialize};
use std::fmt;

/// The tag of an instruction block.
///
/// Known tags carry rules in the standard [`RuleSet`](crate::rules::RuleSet). Any other
/// tag is preserved verbatim in `Other` so that flows produced by a newer block picker
/// still load, sort last and compile as bare content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    RoleDefinition,
    GoalSetting,
    ContextSetting,
    BackgroundInfo,
    AudienceDefinition,
    LearningStyle,
    CommunicationStyle,
    ToneAdjustment,
    ExpertiseLevel,
    StepByStep,
    ConditionalLogic,
    ExampleProvision,
    FeedbackLoop,
    Constraints,
    SafetyGuidelines,
    OutputFormat,
    ResponseLength,
    ErrorHandling,
    Other(String),
}

macro_rules! define_block_tags {
    ( $( ($variant:ident, $tag:expr) ),* $(,)? ) => {
        impl BlockType {
            /// Every known block type, in declaration order.
            pub const KNOWN: &'static [BlockType] = &[ $( BlockType::$variant ),* ];

            /// The wire tag, e.g. `role_definition`.
            pub fn tag(&self) -> &str {
                match self {
                    $( BlockType::$variant => $tag, )*
                    BlockType::Other(tag) => tag.as_str(),
                }
            }

            /// Parses a wire tag. Unlisted tags become [`BlockType::Other`].
            pub fn from_tag(tag: &str) -> Self {
                match tag {
                    $( $tag => BlockType::$variant, )*
                    other => BlockType::Other(other.to_string()),
                }
            }
        }
    };
}

define_block_tags! {
    (RoleDefinition, "role_definition"),
    (GoalSetting, "goal_setting"),
    (ContextSetting, "context_setting"),
    (BackgroundInfo, "background_info"),
    (AudienceDefinition, "audience_definition"),
    (LearningStyle, "learning_style"),
    (CommunicationStyle, "communication_style"),
    (ToneAdjustment, "tone_adjustment"),
    (ExpertiseLevel, "expertise_level"),
    (StepByStep, "step_by_step"),
    (ConditionalLogic, "conditional_logic"),
    (ExampleProvision, "example_provision"),
    (FeedbackLoop, "feedback_loop"),
    (Constraints, "constraints"),
    (SafetyGuidelines, "safety_guidelines"),
    (OutputFormat, "output_format"),
    (ResponseLength, "response_length"),
    (ErrorHandling, "error_handling"),
}

impl BlockType {
    pub fn is_known(&self) -> bool {
        !matches!(self, BlockType::Other(_))
    }

    /// Title-cased tag, used as a node label when no rule set supplies one.
    pub fn default_label(&self) -> String {
        self.tag()
            .split(['_', '-'])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<String> for BlockType {
    fn from(tag: String) -> Self {
        match BlockType::from_tag(&tag) {
            BlockType::Other(_) => BlockType::Other(tag),
            known => known,
        }
    }
}

impl From<&str> for BlockType {
    fn from(tag: &str) -> Self {
        BlockType::from_tag(tag)
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Other(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The prompt bucket a block's content is compiled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    System,
    Context,
    Behavior,
    Format,
    Process,
    Constraints,
}

impl Category {
    /// Section order of the compiled system document.
    pub const SECTION_ORDER: [Category; 6] = [
        Category::System,
        Category::Context,
        Category::Behavior,
        Category::Process,
        Category::Constraints,
        Category::Format,
    ];

    /// The `## ` heading used for this bucket.
    pub fn section_title(&self) -> &'static str {
        match self {
            Category::System => "Core Definition",
            Category::Context => "Context",
            Category::Behavior => "Behavior Guidelines",
            Category::Process => "Process Instructions",
            Category::Constraints => "Constraints & Rules",
            Category::Format => "Output Format",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_survive_serde() {
        let block: BlockType = serde_json::from_str("\"persona_memory\"").unwrap();
        assert_eq!(block, BlockType::Other("persona_memory".to_string()));
        assert_eq!(serde_json::to_string(&block).unwrap(), "\"persona_memory\"");
    }

    #[test]
    fn default_label_title_cases_tag() {
        assert_eq!(BlockType::StepByStep.default_label(), "Step By Step");
        assert_eq!(
            BlockType::from_tag("custom-block").default_label(),
            "Custom Block"
        );
    }
}
