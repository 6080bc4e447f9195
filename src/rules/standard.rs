use super::{BlockRule, RuleSet};
use crate::block::{BlockType, Category};

/// Defines the standard table: one row per block type, in ascending priority.
macro_rules! standard_table {
    ( $( ($variant:ident, $priority:expr, $category:ident, $field:expr, $display:expr, [ $( $next:ident ),* ]) ),* $(,)? ) => {
        pub(super) fn standard_rules() -> RuleSet {
            let mut rules = RuleSet::empty();
            $(
                rules.insert(
                    BlockRule::new(BlockType::$variant, $priority, Category::$category)
                        .field_label($field)
                        .display_label($display)
                        .successors(&[ $( BlockType::$next ),* ]),
                );
            )*
            rules
        }
    };
}

standard_table! {
    (RoleDefinition, 1, System, "Role", "Role Definition",
        [GoalSetting, ContextSetting, BackgroundInfo, AudienceDefinition]),
    (GoalSetting, 2, System, "Goal", "Goal Setting",
        [ContextSetting, BackgroundInfo, AudienceDefinition, StepByStep]),
    (ContextSetting, 3, Context, "Context", "Context Setting",
        [BackgroundInfo, AudienceDefinition, LearningStyle, CommunicationStyle, StepByStep, OutputFormat]),
    (BackgroundInfo, 4, Context, "Background", "Background Info",
        [AudienceDefinition, LearningStyle, CommunicationStyle, OutputFormat]),
    (AudienceDefinition, 5, Context, "Audience", "Audience Definition",
        [LearningStyle, CommunicationStyle, ExpertiseLevel, OutputFormat]),
    (LearningStyle, 6, Behavior, "Learning Style", "Learning Style",
        [CommunicationStyle, ToneAdjustment, StepByStep, OutputFormat]),
    (CommunicationStyle, 7, Behavior, "Communication Style", "Communication Style",
        [ToneAdjustment, ExpertiseLevel, StepByStep, OutputFormat]),
    (ToneAdjustment, 8, Behavior, "Tone", "Tone Adjustment",
        [ExpertiseLevel, StepByStep, OutputFormat]),
    (ExpertiseLevel, 9, Behavior, "Expertise Level", "Expertise Level",
        [StepByStep, ExampleProvision, OutputFormat]),
    (StepByStep, 10, Process, "Steps", "Step By Step",
        [ConditionalLogic, ExampleProvision, FeedbackLoop, OutputFormat]),
    (ConditionalLogic, 11, Process, "Conditions", "Conditional Logic",
        [ExampleProvision, ErrorHandling, OutputFormat]),
    (ExampleProvision, 12, Process, "Examples", "Example Provision",
        [FeedbackLoop, Constraints, OutputFormat]),
    (FeedbackLoop, 13, Process, "Feedback", "Feedback Loop",
        [Constraints, OutputFormat]),
    (Constraints, 14, Constraints, "Constraints", "Constraints",
        [SafetyGuidelines, OutputFormat]),
    (SafetyGuidelines, 15, Constraints, "Safety", "Safety Guidelines",
        [OutputFormat, ErrorHandling]),
    (OutputFormat, 16, Format, "Output Format", "Output Format",
        [ResponseLength, ErrorHandling]),
    (ResponseLength, 17, Format, "Response Length", "Response Length",
        [ErrorHandling]),
    (ErrorHandling, 18, Constraints, "Error Handling", "Error Handling", []),
}
