use crate::block::Category;
use crate::flow::Node;
use crate::rules::RuleSet;
use ahash::AHashMap;
use itertools::Itertools;

/// Formatted content lines grouped by prompt category.
#[derive(Debug, Default)]
pub(super) struct Buckets {
    lines: AHashMap<Category, Vec<String>>,
}

impl Buckets {
    /// Buckets every node with non-blank content, in node order.
    pub(super) fn collect(nodes: &[Node], rules: &RuleSet) -> Self {
        let mut buckets = Buckets::default();
        for node in nodes {
            let content = node.content.trim();
            if content.is_empty() {
                continue;
            }
            let line = match rules.field_label(&node.block_type) {
                Some(label) => format!("{}: {}", label, content),
                None => content.to_string(),
            };
            buckets
                .lines
                .entry(rules.category(&node.block_type))
                .or_default()
                .push(line);
        }
        buckets
    }

    pub(super) fn get(&self, category: Category) -> &[String] {
        self.lines
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(super) fn has(&self, category: Category) -> bool {
        !self.get(category).is_empty()
    }

    /// Renders the non-empty buckets as `## <Section>` blocks in fixed section order.
    pub(super) fn render(&self) -> String {
        Category::SECTION_ORDER
            .iter()
            .filter(|category| self.has(**category))
            .map(|category| {
                format!(
                    "## {}\n{}",
                    category.section_title(),
                    self.get(*category).join("\n")
                )
            })
            .join("\n\n")
    }
}
