//! Static rule tables driving auto-connect and prompt compilation.
//!
//! A [`RuleSet`] bundles, per block type, the priority used to order blocks, the ordered
//! list of acceptable successor types, the prompt category and the labels used when the
//! block is compiled. Rule sets are plain data: the engine takes one at construction time
//! and never mutates it, so alternate tables can be loaded from JSON or built in tests.

use crate::block::{BlockType, Category};
use crate::error::RuleSetError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;

mod standard;

/// Priority assigned to block types the rule set does not list. Sorts after everything.
pub const UNRANKED_PRIORITY: i32 = i32::MAX;

/// Everything the engine knows about one block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRule {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub priority: i32,
    pub category: Category,
    /// Prefix used in the compiled prompt, e.g. `Role` for `Role: ...`.
    #[serde(default)]
    pub field_label: Option<String>,
    /// Label given to newly created nodes of this type.
    #[serde(default)]
    pub display_label: Option<String>,
    /// Candidate successor types, most preferred first. Empty marks a terminal type.
    #[serde(default)]
    pub successors: Vec<BlockType>,
}

impl BlockRule {
    pub fn new(block_type: BlockType, priority: i32, category: Category) -> Self {
        Self {
            block_type,
            priority,
            category,
            field_label: None,
            display_label: None,
            successors: Vec::new(),
        }
    }

    pub fn field_label(mut self, label: &str) -> Self {
        self.field_label = Some(label.to_string());
        self
    }

    pub fn display_label(mut self, label: &str) -> Self {
        self.display_label = Some(label.to_string());
        self
    }

    pub fn successors(mut self, successors: &[BlockType]) -> Self {
        self.successors = successors.to_vec();
        self
    }
}

#[derive(Serialize, Deserialize)]
struct RuleSetFile {
    blocks: Vec<BlockRule>,
}

/// Priority table, connection rules and category map for a family of block types.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: AHashMap<BlockType, BlockRule>,
    order: Vec<BlockType>,
}

impl RuleSet {
    /// An empty rule set. Every block type is unranked, terminal and compiles as bare text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table covering every [`BlockType::KNOWN`] tag.
    pub fn standard() -> Self {
        standard::standard_rules()
    }

    /// Adds a rule, replacing any existing rule for the same block type.
    pub fn with_rule(mut self, rule: BlockRule) -> Self {
        self.insert(rule);
        self
    }

    pub fn insert(&mut self, rule: BlockRule) {
        if !self.rules.contains_key(&rule.block_type) {
            self.order.push(rule.block_type.clone());
        }
        self.rules.insert(rule.block_type.clone(), rule);
    }

    pub fn get(&self, block_type: &BlockType) -> Option<&BlockRule> {
        self.rules.get(block_type)
    }

    pub fn contains(&self, block_type: &BlockType) -> bool {
        self.rules.contains_key(block_type)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockRule> {
        self.order.iter().filter_map(|block_type| self.rules.get(block_type))
    }

    pub fn priority(&self, block_type: &BlockType) -> i32 {
        self.get(block_type)
            .map_or(UNRANKED_PRIORITY, |rule| rule.priority)
    }

    pub fn successors(&self, block_type: &BlockType) -> &[BlockType] {
        self.get(block_type)
            .map(|rule| rule.successors.as_slice())
            .unwrap_or_default()
    }

    /// Unknown types compile into the core definition bucket.
    pub fn category(&self, block_type: &BlockType) -> Category {
        self.get(block_type)
            .map_or(Category::System, |rule| rule.category)
    }

    pub fn field_label(&self, block_type: &BlockType) -> Option<&str> {
        self.get(block_type)
            .and_then(|rule| rule.field_label.as_deref())
    }

    pub fn display_label(&self, block_type: &BlockType) -> String {
        self.get(block_type)
            .and_then(|rule| rule.display_label.clone())
            .unwrap_or_else(|| block_type.default_label())
    }

    /// Parses a rule set from its JSON form: `{ "blocks": [ { "type": ..., ... } ] }`.
    pub fn from_json(json: &str) -> Result<Self, RuleSetError> {
        let file: RuleSetFile =
            serde_json::from_str(json).map_err(|e| RuleSetError::JsonParseError(e.to_string()))?;

        let mut rule_set = RuleSet::empty();
        for rule in file.blocks {
            if rule_set.contains(&rule.block_type) {
                return Err(RuleSetError::DuplicateBlock(rule.block_type.to_string()));
            }
            rule_set.insert(rule);
        }
        Ok(rule_set)
    }

    pub fn from_file(path: &str) -> Result<Self, RuleSetError> {
        let json = fs::read_to_string(path)
            .map_err(|e| RuleSetError::Io(format!("Could not read '{}': {}", path, e)))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, RuleSetError> {
        let file = RuleSetFile {
            blocks: self.iter().cloned().collect(),
        };
        serde_json::to_string_pretty(&file).map_err(|e| RuleSetError::JsonParseError(e.to_string()))
    }
}
