//! Property tests for auto-connect, compilation, persistence and history.
mod common;
use common::*;
use promptloom::connect::sort_by_priority;
use promptloom::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn block_type() -> impl Strategy<Value = BlockType> {
    prop_oneof![
        9 => (0..BlockType::KNOWN.len()).prop_map(|i| BlockType::KNOWN[i].clone()),
        1 => "[a-z]{3,8}".prop_map(|tag| BlockType::from_tag(&tag)),
    ]
}

prop_compose! {
    fn arbitrary_nodes()
        (types in prop::collection::vec(block_type(), 0..14),
         contents in prop::collection::vec("[A-Za-z ]{0,12}", 14))
        -> Vec<Node>
    {
        types
            .into_iter()
            .enumerate()
            .map(|(i, block_type)| {
                let id = format!("{}-{}", block_type.tag(), i + 1);
                node(&id, block_type, &contents[i])
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
enum Mutation {
    Add(BlockType),
    Delete(usize),
}

fn mutation() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        3 => block_type().prop_map(Mutation::Add),
        1 => (0usize..32).prop_map(Mutation::Delete),
    ]
}

/// Applies a mutation that always changes the graph: deletes fall back to adds when
/// the flow is empty.
fn apply(engine: &mut Engine, mutation: &Mutation) {
    match mutation {
        Mutation::Delete(index) if !engine.nodes().is_empty() => {
            let id = engine.nodes()[index % engine.nodes().len()].id.clone();
            engine.delete_node(&id).unwrap();
        }
        Mutation::Delete(_) => {
            engine.add_node(BlockType::GoalSetting, None);
        }
        Mutation::Add(block_type) => {
            engine.add_node(block_type.clone(), None);
        }
    }
}

proptest! {
    #[test]
    fn prop_no_self_loops(nodes in arbitrary_nodes()) {
        let edges = auto_connect(&nodes, &RuleSet::standard());
        for edge in &edges {
            prop_assert_ne!(&edge.source, &edge.target);
        }
    }

    #[test]
    fn prop_no_duplicate_pairs(nodes in arbitrary_nodes()) {
        let edges = auto_connect(&nodes, &RuleSet::standard());
        let unique: HashSet<_> = pairs(&edges).into_iter().collect();
        prop_assert_eq!(unique.len(), edges.len());
    }

    #[test]
    fn prop_every_node_but_the_last_has_an_outgoing_edge(nodes in arbitrary_nodes()) {
        let rules = RuleSet::standard();
        let edges = auto_connect(&nodes, &rules);
        let sorted = sort_by_priority(&nodes, &rules);
        for node in sorted.iter().take(sorted.len().saturating_sub(1)) {
            prop_assert!(
                edges.iter().any(|e| e.source == node.id),
                "{} has no outgoing edge", node.id
            );
        }
    }

    #[test]
    fn prop_auto_connect_is_idempotent(nodes in arbitrary_nodes()) {
        let rules = RuleSet::standard();
        prop_assert_eq!(auto_connect(&nodes, &rules), auto_connect(&nodes, &rules));
    }

    #[test]
    fn prop_compile_is_pure(nodes in arbitrary_nodes()) {
        let rules = RuleSet::standard();
        let edges = auto_connect(&nodes, &rules);
        let compiler = PromptCompiler::new(&rules);
        prop_assert_eq!(compiler.compile(&nodes, &edges), compiler.compile(&nodes, &edges));
    }

    #[test]
    fn prop_flow_data_round_trip(nodes in arbitrary_nodes()) {
        let edges = auto_connect(&nodes, &RuleSet::standard());
        let flow = FlowData::new(nodes, edges);

        let json = flow.to_json().unwrap();
        prop_assert_eq!(&FlowData::from_json(&json).unwrap(), &flow);

        let mut engine = Engine::new();
        engine.import_flow_data(flow.clone());
        prop_assert_eq!(engine.export_flow_data(), flow);
    }

    #[test]
    fn prop_undo_redo_are_inverse(
        setup in prop::collection::vec(mutation(), 0..10),
        last in mutation(),
    ) {
        let mut engine = Engine::new();
        for m in &setup {
            apply(&mut engine, m);
        }
        let before = engine.export_flow_data();
        let before_preview = engine.preview().clone();

        apply(&mut engine, &last);
        let after = engine.export_flow_data();

        prop_assert!(engine.undo());
        prop_assert_eq!(engine.export_flow_data(), before);
        prop_assert_eq!(engine.preview(), &before_preview);

        prop_assert!(engine.redo());
        prop_assert_eq!(engine.export_flow_data(), after);
    }

    #[test]
    fn prop_history_is_bounded(mutations in prop::collection::vec(mutation(), 60..80)) {
        let mut engine = Engine::new();
        for m in &mutations {
            apply(&mut engine, m);
        }
        prop_assert!(engine.history().len() <= 50);
        prop_assert_eq!(engine.history().cursor(), engine.history().len() - 1);
    }
}

/// Pins the shared-visited-set traversal: when two roots converge on one node only the
/// first root's path is narrated.
#[test]
fn converging_roots_narrate_only_the_first_path() {
    let nodes = vec![
        node("a-1", BlockType::from_tag("a"), ""),
        node("b-2", BlockType::from_tag("b"), ""),
        node("c-3", BlockType::from_tag("c"), ""),
        node("d-4", BlockType::from_tag("d"), ""),
    ];
    let edges = vec![
        Edge::manual("a-1", "c-3"),
        Edge::manual("b-2", "c-3"),
        Edge::manual("c-3", "d-4"),
    ];
    assert_eq!(
        promptloom::compiler::flow_paths(&nodes, &edges),
        vec!["A → C → D".to_string()]
    );
}

#[test]
fn sixty_adds_stay_within_the_history_bound() {
    let mut engine = Engine::new();
    for _ in 0..60 {
        engine.add_node(BlockType::ExampleProvision, None);
    }
    assert_eq!(engine.history().len(), 50);
    for _ in 0..49 {
        assert!(engine.undo());
    }
    assert!(!engine.undo());
    assert_eq!(engine.nodes().len(), 11);
}
