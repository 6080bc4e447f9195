use clap::Parser;
use promptloom::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// A CLI tool to generate random auto-connected flows for testing hosts and rule sets
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated flow JSON to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// Number of blocks to generate
    #[arg(short, long, default_value_t = 8)]
    count: usize,

    /// Share of blocks (0.0 to 1.0) that receive sample content
    #[arg(long, default_value_t = 0.75)]
    filled: f64,

    /// Optional rule set JSON; block types are drawn from it
    #[arg(short, long)]
    rules: Option<String>,
}

const SAMPLE_CONTENT: &[&str] = &[
    "You are an experienced mentor.",
    "The user is new to the topic and learns best with analogies.",
    "Keep a warm, encouraging tone.",
    "Break every answer into small numbered steps.",
    "If the question is ambiguous, ask one clarifying question first.",
    "Give one worked example before the general rule.",
    "Never invent citations.",
    "Answer in Markdown with a short summary at the end.",
    "Explain the mistake and suggest a fix.",
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if !(0.0..=1.0).contains(&cli.filled) {
        eprintln!("Error: --filled ({}) must be between 0.0 and 1.0", cli.filled);
        std::process::exit(1);
    }

    let rules = match &cli.rules {
        Some(path) => RuleSet::from_file(path)?,
        None => RuleSet::standard(),
    };
    let block_types: Vec<BlockType> = rules.iter().map(|r| r.block_type.clone()).collect();
    if block_types.is_empty() {
        eprintln!("Error: the rule set defines no block types");
        std::process::exit(1);
    }

    info!(count = cli.count, "generating flow");
    let mut rng = rand::rng();
    let mut engine = Engine::builder().with_rules(rules).build();

    for _ in 0..cli.count {
        let Some(block_type) = block_types.choose(&mut rng) else {
            break;
        };
        let position = Position::new(
            rng.random_range(0.0..1200.0_f64).round(),
            rng.random_range(0.0..800.0_f64).round(),
        );
        let id = engine.add_node(block_type.clone(), Some(position));

        if rng.random_bool(cli.filled) {
            if let Some(content) = SAMPLE_CONTENT.choose(&mut rng) {
                engine.update_node_data(&id, NodeDataPatch::content(content))?;
            }
        }
    }

    engine.export_flow_data().save(&cli.output)?;
    info!(
        nodes = engine.nodes().len(),
        edges = engine.edges().len(),
        output = %cli.output,
        "flow written"
    );

    Ok(())
}
