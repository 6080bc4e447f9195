use clap::{Parser, Subcommand};
use promptloom::prelude::*;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Build, wire and compile instruction-block flows from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional path to a rule set JSON file replacing the standard rules
    #[arg(short, long, global = true)]
    rules: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a flow JSON file and print the prompt
    Compile {
        /// Path to the flow JSON file ({ nodes, edges })
        flow_path: String,
        /// Re-run auto-connect instead of trusting the stored edges
        #[arg(long)]
        rewire: bool,
        /// Also print the node order and wiring
        #[arg(short, long)]
        explain: bool,
    },
    /// Build a flow from blocks given as `type` or `type=content`
    Build {
        blocks: Vec<String>,
        /// Write the resulting flow JSON here instead of printing the prompt
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Edit a flow interactively
    Interactive {
        /// Resume from a saved session file
        #[arg(short, long)]
        session: Option<String>,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let rules = match &cli.rules {
        Some(path) => RuleSet::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load rules: {}", e))),
        None => RuleSet::standard(),
    };

    match cli.command {
        Command::Compile {
            flow_path,
            rewire,
            explain,
        } => run_compile(rules, &flow_path, rewire, explain),
        Command::Build { blocks, output } => run_build(rules, &blocks, output.as_deref()),
        Command::Interactive { session } => run_interactive(rules, session.as_deref()),
    }
}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_compile(rules: RuleSet, flow_path: &str, rewire: bool, explain: bool) {
    let mut flow = FlowData::from_file(flow_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load flow: {}", e)));
    if rewire {
        flow.edges = auto_connect(&flow.nodes, &rules);
    }

    if explain {
        println!("{}", FlowFormatter::new(&rules).format(&flow));
    }
    let engine = Engine::builder().with_rules(rules).with_flow(flow).build();
    println!("{}", engine.preview().render());
}

fn run_build(rules: RuleSet, blocks: &[String], output: Option<&str>) {
    let mut engine = Engine::builder().with_rules(rules).build();
    for block in blocks {
        let (tag, content) = block.split_once('=').unwrap_or((block.as_str(), ""));
        let id = engine.add_node(BlockType::from_tag(tag.trim()), None);
        if !content.is_empty() {
            engine
                .update_node_data(&id, NodeDataPatch::content(content.trim()))
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to fill '{}': {}", id, e)));
        }
    }

    match output {
        Some(path) => {
            engine
                .export_flow_data()
                .save(path)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to write flow: {}", e)));
            println!(
                "Wrote {} nodes and {} edges to '{}'",
                engine.nodes().len(),
                engine.edges().len(),
                path
            );
        }
        None => println!("{}", engine.preview().render()),
    }
}

const HELP: &str = "\
Commands:
  add <type> [content]      add a block
  edit <id> <content>       replace a block's content
  label <id> <label>        rename a block
  delete <id>               remove a block
  dup <id>                  duplicate a block
  connect <source> <target> draw a manual edge
  disconnect <edge-id>      remove an edge
  undo | redo               walk the history
  reset                     clear the flow
  show                      print the compiled prompt
  explain                   print the node order and wiring
  types                     list the known block types
  export <path>             write the flow as JSON
  import <path>             load a flow JSON file
  save <path>               save the session (flow and history)
  quit";

/// Runs a line-oriented editing session on stdin.
fn run_interactive(rules: RuleSet, session_path: Option<&str>) {
    println!("--- Promptloom Interactive Mode --- (type 'help' for commands)");

    let builder = Engine::builder().with_rules(rules);
    let mut engine = match session_path {
        Some(path) => {
            let session = Session::from_file(path)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to load session: {}", e)));
            builder.with_session(session).build()
        }
        None => builder.build(),
    };

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }
        match execute(&mut engine, line) {
            Ok(message) => println!("{}", message),
            Err(message) => println!("Error: {}", message),
        }
    }
}

fn execute(engine: &mut Engine, line: &str) -> std::result::Result<String, String> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let (first, tail) = rest.split_once(' ').unwrap_or((rest, ""));
    let tail = tail.trim();

    match command {
        "help" => Ok(HELP.to_string()),
        "add" => {
            if first.is_empty() {
                return Err("usage: add <type> [content]".to_string());
            }
            let id = engine.add_node(BlockType::from_tag(first), None);
            if !tail.is_empty() {
                engine
                    .update_node_data(&id, NodeDataPatch::content(tail))
                    .map_err(|e| e.to_string())?;
            }
            Ok(format!("added {}", id))
        }
        "edit" => engine
            .update_node_data(first, NodeDataPatch::content(tail))
            .map(|_| format!("updated {}", first))
            .map_err(|e| e.to_string()),
        "label" => engine
            .update_node_data(first, NodeDataPatch::label(tail))
            .map(|_| format!("renamed {}", first))
            .map_err(|e| e.to_string()),
        "delete" => engine
            .delete_node(first)
            .map(|_| format!("deleted {}", first))
            .map_err(|e| e.to_string()),
        "dup" => engine
            .duplicate_node(first)
            .map(|id| format!("added {}", id))
            .map_err(|e| e.to_string()),
        "connect" => engine
            .connect(first, tail)
            .map(|id| format!("connected {}", id))
            .map_err(|e| e.to_string()),
        "disconnect" => engine
            .disconnect(first)
            .map(|_| format!("removed {}", first))
            .map_err(|e| e.to_string()),
        "undo" => Ok(if engine.undo() { "undone" } else { "nothing to undo" }.to_string()),
        "redo" => Ok(if engine.redo() { "redone" } else { "nothing to redo" }.to_string()),
        "reset" => {
            engine.reset_flow();
            Ok("flow cleared".to_string())
        }
        "show" => Ok(engine.preview().render()),
        "explain" => Ok(FlowFormatter::new(engine.rules()).format(&engine.export_flow_data())),
        "types" => Ok(engine
            .rules()
            .iter()
            .map(|rule| format!("{:>3}  {}", rule.priority, rule.block_type))
            .collect::<Vec<_>>()
            .join("\n")),
        "export" => engine
            .export_flow_data()
            .save(first)
            .map(|_| format!("wrote {}", first))
            .map_err(|e| e.to_string()),
        "import" => {
            let flow = FlowData::from_file(first).map_err(|e| e.to_string())?;
            engine.import_flow_data(flow);
            Ok(format!("imported {} nodes", engine.nodes().len()))
        }
        "save" => engine
            .session()
            .save(first)
            .map(|_| format!("saved session to {}", first))
            .map_err(|e| e.to_string()),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
