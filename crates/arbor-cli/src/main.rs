//! Arbor CLI - declarative behavior trees.
//!
//! - `arbor check <file>` - validate a tree document and print its outline
//! - `arbor run <file>` - run a tree against the built-in guard scenario

mod scenario;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use arbor_bt::{BehaviorNode, BehaviorTree};
use arbor_config::{BuildMode, LeafKind, TreeBuilder, TreeDocument};
use arbor_tools::SharedTraceSink;

use crate::scenario::Perception;

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Validate and run declarative behavior trees", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a tree document and print the built tree
    Check {
        /// YAML tree document
        file: PathBuf,

        /// Fail on bindings the guard scenario does not provide
        #[arg(long)]
        strict: bool,
    },

    /// Run a tree against the guard scenario
    Run {
        /// YAML tree document
        file: PathBuf,

        /// Number of ticks to run
        #[arg(long, default_value_t = 50)]
        ticks: u32,

        /// Seconds of simulated time per tick
        #[arg(long, default_value_t = 0.1)]
        dt: f32,

        /// Build unknown bindings as leaves that always fail
        #[arg(long)]
        lenient: bool,

        /// Print a summary of recorded tick events at the end
        #[arg(long)]
        trace: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Check { file, strict } => check(&file, strict),
        Commands::Run {
            file,
            ticks,
            dt,
            lenient,
            trace,
        } => run(&file, ticks, dt, lenient, trace),
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if json {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load(file: &Path) -> Result<TreeDocument> {
    TreeDocument::from_path(file).with_context(|| format!("failed to load {}", file.display()))
}

fn check(file: &Path, strict: bool) -> Result<()> {
    let document = load(file)?;
    let registry = scenario::registry();

    let mode = if strict {
        BuildMode::Strict
    } else {
        BuildMode::Lenient
    };
    let tree = TreeBuilder::new(&registry)
        .with_mode(mode)
        .build(&document)
        .with_context(|| format!("failed to build {}", file.display()))?;

    println!("root: {}", document.root);
    if let Some(root) = tree.root() {
        print_outline(root, 1);
    }

    let conditions = document.bindings(LeafKind::Condition);
    let actions = document.bindings(LeafKind::Action);
    let missing: Vec<&str> = conditions
        .iter()
        .filter(|name| !registry.has_condition(name))
        .chain(actions.iter().filter(|name| !registry.has_action(name)))
        .copied()
        .collect();

    println!();
    println!("conditions: {}", join(conditions.iter().copied()));
    println!("actions:    {}", join(actions.iter().copied()));
    if missing.is_empty() {
        println!("all bindings provided by the guard scenario");
    } else {
        println!("not provided by the guard scenario: {}", missing.join(", "));
    }
    Ok(())
}

fn run(file: &Path, ticks: u32, dt: f32, lenient: bool, trace: bool) -> Result<()> {
    if !dt.is_finite() || dt < 0.0 {
        bail!("--dt must be a non-negative number of seconds, got {dt}");
    }

    let document = load(file)?;
    let registry = scenario::registry();
    let mode = if lenient {
        BuildMode::Lenient
    } else {
        BuildMode::Strict
    };
    let mut tree = TreeBuilder::new(&registry)
        .with_mode(mode)
        .build(&document)
        .with_context(|| format!("failed to build {}", file.display()))?;

    let sink = SharedTraceSink::new();
    if trace {
        tree = tree.with_trace_sink(Box::new(sink.clone()));
    }

    tracing::info!(root = %document.root, ticks, dt, "running guard scenario");
    let perception = Perception::default();
    for _ in 0..ticks {
        perception.sense(tree.blackboard_mut(), dt);
        let status = tree.tick(dt);
        print_tick(&tree, status.map_or("-", |s| s.as_str()));
    }

    if trace {
        print_trace_summary(&sink);
    }

    let blackboard =
        serde_json::to_string_pretty(tree.blackboard()).context("failed to encode blackboard")?;
    println!("{blackboard}");
    Ok(())
}

fn print_tick(tree: &BehaviorTree, status: &str) {
    let bb = tree.blackboard();
    println!(
        "{:>4}  {:<8} intent={:<7} health={:>5.1}",
        tree.tick_count() - 1,
        status,
        bb.get_str("intent").unwrap_or("-"),
        bb.get("health", 0.0f32),
    );
}

fn print_trace_summary(sink: &SharedTraceSink) {
    let log = sink.snapshot();
    let mut counts = [0usize; 3];
    for event in log.with_tag("tree.tick") {
        if let Some(status) = event.status() {
            counts[status.code() as usize] += 1;
        }
    }
    println!(
        "trace: {} events; success={} failure={} running={}",
        log.events.len(),
        counts[0],
        counts[1],
        counts[2],
    );
}

fn print_outline(node: &dyn BehaviorNode, depth: usize) {
    println!("{:indent$}{}", "", node.name(), indent = depth * 2);
    node.visit_children(&mut |child| print_outline(child, depth + 1));
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<_> = names.collect();
    if names.is_empty() {
        "-".to_owned()
    } else {
        names.join(", ")
    }
}
