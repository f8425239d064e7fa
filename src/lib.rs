// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod parser;
pub mod recipe;
pub mod session;
pub mod timer;

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::RecipeFile;
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent, SessionCommand, SessionOptions, StdoutSink};
use crate::parser::{parse_time_taken, parse_timer_durations, parse_to_time};
use crate::recipe::RecipeStepGraph;
use crate::session::SessionRecipeStepGraph;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - recipe loading and validation
/// - the recipe step graph
/// - either the dry-run plan, or a cooking session:
///   session graph, stdin commands, tick interval, Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let recipe_path = PathBuf::from(&args.recipe);
    let recipe = load_and_validate(&recipe_path)?;
    let graph = RecipeStepGraph::from_recipe(&recipe)?;

    if args.dry_run {
        print_plan(&recipe, &graph);
        return Ok(());
    }

    let session = SessionRecipeStepGraph::from_recipe_graph(&graph).unwrap_or_else(|e| {
        warn!(error = %e, "could not build session graph; starting an empty session");
        SessionRecipeStepGraph::new()
    });

    let options = SessionOptions {
        tick_seconds: args
            .tick_seconds
            .unwrap_or(recipe.session().tick_seconds),
        exit_when_finished: recipe.session().exit_when_finished && !args.keep_open,
    };

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    spawn_stdin_reader(rt_tx.clone());

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    info!(
        recipe = recipe.recipe().name.as_deref().unwrap_or("(unnamed)"),
        ?options,
        "starting cooking session"
    );

    let core = CoreRuntime::new(session, options);
    let runtime = Runtime::new(core, rt_rx, StdoutSink);
    let core = runtime.run().await?;

    debug!(finished = core.session().is_finished(), "session summary");
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<RuntimeEvent>) {
    spawn_line_reader(BufReader::new(std::io::stdin()), tx);
}

/// Read commands from `reader`, one per line, and forward them as events.
/// Blank lines are skipped; the stream ending sends `InputClosed`.
///
/// Runs on a plain thread: a blocked read can't be cancelled, and the
/// process must be able to exit while one is pending.
pub fn spawn_line_reader<R>(reader: R, tx: mpsc::Sender<RuntimeEvent>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        let mut lines = reader.lines();
        loop {
            let event = match lines.next() {
                Some(Ok(line)) if line.trim().is_empty() => continue,
                Some(Ok(line)) => match line.parse::<SessionCommand>() {
                    Ok(command) => RuntimeEvent::Command(command),
                    Err(reason) => RuntimeEvent::InvalidInput { line, reason },
                },
                None => RuntimeEvent::InputClosed,
                Some(Err(e)) => {
                    warn!(error = %e, "failed to read input");
                    RuntimeEvent::InputClosed
                }
            };

            let closed = matches!(event, RuntimeEvent::InputClosed);
            if tx.blocking_send(event).is_err() || closed {
                break;
            }
        }
    })
}

/// Dry-run output: steps in topological order, layers with position hints,
/// detected timers and the estimated total time.
fn print_plan(recipe: &RecipeFile, graph: &RecipeStepGraph) {
    println!("stepgraph dry-run");
    if let Some(name) = &recipe.recipe().name {
        println!("  recipe = {name}");
    }
    println!("  session.tick_seconds = {}", recipe.session().tick_seconds);
    println!(
        "  session.exit_when_finished = {}",
        recipe.session().exit_when_finished
    );
    println!();

    println!("steps ({}), in order:", graph.dag().node_count());
    for id in graph.topologically_sorted_nodes() {
        let Some(step) = graph.step(id) else {
            continue;
        };
        println!("  - {}: {}", step.id, step.text);

        let deps: Vec<&str> = graph
            .dag()
            .predecessors(id)
            .into_iter()
            .filter_map(|p| graph.step(p))
            .map(|s| s.id.as_str())
            .collect();
        if !deps.is_empty() {
            println!("      after: {deps:?}");
        }
        for span in parse_timer_durations(&step.text) {
            println!("      timer: \"{span}\" = {}s", parse_to_time(&span));
        }
        match parse_time_taken(&step.text) {
            0 => debug!(step = %step.id, "step has no timers"),
            secs => println!("      step time: {secs}s"),
        }
    }
    println!();

    println!("layers:");
    for (layer, ids) in graph.node_layers().iter().enumerate() {
        let cells: Vec<String> = ids
            .iter()
            .filter_map(|id| graph.dag().node(*id))
            .map(|n| match n.position {
                Some(p) => format!("{} @({}, {})", n.label.id, p.x, p.y),
                None => n.label.id.clone(),
            })
            .collect();
        println!("  {layer}: {}", cells.join("  |  "));
    }
    println!();

    if graph.has_timers() {
        let total = graph.total_time_seconds();
        println!("estimated time: {}m {}s", total / 60, total % 60);
    } else {
        println!("estimated time: no timed steps");
    }
}
