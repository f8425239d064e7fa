// tests/session_graph.rs

mod common;
use crate::common::fixtures::{nine_step_graph, ribs_graph, step_id};
use crate::common::init_tracing;

use stepgraph::dag::{Edge, Node, NodeId};
use stepgraph::errors::StepGraphError;
use stepgraph::recipe::RecipeStep;
use stepgraph::session::{SessionRecipeStep, SessionRecipeStepGraph};
use stepgraph::timer::TimerStatus;

fn nine_step_session() -> SessionRecipeStepGraph {
    SessionRecipeStepGraph::from_recipe_graph(&nine_step_graph()).expect("session builds")
}

fn id(session: &SessionRecipeStepGraph, i: usize) -> NodeId {
    session.node_for_step(&step_id(i)).unwrap()
}

fn complete(session: &mut SessionRecipeStepGraph, steps: &[usize]) {
    for i in steps {
        let node = id(session, *i);
        session.complete_step(node).unwrap();
    }
}

fn is_completable(session: &SessionRecipeStepGraph, i: usize) -> bool {
    session.node(id(session, i)).unwrap().label.is_completable()
}

fn frontier(session: &SessionRecipeStepGraph) -> Vec<String> {
    session
        .completable_nodes()
        .into_iter()
        .map(|n| session.node(n).unwrap().label.step.id().to_string())
        .collect()
}

#[test]
fn initial_frontier_is_the_sources() {
    init_tracing();
    let session = nine_step_session();

    assert_eq!(session.dag().node_count(), 9);
    assert_eq!(session.dag().edge_count(), 10);
    assert_eq!(frontier(&session), vec!["s0"]);
    assert!(!session.is_finished());
}

#[test]
fn nine_step_completability() {
    let mut session = nine_step_session();

    complete(&mut session, &[0, 1, 2]);
    assert!(is_completable(&session, 3));
    assert!(is_completable(&session, 4));
    assert!(!is_completable(&session, 5));
    assert_eq!(frontier(&session), vec!["s3", "s4"]);

    complete(&mut session, &[3]);
    assert!(!is_completable(&session, 5));

    complete(&mut session, &[4]);
    assert!(is_completable(&session, 5));

    complete(&mut session, &[5, 6]);
    assert!(!is_completable(&session, 8), "s8 still waits on s7");

    complete(&mut session, &[7]);
    assert!(is_completable(&session, 8));
    assert_eq!(frontier(&session), vec!["s8"]);

    complete(&mut session, &[8]);
    assert!(session.is_finished());
    assert!(session.completable_nodes().is_empty());
}

#[test]
fn reset_leaves_only_sources_completable() {
    let mut session = nine_step_session();
    complete(&mut session, &[0, 1, 2, 3]);

    session.reset_steps();

    for n in session.dag().nodes() {
        assert!(!n.label.is_completed());
        let is_source = session.dag().predecessors(n.id()).is_empty();
        assert_eq!(n.label.is_completable(), is_source);
    }
    assert_eq!(frontier(&session), vec!["s0"]);
}

#[test]
fn toggle_back_demotes_descendants() {
    let mut session = nine_step_session();
    complete(&mut session, &[0, 1]);
    assert!(is_completable(&session, 2));

    let s1 = id(&session, 1);
    assert!(!session.toggle_step(s1).unwrap());
    assert!(!is_completable(&session, 2));
    assert_eq!(frontier(&session), vec!["s1"]);

    assert!(session.toggle_step(s1).unwrap());
    assert!(is_completable(&session, 2));
}

#[test]
fn complete_step_is_idempotent() {
    let mut session = nine_step_session();
    complete(&mut session, &[0, 0]);
    let s0 = id(&session, 0);
    assert!(session.node(s0).unwrap().label.is_completed());
}

#[test]
fn unknown_nodes_and_steps_are_errors() {
    let mut session = nine_step_session();
    let stranger = Node::new(()).id();

    assert!(matches!(
        session.toggle_step(stranger),
        Err(StepGraphError::NodeNotFound(_))
    ));
    assert!(matches!(
        session.node_for_step("nope"),
        Err(StepGraphError::StepNotFound(_))
    ));
}

#[test]
fn timers_attach_to_parsed_spans() {
    let session = SessionRecipeStepGraph::from_recipe_graph(&ribs_graph()).unwrap();
    let sear = session.node_for_step("sear").unwrap();

    let timers = session.timers(sear).unwrap();
    let spans: Vec<&str> = timers.iter().map(|t| t.span.as_str()).collect();
    assert_eq!(spans, vec!["5 min 40 seconds", "1–2 minutes"]);
    assert_eq!(timers[0].timer.duration_seconds(), 340);
    assert_eq!(timers[1].timer.duration_seconds(), 90);
    assert!(timers.iter().all(|t| t.timer.status() == TimerStatus::Pending));

    // sear: 2, rest: 1, glaze: 1.
    assert_eq!(session.timer_count(), 4);
    assert!(matches!(
        session.timer(sear, 2),
        Err(StepGraphError::TimerNotFound { index: 2, .. })
    ));
}

#[test]
fn timers_only_start_on_the_frontier() {
    let mut session = SessionRecipeStepGraph::from_recipe_graph(&ribs_graph()).unwrap();
    let prep = session.node_for_step("prep").unwrap();
    let sear = session.node_for_step("sear").unwrap();

    assert!(matches!(
        session.start_timer(sear, 0),
        Err(StepGraphError::StepNotCompletable(step)) if step == "sear"
    ));

    session.complete_step(prep).unwrap();
    assert!(session.start_timer(sear, 0).unwrap());
    assert!(!session.start_timer(sear, 0).unwrap());

    session.tick(40);
    assert_eq!(session.timer(sear, 0).unwrap().timer.remaining(), 300);

    // Reopening prep takes sear off the frontier and pauses its timer.
    session.toggle_step(prep).unwrap();
    assert_eq!(
        session.timer(sear, 0).unwrap().timer.status(),
        TimerStatus::Paused
    );
    assert!(session.resume_timer(sear, 0).is_err());

    session.toggle_step(prep).unwrap();
    assert!(session.resume_timer(sear, 0).unwrap());
    assert!(session.timer(sear, 0).unwrap().timer.is_running());
}

#[test]
fn completing_a_step_pauses_its_running_timers() {
    let mut session = SessionRecipeStepGraph::from_recipe_graph(&ribs_graph()).unwrap();
    let glaze = session.node_for_step("glaze").unwrap();

    session.start_timer(glaze, 0).unwrap();
    session.complete_step(glaze).unwrap();

    let timer = &session.timer(glaze, 0).unwrap().timer;
    assert_eq!(timer.status(), TimerStatus::Paused);
    assert!(session.pause_timer(glaze, 0).is_ok());
}

#[test]
fn tick_reports_ended_timers() {
    let mut session = SessionRecipeStepGraph::from_recipe_graph(&ribs_graph()).unwrap();
    let prep = session.node_for_step("prep").unwrap();
    let sear = session.node_for_step("sear").unwrap();
    let rest = session.node_for_step("rest").unwrap();
    let glaze = session.node_for_step("glaze").unwrap();

    session.complete_step(prep).unwrap();
    session.complete_step(sear).unwrap();
    session.start_timer(rest, 0).unwrap();
    session.start_timer(glaze, 0).unwrap();

    assert!(session.tick(5).is_empty());
    let ended = session.tick(5);
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].node, rest);
    assert_eq!(ended[0].step_id, "rest");
    assert_eq!(ended[0].index, 0);
    assert_eq!(ended[0].span, "10 seconds");

    assert_eq!(session.timer(glaze, 0).unwrap().timer.remaining(), 170);
    assert!(session.tick(1000).iter().any(|e| e.step_id == "glaze"));
    assert!(session.tick(1000).is_empty());

    session.restart_timer(rest, 0).unwrap();
    assert_eq!(session.timer(rest, 0).unwrap().timer.remaining(), 10);
}

#[test]
fn session_mirrors_recipe_nodes_and_positions() {
    let recipe = nine_step_graph();
    let session = SessionRecipeStepGraph::from_recipe_graph(&recipe).unwrap();

    for recipe_node in recipe.dag().nodes() {
        let session_id = session
            .session_node_for(recipe_node.id())
            .expect("every recipe node is mapped");
        assert_ne!(session_id, recipe_node.id());

        let session_node = session.node(session_id).unwrap();
        assert_eq!(session_node.label.step.id(), recipe_node.label.id);
        assert_eq!(session_node.position, recipe_node.position);
    }
    assert_eq!(session.node_layers().len(), recipe.node_layers().len());
}

#[test]
fn construction_fails_on_an_edge_outside_the_node_set() {
    let recipe = nine_step_graph();
    let inside = recipe.node_for_step("s0").unwrap();
    let outside = Node::new(RecipeStep::new("ghost", "Haunt for 5 minutes"));
    let edges = vec![Edge::new(outside.id(), inside).unwrap()];

    let result = SessionRecipeStepGraph::from_parts(recipe.dag().nodes(), &edges);
    assert!(matches!(
        result,
        Err(StepGraphError::GraphConstructionFailed(_))
    ));
}

#[test]
fn empty_session_is_never_finished() {
    let session = SessionRecipeStepGraph::new();
    assert!(session.is_empty());
    assert!(!session.is_finished());
    assert!(session.completable_nodes().is_empty());
}

#[test]
fn stored_durations_are_used_when_they_match_the_text() {
    let step = RecipeStep::new("boil", "Boil 10 minutes").with_timer_durations(vec![42]);
    let session_step = SessionRecipeStep::from_step(&step);
    assert_eq!(session_step.timers()[0].timer.duration_seconds(), 42);

    let stale = RecipeStep::new("boil", "Boil 10 minutes").with_timer_durations(vec![1, 2]);
    let session_step = SessionRecipeStep::from_step(&stale);
    assert_eq!(session_step.timers().len(), 1);
    assert_eq!(session_step.timers()[0].timer.duration_seconds(), 600);
}
