//! Runtime behavior tests.
//!
//! Drive the generic [`Runtime`] with a scripted [`SimDriver`], the same way
//! the terminal front ends drive it, and check what was rendered.

use std::sync::Arc;

use textlab_app::{App, AppEvent, Mode, OperationId, Runtime, SessionState};
use textlab_harness::{InvariantRegistry, LoadGate, SimDriver, SimGateway};

fn new_app(gateway: SimGateway) -> App {
    App::with_gateway(Arc::new(gateway))
}

#[tokio::test]
async fn scripted_session_runs_to_quit() {
    let mut driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
    driver.inject_wait_for_model();
    driver.inject_line("Alice moved to Paris.");
    driver.inject_line("6");
    driver.inject_line("n");
    driver.inject_line("Bob stayed.");
    driver.inject_line("9");
    let log = driver.log();

    let app = Runtime::new(driver, new_app(SimGateway::new())).run().await.unwrap();

    assert!(log.is_stopped());
    assert_eq!(app.session().text(), Some("Bob stayed."));
    assert_eq!(app.mode(), Mode::ChooseOperation);
    assert_eq!(app.report().map(|r| r.operation), Some(OperationId::Tokenize));

    let views = log.views();
    let first = views.first().unwrap();
    assert_eq!(first.state, SessionState::ModelLoading);
    assert!(views.iter().any(|v| {
        v.report.as_ref().is_some_and(|r| r.operation == OperationId::RecognizeEntities)
    }));
    assert!(views.windows(2).all(|w| w[0].revision <= w[1].revision));
}

#[tokio::test]
async fn drained_script_quits_cleanly() {
    let mut driver = SimDriver::new();
    driver.inject_wait_for_model();
    let log = driver.log();

    let app = Runtime::new(driver, new_app(SimGateway::new())).run().await.unwrap();

    assert!(log.is_stopped());
    assert_eq!(app.session().state(), &SessionState::Idle);
    assert_eq!(
        log.last().and_then(|v| v.status).map(|s| s.text),
        Some("Model loaded. Enter text to analyze.".to_owned())
    );
}

#[tokio::test]
async fn exit_before_model_loads() {
    let gate = LoadGate::new();
    let mut driver = SimDriver::new();
    driver.inject_event(AppEvent::Tick);
    driver.inject_line("hello");
    driver.inject_event(AppEvent::Quit);
    let log = driver.log();

    let gateway = SimGateway::new().gated(gate.clone());
    let app = Runtime::new(driver, new_app(gateway)).run().await.unwrap();
    gate.open();

    assert!(log.is_stopped());
    assert_eq!(app.session().state(), &SessionState::ModelLoading);
    assert!(app.session().document().is_none());
}

#[tokio::test]
async fn failed_load_recovers_through_reload() {
    let mut driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
    driver.inject_wait_for_model();
    driver.inject_line("text before the model");
    driver.inject_line("reload");
    driver.inject_wait_for_model();
    driver.inject_line("Now it works.");

    let app = Runtime::new(driver, new_app(SimGateway::new().failing_loads(1))).run().await.unwrap();

    assert_eq!(app.session().state(), &SessionState::Ready);
    assert_eq!(app.session().text(), Some("Now it works."));
}

#[tokio::test]
async fn every_menu_entry_renders_a_report() {
    let mut driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
    driver.inject_wait_for_model();
    driver.inject_line("Google hired 3 engineers in Berlin. They start today!");
    for op in OperationId::ALL {
        driver.inject_line(op.menu_number().to_string());
    }
    let log = driver.log();

    Runtime::new(driver, new_app(SimGateway::new())).run().await.unwrap();

    let shown: Vec<_> = log
        .views()
        .into_iter()
        .filter_map(|v| v.report.map(|r| r.operation))
        .collect();
    for op in OperationId::ALL {
        assert!(shown.contains(&op), "{op} never rendered");
    }
}
