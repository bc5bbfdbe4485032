//! Line-oriented rendering of a whole session.

use std::sync::Arc;

use textlab_app::App;
use textlab_harness::SimGateway;
use textlab_tui::PlainRenderer;

fn output(renderer: &PlainRenderer<Vec<u8>>) -> String {
    String::from_utf8(renderer.get_ref().clone()).unwrap()
}

async fn loaded() -> (App, PlainRenderer<Vec<u8>>) {
    let mut app = App::with_gateway(Arc::new(SimGateway::new()));
    let mut renderer = PlainRenderer::new(Vec::new());

    renderer.render(&app).unwrap();
    app.start();
    renderer.render(&app).unwrap();
    app.wait_for_model().await;
    renderer.render(&app).unwrap();
    (app, renderer)
}

#[tokio::test]
async fn banner_then_loading_then_prompt() {
    let (_app, renderer) = loaded().await;
    let out = output(&renderer);

    let rule = "=".repeat(100);
    assert!(out.starts_with(&format!("{rule}\nWelcome to textlab")));
    assert!(out.contains("Loading model...\n"));
    assert!(out.contains("Model loaded. Enter text to analyze.\n"));
    assert!(out.ends_with("Write your text below to analyze it ('q' to quit):\n> "));
}

#[tokio::test]
async fn failed_load_prompts_for_retry_or_exit() {
    let mut app = App::with_gateway(Arc::new(SimGateway::new().failing_loads(1)));
    let mut renderer = PlainRenderer::new(Vec::new());

    app.start();
    app.wait_for_model().await;
    renderer.render(&app).unwrap();

    let out = output(&renderer);
    assert!(out.contains("Error loading model: "));
    assert!(out.ends_with("Type 'r' to retry loading the model or 'q' to exit.\n> "));

    app.enter_line("r");
    app.wait_for_model().await;
    renderer.render(&app).unwrap();
    assert!(output(&renderer).ends_with("Write your text below to analyze it ('q' to quit):\n> "));
}

#[tokio::test]
async fn submitted_text_prints_token_table_and_menu() {
    let (mut app, mut renderer) = loaded().await;
    let before = output(&renderer).len();

    app.enter_line("Alice runs.");
    renderer.render(&app).unwrap();
    let out = output(&renderer).split_off(before);

    insta::assert_snapshot!(out.lines().take(8).collect::<Vec<_>>().join("\n"), @r"
    Processed 3 tokens: 'Alice runs.'

    Printing all tokens:

    | Index | Token |
    |-------|-------|
    | 1     | Alice |
    | 2     | runs  |
    ");
    assert!(out.contains("| 3     | .     |\n"));
    assert!(out.contains("9. Exit the program"));
    assert!(out.ends_with("Option (1 - 9): "));
}

#[tokio::test]
async fn unchanged_app_writes_nothing() {
    let (app, mut renderer) = loaded().await;
    let before = output(&renderer);

    renderer.render(&app).unwrap();
    assert_eq!(output(&renderer), before);
}

#[tokio::test]
async fn errors_are_printed_once() {
    let (mut app, mut renderer) = loaded().await;

    app.enter_line("   ");
    renderer.render(&app).unwrap();
    renderer.render(&app).unwrap();

    let out = output(&renderer);
    assert_eq!(out.matches("Please enter some text to analyze").count(), 1);
}
