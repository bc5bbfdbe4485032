//! Full-screen rendering against ratatui's test backend.

use std::sync::Arc;

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use textlab_app::App;
use textlab_harness::{LoadGate, SimGateway};
use textlab_tui::{InputState, ui};

fn draw(app: &App, input: &InputState) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    terminal.draw(|frame| ui::render(frame, app, input)).unwrap();
    terminal.backend().buffer().clone()
}

fn screen(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    let symbols: Vec<&str> = buffer.content.iter().map(ratatui::buffer::Cell::symbol).collect();
    symbols.chunks(width).map(|row| row.concat()).collect::<Vec<_>>().join("\n")
}

#[test]
fn loading_screen_shows_hint_and_status() {
    let gate = LoadGate::new();
    let mut app = App::with_gateway(Arc::new(SimGateway::new().gated(gate.clone())));
    app.start();

    let text = screen(&draw(&app, &InputState::new()));
    assert!(text.contains("Operations"));
    assert!(text.contains("1. Tokenization"));
    assert!(text.contains("Loading model..."));
    assert!(text.contains("> "));

    gate.open();
}

#[tokio::test]
async fn token_table_is_drawn_after_submit() {
    let mut app = App::with_gateway(Arc::new(SimGateway::new()));
    app.start();
    app.wait_for_model().await;
    app.enter_line("Alice met Bob in Paris.");

    let text = screen(&draw(&app, &InputState::new()));
    assert!(text.contains("Printing all tokens"));
    assert!(text.contains("Index"));
    assert!(text.contains("Alice"));
    assert!(text.contains("Paris"));
    assert!(text.contains("Processed 6 tokens"));
    assert!(text.contains("Option (1 - 9"));
}

#[tokio::test]
async fn text_report_is_drawn_as_paragraph() {
    let mut app = App::with_gateway(Arc::new(SimGateway::new()));
    app.start();
    app.wait_for_model().await;
    app.enter_line("Nothing here.");
    app.enter_line("6");

    let text = screen(&draw(&app, &InputState::new()));
    assert!(text.contains("Printing named entities"));
    assert!(text.contains("No named entities found"));
}

#[test]
fn typed_text_appears_in_input_line() {
    let gate = LoadGate::new();
    let mut app = App::with_gateway(Arc::new(SimGateway::new().gated(gate.clone())));
    app.start();

    let text = screen(&draw(&app, &InputState::with_text("hello there")));
    assert!(text.contains("> hello there"));

    gate.open();
}
