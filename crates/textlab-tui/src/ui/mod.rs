//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod input;
mod menu;
mod report;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use textlab_app::App;

use crate::InputState;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, input_state: &InputState) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, app, input_state, *main_area);
    input::render(frame, app, input_state, *input_area);
    status::render(frame, app, *status_area);
}

/// Render the main area (menu sidebar + report).
fn render_main_area(frame: &mut Frame, app: &App, input_state: &InputState, area: Rect) {
    const MENU_SIDEBAR_WIDTH: u16 = 38;
    const REPORT_AREA_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(MENU_SIDEBAR_WIDTH), Constraint::Min(REPORT_AREA_MIN_WIDTH)])
        .split(area);

    let [menu_area, report_area] = chunks.as_ref() else {
        return;
    };

    menu::render(frame, app, input_state, *menu_area);
    report::render(frame, app, *report_area);
}
