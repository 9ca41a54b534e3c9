//! Top-level rendering entry point.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Computes the view model for a `rows` x `cols` pane and prints it with the
/// theme matching the current dark/light flag. Does not clear the screen;
/// Zellij hands the plugin a fresh frame on every render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, state.theme(), cols, rows);
}
