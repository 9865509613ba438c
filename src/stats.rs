//! Presentation: a `comfy-table` rendering of one solve's statistics and the
//! final board snapshot. The batch/percentile comparison this module used to
//! render is dropped along with concurrent multi-puzzle solving.

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table, modifiers, presets};

use crate::board_state::BoardState;
use crate::solver::SolveReport;

fn new_base_table() -> Table {
    let mut t = Table::new();
    t.load_preset(presets::UTF8_FULL_CONDENSED);
    t.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    t.set_content_arrangement(ContentArrangement::Dynamic);
    t
}

fn add_value_row(t: &mut Table, metric: &str, value: impl std::fmt::Display) {
    t.add_row([
        Cell::new(metric).add_attribute(Attribute::Bold),
        Cell::new(value.to_string()).set_alignment(CellAlignment::Right),
    ]);
}

/// Print the stats table for one completed solve: elapsed time, path cost,
/// action count, and nodes expanded.
pub fn print_run_stats(report: &SolveReport) {
    let mut table = new_base_table();
    table.set_header(["Metric", "Value"]);

    add_value_row(&mut table, "Time (µs)", report.elapsed_us);
    add_value_row(&mut table, "Path cost", report.path_cost);
    add_value_row(&mut table, "Actions", report.action_count());
    add_value_row(&mut table, "Nodes expanded", report.nodes_expanded);

    println!("\nRun statistics\n\n{table}");
}

/// Print a labelled snapshot of a board state: dimensions, entity counts,
/// and the boat/goal positions, as a small two-column table.
pub fn print_board_snapshot(state: &BoardState) {
    let mut table = new_base_table();
    table.set_header(["Field", "Value"]);

    add_value_row(&mut table, "Board", &state.board);
    add_value_row(
        &mut table,
        "Alligators / Turtles / Trees",
        format!("{} / {} / {}", state.alligators.len(), state.turtles.len(), state.trees.len()),
    );
    add_value_row(&mut table, "Boat", format!("{} {}", state.boat.pose.anchor, state.boat.pose.dir.as_char()));
    add_value_row(&mut table, "Goal", state.goal.pos);

    println!("\nFinal board\n\n{table}");
}
