//! Human-readable rank tables.

use colored::Colorize;
use organum_core::{RankKind, RankTable, RowTable};

const SILENT: &str = "-";

/// Prints one rank as a colored table.
pub(crate) fn print_rank_table(table: &RankTable) {
    println!("{} {}", "Rank:".cyan().bold(), table.full_name.bold());
    println!(
        "  {} {} ({} pipes per row, {})",
        "Windchest:".dimmed(),
        table.windchest,
        table.len(),
        table.closure
    );

    for (id, row) in &table.rows {
        if table.kind == RankKind::Composite {
            println!("\n  {}", id.to_string().yellow());
        }
        println!("{}", header().dimmed());
        for line in row_lines(table, row) {
            println!("{}", line);
        }
    }
    println!();
}

fn header() -> String {
    format!(
        "  {:<6} {:>10} {:>10} {:>8} {:>8}",
        "note", "freq Hz", "length mm", "int mm", "ext mm"
    )
}

/// Formats one line per note; silent pipes print a dash in every column.
pub(crate) fn row_lines(table: &RankTable, row: &RowTable) -> Vec<String> {
    table
        .notes
        .iter()
        .enumerate()
        .map(|(i, note)| {
            format!(
                "  {:<6} {:>10} {:>10} {:>8} {:>8}",
                note.to_string(),
                cell(row.frequencies.get(i).copied().flatten(), 2),
                cell(row.lengths.get(i).copied().flatten(), 1),
                cell(row.sizes.get(i).copied().flatten().map(f64::from), 0),
                cell(row.external_diameters.get(i).copied().flatten(), 2),
            )
        })
        .collect()
}

fn cell(value: Option<f64>, places: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", places, v),
        None => SILENT.to_string(),
    }
}
