// OrderDesk - render.rs
//
// Plain-text rendering of listings for the CLI: the table, the
// per-status summary counts, and the "N件中M件を表示" footer every
// screen of the console shows. Binary-side module; the library core
// never formats output.

use orderdesk::app::query::ListingOutcome;
use orderdesk::core::model::{ListingView, Record};
use orderdesk::util::constants::MAX_CELL_WIDTH;
use std::fmt::Write;

/// Render the view catalogue for `orderdesk views`.
pub fn render_views(views: &[ListingView]) -> String {
    let mut rows: Vec<[String; 4]> = vec![[
        "ID".to_string(),
        "名称".to_string(),
        "SOURCE".to_string(),
        "説明".to_string(),
    ]];

    for view in views {
        let source = if view.is_builtin { "built-in" } else { "user" };
        rows.push([
            view.id.clone(),
            view.name.clone(),
            source.to_string(),
            view.description.clone(),
        ]);
    }

    render_rows(&rows)
}

/// Render one executed listing: table, summary counts, footer.
pub fn render_listing(view: &ListingView, outcome: &ListingOutcome<'_>, limit: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", view.name);

    let shown = if limit > 0 && limit < outcome.items.len() {
        &outcome.items[..limit]
    } else {
        &outcome.items[..]
    };

    out.push_str(&render_table(view, shown));

    if let Some(ref summary) = outcome.summary {
        let counts = summary
            .counts
            .iter()
            .map(|(label, n)| format!("{label}: {n}"))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{counts}");
    }

    if shown.len() < outcome.items.len() {
        let _ = writeln!(
            out,
            "{}件中{}件を表示（先頭{}件）",
            outcome.result.total_count,
            outcome.result.matched_count(),
            shown.len()
        );
    } else {
        let _ = writeln!(
            out,
            "{}件中{}件を表示",
            outcome.result.total_count,
            outcome.result.matched_count()
        );
    }

    out
}

/// Render the row table for a listing view.
fn render_table(view: &ListingView, items: &[&Record]) -> String {
    // Views without declared columns (minimal user definitions) fall
    // back to their searchable fields.
    let fields: Vec<(&str, &str)> = if view.columns.is_empty() {
        view.searchable_fields
            .iter()
            .map(|f| (f.as_str(), f.as_str()))
            .collect()
    } else {
        view.columns
            .iter()
            .map(|c| (c.field.as_str(), c.heading.as_str()))
            .collect()
    };

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(items.len() + 1);
    rows.push(fields.iter().map(|(_, heading)| heading.to_string()).collect());
    for record in items {
        rows.push(
            fields
                .iter()
                .map(|(field, _)| record.display_value(field).unwrap_or_default())
                .collect(),
        );
    }

    let mut table = String::new();
    let widths = column_widths(&rows);
    for (i, row) in rows.iter().enumerate() {
        table.push_str(&render_row(row, &widths));
        if i == 0 {
            table.push_str(&separator(&widths));
        }
    }
    table
}

fn render_rows(rows: &[[String; 4]]) -> String {
    let owned: Vec<Vec<String>> = rows.iter().map(|r| r.to_vec()).collect();
    let widths = column_widths(&owned);
    let mut out = String::new();
    for (i, row) in owned.iter().enumerate() {
        out.push_str(&render_row(row, &widths));
        if i == 0 {
            out.push_str(&separator(&widths));
        }
    }
    out
}

/// Visible cell content, truncated with an ellipsis past MAX_CELL_WIDTH.
///
/// Widths count chars, not terminal cells; full-width CJK text renders
/// wider than its char count, so columns are aligned per char like the
/// rest of the toolchain's tabular output.
fn clip(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        cell.to_string()
    } else {
        let mut clipped: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
        clipped.push('…');
        clipped
    }
}

fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.first().map_or(0, Vec::len);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(clip(cell).chars().count());
        }
    }
    widths
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, cell) in row.iter().enumerate() {
        let clipped = clip(cell);
        let pad = widths[i].saturating_sub(clipped.chars().count());
        line.push_str(&clipped);
        if i + 1 < row.len() {
            line.extend(std::iter::repeat(' ').take(pad + 2));
        }
    }
    line.push('\n');
    line
}

fn separator(widths: &[usize]) -> String {
    let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
    let mut line = "-".repeat(total);
    line.push('\n');
    line
}
