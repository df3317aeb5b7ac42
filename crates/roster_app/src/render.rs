use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use roster_core::{AppViewModel, Category, LayoutMode, PaneView, UserRowView};

const CELL_WIDTH: usize = 38;

/// Renders the active pane, toolbar and overlays as plain text.
pub fn render(view: &AppViewModel, updated_at: Option<DateTime<Utc>>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tabs(view.active));

    let Some(pane) = view.active_pane() else {
        return out;
    };
    let _ = writeln!(out, "{}", status_line(pane, updated_at));

    if pane.rows.is_empty() && !pane.is_loading {
        let _ = writeln!(out, "  (no users)");
    }
    match view.layout {
        LayoutMode::OneColumn => {
            for (idx, row) in pane.rows.iter().enumerate() {
                let _ = writeln!(out, "{}", row_line(idx + 1, row, pane.editing));
            }
        }
        LayoutMode::TwoColumn => {
            for (pair_idx, pair) in pane.rows.chunks(2).enumerate() {
                let left = cell(pair_idx * 2 + 1, &pair[0], pane.editing);
                let right = pair
                    .get(1)
                    .map(|row| cell(pair_idx * 2 + 2, row, pane.editing))
                    .unwrap_or_default();
                let _ = writeln!(out, "{left:<width$}  {right}", width = CELL_WIDTH);
            }
        }
    }

    let toolbar = &view.toolbar;
    let _ = writeln!(
        out,
        "[{}]  {}  [Delete{}]",
        toolbar.edit_label,
        if toolbar.count_enabled {
            toolbar.count_label.as_str()
        } else {
            "-"
        },
        if toolbar.delete_enabled { "" } else { " (disabled)" }
    );

    if let Some(notice) = &view.error {
        let _ = writeln!(out, "! {} (type 'dismiss' to hide)", notice.message());
    }
    if let Some(photo) = &view.photo {
        let _ = writeln!(
            out,
            "Photo: {} -> {}",
            photo.display_name,
            photo.url.as_deref().unwrap_or("no image")
        );
    }
    out
}

fn tabs(active: Category) -> String {
    Category::ALL
        .iter()
        .map(|category| {
            if *category == active {
                format!("[{}]", category.title())
            } else {
                format!(" {} ", category.title())
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn status_line(pane: &PaneView, updated_at: Option<DateTime<Utc>>) -> String {
    let mut line = format!(
        "{} users, page {}",
        pane.rows.len(),
        pane.current_page
    );
    if pane.is_loading {
        line.push_str(", loading");
    }
    if pane.reached_end {
        line.push_str(", end of list");
    }
    if let Some(at) = updated_at {
        let _ = write!(
            line,
            ", updated {}",
            at.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }
    line
}

fn marker(row: &UserRowView, editing: bool) -> &'static str {
    match (editing, row.selected) {
        (false, _) => "",
        (true, true) => "[x] ",
        (true, false) => "[ ] ",
    }
}

fn row_line(number: usize, row: &UserRowView, editing: bool) -> String {
    format!(
        "{:>3}. {}{} | {} | {}",
        number,
        marker(row, editing),
        row.display_name,
        row.subtitle,
        row.email
    )
}

fn cell(number: usize, row: &UserRowView, editing: bool) -> String {
    let text = format!("{:>3}. {}{}", number, marker(row, editing), row.display_name);
    truncate(&text, CELL_WIDTH)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}
