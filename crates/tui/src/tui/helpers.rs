use std::cmp::min;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::FilterMode;
use crate::view::TaskCounts;

pub const BG_BASE: Color = Color::Rgb(14, 17, 23);
pub const BG_PANEL: Color = Color::Rgb(22, 26, 34);
pub const BG_ACCENT: Color = Color::Rgb(32, 37, 47);
pub const FG_ACCENT: Color = Color::Rgb(120, 161, 255);

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn inset_rect(area: Rect, padding: u16) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let px = padding.min(area.width / 2);
    let py = padding.min(area.height / 2);
    Rect {
        x: area.x + px,
        y: area.y + py,
        width: area.width.saturating_sub(px * 2),
        height: area.height.saturating_sub(py * 2),
    }
}

pub fn short_id(id: &str) -> String {
    if id.len() <= 8 {
        id.to_string()
    } else {
        id[..8].to_string()
    }
}

pub fn checkbox(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Tab label with the live count for that filter, e.g. `✅ Completed (2)`.
/// Counts always come from the full collection.
pub fn tab_label(mode: FilterMode, counts: &TaskCounts) -> String {
    let (icon, name) = match mode {
        FilterMode::All => ("📋", "All"),
        FilterMode::Completed => ("✅", "Completed"),
        FilterMode::Uncompleted => ("🌱", "Uncompleted"),
    };
    format!("{} {} ({})", icon, name, counts.for_mode(mode))
}

pub fn filter_description(mode: FilterMode) -> &'static str {
    match mode {
        FilterMode::All => "Every task from the service",
        FilterMode::Completed => "Tasks you have finished",
        FilterMode::Uncompleted => "Tasks still open",
    }
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Tab / Shift+Tab", "Switch between All / Completed / Uncompleted"),
        ("j / k or ↓ / ↑", "Move selection"),
        ("q", "Quit"),
        ("a", "Add a new task"),
        ("d / Space / Enter", "Toggle completion of the selected task"),
        ("x / Delete", "Delete task (with confirmation)"),
        ("r", "Reload from the task service"),
        ("h", "Toggle this help overlay"),
        ("Home / End", "Jump to first / last task"),
        ("Esc", "Cancel/close overlays"),
    ]
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}
