use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::layout::{centered_rect, dropdown_rect};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemView {
    pub label: String,
    pub detail: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub title: String,
    pub items: Vec<ListItemView>,
    pub selected_idx: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesView {
    pub section: String,
    pub suggestions_enabled: bool,
    pub engine_count: usize,
}

/// Dropdown list anchored under `anchor` (completion popup, engine list).
pub fn draw_dropdown(frame: &mut Frame<'_>, anchor: Rect, bounds: Rect, view: &ListView) {
    if view.items.is_empty() || bounds.width == 0 || bounds.height == 0 {
        return;
    }

    let widest = view
        .items
        .iter()
        .map(|item| item_width(item))
        .max()
        .unwrap_or(0);
    let width = u16::try_from(widest + 2).unwrap_or(u16::MAX).max(24);
    let height = u16::try_from(view.items.len() + 2).unwrap_or(u16::MAX);
    let popup = dropdown_rect(anchor, bounds, width, height);
    if popup.width < 3 || popup.height < 3 {
        return;
    }
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {} ", view.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines = list_lines(view, inner.width as usize, inner.height as usize);
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn draw_preferences_overlay(frame: &mut Frame<'_>, area: Rect, view: &PreferencesView) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let popup = centered_rect(area, area.width.min(48), area.height.min(7));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" Preferences: {} ", view.section))
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mark = if view.suggestions_enabled { "x" } else { " " };
    let lines = vec![
        Line::from(format!("[{mark}] Show search suggestions (s)")),
        Line::from(format!("{} search engines configured", view.engine_count)),
        Line::from(Span::styled(
            "Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let body = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .style(Style::default().fg(Color::White));
    frame.render_widget(body, inner);
}

fn item_width(item: &ListItemView) -> usize {
    3 + item.label.width() + item.detail.as_ref().map_or(0, |detail| detail.width() + 2)
}

fn list_lines(view: &ListView, width: usize, max_items: usize) -> Vec<Line<'static>> {
    if max_items == 0 {
        return Vec::new();
    }
    let selected_idx = view.selected_idx.min(view.items.len().saturating_sub(1));

    let start_idx = if view.items.len() <= max_items || selected_idx < max_items / 2 {
        0
    } else if selected_idx >= view.items.len() - max_items / 2 {
        view.items.len().saturating_sub(max_items)
    } else {
        selected_idx.saturating_sub(max_items / 2)
    };

    let mut lines = Vec::new();
    for item in view.items.iter().skip(start_idx).take(max_items) {
        let mut spans = Vec::new();
        if item.selected {
            spans.push(Span::styled(" ┃ ", Style::default().fg(Color::White)));
        } else {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::raw(item.label.clone()));
        if let Some(detail) = &item.detail {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                detail.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let line_style = if item.selected {
            Style::default().bg(Color::Rgb(45, 45, 50))
        } else {
            Style::default()
        };
        // Pad so the highlight covers the full row.
        let padding = " ".repeat(width.saturating_sub(item_width(item)));
        spans.push(Span::raw(padding));

        lines.push(Line::from(spans).style(line_style));
    }
    lines
}
